// Latched mode codes (CD5-CD0 after both command words, DMA bit excluded)
pub const MODE_VRAM_READ: u8 = 0x00;
pub const MODE_VRAM_WRITE: u8 = 0x04;
pub const MODE_CRAM_WRITE: u8 = 0x0C;
pub const MODE_VSRAM_READ: u8 = 0x10;
pub const MODE_VSRAM_WRITE: u8 = 0x14;
pub const MODE_CRAM_READ: u8 = 0x20;

// Command word fields
pub const CMD_FIRST_ADDR_MASK: u16 = 0x3FFF;
pub const CMD_FIRST_CODE_MASK: u16 = 0xC000;
pub const CMD_SECOND_ADDR_MASK: u16 = 0x0003;
pub const CMD_SECOND_CODE_MASK: u16 = 0x0070;
pub const CMD_SECOND_DMA_BIT: u16 = 0x0080;
pub const CMD_REGISTER_WRITE: u16 = 0x8000;

// Register indices
pub const REG_SPRITE_TABLE: usize = 5;
pub const REG_AUTO_INC: usize = 15;
pub const REG_DMA_LEN_LO: usize = 0x13;
pub const REG_DMA_LEN_HI: usize = 0x14;
pub const REG_DMA_SRC_LO: usize = 0x15;
pub const REG_DMA_SRC_MID: usize = 0x16;
pub const REG_DMA_SRC_HI: usize = 0x17;

// DMA modes (top two bits of register 0x17)
pub const DMA_MODE_SHIFT: u8 = 6;
pub const DMA_MODE_TRANSFER_LO: u8 = 0;
pub const DMA_MODE_TRANSFER_HI: u8 = 1;
pub const DMA_MODE_FILL: u8 = 2;
pub const DMA_MODE_COPY: u8 = 3;

// Status bits
pub const STATUS_BASE: u16 = 0x3400;
pub const STATUS_VINT_PENDING: u16 = 0x0080;
pub const STATUS_DMA_FILL_PENDING: u16 = 0x0002;

// Memory sizes
pub const NUM_REGISTERS: usize = 32;
pub const VRAM_SIZE: usize = 0x10000;
pub const CRAM_SIZE: usize = 0x80;
pub const VSRAM_SIZE: usize = 0x80;

pub const VRAM_MASK: u16 = 0xFFFF;
pub const CRAM_MASK: u16 = 0x007F;
pub const VSRAM_MASK: u16 = 0x007F;

// Sprite attribute table geometry
pub const SPRITE_COUNT: usize = 80;
pub const SPRITE_ENTRY_SIZE: usize = 8;
