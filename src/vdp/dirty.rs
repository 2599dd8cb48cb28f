//! Change tracking for incremental rendering.
//!
//! The bitmap is laid out as one flat byte block so a renderer can snapshot
//! it in a single copy:
//!
//! | Offset      | Size | Tracks                                   |
//! |:------------|:-----|:-----------------------------------------|
//! | 0x00-0x1F   | 32   | VRAM, one bit per 256-byte block         |
//! | 0x20-0x2F   | 16   | CRAM, one bit per byte                   |
//! | 0x30-0x33   | 4    | Registers, one bit per register          |
//! | 0x34        | 1    | Summary flags (see [`DirtyFlags`])       |
//!
//! The VDP only ever sets bits. Clearing is left to the renderer once it has
//! resynchronised its caches.

use bitflags::bitflags;

pub const DIRTY_VRAM_OFFSET: usize = 0x00;
pub const DIRTY_CRAM_OFFSET: usize = 0x20;
pub const DIRTY_REG_OFFSET: usize = 0x30;
pub const DIRTY_SUMMARY_OFFSET: usize = 0x34;
pub const DIRTY_MAP_SIZE: usize = 0x35;

bitflags! {
    /// Summary byte: one bit per region.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DirtyFlags: u8 {
        const VRAM = 0x01;
        const CRAM = 0x02;
        const VSRAM = 0x04;
        const REGISTERS = 0x08;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirtyMap {
    bytes: [u8; DIRTY_MAP_SIZE],
}

impl Default for DirtyMap {
    fn default() -> Self {
        Self::new()
    }
}

impl DirtyMap {
    pub fn new() -> Self {
        Self {
            bytes: [0; DIRTY_MAP_SIZE],
        }
    }

    /// Flag the 256-byte block containing `addr`.
    #[inline]
    pub fn mark_vram(&mut self, addr: u16) {
        let block = (addr >> 8) as usize;
        self.bytes[DIRTY_VRAM_OFFSET + ((block >> 3) & 0x1F)] |= 1 << (block & 7);
        self.bytes[DIRTY_SUMMARY_OFFSET] |= DirtyFlags::VRAM.bits();
    }

    #[inline]
    pub fn mark_cram(&mut self, addr: u16) {
        let addr = addr as usize;
        self.bytes[DIRTY_CRAM_OFFSET + ((addr >> 3) & 0x0F)] |= 1 << (addr & 7);
        self.bytes[DIRTY_SUMMARY_OFFSET] |= DirtyFlags::CRAM.bits();
    }

    /// VSRAM has no fine-grained tracking.
    #[inline]
    pub fn mark_vsram(&mut self) {
        self.bytes[DIRTY_SUMMARY_OFFSET] |= DirtyFlags::VSRAM.bits();
    }

    #[inline]
    pub fn mark_register(&mut self, index: usize) {
        self.bytes[DIRTY_REG_OFFSET + ((index >> 3) & 0x03)] |= 1 << (index & 7);
        self.bytes[DIRTY_SUMMARY_OFFSET] |= DirtyFlags::REGISTERS.bits();
    }

    pub fn mark_all_vram(&mut self) {
        self.bytes[DIRTY_VRAM_OFFSET..DIRTY_CRAM_OFFSET].fill(0xFF);
        self.bytes[DIRTY_SUMMARY_OFFSET] |= DirtyFlags::VRAM.bits();
    }

    pub fn mark_all_cram(&mut self) {
        self.bytes[DIRTY_CRAM_OFFSET..DIRTY_REG_OFFSET].fill(0xFF);
        self.bytes[DIRTY_SUMMARY_OFFSET] |= DirtyFlags::CRAM.bits();
    }

    pub fn mark_all(&mut self) {
        self.bytes.fill(0xFF);
    }

    pub fn clear(&mut self) {
        self.bytes.fill(0);
    }

    pub fn summary(&self) -> DirtyFlags {
        DirtyFlags::from_bits_truncate(self.bytes[DIRTY_SUMMARY_OFFSET])
    }

    pub fn is_vram_block_dirty(&self, block: usize) -> bool {
        let block = block & 0xFF;
        self.bytes[DIRTY_VRAM_OFFSET + (block >> 3)] & (1 << (block & 7)) != 0
    }

    pub fn is_cram_dirty(&self, addr: usize) -> bool {
        let addr = addr & 0x7F;
        self.bytes[DIRTY_CRAM_OFFSET + (addr >> 3)] & (1 << (addr & 7)) != 0
    }

    pub fn is_register_dirty(&self, index: usize) -> bool {
        let index = index & 0x1F;
        self.bytes[DIRTY_REG_OFFSET + (index >> 3)] & (1 << (index & 7)) != 0
    }

    pub fn vram_bits(&self) -> &[u8] {
        &self.bytes[DIRTY_VRAM_OFFSET..DIRTY_CRAM_OFFSET]
    }

    pub fn cram_bits(&self) -> &[u8] {
        &self.bytes[DIRTY_CRAM_OFFSET..DIRTY_REG_OFFSET]
    }

    pub fn register_bits(&self) -> &[u8] {
        &self.bytes[DIRTY_REG_OFFSET..DIRTY_SUMMARY_OFFSET]
    }

    /// Raw view of the whole bitmap.
    pub fn as_bytes(&self) -> &[u8; DIRTY_MAP_SIZE] {
        &self.bytes
    }
}
