use crate::debugger::Debuggable;
use crate::error::VdpError;
use crate::memory::byte_utils::{join_u16, split_u16};
use crate::memory::HostMemory;
use log::{debug, trace};
use serde::Serialize;
use serde_json::{json, Value};

pub mod constants;
pub use constants::*;

pub mod access;
pub use access::AccessOps;

pub mod dma;
pub use dma::DmaOps;

pub mod dirty;
pub use dirty::{DirtyFlags, DirtyMap};

pub mod config;
pub use config::VdpConfig;

pub mod glitch;
pub use glitch::GlitchOps;

/// Progress through a two-word command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CommandState {
    Idle,
    AwaitingSecondWord,
}

/// Deferred DMA work that waits on the data port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DmaState {
    Idle,
    /// A fill was armed by the last command; the next data port write
    /// supplies the fill value.
    FillPending,
}

/// Genesis Video Display Processor (VDP) port and memory core.
///
/// Owns VRAM, CRAM, VSRAM, the register file and the dirty bitmap. The host
/// CPU drives it through the control and data ports; the renderer reads the
/// memories and the dirty bitmap and clears the latter once resynchronised.
#[derive(Debug)]
pub struct Vdp {
    pub(crate) vram: Box<[u8]>,
    pub(crate) cram: [u8; CRAM_SIZE],
    pub(crate) vsram: [u8; VSRAM_SIZE],
    pub(crate) registers: [u8; NUM_REGISTERS],
    pub(crate) dirty: DirtyMap,

    pub(crate) address: u16,
    pub(crate) mode: u8,
    pub(crate) command_state: CommandState,
    pub(crate) dma_requested: bool,
    pub(crate) dma_state: DmaState,

    pub(crate) hint_pending: bool,
    pub(crate) vint_pending: bool,

    pub(crate) cram_corruption: bool,
    pub(crate) config: VdpConfig,
}

impl Default for Vdp {
    fn default() -> Self {
        Self::new()
    }
}

impl Vdp {
    pub fn new() -> Self {
        Self::with_config(VdpConfig::default())
    }

    pub fn with_config(config: VdpConfig) -> Self {
        let mut vdp = Self {
            vram: vec![0; VRAM_SIZE].into_boxed_slice(),
            cram: [0; CRAM_SIZE],
            vsram: [0; VSRAM_SIZE],
            registers: [0; NUM_REGISTERS],
            dirty: DirtyMap::new(),
            address: 0,
            mode: 0,
            command_state: CommandState::Idle,
            dma_requested: false,
            dma_state: DmaState::Idle,
            hint_pending: false,
            vint_pending: false,
            cram_corruption: false,
            config,
        };
        vdp.reset();
        vdp
    }

    pub fn reset(&mut self) {
        self.hint_pending = false;
        self.vint_pending = false;
        self.command_state = CommandState::Idle;
        self.mode = 0;
        self.address = 0;
        self.dma_requested = false;
        self.dma_state = DmaState::Idle;
        self.vram.fill(0);
        self.cram.fill(0);
        self.vsram.fill(0);
        self.registers.fill(0);
        self.dirty.clear();
        if self.config.dirty_on_reset {
            self.dirty.mark_all();
        }
        self.cram_corruption = self.config.cram_corruption;
        debug!("VDP reset (cram corruption: {})", self.cram_corruption);
    }

    /// Control port write as seen on the CPU bus.
    ///
    /// With no command pending, a word of the form `10rRRRRR DDDDDDDD` sets
    /// register `R` to `D`. Everything else is command traffic.
    pub fn write_control<H>(&mut self, word: u16, host: &mut H) -> Result<(), VdpError>
    where
        H: HostMemory + ?Sized,
    {
        if self.command_state == CommandState::Idle
            && (word & CMD_FIRST_CODE_MASK) == CMD_REGISTER_WRITE
        {
            self.write_register(((word >> 8) & 0x1F) as usize, (word & 0xFF) as u8);
            return Ok(());
        }
        self.submit_command(word, host)
    }

    /// Feed one word of a two-word command.
    ///
    /// The first word commits address bits 13-0 and CD1-CD0 immediately. The
    /// second word commits A15-A14, ORs in CD4-CD2 and latches the DMA bit. A
    /// requested DMA runs before this returns, except fill which waits for
    /// the next data port write.
    pub fn submit_command<H>(&mut self, word: u16, host: &mut H) -> Result<(), VdpError>
    where
        H: HostMemory + ?Sized,
    {
        match self.command_state {
            CommandState::Idle => {
                self.address = (self.address & !CMD_FIRST_ADDR_MASK) | (word & CMD_FIRST_ADDR_MASK);
                self.mode = ((word & CMD_FIRST_CODE_MASK) >> 12) as u8;
                self.dma_requested = false;
                self.dma_state = DmaState::Idle;
                self.command_state = CommandState::AwaitingSecondWord;
                Ok(())
            }
            CommandState::AwaitingSecondWord => {
                self.address = (self.address & CMD_FIRST_ADDR_MASK)
                    | ((word & CMD_SECOND_ADDR_MASK) << 14);
                self.mode |= (word & CMD_SECOND_CODE_MASK) as u8;
                self.dma_requested = (word & CMD_SECOND_DMA_BIT) != 0;
                self.command_state = CommandState::Idle;

                if self.dma_requested {
                    self.start_dma(host)?;
                }
                Ok(())
            }
        }
    }

    /// Control port read. Cancels a pending command without rolling back
    /// the half already committed.
    pub fn read_control(&mut self) -> u16 {
        self.cancel_pending();
        let mut status = STATUS_BASE;
        if self.vint_pending {
            status |= STATUS_VINT_PENDING;
        }
        if self.dma_state == DmaState::FillPending {
            status |= STATUS_DMA_FILL_PENDING;
        }
        status
    }

    pub fn write_word(&mut self, value: u16) {
        self.cancel_pending();
        if self.take_fill() {
            self.fill_words(value);
        } else {
            self.put_word(value);
        }
    }

    pub fn write_byte(&mut self, value: u8) {
        self.cancel_pending();
        if self.take_fill() {
            self.fill_bytes(value);
        } else {
            self.put_byte(value);
        }
    }

    pub fn read_word(&mut self) -> u16 {
        self.cancel_pending();
        let addr = self.address;
        let value = match self.mode {
            MODE_VRAM_READ => join_u16(self.read_vram(addr), self.read_vram(addr.wrapping_add(1))),
            MODE_CRAM_READ => join_u16(self.read_cram(addr), self.read_cram(addr.wrapping_add(1))),
            MODE_VSRAM_READ => {
                join_u16(self.read_vsram(addr), self.read_vsram(addr.wrapping_add(1)))
            }
            _ => 0,
        };
        self.advance();
        value
    }

    pub fn read_byte(&mut self) -> u8 {
        self.cancel_pending();
        let addr = self.address;
        let value = match self.mode {
            MODE_VRAM_READ => self.read_vram(addr),
            MODE_CRAM_READ => self.read_cram(addr),
            MODE_VSRAM_READ => self.read_vsram(addr),
            _ => 0,
        };
        self.advance();
        value
    }

    /// Write a register directly. Also clears the latched mode, as the
    /// hardware does.
    pub fn write_register(&mut self, index: usize, value: u8) {
        let index = index & (NUM_REGISTERS - 1);
        if self.registers[index] != value {
            self.dirty.mark_register(index);
        }
        trace!("VDP reg {:#04X} = {:#04X}", index, value);
        self.registers[index] = value;
        self.mode = 0;
    }

    /// Word write through the latched mode, then auto-increment.
    pub(crate) fn put_word(&mut self, value: u16) {
        let addr = self.address;
        let next = addr.wrapping_add(1);
        let (high, low) = split_u16(value);
        match self.mode {
            MODE_VRAM_WRITE => {
                // Bytes land in ascending address order; an odd address
                // takes the low byte first.
                if addr & 1 != 0 {
                    self.write_vram(addr, low);
                    self.write_vram(next, high);
                } else {
                    self.write_vram(addr, high);
                    self.write_vram(next, low);
                }
            }
            MODE_CRAM_WRITE => {
                self.write_cram(addr, high);
                self.write_cram(next, low);
            }
            MODE_VSRAM_WRITE => {
                self.write_vsram(addr, high);
                self.write_vsram(next, low);
            }
            _ => {}
        }
        self.advance();
    }

    pub(crate) fn put_byte(&mut self, value: u8) {
        let addr = self.address;
        match self.mode {
            MODE_VRAM_WRITE => self.write_vram(addr, value),
            MODE_CRAM_WRITE => self.write_cram(addr, value),
            MODE_VSRAM_WRITE => self.write_vsram(addr, value),
            _ => {}
        }
        self.advance();
    }

    #[inline]
    fn advance(&mut self) {
        self.address = self.address.wrapping_add(self.auto_increment() as u16);
    }

    #[inline]
    fn cancel_pending(&mut self) {
        self.command_state = CommandState::Idle;
    }

    fn take_fill(&mut self) -> bool {
        std::mem::replace(&mut self.dma_state, DmaState::Idle) == DmaState::FillPending
    }

    pub fn auto_increment(&self) -> u8 {
        self.registers[REG_AUTO_INC]
    }

    pub fn sprite_table_address(&self) -> usize {
        // Bits 0-6 specify bits 9-15 of VRAM address
        ((self.registers[REG_SPRITE_TABLE] as usize) & 0x7F) << 9
    }

    pub fn latched_address(&self) -> u16 {
        self.address
    }

    pub fn latched_mode(&self) -> u8 {
        self.mode
    }

    pub fn command_state(&self) -> CommandState {
        self.command_state
    }

    pub fn is_command_pending(&self) -> bool {
        self.command_state == CommandState::AwaitingSecondWord
    }

    pub fn dma_requested(&self) -> bool {
        self.dma_requested
    }

    pub fn dma_state(&self) -> DmaState {
        self.dma_state
    }

    pub fn vram(&self) -> &[u8] {
        &self.vram
    }

    pub fn cram(&self) -> &[u8] {
        &self.cram
    }

    pub fn vsram(&self) -> &[u8] {
        &self.vsram
    }

    pub fn registers(&self) -> &[u8] {
        &self.registers
    }

    pub fn register(&self, index: usize) -> u8 {
        self.registers[index & (NUM_REGISTERS - 1)]
    }

    pub fn dirty(&self) -> &DirtyMap {
        &self.dirty
    }

    /// Renderer-side acknowledgement: forget all tracked changes.
    pub fn clear_dirty(&mut self) {
        self.dirty.clear();
    }

    /// Interrupt flags are owned by the integration layer; the core only
    /// reports them.
    pub fn hint_pending(&self) -> bool {
        self.hint_pending
    }

    pub fn vint_pending(&self) -> bool {
        self.vint_pending
    }

    pub fn set_hint_pending(&mut self, pending: bool) {
        self.hint_pending = pending;
    }

    pub fn set_vint_pending(&mut self, pending: bool) {
        self.vint_pending = pending;
    }

    pub fn config(&self) -> &VdpConfig {
        &self.config
    }
}

impl Debuggable for Vdp {
    fn read_state(&self) -> Value {
        json!({
            "registers": self.registers.to_vec(),
            "address": self.address,
            "mode": self.mode,
            "command_state": self.command_state,
            "dma_requested": self.dma_requested,
            "dma_state": self.dma_state,
            "hint_pending": self.hint_pending,
            "vint_pending": self.vint_pending,
            "cram_corruption": self.cram_corruption,
            "dirty": self.dirty.summary().bits(),
        })
    }
}





#[cfg(test)]
mod tests_dma;
