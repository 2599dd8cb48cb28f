use super::constants::*;
use super::{AccessOps, DmaState, Vdp};
use crate::error::VdpError;
use crate::memory::byte_utils::join_u16;
use crate::memory::HostMemory;
use log::{debug, warn};

pub trait DmaOps {
    fn dma_mode(&self) -> u8;
    fn dma_source(&self) -> u32;
    fn dma_length(&self) -> u32;
    fn is_dma_transfer(&self) -> bool;
    fn is_dma_fill(&self) -> bool;
    fn is_dma_copy(&self) -> bool;
    fn start_dma<H>(&mut self, host: &mut H) -> Result<(), VdpError>
    where
        H: HostMemory + ?Sized;
    fn transfer_from_host<H>(&mut self, host: &mut H) -> Result<(), VdpError>
    where
        H: HostMemory + ?Sized;
    fn copy_vram(&mut self);
    fn fill_words(&mut self, value: u16);
    fn fill_bytes(&mut self, value: u8);
}

impl DmaOps for Vdp {
    /// Top two bits of register 0x17.
    fn dma_mode(&self) -> u8 {
        self.registers[REG_DMA_SRC_HI] >> DMA_MODE_SHIFT
    }

    /// Source byte address; always even.
    fn dma_source(&self) -> u32 {
        (((self.registers[REG_DMA_SRC_HI] & 0x7F) as u32) << 17)
            | ((self.registers[REG_DMA_SRC_MID] as u32) << 9)
            | ((self.registers[REG_DMA_SRC_LO] as u32) << 1)
    }

    /// Transfer length in units (words, or bytes for a byte fill). Zero
    /// means nothing is transferred.
    fn dma_length(&self) -> u32 {
        ((self.registers[REG_DMA_LEN_HI] as u32) << 8) | (self.registers[REG_DMA_LEN_LO] as u32)
    }

    /// Check if DMA mode is 0 or 1 (68k Transfer)
    fn is_dma_transfer(&self) -> bool {
        matches!(self.dma_mode(), DMA_MODE_TRANSFER_LO | DMA_MODE_TRANSFER_HI)
    }

    fn is_dma_fill(&self) -> bool {
        self.dma_mode() == DMA_MODE_FILL
    }

    fn is_dma_copy(&self) -> bool {
        self.dma_mode() == DMA_MODE_COPY
    }

    fn start_dma<H>(&mut self, host: &mut H) -> Result<(), VdpError>
    where
        H: HostMemory + ?Sized,
    {
        debug!(
            "DMA mode {} source {:#08X} length {:#06X} dest {:#06X} (mode code {:#04X})",
            self.dma_mode(),
            self.dma_source(),
            self.dma_length(),
            self.address,
            self.mode
        );
        match self.dma_mode() {
            DMA_MODE_FILL => {
                self.dma_state = DmaState::FillPending;
                Ok(())
            }
            DMA_MODE_COPY => {
                self.copy_vram();
                Ok(())
            }
            _ => self.transfer_from_host(host),
        }
    }

    fn transfer_from_host<H>(&mut self, host: &mut H) -> Result<(), VdpError>
    where
        H: HostMemory + ?Sized,
    {
        let mut source = self.dma_source();
        for _ in 0..self.dma_length() {
            let high = read_source(host, source)?;
            source = source.wrapping_add(1);
            let low = read_source(host, source)?;
            source = source.wrapping_add(1);
            self.put_word(join_u16(high, low));
        }
        Ok(())
    }

    /// VRAM to VRAM. The source wraps within VRAM regardless of the
    /// destination region.
    fn copy_vram(&mut self) {
        let mut source = (self.dma_source() & VRAM_MASK as u32) as u16;
        for _ in 0..self.dma_length() {
            let high = self.read_vram(source);
            source = source.wrapping_add(1);
            let low = self.read_vram(source);
            source = source.wrapping_add(1);
            self.put_word(join_u16(high, low));
        }
    }

    fn fill_words(&mut self, value: u16) {
        let len = self.dma_length();
        for _ in 0..len {
            self.put_word(value);
        }
        debug!("DMA fill {:#06X} x {} done, address {:#06X}", value, len, self.address);
    }

    fn fill_bytes(&mut self, value: u8) {
        let len = self.dma_length();
        for _ in 0..len {
            self.put_byte(value);
        }
        debug!("DMA fill {:#04X} x {} done, address {:#06X}", value, len, self.address);
    }
}

fn read_source<H>(host: &mut H, address: u32) -> Result<u8, VdpError>
where
    H: HostMemory + ?Sized,
{
    host.read_byte(address).map_err(|source| {
        warn!("DMA source read failed at {:#08X}: {}", address, source);
        VdpError::DmaSource { address, source }
    })
}
