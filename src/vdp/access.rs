//! Byte-level access to VRAM, CRAM and VSRAM.
//!
//! Every mutation of VDP memory goes through the `write_*` functions here so
//! the dirty bitmap stays exact: a write that stores the value already
//! present changes nothing and flags nothing.

use super::constants::*;
use super::Vdp;

pub trait AccessOps {
    fn write_vram(&mut self, addr: u16, value: u8);
    fn write_cram(&mut self, addr: u16, value: u8);
    fn write_vsram(&mut self, addr: u16, value: u8);
    fn read_vram(&self, addr: u16) -> u8;
    fn read_cram(&self, addr: u16) -> u8;
    fn read_vsram(&self, addr: u16) -> u8;
}

impl AccessOps for Vdp {
    #[inline]
    fn write_vram(&mut self, addr: u16, value: u8) {
        let addr = addr & VRAM_MASK;
        let idx = addr as usize;
        if self.vram[idx] != value {
            self.dirty.mark_vram(addr);
            self.vram[idx] = value;
        }
    }

    #[inline]
    fn write_cram(&mut self, addr: u16, value: u8) {
        let addr = addr & CRAM_MASK;
        let value = if self.cram_corruption {
            value ^ rand::random::<u8>().max(1)
        } else {
            value
        };
        self.store_cram(addr, value);
    }

    #[inline]
    fn write_vsram(&mut self, addr: u16, value: u8) {
        let idx = (addr & VSRAM_MASK) as usize;
        if self.vsram[idx] != value {
            self.dirty.mark_vsram();
            self.vsram[idx] = value;
        }
    }

    #[inline]
    fn read_vram(&self, addr: u16) -> u8 {
        self.vram[(addr & VRAM_MASK) as usize]
    }

    #[inline]
    fn read_cram(&self, addr: u16) -> u8 {
        self.cram[(addr & CRAM_MASK) as usize]
    }

    #[inline]
    fn read_vsram(&self, addr: u16) -> u8 {
        self.vsram[(addr & VSRAM_MASK) as usize]
    }
}

impl Vdp {
    /// CRAM poke that skips the corruption mask. Still write-if-different.
    #[inline]
    pub(crate) fn store_cram(&mut self, addr: u16, value: u8) {
        let addr = addr & CRAM_MASK;
        let idx = addr as usize;
        if self.cram[idx] != value {
            self.dirty.mark_cram(addr);
            self.cram[idx] = value;
        }
    }
}
