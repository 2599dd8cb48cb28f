// src/memory/mod.rs

pub mod byte_utils;

use crate::error::BusError;

/// Read access to the host address space, used as the DMA source.
///
/// Implementations report unmapped or otherwise unreadable addresses through
/// [`BusError`]; the VDP stops the transfer and hands the error back.
pub trait HostMemory {
    fn read_byte(&mut self, address: u32) -> Result<u8, BusError>;
}

pub struct Memory {
    // The Genesis has a 24-bit address bus; anything past `data` is unmapped.
    pub data: Vec<u8>,
}

impl Memory {
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0; size],
        }
    }

    /// Copy `bytes` into memory starting at `address`. Nothing is written
    /// unless the whole range is mapped.
    pub fn load(&mut self, address: u32, bytes: &[u8]) -> Result<(), BusError> {
        let start = address as usize;
        let end = start.saturating_add(bytes.len());
        if end > self.data.len() {
            let first_unmapped = start.max(self.data.len());
            return Err(BusError::Unmapped(first_unmapped as u32));
        }
        self.data[start..end].copy_from_slice(bytes);
        Ok(())
    }

    pub fn write_word(&mut self, address: u32, value: u16) -> Result<(), BusError> {
        let (high, low) = byte_utils::split_u16(value);
        self.load(address, &[high, low])
    }
}

impl HostMemory for Memory {
    fn read_byte(&mut self, address: u32) -> Result<u8, BusError> {
        let address = address & 0xFFFFFF;
        self.data
            .get(address as usize)
            .copied()
            .ok_or(BusError::Unmapped(address))
    }
}
