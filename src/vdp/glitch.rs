//! Deliberate state corruption for chaos testing and visual effects.
//!
//! Nothing here touches VDP memory directly: every change is routed through
//! [`AccessOps`], the access layer's raw CRAM store or
//! [`Vdp::write_register`], so the dirty bitmap reflects exactly what was
//! corrupted.

use super::constants::*;
use super::{AccessOps, Vdp};
use log::debug;

pub trait GlitchOps {
    fn invert_vram(&mut self);
    fn shift_vram_up(&mut self);
    fn shift_vram_down(&mut self);
    fn shift_vram_down_random(&mut self) -> usize;
    fn corrupt_vram_byte(&mut self) -> (u16, u8, u8);
    fn randomize_cram(&mut self);
    fn scramble_sprite_table(&mut self);
    fn fuzz_scroll_register(&mut self) -> (usize, u8, u8);
    fn enable_cram_corruption(&mut self);
    fn disable_cram_corruption(&mut self);
    fn cram_corruption_enabled(&self) -> bool;
}

/// Uniform value in `0..bound`.
fn random_below(bound: u32) -> u32 {
    rand::random::<u32>() % bound
}

fn random_byte() -> u8 {
    rand::random::<u8>()
}

impl GlitchOps for Vdp {
    fn invert_vram(&mut self) {
        for addr in 0..=VRAM_MASK {
            let value = self.read_vram(addr);
            self.write_vram(addr, !value);
        }
        debug!("VRAM inverted");
    }

    /// Move every byte one address lower. The last byte keeps its value.
    fn shift_vram_up(&mut self) {
        for addr in 0..VRAM_MASK {
            let value = self.read_vram(addr + 1);
            self.write_vram(addr, value);
        }
        debug!("VRAM shifted up by 1 byte");
    }

    /// Move every byte one address higher. The first byte keeps its value.
    fn shift_vram_down(&mut self) {
        for addr in (1..=VRAM_MASK).rev() {
            let value = self.read_vram(addr - 1);
            self.write_vram(addr, value);
        }
        debug!("VRAM shifted down by 1 byte");
    }

    fn shift_vram_down_random(&mut self) -> usize {
        let shift = random_below(64) as usize;
        for addr in (shift..VRAM_SIZE).rev() {
            let value = self.read_vram((addr - shift) as u16);
            self.write_vram(addr as u16, value);
        }
        for addr in 0..shift {
            self.write_vram(addr as u16, 0);
        }
        debug!("VRAM shifted down by {} bytes", shift);
        shift
    }

    fn corrupt_vram_byte(&mut self) -> (u16, u8, u8) {
        let addr = rand::random::<u16>();
        let old = self.read_vram(addr);
        let new = random_byte();
        self.write_vram(addr, new);
        debug!("Corrupted VRAM at {:#06X}: {:#04X} -> {:#04X}", addr, old, new);
        (addr, old, new)
    }

    /// Shuffle the colour bytes in place. Tile data is left alone.
    fn randomize_cram(&mut self) {
        let mut colors = self.cram;
        for i in (1..CRAM_SIZE).rev() {
            let j = random_below(i as u32 + 1) as usize;
            colors.swap(i, j);
        }
        // Stored unmasked: a shuffle must not pick up the corruption XOR.
        for (addr, &value) in colors.iter().enumerate() {
            self.store_cram(addr as u16, value);
        }
        self.dirty.mark_all_cram();
        debug!("CRAM randomized");
    }

    fn scramble_sprite_table(&mut self) {
        let base = self.sprite_table_address();
        debug!("Scrambling sprite attribute table at {:#06X}", base);

        for _ in 0..SPRITE_COUNT {
            let sprite = random_below(SPRITE_COUNT as u32) as usize;
            let entry = (base + sprite * SPRITE_ENTRY_SIZE) as u16;
            let at = |offset: u16| entry.wrapping_add(offset);

            match random_below(10) {
                // Y position, allowed to go negative
                0 => {
                    let y = (random_below(1024) as i32 - 256) as u16;
                    self.write_vram(at(0), (y >> 8) as u8);
                    self.write_vram(at(1), y as u8);
                }
                // Size, biased towards the largest, plus a broken link
                1 => {
                    let size = if random_below(3) == 0 { 0xFF } else { random_byte() };
                    self.write_vram(at(2), size);
                    self.write_vram(at(3), random_byte());
                }
                // Pattern and attributes
                2 => {
                    self.write_vram(at(4), random_byte());
                    self.write_vram(at(5), random_byte());
                }
                // X position
                3 => {
                    let x = (random_below(1024) as i32 - 256) as u16;
                    self.write_vram(at(6), (x >> 8) as u8);
                    self.write_vram(at(7), x as u8);
                }
                // Swap with five other entries
                4 => {
                    for _ in 0..5 {
                        let other = random_below(SPRITE_COUNT as u32) as usize;
                        let other = (base + other * SPRITE_ENTRY_SIZE) as u16;
                        for offset in 0..SPRITE_ENTRY_SIZE as u16 {
                            let a = self.read_vram(at(offset));
                            let b = self.read_vram(other.wrapping_add(offset));
                            self.write_vram(at(offset), b);
                            self.write_vram(other.wrapping_add(offset), a);
                        }
                    }
                }
                // Whole entry
                5 => {
                    for offset in 0..SPRITE_ENTRY_SIZE as u16 {
                        self.write_vram(at(offset), random_byte());
                    }
                }
                // Ghost at the origin
                6 => {
                    for offset in [0, 1, 6, 7] {
                        self.write_vram(at(offset), 0);
                    }
                }
                // Giant at a random position
                7 => {
                    self.write_vram(at(2), 0xFF);
                    for offset in [0, 1, 6, 7] {
                        self.write_vram(at(offset), random_byte());
                    }
                }
                // Broken chain
                8 => {
                    self.write_vram(at(3), random_byte());
                    self.write_vram(at(2), random_byte());
                }
                // Odd pattern at maximum size
                _ => {
                    let pattern = rand::random::<u16>();
                    self.write_vram(at(4), (pattern >> 8) as u8);
                    self.write_vram(at(5), pattern as u8);
                    self.write_vram(at(2), 0xFF);
                }
            }
        }

        if random_below(10) == 0 {
            let reg = self.registers[REG_SPRITE_TABLE];
            self.write_register(REG_SPRITE_TABLE, (reg & 0x80) | (random_byte() & 0x7F));
            debug!("Sprite table base register scrambled");
        }

        self.dirty.mark_all_vram();
    }

    /// Nudge one of registers 0-3 by -10..=10.
    fn fuzz_scroll_register(&mut self) -> (usize, u8, u8) {
        let index = random_below(4) as usize;
        let old = self.registers[index];
        let delta = random_below(21) as i8 - 10;
        let new = old.wrapping_add(delta as u8);
        self.write_register(index, new);
        debug!("Fuzzed register {}: {:#04X} -> {:#04X}", index, old, new);
        (index, old, new)
    }

    fn enable_cram_corruption(&mut self) {
        self.cram_corruption = true;
        self.dirty.mark_all_cram();
        debug!("CRAM corruption enabled");
    }

    fn disable_cram_corruption(&mut self) {
        self.cram_corruption = false;
        debug!("CRAM corruption disabled");
    }

    fn cram_corruption_enabled(&self) -> bool {
        self.cram_corruption
    }
}
