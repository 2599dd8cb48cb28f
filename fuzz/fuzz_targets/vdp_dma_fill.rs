#![no_main]
use libfuzzer_sys::fuzz_target;
use vdp_core::vdp::{DmaOps, DmaState, STATUS_DMA_FILL_PENDING};
use vdp_core::{Memory, Vdp};

// Register, command and data port traffic interleaved, three bytes per
// step, so fill arming and its consumption get reached often.
fuzz_target!(|data: &[u8]| {
    let mut vdp = Vdp::new();
    let mut host = Memory::new(0x1000);

    for step in data.chunks_exact(3) {
        let arg = ((step[1] as u16) << 8) | (step[2] as u16);
        match step[0] % 6 {
            // One of the DMA length/source/mode registers
            0 => {
                let reg = 0x13 + (step[1] as u16 % 5);
                let _ = vdp.write_control(0x8000 | (reg << 8) | (step[2] as u16), &mut host);
            }
            1 => {
                let _ = vdp.write_control(0x8F00 | (step[2] as u16), &mut host);
            }
            // Write command with the DMA bit; the op byte picks the target memory
            2 => {
                let fill = vdp.is_dma_fill();
                let first = 0x4000 | (arg & 0x3FFF);
                let second = 0x0080 | (arg >> 14) | ((step[0] as u16) & 0x30);
                let _ = vdp.write_control(first, &mut host);
                assert!(vdp.is_command_pending());
                let _ = vdp.write_control(second, &mut host);
                assert_eq!(vdp.dma_state() == DmaState::FillPending, fill);
            }
            3 => {
                vdp.write_word(arg);
                assert_eq!(vdp.dma_state(), DmaState::Idle);
            }
            4 => {
                vdp.write_byte(step[2]);
                assert_eq!(vdp.dma_state(), DmaState::Idle);
            }
            _ => {
                let armed = vdp.dma_state() == DmaState::FillPending;
                let status = vdp.read_control();
                assert_eq!(status & STATUS_DMA_FILL_PENDING != 0, armed);
                assert!(!vdp.is_command_pending());
            }
        }
    }
});
