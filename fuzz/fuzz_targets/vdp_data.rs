#![no_main]
use libfuzzer_sys::fuzz_target;
use vdp_core::{Memory, Vdp};

fuzz_target!(|data: &[u8]| {
    if data.len() < 6 {
        return;
    }

    let mut vdp = Vdp::new();
    let mut host = Memory::new(0x1000);

    // First byte sets auto-increment, next four set up the command
    let _ = vdp.write_control(0x8F00 | data[0] as u16, &mut host);
    let ctrl1 = ((data[1] as u16) << 8) | (data[2] as u16);
    let ctrl2 = ((data[3] as u16) << 8) | (data[4] as u16);
    let _ = vdp.submit_command(ctrl1, &mut host);
    let _ = vdp.submit_command(ctrl2, &mut host);

    // Remaining bytes are data port writes; odd tails go through the byte path
    for chunk in data[5..].chunks(2) {
        if chunk.len() == 2 {
            vdp.write_word(((chunk[0] as u16) << 8) | (chunk[1] as u16));
        } else {
            vdp.write_byte(chunk[0]);
        }
    }

    // Also try reading
    let _ = vdp.read_word();
    let _ = vdp.read_byte();
});
