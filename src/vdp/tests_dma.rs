use super::test_utils::*;
use super::*;
use crate::error::{BusError, VdpError};
use crate::memory::Memory;

#[test]
fn test_dma_register_decode() {
    let mut vdp = clean_vdp();

    vdp.write_register(REG_DMA_LEN_LO, 0x12);
    vdp.write_register(REG_DMA_LEN_HI, 0x34);
    vdp.write_register(REG_DMA_SRC_LO, 0x55);
    vdp.write_register(REG_DMA_SRC_MID, 0xAA);
    vdp.write_register(REG_DMA_SRC_HI, 0x8F);

    assert_eq!(vdp.dma_length(), 0x3412);
    // Bit 7 is the mode, bits 6-0 are address bits 23-17
    let expected = (0x0F_u32 << 17) | (0xAA << 9) | (0x55 << 1);
    assert_eq!(vdp.dma_source(), expected);
    assert_eq!(vdp.dma_source() & 1, 0);
    assert_eq!(vdp.dma_mode(), DMA_MODE_FILL);
}

#[test]
fn test_dma_mode_checks() {
    let mut vdp = clean_vdp();

    for (reg, mode) in [(0x00, 0), (0x7F, 1), (0x80, 2), (0xFF, 3)] {
        vdp.write_register(REG_DMA_SRC_HI, reg);
        assert_eq!(vdp.dma_mode(), mode);
        assert_eq!(vdp.is_dma_transfer(), mode < 2);
        assert_eq!(vdp.is_dma_fill(), mode == 2);
        assert_eq!(vdp.is_dma_copy(), mode == 3);
    }
}

#[test]
fn test_transfer_to_vram() {
    let mut vdp = clean_vdp();
    let mut host = Memory::new(0x1000);
    host.load(0x200, &[0x11, 0x22, 0x33, 0x44]).unwrap();

    vdp.write_register(REG_AUTO_INC, 2);
    setup_dma(&mut vdp, DMA_MODE_TRANSFER_LO, 0x200, 2);
    command(&mut vdp, 0x4000, 0x0080, &mut host);

    assert_eq!(&vdp.vram()[0..4], &[0x11, 0x22, 0x33, 0x44]);
    assert_eq!(vdp.latched_address(), 0x0004);
    assert_eq!(vdp.dma_state(), DmaState::Idle);
}

#[test]
fn test_transfer_to_cram() {
    let mut vdp = clean_vdp();
    let mut host = Memory::new(0x1000);
    host.load(0x100, &[0x0E, 0xEE, 0x00, 0x0E]).unwrap();

    vdp.write_register(REG_AUTO_INC, 2);
    setup_dma(&mut vdp, DMA_MODE_TRANSFER_LO, 0x100, 2);
    command(&mut vdp, 0xC010, 0x0080, &mut host);

    assert_eq!(&vdp.cram()[0x10..0x14], &[0x0E, 0xEE, 0x00, 0x0E]);
    assert!(vdp.dirty().is_cram_dirty(0x10));
    assert!(vdp.dirty().is_cram_dirty(0x13));
}

#[test]
fn test_transfer_reads_each_byte_once() {
    let mut vdp = clean_vdp();
    let mut host = RecordingHost::default();

    vdp.write_register(REG_AUTO_INC, 2);
    setup_dma(&mut vdp, DMA_MODE_TRANSFER_HI, 0x0010, 3);
    command(&mut vdp, 0x4000, 0x0080, &mut host);

    // Mode 1 leaves register bit 6 set, which lands at address bit 23
    let base = 0x80_0010;
    assert_eq!(host.reads, vec![base, base + 1, base + 2, base + 3, base + 4, base + 5]);
    assert_eq!(&vdp.vram()[0..6], &[0x10, 0x11, 0x12, 0x13, 0x14, 0x15]);
}

#[test]
fn test_transfer_error_stops_and_propagates() {
    let mut vdp = clean_vdp();
    let mut host = Memory::new(0x1000);
    host.load(0xFFC, &[0xA1, 0xA2, 0xA3, 0xA4]).unwrap();

    vdp.write_register(REG_AUTO_INC, 2);
    setup_dma(&mut vdp, DMA_MODE_TRANSFER_LO, 0xFFC, 4);
    vdp.submit_command(0x4000, &mut host).unwrap();
    let err = vdp.submit_command(0x0080, &mut host).unwrap_err();

    match err {
        VdpError::DmaSource { address, source } => {
            assert_eq!(address, 0x1000);
            assert_eq!(source, BusError::Unmapped(0x1000));
        }
        other => panic!("unexpected error {other:?}"),
    }
    // Words read before the failure are already in VRAM
    assert_eq!(&vdp.vram()[0..4], &[0xA1, 0xA2, 0xA3, 0xA4]);
    assert_eq!(vdp.vram()[4], 0x00);
    assert_eq!(vdp.latched_address(), 0x0004);
    assert!(!vdp.is_command_pending());
}

#[test]
fn test_zero_length_transfer_does_nothing() {
    let mut vdp = clean_vdp();
    let mut host = RecordingHost::default();

    setup_dma(&mut vdp, DMA_MODE_TRANSFER_LO, 0x0000, 0);
    vdp.clear_dirty();
    command(&mut vdp, 0x4000, 0x0080, &mut host);

    assert!(host.reads.is_empty());
    assert!(vdp.dirty().summary().is_empty());
    assert_eq!(vdp.latched_address(), 0x0000);
}

#[test]
fn test_fill_is_deferred_to_next_write() {
    let mut vdp = clean_vdp();
    let mut host = no_host();

    vdp.write_register(REG_AUTO_INC, 4);
    setup_dma(&mut vdp, DMA_MODE_FILL, 0, 5);
    command(&mut vdp, 0x4100, 0x0080, &mut host);

    // Nothing happens at command time
    assert!(vdp.vram().iter().all(|&b| b == 0));
    assert_eq!(vdp.dma_state(), DmaState::FillPending);

    vdp.write_word(0x1234);

    for k in 0..5 {
        let addr = 0x0100 + k * 4;
        assert_eq!(vdp.vram()[addr], 0x12, "word {k} high");
        assert_eq!(vdp.vram()[addr + 1], 0x34, "word {k} low");
        assert_eq!(vdp.vram()[addr + 2], 0x00, "gap after word {k}");
    }
    assert_eq!(vdp.vram()[0x0114], 0x00);
    assert_eq!(vdp.latched_address(), 0x0114);
    assert_eq!(vdp.dma_state(), DmaState::Idle);
}

#[test]
fn test_fill_consumed_by_exactly_one_write() {
    let mut vdp = clean_vdp();
    let mut host = no_host();

    vdp.write_register(REG_AUTO_INC, 2);
    setup_dma(&mut vdp, DMA_MODE_FILL, 0, 3);
    command(&mut vdp, 0x4000, 0x0080, &mut host);

    vdp.write_word(0xAAAA);
    vdp.write_word(0x5555);

    assert_eq!(&vdp.vram()[0..6], &[0xAA; 6]);
    assert_eq!(&vdp.vram()[6..8], &[0x55, 0x55]);
    assert_eq!(vdp.latched_address(), 0x0008);
}

#[test]
fn test_fill_byte() {
    let mut vdp = clean_vdp();
    let mut host = no_host();

    vdp.write_register(REG_AUTO_INC, 1);
    setup_dma(&mut vdp, DMA_MODE_FILL, 0, 0x10);
    command(&mut vdp, 0x4800, 0x0080, &mut host);

    vdp.write_byte(0x77);

    assert!(vdp.vram()[0x0800..0x0810].iter().all(|&b| b == 0x77));
    assert_eq!(vdp.vram()[0x0810], 0x00);
    assert_eq!(vdp.latched_address(), 0x0810);
}

#[test]
fn test_fill_zero_length_swallows_value() {
    let mut vdp = clean_vdp();
    let mut host = no_host();

    vdp.write_register(REG_AUTO_INC, 2);
    setup_dma(&mut vdp, DMA_MODE_FILL, 0, 0);
    command(&mut vdp, 0x4000, 0x0080, &mut host);

    vdp.write_word(0xFFFF);

    assert_eq!(vdp.vram()[0], 0x00);
    assert_eq!(vdp.latched_address(), 0x0000);
    assert_eq!(vdp.dma_state(), DmaState::Idle);
}

#[test]
fn test_fill_cancelled_by_new_command() {
    let mut vdp = clean_vdp();
    let mut host = no_host();

    vdp.write_register(REG_AUTO_INC, 2);
    setup_dma(&mut vdp, DMA_MODE_FILL, 0, 8);
    command(&mut vdp, 0x4000, 0x0080, &mut host);
    command(&mut vdp, 0x4000, 0x0000, &mut host);

    vdp.write_word(0x9999);

    assert_eq!(&vdp.vram()[0..4], &[0x99, 0x99, 0x00, 0x00]);
}

#[test]
fn test_fill_into_cram() {
    let mut vdp = clean_vdp();
    let mut host = no_host();

    vdp.write_register(REG_AUTO_INC, 2);
    setup_dma(&mut vdp, DMA_MODE_FILL, 0, 4);
    command(&mut vdp, 0xC000, 0x0080, &mut host);

    vdp.write_word(0x0E0E);

    assert!(vdp.cram()[0..8].iter().all(|&b| b == 0x0E));
    assert_eq!(vdp.cram()[8], 0x00);
}

#[test]
fn test_copy_wraps_source() {
    let mut vdp = clean_vdp();
    let mut host = no_host();

    vdp.write_vram(0xFFFE, 0xAA);
    vdp.write_vram(0xFFFF, 0xBB);
    vdp.write_vram(0x0000, 0xCC);
    vdp.write_vram(0x0001, 0xDD);

    vdp.write_register(REG_AUTO_INC, 2);
    setup_dma(&mut vdp, DMA_MODE_COPY, 0xFFFE, 2);
    assert_eq!(vdp.dma_source() & 0xFFFF, 0xFFFE);
    command(&mut vdp, 0x6000, 0x0080, &mut host);

    assert_eq!(&vdp.vram()[0x2000..0x2004], &[0xAA, 0xBB, 0xCC, 0xDD]);
    assert_eq!(vdp.latched_address(), 0x2004);
}

#[test]
fn test_copy_into_vsram() {
    let mut vdp = clean_vdp();
    let mut host = no_host();

    vdp.write_vram(0x0300, 0x01);
    vdp.write_vram(0x0301, 0x80);

    vdp.write_register(REG_AUTO_INC, 2);
    setup_dma(&mut vdp, DMA_MODE_COPY, 0x0300, 1);
    command(&mut vdp, 0x4000, 0x0090, &mut host);

    assert_eq!(&vdp.vsram()[0..2], &[0x01, 0x80]);
}

#[test]
fn test_copy_never_touches_host() {
    let mut vdp = clean_vdp();
    let mut host = RecordingHost::default();

    vdp.write_register(REG_AUTO_INC, 2);
    setup_dma(&mut vdp, DMA_MODE_COPY, 0, 16);
    command(&mut vdp, 0x4000, 0x0080, &mut host);

    assert!(host.reads.is_empty());
}
