//! Error types.
//!
//! The VDP itself never fails: addresses wrap and unknown modes are ignored.
//! The only failures come from outside, either from the host bus while a
//! memory-to-VDP DMA is reading its source, or from a malformed config.

/// Failure reported by a host memory accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BusError {
    #[error("unmapped address {0:#08X}")]
    Unmapped(u32),
}

#[derive(Debug, thiserror::Error)]
pub enum VdpError {
    #[error("DMA source read failed at {address:#08X}")]
    DmaSource {
        address: u32,
        #[source]
        source: BusError,
    },
    #[error("invalid VDP config: {0}")]
    Config(#[from] serde_json::Error),
}
