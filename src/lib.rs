//! vdp-core - Sega Mega Drive/Genesis VDP port and memory core
//!
//! Emulates the control/data port protocol, the three internal memories and
//! the DMA engine of the Genesis VDP, with dirty tracking for renderers.

pub mod vdp;
pub mod memory;
pub mod debugger;
pub mod error;

pub use error::{BusError, VdpError};
pub use memory::{HostMemory, Memory};
pub use vdp::Vdp;
