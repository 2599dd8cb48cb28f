use crate::error::VdpError;
use serde::{Deserialize, Serialize};

/// Per-instance VDP options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VdpConfig {
    /// Start with CRAM corruption mode enabled.
    pub cram_corruption: bool,
    /// Mark every region dirty on reset so the renderer does a full resync.
    pub dirty_on_reset: bool,
}

impl Default for VdpConfig {
    fn default() -> Self {
        Self {
            cram_corruption: false,
            dirty_on_reset: true,
        }
    }
}

impl VdpConfig {
    pub fn from_json(text: &str) -> Result<Self, VdpError> {
        Ok(serde_json::from_str(text)?)
    }
}
