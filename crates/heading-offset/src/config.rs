//! Synchronizer Configuration

use crate::heading::MAX_LEVEL;

/// Synchronizer configuration options
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Highest level written to `aria-level`. Clamped to 6..=9.
    pub max_level: u8,

    /// Recompute headings when a dialog opens or closes
    pub track_dialogs: bool,
}

impl SyncConfig {
    /// `max_level` clamped into the representable range
    pub fn effective_max_level(&self) -> u8 {
        self.max_level.clamp(6, MAX_LEVEL)
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            max_level: MAX_LEVEL,
            track_dialogs: true,
        }
    }
}
