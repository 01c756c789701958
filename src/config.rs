//! Tunable game rules.

use serde::{Deserialize, Serialize};

use crate::game::DEFAULT_MAX_OCCUPANTS;

/// Default fraction of predators that must be trapped for the kiwi win.
pub const DEFAULT_MIN_REQUIRED_CATCH: f64 = 0.8;

/// Rule parameters for one game.
///
/// Level files may carry a `config` block; missing fields take defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Maximum number of occupants on a single tile.
    pub max_occupants_per_tile: usize,
    /// Fraction of predators (0..=1) that must be trapped, together with
    /// counting every kiwi, to win.
    pub min_required_catch: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_occupants_per_tile: DEFAULT_MAX_OCCUPANTS,
            min_required_catch: DEFAULT_MIN_REQUIRED_CATCH,
        }
    }
}

impl GameConfig {
    /// Check if `trapped` out of `total` predators meets the catch quota.
    #[must_use]
    pub fn catch_quota_met(&self, trapped: u32, total: u32) -> bool {
        f64::from(trapped) >= f64::from(total) * self.min_required_catch
    }
}
