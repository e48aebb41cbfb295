//! Generator configuration

use serde::{Deserialize, Serialize};

use crate::consts::MAX_RETRIES;

/// Options fixed for the lifetime of a [`crate::DungeonGenerator`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Seed for the generator's random source
    pub seed: u64,
    /// Reserve the last key for the boss room's door
    pub boss_room_locked: bool,
    /// Put a separate goal room behind the boss
    pub generate_goal: bool,
    /// Full restarts allowed before giving up
    pub max_retries: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            boss_room_locked: true,
            generate_goal: true,
            max_retries: MAX_RETRIES,
        }
    }
}

impl GeneratorConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }
}
