//! Generator tunables

/// Default number of full restarts before giving up
pub const MAX_RETRIES: u32 = 20;

/// Attempts at finding a switch room and switch locks per generation attempt
pub const MAX_SWITCH_ATTEMPTS: usize = 10;

/// Chance (out of 10) that growth stays on the current key level
pub const STAY_ON_LEVEL_IN_10: u32 = 9;

/// Chance (1 in N) that a switch-lock candidate edge is left open
pub const SWITCH_SKIP_ONE_IN: u32 = 4;

/// Relative random spread applied to each room's intensity
pub const INTENSITY_GROWTH_JITTER: f64 = 0.1;

/// Fraction of the previous level's peak intensity dropped at a new level
pub const INTENSITY_EASE_OFF: f64 = 0.2;

/// Highest intensity after normalization, boss excluded
pub const INTENSITY_CEILING: f64 = 0.99;

/// Graphify probability used by [`crate::constraints::GridConstraints`]
pub const DEFAULT_GRAPHIFY_PROBABILITY: f64 = 0.2;
