//! ks-core: lock-and-key dungeon generation
//!
//! Builds dungeons whose rooms are gated by keys and switch states so that
//! the player must collect items in order to reach the boss and the goal.
//! The room layout itself comes from a [`DungeonConstraints`] provider;
//! [`GridConstraints`] is a ready-made rectangular grid.
//!
//! ```no_run
//! use ks_core::{DungeonGenerator, GeneratorConfig, GridConstraints};
//!
//! let grid = GridConstraints::new(8, 8, 25, 3, 1)?;
//! let mut generator = DungeonGenerator::new(grid, GeneratorConfig::with_seed(7));
//! let dungeon = generator.generate()?;
//! println!("{} rooms", dungeon.room_count());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Progress is reported through the `log` facade; nothing is printed unless
//! the application installs a logger.

pub mod config;
pub mod constraints;
pub mod consts;
pub mod dungeon;
pub mod error;
pub mod generator;
mod rng;

pub use config::GeneratorConfig;
pub use constraints::{DungeonConstraints, GridConstraints};
pub use error::{ConfigError, GenerationError, OutOfSpace, RetryReason};
pub use generator::DungeonGenerator;
pub use rng::GameRng;
