//! Dungeon generation
//!
//! A generation attempt runs these phases in order:
//!
//! 1. seed the entrance ([`init_entrance_room`])
//! 2. grow the spanning tree, opening key levels as it goes ([`place_rooms`])
//! 3. place boss and goal behind the final lock ([`place_boss_goal_rooms`])
//! 4. lock doors with switch states ([`place_switches`])
//! 5. compute room intensities ([`compute_intensity`])
//! 6. drop keys into the most intense rooms ([`place_keys`])
//! 7. add shortcuts ([`graphify`])
//! 8. ask the layout whether the result is acceptable
//!
//! Any phase can ask for a fresh attempt. Running out of room slots during
//! growth is handled separately by packing more rooms behind each lock.

mod boss;
mod entrance;
mod graphify;
mod intensity;
mod keys;
mod rooms;
mod switches;

pub use boss::place_boss_goal_rooms;
pub use entrance::init_entrance_room;
pub use graphify::graphify;
pub use intensity::compute_intensity;
pub use keys::place_keys;
pub use rooms::{place_rooms, usable_keys};
pub use switches::place_switches;

use crate::config::GeneratorConfig;
use crate::constraints::DungeonConstraints;
use crate::dungeon::{Dungeon, KeyLevelRooms};
use crate::error::{GenerationError, OutOfSpace, RetryReason};
use crate::rng::GameRng;

/// Outcome of a failed attempt
enum AttemptError {
    Retry(RetryReason),
    Fatal(GenerationError),
}

impl From<RetryReason> for AttemptError {
    fn from(reason: RetryReason) -> Self {
        AttemptError::Retry(reason)
    }
}

impl From<GenerationError> for AttemptError {
    fn from(err: GenerationError) -> Self {
        AttemptError::Fatal(err)
    }
}

/// Rooms per key level before any shrinking
fn initial_rooms_per_lock(max_rooms: usize, max_keys: usize) -> usize {
    if max_keys == 0 {
        max_rooms
    } else {
        max_rooms / max_keys
    }
}

/// Rooms per key level after growth ran out of space
fn shrink_rooms_per_lock(rooms_per_lock: usize, max_keys: usize) -> usize {
    rooms_per_lock * max_keys / (max_keys + 1)
}

/// Lock-and-key dungeon generator
///
/// Owns its layout provider, configuration and random source. Call
/// [`generate`](Self::generate) once; the finished dungeon stays available
/// through [`dungeon`](Self::dungeon).
#[derive(Debug)]
pub struct DungeonGenerator<C: DungeonConstraints> {
    constraints: C,
    config: GeneratorConfig,
    rng: GameRng,
    rooms_per_lock: usize,
    attempts: u32,
    dungeon: Option<Dungeon>,
}

impl<C: DungeonConstraints> DungeonGenerator<C> {
    pub fn new(constraints: C, config: GeneratorConfig) -> Self {
        let rooms_per_lock =
            initial_rooms_per_lock(constraints.max_rooms(), constraints.max_keys());
        Self {
            constraints,
            config,
            rng: GameRng::new(config.seed),
            rooms_per_lock,
            attempts: 0,
            dungeon: None,
        }
    }

    pub fn constraints(&self) -> &C {
        &self.constraints
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Attempts started by the last [`generate`](Self::generate) call
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Rooms-per-lock target of the last run; shrinks when growth runs out
    /// of space
    pub fn rooms_per_lock(&self) -> usize {
        self.rooms_per_lock
    }

    /// The finished dungeon, if generation succeeded
    pub fn dungeon(&self) -> Option<&Dungeon> {
        self.dungeon.as_ref()
    }

    pub fn into_dungeon(self) -> Option<Dungeon> {
        self.dungeon
    }

    /// Run attempts until one succeeds or the retry budget is spent
    pub fn generate(&mut self) -> Result<&Dungeon, GenerationError> {
        self.dungeon = None;
        self.attempts = 0;
        self.rooms_per_lock =
            initial_rooms_per_lock(self.constraints.max_rooms(), self.constraints.max_keys());

        loop {
            self.attempts += 1;
            log::debug!(
                "generation attempt {} ({} rooms per lock)",
                self.attempts,
                self.rooms_per_lock
            );

            match self.attempt() {
                Ok(dungeon) => {
                    log::info!(
                        "seed {}: generated {} rooms with {} keys after {} attempt(s)",
                        self.rng.seed(),
                        dungeon.room_count(),
                        self.constraints.max_keys(),
                        self.attempts
                    );
                    let dungeon: &Dungeon = self.dungeon.insert(dungeon);
                    return Ok(dungeon);
                }
                Err(AttemptError::Fatal(err)) => {
                    log::warn!("generation failed: {}", err);
                    return Err(err);
                }
                Err(AttemptError::Retry(reason)) => {
                    if self.attempts > self.config.max_retries {
                        log::warn!("giving up after {} attempts: {}", self.attempts, reason);
                        return Err(GenerationError::RetriesExhausted {
                            attempts: self.attempts,
                            last: reason,
                        });
                    }
                    log::warn!("attempt {} failed, retrying: {}", self.attempts, reason);
                }
            }
        }
    }

    /// Grow a fresh tree, shrinking rooms-per-lock until it fits
    fn grow(&mut self) -> Result<(Dungeon, KeyLevelRooms), GenerationError> {
        let constraints: &dyn DungeonConstraints = &self.constraints;
        loop {
            let mut dungeon = Dungeon::new();
            let mut levels = KeyLevelRooms::new();
            init_entrance_room(&mut dungeon, &mut levels, constraints, &mut self.rng);

            match place_rooms(
                &mut dungeon,
                &mut levels,
                constraints,
                &mut self.rng,
                self.rooms_per_lock,
                self.config.boss_room_locked,
            ) {
                Ok(()) => return Ok((dungeon, levels)),
                Err(OutOfSpace { rooms }) => {
                    let shrunk =
                        shrink_rooms_per_lock(self.rooms_per_lock, constraints.max_keys());
                    log::warn!(
                        "out of space at {} rooms, rooms per lock {} -> {}",
                        rooms,
                        self.rooms_per_lock,
                        shrunk
                    );
                    self.rooms_per_lock = shrunk;
                    if shrunk == 0 {
                        return Err(GenerationError::OutOfSpace { rooms });
                    }
                }
            }
        }
    }

    fn attempt(&mut self) -> Result<Dungeon, AttemptError> {
        let (mut dungeon, mut levels) = self.grow()?;

        let constraints: &dyn DungeonConstraints = &self.constraints;
        let rng = &mut self.rng;

        place_boss_goal_rooms(
            &mut dungeon,
            &mut levels,
            constraints,
            rng,
            self.config.generate_goal,
        )?;
        place_switches(&mut dungeon, constraints, rng)?;
        compute_intensity(&mut dungeon, &levels, rng);
        place_keys(&mut dungeon, &levels, constraints, rng)?;

        let max_keys = constraints.max_keys();
        let found = levels.key_count().saturating_sub(1);
        if found != max_keys {
            return Err(RetryReason::KeyLevelMismatch {
                expected: max_keys,
                found,
            }
            .into());
        }

        graphify(&mut dungeon, constraints, rng);

        if !constraints.is_acceptable(&dungeon) {
            return Err(RetryReason::Unacceptable.into());
        }
        Ok(dungeon)
    }
}
