//! Room intensity
//!
//! Intensity rises with depth inside a key level and partly resets when a
//! new level starts, giving a sawtooth over the dungeon. Keys are later
//! placed in the most intense rooms of each level.

use crate::consts::{INTENSITY_CEILING, INTENSITY_EASE_OFF, INTENSITY_GROWTH_JITTER};
use crate::dungeon::{Dungeon, KeyLevelRooms, RoomId};
use crate::rng::GameRng;

/// Set intensities for `room` and its same-tier descendants; returns the
/// highest value assigned
fn apply_intensity(
    dungeon: &mut Dungeon,
    rng: &mut GameRng,
    room: RoomId,
    intensity: f64,
) -> f64 {
    let jitter = 1.0 - INTENSITY_GROWTH_JITTER / 2.0 + INTENSITY_GROWTH_JITTER * rng.next_f64();
    let intensity = intensity * jitter;
    dungeon.room_mut(room).set_intensity(intensity);

    let current = dungeon.room(room);
    let same_tier: Vec<RoomId> = current
        .children()
        .iter()
        .copied()
        .filter(|&child| current.precondition().implies(dungeon.room(child).precondition()))
        .collect();

    let mut max_intensity = intensity;
    for child in same_tier {
        max_intensity = max_intensity.max(apply_intensity(dungeon, rng, child, intensity + 1.0));
    }
    max_intensity
}

/// Rescale so the most intense room sits just below 1.0
fn normalize_intensity(dungeon: &mut Dungeon) {
    let max_intensity = dungeon.rooms().map(|r| r.intensity()).fold(0.0, f64::max);
    if max_intensity <= 0.0 {
        return;
    }
    for id in dungeon.room_ids() {
        let room = dungeon.room_mut(id);
        room.set_intensity(room.intensity() * INTENSITY_CEILING / max_intensity);
    }
}

/// Compute every room's intensity; boss ends at 1.0 and goal at 0.0
pub fn compute_intensity(dungeon: &mut Dungeon, levels: &KeyLevelRooms, rng: &mut GameRng) {
    let mut next_level_base = 0.0;
    for level in 0..levels.key_count() {
        let intensity = next_level_base * (1.0 - INTENSITY_EASE_OFF);

        for &id in levels.rooms(level) {
            let room = dungeon.room(id);
            // Start from rooms entered through a lock; same-tier rooms below
            // them are reached by the recursion.
            let tier_root = match room.parent() {
                None => true,
                Some(parent) => !dungeon
                    .room(parent)
                    .precondition()
                    .implies(room.precondition()),
            };
            if tier_root {
                let highest = apply_intensity(dungeon, rng, id, intensity);
                next_level_base = f64::max(next_level_base, highest);
            }
        }
    }

    normalize_intensity(dungeon);

    if let Some(boss) = dungeon.find_boss().map(|r| r.id) {
        dungeon.room_mut(boss).set_intensity(1.0);
    }
    if let Some(goal) = dungeon.find_goal().map(|r| r.id) {
        dungeon.room_mut(goal).set_intensity(0.0);
    }
}
