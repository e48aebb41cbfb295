//! Tree growth
//!
//! Grows a spanning tree out from the entrance one room at a time. Every
//! `rooms_per_lock` rooms a new key level opens: the next room is attached
//! through a door locked with a fresh key, and every room created after that
//! requires the key.

use crate::consts::STAY_ON_LEVEL_IN_10;
use crate::constraints::DungeonConstraints;
use crate::dungeon::{Condition, Dungeon, KeyLevelRooms, Room, RoomId, Symbol};
use crate::error::OutOfSpace;
use crate::rng::GameRng;

/// Keys available to locks placed during growth
pub fn usable_keys(max_keys: usize, boss_room_locked: bool) -> usize {
    if boss_room_locked {
        max_keys.saturating_sub(1)
    } else {
        max_keys
    }
}

fn should_add_new_lock(
    key_level: usize,
    rooms_at_level: usize,
    rooms_per_lock: usize,
    usable_keys: usize,
) -> bool {
    rooms_at_level >= rooms_per_lock && key_level < usable_keys
}

fn has_free_edge(
    dungeon: &Dungeon,
    constraints: &dyn DungeonConstraints,
    id: RoomId,
    key_level: usize,
) -> bool {
    constraints
        .adjacent_rooms(id, key_level)
        .iter()
        .any(|&(_, next)| !dungeon.contains(next))
}

/// A random room from `candidates` with at least one unused neighbour slot
fn choose_room_with_free_edge(
    dungeon: &Dungeon,
    constraints: &dyn DungeonConstraints,
    rng: &mut GameRng,
    candidates: &[RoomId],
    key_level: usize,
) -> Option<RoomId> {
    let mut rooms = candidates.to_vec();
    rng.shuffle(&mut rooms);
    rooms
        .into_iter()
        .find(|&id| has_free_edge(dungeon, constraints, id, key_level))
}

/// A random unused neighbour slot of `room`
///
/// # Panics
/// If `room` has no unused neighbour; callers pick rooms that do.
fn choose_free_edge(
    dungeon: &Dungeon,
    constraints: &dyn DungeonConstraints,
    rng: &mut GameRng,
    room: RoomId,
    key_level: usize,
) -> RoomId {
    let free: Vec<RoomId> = constraints
        .adjacent_rooms(room, key_level)
        .into_iter()
        .map(|(_, next)| next)
        .filter(|&next| !dungeon.contains(next))
        .collect();
    match rng.choose(&free) {
        Some(&next) => next,
        None => panic!("room {} has no free edge", room),
    }
}

/// Fill the dungeon up to `max_rooms` rooms
///
/// Returns [`OutOfSpace`] when no existing room has a free neighbour left.
pub fn place_rooms(
    dungeon: &mut Dungeon,
    levels: &mut KeyLevelRooms,
    constraints: &dyn DungeonConstraints,
    rng: &mut GameRng,
    rooms_per_lock: usize,
    boss_room_locked: bool,
) -> Result<(), OutOfSpace> {
    let usable = usable_keys(constraints.max_keys(), boss_room_locked);
    // Number of keys needed to reach the room being placed
    let mut key_level = 0;
    let mut latest_key: Option<Symbol> = None;
    // Keys the player must hold to reach the room being placed
    let mut cond = Condition::new();

    while dungeon.room_count() < constraints.max_rooms() {
        let mut do_lock = false;

        if should_add_new_lock(key_level, levels.rooms(key_level).len(), rooms_per_lock, usable) {
            let key = Symbol::Key(key_level as u32);
            key_level += 1;
            latest_key = Some(key);
            cond = cond.and(key);
            do_lock = true;
            log::debug!("opened key level {} behind key {}", key_level, key);
        }

        let mut parent = None;
        if !do_lock && rng.rn2(10) < STAY_ON_LEVEL_IN_10 {
            parent = choose_room_with_free_edge(
                dungeon,
                constraints,
                rng,
                levels.rooms(key_level),
                key_level,
            );
        }
        if parent.is_none() {
            let all = dungeon.room_ids();
            parent = choose_room_with_free_edge(dungeon, constraints, rng, &all, key_level);
            do_lock = true;
        }
        let Some(parent) = parent else {
            return Err(OutOfSpace {
                rooms: dungeon.room_count(),
            });
        };

        let next = choose_free_edge(dungeon, constraints, rng, parent, key_level);
        let room = Room::new(next, constraints.coords(next), Some(parent), None, cond.clone());
        let lock = if do_lock { latest_key } else { None };
        dungeon.add_child(parent, room, lock);
        levels.add_room(key_level, next);
    }

    Ok(())
}
