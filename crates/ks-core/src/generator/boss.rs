//! Boss and goal placement
//!
//! The boss goes in a dead end (or, with a goal room, in the room just before
//! a dead end) and is then moved behind the final key.

use crate::constraints::DungeonConstraints;
use crate::dungeon::{Dungeon, KeyLevelRooms, RoomId, Symbol};
use crate::error::RetryReason;
use crate::rng::GameRng;

/// Leaf rooms that can hold the goal (or the boss, without a goal), paired
/// with their parent
fn boss_goal_candidates(
    dungeon: &Dungeon,
    constraints: &dyn DungeonConstraints,
    generate_goal: bool,
) -> Vec<(RoomId, RoomId)> {
    let mut candidates = Vec::new();
    for room in dungeon.rooms() {
        if !room.children().is_empty() || room.item().is_some() {
            continue;
        }
        let Some(parent) = room.parent().and_then(|id| dungeon.get(id)) else {
            continue;
        };
        if generate_goal {
            // The boss must be the only way into the goal, and both must be
            // on the same tier so nothing lets the player skip the boss.
            if parent.children().len() != 1
                || parent.item().is_some()
                || !parent.precondition().implies(room.precondition())
            {
                continue;
            }
            if !constraints.room_can_fit_item(room.id, Symbol::Goal)
                || !constraints.room_can_fit_item(parent.id, Symbol::Boss)
            {
                continue;
            }
        } else if !constraints.room_can_fit_item(room.id, Symbol::Boss) {
            continue;
        }
        candidates.push((room.id, parent.id));
    }
    candidates
}

/// Mark the boss (and goal) rooms and promote them to the final key level
pub fn place_boss_goal_rooms(
    dungeon: &mut Dungeon,
    levels: &mut KeyLevelRooms,
    constraints: &dyn DungeonConstraints,
    rng: &mut GameRng,
    generate_goal: bool,
) -> Result<(), RetryReason> {
    let candidates = boss_goal_candidates(dungeon, constraints, generate_goal);
    let Some(&(leaf, parent)) = rng.choose(&candidates) else {
        return Err(RetryReason::NoBossCandidate);
    };

    let (boss, goal) = if generate_goal {
        (parent, Some(leaf))
    } else {
        (leaf, None)
    };

    if let Some(goal) = goal {
        dungeon.room_mut(goal).set_item(Some(Symbol::Goal));
    }
    dungeon.room_mut(boss).set_item(Some(Symbol::Boss));

    let old_level = dungeon.room(boss).precondition().key_level();
    let new_level = levels.key_count().min(constraints.max_keys());
    log::debug!(
        "boss at {} (goal {:?}), key level {} -> {}",
        boss,
        goal,
        old_level,
        new_level
    );
    if old_level == new_level {
        return Ok(());
    }

    let moved: Vec<RoomId> = goal.into_iter().chain(Some(boss)).collect();
    for &id in &moved {
        let level = dungeon.room(id).precondition().key_level();
        levels.remove_room(level, id);
        levels.add_room(new_level, id);
    }

    // Add every key the boss skipped, not just the last one, so its key
    // level matches the level it was moved to
    let mut precondition = dungeon.room(boss).precondition().clone();
    for key in old_level..new_level {
        precondition = precondition.and(Symbol::Key(key as u32));
    }
    let boss_key = new_level.checked_sub(1).map(|k| Symbol::Key(k as u32));

    dungeon.room_mut(boss).set_precondition(precondition.clone());
    if let Some(boss_parent) = dungeon.room(boss).parent() {
        dungeon.link(boss_parent, boss, boss_key);
    }
    if let Some(goal) = goal {
        dungeon.room_mut(goal).set_precondition(precondition);
        dungeon.link(boss, goal, None);
    }

    Ok(())
}
