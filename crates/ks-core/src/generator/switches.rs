//! Switch locks
//!
//! One switch per dungeon. A branching room on the solution path has some of
//! its child doors locked by switch position, and the switch itself goes
//! somewhere reachable without passing through that room.

use std::collections::BTreeSet;

use crate::consts::{MAX_SWITCH_ATTEMPTS, SWITCH_SKIP_ONE_IN};
use crate::constraints::DungeonConstraints;
use crate::dungeon::{Dungeon, RoomId, SwitchState, Symbol};
use crate::error::RetryReason;
use crate::rng::GameRng;

/// Add `symbol` to the precondition of `root` and everything below it
fn add_precondition(dungeon: &mut Dungeon, root: RoomId, symbol: Symbol) {
    for id in dungeon.subtree(root) {
        let room = dungeon.room_mut(id);
        let precondition = room.precondition().and(symbol);
        room.set_precondition(precondition);
    }
}

/// Lock some child doors below `room` with switch states
///
/// With `Either`, the state is picked at random and alternates between
/// siblings; otherwise the given state is used throughout. Returns whether
/// any lock was placed.
fn switch_lock_child_rooms(
    dungeon: &mut Dungeon,
    rng: &mut GameRng,
    room: RoomId,
    given: SwitchState,
) -> bool {
    let mut any_locks = false;
    let mut state = match given {
        SwitchState::Either if rng.rn2(2) == 0 => SwitchState::On,
        SwitchState::Either => SwitchState::Off,
        concrete => concrete,
    };

    let current = dungeon.room(room);
    let children: Vec<RoomId> = current
        .edges()
        .map(|edge| edge.target)
        .filter(|target| current.children().contains(target))
        .collect();

    for child in children {
        let unlocked = dungeon
            .room(room)
            .edge(child)
            .is_some_and(|edge| !edge.has_lock());
        match state.to_symbol() {
            Some(lock) if unlocked && !rng.one_in(SWITCH_SKIP_ONE_IN) => {
                dungeon.link(room, child, Some(lock));
                add_precondition(dungeon, child, lock);
                any_locks = true;
            }
            _ => {
                any_locks |= switch_lock_child_rooms(dungeon, rng, child, state);
            }
        }

        if given == SwitchState::Either {
            state = state.invert();
        }
    }

    any_locks
}

/// Place the switch and the doors it controls
///
/// Does nothing when the layout allows no switches.
pub fn place_switches(
    dungeon: &mut Dungeon,
    constraints: &dyn DungeonConstraints,
    rng: &mut GameRng,
) -> Result<(), RetryReason> {
    if constraints.max_switches() == 0 {
        return Ok(());
    }

    let mut solution = dungeon.solution_path();

    for attempt in 0..MAX_SWITCH_ATTEMPTS {
        let mut rooms = dungeon.room_ids();
        rng.shuffle(&mut rooms);
        rng.shuffle(&mut solution);

        // Pick the base room from the solution path so the player has to get
        // past a switch lock to finish.
        let base = solution.iter().copied().find(|&id| {
            let room = dungeon.room(id);
            room.children().len() > 1 && room.parent().is_some()
        });
        let Some(base) = base else {
            return Err(RetryReason::NoSwitchBranch);
        };
        let base_cond = dungeon.room(base).precondition().clone();

        let below: BTreeSet<RoomId> = dungeon.subtree(base).into_iter().collect();
        let switch_room = rooms.into_iter().filter(|id| !below.contains(id)).find(|&id| {
            let room = dungeon.room(id);
            room.item().is_none()
                && base_cond.implies(room.precondition())
                && constraints.room_can_fit_item(id, Symbol::Switch)
        });
        let Some(switch_room) = switch_room else {
            log::debug!("switch attempt {}: no room for the switch", attempt);
            continue;
        };

        if switch_lock_child_rooms(dungeon, rng, base, SwitchState::Either) {
            dungeon.room_mut(switch_room).set_item(Some(Symbol::Switch));
            log::debug!("switch at {} controls doors below {}", switch_room, base);
            return Ok(());
        }
    }

    Err(RetryReason::SwitchPlacementFailed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::{Condition, Coord, Room};

    fn room(id: u32, parent: Option<u32>, precondition: Condition) -> Room {
        let coords = vec![Coord::new(id as i32, 0)];
        Room::new(RoomId(id), coords, parent.map(RoomId), None, precondition)
    }

    /// entrance 0 -> 1 -> {2, 3}, 3 -> 4 (boss) -> 5 (goal), 0 -> 6
    fn branching() -> Dungeon {
        let mut dungeon = Dungeon::new();
        let mut entrance = room(0, None, Condition::new());
        entrance.set_item(Some(Symbol::Start));
        dungeon.add(entrance);
        for (id, parent) in [(1, 0), (2, 1), (3, 1), (4, 3), (5, 4), (6, 0)] {
            dungeon.add_child(RoomId(parent), room(id, Some(parent), Condition::new()), None);
        }
        dungeon.room_mut(RoomId(4)).set_item(Some(Symbol::Boss));
        dungeon.room_mut(RoomId(5)).set_item(Some(Symbol::Goal));
        dungeon
    }

    struct NoSwitches;

    impl DungeonConstraints for NoSwitches {
        fn max_rooms(&self) -> usize {
            7
        }
        fn max_keys(&self) -> usize {
            0
        }
        fn max_switches(&self) -> usize {
            0
        }
        fn initial_rooms(&self) -> Vec<RoomId> {
            vec![RoomId(0)]
        }
        fn coords(&self, _id: RoomId) -> Vec<Coord> {
            Vec::new()
        }
        fn adjacent_rooms(&self, _id: RoomId, _key_level: usize) -> Vec<(f64, RoomId)> {
            Vec::new()
        }
        fn room_can_fit_item(&self, _id: RoomId, _item: Symbol) -> bool {
            true
        }
        fn graphify_probability(&self, _a: RoomId, _b: RoomId) -> f64 {
            0.0
        }
        fn is_acceptable(&self, _dungeon: &Dungeon) -> bool {
            true
        }
    }

    struct OneSwitch;

    impl DungeonConstraints for OneSwitch {
        fn max_rooms(&self) -> usize {
            7
        }
        fn max_keys(&self) -> usize {
            0
        }
        fn max_switches(&self) -> usize {
            1
        }
        fn initial_rooms(&self) -> Vec<RoomId> {
            vec![RoomId(0)]
        }
        fn coords(&self, _id: RoomId) -> Vec<Coord> {
            Vec::new()
        }
        fn adjacent_rooms(&self, _id: RoomId, _key_level: usize) -> Vec<(f64, RoomId)> {
            Vec::new()
        }
        fn room_can_fit_item(&self, _id: RoomId, _item: Symbol) -> bool {
            true
        }
        fn graphify_probability(&self, _a: RoomId, _b: RoomId) -> f64 {
            0.0
        }
        fn is_acceptable(&self, _dungeon: &Dungeon) -> bool {
            true
        }
    }

    #[test]
    fn test_disabled_is_noop() {
        let mut dungeon = branching();
        let before = dungeon.clone();
        let mut rng = GameRng::new(1);
        place_switches(&mut dungeon, &NoSwitches, &mut rng).unwrap();
        assert_eq!(dungeon, before);
    }

    #[test]
    fn test_switch_locks_below_branch() {
        for seed in 0..20 {
            let mut dungeon = branching();
            let mut rng = GameRng::new(seed);
            place_switches(&mut dungeon, &OneSwitch, &mut rng).unwrap();

            let switches: Vec<&Room> = dungeon.rooms().filter(|r| r.is_switch()).collect();
            assert_eq!(switches.len(), 1);
            // only 6 sits outside the branch room's subtree with no item
            assert_eq!(switches[0].id, RoomId(6));

            let locked: Vec<RoomId> = dungeon
                .rooms()
                .filter(|r| {
                    r.parent()
                        .and_then(|p| r.edge(p))
                        .is_some_and(|e| e.lock.is_some_and(Symbol::is_switch_state))
                })
                .map(|r| r.id)
                .collect();
            assert!(!locked.is_empty());
            for id in locked {
                for below in dungeon.subtree(id) {
                    let state = dungeon.room(below).precondition().switch_state();
                    assert_ne!(state, SwitchState::Either);
                }
            }
        }
    }

    #[test]
    fn test_no_branch_on_path_is_retry() {
        // entrance 0 -> 1 (boss) -> 2 (goal): nothing branches
        let mut dungeon = Dungeon::new();
        let mut entrance = room(0, None, Condition::new());
        entrance.set_item(Some(Symbol::Start));
        dungeon.add(entrance);
        dungeon.add_child(RoomId(0), room(1, Some(0), Condition::new()), None);
        dungeon.add_child(RoomId(1), room(2, Some(1), Condition::new()), None);
        dungeon.room_mut(RoomId(1)).set_item(Some(Symbol::Boss));
        dungeon.room_mut(RoomId(2)).set_item(Some(Symbol::Goal));

        let mut rng = GameRng::new(3);
        assert_eq!(
            place_switches(&mut dungeon, &OneSwitch, &mut rng),
            Err(RetryReason::NoSwitchBranch)
        );
    }
}
