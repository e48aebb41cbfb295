//! Graphify: add shortcut edges between neighbouring rooms
//!
//! The spanning tree becomes a graph. A shortcut never lets the player skip
//! a lock: it is either left open between rooms on the same tier or locked
//! with the one symbol separating the two preconditions.

use crate::constraints::DungeonConstraints;
use crate::dungeon::{Dungeon, Room, RoomId, Symbol};
use crate::rng::GameRng;

/// What to do with one candidate neighbour pair
enum Shortcut {
    Open,
    Locked(Symbol),
    Skip,
}

fn choose_shortcut(room: &Room, next: &Room, probability: f64, rng: &mut GameRng) -> Shortcut {
    let (a, b) = (room.precondition(), next.precondition());
    if a.implies(b) && b.implies(a) {
        if rng.chance(probability) {
            return Shortcut::Open;
        }
    } else if let Some(symbol) = a.single_symbol_difference(b) {
        // switch doors are always added
        if symbol.is_switch_state() || rng.chance(probability) {
            return Shortcut::Locked(symbol);
        }
    }
    Shortcut::Skip
}

/// Add extra edges between adjacent rooms
pub fn graphify(dungeon: &mut Dungeon, constraints: &dyn DungeonConstraints, rng: &mut GameRng) {
    let mut added = 0usize;
    for id in dungeon.room_ids() {
        let room = dungeon.room(id);
        if room.is_boss() || room.is_goal() {
            continue;
        }

        for (_, next_id) in constraints.adjacent_rooms(id, usize::MAX) {
            if dungeon.are_linked(id, next_id) {
                continue;
            }
            let Some(next) = dungeon.get(next_id) else {
                continue;
            };
            if next.is_boss() || next.is_goal() {
                continue;
            }

            let probability = constraints.graphify_probability(id, next_id);
            match choose_shortcut(dungeon.room(id), next, probability, rng) {
                Shortcut::Open => dungeon.link(id, next_id, None),
                Shortcut::Locked(symbol) => dungeon.link(id, next_id, Some(symbol)),
                Shortcut::Skip => continue,
            }
            added += 1;
        }
    }
    log::debug!("graphify added {} shortcuts", added);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::GridConstraints;
    use crate::dungeon::Condition;

    /// 2x2 grid filled by a U-shaped tree: 2 - 0 - 1 - 3 (ids by grid slot)
    ///
    /// ```text
    /// 0 1
    /// 2 3
    /// ```
    fn u_shape(grid: &GridConstraints, third: Condition) -> Dungeon {
        let mut dungeon = Dungeon::new();
        let slot = |id: u32| grid.coords(RoomId(id));
        let room = |id: u32, parent: Option<u32>, cond: Condition| {
            Room::new(RoomId(id), slot(id), parent.map(RoomId), None, cond)
        };
        let mut entrance = room(2, None, Condition::new());
        entrance.set_item(Some(Symbol::Start));
        dungeon.add(entrance);
        dungeon.add_child(RoomId(2), room(0, Some(2), Condition::new()), None);
        dungeon.add_child(RoomId(0), room(1, Some(0), Condition::new()), None);
        let lock = third.symbols().next();
        dungeon.add_child(RoomId(1), room(3, Some(1), third), lock);
        dungeon
    }

    #[test]
    fn test_same_tier_shortcut_with_certain_probability() {
        let grid = GridConstraints::new(2, 2, 4, 0, 0)
            .unwrap()
            .with_graphify_probability(1.0)
            .unwrap();
        let mut dungeon = u_shape(&grid, Condition::new());
        let mut rng = GameRng::new(1);
        graphify(&mut dungeon, &grid, &mut rng);
        let edge = dungeon.get(RoomId(2)).unwrap().edge(RoomId(3)).unwrap();
        assert_eq!(edge.lock, None);
        assert!(dungeon.are_linked(RoomId(3), RoomId(2)));
    }

    #[test]
    fn test_zero_probability_adds_nothing() {
        let grid = GridConstraints::new(2, 2, 4, 1, 0)
            .unwrap()
            .with_graphify_probability(0.0)
            .unwrap();
        let mut dungeon = u_shape(&grid, Condition::with(Symbol::Key(0)));
        let before = dungeon.clone();
        let mut rng = GameRng::new(1);
        graphify(&mut dungeon, &grid, &mut rng);
        assert_eq!(dungeon, before);
    }

    #[test]
    fn test_switch_difference_always_linked() {
        let grid = GridConstraints::new(2, 2, 4, 0, 1)
            .unwrap()
            .with_graphify_probability(0.0)
            .unwrap();
        let mut dungeon = u_shape(&grid, Condition::with(Symbol::SwitchOn));
        let mut rng = GameRng::new(1);
        graphify(&mut dungeon, &grid, &mut rng);
        let edge = dungeon.get(RoomId(2)).unwrap().edge(RoomId(3)).unwrap();
        assert_eq!(edge.lock, Some(Symbol::SwitchOn));
    }

    #[test]
    fn test_key_difference_locked_with_that_key() {
        let grid = GridConstraints::new(2, 2, 4, 1, 0)
            .unwrap()
            .with_graphify_probability(1.0)
            .unwrap();
        let mut dungeon = u_shape(&grid, Condition::with(Symbol::Key(0)));
        let mut rng = GameRng::new(1);
        graphify(&mut dungeon, &grid, &mut rng);
        let edge = dungeon.get(RoomId(3)).unwrap().edge(RoomId(2)).unwrap();
        assert_eq!(edge.lock, Some(Symbol::Key(0)));
    }

    #[test]
    fn test_boss_and_goal_stay_untouched() {
        let grid = GridConstraints::new(2, 2, 4, 0, 0)
            .unwrap()
            .with_graphify_probability(1.0)
            .unwrap();
        let mut dungeon = u_shape(&grid, Condition::new());
        dungeon.get_mut(RoomId(3)).unwrap().set_item(Some(Symbol::Boss));
        let mut rng = GameRng::new(1);
        graphify(&mut dungeon, &grid, &mut rng);
        assert_eq!(dungeon.get(RoomId(3)).unwrap().link_count(), 1);
        assert!(!dungeon.are_linked(RoomId(2), RoomId(3)));
    }
}
