//! Layout constraints
//!
//! The generator never decides where rooms can physically go. It asks a
//! [`DungeonConstraints`] implementation which slots exist, which are
//! adjacent, what fits where, and whether the finished dungeon is usable.

mod grid;

pub use grid::GridConstraints;

use crate::dungeon::{Coord, Dungeon, RoomId, Symbol};

/// Layout provider consulted by the generator
pub trait DungeonConstraints {
    /// Number of rooms to grow
    fn max_rooms(&self) -> usize;

    /// Number of distinct keys to place
    fn max_keys(&self) -> usize;

    /// Number of switches allowed (0 disables switch locks)
    fn max_switches(&self) -> usize;

    /// Slots the entrance may be placed in; must not be empty
    fn initial_rooms(&self) -> Vec<RoomId>;

    /// Spatial coordinates covered by a room slot
    fn coords(&self, id: RoomId) -> Vec<Coord>;

    /// Slots adjacent to `id` that may be used at or below `key_level`,
    /// paired with an advisory weight
    fn adjacent_rooms(&self, id: RoomId, key_level: usize) -> Vec<(f64, RoomId)>;

    /// Whether `item` may be placed in room `id`
    fn room_can_fit_item(&self, id: RoomId, item: Symbol) -> bool;

    /// Probability in [0, 1] of adding a shortcut between two rooms
    fn graphify_probability(&self, a: RoomId, b: RoomId) -> f64;

    /// Final check over the finished dungeon
    fn is_acceptable(&self, dungeon: &Dungeon) -> bool;
}

impl<T: DungeonConstraints + ?Sized> DungeonConstraints for &T {
    fn max_rooms(&self) -> usize {
        (**self).max_rooms()
    }

    fn max_keys(&self) -> usize {
        (**self).max_keys()
    }

    fn max_switches(&self) -> usize {
        (**self).max_switches()
    }

    fn initial_rooms(&self) -> Vec<RoomId> {
        (**self).initial_rooms()
    }

    fn coords(&self, id: RoomId) -> Vec<Coord> {
        (**self).coords(id)
    }

    fn adjacent_rooms(&self, id: RoomId, key_level: usize) -> Vec<(f64, RoomId)> {
        (**self).adjacent_rooms(id, key_level)
    }

    fn room_can_fit_item(&self, id: RoomId, item: Symbol) -> bool {
        (**self).room_can_fit_item(id, item)
    }

    fn graphify_probability(&self, a: RoomId, b: RoomId) -> f64 {
        (**self).graphify_probability(a, b)
    }

    fn is_acceptable(&self, dungeon: &Dungeon) -> bool {
        (**self).is_acceptable(dungeon)
    }
}
