//! Rectangular grid layout
//!
//! Every cell of a `width x height` grid is a one-cell room slot, adjacent
//! to its four orthogonal neighbours. Slot ids are `y * width + x`.

use serde::{Deserialize, Serialize};

use super::DungeonConstraints;
use crate::consts::DEFAULT_GRAPHIFY_PROBABILITY;
use crate::dungeon::{Coord, Dungeon, RoomId, Symbol};
use crate::error::ConfigError;

/// Offsets of orthogonal neighbours: north, east, south, west
const DIRECTIONS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// Grid layout with room, key and switch budgets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConstraints {
    width: u32,
    height: u32,
    entrance: Coord,
    max_rooms: usize,
    max_keys: usize,
    max_switches: usize,
    graphify_probability: f64,
}

impl GridConstraints {
    /// Grid with the entrance in the middle of the bottom row
    pub fn new(
        width: u32,
        height: u32,
        max_rooms: usize,
        max_keys: usize,
        max_switches: usize,
    ) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyGrid { width, height });
        }
        if max_rooms == 0 {
            return Err(ConfigError::NoRooms);
        }
        let slots = width as usize * height as usize;
        if max_rooms > slots {
            return Err(ConfigError::TooManyRooms {
                rooms: max_rooms,
                slots,
            });
        }
        Ok(Self {
            width,
            height,
            entrance: Coord::new((width / 2) as i32, height as i32 - 1),
            max_rooms,
            max_keys,
            max_switches,
            graphify_probability: DEFAULT_GRAPHIFY_PROBABILITY,
        })
    }

    /// Move the entrance
    pub fn with_entrance(mut self, entrance: Coord) -> Result<Self, ConfigError> {
        if !self.in_bounds(entrance) {
            return Err(ConfigError::EntranceOutOfBounds {
                x: entrance.x,
                y: entrance.y,
                width: self.width,
                height: self.height,
            });
        }
        self.entrance = entrance;
        Ok(self)
    }

    /// Change the shortcut probability used by graphify
    pub fn with_graphify_probability(mut self, probability: f64) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(ConfigError::InvalidProbability(probability));
        }
        self.graphify_probability = probability;
        Ok(self)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn entrance(&self) -> Coord {
        self.entrance
    }

    fn in_bounds(&self, c: Coord) -> bool {
        c.x >= 0 && c.y >= 0 && (c.x as u32) < self.width && (c.y as u32) < self.height
    }

    /// Slot id at a coordinate
    pub fn id_at(&self, c: Coord) -> Option<RoomId> {
        self.in_bounds(c).then(|| RoomId(c.y as u32 * self.width + c.x as u32))
    }

    /// Coordinate of a slot id
    pub fn coord_of(&self, id: RoomId) -> Option<Coord> {
        let c = Coord::new((id.0 % self.width) as i32, (id.0 / self.width) as i32);
        self.in_bounds(c).then_some(c)
    }
}

impl DungeonConstraints for GridConstraints {
    fn max_rooms(&self) -> usize {
        self.max_rooms
    }

    fn max_keys(&self) -> usize {
        self.max_keys
    }

    fn max_switches(&self) -> usize {
        self.max_switches
    }

    fn initial_rooms(&self) -> Vec<RoomId> {
        self.id_at(self.entrance).into_iter().collect()
    }

    fn coords(&self, id: RoomId) -> Vec<Coord> {
        self.coord_of(id).into_iter().collect()
    }

    fn adjacent_rooms(&self, id: RoomId, _key_level: usize) -> Vec<(f64, RoomId)> {
        let Some(c) = self.coord_of(id) else {
            return Vec::new();
        };
        DIRECTIONS
            .iter()
            .filter_map(|&(dx, dy)| self.id_at(c.offset(dx, dy)))
            .map(|next| (1.0, next))
            .collect()
    }

    fn room_can_fit_item(&self, _id: RoomId, _item: Symbol) -> bool {
        true
    }

    fn graphify_probability(&self, _a: RoomId, _b: RoomId) -> f64 {
        self.graphify_probability
    }

    fn is_acceptable(&self, _dungeon: &Dungeon) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation() {
        assert_eq!(
            GridConstraints::new(0, 4, 1, 0, 0),
            Err(ConfigError::EmptyGrid { width: 0, height: 4 })
        );
        assert_eq!(
            GridConstraints::new(2, 2, 5, 0, 0),
            Err(ConfigError::TooManyRooms { rooms: 5, slots: 4 })
        );
        assert_eq!(GridConstraints::new(2, 2, 0, 0, 0), Err(ConfigError::NoRooms));

        let grid = GridConstraints::new(3, 3, 4, 1, 0).unwrap();
        assert!(grid.clone().with_entrance(Coord::new(3, 0)).is_err());
        assert!(grid.clone().with_graphify_probability(1.5).is_err());
        assert!(grid.with_graphify_probability(0.5).is_ok());
    }

    #[test]
    fn test_ids_round_trip() {
        let grid = GridConstraints::new(4, 3, 6, 1, 0).unwrap();
        for y in 0..3 {
            for x in 0..4 {
                let c = Coord::new(x, y);
                let id = grid.id_at(c).unwrap();
                assert_eq!(grid.coord_of(id), Some(c));
            }
        }
        assert_eq!(grid.id_at(Coord::new(-1, 0)), None);
        assert_eq!(grid.coord_of(RoomId(12)), None);
    }

    #[test]
    fn test_adjacency() {
        let grid = GridConstraints::new(3, 3, 9, 1, 0).unwrap();
        let corner = grid.id_at(Coord::new(0, 0)).unwrap();
        let middle = grid.id_at(Coord::new(1, 1)).unwrap();
        assert_eq!(grid.adjacent_rooms(corner, 0).len(), 2);
        let around: Vec<RoomId> = grid
            .adjacent_rooms(middle, 0)
            .into_iter()
            .map(|(_, id)| id)
            .collect();
        assert_eq!(around, vec![RoomId(1), RoomId(5), RoomId(7), RoomId(3)]);
    }

    #[test]
    fn test_default_entrance() {
        let grid = GridConstraints::new(5, 4, 10, 2, 0).unwrap();
        assert_eq!(grid.entrance(), Coord::new(2, 3));
        assert_eq!(grid.initial_rooms(), vec![RoomId(17)]);
        assert_eq!(grid.coords(RoomId(17)), vec![Coord::new(2, 3)]);
    }
}
