//! Key-level index
//!
//! Maps each key level to the rooms created while that many keys were
//! required. Rebuilt for every generation attempt.

use super::room::RoomId;

/// Rooms grouped by key level, levels dense from 0
#[derive(Debug, Clone, Default)]
pub struct KeyLevelRooms {
    levels: Vec<Vec<RoomId>>,
}

impl KeyLevelRooms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of levels, including empty ones below the highest used level
    pub fn key_count(&self) -> usize {
        self.levels.len()
    }

    /// Rooms at `level` in insertion order (empty if the level is unused)
    pub fn rooms(&self, level: usize) -> &[RoomId] {
        self.levels.get(level).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn add_room(&mut self, level: usize, room: RoomId) {
        if self.levels.len() <= level {
            self.levels.resize_with(level + 1, Vec::new);
        }
        self.levels[level].push(room);
    }

    /// Remove `room` from `level`; returns whether it was there
    pub fn remove_room(&mut self, level: usize, room: RoomId) -> bool {
        let Some(rooms) = self.levels.get_mut(level) else {
            return false;
        };
        match rooms.iter().position(|&r| r == room) {
            Some(pos) => {
                rooms.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Level of `room`, if registered
    pub fn level_of(&self, room: RoomId) -> Option<usize> {
        self.levels.iter().position(|rooms| rooms.contains(&room))
    }
}
