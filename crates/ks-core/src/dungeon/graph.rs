//! The dungeon graph
//!
//! Rooms live in an arena keyed by [`RoomId`]. Tree links and edges refer to
//! other rooms by id only.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::coords::Bounds;
use super::room::{Room, RoomId};
use super::symbol::Symbol;

/// A generated dungeon: rooms, their connections, and their locks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dungeon {
    rooms: BTreeMap<RoomId, Room>,
}

impl Dungeon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Rooms in id order
    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    pub fn room_ids(&self) -> Vec<RoomId> {
        self.rooms.keys().copied().collect()
    }

    pub fn get(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(&id)
    }

    pub fn get_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(&id)
    }

    pub fn contains(&self, id: RoomId) -> bool {
        self.rooms.contains_key(&id)
    }

    /// Add a room
    ///
    /// # Panics
    /// If a room with the same id already exists.
    pub fn add(&mut self, room: Room) {
        let id = room.id;
        let previous = self.rooms.insert(id, room);
        assert!(previous.is_none(), "room {} added twice", id);
    }

    /// Add `child` to the dungeon as a tree child of `parent`
    ///
    /// The room, the parent's child list and the connecting edge are all
    /// updated before this returns.
    pub fn add_child(&mut self, parent: RoomId, child: Room, lock: Option<Symbol>) {
        let child_id = child.id;
        self.add(child);
        self.room_mut(parent).add_child(child_id);
        self.link(parent, child_id, lock);
    }

    /// Connect two rooms in both directions, replacing any existing edge
    pub fn link(&mut self, a: RoomId, b: RoomId, lock: Option<Symbol>) {
        self.link_one_way(a, b, lock);
        self.link_one_way(b, a, lock);
    }

    /// Connect `from` to `to` only
    ///
    /// # Panics
    /// If either room is missing.
    pub fn link_one_way(&mut self, from: RoomId, to: RoomId, lock: Option<Symbol>) {
        assert!(self.contains(to), "link to missing room {}", to);
        self.room_mut(from).set_edge(to, lock);
    }

    /// True if the rooms are connected in either direction
    pub fn are_linked(&self, a: RoomId, b: RoomId) -> bool {
        self.get(a).is_some_and(|r| r.edge(b).is_some())
            || self.get(b).is_some_and(|r| r.edge(a).is_some())
    }

    pub fn find_start(&self) -> Option<&Room> {
        self.rooms().find(|r| r.is_start())
    }

    pub fn find_boss(&self) -> Option<&Room> {
        self.rooms().find(|r| r.is_boss())
    }

    pub fn find_goal(&self) -> Option<&Room> {
        self.rooms().find(|r| r.is_goal())
    }

    /// Rooms from the goal (or the boss, without a goal) back to the entrance
    pub fn solution_path(&self) -> Vec<RoomId> {
        let mut path = Vec::new();
        let mut current = self.find_goal().or_else(|| self.find_boss()).map(|r| r.id);
        while let Some(id) = current {
            path.push(id);
            current = self.get(id).and_then(Room::parent);
        }
        path
    }

    /// `root` and every room below it in the spanning tree
    pub fn subtree(&self, root: RoomId) -> Vec<RoomId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(room) = self.get(id) {
                stack.extend(room.children().iter().rev().copied());
            }
        }
        out
    }

    /// Extent of all room coordinates, `None` for an empty dungeon
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::enclosing(self.rooms().flat_map(|r| r.coords.iter().copied()))
    }

    pub(crate) fn room_mut(&mut self, id: RoomId) -> &mut Room {
        match self.rooms.get_mut(&id) {
            Some(room) => room,
            None => panic!("room {} is not in the dungeon", id),
        }
    }

    pub(crate) fn room(&self, id: RoomId) -> &Room {
        match self.rooms.get(&id) {
            Some(room) => room,
            None => panic!("room {} is not in the dungeon", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::{Condition, Coord};

    fn room(id: u32, parent: Option<u32>) -> Room {
        Room::new(
            RoomId(id),
            vec![Coord::new(id as i32, -(id as i32))],
            parent.map(RoomId),
            None,
            Condition::new(),
        )
    }

    fn small_tree() -> Dungeon {
        // 0 -> 1 -> 3
        //   -> 2
        let mut dungeon = Dungeon::new();
        let mut entrance = room(0, None);
        entrance.set_item(Some(Symbol::Start));
        dungeon.add(entrance);
        dungeon.add_child(RoomId(0), room(1, Some(0)), None);
        dungeon.add_child(RoomId(0), room(2, Some(0)), Some(Symbol::Key(0)));
        dungeon.add_child(RoomId(1), room(3, Some(1)), None);
        dungeon
    }

    #[test]
    fn test_add_child_links_both_ways() {
        let dungeon = small_tree();
        assert_eq!(dungeon.room_count(), 4);
        assert!(dungeon.are_linked(RoomId(0), RoomId(2)));
        assert_eq!(
            dungeon.get(RoomId(2)).and_then(|r| r.edge(RoomId(0))).and_then(|e| e.lock),
            Some(Symbol::Key(0))
        );
        assert_eq!(dungeon.room(RoomId(0)).children(), &[RoomId(1), RoomId(2)]);
    }

    #[test]
    #[should_panic]
    fn test_duplicate_room_panics() {
        let mut dungeon = small_tree();
        dungeon.add(room(2, Some(0)));
    }

    #[test]
    fn test_link_one_way() {
        let mut dungeon = small_tree();
        dungeon.link_one_way(RoomId(3), RoomId(2), None);
        assert!(dungeon.room(RoomId(3)).edge(RoomId(2)).is_some());
        assert!(dungeon.room(RoomId(2)).edge(RoomId(3)).is_none());
        assert!(dungeon.are_linked(RoomId(2), RoomId(3)));
    }

    #[test]
    fn test_solution_path_and_markers() {
        let mut dungeon = small_tree();
        assert!(dungeon.solution_path().is_empty());
        dungeon.room_mut(RoomId(1)).set_item(Some(Symbol::Boss));
        dungeon.room_mut(RoomId(3)).set_item(Some(Symbol::Goal));
        assert_eq!(dungeon.find_start().map(|r| r.id), Some(RoomId(0)));
        assert_eq!(dungeon.find_boss().map(|r| r.id), Some(RoomId(1)));
        assert_eq!(
            dungeon.solution_path(),
            vec![RoomId(3), RoomId(1), RoomId(0)]
        );
    }

    #[test]
    fn test_subtree() {
        let dungeon = small_tree();
        let mut sub = dungeon.subtree(RoomId(1));
        sub.sort();
        assert_eq!(sub, vec![RoomId(1), RoomId(3)]);
        assert_eq!(dungeon.subtree(RoomId(0)).len(), 4);
    }

    #[test]
    fn test_bounds() {
        let dungeon = small_tree();
        let bounds = dungeon.bounds().unwrap();
        assert_eq!((bounds.left, bounds.right), (0, 3));
        assert_eq!((bounds.top, bounds.bottom), (-3, 0));
        assert!(Dungeon::new().bounds().is_none());
    }
}
