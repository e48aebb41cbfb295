//! Rooms and the edges between them

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::condition::Condition;
use super::coords::Coord;
use super::symbol::Symbol;

/// Room slot identifier, assigned by the layout provider
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct RoomId(pub u32);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Connection from one room to a neighbour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Room on the other side
    pub target: RoomId,
    /// Symbol needed to pass; `None` means always open
    pub lock: Option<Symbol>,
}

impl Edge {
    pub fn new(target: RoomId, lock: Option<Symbol>) -> Self {
        Self { target, lock }
    }

    pub fn has_lock(&self) -> bool {
        self.lock.is_some()
    }
}

/// A room in the dungeon graph
///
/// Parent and children record the spanning tree built during generation;
/// `edges` holds every connection, tree edges and shortcuts alike. All
/// references to other rooms are by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub coords: Vec<Coord>,
    parent: Option<RoomId>,
    children: Vec<RoomId>,
    precondition: Condition,
    item: Option<Symbol>,
    intensity: f64,
    edges: BTreeMap<RoomId, Edge>,
}

impl Room {
    pub fn new(
        id: RoomId,
        coords: Vec<Coord>,
        parent: Option<RoomId>,
        item: Option<Symbol>,
        precondition: Condition,
    ) -> Self {
        Self {
            id,
            coords,
            parent,
            children: Vec::new(),
            precondition,
            item,
            intensity: 0.0,
            edges: BTreeMap::new(),
        }
    }

    pub fn parent(&self) -> Option<RoomId> {
        self.parent
    }

    pub fn children(&self) -> &[RoomId] {
        &self.children
    }

    pub fn add_child(&mut self, child: RoomId) {
        if !self.children.contains(&child) {
            self.children.push(child);
        }
    }

    pub fn precondition(&self) -> &Condition {
        &self.precondition
    }

    pub fn set_precondition(&mut self, precondition: Condition) {
        self.precondition = precondition;
    }

    pub fn item(&self) -> Option<Symbol> {
        self.item
    }

    pub fn set_item(&mut self, item: Option<Symbol>) {
        self.item = item;
    }

    pub fn intensity(&self) -> f64 {
        self.intensity
    }

    pub fn set_intensity(&mut self, intensity: f64) {
        self.intensity = intensity;
    }

    pub fn is_start(&self) -> bool {
        self.item.is_some_and(Symbol::is_start)
    }

    pub fn is_goal(&self) -> bool {
        self.item.is_some_and(Symbol::is_goal)
    }

    pub fn is_boss(&self) -> bool {
        self.item.is_some_and(Symbol::is_boss)
    }

    pub fn is_switch(&self) -> bool {
        self.item.is_some_and(Symbol::is_switch)
    }

    /// Edges in neighbour-id order
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    pub fn edge(&self, target: RoomId) -> Option<&Edge> {
        self.edges.get(&target)
    }

    pub fn link_count(&self) -> usize {
        self.edges.len()
    }

    /// Create or replace the edge towards `target`
    pub(crate) fn set_edge(&mut self, target: RoomId, lock: Option<Symbol>) {
        self.edges.insert(target, Edge::new(target, lock));
    }

    /// Mean position of the room's coordinates
    pub fn center(&self) -> (f64, f64) {
        if self.coords.is_empty() {
            return (0.0, 0.0);
        }
        let n = self.coords.len() as f64;
        let sx: f64 = self.coords.iter().map(|c| c.x as f64).sum();
        let sy: f64 = self.coords.iter().map(|c| c.y as f64).sum();
        (sx / n, sy / n)
    }
}
