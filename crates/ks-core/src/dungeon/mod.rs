//! Dungeon model
//!
//! Symbols, preconditions, rooms, the dungeon graph and the key-level index.

mod condition;
mod coords;
mod graph;
mod key_levels;
mod room;
mod symbol;

pub use condition::Condition;
pub use coords::{Bounds, Coord};
pub use graph::Dungeon;
pub use key_levels::KeyLevelRooms;
pub use room::{Edge, Room, RoomId};
pub use symbol::{SwitchState, Symbol};
