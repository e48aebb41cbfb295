//! Entrance seeding

use crate::constraints::DungeonConstraints;
use crate::dungeon::{Condition, Dungeon, KeyLevelRooms, Room, Symbol};
use crate::rng::GameRng;

/// Create the entrance room at one of the layout's initial slots
///
/// # Panics
/// If the layout offers no initial slots.
pub fn init_entrance_room(
    dungeon: &mut Dungeon,
    levels: &mut KeyLevelRooms,
    constraints: &dyn DungeonConstraints,
    rng: &mut GameRng,
) {
    let candidates = constraints.initial_rooms();
    let Some(&id) = rng.choose(&candidates) else {
        panic!("layout offered no entrance rooms");
    };

    let entrance = Room::new(
        id,
        constraints.coords(id),
        None,
        Some(Symbol::Start),
        Condition::new(),
    );
    dungeon.add(entrance);
    levels.add_room(0, id);
    log::debug!("entrance placed at {}", id);
}
