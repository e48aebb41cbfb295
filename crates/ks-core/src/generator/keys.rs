//! Key placement

use crate::constraints::DungeonConstraints;
use crate::dungeon::{Dungeon, KeyLevelRooms, RoomId, Symbol};
use crate::error::RetryReason;
use crate::rng::GameRng;

/// Put the key for each level in that level's most intense free room
///
/// The last level holds no key: its rooms are reached with the final one.
/// Ties in intensity are broken randomly.
pub fn place_keys(
    dungeon: &mut Dungeon,
    levels: &KeyLevelRooms,
    constraints: &dyn DungeonConstraints,
    rng: &mut GameRng,
) -> Result<(), RetryReason> {
    for level in 0..levels.key_count().saturating_sub(1) {
        let key = Symbol::Key(level as u32);

        let mut rooms: Vec<RoomId> = levels.rooms(level).to_vec();
        rng.shuffle(&mut rooms);
        rooms.sort_by(|&a, &b| {
            dungeon
                .room(b)
                .intensity()
                .total_cmp(&dungeon.room(a).intensity())
        });

        let chosen = rooms.into_iter().find(|&id| {
            dungeon.room(id).item().is_none() && constraints.room_can_fit_item(id, key)
        });
        let Some(chosen) = chosen else {
            return Err(RetryReason::NoKeyRoom { level });
        };

        dungeon.room_mut(chosen).set_item(Some(key));
        log::debug!("key {} placed in {}", key, chosen);
    }
    Ok(())
}
