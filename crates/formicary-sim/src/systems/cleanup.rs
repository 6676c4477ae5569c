//! Cleanup system: despawns insects destroyed during the turn.

use hecs::{Entity, World};

use formicary_core::components::{Armor, Located};

/// Despawn every insect with no armor left that is no longer on the board.
/// Uses a caller-owned buffer so turns do not allocate.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, (armor, located)) in world.query_mut::<(&Armor, &Located)>() {
        if armor.value <= 0.0 && located.place.is_none() {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
