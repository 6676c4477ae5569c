//! Entity spawn factories.
//!
//! Insects are spawned detached (no place); only the occupancy system
//! puts them on the board.

use hecs::{Entity, EntityBuilder, World};

use formicary_behavior::profiles::{ant_profile, bee_profile, AntBehavior};
use formicary_core::components::*;
use formicary_core::enums::{AntKind, BeeKind};

use crate::components::Container;

/// Spawn an ant of `kind` with the given armor.
///
/// `impostor` only matters for queens.
pub fn spawn_ant(world: &mut World, kind: AntKind, armor: f64, impostor: bool) -> Entity {
    let profile = ant_profile(kind);

    let mut builder = EntityBuilder::new();
    builder.add_bundle((
        Ant { kind },
        Armor { value: armor },
        Damage {
            value: profile.damage,
        },
        Located::default(),
    ));
    if profile.is_container {
        builder.add(Container::default());
    }
    match profile.behavior {
        AntBehavior::Devour => {
            builder.add(Digestion::default());
        }
        AntBehavior::Reign => {
            builder.add(Sovereign { impostor });
        }
        _ => {}
    }
    world.spawn(builder.build())
}

/// Spawn a bee of `kind` with the given armor.
pub fn spawn_bee(world: &mut World, kind: BeeKind, armor: f64) -> Entity {
    world.spawn((
        Bee { kind },
        Armor { value: armor },
        Damage {
            value: bee_profile(kind).damage,
        },
        Located::default(),
    ))
}
