//! Damage resolution and insect destruction.

use std::ops::ControlFlow;

use hecs::Entity;

use formicary_behavior::profiles::{ant_profile, bee_profile, AntBehavior};
use formicary_behavior::rules::{fire_splash, mitigate};
use formicary_core::components::Armor;
use formicary_core::enums::Outcome;
use formicary_core::events::GameEvent;

use crate::board::{Board, Flow, InsectDeath};
use crate::systems::occupancy;

/// Reduce an insect's armor, destroying it at zero.
///
/// Insects that are already destroyed ignore further damage. A fire ant
/// passes the hit on to every bee sharing its place, with its own damage
/// added when the hit is lethal. Losing the true queen ends the game.
pub fn reduce_armor(board: &mut Board, target: Entity, amount: f64) -> Flow {
    if !board.is_alive(target) {
        return ControlFlow::Continue(());
    }

    let amount = match board.bee_kind(target) {
        Some(kind) => mitigate(amount, bee_profile(kind).damage_cap),
        None => amount,
    };

    let remaining = {
        let Ok(mut armor) = board.world.get::<&mut Armor>(target) else {
            return ControlFlow::Continue(());
        };
        armor.value -= amount;
        armor.value
    };
    let lethal = remaining <= 0.0;

    let burns = board
        .ant_kind(target)
        .is_some_and(|kind| ant_profile(kind).behavior == AntBehavior::Burn);
    if burns {
        if let Some(place) = board.place_of(target) {
            let splash = fire_splash(amount, board.damage_of(target), lethal);
            let bees = board.tunnel.place(place).bees().to_vec();
            for bee in bees {
                reduce_armor(board, bee, splash)?;
            }
        }
    }

    if lethal {
        let regicide = board.is_true_queen(target);
        destroy(board, target);
        if regicide {
            tracing::info!("the true queen is dead");
            return ControlFlow::Break(Outcome::BeesWin);
        }
    }
    ControlFlow::Continue(())
}

/// Take a dead insect off the board and announce its death.
///
/// The entity itself stays in the world until end-of-turn cleanup so
/// that handles held during the turn remain valid.
fn destroy(board: &mut Board, entity: Entity) {
    let label = board.label(entity);
    let place = board.place_of(entity);
    let place_name = place.map(|id| board.tunnel.name(id).to_string());

    if let Some(place) = place {
        if let Err(err) = occupancy::remove_insect(board, place, entity) {
            tracing::warn!("destroyed insect out of place: {err}");
        }
    }

    tracing::info!("{label} destroyed");
    board.events.push(GameEvent::InsectDestroyed {
        label,
        place: place_name.clone(),
    });

    if let Some(faction) = board.faction(entity) {
        let death = InsectDeath {
            entity,
            faction,
            name: board.kind_name(entity),
            place: place_name,
        };
        board.notify_death(death);
    }
}
