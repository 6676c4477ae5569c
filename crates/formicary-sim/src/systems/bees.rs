//! Bee system: active bees sting the ant in their way or advance.

use std::ops::ControlFlow;

use hecs::Entity;

use formicary_behavior::profiles::bee_profile;
use formicary_behavior::rules::{affliction_allows, bee_intent, BeeContext, BeeIntent};
use formicary_core::components::Affliction;

use crate::board::{Board, Flow};
use crate::systems::{damage, occupancy};

/// Run the bee phase over a snapshot of the active set.
///
/// Bees destroyed during the phase leave the active set afterwards.
pub fn run(board: &mut Board, active: &mut Vec<Entity>, turn: u64) -> Flow {
    let snapshot = active.clone();
    for bee in snapshot {
        if board.is_alive(bee) {
            act(board, bee, turn)?;
        }
        if !board.is_alive(bee) {
            active.retain(|&b| b != bee);
        }
    }
    ControlFlow::Continue(())
}

/// One bee's turn: every sub-action it is entitled to.
pub fn act(board: &mut Board, bee: Entity, turn: u64) -> Flow {
    let Some(kind) = board.bee_kind(bee) else {
        return ControlFlow::Continue(());
    };
    if !affliction_gate(board, bee, turn) {
        tracing::debug!("{} is held by its affliction", board.label(bee));
        return ControlFlow::Continue(());
    }

    for _ in 0..bee_profile(kind).actions_per_turn {
        if !board.is_alive(bee) {
            break;
        }
        step(board, bee)?;
    }
    ControlFlow::Continue(())
}

/// Count the affliction down and report whether the bee may act this turn.
fn affliction_gate(board: &mut Board, bee: Entity, turn: u64) -> bool {
    let (allowed, expired) = {
        let Ok(mut affliction) = board.world.get::<&mut Affliction>(bee) else {
            return true;
        };
        affliction.remaining = affliction.remaining.saturating_sub(1);
        (
            affliction_allows(affliction.effect, turn),
            affliction.remaining == 0,
        )
    };
    if expired {
        let _ = board.world.remove_one::<Affliction>(bee);
    }
    allowed
}

/// A single sub-action. Blocking is looked at afresh every time.
fn step(board: &mut Board, bee: Entity) -> Flow {
    let Some(kind) = board.bee_kind(bee) else {
        return ControlFlow::Continue(());
    };
    let Some(place) = board.place_of(bee) else {
        return ControlFlow::Continue(());
    };
    let profile = bee_profile(kind);
    let exit = board.tunnel.place(place).exit();

    let ctx = BeeContext {
        armor: board.armor(bee).unwrap_or(0.0),
        ant_blocks: board.blocker(place),
        unblockable: profile.unblockable,
        has_exit: exit.is_some(),
    };

    match (bee_intent(&ctx), board.tunnel.place(place).ant(), exit) {
        (BeeIntent::Sting, Some(ant), _) => {
            let amount = board.damage_of(bee);
            tracing::debug!("{} stings {}", board.label(bee), board.label(ant));
            damage::reduce_armor(board, ant, amount)
        }
        (BeeIntent::Advance, _, Some(exit)) => {
            tracing::debug!(
                "{} moves to {}",
                board.label(bee),
                board.tunnel.name(exit)
            );
            match occupancy::move_insect(board, bee, place, exit) {
                Ok(flow) => flow,
                Err(err) => {
                    tracing::warn!("bee could not advance: {err}");
                    ControlFlow::Continue(())
                }
            }
        }
        _ => ControlFlow::Continue(()),
    }
}
