//! Occupancy rules: the only code that puts insects into places or takes
//! them out.
//!
//! A place holds any number of bees and at most one visible ant. The
//! visible ant may be a container concealing exactly one other ant.

use std::ops::ControlFlow;

use hecs::Entity;

use formicary_core::enums::{Faction, Outcome, PlaceKind};
use formicary_core::error::{ColonyError, Result};
use formicary_core::types::PlaceId;

use crate::board::{Board, Flow};
use crate::systems::damage;

/// Put an insect into a place.
///
/// Water drowns whatever is not watersafe right after it lands. A bee
/// entering the base ends the game instead of landing. Only the hive's
/// own waves live in the hive, so nothing can be added there.
pub fn add_insect(board: &mut Board, place: PlaceId, insect: Entity) -> Result<Flow> {
    match board.require(insect)? {
        Faction::Ant => add_ant(board, place, insect)?,
        Faction::Bee => match board.tunnel.place(place).kind {
            PlaceKind::Base => {
                tracing::info!("{} breached the base", board.label(insect));
                return Ok(ControlFlow::Break(Outcome::BeesWin));
            }
            PlaceKind::Hive => {
                return Err(ColonyError::Uninhabitable {
                    insect: board.label(insect),
                    place: board.tunnel.name(place).to_string(),
                })
            }
            _ => board.tunnel.place_mut(place).bees.push(insect),
        },
    }
    board.set_place(insect, Some(place));

    if board.tunnel.place(place).kind == PlaceKind::Water && !board.watersafe(insect) {
        let armor = board.armor(insect).unwrap_or(0.0);
        tracing::debug!("{} drowns", board.label(insect));
        return Ok(damage::reduce_armor(board, insect, armor));
    }
    Ok(ControlFlow::Continue(()))
}

fn add_ant(board: &mut Board, place: PlaceId, ant: Entity) -> Result<()> {
    let target = board.tunnel.place(place);
    if matches!(target.kind, PlaceKind::Base | PlaceKind::Hive) {
        return Err(ColonyError::Uninhabitable {
            insect: board.label(ant),
            place: target.name.clone(),
        });
    }

    match target.ant() {
        None => board.tunnel.place_mut(place).ant = Some(ant),
        Some(occupant) if board.can_contain(occupant, ant) => {
            board.set_contained(occupant, Some(ant));
        }
        Some(occupant) if board.can_contain(ant, occupant) => {
            board.set_contained(ant, Some(occupant));
            board.tunnel.place_mut(place).ant = Some(ant);
        }
        Some(_) => {
            return Err(ColonyError::Occupied {
                place: target.name.clone(),
            })
        }
    }
    Ok(())
}

/// Take an insect out of a place.
///
/// The true queen cannot be removed; the call succeeds and she stays.
/// Removing a container promotes the ant it conceals.
pub fn remove_insect(board: &mut Board, place: PlaceId, insect: Entity) -> Result<()> {
    match board.require(insect)? {
        Faction::Ant => {
            if board.is_true_queen(insect) {
                return Ok(());
            }
            remove_ant(board, place, insect)?;
        }
        Faction::Bee => {
            let bees = &mut board.tunnel.place_mut(place).bees;
            let Some(index) = bees.iter().position(|&b| b == insect) else {
                return Err(not_present(board, place, insect));
            };
            bees.remove(index);
        }
    }
    board.set_place(insect, None);
    Ok(())
}

fn remove_ant(board: &mut Board, place: PlaceId, ant: Entity) -> Result<()> {
    let visible = board.tunnel.place(place).ant();

    if visible == Some(ant) {
        let promoted = board.contained(ant);
        if promoted.is_some() {
            board.set_contained(ant, None);
        }
        board.tunnel.place_mut(place).ant = promoted;
        return Ok(());
    }

    match visible {
        Some(container) if board.contained(container) == Some(ant) => {
            board.set_contained(container, None);
            Ok(())
        }
        _ => Err(not_present(board, place, ant)),
    }
}

/// Move an insect from one place to another.
pub fn move_insect(board: &mut Board, insect: Entity, from: PlaceId, to: PlaceId) -> Result<Flow> {
    remove_insect(board, from, insect)?;
    add_insect(board, to, insect)
}

fn not_present(board: &Board, place: PlaceId, insect: Entity) -> ColonyError {
    ColonyError::NotPresent {
        insect: board.label(insect),
        place: board.tunnel.name(place).to_string(),
    }
}
