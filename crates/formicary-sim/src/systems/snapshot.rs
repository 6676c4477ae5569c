//! Snapshot system: reads the board and builds a `ColonySnapshot`.
//!
//! Read-only; it never modifies the world.

use hecs::Entity;

use formicary_core::enums::GamePhase;
use formicary_core::events::GameEvent;
use formicary_core::state::{ColonySnapshot, InsectView, PlaceView};
use formicary_core::types::GameClock;

use crate::board::Board;
use crate::tunnel::Place;

pub fn build_snapshot(
    board: &Board,
    clock: GameClock,
    phase: GamePhase,
    bees_remaining: usize,
    events: Vec<GameEvent>,
) -> ColonySnapshot {
    ColonySnapshot {
        clock,
        phase,
        food: board.food,
        bees_remaining,
        places: board
            .tunnel
            .places()
            .map(|(_, place)| build_place(board, place))
            .collect(),
        events,
    }
}

fn build_place(board: &Board, place: &Place) -> PlaceView {
    let ant = place.ant();
    PlaceView {
        name: place.name.clone(),
        kind: place.kind,
        exit: place.exit().map(|id| board.tunnel.name(id).to_string()),
        ant: ant.and_then(|a| build_insect(board, a)),
        contained: ant
            .and_then(|a| board.contained(a))
            .and_then(|c| build_insect(board, c)),
        bees: place
            .bees()
            .iter()
            .filter_map(|&bee| build_insect(board, bee))
            .collect(),
    }
}

fn build_insect(board: &Board, entity: Entity) -> Option<InsectView> {
    Some(InsectView {
        faction: board.faction(entity)?,
        name: board.kind_name(entity).to_string(),
        armor: board.armor(entity)?,
        damage: board.damage_of(entity),
    })
}
