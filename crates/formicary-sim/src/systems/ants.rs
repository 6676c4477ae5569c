//! Ant system: every visible ant acts once per turn.
//!
//! Each behavior tag from the kind catalog maps to one action function.
//! Containers run the action of the ant they conceal.

use std::collections::HashSet;
use std::ops::ControlFlow;

use hecs::Entity;

use formicary_behavior::profiles::{ant_profile, AntBehavior};
use formicary_behavior::rules::{digest, in_throw_range, DigestStep};
use formicary_core::components::{Digestion, Damage, Sovereign};
use formicary_core::constants::{HARVESTER_FOOD_PER_TURN, QUEEN_BUFF_FACTOR};
use formicary_core::events::GameEvent;
use formicary_core::types::PlaceId;

use crate::board::{Board, Flow};
use crate::systems::damage::reduce_armor;

/// Ants already doubled by the queen. Nobody is doubled twice.
#[derive(Debug, Clone, Default)]
pub struct BuffRegistry {
    granted: HashSet<Entity>,
}

impl BuffRegistry {
    pub fn contains(&self, ant: Entity) -> bool {
        self.granted.contains(&ant)
    }

    pub fn len(&self) -> usize {
        self.granted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.granted.is_empty()
    }

    /// Record `ant`; false if it was already buffed.
    fn grant(&mut self, ant: Entity) -> bool {
        self.granted.insert(ant)
    }
}

/// Signature shared by every ant action.
pub type AntAction = fn(&mut Board, &mut BuffRegistry, Entity) -> Flow;

/// Dispatch table from behavior tag to action.
pub fn action_for(behavior: AntBehavior) -> AntAction {
    match behavior {
        AntBehavior::Harvest => harvest,
        AntBehavior::Throw => throw,
        AntBehavior::Burn | AntBehavior::Block => idle,
        AntBehavior::Devour => devour,
        AntBehavior::Ambush => ambush,
        AntBehavior::Guard => guard,
        AntBehavior::Crush => crush,
        AntBehavior::Reign => reign,
    }
}

/// Run the ant phase over the visible ants present when it starts.
pub fn run(board: &mut Board, buffs: &mut BuffRegistry) -> Flow {
    let ants: Vec<Entity> = board
        .tunnel
        .places()
        .filter_map(|(_, place)| place.ant())
        .collect();

    for ant in ants {
        if board.is_alive(ant) {
            act(board, buffs, ant)?;
        }
    }
    ControlFlow::Continue(())
}

/// Perform one ant's action.
pub fn act(board: &mut Board, buffs: &mut BuffRegistry, ant: Entity) -> Flow {
    match board.ant_kind(ant) {
        Some(kind) => action_for(ant_profile(kind).behavior)(board, buffs, ant),
        None => ControlFlow::Continue(()),
    }
}

fn idle(_board: &mut Board, _buffs: &mut BuffRegistry, _ant: Entity) -> Flow {
    ControlFlow::Continue(())
}

fn harvest(board: &mut Board, _buffs: &mut BuffRegistry, _ant: Entity) -> Flow {
    board.food += HARVESTER_FOOD_PER_TURN;
    ControlFlow::Continue(())
}

fn throw(board: &mut Board, _buffs: &mut BuffRegistry, ant: Entity) -> Flow {
    let Some(kind) = board.ant_kind(ant) else {
        return ControlFlow::Continue(());
    };
    let profile = ant_profile(kind);
    let Some(target) = nearest_bee(board, ant, profile.min_range, profile.max_range) else {
        return ControlFlow::Continue(());
    };

    let damage = board.damage_of(ant);
    tracing::debug!(
        "{} throws at {} for {damage}",
        board.label(ant),
        board.label(target)
    );
    reduce_armor(board, target, damage)
}

/// Random bee in the closest in-range place, looking back toward the hive.
///
/// Hops are counted from the thrower's own place (0). The hive itself is
/// never a target.
pub fn nearest_bee(
    board: &mut Board,
    thrower: Entity,
    min_range: u32,
    max_range: Option<u32>,
) -> Option<Entity> {
    let hive = board.tunnel.hive();
    let mut current = board.place_of(thrower);
    let mut hops = 0u32;

    while let Some(id) = current {
        if id == hive || max_range.is_some_and(|max| hops >= max) {
            break;
        }
        let place = board.tunnel.place(id);
        if !place.bees().is_empty() && in_throw_range(hops, min_range, max_range) {
            return board.random_bee_in(id);
        }
        current = place.entrance();
        hops += 1;
    }
    None
}

fn devour(board: &mut Board, _buffs: &mut BuffRegistry, ant: Entity) -> Flow {
    let remaining = board
        .world
        .get::<&Digestion>(ant)
        .map(|d| d.remaining)
        .unwrap_or(0);

    match digest(remaining) {
        DigestStep::Digest { remaining } => {
            set_digestion(board, ant, remaining);
            ControlFlow::Continue(())
        }
        DigestStep::Hunt { reset_to } => {
            let Some(place) = board.place_of(ant) else {
                return ControlFlow::Continue(());
            };
            let Some(prey) = board.random_bee_in(place) else {
                return ControlFlow::Continue(());
            };
            set_digestion(board, ant, reset_to);
            let armor = board.armor(prey).unwrap_or(0.0);
            tracing::debug!("{} eats {}", board.label(ant), board.label(prey));
            reduce_armor(board, prey, armor)
        }
    }
}

fn set_digestion(board: &mut Board, ant: Entity, remaining: u32) {
    if let Ok(mut digestion) = board.world.get::<&mut Digestion>(ant) {
        digestion.remaining = remaining;
    }
}

fn ambush(board: &mut Board, _buffs: &mut BuffRegistry, ant: Entity) -> Flow {
    match board.place_of(ant) {
        Some(place) => sweep(board, place, board.damage_of(ant)),
        None => ControlFlow::Continue(()),
    }
}

/// Damage every bee standing in `place` when the sweep starts.
fn sweep(board: &mut Board, place: PlaceId, damage: f64) -> Flow {
    let bees = board.tunnel.place(place).bees().to_vec();
    for bee in bees {
        if board.place_of(bee) == Some(place) {
            reduce_armor(board, bee, damage)?;
        }
    }
    ControlFlow::Continue(())
}

fn guard(board: &mut Board, buffs: &mut BuffRegistry, ant: Entity) -> Flow {
    match board.contained(ant) {
        Some(inner) => act(board, buffs, inner),
        None => ControlFlow::Continue(()),
    }
}

fn crush(board: &mut Board, buffs: &mut BuffRegistry, ant: Entity) -> Flow {
    guard(board, buffs, ant)?;
    ambush(board, buffs, ant)
}

fn reign(board: &mut Board, buffs: &mut BuffRegistry, queen: Entity) -> Flow {
    let impostor = board
        .world
        .get::<&Sovereign>(queen)
        .map(|s| s.impostor)
        .unwrap_or(true);
    if impostor {
        let armor = board.armor(queen).unwrap_or(0.0);
        tracing::debug!("impostor {} abdicates", board.label(queen));
        return reduce_armor(board, queen, armor);
    }

    throw(board, buffs, queen)?;

    let mut current = board.place_of(queen);
    while let Some(id) = current.and_then(|id| board.tunnel.place(id).exit()) {
        current = Some(id);
        let Some(ant) = board.tunnel.place(id).ant() else {
            continue;
        };
        buff(board, buffs, ant, id);
        if let Some(inner) = board.contained(ant) {
            buff(board, buffs, inner, id);
        }
    }
    ControlFlow::Continue(())
}

fn buff(board: &mut Board, buffs: &mut BuffRegistry, ant: Entity, place: PlaceId) {
    if !buffs.grant(ant) {
        return;
    }
    let damage = {
        let Ok(mut damage) = board.world.get::<&mut Damage>(ant) else {
            return;
        };
        damage.value *= QUEEN_BUFF_FACTOR;
        damage.value
    };
    if let Some(kind) = board.ant_kind(ant) {
        tracing::debug!("queen doubles {} to {damage}", board.label(ant));
        board.events.push(GameEvent::AntBuffed {
            ant: kind,
            place: board.tunnel.name(place).to_string(),
            damage,
        });
    }
}
