//! Mutable game state shared by every system during a turn.
//!
//! Insect interactions cascade (a sting kills a fire ant, whose blast
//! kills bees, whose removal reshapes a place), so systems receive the
//! whole board rather than a list of separate borrows.

use std::ops::ControlFlow;

use hecs::{Entity, World};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use formicary_behavior::profiles::{ant_profile, bee_profile};
use formicary_core::components::{Ant, Armor, Bee, Damage, Located, Sovereign};
use formicary_core::enums::{AntKind, BeeKind, Faction, Outcome};
use formicary_core::error::{ColonyError, Result};
use formicary_core::events::GameEvent;
use formicary_core::types::PlaceId;

use crate::components::Container;
use crate::tunnel::Tunnel;

/// Result of any interaction that may end the game.
pub type Flow = ControlFlow<Outcome>;

/// Read-only notice handed to the death hook.
#[derive(Debug, Clone, PartialEq)]
pub struct InsectDeath {
    pub entity: Entity,
    pub faction: Faction,
    /// Kind name, e.g. `Fire` or `Hornet`.
    pub name: &'static str,
    /// The place it died in, if it was on the board.
    pub place: Option<String>,
}

/// Callback fired once for every destroyed insect.
pub type DeathHook = Box<dyn FnMut(&InsectDeath)>;

/// The ECS world, the tunnel graph, and the colony's shared resources.
pub struct Board {
    pub world: World,
    pub tunnel: Tunnel,
    pub rng: ChaCha8Rng,
    pub food: u32,
    pub events: Vec<GameEvent>,
    pub(crate) death_hook: Option<DeathHook>,
}

impl Board {
    pub fn new(tunnel: Tunnel, rng: ChaCha8Rng, food: u32) -> Self {
        Self {
            world: World::new(),
            tunnel,
            rng,
            food,
            events: Vec::new(),
            death_hook: None,
        }
    }

    pub fn armor(&self, entity: Entity) -> Option<f64> {
        self.world.get::<&Armor>(entity).ok().map(|a| a.value)
    }

    /// Whether the entity exists and still has armor left.
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.armor(entity).is_some_and(|armor| armor > 0.0)
    }

    pub fn damage_of(&self, entity: Entity) -> f64 {
        self.world
            .get::<&Damage>(entity)
            .map(|d| d.value)
            .unwrap_or(0.0)
    }

    pub fn place_of(&self, entity: Entity) -> Option<PlaceId> {
        self.world.get::<&Located>(entity).ok().and_then(|l| l.place)
    }

    pub(crate) fn set_place(&mut self, entity: Entity, place: Option<PlaceId>) {
        if let Ok(mut located) = self.world.get::<&mut Located>(entity) {
            located.place = place;
        }
    }

    pub fn ant_kind(&self, entity: Entity) -> Option<AntKind> {
        self.world.get::<&Ant>(entity).ok().map(|a| a.kind)
    }

    pub fn bee_kind(&self, entity: Entity) -> Option<BeeKind> {
        self.world.get::<&Bee>(entity).ok().map(|b| b.kind)
    }

    pub fn faction(&self, entity: Entity) -> Option<Faction> {
        if self.world.satisfies::<&Ant>(entity).unwrap_or(false) {
            Some(Faction::Ant)
        } else if self.world.satisfies::<&Bee>(entity).unwrap_or(false) {
            Some(Faction::Bee)
        } else {
            None
        }
    }

    /// Kind name of an ant or bee.
    pub fn kind_name(&self, entity: Entity) -> &'static str {
        if let Some(kind) = self.ant_kind(entity) {
            kind.name()
        } else if let Some(kind) = self.bee_kind(entity) {
            kind.name()
        } else {
            "Insect"
        }
    }

    pub fn watersafe(&self, entity: Entity) -> bool {
        if let Some(kind) = self.ant_kind(entity) {
            ant_profile(kind).watersafe
        } else if let Some(kind) = self.bee_kind(entity) {
            bee_profile(kind).watersafe
        } else {
            false
        }
    }

    pub fn is_container(&self, entity: Entity) -> bool {
        self.world.satisfies::<&Container>(entity).unwrap_or(false)
    }

    /// The ant concealed inside `container`, if any.
    pub fn contained(&self, container: Entity) -> Option<Entity> {
        self.world
            .get::<&Container>(container)
            .ok()
            .and_then(|c| c.contained)
    }

    pub(crate) fn set_contained(&mut self, container: Entity, contained: Option<Entity>) {
        if let Ok(mut c) = self.world.get::<&mut Container>(container) {
            c.contained = contained;
        }
    }

    /// A container can take in an ant only while empty, and never another container.
    pub fn can_contain(&self, container: Entity, other: Entity) -> bool {
        self.is_container(container)
            && self.contained(container).is_none()
            && !self.is_container(other)
    }

    /// The one queen whose death loses the game.
    pub fn is_true_queen(&self, entity: Entity) -> bool {
        self.world
            .get::<&Sovereign>(entity)
            .is_ok_and(|s| !s.impostor)
    }

    /// Whether the visible ant of `place` stops bees.
    pub fn blocker(&self, place: PlaceId) -> Option<bool> {
        self.tunnel
            .place(place)
            .ant()
            .and_then(|ant| self.ant_kind(ant))
            .map(|kind| ant_profile(kind).blocks_path)
    }

    /// A uniformly random bee standing in `place`.
    pub fn random_bee_in(&mut self, place: PlaceId) -> Option<Entity> {
        self.tunnel.place(place).bees().choose(&mut self.rng).copied()
    }

    /// `Name(armor, place)`, as shown in status lines and errors.
    pub fn label(&self, entity: Entity) -> String {
        let armor = self.armor(entity).unwrap_or(0.0);
        let place = self
            .place_of(entity)
            .map_or("None", |id| self.tunnel.name(id));
        format!("{}({}, {})", self.kind_name(entity), armor, place)
    }

    /// Verify the handle refers to an insect of this colony.
    pub fn require(&self, entity: Entity) -> Result<Faction> {
        self.faction(entity)
            .ok_or_else(|| ColonyError::NoSuchInsect(format!("{entity:?}")))
    }

    pub(crate) fn notify_death(&mut self, death: InsectDeath) {
        if let Some(hook) = self.death_hook.as_mut() {
            hook(&death);
        }
    }
}
