//! ECS components for hecs entities.
//!
//! Components are plain data structs with no behavior.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::{AntKind, BeeKind, StatusEffect};
use crate::types::PlaceId;

/// Remaining health. The insect is destroyed once this reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Armor {
    pub value: f64,
}

/// Damage dealt per hit. Mutable: the queen's aura doubles it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Damage {
    pub value: f64,
}

/// Where the insect currently stands. Written only by the occupancy system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Located {
    pub place: Option<PlaceId>,
}

/// Marks an entity as an ant of the given kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ant {
    pub kind: AntKind,
}

/// Marks an entity as a bee of the given kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bee {
    pub kind: BeeKind,
}

/// Digestion countdown of a hungry ant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Digestion {
    pub remaining: u32,
}

/// Attached to every queen; impostors destroy themselves on their first action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sovereign {
    pub impostor: bool,
}

/// Active status effect on a bee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Affliction {
    pub effect: StatusEffect,
    /// Turns left before the effect wears off.
    pub remaining: u32,
}
