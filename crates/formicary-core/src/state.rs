//! Colony state snapshot: the complete visible state after each turn.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::types::GameClock;

/// Complete board state published after each turn.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColonySnapshot {
    pub clock: GameClock,
    pub phase: GamePhase,
    pub food: u32,
    /// Bees not yet defeated, including those still in the hive.
    pub bees_remaining: usize,
    pub places: Vec<PlaceView>,
    pub events: Vec<GameEvent>,
}

/// One place on the board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceView {
    pub name: String,
    pub kind: PlaceKind,
    pub exit: Option<String>,
    /// The visible ant.
    pub ant: Option<InsectView>,
    /// The ant concealed inside the visible container, if any.
    pub contained: Option<InsectView>,
    pub bees: Vec<InsectView>,
}

/// One insect on the board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsectView {
    pub faction: Faction,
    /// Kind name, e.g. `Thrower` or `Boss`.
    pub name: String,
    pub armor: f64,
    pub damage: f64,
}
