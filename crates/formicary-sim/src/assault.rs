//! Assault plans: which bees leave the hive on which turn.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use formicary_core::enums::BeeKind;

/// One bee to be spawned into the hive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeeSpawn {
    pub kind: BeeKind,
    pub armor: f64,
}

/// Arrival schedule: turn -> bees released that turn, in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssaultPlan {
    pub waves: BTreeMap<u64, Vec<BeeSpawn>>,
}

impl AssaultPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `count` bees of `kind` with `armor` for `turn`.
    pub fn add_wave(&mut self, kind: BeeKind, armor: f64, turn: u64, count: usize) -> &mut Self {
        self.waves
            .entry(turn)
            .or_default()
            .extend(std::iter::repeat(BeeSpawn { kind, armor }).take(count));
        self
    }

    /// By-value form of [`AssaultPlan::add_wave`] for building presets.
    pub fn with_wave(mut self, kind: BeeKind, armor: f64, turn: u64, count: usize) -> Self {
        self.add_wave(kind, armor, turn, count);
        self
    }

    /// Bees scheduled for exactly `turn`.
    pub fn bees_at(&self, turn: u64) -> &[BeeSpawn] {
        self.waves.get(&turn).map_or(&[], Vec::as_slice)
    }

    /// Every scheduled bee, in turn order.
    pub fn all_bees(&self) -> impl Iterator<Item = (u64, &BeeSpawn)> {
        self.waves
            .iter()
            .flat_map(|(&turn, bees)| bees.iter().map(move |bee| (turn, bee)))
    }

    pub fn total(&self) -> usize {
        self.waves.values().map(Vec::len).sum()
    }
}
