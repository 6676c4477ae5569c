//! Kind-specific stat profiles.
//!
//! Every ant and bee kind is described by data. Systems dispatch on the
//! behavior tag instead of on the kind itself.

use formicary_core::constants::*;
use formicary_core::enums::{AntKind, BeeKind};

/// What an ant does with its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AntBehavior {
    /// Add food to the colony.
    Harvest,
    /// Throw at the nearest bee within range.
    Throw,
    /// Nothing on its turn; burns co-located bees when damaged.
    Burn,
    /// Eat a co-located bee, then digest.
    Devour,
    /// Damage every co-located bee.
    Ambush,
    /// Nothing at all.
    Block,
    /// Delegate to the concealed ant.
    Guard,
    /// Delegate, then damage every co-located bee.
    Crush,
    /// Throw, then buff every ant behind her.
    Reign,
}

/// Stats and capabilities of one ant kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AntProfile {
    pub kind: AntKind,
    pub food_cost: u32,
    /// Armor a freshly deployed ant starts with.
    pub armor: f64,
    pub damage: f64,
    /// Minimum throw distance in hops (inclusive).
    pub min_range: u32,
    /// Maximum throw distance in hops (exclusive); `None` is unbounded.
    pub max_range: Option<u32>,
    /// Whether bees in the same place are stopped by this ant.
    pub blocks_path: bool,
    /// Whether this ant can conceal another.
    pub is_container: bool,
    pub watersafe: bool,
    pub behavior: AntBehavior,
}

impl AntProfile {
    fn base(kind: AntKind, food_cost: u32, behavior: AntBehavior) -> Self {
        Self {
            kind,
            food_cost,
            armor: 1.0,
            damage: 0.0,
            min_range: 0,
            max_range: None,
            blocks_path: true,
            is_container: false,
            watersafe: false,
            behavior,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}

/// Get the profile for a given ant kind.
pub fn ant_profile(kind: AntKind) -> AntProfile {
    match kind {
        AntKind::Harvester => AntProfile::base(kind, 2, AntBehavior::Harvest),
        AntKind::Thrower => AntProfile {
            damage: 1.0,
            ..AntProfile::base(kind, 3, AntBehavior::Throw)
        },
        AntKind::Short => AntProfile {
            damage: 1.0,
            max_range: Some(SHORT_THROWER_MAX_RANGE),
            ..AntProfile::base(kind, 2, AntBehavior::Throw)
        },
        AntKind::Long => AntProfile {
            damage: 1.0,
            min_range: LONG_THROWER_MIN_RANGE,
            ..AntProfile::base(kind, 2, AntBehavior::Throw)
        },
        AntKind::Scuba => AntProfile {
            damage: 1.0,
            watersafe: true,
            ..AntProfile::base(kind, 6, AntBehavior::Throw)
        },
        AntKind::Fire => AntProfile {
            armor: 3.0,
            damage: 3.0,
            ..AntProfile::base(kind, 5, AntBehavior::Burn)
        },
        AntKind::Hungry => AntProfile::base(kind, 4, AntBehavior::Devour),
        AntKind::Ninja => AntProfile {
            damage: 1.0,
            blocks_path: false,
            ..AntProfile::base(kind, 5, AntBehavior::Ambush)
        },
        AntKind::Wall => AntProfile {
            armor: 4.0,
            ..AntProfile::base(kind, 4, AntBehavior::Block)
        },
        AntKind::Bodyguard => AntProfile {
            armor: 2.0,
            is_container: true,
            ..AntProfile::base(kind, 4, AntBehavior::Guard)
        },
        AntKind::Tank => AntProfile {
            armor: 2.0,
            damage: 1.0,
            is_container: true,
            ..AntProfile::base(kind, 6, AntBehavior::Crush)
        },
        AntKind::Queen => AntProfile {
            damage: 1.0,
            watersafe: true,
            ..AntProfile::base(kind, 7, AntBehavior::Reign)
        },
    }
}

/// Stats and capabilities of one bee kind. Armor comes from the assault plan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeeProfile {
    pub kind: BeeKind,
    pub damage: f64,
    /// Advance-or-sting actions taken per turn.
    pub actions_per_turn: u32,
    /// Never stopped by a blocking ant.
    pub unblockable: bool,
    /// Refuses externally imposed status effects.
    pub status_immune: bool,
    /// Diminishing-returns cap on incoming hits.
    pub damage_cap: Option<f64>,
    pub watersafe: bool,
}

impl BeeProfile {
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}

/// Get the profile for a given bee kind.
pub fn bee_profile(kind: BeeKind) -> BeeProfile {
    let bee = BeeProfile {
        kind,
        damage: 1.0,
        actions_per_turn: 1,
        unblockable: false,
        status_immune: false,
        damage_cap: None,
        watersafe: true,
    };

    match kind {
        BeeKind::Bee => bee,
        BeeKind::Wasp => BeeProfile { damage: 2.0, ..bee },
        BeeKind::Hornet => BeeProfile {
            damage: 0.25,
            actions_per_turn: 2,
            status_immune: true,
            ..bee
        },
        BeeKind::NinjaBee => BeeProfile {
            unblockable: true,
            ..bee
        },
        BeeKind::Boss => BeeProfile {
            damage: 2.0,
            actions_per_turn: 2,
            status_immune: true,
            damage_cap: Some(BOSS_DAMAGE_CAP),
            ..bee
        },
    }
}
