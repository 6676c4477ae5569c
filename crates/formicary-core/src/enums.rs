//! Enumeration types used throughout the simulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which side of the contest an insect fights for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Ant,
    Bee,
}

/// Every ant kind the colony can deploy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AntKind {
    /// Produces food each turn.
    Harvester,
    /// Throws leaves at the nearest bee, any distance.
    Thrower,
    /// Explodes on death, burning every bee in its place.
    Fire,
    /// Swallows a bee whole, then digests for several turns.
    Hungry,
    /// Lets bees pass while damaging all of them.
    Ninja,
    /// Soaks up stings.
    Wall,
    /// Container that shields one other ant.
    Bodyguard,
    /// Thrower limited to nearby places.
    Short,
    /// Thrower that only reaches distant places.
    Long,
    /// Watersafe thrower.
    Scuba,
    /// Container that also damages every bee in its place.
    Tank,
    /// Base protector; her death ends the game.
    Queen,
}

impl AntKind {
    /// Registry of deployable kinds, in the order the colony offers them.
    pub const ALL: [AntKind; 12] = [
        AntKind::Harvester,
        AntKind::Thrower,
        AntKind::Fire,
        AntKind::Hungry,
        AntKind::Ninja,
        AntKind::Wall,
        AntKind::Bodyguard,
        AntKind::Short,
        AntKind::Long,
        AntKind::Scuba,
        AntKind::Tank,
        AntKind::Queen,
    ];

    /// Display name, also the key used by `deploy_ant`.
    pub fn name(self) -> &'static str {
        match self {
            AntKind::Harvester => "Harvester",
            AntKind::Thrower => "Thrower",
            AntKind::Fire => "Fire",
            AntKind::Hungry => "Hungry",
            AntKind::Ninja => "Ninja",
            AntKind::Wall => "Wall",
            AntKind::Bodyguard => "Bodyguard",
            AntKind::Short => "Short",
            AntKind::Long => "Long",
            AntKind::Scuba => "Scuba",
            AntKind::Tank => "Tank",
            AntKind::Queen => "Queen",
        }
    }

    pub fn from_name(name: &str) -> Option<AntKind> {
        AntKind::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for AntKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Every bee kind an assault plan can schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BeeKind {
    Bee,
    Wasp,
    Hornet,
    NinjaBee,
    Boss,
}

impl BeeKind {
    pub const ALL: [BeeKind; 5] = [
        BeeKind::Bee,
        BeeKind::Wasp,
        BeeKind::Hornet,
        BeeKind::NinjaBee,
        BeeKind::Boss,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BeeKind::Bee => "Bee",
            BeeKind::Wasp => "Wasp",
            BeeKind::Hornet => "Hornet",
            BeeKind::NinjaBee => "NinjaBee",
            BeeKind::Boss => "Boss",
        }
    }
}

impl fmt::Display for BeeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Terrain of a place in the tunnel graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaceKind {
    /// Ordinary dry tunnel segment.
    #[default]
    Ground,
    /// Drowns any insect that is not watersafe.
    Water,
    /// Where bees wait before entering the tunnels.
    Hive,
    /// The colony's base. Ants cannot stand here; a bee entering wins the game.
    Base,
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Every bee in the assault plan was vanquished.
    AntsWin,
    /// A bee reached the base, or the queen perished.
    BeesWin,
}

impl Outcome {
    pub fn ants_won(self) -> bool {
        self == Outcome::AntsWin
    }
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Running,
    Over(Outcome),
}

impl GamePhase {
    pub fn outcome(self) -> Option<Outcome> {
        match self {
            GamePhase::Running => None,
            GamePhase::Over(outcome) => Some(outcome),
        }
    }
}

/// Preset assault plan difficulty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Test,
    #[default]
    Easy,
    Normal,
    Hard,
    ExtraHard,
}

/// Externally imposed effect that alters a bee's behavior for a few turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StatusEffect {
    /// The bee only acts on even turns.
    Slow { turns: u32 },
    /// The bee does not act at all.
    Stun { turns: u32 },
}

impl StatusEffect {
    pub fn turns(self) -> u32 {
        match self {
            StatusEffect::Slow { turns } | StatusEffect::Stun { turns } => turns,
        }
    }
}
