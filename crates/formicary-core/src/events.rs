//! Events emitted by the simulation for presentation and logging.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Something noteworthy that happened during a turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// An ant was deployed and paid for.
    AntDeployed { ant: AntKind, place: String },
    /// A deployment was declined for lack of food.
    DeployDeclined { ant: AntKind, cost: u32, food: u32 },
    /// An ant was withdrawn from the board.
    AntRemoved { ant: AntKind, place: String },
    /// A bee left the hive.
    BeeReleased { bee: BeeKind, place: String },
    /// An insect's armor reached zero.
    InsectDestroyed { label: String, place: Option<String> },
    /// The queen doubled an ant's damage.
    AntBuffed { ant: AntKind, place: String, damage: f64 },
    /// A status effect took hold on a bee.
    BeeAfflicted { bee: BeeKind, effect: StatusEffect },
    /// The game ended.
    GameOver { outcome: Outcome },
}
