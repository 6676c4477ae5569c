//! Placement commands issued by scripted strategies.

use serde::{Deserialize, Serialize};

/// A single placement action against the colony.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlacementCommand {
    /// Deploy an ant of the named type at the named place.
    Deploy { place: String, ant: String },
    /// Withdraw whatever ant is visible at the named place.
    Remove { place: String },
}

/// A command bound to the turn at which it should be issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledCommand {
    pub turn: u64,
    #[serde(flatten)]
    pub command: PlacementCommand,
}
