//! Fundamental graph and simulation types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_TUNNELS, DEFAULT_TUNNEL_LENGTH};

/// Index of a place in the tunnel arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlaceId(pub usize);

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Turn counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameClock {
    /// Number of completed turns; also the index of the turn in progress.
    pub turn: u64,
}

impl GameClock {
    /// Advance by one turn.
    pub fn advance(&mut self) {
        self.turn += 1;
    }
}

/// Layout dimensions handed to the tunnel builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Number of parallel tunnels.
    pub tunnels: usize,
    /// Places per tunnel, not counting the base.
    pub length: usize,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            tunnels: DEFAULT_TUNNELS,
            length: DEFAULT_TUNNEL_LENGTH,
        }
    }
}
