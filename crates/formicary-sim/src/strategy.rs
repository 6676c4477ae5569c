//! Placement policies consulted at the start of every turn.

use formicary_core::commands::{PlacementCommand, ScheduledCommand};

use crate::engine::Colony;

/// Deploys or withdraws ants once per turn.
///
/// Entity handles obtained here are valid for the current turn only.
pub trait Strategy {
    fn deploy(&mut self, colony: &mut Colony);
}

impl<F> Strategy for F
where
    F: FnMut(&mut Colony),
{
    fn deploy(&mut self, colony: &mut Colony) {
        self(colony)
    }
}

/// Does nothing; the colony defends with whatever it already has.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passive;

impl Strategy for Passive {
    fn deploy(&mut self, _colony: &mut Colony) {}
}

/// Replays a fixed list of placement commands, each on its turn.
#[derive(Debug, Clone, Default)]
pub struct ScriptedStrategy {
    commands: Vec<ScheduledCommand>,
    next: usize,
}

impl ScriptedStrategy {
    pub fn new(mut commands: Vec<ScheduledCommand>) -> Self {
        commands.sort_by_key(|c| c.turn);
        Self { commands, next: 0 }
    }

    /// Commands not issued yet.
    pub fn pending(&self) -> &[ScheduledCommand] {
        &self.commands[self.next..]
    }
}

impl Strategy for ScriptedStrategy {
    fn deploy(&mut self, colony: &mut Colony) {
        let turn = colony.time();
        while let Some(scheduled) = self.commands.get(self.next) {
            if scheduled.turn > turn {
                break;
            }
            self.next += 1;
            if scheduled.turn < turn {
                tracing::warn!("skipping command for past turn {}", scheduled.turn);
                continue;
            }

            let result = match &scheduled.command {
                PlacementCommand::Deploy { place, ant } => colony.deploy_ant(place, ant).map(drop),
                PlacementCommand::Remove { place } => colony.remove_ant(place),
            };
            if let Err(err) = result {
                tracing::warn!("turn {turn}: {err}");
            }
        }
    }
}
