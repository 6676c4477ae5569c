//! Headless game loop: builds the colony, plays turns, and reports them.
//!
//! Each turn is written to `out` as the colony status line, or as one
//! JSON snapshot per line in `--json` mode.

use std::io::{self, Write};

use thiserror::Error;

use formicary_core::enums::{AntKind, Outcome};
use formicary_core::error::ColonyError;
use formicary_sim::engine::Colony;
use formicary_sim::layout::{dry_layout, wet_layout};
use formicary_sim::scenario::build_plan;
use formicary_sim::strategy::ScriptedStrategy;

use crate::config::{LayoutArg, RunConfig};

#[derive(Debug, Error)]
pub enum RunError {
    #[error("cannot set up the colony: {0}")]
    Colony(#[from] ColonyError),

    #[error("cannot write output: {0}")]
    Io(#[from] io::Error),

    #[error("cannot encode snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

/// Build the colony described by `config`.
pub fn build_colony(config: &RunConfig) -> Result<Colony, ColonyError> {
    let plan = build_plan(config.difficulty);
    let strategy = ScriptedStrategy::new(config.script.clone());
    let layout = match config.layout {
        LayoutArg::Wet => wet_layout,
        LayoutArg::Dry => dry_layout,
    };
    Colony::new(
        strategy,
        &plan,
        &AntKind::ALL,
        layout,
        config.dimensions,
        config.sim,
    )
}

/// Play until the game is decided or the turn limit runs out.
pub fn run(config: &RunConfig, out: &mut impl Write) -> Result<Option<Outcome>, RunError> {
    let mut colony = build_colony(config)?;
    tracing::info!(
        "starting {:?} game, seed {}, {} bees",
        config.difficulty,
        config.sim.seed,
        colony.bees_remaining()
    );

    for _ in 0..config.max_turns {
        let snapshot = colony.turn();
        if config.json {
            serde_json::to_writer(&mut *out, &snapshot)?;
            writeln!(out)?;
        } else {
            writeln!(out, "{colony}")?;
        }
        if let Some(outcome) = snapshot.phase.outcome() {
            if !config.json {
                writeln!(out, "{}", outcome_message(outcome))?;
            }
            return Ok(Some(outcome));
        }
    }

    tracing::warn!("no winner after {} turns", config.max_turns);
    Ok(None)
}

pub fn outcome_message(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::AntsWin => "All bees are vanquished. You win!",
        Outcome::BeesWin => "The ant queen has perished. Please try again.",
    }
}

/// 0 when the ants win, 1 when the bees win, 2 when undecided.
pub fn exit_code(outcome: Option<Outcome>) -> u8 {
    match outcome {
        Some(Outcome::AntsWin) => 0,
        Some(Outcome::BeesWin) => 1,
        None => 2,
    }
}
