//! Command-line options and the run configuration built from them.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use thiserror::Error;

use formicary_core::commands::ScheduledCommand;
use formicary_core::constants::{DEFAULT_FOOD, DEFAULT_SEED, DEFAULT_TUNNELS, DEFAULT_TUNNEL_LENGTH};
use formicary_core::enums::Difficulty;
use formicary_core::types::Dimensions;
use formicary_sim::engine::SimConfig;

/// Headless ants-vs-bees runner
#[derive(Parser, Debug, Clone)]
#[command(name = "formicary")]
#[command(about = "Play a tower-defense game of ants against bees, turn by turn")]
pub struct Args {
    /// Assault plan preset
    #[arg(long, value_enum, default_value_t = DifficultyArg::Easy)]
    pub difficulty: DifficultyArg,

    /// Tunnel layout
    #[arg(long, value_enum, default_value_t = LayoutArg::Wet)]
    pub layout: LayoutArg,

    /// Number of tunnels
    #[arg(long, default_value_t = DEFAULT_TUNNELS)]
    pub tunnels: usize,

    /// Places per tunnel
    #[arg(long, default_value_t = DEFAULT_TUNNEL_LENGTH)]
    pub length: usize,

    /// Starting food
    #[arg(long, default_value_t = DEFAULT_FOOD)]
    pub food: u32,

    /// Random seed for deterministic runs
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// JSON file with scheduled placement commands
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Give up after this many turns
    #[arg(long, default_value_t = 500)]
    pub max_turns: u64,

    /// Log every insect action
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Print one JSON snapshot per turn instead of status lines
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DifficultyArg {
    Test,
    Easy,
    Normal,
    Hard,
    ExtraHard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Test => Difficulty::Test,
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Normal => Difficulty::Normal,
            DifficultyArg::Hard => Difficulty::Hard,
            DifficultyArg::ExtraHard => Difficulty::ExtraHard,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LayoutArg {
    Wet,
    Dry,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read script {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid script {}: {source}", .path.display())]
    Script {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("tunnels and length must both be at least 1")]
    EmptyLayout,
}

/// Everything needed to set up and play one game.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub difficulty: Difficulty,
    pub layout: LayoutArg,
    pub dimensions: Dimensions,
    pub sim: SimConfig,
    pub script: Vec<ScheduledCommand>,
    pub max_turns: u64,
    pub json: bool,
}

impl RunConfig {
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        if args.tunnels == 0 || args.length == 0 {
            return Err(ConfigError::EmptyLayout);
        }
        let script = match &args.script {
            Some(path) => load_script(path)?,
            None => Vec::new(),
        };

        Ok(Self {
            difficulty: args.difficulty.into(),
            layout: args.layout,
            dimensions: Dimensions {
                tunnels: args.tunnels,
                length: args.length,
            },
            sim: SimConfig {
                seed: args.seed,
                food: args.food,
            },
            script,
            max_turns: args.max_turns,
            json: args.json,
        })
    }
}

/// Read a JSON array of scheduled commands.
pub fn load_script(path: &Path) -> Result<Vec<ScheduledCommand>, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_script(&text).map_err(|source| ConfigError::Script {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_script(text: &str) -> Result<Vec<ScheduledCommand>, serde_json::Error> {
    serde_json::from_str(text)
}
