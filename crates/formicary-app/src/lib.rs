//! FORMICARY command-line application.
//!
//! Wires the simulation crates to a headless runner: options are parsed
//! into a `RunConfig`, and the game loop plays and prints each turn.

pub mod config;
pub mod game_loop;

pub use formicary_core as core;
