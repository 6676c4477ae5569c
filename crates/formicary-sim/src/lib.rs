//! Simulation engine for FORMICARY.
//!
//! Owns the hecs ECS world and the tunnel graph, runs the per-turn
//! systems in a fixed order, and produces `ColonySnapshot`s.

pub mod assault;
pub mod board;
pub mod components;
pub mod engine;
pub mod layout;
pub mod scenario;
pub mod strategy;
pub mod systems;
pub mod tunnel;
pub mod world_setup;

pub use assault::{AssaultPlan, BeeSpawn};
pub use board::{Flow, InsectDeath};
pub use engine::{Colony, SimConfig};
pub use formicary_core as core;
pub use strategy::{Passive, ScriptedStrategy, Strategy};
pub use tunnel::{Place, Tunnel};

#[cfg(test)]
mod tests;
