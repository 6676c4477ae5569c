//! Insect behavior rules for FORMICARY.
//!
//! Holds the kind catalog (per-kind stats and behavior tags) and the
//! pure decision functions the engine's systems consult each turn.
//! No ECS dependency; everything here operates on plain data.

pub mod profiles;
pub mod rules;

pub use formicary_core as core;
