//! Systems that operate on the board each turn.
//!
//! Systems are plain functions over `&mut Board` (or `&Board` for
//! read-only). Anything that can end the game returns a `Flow`.

pub mod ants;
pub mod bees;
pub mod cleanup;
pub mod damage;
pub mod hive;
pub mod occupancy;
pub mod snapshot;
