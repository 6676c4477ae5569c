//! Errors surfaced by colony placement and removal.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColonyError {
    /// A second uncontained ant was placed where one already stands.
    #[error("Two ants in {place}")]
    Occupied { place: String },

    /// Removal targeted an insect that is not at the place.
    #[error("{insect} is not in {place}")]
    NotPresent { insect: String, place: String },

    /// Ants cannot stand in the base or the hive, and only planned waves
    /// wait in the hive.
    #[error("Cannot add {insect} to {place}")]
    Uninhabitable { insect: String, place: String },

    #[error("No place named {0}")]
    UnknownPlace(String),

    /// A layout registered the same place name twice.
    #[error("Place {0} already exists")]
    DuplicatePlace(String),

    /// Bees are planned but the layout gives them no way in.
    #[error("{0} bees planned but no place is a bee entrance")]
    NoBeeEntrance(usize),

    #[error("No ant type named {0}")]
    UnknownAntType(String),

    /// The entity handle is stale or belongs to another colony.
    #[error("No insect {0} in this colony")]
    NoSuchInsect(String),
}

pub type Result<T> = std::result::Result<T, ColonyError>;
