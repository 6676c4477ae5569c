//! The place graph: an arena of places linked by exits and entrances.
//!
//! Places are addressed by `PlaceId` and by name. An exit is fixed when
//! the place is registered, and the exit's entrance is set in the same
//! step, so the back-links can never drift out of sync.

use std::collections::HashMap;

use hecs::Entity;

use formicary_core::constants::{BASE_NAME, HIVE_NAME};
use formicary_core::enums::PlaceKind;
use formicary_core::error::{ColonyError, Result};
use formicary_core::types::PlaceId;

/// A node of the tunnel graph and its occupants.
#[derive(Debug, Clone)]
pub struct Place {
    pub name: String,
    pub kind: PlaceKind,
    exit: Option<PlaceId>,
    entrance: Option<PlaceId>,
    /// The visible ant. A container here may conceal a second one.
    pub(crate) ant: Option<Entity>,
    pub(crate) bees: Vec<Entity>,
}

impl Place {
    fn new(name: String, kind: PlaceKind, exit: Option<PlaceId>) -> Self {
        Self {
            name,
            kind,
            exit,
            entrance: None,
            ant: None,
            bees: Vec::new(),
        }
    }

    /// The place a bee moves to when it advances.
    pub fn exit(&self) -> Option<PlaceId> {
        self.exit
    }

    /// The place a bee arrives from; throwers look this way.
    pub fn entrance(&self) -> Option<PlaceId> {
        self.entrance
    }

    pub fn ant(&self) -> Option<Entity> {
        self.ant
    }

    pub fn bees(&self) -> &[Entity] {
        &self.bees
    }
}

/// Arena of every place in one colony.
#[derive(Debug, Clone)]
pub struct Tunnel {
    places: Vec<Place>,
    by_name: HashMap<String, PlaceId>,
    hive: PlaceId,
    base: PlaceId,
    bee_entrances: Vec<PlaceId>,
}

impl Default for Tunnel {
    fn default() -> Self {
        Self::new()
    }
}

impl Tunnel {
    /// A graph holding only the hive and the base.
    pub fn new() -> Self {
        let mut tunnel = Self {
            places: Vec::new(),
            by_name: HashMap::new(),
            hive: PlaceId(0),
            base: PlaceId(0),
            bee_entrances: Vec::new(),
        };
        tunnel.hive = tunnel.insert(Place::new(HIVE_NAME.to_string(), PlaceKind::Hive, None));
        tunnel.base = tunnel.insert(Place::new(BASE_NAME.to_string(), PlaceKind::Base, None));
        tunnel
    }

    /// Register a place whose exit is `exit`.
    ///
    /// The exit's entrance becomes the new place, except for the base,
    /// which is fed by every tunnel and keeps no entrance. A bee entrance
    /// gets the hive as its own entrance. Names must be unique and the
    /// exit must already be registered.
    pub fn add_place(
        &mut self,
        name: impl Into<String>,
        kind: PlaceKind,
        exit: Option<PlaceId>,
        bee_entrance: bool,
    ) -> Result<PlaceId> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(ColonyError::DuplicatePlace(name));
        }
        if let Some(exit) = exit {
            if self.get(exit).is_none() {
                return Err(ColonyError::UnknownPlace(format!("{exit:?}")));
            }
        }
        let id = self.insert(Place::new(name, kind, exit));

        if let Some(exit) = exit {
            if exit != self.base {
                self.places[exit.0].entrance = Some(id);
            }
        }
        if bee_entrance {
            self.places[id.0].entrance = Some(self.hive);
            self.bee_entrances.push(id);
        }
        Ok(id)
    }

    fn insert(&mut self, place: Place) -> PlaceId {
        let id = PlaceId(self.places.len());
        self.by_name.insert(place.name.clone(), id);
        self.places.push(place);
        id
    }

    pub fn hive(&self) -> PlaceId {
        self.hive
    }

    pub fn base(&self) -> PlaceId {
        self.base
    }

    /// Places bees are released into, in registration order.
    pub fn bee_entrances(&self) -> &[PlaceId] {
        &self.bee_entrances
    }

    /// The place behind `id`, if it belongs to this tunnel.
    pub fn get(&self, id: PlaceId) -> Option<&Place> {
        self.places.get(id.0)
    }

    /// Panics on an id from another tunnel.
    pub fn place(&self, id: PlaceId) -> &Place {
        &self.places[id.0]
    }

    pub(crate) fn place_mut(&mut self, id: PlaceId) -> &mut Place {
        &mut self.places[id.0]
    }

    pub fn find(&self, name: &str) -> Option<PlaceId> {
        self.by_name.get(name).copied()
    }

    /// Like `find`, but an unknown name is an error.
    pub fn lookup(&self, name: &str) -> Result<PlaceId> {
        self.find(name)
            .ok_or_else(|| ColonyError::UnknownPlace(name.to_string()))
    }

    pub fn name(&self, id: PlaceId) -> &str {
        &self.places[id.0].name
    }

    /// All places in registration order: hive, base, then the layout.
    pub fn places(&self) -> impl Iterator<Item = (PlaceId, &Place)> {
        self.places
            .iter()
            .enumerate()
            .map(|(i, place)| (PlaceId(i), place))
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}
