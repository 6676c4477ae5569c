//! Components that refer to other entities, and so live beside the ECS.

use hecs::Entity;

/// Attached to ants that can conceal another ant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Container {
    pub contained: Option<Entity>,
}
