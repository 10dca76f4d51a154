//! ECS error types

use super::Entity;
use thiserror::Error;

/// Errors surfaced by the component store and entity lookups
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EcsError {
    /// The entity does not hold a component of the requested type
    #[error("{entity} has no {component} component")]
    MissingComponent {
        /// Entity that was queried
        entity: Entity,
        /// Component type name
        component: &'static str,
    },

    /// The entity already holds a component of this type
    #[error("{entity} already has a {component} component")]
    DuplicateComponent {
        /// Entity that was targeted
        entity: Entity,
        /// Component type name
        component: &'static str,
    },

    /// The entity was never created by this world
    #[error("{0} does not exist in this world")]
    UnknownEntity(Entity),

    /// No entity carries the requested name
    #[error("no entity named '{0}'")]
    EntityNotFound(String),
}
