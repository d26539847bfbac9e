//! System trait and implementations
//!
//! A system is a named piece of per-tick logic that declares which component
//! kinds it needs. The [`SystemManager`](super::SystemManager) hands it only
//! the active entities carrying all of those kinds.

use super::{ComponentKind, Entity, EntityId};
use thiserror::Error;

/// System trait for processing entities and components
pub trait System {
    /// Unique name used for lookup and removal
    fn name(&self) -> &str;

    /// Component kinds every entity passed to [`update`](Self::update) carries
    fn required_components(&self) -> &[ComponentKind];

    /// Run one tick over the matching entities
    ///
    /// Components outside [`required_components`](Self::required_components)
    /// may or may not be present and must be treated as optional. An error
    /// aborts the rest of the tick.
    fn update(&mut self, entities: &mut [&mut Entity], delta_time: f32) -> Result<(), SystemError>;

    /// Called once when the system is added to a pipeline
    fn on_register(&mut self) {}

    /// Called once just before the system is removed from a pipeline
    fn on_remove(&mut self) {}
}

/// Errors raised by systems
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SystemError {
    /// A required component disappeared between filtering and use
    #[error("system '{system}': entity {entity} is missing component '{component}'")]
    MissingComponent {
        /// Failing system
        system: String,
        /// Offending entity
        entity: EntityId,
        /// Kind that was expected
        component: &'static str,
    },

    /// Game logic failure reported by the system itself
    #[error("system '{system}' failed: {reason}")]
    Failed {
        /// Failing system
        system: String,
        /// Description
        reason: String,
    },
}

impl SystemError {
    /// Shorthand for [`SystemError::MissingComponent`]
    pub fn missing(system: impl Into<String>, entity: EntityId, component: &'static str) -> Self {
        Self::MissingComponent {
            system: system.into(),
            entity,
            component,
        }
    }

    /// Shorthand for [`SystemError::Failed`]
    pub fn failed(system: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Failed {
            system: system.into(),
            reason: reason.into(),
        }
    }
}

type UpdateFn = dyn FnMut(&mut [&mut Entity], f32) -> Result<(), SystemError>;

/// System backed by a closure
///
/// Convenient for game-specific one-off logic that does not warrant its own
/// type.
pub struct FnSystem {
    name: String,
    required: Vec<ComponentKind>,
    update: Box<UpdateFn>,
}

impl FnSystem {
    /// Create a closure system
    pub fn new<F>(name: impl Into<String>, required: Vec<ComponentKind>, update: F) -> Self
    where
        F: FnMut(&mut [&mut Entity], f32) -> Result<(), SystemError> + 'static,
    {
        Self {
            name: name.into(),
            required,
            update: Box::new(update),
        }
    }
}

impl System for FnSystem {
    fn name(&self) -> &str {
        &self.name
    }

    fn required_components(&self) -> &[ComponentKind] {
        &self.required
    }

    fn update(&mut self, entities: &mut [&mut Entity], delta_time: f32) -> Result<(), SystemError> {
        (self.update)(entities, delta_time)
    }
}

impl std::fmt::Debug for FnSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnSystem")
            .field("name", &self.name)
            .field("required", &self.required)
            .finish_non_exhaustive()
    }
}
