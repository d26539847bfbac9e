//! Movement system
//!
//! Explicit Euler integration: `position += velocity * dt`.

use crate::component_kinds;
use crate::ecs::components::{TransformComponent, VelocityComponent};
use crate::ecs::{Component, ComponentKind, Entity, System, SystemError};

/// Integrates velocity into position
pub struct MovementSystem {
    required: Vec<ComponentKind>,
}

impl Default for MovementSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl MovementSystem {
    /// Registered name
    pub const NAME: &'static str = "movement";

    /// Create a movement system
    pub fn new() -> Self {
        Self {
            required: component_kinds![TransformComponent, VelocityComponent],
        }
    }
}

impl System for MovementSystem {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn required_components(&self) -> &[ComponentKind] {
        &self.required
    }

    fn update(&mut self, entities: &mut [&mut Entity], delta_time: f32) -> Result<(), SystemError> {
        for entity in entities.iter_mut() {
            let id = entity.id();
            let velocity = entity
                .get_component::<VelocityComponent>()
                .map(|velocity| velocity.linear)
                .ok_or_else(|| SystemError::missing(Self::NAME, id, VelocityComponent::NAME))?;
            let transform = entity
                .get_component_mut::<TransformComponent>()
                .ok_or_else(|| SystemError::missing(Self::NAME, id, TransformComponent::NAME))?;

            transform.position += velocity * delta_time;
        }
        Ok(())
    }
}
