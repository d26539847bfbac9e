//! Health system
//!
//! Deactivates entities that ran out of hit points.

use crate::component_kinds;
use crate::ecs::components::HealthComponent;
use crate::ecs::{ComponentKind, Entity, System, SystemError};

/// Retires dead entities
pub struct HealthSystem {
    required: Vec<ComponentKind>,
}

impl Default for HealthSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl HealthSystem {
    /// Registered name
    pub const NAME: &'static str = "health";

    /// Create a health system
    pub fn new() -> Self {
        Self {
            required: component_kinds![HealthComponent],
        }
    }
}

impl System for HealthSystem {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn required_components(&self) -> &[ComponentKind] {
        &self.required
    }

    fn update(&mut self, entities: &mut [&mut Entity], _delta_time: f32) -> Result<(), SystemError> {
        for entity in entities.iter_mut() {
            let dead = entity
                .get_component::<HealthComponent>()
                .is_some_and(HealthComponent::is_dead);
            if dead {
                log::debug!("Entity {} ran out of health", entity.id());
                entity.set_active(false);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::EntityManager;

    #[test]
    fn test_dead_entities_are_deactivated() {
        let mut manager = EntityManager::new();
        manager.add_system(Box::new(HealthSystem::new()));
        let alive = manager.create_entity(None).add_component(HealthComponent::new(2)).id();
        let doomed = manager.create_entity(None).add_component(HealthComponent::new(1)).id();

        manager
            .get_entity_mut(doomed)
            .and_then(|entity| entity.get_component_mut::<HealthComponent>())
            .unwrap()
            .damage(1);
        manager.update(0.016).unwrap();

        assert!(manager.get_entity(alive).unwrap().is_active());
        assert!(!manager.get_entity(doomed).unwrap().is_active());
    }
}
