//! Lifetime system
//!
//! Counts lifetimes down and deactivates entities whose time ran out. The
//! entity stays indexed; games that want it gone call
//! [`EntityManager::destroy_entity`](crate::ecs::EntityManager::destroy_entity)
//! for inactive ids, or just let it sit out of every query.

use crate::component_kinds;
use crate::ecs::components::LifetimeComponent;
use crate::ecs::{ComponentKind, Entity, System, SystemError};

/// Expires entities with a [`LifetimeComponent`]
pub struct LifetimeSystem {
    required: Vec<ComponentKind>,
}

impl Default for LifetimeSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl LifetimeSystem {
    /// Registered name
    pub const NAME: &'static str = "lifetime";

    /// Create a lifetime system
    pub fn new() -> Self {
        Self {
            required: component_kinds![LifetimeComponent],
        }
    }
}

impl System for LifetimeSystem {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn required_components(&self) -> &[ComponentKind] {
        &self.required
    }

    fn update(&mut self, entities: &mut [&mut Entity], delta_time: f32) -> Result<(), SystemError> {
        for entity in entities.iter_mut() {
            let Some(lifetime) = entity.get_component_mut::<LifetimeComponent>() else {
                continue;
            };
            lifetime.remaining -= delta_time;

            if lifetime.is_expired() {
                log::trace!("Entity {} expired", entity.id());
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
    fn test_expires_after_cumulative_duration() {
        let mut manager = EntityManager::new();
        manager.add_system(Box::new(LifetimeSystem::new()));
        let id = manager
            .create_entity(Some("spark"))
            .add_component(LifetimeComponent::new(1.0))
            .id();

        manager.update(0.5).unwrap();
        assert!(manager.get_entity(id).unwrap().is_active());

        manager.update(0.6).unwrap();
        let entity = manager.get_entity(id).unwrap();
        assert!(!entity.is_active());
        assert!(entity.get_component::<LifetimeComponent>().unwrap().is_expired());
    }

    #[test]
    fn test_inactive_entity_stops_counting() {
        let mut manager = EntityManager::new();
        manager.add_system(Box::new(LifetimeSystem::new()));
        let id = manager
            .create_entity(None)
            .add_component(LifetimeComponent::new(0.1))
            .id();

        manager.update(0.2).unwrap();
        let after_expiry = manager.get_entity(id).unwrap().get_component::<LifetimeComponent>().unwrap().remaining;

        manager.update(0.2).unwrap();
        let later = manager.get_entity(id).unwrap().get_component::<LifetimeComponent>().unwrap().remaining;
        assert_eq!(after_expiry, later);
    }
}
