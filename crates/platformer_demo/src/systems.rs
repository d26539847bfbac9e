//! Game-specific systems

use crate::components::{GravityComponent, PatrolComponent};
use retro_engine::prelude::*;

/// Turns patrolling enemies around at the ends of their route
pub struct PatrolSystem {
    required: Vec<ComponentKind>,
}

impl Default for PatrolSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl PatrolSystem {
    /// Create a patrol system
    pub fn new() -> Self {
        Self {
            required: component_kinds![PatrolComponent, TransformComponent, VelocityComponent],
        }
    }
}

impl System for PatrolSystem {
    fn name(&self) -> &str {
        "patrol"
    }

    fn required_components(&self) -> &[ComponentKind] {
        &self.required
    }

    fn update(&mut self, entities: &mut [&mut Entity], _delta_time: f32) -> Result<(), SystemError> {
        for entity in entities.iter_mut() {
            let id = entity.id();
            let patrol = entity
                .get_component::<PatrolComponent>()
                .cloned()
                .ok_or_else(|| SystemError::missing("patrol", id, PatrolComponent::NAME))?;
            let x = entity
                .get_component::<TransformComponent>()
                .map(|transform| transform.position.x)
                .ok_or_else(|| SystemError::missing("patrol", id, TransformComponent::NAME))?;

            let velocity = entity
                .get_component_mut::<VelocityComponent>()
                .ok_or_else(|| SystemError::missing("patrol", id, VelocityComponent::NAME))?;

            if x >= patrol.home_x + patrol.range {
                velocity.linear.x = -patrol.speed;
            } else if x <= patrol.home_x - patrol.range {
                velocity.linear.x = patrol.speed;
            } else if velocity.linear.x == 0.0 {
                velocity.linear.x = patrol.speed;
            }
        }
        Ok(())
    }
}

/// Applies gravity and stops falling entities at the floor
pub struct GravitySystem {
    required: Vec<ComponentKind>,
}

impl Default for GravitySystem {
    fn default() -> Self {
        Self::new()
    }
}

impl GravitySystem {
    /// Create a gravity system
    pub fn new() -> Self {
        Self {
            required: component_kinds![GravityComponent, TransformComponent, VelocityComponent],
        }
    }
}

impl System for GravitySystem {
    fn name(&self) -> &str {
        "gravity"
    }

    fn required_components(&self) -> &[ComponentKind] {
        &self.required
    }

    fn update(&mut self, entities: &mut [&mut Entity], delta_time: f32) -> Result<(), SystemError> {
        for entity in entities.iter_mut() {
            let Some(gravity) = entity.get_component::<GravityComponent>().copied() else {
                continue;
            };

            let on_floor = entity
                .get_component_mut::<TransformComponent>()
                .map(|transform| {
                    if transform.position.y >= gravity.floor_y {
                        transform.position.y = gravity.floor_y;
                        true
                    } else {
                        false
                    }
                })
                .unwrap_or(false);

            if let Some(velocity) = entity.get_component_mut::<VelocityComponent>() {
                if on_floor && velocity.linear.y > 0.0 {
                    velocity.linear.y = 0.0;
                } else if !on_floor {
                    velocity.linear.y += gravity.strength * delta_time;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor_walker(world: &mut EntityManager) -> EntityId {
        world
            .create_entity(Some("enemy"))
            .add_component(TransformFactory::at(100.0, 208.0, 0.0))
            .add_component(VelocityComponent::default())
            .add_component(PatrolComponent::new(100.0, 10.0, 30.0))
            .add_component(GravityComponent::default())
            .id()
    }

    #[test]
    fn test_default_systems_match_new() {
        assert_eq!(PatrolSystem::default().required_components(), PatrolSystem::new().required_components());
        assert_eq!(GravitySystem::default().required_components(), GravitySystem::new().required_components());
    }

    #[test]
    fn test_patrol_turns_at_route_end() {
        let mut world = EntityManager::new();
        let id = floor_walker(&mut world);
        world.add_system(Box::new(PatrolSystem::default()));
        world.add_system(Box::new(MovementSystem::new()));

        world.update(0.1).unwrap();
        let velocity = world.get_entity(id).unwrap().get_component::<VelocityComponent>().unwrap().linear.x;
        assert!((velocity - 30.0).abs() < f32::EPSILON);

        world.update(0.5).unwrap();
        world.update(0.016).unwrap();
        let velocity = world.get_entity(id).unwrap().get_component::<VelocityComponent>().unwrap().linear.x;
        assert!((velocity + 30.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_gravity_holds_entity_on_floor() {
        let mut world = EntityManager::new();
        let id = floor_walker(&mut world);
        world.add_system(Box::new(GravitySystem::default()));
        world.add_system(Box::new(MovementSystem::new()));

        world.update(0.1).unwrap();

        let entity = world.get_entity(id).unwrap();
        assert!(entity.get_component::<VelocityComponent>().unwrap().linear.y.abs() < f32::EPSILON);
        assert!((entity.get_component::<TransformComponent>().unwrap().position.y - 208.0).abs() < f32::EPSILON);
    }
}
