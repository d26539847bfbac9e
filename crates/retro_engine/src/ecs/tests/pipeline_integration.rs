//! Integration tests for the system pipeline running over an entity store
//!
//! Covers cross-system visibility within one tick and the interaction of the
//! built-in systems with deferred destruction.

use crate::component_kinds;
use crate::ecs::components::{
    CollisionBoxComponent, CollisionStateComponent, HealthComponent, LifetimeComponent,
    TransformFactory, VelocityComponent, VelocityFactory,
};
use crate::ecs::systems::{CollisionSystem, HealthSystem, LifetimeSystem, MovementSystem};
use crate::ecs::{EntityId, EntityManager, FnSystem};
use crate::foundation::math::Vec3;
use approx::assert_relative_eq;
use std::cell::RefCell;
use std::rc::Rc;

fn recorder(name: &str, seen: &Rc<RefCell<Vec<EntityId>>>) -> FnSystem {
    let sink = seen.clone();
    FnSystem::new(name, component_kinds![VelocityComponent], move |entities, _| {
        sink.borrow_mut().extend(entities.iter().map(|entity| entity.id()));
        Ok(())
    })
}

#[test]
fn test_earlier_deactivation_hides_entity_from_later_system() {
    let mut world = EntityManager::new();
    let kept = world.create_entity(None).add_component(VelocityComponent::default()).id();
    let paused = world.create_entity(None).add_component(VelocityComponent::default()).id();

    world.add_system(Box::new(FnSystem::new(
        "pause",
        component_kinds![VelocityComponent],
        move |entities, _| {
            for entity in entities.iter_mut().filter(|entity| entity.id() == paused) {
                entity.set_active(false);
            }
            Ok(())
        },
    )));
    let seen = Rc::new(RefCell::new(Vec::new()));
    world.add_system(Box::new(recorder("observe", &seen)));

    world.update(0.016).unwrap();

    assert_eq!(*seen.borrow(), vec![kept]);
}

#[test]
fn test_earlier_component_add_is_seen_by_later_system() {
    let mut world = EntityManager::new();
    let id = world.create_entity(None).id();

    world.add_system(Box::new(FnSystem::new("launch", Vec::new(), |entities, _| {
        for entity in entities.iter_mut() {
            entity.add_component(VelocityFactory::linear(1.0, 0.0, 0.0));
        }
        Ok(())
    })));
    let seen = Rc::new(RefCell::new(Vec::new()));
    world.add_system(Box::new(recorder("observe", &seen)));

    world.update(0.016).unwrap();

    assert_eq!(*seen.borrow(), vec![id]);
}

#[test]
fn test_failing_system_stops_rest_of_tick() {
    let mut world = EntityManager::new();
    world.create_entity(None).add_component(VelocityComponent::default());

    world.add_system(Box::new(FnSystem::new("reject", Vec::new(), |_, _| {
        Err(crate::ecs::SystemError::failed("reject", "bad state"))
    })));
    let seen = Rc::new(RefCell::new(Vec::new()));
    world.add_system(Box::new(recorder("observe", &seen)));

    assert!(world.update(0.016).is_err());
    assert!(seen.borrow().is_empty());
}

#[test]
fn test_expired_particle_can_be_destroyed_next_tick() {
    let mut world = EntityManager::new();
    let particle = world
        .create_entity(Some("particle"))
        .add_component(TransformFactory::at(0.0, 0.0, 0.0))
        .add_component(VelocityFactory::linear(10.0, 0.0, 0.0))
        .add_component(LifetimeComponent::new(1.0))
        .id();
    world.add_system(Box::new(MovementSystem::new()));
    world.add_system(Box::new(LifetimeSystem::new()));

    world.update(0.5).unwrap();
    assert!(world.get_entity(particle).unwrap().is_active());

    world.update(0.6).unwrap();
    let entity = world.get_entity(particle).unwrap();
    assert!(!entity.is_active());
    let position = entity
        .get_component::<crate::ecs::components::TransformComponent>()
        .unwrap()
        .position;
    assert_relative_eq!(position, Vec3::new(11.0, 0.0, 0.0), epsilon = 1e-5);

    world.update(0.5).unwrap();
    let position = world
        .get_entity(particle)
        .unwrap()
        .get_component::<crate::ecs::components::TransformComponent>()
        .unwrap()
        .position;
    assert_relative_eq!(position, Vec3::new(11.0, 0.0, 0.0), epsilon = 1e-5);

    let inactive: Vec<_> = world
        .entities()
        .filter(|entity| !entity.is_active())
        .map(|entity| entity.id())
        .collect();
    for id in inactive {
        world.destroy_entity(id);
    }
    assert_eq!(world.entity_count(), 1);
    world.update(0.016).unwrap();
    assert_eq!(world.entity_count(), 0);
}

#[test]
fn test_collision_damage_then_health_check_in_one_tick() {
    let mut world = EntityManager::new();
    let player = world
        .create_entity(Some("player"))
        .add_component(TransformFactory::at(0.0, 0.0, 0.0))
        .add_component(CollisionBoxComponent::new(16.0, 16.0))
        .add_component(HealthComponent::new(1))
        .id();
    let spike = world
        .create_entity(Some("hazard"))
        .add_component(TransformFactory::at(8.0, 0.0, 0.0))
        .add_component(CollisionBoxComponent::new(16.0, 16.0))
        .id();

    world.add_system(Box::new(CollisionSystem::new()));
    world.add_system(Box::new(FnSystem::new(
        "hazards",
        component_kinds![CollisionStateComponent, HealthComponent],
        move |entities, _| {
            for entity in entities.iter_mut() {
                let touched = entity
                    .get_component::<CollisionStateComponent>()
                    .is_some_and(|state| state.just_collided_with(spike));
                if touched {
                    if let Some(health) = entity.get_component_mut::<HealthComponent>() {
                        health.damage(1);
                    }
                }
            }
            Ok(())
        },
    )));
    world.add_system(Box::new(HealthSystem::new()));

    world.update(0.016).unwrap();

    let entity = world.get_entity(player).unwrap();
    assert!(entity.get_component::<HealthComponent>().unwrap().is_dead());
    assert!(!entity.is_active());
    assert!(world.get_entity(spike).unwrap().is_active());
}
