//! Collision system
//!
//! Brute-force pairwise AABB test between every entity that has a transform
//! and a collision box. Results are written to each entity's
//! [`CollisionStateComponent`], which is attached on first contact check if
//! missing. Scenes in this engine hold at most a few hundred colliders, so
//! there is no broad phase.

use crate::component_kinds;
use crate::ecs::components::{CollisionBoxComponent, CollisionStateComponent, TransformComponent};
use crate::ecs::{Component, ComponentKind, Entity, EntityId, System, SystemError};
use crate::foundation::math::Vec3;
use std::collections::BTreeSet;

/// Detects overlaps between collision boxes
pub struct CollisionSystem {
    required: Vec<ComponentKind>,
}

impl Default for CollisionSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl CollisionSystem {
    /// Registered name
    pub const NAME: &'static str = "collision";

    /// Create a collision system
    pub fn new() -> Self {
        Self {
            required: component_kinds![TransformComponent, CollisionBoxComponent],
        }
    }
}

impl System for CollisionSystem {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn required_components(&self) -> &[ComponentKind] {
        &self.required
    }

    fn update(&mut self, entities: &mut [&mut Entity], _delta_time: f32) -> Result<(), SystemError> {
        let mut colliders: Vec<(EntityId, Vec3, CollisionBoxComponent)> = Vec::with_capacity(entities.len());
        for entity in entities.iter() {
            let id = entity.id();
            let position = entity
                .get_component::<TransformComponent>()
                .map(|transform| transform.position)
                .ok_or_else(|| SystemError::missing(Self::NAME, id, TransformComponent::NAME))?;
            let collider = *entity
                .get_component::<CollisionBoxComponent>()
                .ok_or_else(|| SystemError::missing(Self::NAME, id, CollisionBoxComponent::NAME))?;
            colliders.push((id, position, collider));
        }

        let mut contacts: Vec<BTreeSet<EntityId>> = vec![BTreeSet::new(); colliders.len()];
        for (i, (id_a, pos_a, box_a)) in colliders.iter().enumerate() {
            for (j, (id_b, pos_b, box_b)) in colliders.iter().enumerate().skip(i + 1) {
                if box_a.can_collide_with(box_b) && box_a.overlaps(pos_a, box_b, pos_b) {
                    contacts[i].insert(*id_b);
                    contacts[j].insert(*id_a);
                }
            }
        }

        for (entity, touching) in entities.iter_mut().zip(contacts) {
            if !entity.has_component::<CollisionStateComponent>() {
                entity.add_component(CollisionStateComponent::default());
            }
            if let Some(state) = entity.get_component_mut::<CollisionStateComponent>() {
                state.update_contacts(touching);
            }
        }
        Ok(())
    }
}
