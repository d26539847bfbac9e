//! Collision detection components for ECS
//!
//! [`CollisionBoxComponent`] is configuration: an axis-aligned box relative
//! to the entity's transform plus layer filtering. [`CollisionStateComponent`]
//! is written by the collision system every tick.

use crate::ecs::{Component, EntityId};
use crate::foundation::math::{Vec2, Vec3};
use std::collections::BTreeSet;

/// Axis-aligned collision box on the screen plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionBoxComponent {
    /// Box extent
    pub size: Vec2,

    /// Offset of the box's top-left corner from the transform position
    pub offset: Vec2,

    /// Collision layer bitmask (what layer is this entity on?)
    pub layer: u32,

    /// Collision mask (what layers can this entity collide with?)
    pub mask: u32,

    /// Trigger volumes report overlaps but games usually skip physical response
    pub is_trigger: bool,
}

impl Component for CollisionBoxComponent {
    const NAME: &'static str = "collision_box";
}

impl CollisionBoxComponent {
    /// Box on every layer, colliding with every layer
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            offset: Vec2::zeros(),
            layer: u32::MAX,
            mask: u32::MAX,
            is_trigger: false,
        }
    }

    /// Builder pattern: Set offset
    pub fn with_offset(mut self, x: f32, y: f32) -> Self {
        self.offset = Vec2::new(x, y);
        self
    }

    /// Builder pattern: Set layer and mask
    pub fn with_layers(mut self, layer: u32, mask: u32) -> Self {
        self.layer = layer;
        self.mask = mask;
        self
    }

    /// Mark this as a trigger volume
    pub fn as_trigger(mut self) -> Self {
        self.is_trigger = true;
        self
    }

    /// `(min, max)` corners for an entity at `position`
    ///
    /// Negative sizes are normalised so `min <= max` always holds.
    pub fn aabb(&self, position: &Vec3) -> (Vec2, Vec2) {
        let p0 = Vec2::new(position.x, position.y) + self.offset;
        let p1 = p0 + self.size;
        (p0.inf(&p1), p0.sup(&p1))
    }

    /// Layer filtering in both directions
    pub fn can_collide_with(&self, other: &Self) -> bool {
        (self.mask & other.layer) != 0 && (other.mask & self.layer) != 0
    }

    /// Strict AABB overlap; touching edges do not count
    pub fn overlaps(&self, position: &Vec3, other: &Self, other_position: &Vec3) -> bool {
        let (min_a, max_a) = self.aabb(position);
        let (min_b, max_b) = other.aabb(other_position);
        min_a.x < max_b.x && max_a.x > min_b.x && min_a.y < max_b.y && max_a.y > min_b.y
    }
}

/// Current collision state of an entity
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CollisionStateComponent {
    /// All entities we're currently colliding with
    pub colliding_with: BTreeSet<EntityId>,

    /// Entities we started colliding with this tick
    pub collision_entered: Vec<EntityId>,

    /// Entities we stopped colliding with this tick
    pub collision_exited: Vec<EntityId>,
}

impl Component for CollisionStateComponent {
    const NAME: &'static str = "collision_state";
}

impl CollisionStateComponent {
    /// Check if we're currently colliding with any entity
    pub fn is_colliding(&self) -> bool {
        !self.colliding_with.is_empty()
    }

    /// Check if we're colliding with a specific entity
    pub fn is_colliding_with(&self, entity: EntityId) -> bool {
        self.colliding_with.contains(&entity)
    }

    /// Check if we just started colliding with a specific entity this tick
    pub fn just_collided_with(&self, entity: EntityId) -> bool {
        self.collision_entered.contains(&entity)
    }

    /// Replace the contact set, recording what entered and exited
    pub fn update_contacts(&mut self, contacts: BTreeSet<EntityId>) {
        self.collision_entered = contacts.difference(&self.colliding_with).copied().collect();
        self.collision_exited = self.colliding_with.difference(&contacts).copied().collect();
        self.colliding_with = contacts;
    }
}
