//! Velocity component

use crate::ecs::Component;
use crate::foundation::math::Vec3;

/// Linear velocity in units per second
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VelocityComponent {
    /// Units per second along each axis
    pub linear: Vec3,
}

impl Component for VelocityComponent {
    const NAME: &'static str = "velocity";
}

impl VelocityComponent {
    /// Create a velocity component
    pub fn new(linear: Vec3) -> Self {
        Self { linear }
    }

    /// Check whether the entity is at rest
    pub fn is_zero(&self) -> bool {
        self.linear == Vec3::zeros()
    }
}

/// Velocity factory
pub struct VelocityFactory;

impl VelocityFactory {
    /// Velocity from components
    pub fn linear(x: f32, y: f32, z: f32) -> VelocityComponent {
        VelocityComponent::new(Vec3::new(x, y, z))
    }

    /// Velocity along the screen plane
    pub fn planar(x: f32, y: f32) -> VelocityComponent {
        VelocityComponent::new(Vec3::new(x, y, 0.0))
    }
}
