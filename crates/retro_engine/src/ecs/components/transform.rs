//! Transform component for the ECS system
//!
//! Pure data component: position, orientation and scale in world space.
//! 2D games leave `z` at zero or use it as a draw-order hint.

use crate::ecs::Component;
use crate::foundation::math::{Quat, Vec3};

/// ECS Transform component
#[derive(Debug, Clone, PartialEq)]
pub struct TransformComponent {
    /// World space position
    pub position: Vec3,

    /// World space rotation quaternion
    pub rotation: Quat,

    /// World space scale factors
    pub scale: Vec3,
}

impl Component for TransformComponent {
    const NAME: &'static str = "transform";
}

impl Default for TransformComponent {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl TransformComponent {
    /// Create identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create from position only
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Builder pattern: Set position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Builder pattern: Set rotation from quaternion
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder pattern: Set rotation around the screen axis (radians)
    pub fn with_rotation_z(mut self, angle: f32) -> Self {
        self.rotation = Quat::from_euler_angles(0.0, 0.0, angle);
        self
    }

    /// Builder pattern: Set scale (uniform)
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::new(scale, scale, scale);
        self
    }

    /// Builder pattern: Set scale (non-uniform)
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }
}

/// Transform factory for common configurations
pub struct TransformFactory;

impl TransformFactory {
    /// Transform at a position with identity rotation and unit scale
    pub fn at(x: f32, y: f32, z: f32) -> TransformComponent {
        TransformComponent::from_position(Vec3::new(x, y, z))
    }

    /// Screen-space sprite transform, flat on the z = 0 plane
    pub fn sprite(x: f32, y: f32, scale: f32) -> TransformComponent {
        TransformComponent {
            position: Vec3::new(x, y, 0.0),
            rotation: Quat::identity(),
            scale: Vec3::new(scale, scale, 1.0),
        }
    }
}
