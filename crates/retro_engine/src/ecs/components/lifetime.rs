//! Lifetime Component
//!
//! Counts down each tick; the lifetime system deactivates the entity once
//! nothing is left.

use crate::ecs::Component;

/// Remaining lifetime in seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LifetimeComponent {
    /// Seconds left before the entity expires
    pub remaining: f32,
}

impl Component for LifetimeComponent {
    const NAME: &'static str = "lifetime";
}

impl LifetimeComponent {
    /// Create a new lifetime component
    pub fn new(duration: f32) -> Self {
        Self { remaining: duration }
    }

    /// Check if this entity's lifetime has run out
    pub fn is_expired(&self) -> bool {
        self.remaining <= 0.0
    }
}
