//! Game-specific components

use retro_engine::prelude::*;

/// Walks back and forth around a home position
#[derive(Debug, Clone)]
pub struct PatrolComponent {
    /// Centre of the patrol route
    pub home_x: f32,

    /// Distance walked either side of `home_x`
    pub range: f32,

    /// Walking speed in pixels per second
    pub speed: f32,
}

impl Component for PatrolComponent {
    const NAME: &'static str = "patrol";
}

impl PatrolComponent {
    /// Patrol `range` pixels either side of `home_x`
    pub fn new(home_x: f32, range: f32, speed: f32) -> Self {
        Self {
            home_x,
            range,
            speed,
        }
    }
}

/// Collectible worth points
#[derive(Debug, Clone, Copy)]
pub struct CoinComponent {
    /// Points awarded on pickup
    pub value: u32,
}

impl Component for CoinComponent {
    const NAME: &'static str = "coin";
}

/// Pulls entities down at a constant rate
#[derive(Debug, Clone, Copy)]
pub struct GravityComponent {
    /// Downward acceleration in pixels per second squared
    pub strength: f32,

    /// Y coordinate of the floor
    pub floor_y: f32,
}

impl Component for GravityComponent {
    const NAME: &'static str = "gravity";
}

impl Default for GravityComponent {
    fn default() -> Self {
        Self {
            strength: 900.0,
            floor_y: 208.0,
        }
    }
}
