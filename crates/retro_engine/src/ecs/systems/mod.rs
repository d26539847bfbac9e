//! ECS Systems module
//!
//! Built-in systems for the built-in components. Register them in the order
//! they should run; a typical platformer tick is input, movement, collision,
//! health, animation, lifetime.

pub mod input;
pub mod movement;
pub mod collision;
pub mod health;
pub mod animation;
pub mod lifetime;

pub use input::{InputSystem, PadState};
pub use movement::MovementSystem;
pub use collision::CollisionSystem;
pub use health::HealthSystem;
pub use animation::AnimationSystem;
pub use lifetime::LifetimeSystem;
