//! ECS Components module
//!
//! Built-in component records. Each one is pure data with documented
//! defaults; behaviour lives in [`crate::ecs::systems`].

pub mod transform;
pub mod velocity;
pub mod sprite;
pub mod health;
pub mod collision;
pub mod input_profile;
pub mod animation;
pub mod lifetime;

pub use transform::{TransformComponent, TransformFactory};
pub use velocity::{VelocityComponent, VelocityFactory};
pub use sprite::{SpriteComponent, SpriteFactory, SpriteHandle};
pub use health::HealthComponent;
pub use collision::{CollisionBoxComponent, CollisionStateComponent};
pub use input_profile::{InputProfileComponent, InputProfileFactory, MovementAxes, PadButtons};
pub use animation::{AnimationComponent, AnimationFactory};
pub use lifetime::LifetimeComponent;
