//! # Retro Engine
//!
//! A small entity-component-system runtime driven by a fixed-timestep game
//! loop, sized for tile-and-sprite games.
//!
//! ## Features
//!
//! - **ECS Architecture**: entities own typed components, systems run in registration order
//! - **Deferred Destruction**: entities destroyed mid-tick stay valid until the tick ends
//! - **Fixed Timestep**: deterministic simulation rate with a catch-up cap
//! - **Built-in Systems**: input, movement, collision, health, animation, lifetime
//! - **Configuration**: TOML and RON engine settings
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use retro_engine::prelude::*;
//!
//! struct MyGame;
//!
//! impl Application for MyGame {
//!     fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
//!         let world = engine.world_mut();
//!         world
//!             .create_entity(Some("player"))
//!             .add_component(TransformFactory::at(16.0, 200.0, 0.0))
//!             .add_component(VelocityFactory::linear(40.0, 0.0, 0.0));
//!         world.add_system(Box::new(MovementSystem::new()));
//!         Ok(())
//!     }
//!
//!     fn update(&mut self, _engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
//!         Ok(())
//!     }
//!
//!     fn cleanup(&mut self, _engine: &mut Engine) {}
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EngineConfig {
//!         max_frames: Some(600),
//!         ..Default::default()
//!     };
//!     Engine::run(config, &mut MyGame)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

pub mod foundation;
pub mod config;
pub mod ecs;
pub mod game_loop;

mod application;
mod engine;

pub use application::{AppError, Application};
pub use config::{Config, ConfigError, EngineConfig, LoggingConfig, LoopConfig};
pub use engine::{Engine, EngineError};
pub use game_loop::{Callbacks, FrameReport, GameLoop, LoopControl, LoopHost, LoopState};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        AppError, Application, Config, Engine, EngineConfig, EngineError, LoopConfig,
        component_kinds,
        ecs::{
            Component, ComponentKind, Entity, EntityId, EntityManager, FnSystem, System,
            SystemError,
            components::{
                AnimationFactory, CollisionBoxComponent, CollisionStateComponent,
                HealthComponent, InputProfileFactory, LifetimeComponent, PadButtons,
                SpriteFactory, SpriteHandle, TransformComponent, TransformFactory,
                VelocityComponent, VelocityFactory,
            },
            systems::{
                AnimationSystem, CollisionSystem, HealthSystem, InputSystem, LifetimeSystem,
                MovementSystem, PadState,
            },
        },
        foundation::math::{Quat, Vec2, Vec3},
        game_loop::{GameLoop, LoopControl, LoopHost},
    };
}
