//! Core engine implementation

use crate::{
    application::Application,
    config::{Config, ConfigError, EngineConfig},
    ecs::{EntityManager, SystemError},
    game_loop::{GameLoop, LoopControl, LoopHost},
};
use thiserror::Error;

/// Main engine struct
///
/// The engine owns the ECS world and the switch that stops the game loop.
pub struct Engine {
    /// ECS world containing all entities, components, and systems
    world: EntityManager,

    /// Shared with the running loop
    control: LoopControl,

    /// Engine configuration
    config: EngineConfig,

    /// Frames rendered by [`Engine::run`]
    frame_count: u64,
}

impl Engine {
    /// Create a new engine instance
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        log::info!("Initializing engine...");

        Ok(Self {
            world: EntityManager::new(),
            control: LoopControl::new(),
            config,
            frame_count: 0,
        })
    }

    /// Run the engine main loop with the given application
    ///
    /// Blocks until [`Engine::quit`] is called, the configured frame limit is
    /// reached, or a callback fails. The application's `cleanup` runs in every
    /// case.
    pub fn run<T: Application>(config: EngineConfig, app: &mut T) -> Result<(), EngineError> {
        let mut engine = Self::new(config)?;

        app.initialize(&mut engine)
            .map_err(|e| EngineError::Application(format!("App initialization: {}", e)))?;

        log::info!(
            "Starting main loop with {} entities and {} systems...",
            engine.world.entity_count(),
            engine.world.systems().len()
        );

        let loop_config = engine.config.game_loop.clone();
        let control = engine.control.clone();
        let result = {
            let host = AppHost {
                engine: &mut engine,
                app: &mut *app,
            };
            GameLoop::new(loop_config, host)
                .and_then(|game_loop| game_loop.with_control(control).run())
        };

        app.cleanup(&mut engine);

        if let Err(err) = &result {
            log::error!("Engine stopped with error: {}", err);
        }
        log::info!("Engine shutdown complete after {} frames", engine.frame_count);
        result
    }

    /// Request engine shutdown
    ///
    /// The current frame completes; no further frame runs.
    pub fn quit(&mut self) {
        log::info!("Engine shutdown requested");
        self.control.stop();
    }

    /// Get the ECS world
    pub fn world(&self) -> &EntityManager {
        &self.world
    }

    /// Get mutable access to the ECS world
    pub fn world_mut(&mut self) -> &mut EntityManager {
        &mut self.world
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Frames rendered so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

/// Binds an application and the engine to the loop's update/render calls
struct AppHost<'a, T> {
    engine: &'a mut Engine,
    app: &'a mut T,
}

impl<T: Application> LoopHost for AppHost<'_, T> {
    fn update(&mut self, delta_time: f32) -> Result<(), EngineError> {
        self.app
            .update(self.engine, delta_time)
            .map_err(|e| EngineError::Application(format!("App update: {}", e)))?;

        self.engine.world.update(delta_time)?;
        Ok(())
    }

    fn render(&mut self) -> Result<(), EngineError> {
        self.app
            .render(self.engine)
            .map_err(|e| EngineError::Application(format!("App render: {}", e)))?;

        self.engine.frame_count += 1;
        if let Some(max_frames) = self.engine.config.max_frames {
            if self.engine.frame_count >= max_frames {
                log::info!("Reached frame limit of {}", max_frames);
                self.engine.quit();
            }
        }
        Ok(())
    }
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// A system failed during a tick
    #[error("System error: {0}")]
    System(#[from] SystemError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Application error
    #[error("Application error: {0}")]
    Application(String),
}
