//! Application trait and lifecycle management

use crate::engine::{Engine, EngineError};
use thiserror::Error;

/// Application lifecycle trait
///
/// Implement this trait to run a game on the engine's fixed-timestep loop.
pub trait Application {
    /// Initialize the application
    ///
    /// Called once before the loop starts. Use this to spawn the initial
    /// entities and register systems on [`Engine::world_mut`].
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError>;

    /// Update the application
    ///
    /// Called once per fixed step, before the world's systems run.
    ///
    /// # Arguments
    /// * `engine` - Mutable reference to the engine
    /// * `delta_time` - Fixed step length in seconds
    fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError>;

    /// Render the application
    ///
    /// Called once per displayed frame, after all of that frame's updates.
    fn render(&mut self, _engine: &mut Engine) -> Result<(), AppError> {
        Ok(())
    }

    /// Cleanup the application
    ///
    /// Called when the loop has stopped, including after an error.
    fn cleanup(&mut self, engine: &mut Engine);
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Engine error propagated to application level
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Custom application error
    #[error("Application error: {0}")]
    Custom(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Game logic error
    #[error("Game logic error: {0}")]
    GameLogic(String),
}
