//! Entity-Component-System implementation
//!
//! A deliberately small ECS: entities own their components directly, systems
//! run in registration order, and destruction is mark-then-sweep.

pub mod entity;
pub mod component;
pub mod system;
pub mod system_manager;
pub mod entity_manager;
pub mod components;
pub mod systems;

pub use entity::{Entity, EntityId, IdAllocator};
pub use component::{Component, ComponentKind};
pub use system::{FnSystem, System, SystemError};
pub use system_manager::SystemManager;
pub use entity_manager::EntityManager;

#[cfg(test)]
mod tests;
