//! Ordered system pipeline
//!
//! Systems run in registration order, one after another, every tick. There
//! is no priority mechanism and no snapshot isolation: whatever an earlier
//! system writes is what a later system reads in the same tick.

use super::{Entity, System, SystemError};

/// Holds systems in execution order
#[derive(Default)]
pub struct SystemManager {
    systems: Vec<Box<dyn System>>,
}

impl SystemManager {
    /// Create an empty pipeline
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a system and run its registration hook
    pub fn add_system(&mut self, mut system: Box<dyn System>) {
        if self.get_system(system.name()).is_some() {
            log::warn!(
                "System '{}' registered twice; lookups will address the first one",
                system.name()
            );
        }

        system.on_register();
        log::debug!(
            "Registered system '{}' at position {} (requires {:?})",
            system.name(),
            self.systems.len(),
            system.required_components()
        );
        self.systems.push(system);
    }

    /// Remove the first system with this name, running its teardown hook
    pub fn remove_system(&mut self, name: &str) -> bool {
        let Some(index) = self.position(name) else {
            return false;
        };

        let mut system = self.systems.remove(index);
        system.on_remove();
        log::debug!("Removed system '{}'", name);
        true
    }

    /// Look up a system by name
    pub fn get_system(&self, name: &str) -> Option<&dyn System> {
        self.position(name).map(|index| self.systems[index].as_ref())
    }

    /// Mutable lookup by name
    pub fn get_system_mut(&mut self, name: &str) -> Option<&mut (dyn System + 'static)> {
        let index = self.position(name)?;
        Some(self.systems[index].as_mut())
    }

    /// Names in execution order
    pub fn system_names(&self) -> Vec<&str> {
        self.systems.iter().map(|system| system.name()).collect()
    }

    /// Number of registered systems
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    /// Whether no systems are registered
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Run every system once over `entities`
    ///
    /// The matching subset is recomputed for each system, so an entity a
    /// previous system deactivated is not passed on. The first error stops
    /// the pipeline and is returned.
    pub fn update(&mut self, entities: &mut [&mut Entity], delta_time: f32) -> Result<(), SystemError> {
        for system in &mut self.systems {
            let required = system.required_components();
            let mut matching: Vec<&mut Entity> = entities
                .iter_mut()
                .filter(|entity| entity.is_active() && entity.has_components(required))
                .map(|entity| &mut **entity)
                .collect();

            log::trace!("System '{}' updating {} entities", system.name(), matching.len());
            system.update(&mut matching, delta_time)?;
        }
        Ok(())
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.systems.iter().position(|system| system.name() == name)
    }
}

impl std::fmt::Debug for SystemManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemManager")
            .field("systems", &self.system_names())
            .finish()
    }
}
