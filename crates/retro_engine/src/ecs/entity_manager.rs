//! Entity store
//!
//! Owns every entity, the id allocator and the system pipeline, and runs one
//! simulation tick at a time.
//!
//! Destruction requested through [`EntityManager::destroy_entity`] is
//! deferred: the entity stays in the index, still active and still visible to
//! systems, until the sweep at the end of the next [`EntityManager::update`].
//! Callers holding an id from the current tick can keep using it safely.

use super::{ComponentKind, Entity, EntityId, IdAllocator, System, SystemError, SystemManager};
use std::collections::{BTreeMap, BTreeSet};

/// Owns entities and drives the system pipeline
#[derive(Debug, Default)]
pub struct EntityManager {
    ids: IdAllocator,
    entities: BTreeMap<EntityId, Entity>,
    pending_destroy: BTreeSet<EntityId>,
    systems: SystemManager,
}

impl EntityManager {
    /// Create an empty store with ids starting at 1
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that issues ids from `ids`
    pub fn with_allocator(ids: IdAllocator) -> Self {
        Self {
            ids,
            ..Self::default()
        }
    }

    /// Create and index a new, active, component-less entity
    pub fn create_entity(&mut self, tag: Option<&str>) -> &mut Entity {
        let id = self.ids.allocate();
        log::trace!("Created entity {} (tag {:?})", id, tag);
        self.entities.entry(id).or_insert_with(|| Entity::new(id, tag))
    }

    /// Look up an entity
    pub fn get_entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Look up an entity for mutation
    pub fn get_entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    /// All indexed entities in creation order, active or not
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Active entities in creation order
    pub fn active_entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values().filter(|entity| entity.is_active())
    }

    /// Entities carrying `tag`, active or not
    pub fn entities_by_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Entity> + 'a {
        self.entities.values().filter(move |entity| entity.has_tag(tag))
    }

    /// Active entities carrying every listed kind
    pub fn entities_with_components<'a>(
        &'a self,
        kinds: &'a [ComponentKind],
    ) -> impl Iterator<Item = &'a Entity> + 'a {
        self.active_entities()
            .filter(move |entity| entity.has_components(kinds))
    }

    /// Mark an entity for removal at the end of the next tick
    ///
    /// Until then it remains indexed and keeps its active flag. Returns
    /// `false` if the id is not currently indexed.
    pub fn destroy_entity(&mut self, id: EntityId) -> bool {
        if !self.entities.contains_key(&id) {
            log::debug!("Ignoring destroy request for unknown entity {}", id);
            return false;
        }
        self.pending_destroy.insert(id);
        true
    }

    /// Whether `id` is waiting for the next sweep
    pub fn is_pending_destroy(&self, id: EntityId) -> bool {
        self.pending_destroy.contains(&id)
    }

    /// Run one simulation tick
    ///
    /// Runs the pipeline over a snapshot of the active entities, then sweeps
    /// entities marked for destruction. A failing system skips the sweep;
    /// marked entities stay pending for the following tick.
    pub fn update(&mut self, delta_time: f32) -> Result<(), SystemError> {
        let mut active: Vec<&mut Entity> = self
            .entities
            .values_mut()
            .filter(|entity| entity.is_active())
            .collect();
        self.systems.update(&mut active, delta_time)?;

        self.sweep();
        Ok(())
    }

    /// Destroy and remove every entity immediately
    pub fn clear(&mut self) {
        for entity in self.entities.values_mut() {
            entity.destroy();
        }
        log::debug!("Cleared {} entities", self.entities.len());
        self.entities.clear();
        self.pending_destroy.clear();
    }

    /// Number of indexed entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Number of active indexed entities
    pub fn active_entity_count(&self) -> usize {
        self.active_entities().count()
    }

    /// Append a system to the pipeline
    pub fn add_system(&mut self, system: Box<dyn System>) {
        self.systems.add_system(system);
    }

    /// Remove a system from the pipeline by name
    pub fn remove_system(&mut self, name: &str) -> bool {
        self.systems.remove_system(name)
    }

    /// The system pipeline
    pub fn systems(&self) -> &SystemManager {
        &self.systems
    }

    /// Mutable access to the system pipeline
    pub fn systems_mut(&mut self) -> &mut SystemManager {
        &mut self.systems
    }

    fn sweep(&mut self) {
        if self.pending_destroy.is_empty() {
            return;
        }

        for id in std::mem::take(&mut self.pending_destroy) {
            if let Some(mut entity) = self.entities.remove(&id) {
                entity.destroy();
                log::trace!("Swept entity {}", id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component_kinds;
    use crate::ecs::components::{HealthComponent, TransformComponent, VelocityComponent};
    use crate::ecs::FnSystem;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_ids_start_at_one_and_are_not_reused() {
        let mut manager = EntityManager::new();
        let first = manager.create_entity(None).id();
        let second = manager.create_entity(None).id();

        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 2);

        manager.destroy_entity(second);
        manager.update(0.1).unwrap();

        let third = manager.create_entity(None).id();
        assert_eq!(third.get(), 3);
    }

    #[test]
    fn test_injected_allocator_is_used() {
        let mut ids = IdAllocator::new();
        ids.allocate();
        ids.allocate();

        let mut manager = EntityManager::with_allocator(ids);
        assert_eq!(manager.create_entity(None).id().get(), 3);
    }

    #[test]
    fn test_destroy_is_deferred_until_update() {
        let mut manager = EntityManager::new();
        let id = manager
            .create_entity(Some("coin"))
            .add_component(HealthComponent::new(1))
            .id();

        assert!(manager.destroy_entity(id));

        let entity = manager.get_entity(id).unwrap();
        assert!(entity.is_active());
        assert!(manager.is_pending_destroy(id));
        assert_eq!(manager.active_entity_count(), 1);

        manager.update(0.016).unwrap();

        assert!(manager.get_entity(id).is_none());
        assert!(!manager.is_pending_destroy(id));
        assert_eq!(manager.entity_count(), 0);
    }

    #[test]
    fn test_pending_entity_still_visible_to_systems() {
        let mut manager = EntityManager::new();
        let id = manager.create_entity(None).id();
        manager.destroy_entity(id);

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        manager.add_system(Box::new(FnSystem::new("watch", Vec::new(), move |entities, _| {
            sink.borrow_mut().extend(entities.iter().map(|e| e.id()));
            Ok(())
        })));

        manager.update(0.016).unwrap();
        assert_eq!(*seen.borrow(), vec![id]);
    }

    #[test]
    fn test_destroy_unknown_id_is_ignored() {
        let mut manager = EntityManager::new();
        let id = manager.create_entity(None).id();
        manager.clear();

        assert!(!manager.destroy_entity(id));
        assert!(!manager.is_pending_destroy(id));
    }

    #[test]
    fn test_failed_tick_keeps_pending_set() {
        let mut manager = EntityManager::new();
        let id = manager.create_entity(None).id();
        manager.destroy_entity(id);
        manager.add_system(Box::new(FnSystem::new("boom", Vec::new(), |_, _| {
            Err(SystemError::failed("boom", "test"))
        })));

        assert!(manager.update(0.016).is_err());
        assert!(manager.get_entity(id).is_some());
        assert!(manager.is_pending_destroy(id));

        manager.remove_system("boom");
        manager.update(0.016).unwrap();
        assert!(manager.get_entity(id).is_none());
    }

    #[test]
    fn test_clear_is_immediate() {
        let mut manager = EntityManager::new();
        let a = manager.create_entity(None).id();
        manager.create_entity(None);
        manager.destroy_entity(a);

        manager.clear();

        assert_eq!(manager.entity_count(), 0);
        assert!(manager.get_entity(a).is_none());
        assert!(!manager.is_pending_destroy(a));
    }

    #[test]
    fn test_queries() {
        let mut manager = EntityManager::new();
        let player = manager
            .create_entity(Some("player"))
            .add_component(TransformComponent::default())
            .add_component(VelocityComponent::default())
            .id();
        let enemy = manager
            .create_entity(Some("enemy"))
            .add_component(TransformComponent::default())
            .add_component(VelocityComponent::default())
            .id();
        let sleeping = manager
            .create_entity(Some("enemy"))
            .add_component(TransformComponent::default())
            .add_component(VelocityComponent::default())
            .id();
        manager.create_entity(None).add_component(TransformComponent::default());
        manager.get_entity_mut(sleeping).unwrap().set_active(false);

        let enemies: Vec<_> = manager.entities_by_tag("enemy").map(Entity::id).collect();
        assert_eq!(enemies, vec![enemy, sleeping]);

        let kinds = component_kinds![TransformComponent, VelocityComponent];
        let moving: Vec<_> = manager.entities_with_components(&kinds).map(Entity::id).collect();
        assert_eq!(moving, vec![player, enemy]);

        assert_eq!(manager.entity_count(), 4);
        assert_eq!(manager.active_entity_count(), 3);
        assert_eq!(manager.entities().count(), 4);
        assert!(manager.entities_by_tag("boss").next().is_none());
    }

    #[test]
    fn test_system_delegation() {
        let mut manager = EntityManager::new();
        manager.add_system(Box::new(FnSystem::new("noop", Vec::new(), |_, _| Ok(()))));

        assert_eq!(manager.systems().len(), 1);
        assert!(manager.remove_system("noop"));
        assert!(manager.systems_mut().is_empty());
    }
}
