//! Entity implementation
//!
//! An entity is an id, an optional tag, an active flag and a bag of
//! components keyed by [`ComponentKind`]. Entities are created by an
//! [`EntityManager`](super::EntityManager), which owns the [`IdAllocator`]
//! that numbers them.

use super::component::{Component, ComponentKind, ComponentSlot};
use std::fmt;

/// Entity identifier
///
/// Ids are issued by one [`IdAllocator`] and never handed out twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(u64);

impl EntityId {
    /// Raw numeric value
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic entity id source, starting at 1
///
/// Ids are 64-bit. The counter saturates at `u64::MAX` instead of wrapping,
/// which no realistic spawn rate reaches.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: u64,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdAllocator {
    /// Create an allocator whose first id is 1
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Issue the next id
    pub fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next = self.next.saturating_add(1);
        id
    }

    /// Id the next call to [`allocate`](Self::allocate) will return
    pub fn peek(&self) -> EntityId {
        EntityId(self.next)
    }

    /// Rewind to 1. Test harnesses only: ids issued before the reset will be
    /// issued again.
    #[cfg(test)]
    pub(crate) fn reset(&mut self) {
        self.next = 1;
    }
}

/// A game object: identity plus components
pub struct Entity {
    id: EntityId,
    tag: Option<String>,
    active: bool,
    components: Vec<ComponentSlot>,
}

impl Entity {
    /// Create a new entity with the given ID
    pub(crate) fn new(id: EntityId, tag: Option<&str>) -> Self {
        Self {
            id,
            tag: tag.map(str::to_owned),
            active: true,
            components: Vec::new(),
        }
    }

    /// Get the entity ID
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Free-form label used for coarse queries
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Check the tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tag.as_deref() == Some(tag)
    }

    /// Attach a component, replacing any existing one of the same kind
    ///
    /// A replaced component keeps its original position in
    /// [`component_kinds`](Self::component_kinds). Returns `self` so calls
    /// can be chained.
    pub fn add_component<C: Component>(&mut self, component: C) -> &mut Self {
        let slot = ComponentSlot::new(component);
        match self.slot_index(slot.kind) {
            Some(index) => self.components[index] = slot,
            None => self.components.push(slot),
        }
        self
    }

    /// Get a component
    pub fn get_component<C: Component>(&self) -> Option<&C> {
        let index = self.slot_index(ComponentKind::of::<C>())?;
        self.components[index].record.downcast_ref::<C>()
    }

    /// Get a mutable component
    pub fn get_component_mut<C: Component>(&mut self) -> Option<&mut C> {
        let index = self.slot_index(ComponentKind::of::<C>())?;
        self.components[index].record.downcast_mut::<C>()
    }

    /// Check for a component type
    pub fn has_component<C: Component>(&self) -> bool {
        self.has_kind(ComponentKind::of::<C>())
    }

    /// Check for a component kind
    pub fn has_kind(&self, kind: ComponentKind) -> bool {
        self.slot_index(kind).is_some()
    }

    /// Check that every listed kind is attached
    pub fn has_components(&self, kinds: &[ComponentKind]) -> bool {
        kinds.iter().all(|&kind| self.has_kind(kind))
    }

    /// Detach a component; `false` if it was not attached
    pub fn remove_component<C: Component>(&mut self) -> bool {
        match self.slot_index(ComponentKind::of::<C>()) {
            Some(index) => {
                self.components.remove(index);
                true
            }
            None => false,
        }
    }

    /// Attached kinds in insertion order
    pub fn component_kinds(&self) -> Vec<ComponentKind> {
        self.components.iter().map(|slot| slot.kind).collect()
    }

    /// Number of attached components
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Whether systems and active queries see this entity
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Enable or disable the entity
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Deactivate and drop every component
    ///
    /// This cannot be undone. It does not remove the entity from its
    /// manager; use [`EntityManager::destroy_entity`](super::EntityManager::destroy_entity)
    /// for that.
    pub fn destroy(&mut self) {
        self.active = false;
        self.components.clear();
    }

    fn slot_index(&self, kind: ComponentKind) -> Option<usize> {
        self.components.iter().position(|slot| slot.kind == kind)
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("tag", &self.tag)
            .field("active", &self.active)
            .field("components", &self.component_kinds())
            .finish()
    }
}
