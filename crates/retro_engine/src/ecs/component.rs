//! Component trait and component kinds
//!
//! Components are stored type-erased inside an [`Entity`](super::Entity) and
//! recovered with a checked downcast at the access boundary. A
//! [`ComponentKind`] names one component type so systems can declare their
//! requirements without holding a value.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Marker trait for components
///
/// `NAME` is the human-readable kind name reported by
/// [`Entity::component_kinds`](super::Entity::component_kinds) and used in
/// log output. It should be unique across the component types of a game.
pub trait Component: Any {
    /// Kind name
    const NAME: &'static str;
}

/// Identity of one component type
///
/// Equality and hashing use the underlying [`TypeId`]; the name is carried
/// along for diagnostics.
#[derive(Clone, Copy)]
pub struct ComponentKind {
    type_id: TypeId,
    name: &'static str,
}

impl ComponentKind {
    /// Kind of component type `C`
    pub fn of<C: Component>() -> Self {
        Self {
            type_id: TypeId::of::<C>(),
            name: C::NAME,
        }
    }

    /// Kind name
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ComponentKind {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for ComponentKind {}

impl Hash for ComponentKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ComponentKind").field(&self.name).finish()
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Build a kind list from component types
///
/// ```
/// use retro_engine::component_kinds;
/// use retro_engine::ecs::components::{TransformComponent, VelocityComponent};
///
/// let required = component_kinds![TransformComponent, VelocityComponent];
/// assert_eq!(required.len(), 2);
/// ```
#[macro_export]
macro_rules! component_kinds {
    ($($component:ty),* $(,)?) => {
        vec![$($crate::ecs::ComponentKind::of::<$component>()),*]
    };
}

/// Type-erased component record owned by an entity
pub(crate) struct ComponentSlot {
    pub(crate) kind: ComponentKind,
    pub(crate) record: Box<dyn Any>,
}

impl ComponentSlot {
    pub(crate) fn new<C: Component>(component: C) -> Self {
        Self {
            kind: ComponentKind::of::<C>(),
            record: Box::new(component),
        }
    }
}
