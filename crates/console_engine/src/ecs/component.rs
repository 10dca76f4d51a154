//! Component trait and type keys

use std::any::{type_name, TypeId};

/// Marker trait for components
///
/// Components are plain data attached to an entity, at most one instance
/// per type. Tag components are zero-sized types implementing this trait.
pub trait Component: 'static {}

/// Runtime identity of a component type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentKey {
    id: TypeId,
    name: &'static str,
}

impl ComponentKey {
    /// Key for component type `T`
    pub fn of<T: Component>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: short_type_name::<T>(),
        }
    }

    /// Underlying type id
    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// Unqualified type name, used in errors and logs
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Last path segment of a type name (`console_engine::ecs::Foo` -> `Foo`)
fn short_type_name<T: ?Sized>() -> &'static str {
    let full = type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}
