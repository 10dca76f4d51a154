//! Sparse-set component storage
//!
//! One `SparseSet<T>` per component type. The sparse array maps an entity
//! index to a slot in the dense arrays, giving O(1) insert, lookup and
//! swap-remove while keeping component data packed for iteration.

use super::component::Component;
use super::Entity;
use std::any::Any;

/// Packed storage for one component type
pub struct SparseSet<T> {
    sparse: Vec<Option<usize>>,
    entities: Vec<Entity>,
    dense: Vec<T>,
}

impl<T> Default for SparseSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SparseSet<T> {
    /// Create an empty set
    pub fn new() -> Self {
        Self {
            sparse: Vec::new(),
            entities: Vec::new(),
            dense: Vec::new(),
        }
    }

    fn slot(&self, entity: Entity) -> Option<usize> {
        self.sparse.get(entity.index()).copied().flatten()
    }

    /// Insert a component, handing it back if the entity already has one
    pub fn insert(&mut self, entity: Entity, value: T) -> Result<(), T> {
        if self.contains(entity) {
            return Err(value);
        }
        let index = entity.index();
        if index >= self.sparse.len() {
            self.sparse.resize(index + 1, None);
        }
        self.sparse[index] = Some(self.dense.len());
        self.entities.push(entity);
        self.dense.push(value);
        Ok(())
    }

    /// Remove and return the entity's component
    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        let slot = self.slot(entity)?;
        self.sparse[entity.index()] = None;
        self.entities.swap_remove(slot);
        let value = self.dense.swap_remove(slot);
        // The former last element now lives in `slot`
        if let Some(&moved) = self.entities.get(slot) {
            self.sparse[moved.index()] = Some(slot);
        }
        Some(value)
    }

    /// Whether the entity holds a component in this set
    pub fn contains(&self, entity: Entity) -> bool {
        self.slot(entity).is_some()
    }

    /// Borrow the entity's component
    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.slot(entity).map(|slot| &self.dense[slot])
    }

    /// Mutably borrow the entity's component
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        let slot = self.slot(entity)?;
        self.dense.get_mut(slot)
    }

    /// Number of stored components
    pub fn len(&self) -> usize {
        self.dense.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    /// Iterate `(entity, component)` pairs in dense order
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.entities.iter().copied().zip(self.dense.iter())
    }
}

/// Type-erased view of a `SparseSet`, as stored by the world
pub(crate) trait ComponentStorage {
    fn contains(&self, entity: Entity) -> bool;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> ComponentStorage for SparseSet<T> {
    fn contains(&self, entity: Entity) -> bool {
        SparseSet::contains(self, entity)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
