//! Query engine
//!
//! A query names the component set a system requires. The world keeps one
//! live result list per registered query and updates it synchronously from
//! `add_component` / `remove_component`, so a system always sees membership
//! as of the most recent mutation, including ones made earlier in the same
//! tick.

use super::component::{Component, ComponentKey};
use super::Entity;
use std::collections::HashMap;

/// Handle to a query registered with a `World`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueryId(pub(crate) usize);

/// Required component set of a query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    required: Vec<ComponentKey>,
}

impl Query {
    /// Create an empty query (matches nothing until components are added)
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: require component `T`
    #[must_use]
    pub fn with<T: Component>(mut self) -> Self {
        let key = ComponentKey::of::<T>();
        if !self.required.contains(&key) {
            self.required.push(key);
            self.required.sort_by_key(|key| (key.name(), key.type_id()));
        }
        self
    }

    /// Required component keys
    pub fn required(&self) -> &[ComponentKey] {
        &self.required
    }
}

/// Entity list with O(1) membership and swap-removal
#[derive(Debug, Default)]
pub(crate) struct EntityList {
    entities: Vec<Entity>,
    positions: HashMap<Entity, usize>,
}

impl EntityList {
    pub(crate) fn insert(&mut self, entity: Entity) -> bool {
        if self.positions.contains_key(&entity) {
            return false;
        }
        self.positions.insert(entity, self.entities.len());
        self.entities.push(entity);
        true
    }

    pub(crate) fn remove(&mut self, entity: Entity) -> bool {
        let Some(position) = self.positions.remove(&entity) else {
            return false;
        };
        self.entities.swap_remove(position);
        if let Some(&moved) = self.entities.get(position) {
            self.positions.insert(moved, position);
        }
        true
    }

    pub(crate) fn contains(&self, entity: Entity) -> bool {
        self.positions.contains_key(&entity)
    }

    pub(crate) fn as_slice(&self) -> &[Entity] {
        &self.entities
    }
}

/// A registered query together with its live results
#[derive(Debug)]
pub(crate) struct QueryState {
    pub(crate) query: Query,
    pub(crate) results: EntityList,
}

impl QueryState {
    pub(crate) fn new(query: Query) -> Self {
        Self {
            query,
            results: EntityList::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct A;
    impl Component for A {}
    struct B;
    impl Component for B {}

    #[test]
    fn test_query_ignores_duplicate_requirements() {
        let query = Query::new().with::<A>().with::<B>().with::<A>();
        assert_eq!(query.required().len(), 2);
    }

    #[test]
    fn test_queries_compare_independent_of_order() {
        assert_eq!(Query::new().with::<A>().with::<B>(), Query::new().with::<B>().with::<A>());
    }

    #[test]
    fn test_entity_list_swap_remove() {
        let mut list = EntityList::default();
        let (a, b, c) = (Entity::new(0), Entity::new(1), Entity::new(2));
        assert!(list.insert(a));
        assert!(list.insert(b));
        assert!(list.insert(c));
        assert!(!list.insert(b));

        assert!(list.remove(a));
        assert!(!list.remove(a));
        assert_eq!(list.as_slice(), &[c, b]);
        assert!(list.contains(b) && list.contains(c));
    }
}
