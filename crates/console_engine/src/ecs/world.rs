//! ECS World implementation

use super::component::{Component, ComponentKey};
use super::query::{Query, QueryId, QueryState};
use super::storage::{ComponentStorage, SparseSet};
use super::{EcsError, Entity};
use crate::ecs::components::Name;
use crate::scene::SceneGraph;
use std::any::TypeId;
use std::collections::HashMap;

/// ECS World containing all entities, components and the scene graph they reference
pub struct World {
    next_entity_id: u32,
    entities: Vec<Entity>,
    storages: HashMap<TypeId, Box<dyn ComponentStorage>>,
    queries: Vec<QueryState>,
    /// Reverse index: component type -> queries that require it
    queries_by_component: HashMap<TypeId, Vec<QueryId>>,
    scene: SceneGraph,
}

impl World {
    /// Create a new world
    pub fn new() -> Self {
        Self {
            next_entity_id: 0,
            entities: Vec::new(),
            storages: HashMap::new(),
            queries: Vec::new(),
            queries_by_component: HashMap::new(),
            scene: SceneGraph::new(),
        }
    }

    /// Create a new entity
    pub fn create_entity(&mut self) -> Entity {
        let entity = Entity::new(self.next_entity_id);
        self.next_entity_id += 1;
        self.entities.push(entity);
        log::trace!("Created {entity}");
        entity
    }

    /// Whether the entity was created by this world
    pub fn contains_entity(&self, entity: Entity) -> bool {
        entity.id() < self.next_entity_id
    }

    /// Number of entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Get an iterator over all entities
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    fn ensure_entity(&self, entity: Entity) -> Result<(), EcsError> {
        if self.contains_entity(entity) {
            Ok(())
        } else {
            Err(EcsError::UnknownEntity(entity))
        }
    }

    fn storage<T: Component>(&self) -> Option<&SparseSet<T>> {
        self.storages
            .get(&TypeId::of::<T>())
            .and_then(|storage| storage.as_any().downcast_ref::<SparseSet<T>>())
    }

    fn storage_mut<T: Component>(&mut self) -> Option<&mut SparseSet<T>> {
        self.storages
            .get_mut(&TypeId::of::<T>())
            .and_then(|storage| storage.as_any_mut().downcast_mut::<SparseSet<T>>())
    }

    /// Add a component to an entity
    ///
    /// Fails with `DuplicateComponent` if the entity already holds one of this type.
    pub fn add_component<T: Component>(&mut self, entity: Entity, component: T) -> Result<(), EcsError> {
        self.ensure_entity(entity)?;
        let key = ComponentKey::of::<T>();
        let storage = self
            .storages
            .entry(key.type_id())
            .or_insert_with(|| Box::new(SparseSet::<T>::new()));
        let inserted = storage
            .as_any_mut()
            .downcast_mut::<SparseSet<T>>()
            .map(|set| set.insert(entity, component).is_ok())
            .unwrap_or(false);
        if !inserted {
            return Err(EcsError::DuplicateComponent {
                entity,
                component: key.name(),
            });
        }
        self.refresh_queries_after_add(entity, key.type_id());
        Ok(())
    }

    /// Remove a component from an entity, returning it
    ///
    /// Fails with `MissingComponent` if it is absent (including a second removal).
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Result<T, EcsError> {
        self.ensure_entity(entity)?;
        let key = ComponentKey::of::<T>();
        let removed = self
            .storage_mut::<T>()
            .and_then(|set| set.remove(entity))
            .ok_or(EcsError::MissingComponent {
                entity,
                component: key.name(),
            })?;
        self.refresh_queries_after_remove(entity, key.type_id());
        Ok(removed)
    }

    /// Get a component from an entity
    pub fn get_component<T: Component>(&self, entity: Entity) -> Result<&T, EcsError> {
        self.ensure_entity(entity)?;
        self.storage::<T>()
            .and_then(|set| set.get(entity))
            .ok_or(EcsError::MissingComponent {
                entity,
                component: ComponentKey::of::<T>().name(),
            })
    }

    /// Get a mutable component from an entity
    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Result<&mut T, EcsError> {
        self.ensure_entity(entity)?;
        self.storage_mut::<T>()
            .and_then(|set| set.get_mut(entity))
            .ok_or(EcsError::MissingComponent {
                entity,
                component: ComponentKey::of::<T>().name(),
            })
    }

    /// Whether the entity holds a component of type `T`
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.storage::<T>().is_some_and(|set| set.contains(entity))
    }

    fn has_component_id(&self, entity: Entity, type_id: TypeId) -> bool {
        self.storages
            .get(&type_id)
            .is_some_and(|storage| storage.contains(entity))
    }

    fn matches(&self, entity: Entity, query: &Query) -> bool {
        query
            .required()
            .iter()
            .all(|key| self.has_component_id(entity, key.type_id()))
    }

    /// Register a query and return its handle
    ///
    /// Identical queries share one result list. Entities that already match
    /// are picked up immediately.
    pub fn register_query(&mut self, query: Query) -> QueryId {
        if let Some(position) = self.queries.iter().position(|state| state.query == query) {
            return QueryId(position);
        }

        let id = QueryId(self.queries.len());
        let mut state = QueryState::new(query);
        for &entity in &self.entities {
            if !state.query.required().is_empty() && self.matches(entity, &state.query) {
                state.results.insert(entity);
            }
        }
        for key in state.query.required() {
            self.queries_by_component
                .entry(key.type_id())
                .or_default()
                .push(id);
        }
        log::debug!(
            "Registered query {:?} over [{}]",
            id,
            state
                .query
                .required()
                .iter()
                .map(ComponentKey::name)
                .collect::<Vec<_>>()
                .join(", ")
        );
        self.queries.push(state);
        id
    }

    /// Live result list of a query
    pub fn query_results(&self, id: QueryId) -> &[Entity] {
        match self.queries.get(id.0) {
            Some(state) => state.results.as_slice(),
            None => &[],
        }
    }

    /// Stable copy of a query's results, safe to iterate while mutating the world
    pub fn query_snapshot(&self, id: QueryId) -> Vec<Entity> {
        self.query_results(id).to_vec()
    }

    /// Whether the entity is currently in the query's results
    pub fn query_contains(&self, id: QueryId, entity: Entity) -> bool {
        self.queries
            .get(id.0)
            .is_some_and(|state| state.results.contains(entity))
    }

    fn refresh_queries_after_add(&mut self, entity: Entity, type_id: TypeId) {
        let Some(affected) = self.queries_by_component.get(&type_id) else {
            return;
        };
        let matching: Vec<QueryId> = affected
            .iter()
            .copied()
            .filter(|id| self.matches(entity, &self.queries[id.0].query))
            .collect();
        for id in matching {
            self.queries[id.0].results.insert(entity);
        }
    }

    fn refresh_queries_after_remove(&mut self, entity: Entity, type_id: TypeId) {
        if let Some(affected) = self.queries_by_component.get(&type_id) {
            for id in affected {
                self.queries[id.0].results.remove(entity);
            }
        }
    }

    /// Find the first entity carrying the given `Name`
    pub fn find_by_name(&self, name: &str) -> Option<Entity> {
        self.storage::<Name>()?
            .iter()
            .filter(|(_, candidate)| candidate.as_str() == name)
            .map(|(entity, _)| entity)
            .min()
    }

    /// Find the first entity carrying the given `Name` and a `T` component
    ///
    /// Same-named entities without `T` are skipped.
    pub fn find_by_name_with<T: Component>(&self, name: &str) -> Option<Entity> {
        self.storage::<Name>()?
            .iter()
            .filter(|(entity, candidate)| candidate.as_str() == name && self.has_component::<T>(*entity))
            .map(|(entity, _)| entity)
            .min()
    }

    /// Scene graph backing the entities' `SpatialRef` components
    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    /// Mutable scene graph
    pub fn scene_mut(&mut self) -> &mut SceneGraph {
        &mut self.scene
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Health(u32);
    impl Component for Health {}

    struct Frozen;
    impl Component for Frozen {}

    #[test]
    fn test_add_get_and_mutate() {
        let mut world = World::new();
        let entity = world.create_entity();
        world.add_component(entity, Health(3)).unwrap();

        world.get_component_mut::<Health>(entity).unwrap().0 = 5;
        assert_eq!(world.get_component::<Health>(entity).unwrap(), &Health(5));
    }

    #[test]
    fn test_duplicate_component_is_rejected() {
        let mut world = World::new();
        let entity = world.create_entity();
        world.add_component(entity, Health(1)).unwrap();

        let err = world.add_component(entity, Health(2)).unwrap_err();
        assert_eq!(
            err,
            EcsError::DuplicateComponent {
                entity,
                component: "Health"
            }
        );
        assert_eq!(world.get_component::<Health>(entity).unwrap(), &Health(1));
    }

    #[test]
    fn test_missing_component_on_get_and_second_remove() {
        let mut world = World::new();
        let entity = world.create_entity();
        assert!(matches!(
            world.get_component::<Health>(entity),
            Err(EcsError::MissingComponent { .. })
        ));

        world.add_component(entity, Frozen).unwrap();
        assert!(world.remove_component::<Frozen>(entity).is_ok());
        assert!(matches!(
            world.remove_component::<Frozen>(entity),
            Err(EcsError::MissingComponent { component: "Frozen", .. })
        ));
    }

    #[test]
    fn test_unknown_entity() {
        let mut world = World::new();
        let stranger = Entity::new(42);
        assert_eq!(
            world.add_component(stranger, Frozen).unwrap_err(),
            EcsError::UnknownEntity(stranger)
        );
    }

    #[test]
    fn test_query_results_track_mutations_eagerly() {
        let mut world = World::new();
        let query = world.register_query(Query::new().with::<Health>().with::<Frozen>());

        let entity = world.create_entity();
        world.add_component(entity, Health(1)).unwrap();
        assert!(world.query_results(query).is_empty());

        world.add_component(entity, Frozen).unwrap();
        assert_eq!(world.query_results(query), &[entity]);

        world.remove_component::<Frozen>(entity).unwrap();
        assert!(!world.query_contains(query, entity));
    }

    #[test]
    fn test_late_query_sees_existing_entities() {
        let mut world = World::new();
        let entity = world.create_entity();
        world.add_component(entity, Frozen).unwrap();

        let query = world.register_query(Query::new().with::<Frozen>());
        assert_eq!(world.query_results(query), &[entity]);
    }

    #[test]
    fn test_identical_queries_share_results() {
        let mut world = World::new();
        let first = world.register_query(Query::new().with::<Health>());
        let second = world.register_query(Query::new().with::<Health>());
        assert_eq!(first, second);
    }

    #[test]
    fn test_find_by_name() {
        let mut world = World::new();
        let entity = world.create_entity();
        world.add_component(entity, Name::new("orangeButton")).unwrap();

        assert_eq!(world.find_by_name("orangeButton"), Some(entity));
        assert_eq!(world.find_by_name("pinkButton"), None);
    }

    #[test]
    fn test_find_by_name_with_skips_other_kinds() {
        #[derive(Debug)]
        struct Button;
        impl Component for Button {}

        let mut world = World::new();
        let label = world.create_entity();
        world.add_component(label, Name::new("showcase")).unwrap();
        let button = world.create_entity();
        world.add_component(button, Name::new("showcase")).unwrap();
        world.add_component(button, Button).unwrap();

        assert_eq!(world.find_by_name("showcase"), Some(label));
        assert_eq!(world.find_by_name_with::<Button>("showcase"), Some(button));
        assert_eq!(world.find_by_name_with::<Button>("console"), None);
    }
}
