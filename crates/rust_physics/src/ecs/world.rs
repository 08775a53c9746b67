//! ECS World implementation
//!
//! The world is the component registry. Each component type lives in its own
//! [`ComponentStorage`] behind a `RefCell`, so a system can hold a shared view
//! of one type and an exclusive view of another at the same time. Structural
//! changes (spawning, adding and removing components) take `&mut self` and so
//! can never happen while a system is iterating.

use std::any::TypeId;
use std::cell::{Ref, RefCell, RefMut};
use std::collections::HashMap;

use slotmap::SlotMap;

use super::storage::AnyStorage;
use super::{Component, ComponentSet, ComponentStorage, Entity, Query};

/// Errors raised when accessing component storages
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    /// No entity has ever had this component type
    #[error("No storage registered for component `{0}`")]
    MissingStorage(&'static str),

    /// The storage is already borrowed in a conflicting way
    #[error("Component storage `{0}` is already borrowed")]
    StorageBorrowed(&'static str),
}

/// ECS World containing all entities and components
pub struct World {
    entities: SlotMap<Entity, ()>,
    component_storages: HashMap<TypeId, RefCell<Box<dyn AnyStorage>>>,
}

impl World {
    /// Create a new world
    pub fn new() -> Self {
        Self {
            entities: SlotMap::with_key(),
            component_storages: HashMap::new(),
        }
    }

    /// Create a new entity
    pub fn create_entity(&mut self) -> Entity {
        self.entities.insert(())
    }

    /// Destroy an entity and every component it owns
    pub fn despawn(&mut self, entity: Entity) -> bool {
        if self.entities.remove(entity).is_none() {
            return false;
        }
        for storage in self.component_storages.values_mut() {
            storage.get_mut().remove_entity(entity);
        }
        true
    }

    /// Check whether an entity is alive
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.contains_key(entity)
    }

    /// Number of live entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Get an iterator over all entities
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.keys()
    }

    /// Add a component to an entity, replacing any previous one of the same type
    pub fn add_component<T: Component>(&mut self, entity: Entity, component: T) -> Option<T> {
        if !self.is_alive(entity) {
            log::warn!(
                "Ignoring {} added to dead entity {:?}",
                std::any::type_name::<T>(),
                entity
            );
            return None;
        }
        self.storage_entry::<T>().insert(entity, component)
    }

    /// Remove a component from an entity
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Option<T> {
        let storage = self.component_storages.get_mut(&TypeId::of::<T>())?;
        storage
            .get_mut()
            .as_any_mut()
            .downcast_mut::<ComponentStorage<T>>()?
            .remove(entity)
    }

    /// Check whether an entity has a component
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.component_storages
            .get(&TypeId::of::<T>())
            .and_then(|cell| cell.try_borrow().ok())
            .is_some_and(|storage| storage.contains(entity))
    }

    /// Get a component from an entity
    ///
    /// Returns `None` if the entity lacks the component or the storage is
    /// currently borrowed mutably.
    pub fn get_component<T: Component>(&self, entity: Entity) -> Option<Ref<'_, T>> {
        let storage = self.storage::<T>().ok()?;
        Ref::filter_map(storage, |storage| storage.get(entity)).ok()
    }

    /// Get a mutable component from an entity
    pub fn get_component_mut<T: Component>(&self, entity: Entity) -> Option<RefMut<'_, T>> {
        let storage = self.storage_mut::<T>().ok()?;
        RefMut::filter_map(storage, |storage| storage.get_mut(entity)).ok()
    }

    /// Shared access to every component of type `T`
    pub fn storage<T: Component>(&self) -> Result<Ref<'_, ComponentStorage<T>>, WorldError> {
        let name = std::any::type_name::<T>();
        let cell = self
            .component_storages
            .get(&TypeId::of::<T>())
            .ok_or(WorldError::MissingStorage(name))?;
        let storage = cell.try_borrow().map_err(|_| WorldError::StorageBorrowed(name))?;
        Ref::filter_map(storage, |storage| {
            storage.as_any().downcast_ref::<ComponentStorage<T>>()
        })
        .map_err(|_| WorldError::MissingStorage(name))
    }

    /// Exclusive access to every component of type `T`
    pub fn storage_mut<T: Component>(&self) -> Result<RefMut<'_, ComponentStorage<T>>, WorldError> {
        let name = std::any::type_name::<T>();
        let cell = self
            .component_storages
            .get(&TypeId::of::<T>())
            .ok_or(WorldError::MissingStorage(name))?;
        let storage = cell.try_borrow_mut().map_err(|_| WorldError::StorageBorrowed(name))?;
        RefMut::filter_map(storage, |storage| {
            storage.as_any_mut().downcast_mut::<ComponentStorage<T>>()
        })
        .map_err(|_| WorldError::MissingStorage(name))
    }

    /// Every entity that owns all components in `Q`
    ///
    /// Candidates are drawn from the smallest storage in the signature and
    /// checked against the remaining ones, so unrelated components are never
    /// scanned. A component type that no entity has ever carried yields an
    /// empty query.
    pub fn query<Q: ComponentSet>(&self) -> Result<Query<Q>, WorldError> {
        let signature = Q::signature();

        let mut storages = Vec::with_capacity(signature.len());
        for ty in signature.types() {
            let Some(cell) = self.component_storages.get(&ty.id) else {
                return Ok(Query::new(Vec::new()));
            };
            storages.push(cell.try_borrow().map_err(|_| WorldError::StorageBorrowed(ty.name))?);
        }

        let Some(smallest) = (0..storages.len()).min_by_key(|&i| storages[i].len()) else {
            return Ok(Query::new(Vec::new()));
        };

        let matches = storages[smallest]
            .entities()
            .iter()
            .copied()
            .filter(|&entity| {
                storages
                    .iter()
                    .enumerate()
                    .all(|(i, storage)| i == smallest || storage.contains(entity))
            })
            .collect();

        Ok(Query::new(matches))
    }

    fn storage_entry<T: Component>(&mut self) -> &mut ComponentStorage<T> {
        let cell = self
            .component_storages
            .entry(TypeId::of::<T>())
            .or_insert_with(|| RefCell::new(Box::new(ComponentStorage::<T>::new())));
        match cell.get_mut().as_any_mut().downcast_mut::<ComponentStorage<T>>() {
            Some(storage) => storage,
            None => unreachable!("storage registered under the wrong TypeId"),
        }
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

    #[derive(Debug, Clone, PartialEq)]
    struct Position(f32);
    impl Component for Position {}

    #[derive(Debug, Clone, PartialEq)]
    struct Velocity(f32);
    impl Component for Velocity {}

    #[derive(Debug, Clone, PartialEq)]
    struct Tag;
    impl Component for Tag {}

    #[test]
    fn test_add_and_get_component() {
        let mut world = World::new();
        let entity = world.create_entity();
        world.add_component(entity, Position(1.0));

        assert!(world.has_component::<Position>(entity));
        assert!(!world.has_component::<Velocity>(entity));
        assert_eq!(*world.get_component::<Position>(entity).unwrap(), Position(1.0));

        world.get_component_mut::<Position>(entity).unwrap().0 = 5.0;
        assert_eq!(world.get_component::<Position>(entity).unwrap().0, 5.0);
    }

    #[test]
    fn test_query_excludes_partial_matches() {
        let mut world = World::new();
        let both = world.create_entity();
        let only_position = world.create_entity();
        let only_velocity = world.create_entity();

        world.add_component(both, Position(0.0));
        world.add_component(both, Velocity(1.0));
        world.add_component(only_position, Position(0.0));
        world.add_component(only_velocity, Velocity(1.0));

        let query = world.query::<(Position, Velocity)>().unwrap();
        assert_eq!(query.entities(), &[both]);
    }

    #[test]
    fn test_query_unregistered_component_is_empty() {
        let mut world = World::new();
        let entity = world.create_entity();
        world.add_component(entity, Position(0.0));

        let query = world.query::<(Position, Tag)>().unwrap();
        assert!(query.is_empty());
    }

    #[test]
    fn test_despawn_removes_components() {
        let mut world = World::new();
        let entity = world.create_entity();
        world.add_component(entity, Position(0.0));
        world.add_component(entity, Velocity(0.0));

        assert!(world.despawn(entity));
        assert!(!world.is_alive(entity));
        assert!(world.query::<(Position,)>().unwrap().is_empty());
        assert!(!world.despawn(entity));

        // Components cannot be attached to a dead entity
        assert!(world.add_component(entity, Position(1.0)).is_none());
        assert!(!world.has_component::<Position>(entity));
    }

    #[test]
    fn test_remove_component() {
        let mut world = World::new();
        let entity = world.create_entity();
        world.add_component(entity, Position(3.0));

        assert_eq!(world.remove_component::<Position>(entity), Some(Position(3.0)));
        assert_eq!(world.remove_component::<Position>(entity), None);
        assert_eq!(world.remove_component::<Velocity>(entity), None);
    }

    #[test]
    fn test_conflicting_borrow_is_an_error() {
        let mut world = World::new();
        let entity = world.create_entity();
        world.add_component(entity, Position(0.0));

        let _guard = world.storage_mut::<Position>().unwrap();
        assert!(matches!(world.storage::<Position>(), Err(WorldError::StorageBorrowed(_))));
        assert!(matches!(world.query::<(Position,)>(), Err(WorldError::StorageBorrowed(_))));
    }

    #[test]
    fn test_disjoint_storages_borrow_together() {
        let mut world = World::new();
        let entity = world.create_entity();
        world.add_component(entity, Position(0.0));
        world.add_component(entity, Velocity(2.0));

        let velocities = world.storage::<Velocity>().unwrap();
        let mut positions = world.storage_mut::<Position>().unwrap();
        for (entity, position) in positions.iter_mut() {
            position.0 += velocities.get(entity).unwrap().0;
        }
        drop(positions);
        drop(velocities);

        assert_eq!(world.get_component::<Position>(entity).unwrap().0, 2.0);
    }

    #[test]
    fn test_missing_storage_error() {
        let world = World::new();
        assert!(matches!(world.storage::<Tag>(), Err(WorldError::MissingStorage(_))));
    }
}
