//! Component Storage
//!
//! Sparse-set storage: components are packed densely for iteration, and a
//! slotmap `SecondaryMap` maps each entity to its dense slot for O(1) lookup.

use std::any::Any;
use slotmap::SecondaryMap;

use crate::ecs::{Component, Entity};

/// Dense storage for every component of one type
pub struct ComponentStorage<T: Component> {
    dense: Vec<T>,
    owners: Vec<Entity>,
    slots: SecondaryMap<Entity, usize>,
}

impl<T: Component> ComponentStorage<T> {
    /// Create an empty storage
    pub fn new() -> Self {
        Self {
            dense: Vec::new(),
            owners: Vec::new(),
            slots: SecondaryMap::new(),
        }
    }

    /// Insert a component, returning the one it replaced
    pub fn insert(&mut self, entity: Entity, component: T) -> Option<T> {
        if let Some(&slot) = self.slots.get(entity) {
            return Some(std::mem::replace(&mut self.dense[slot], component));
        }

        self.slots.insert(entity, self.dense.len());
        self.dense.push(component);
        self.owners.push(entity);
        None
    }

    /// Remove an entity's component
    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        let slot = self.slots.remove(entity)?;
        let removed = self.dense.swap_remove(slot);
        self.owners.swap_remove(slot);

        // The former last element now lives in `slot`
        if let Some(&moved) = self.owners.get(slot) {
            self.slots.insert(moved, slot);
        }
        Some(removed)
    }

    /// Get an entity's component
    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.slots.get(entity).map(|&slot| &self.dense[slot])
    }

    /// Get an entity's component mutably
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        let slot = *self.slots.get(entity)?;
        Some(&mut self.dense[slot])
    }

    /// Get mutable access to the components of two distinct entities
    ///
    /// Returns `None` if `a == b` or either entity has no component.
    pub fn get_pair_mut(&mut self, a: Entity, b: Entity) -> Option<(&mut T, &mut T)> {
        let slot_a = *self.slots.get(a)?;
        let slot_b = *self.slots.get(b)?;
        if slot_a == slot_b {
            return None;
        }

        if slot_a < slot_b {
            let (head, tail) = self.dense.split_at_mut(slot_b);
            Some((&mut head[slot_a], &mut tail[0]))
        } else {
            let (head, tail) = self.dense.split_at_mut(slot_a);
            Some((&mut tail[0], &mut head[slot_b]))
        }
    }

    /// Check whether an entity has a component here
    pub fn contains(&self, entity: Entity) -> bool {
        self.slots.contains_key(entity)
    }

    /// Number of stored components
    pub fn len(&self) -> usize {
        self.dense.len()
    }

    /// True if no components are stored
    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    /// Entities owning a component, in dense order
    pub fn entities(&self) -> &[Entity] {
        &self.owners
    }

    /// Iterate over `(entity, component)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.owners.iter().copied().zip(self.dense.iter())
    }

    /// Iterate mutably over `(entity, component)` pairs
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.owners.iter().copied().zip(self.dense.iter_mut())
    }
}

impl<T: Component> Default for ComponentStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Type-erased view of a storage, used by the world for bookkeeping
pub(crate) trait AnyStorage: Any {
    fn contains(&self, entity: Entity) -> bool;
    fn remove_entity(&mut self, entity: Entity);
    fn len(&self) -> usize;
    fn entities(&self) -> &[Entity];
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> AnyStorage for ComponentStorage<T> {
    fn contains(&self, entity: Entity) -> bool {
        ComponentStorage::contains(self, entity)
    }

    fn remove_entity(&mut self, entity: Entity) {
        self.remove(entity);
    }

    fn len(&self) -> usize {
        ComponentStorage::len(self)
    }

    fn entities(&self) -> &[Entity] {
        ComponentStorage::entities(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
