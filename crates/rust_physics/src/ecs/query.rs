//! Query system for component access
//!
//! A system declares the component types it needs as a tuple, e.g.
//! `(SphereColliderComponent, RigidBodyComponent, TransformComponent)`.
//! The tuple's [`Signature`] is published to the scheduler and used by the
//! [`World`](crate::ecs::World) to find every entity that owns all of them.

use std::any::TypeId;
use std::fmt;
use std::marker::PhantomData;

use crate::ecs::{Component, Entity};

/// One component type within a signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentType {
    /// Runtime type identifier
    pub id: TypeId,
    /// Type name, for logs
    pub name: &'static str,
}

impl ComponentType {
    /// Describe component type `T`
    pub fn of<T: Component>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: short_type_name(std::any::type_name::<T>()),
        }
    }
}

fn short_type_name(full: &'static str) -> &'static str {
    full.rsplit("::").next().unwrap_or(full)
}

/// The set of component types a system requires
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Signature {
    types: Vec<ComponentType>,
}

impl Signature {
    /// Build a signature, dropping duplicate types
    pub fn new(types: impl IntoIterator<Item = ComponentType>) -> Self {
        let mut unique: Vec<ComponentType> = Vec::new();
        for ty in types {
            if !unique.iter().any(|existing| existing.id == ty.id) {
                unique.push(ty);
            }
        }
        Self { types: unique }
    }

    /// Component types in declaration order
    pub fn types(&self) -> &[ComponentType] {
        &self.types
    }

    /// Number of component types (the `k` of an O(k) membership check)
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// True for the empty signature
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Does this signature require component `T`?
    pub fn requires<T: Component>(&self) -> bool {
        let id = TypeId::of::<T>();
        self.types.iter().any(|ty| ty.id == id)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<")?;
        for (i, ty) in self.types.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", ty.name)?;
        }
        write!(f, ">")
    }
}

/// A compile-time set of component types
///
/// Implemented for tuples of one to four components.
pub trait ComponentSet: 'static {
    /// The type-level signature of this set
    fn signature() -> Signature;
}

macro_rules! impl_component_set {
    ($($name:ident),+) => {
        impl<$($name: Component),+> ComponentSet for ($($name,)+) {
            fn signature() -> Signature {
                Signature::new([$(ComponentType::of::<$name>()),+])
            }
        }
    };
}

impl_component_set!(A);
impl_component_set!(A, B);
impl_component_set!(A, B, C);
impl_component_set!(A, B, C, D);

/// Entities matching a component set, captured once per tick
///
/// Entities are held in ascending order and each appears once, so iterating
/// a query never revisits an entity.
pub struct Query<Q: ComponentSet> {
    entities: Vec<Entity>,
    _phantom: PhantomData<fn() -> Q>,
}

impl<Q: ComponentSet> Query<Q> {
    /// Create a query over the given matches
    pub(crate) fn new(mut entities: Vec<Entity>) -> Self {
        entities.sort_unstable();
        entities.dedup();
        Self {
            entities,
            _phantom: PhantomData,
        }
    }

    /// The signature this query was built from
    pub fn signature(&self) -> Signature {
        Q::signature()
    }

    /// Matching entities
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Iterate over matching entities
    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.iter().copied()
    }

    /// Every unordered pair of distinct matches, lower entity first
    pub fn pairs(&self) -> impl Iterator<Item = (Entity, Entity)> + '_ {
        self.entities.iter().enumerate().flat_map(move |(i, &a)| {
            self.entities[i + 1..].iter().map(move |&b| (a, b))
        })
    }

    /// Number of matching entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// True if nothing matched
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl<'q, Q: ComponentSet> IntoIterator for &'q Query<Q> {
    type Item = Entity;
    type IntoIter = std::iter::Copied<std::slice::Iter<'q, Entity>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.iter().copied()
    }
}
