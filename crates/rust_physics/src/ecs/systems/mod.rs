//! ECS collider systems
//!
//! One system per detector. Each runs once per fixed tick, detects overlaps
//! between entities matching its signature and resolves them in place.

pub mod pairwise;
pub mod aabb_collider_system;
pub mod sphere_collider_system;
pub mod plane_sphere_collider_system;

pub use pairwise::{PairCollider, PairwiseColliderSystem};
pub use aabb_collider_system::AabbColliderSystem;
pub use sphere_collider_system::SphereColliderSystem;
pub use plane_sphere_collider_system::PlaneSphereColliderSystem;

use std::cell::Ref;

use crate::ecs::components::CollisionFilterComponent;
use crate::ecs::{Component, ComponentStorage, Entity, World, WorldError};

/// Shared access to a storage that may never have been created
pub(crate) fn optional_storage<T: Component>(
    world: &World,
) -> Result<Option<Ref<'_, ComponentStorage<T>>>, WorldError> {
    match world.storage::<T>() {
        Ok(storage) => Ok(Some(storage)),
        Err(WorldError::MissingStorage(_)) => Ok(None),
        Err(err) => Err(err),
    }
}

/// Check layer filters; entities without a filter collide with everything
pub(crate) fn filters_allow(
    filters: Option<&ComponentStorage<CollisionFilterComponent>>,
    a: Entity,
    b: Entity,
) -> bool {
    let Some(filters) = filters else {
        return true;
    };
    let filter_a = filters.get(a).copied().unwrap_or_default();
    let filter_b = filters.get(b).copied().unwrap_or_default();
    filter_a.allows(&filter_b)
}
