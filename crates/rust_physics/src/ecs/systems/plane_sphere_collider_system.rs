//! Plane-versus-sphere collision system
//!
//! Spheres are dispatched on `(SphereCollider, RigidBody, Transform)`; planes
//! only need a `PlaneColliderComponent`. Planes are world-space geometry and
//! never move: any rigid body or transform on a plane entity is ignored.

use crate::ecs::components::{
    CollisionFilterComponent, PlaneColliderComponent, RigidBodyComponent, SphereColliderComponent,
    TransformComponent,
};
use crate::ecs::{ComponentSet, Signature, System, SystemError, TickContext};
use crate::physics::{plane_vs_sphere, BodyMut, CollisionEvent, ContactSolver, ShapePair};

use super::{filters_allow, optional_storage};

const NAME: &str = "plane_sphere_collider";

/// Pushes spheres out of the solid side of every plane
#[derive(Debug, Clone, Default)]
pub struct PlaneSphereColliderSystem {
    solver: ContactSolver,
}

impl PlaneSphereColliderSystem {
    /// Create the system with the given solver
    pub fn new(solver: ContactSolver) -> Self {
        Self { solver }
    }

    /// Solver used for resolution
    pub fn solver(&self) -> &ContactSolver {
        &self.solver
    }
}

impl System for PlaneSphereColliderSystem {
    fn name(&self) -> &'static str {
        NAME
    }

    fn signature(&self) -> Signature {
        <(SphereColliderComponent, RigidBodyComponent, TransformComponent)>::signature()
    }

    fn fixed_update(&mut self, ctx: &mut TickContext<'_>) -> Result<(), SystemError> {
        let world = ctx.world;
        let tick = ctx.tick;
        let err = SystemError::world(NAME);

        let spheres = world
            .query::<(SphereColliderComponent, RigidBodyComponent, TransformComponent)>()
            .map_err(err)?;
        let planes = world.query::<(PlaneColliderComponent,)>().map_err(err)?;
        if spheres.is_empty() || planes.is_empty() {
            return Ok(());
        }

        let plane_colliders = world.storage::<PlaneColliderComponent>().map_err(err)?;
        let sphere_colliders = world.storage::<SphereColliderComponent>().map_err(err)?;
        let filters = optional_storage::<CollisionFilterComponent>(world).map_err(err)?;
        let mut bodies = world.storage_mut::<RigidBodyComponent>().map_err(err)?;
        let mut transforms = world.storage_mut::<TransformComponent>().map_err(err)?;

        for plane_entity in &planes {
            let Some(plane) = plane_colliders.get(plane_entity).map(|p| p.world_plane()) else {
                continue;
            };

            for sphere_entity in &spheres {
                if sphere_entity == plane_entity
                    || !filters_allow(filters.as_deref(), sphere_entity, plane_entity)
                {
                    continue;
                }
                let (Some(collider), Some(body), Some(transform)) = (
                    sphere_colliders.get(sphere_entity),
                    bodies.get_mut(sphere_entity),
                    transforms.get_mut(sphere_entity),
                ) else {
                    continue;
                };

                let Some(hit) = plane_vs_sphere(&plane, &collider.world_sphere(transform)) else {
                    continue;
                };

                let resolution = self.solver.resolve_static(&hit, BodyMut::new(body, transform));
                if resolution.is_noop() {
                    continue;
                }
                ctx.record(CollisionEvent {
                    tick,
                    shapes: ShapePair::PlaneSphere,
                    entity_a: sphere_entity,
                    entity_b: plane_entity,
                    intersection: hit,
                });
            }
        }

        Ok(())
    }
}
