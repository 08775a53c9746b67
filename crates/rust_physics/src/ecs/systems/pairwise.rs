//! Pairwise collider sweep shared by the box and sphere systems
//!
//! Per tick: snapshot the entities owning `(C, RigidBody, Transform)`, ask the
//! broad phase for candidate pairs, then detect and resolve each pair in
//! turn. Every pair is tested against the positions left by the pairs
//! resolved before it.
//!
//! Bounds are taken once, before any pair is resolved. A culling broad phase
//! such as [`SweepAndPrune`](crate::physics::SweepAndPrune) therefore never
//! offers a pair that only starts to overlap after an earlier resolution in
//! the same tick; that pair is picked up on the next tick instead.

use std::marker::PhantomData;

use crate::ecs::components::{CollisionFilterComponent, RigidBodyComponent, TransformComponent};
use crate::ecs::{Component, ComponentSet, Entity, Signature, System, SystemError, TickContext};
use crate::physics::{
    AllPairs, Aabb, BodyMut, BroadPhase, CollisionEvent, ContactSolver, IntersectionData, ShapePair,
};

use super::{filters_allow, optional_storage};

/// A collider shape that is tested against others of the same kind
pub trait PairCollider: Component {
    /// System name used in logs
    const SYSTEM_NAME: &'static str;

    /// Detector tag recorded on events
    const SHAPES: ShapePair;

    /// World-space bounds for broad-phase culling
    fn bounds(&self, transform: &TransformComponent) -> Aabb;

    /// Narrowphase test; `direction` points the way `a` must move
    fn detect(
        a: &Self,
        transform_a: &TransformComponent,
        b: &Self,
        transform_b: &TransformComponent,
    ) -> Option<IntersectionData>;
}

/// Detects and resolves overlaps between every pair of `C` colliders
pub struct PairwiseColliderSystem<C: PairCollider> {
    broad_phase: Box<dyn BroadPhase>,
    solver: ContactSolver,
    _collider: PhantomData<fn() -> C>,
}

impl<C: PairCollider> PairwiseColliderSystem<C> {
    /// Create a system that tests every pair
    pub fn new(solver: ContactSolver) -> Self {
        Self::with_broad_phase(solver, Box::new(AllPairs))
    }

    /// Create a system with a custom broad phase
    pub fn with_broad_phase(solver: ContactSolver, broad_phase: Box<dyn BroadPhase>) -> Self {
        Self {
            broad_phase,
            solver,
            _collider: PhantomData,
        }
    }

    /// Solver used for resolution
    pub fn solver(&self) -> &ContactSolver {
        &self.solver
    }
}

impl<C: PairCollider> Default for PairwiseColliderSystem<C> {
    fn default() -> Self {
        Self::new(ContactSolver::default())
    }
}

impl<C: PairCollider> System for PairwiseColliderSystem<C> {
    fn name(&self) -> &'static str {
        C::SYSTEM_NAME
    }

    fn signature(&self) -> Signature {
        <(C, RigidBodyComponent, TransformComponent)>::signature()
    }

    fn fixed_update(&mut self, ctx: &mut TickContext<'_>) -> Result<(), SystemError> {
        let world = ctx.world;
        let tick = ctx.tick;
        let err = SystemError::world(C::SYSTEM_NAME);

        let matching = world
            .query::<(C, RigidBodyComponent, TransformComponent)>()
            .map_err(err)?;
        if matching.len() < 2 {
            return Ok(());
        }

        let colliders = world.storage::<C>().map_err(err)?;
        let filters = optional_storage::<CollisionFilterComponent>(world).map_err(err)?;
        let mut bodies = world.storage_mut::<RigidBodyComponent>().map_err(err)?;
        let mut transforms = world.storage_mut::<TransformComponent>().map_err(err)?;

        let bounds: Vec<(Entity, Aabb)> = matching
            .iter()
            .filter_map(|entity| {
                let collider = colliders.get(entity)?;
                let transform = transforms.get(entity)?;
                Some((entity, collider.bounds(transform)))
            })
            .collect();

        let candidates = self.broad_phase.candidate_pairs(&bounds);
        log::trace!(
            "{}: {} candidate pairs from {} ({} bodies)",
            C::SYSTEM_NAME,
            candidates.len(),
            self.broad_phase.name(),
            bounds.len()
        );

        for (a, b) in candidates {
            if !filters_allow(filters.as_deref(), a, b) {
                continue;
            }
            let (Some(collider_a), Some(collider_b)) = (colliders.get(a), colliders.get(b)) else {
                continue;
            };
            let Some((transform_a, transform_b)) = transforms.get_pair_mut(a, b) else {
                continue;
            };
            let Some(hit) = C::detect(collider_a, transform_a, collider_b, transform_b) else {
                continue;
            };
            let Some((body_a, body_b)) = bodies.get_pair_mut(a, b) else {
                continue;
            };

            let resolution = self.solver.resolve(
                &hit,
                BodyMut::new(body_a, transform_a),
                BodyMut::new(body_b, transform_b),
            );
            // Overlaps between two static bodies stay put and are not reported
            if resolution.is_noop() {
                continue;
            }
            ctx.record(CollisionEvent {
                tick,
                shapes: C::SHAPES,
                entity_a: a,
                entity_b: b,
                intersection: hit,
            });
        }

        Ok(())
    }
}
