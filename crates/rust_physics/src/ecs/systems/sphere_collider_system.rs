//! Sphere-versus-sphere collision system

use crate::ecs::components::{SphereColliderComponent, TransformComponent};
use crate::physics::{sphere_vs_sphere, Aabb, IntersectionData, ShapePair};

use super::pairwise::{PairCollider, PairwiseColliderSystem};

/// Resolves overlaps between spheres
pub type SphereColliderSystem = PairwiseColliderSystem<SphereColliderComponent>;

impl PairCollider for SphereColliderComponent {
    const SYSTEM_NAME: &'static str = "sphere_collider";
    const SHAPES: ShapePair = ShapePair::SphereSphere;

    fn bounds(&self, transform: &TransformComponent) -> Aabb {
        Aabb::from(&self.world_sphere(transform))
    }

    fn detect(
        a: &Self,
        transform_a: &TransformComponent,
        b: &Self,
        transform_b: &TransformComponent,
    ) -> Option<IntersectionData> {
        sphere_vs_sphere(&a.world_sphere(transform_a), &b.world_sphere(transform_b))
    }
}
