//! Box-versus-box collision system

use crate::ecs::components::{BoxColliderComponent, TransformComponent};
use crate::physics::{box_vs_box, Aabb, IntersectionData, ShapePair};

use super::pairwise::{PairCollider, PairwiseColliderSystem};

/// Resolves overlaps between axis-aligned boxes
pub type AabbColliderSystem = PairwiseColliderSystem<BoxColliderComponent>;

impl PairCollider for BoxColliderComponent {
    const SYSTEM_NAME: &'static str = "aabb_collider";
    const SHAPES: ShapePair = ShapePair::BoxBox;

    fn bounds(&self, transform: &TransformComponent) -> Aabb {
        Aabb::from(&self.world_box(transform))
    }

    fn detect(
        a: &Self,
        transform_a: &TransformComponent,
        b: &Self,
        transform_b: &TransformComponent,
    ) -> Option<IntersectionData> {
        box_vs_box(&a.world_box(transform_a), &b.world_box(transform_b))
    }
}
