//! Intersection results and collision events

use std::fmt;

use crate::ecs::Entity;
use crate::foundation::math::Vec3;

/// Result of a narrowphase test, valid for the current tick only
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionData {
    /// Penetration depth, positive when overlapping
    pub distance: f32,
    /// Unit vector along which the first body must move to separate
    pub direction: Vec3,
}

impl IntersectionData {
    /// Create a new intersection result
    pub fn new(distance: f32, direction: Vec3) -> Self {
        Self { distance, direction }
    }

    /// Minimum translation vector for the first body
    pub fn translation(&self) -> Vec3 {
        self.direction * self.distance
    }
}

/// Which detector produced a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapePair {
    /// Box versus box
    BoxBox,
    /// Sphere versus sphere
    SphereSphere,
    /// Plane versus sphere
    PlaneSphere,
}

impl fmt::Display for ShapePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BoxBox => "box/box",
            Self::SphereSphere => "sphere/sphere",
            Self::PlaneSphere => "plane/sphere",
        };
        f.write_str(name)
    }
}

/// A contact that was detected and resolved during a tick
///
/// Overlaps the solver leaves untouched, such as two static bodies, are not
/// reported.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEvent {
    /// Fixed tick the contact happened on
    pub tick: u64,
    /// Detector that found it
    pub shapes: ShapePair,
    /// First body; `intersection.direction` points away from `entity_b`
    pub entity_a: Entity,
    /// Second body (the plane, for plane/sphere contacts)
    pub entity_b: Entity,
    /// Penetration before resolution
    pub intersection: IntersectionData,
}

impl CollisionEvent {
    /// Check whether `entity` took part in this contact
    pub fn involves(&self, entity: Entity) -> bool {
        self.entity_a == entity || self.entity_b == entity
    }
}
