//! World-space shapes
//!
//! Collider components hold local geometry; these are the temporary
//! world-space values the detectors actually test.

use crate::foundation::math::Vec3;

/// Axis-aligned box in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBox {
    /// Box center
    pub center: Vec3,
    /// Half size along each world axis
    pub half_extents: Vec3,
}

/// Sphere in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldSphere {
    /// Sphere center
    pub center: Vec3,
    /// Sphere radius
    pub radius: f32,
}

/// Plane in world space, `dot(normal, p) == distance`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldPlane {
    /// Unit normal pointing out of the solid half-space
    pub normal: Vec3,
    /// Signed distance from the world origin along the normal
    pub distance: f32,
}

impl WorldPlane {
    /// Signed distance of a point above the plane
    pub fn signed_distance(&self, point: &Vec3) -> f32 {
        self.normal.dot(point) - self.distance
    }
}

/// Axis-aligned bounds used for broad-phase culling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Create bounds from corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Inclusive overlap test
    ///
    /// Touching bounds count as overlapping so the narrowphase makes the
    /// final call on exact contact.
    pub fn overlaps(&self, other: &Self) -> bool {
        (0..3).all(|axis| self.min[axis] <= other.max[axis] && other.min[axis] <= self.max[axis])
    }
}

impl From<&WorldBox> for Aabb {
    fn from(shape: &WorldBox) -> Self {
        Self::new(shape.center - shape.half_extents, shape.center + shape.half_extents)
    }
}

impl From<&WorldSphere> for Aabb {
    fn from(shape: &WorldSphere) -> Self {
        let extent = Vec3::repeat(shape.radius);
        Self::new(shape.center - extent, shape.center + extent)
    }
}
