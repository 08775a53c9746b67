//! Collider components for ECS
//!
//! Colliders store local geometry only. Position authority belongs to the
//! owning entity's [`TransformComponent`]; world-space shapes are built on
//! demand for each test.

use serde::{Deserialize, Serialize};

use crate::ecs::Component;
use crate::foundation::math::{self, Vec3};
use crate::physics::shape::{WorldBox, WorldPlane, WorldSphere};
use crate::physics::CollisionLayers;

use super::{ComponentError, TransformComponent};

/// Axis-aligned box centered on the transform position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxColliderComponent {
    half_extents: Vec3,
}

impl Component for BoxColliderComponent {}

impl BoxColliderComponent {
    /// Create a box from its half-extents
    pub fn new(half_extents: Vec3) -> Result<Self, ComponentError> {
        if !math::is_finite(&half_extents) || half_extents.iter().any(|&h| h < 0.0) {
            return Err(ComponentError::InvalidHalfExtents(
                half_extents.x,
                half_extents.y,
                half_extents.z,
            ));
        }
        Ok(Self { half_extents })
    }

    /// Create a cube with the given half-extent on every axis
    pub fn cube(half_extent: f32) -> Result<Self, ComponentError> {
        Self::new(Vec3::new(half_extent, half_extent, half_extent))
    }

    /// Local half-extents
    pub fn half_extents(&self) -> Vec3 {
        self.half_extents
    }

    /// World-space box for the given transform
    ///
    /// Half-extents are scaled per axis by the magnitude of each scale
    /// factor; rotation is ignored, the box stays axis-aligned in world space.
    pub fn world_box(&self, transform: &TransformComponent) -> WorldBox {
        WorldBox {
            center: transform.position,
            half_extents: self.half_extents.component_mul(&transform.scale.abs()),
        }
    }
}

/// Sphere centered on the transform position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphereColliderComponent {
    radius: f32,
}

impl Component for SphereColliderComponent {}

impl SphereColliderComponent {
    /// Create a sphere with the given radius
    pub fn new(radius: f32) -> Result<Self, ComponentError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(ComponentError::InvalidRadius(radius));
        }
        Ok(Self { radius })
    }

    /// Local radius
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// World-space sphere, radius scaled by the largest scale axis
    pub fn world_sphere(&self, transform: &TransformComponent) -> WorldSphere {
        WorldSphere {
            center: transform.position,
            radius: self.radius * transform.max_scale(),
        }
    }
}

/// Infinite plane bounding a solid half-space
///
/// Defined directly in world space: the set of points `p` with
/// `dot(normal, p) == distance`. Everything behind the normal is solid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaneColliderComponent {
    normal: Vec3,
    distance: f32,
}

impl Component for PlaneColliderComponent {}

impl PlaneColliderComponent {
    /// Create a plane; the normal is normalized
    pub fn new(normal: Vec3, distance: f32) -> Result<Self, ComponentError> {
        if !distance.is_finite() {
            return Err(ComponentError::InvalidDistance(distance));
        }
        let unit = if math::is_finite(&normal) {
            normal.try_normalize(math::NORMALIZE_EPSILON)
        } else {
            None
        };
        let normal = unit.ok_or(ComponentError::InvalidNormal(normal.x, normal.y, normal.z))?;
        Ok(Self { normal, distance })
    }

    /// Horizontal ground plane at the given height
    pub fn ground(height: f32) -> Result<Self, ComponentError> {
        Self::new(math::WORLD_UP, height)
    }

    /// Unit normal
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Signed distance from the world origin along the normal
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// World-space plane
    pub fn world_plane(&self) -> WorldPlane {
        WorldPlane {
            normal: self.normal,
            distance: self.distance,
        }
    }
}

/// Optional layer filtering for any collider
///
/// Two entities are tested only if each one's layer is in the other's mask.
/// Entities without this component collide with everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionFilterComponent {
    /// Layers this entity is on
    pub layer: CollisionLayers,

    /// Layers this entity collides with
    pub mask: CollisionLayers,
}

impl Component for CollisionFilterComponent {}

impl CollisionFilterComponent {
    /// Create a filter with specific layer and mask
    pub fn new(layer: CollisionLayers, mask: CollisionLayers) -> Self {
        Self { layer, mask }
    }

    /// Check whether two filters allow a collision
    pub fn allows(&self, other: &Self) -> bool {
        CollisionLayers::should_collide(self.layer, self.mask, other.layer, other.mask)
    }
}

impl Default for CollisionFilterComponent {
    fn default() -> Self {
        Self {
            layer: CollisionLayers::all(),
            mask: CollisionLayers::all(),
        }
    }
}
