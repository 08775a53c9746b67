//! ECS Components module
//!
//! Passive data records consumed by the collider systems.

pub mod transform;
pub mod rigid_body;
pub mod collider;

pub use transform::TransformComponent;
pub use rigid_body::RigidBodyComponent;
pub use collider::{
    BoxColliderComponent, SphereColliderComponent, PlaneColliderComponent,
    CollisionFilterComponent,
};

/// Rejected component parameters
///
/// Components validate on construction so the detectors never see
/// malformed geometry.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ComponentError {
    /// Mass must be finite and strictly positive
    #[error("Invalid mass {0}: must be finite and positive")]
    InvalidMass(f32),

    /// Radius must be finite and strictly positive
    #[error("Invalid radius {0}: must be finite and positive")]
    InvalidRadius(f32),

    /// Half-extents must be finite and non-negative
    #[error("Invalid half-extents ({0}, {1}, {2}): must be finite and non-negative")]
    InvalidHalfExtents(f32, f32, f32),

    /// Scale must be finite and non-negative
    #[error("Invalid scale ({0}, {1}, {2}): must be finite and non-negative")]
    InvalidScale(f32, f32, f32),

    /// Plane normal must be finite and non-zero
    #[error("Invalid plane normal ({0}, {1}, {2}): must be finite and non-zero")]
    InvalidNormal(f32, f32, f32),

    /// Plane distance must be finite
    #[error("Invalid plane distance {0}: must be finite")]
    InvalidDistance(f32),
}
