//! Transform component for the ECS system
//!
//! Pure data component. The collider systems read `position` and `scale` and
//! write `position` only; rotation is carried for the rest of the engine.

use serde::{Deserialize, Serialize};

use crate::ecs::Component;
use crate::foundation::math::{self, Quat, Vec3};

use super::ComponentError;

/// ECS Transform component
///
/// Spatial transformation in world space, Y-up right-handed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformComponent {
    /// World space position
    pub position: Vec3,

    /// World space rotation quaternion
    pub rotation: Quat,

    /// World space scale factors
    ///
    /// [`with_scale`](Self::with_scale) rejects negative factors, but direct
    /// writes are not checked; colliders use the magnitude of each factor.
    pub scale: Vec3,
}

impl Component for TransformComponent {}

impl Default for TransformComponent {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl TransformComponent {
    /// Create identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create from position only
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create from position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Builder pattern: Set position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Builder pattern: Set rotation from quaternion
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder pattern: Set scale (non-uniform)
    ///
    /// Negative or non-finite scale is rejected.
    pub fn with_scale(mut self, scale: Vec3) -> Result<Self, ComponentError> {
        if !math::is_finite(&scale) || scale.iter().any(|&s| s < 0.0) {
            return Err(ComponentError::InvalidScale(scale.x, scale.y, scale.z));
        }
        self.scale = scale;
        Ok(self)
    }

    /// Builder pattern: Set scale (uniform)
    pub fn with_uniform_scale(self, scale: f32) -> Result<Self, ComponentError> {
        self.with_scale(Vec3::new(scale, scale, scale))
    }

    /// Move by `offset` in world space
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }

    /// Largest scale magnitude, used to scale sphere radii
    pub fn max_scale(&self) -> f32 {
        self.scale.amax()
    }
}
