//! Rigid body component
//!
//! Kinematic state consumed by the resolution solver. Mass is stored as its
//! inverse so that an immovable body is simply `inverse_mass == 0`.

use serde::{Deserialize, Serialize};

use crate::ecs::Component;
use crate::foundation::math::Vec3;

use super::ComponentError;

/// Rigid body kinematic state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RigidBodyComponent {
    inverse_mass: f32,

    /// Linear velocity in units per second
    pub velocity: Vec3,
}

impl Component for RigidBodyComponent {}

impl RigidBodyComponent {
    /// Create a dynamic body with the given mass
    pub fn new(mass: f32) -> Result<Self, ComponentError> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(ComponentError::InvalidMass(mass));
        }
        Ok(Self {
            inverse_mass: 1.0 / mass,
            velocity: Vec3::zeros(),
        })
    }

    /// Create an immovable body
    pub fn new_static() -> Self {
        Self {
            inverse_mass: 0.0,
            velocity: Vec3::zeros(),
        }
    }

    /// Builder pattern: Set initial velocity
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Inverse mass (0 for immovable bodies)
    pub fn inverse_mass(&self) -> f32 {
        self.inverse_mass
    }

    /// Mass, or `None` for an immovable body
    pub fn mass(&self) -> Option<f32> {
        (self.inverse_mass > 0.0).then(|| 1.0 / self.inverse_mass)
    }

    /// True for immovable bodies
    pub fn is_static(&self) -> bool {
        self.inverse_mass == 0.0
    }

    /// Change an immovable body into a dynamic one or vice versa
    pub fn set_mass(&mut self, mass: Option<f32>) -> Result<(), ComponentError> {
        self.inverse_mass = match mass {
            Some(mass) if mass.is_finite() && mass > 0.0 => 1.0 / mass,
            Some(mass) => return Err(ComponentError::InvalidMass(mass)),
            None => {
                self.velocity = Vec3::zeros();
                0.0
            }
        };
        Ok(())
    }

    /// Apply an instantaneous impulse; immovable bodies ignore it
    pub fn apply_impulse(&mut self, impulse: Vec3) {
        if !self.is_static() {
            self.velocity += impulse * self.inverse_mass;
        }
    }
}

impl Default for RigidBodyComponent {
    fn default() -> Self {
        Self::new_static()
    }
}
