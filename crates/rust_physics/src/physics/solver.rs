//! Resolution solver
//!
//! Single-pass, per-pair resolution: each detected contact is resolved on its
//! own, with no iteration across simultaneous contacts.
//!
//! 1. Positional correction: the penetration depth is split between the two
//!    bodies in proportion to their inverse mass, moving the first body along
//!    `direction` and the second against it.
//! 2. Velocity correction: the part of the relative velocity along
//!    `direction` that drives the bodies together is removed (scaled by
//!    restitution). Separating bodies keep their velocity.
//!
//! Immovable bodies (`inverse_mass == 0`) are never written to.

use crate::ecs::components::{RigidBodyComponent, TransformComponent};
use crate::foundation::math::Vec3;

use super::intersection::IntersectionData;

/// Tuning for the contact solver
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverSettings {
    /// Bounciness along the contact normal, `0` removes the approach velocity
    /// entirely and `1` reflects it
    pub restitution: f32,

    /// Distance pushed past exact contact so a resolved pair is not
    /// re-detected on the next tick through rounding
    pub separation_epsilon: f32,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            restitution: 0.0,
            separation_epsilon: 1.0e-4,
        }
    }
}

/// Mutable view of one body taking part in a contact
pub struct BodyMut<'a> {
    /// Kinematic state
    pub body: &'a mut RigidBodyComponent,
    /// Spatial state, only `position` is written
    pub transform: &'a mut TransformComponent,
}

impl<'a> BodyMut<'a> {
    /// Bundle a body with its transform
    pub fn new(body: &'a mut RigidBodyComponent, transform: &'a mut TransformComponent) -> Self {
        Self { body, transform }
    }
}

/// What the solver changed for one contact
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Resolution {
    /// Position change applied to the first body
    pub correction_a: Vec3,
    /// Position change applied to the second body
    pub correction_b: Vec3,
    /// Impulse magnitude along the contact direction (0 if separating)
    pub impulse: f32,
}

impl Resolution {
    /// True if nothing was changed
    pub fn is_noop(&self) -> bool {
        self.impulse == 0.0 && self.correction_a == Vec3::zeros() && self.correction_b == Vec3::zeros()
    }
}

/// Resolves overlaps reported by the narrowphase
#[derive(Debug, Clone, Copy, Default)]
pub struct ContactSolver {
    settings: SolverSettings,
}

impl ContactSolver {
    /// Create a solver with the given settings
    pub fn new(settings: SolverSettings) -> Self {
        Self { settings }
    }

    /// Current settings
    pub fn settings(&self) -> &SolverSettings {
        &self.settings
    }

    /// Resolve a contact between two bodies
    ///
    /// `hit.direction` is the direction `a` must move; `b` moves against it.
    pub fn resolve(&self, hit: &IntersectionData, a: BodyMut<'_>, b: BodyMut<'_>) -> Resolution {
        self.apply(hit, a, Some(b))
    }

    /// Resolve a contact against something immovable without a rigid body,
    /// such as a ground plane
    pub fn resolve_static(&self, hit: &IntersectionData, a: BodyMut<'_>) -> Resolution {
        self.apply(hit, a, None)
    }

    fn apply(&self, hit: &IntersectionData, a: BodyMut<'_>, mut b: Option<BodyMut<'_>>) -> Resolution {
        let inv_a = a.body.inverse_mass();
        let inv_b = b.as_ref().map_or(0.0, |b| b.body.inverse_mass());
        let inv_total = inv_a + inv_b;

        // Two immovable bodies: nothing to do
        if inv_total <= 0.0 || hit.distance <= 0.0 {
            return Resolution::default();
        }

        let direction = hit.direction;
        let depth = hit.distance + self.settings.separation_epsilon;

        let mut resolution = Resolution::default();

        // Positional correction split by inverse mass
        if inv_a > 0.0 {
            resolution.correction_a = direction * (depth * inv_a / inv_total);
            a.transform.position += resolution.correction_a;
        }

        let velocity_b = b.as_ref().map_or_else(Vec3::zeros, |b| b.body.velocity);
        let approach_speed = (a.body.velocity - velocity_b).dot(&direction);

        // Only remove velocity that drives the bodies together
        if approach_speed < 0.0 {
            let impulse = -(1.0 + self.settings.restitution) * approach_speed / inv_total;
            resolution.impulse = impulse;
            if inv_a > 0.0 {
                a.body.velocity += direction * (impulse * inv_a);
            }
            if let Some(b) = b.as_mut() {
                if inv_b > 0.0 {
                    b.body.velocity -= direction * (impulse * inv_b);
                }
            }
        }

        if let Some(b) = b {
            if inv_b > 0.0 {
                resolution.correction_b = -direction * (depth * inv_b / inv_total);
                b.transform.position += resolution.correction_b;
            }
        }

        resolution
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn exact_solver() -> ContactSolver {
        ContactSolver::new(SolverSettings { restitution: 0.0, separation_epsilon: 0.0 })
    }

    fn dynamic(mass: f32, velocity: Vec3) -> RigidBodyComponent {
        RigidBodyComponent::new(mass).unwrap().with_velocity(velocity)
    }

    #[test]
    fn test_equal_masses_split_evenly() {
        let mut body_a = dynamic(1.0, Vec3::new(1.0, 0.0, 0.0));
        let mut body_b = dynamic(1.0, Vec3::new(-1.0, 0.0, 0.0));
        let mut transform_a = TransformComponent::from_position(Vec3::zeros());
        let mut transform_b = TransformComponent::from_position(Vec3::new(1.0, 0.0, 0.0));

        let hit = IntersectionData::new(1.0, Vec3::new(-1.0, 0.0, 0.0));
        let resolution = exact_solver().resolve(
            &hit,
            BodyMut::new(&mut body_a, &mut transform_a),
            BodyMut::new(&mut body_b, &mut transform_b),
        );

        assert_relative_eq!(transform_a.position, Vec3::new(-0.5, 0.0, 0.0));
        assert_relative_eq!(transform_b.position, Vec3::new(1.5, 0.0, 0.0));
        assert_relative_eq!(body_a.velocity, Vec3::zeros());
        assert_relative_eq!(body_b.velocity, Vec3::zeros());
        assert_relative_eq!(resolution.impulse, 1.0);
    }

    #[test]
    fn test_split_follows_inverse_mass() {
        let mut body_a = dynamic(1.0, Vec3::zeros());
        let mut body_b = dynamic(3.0, Vec3::zeros());
        let mut transform_a = TransformComponent::default();
        let mut transform_b = TransformComponent::default();

        let hit = IntersectionData::new(0.8, Vec3::y());
        let resolution = exact_solver().resolve(
            &hit,
            BodyMut::new(&mut body_a, &mut transform_a),
            BodyMut::new(&mut body_b, &mut transform_b),
        );

        assert_relative_eq!(resolution.correction_a, Vec3::new(0.0, 0.6, 0.0), epsilon = 1e-6);
        assert_relative_eq!(resolution.correction_b, Vec3::new(0.0, -0.2, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_static_partner_takes_nothing() {
        let mut body_a = dynamic(2.0, Vec3::new(3.0, 0.0, 0.0));
        let mut wall = RigidBodyComponent::new_static();
        let mut transform_a = TransformComponent::default();
        let mut transform_wall = TransformComponent::from_position(Vec3::new(1.5, 0.0, 0.0));
        let wall_before = (wall.clone(), transform_wall.clone());

        let hit = IntersectionData::new(0.5, Vec3::new(-1.0, 0.0, 0.0));
        exact_solver().resolve(
            &hit,
            BodyMut::new(&mut body_a, &mut transform_a),
            BodyMut::new(&mut wall, &mut transform_wall),
        );

        assert_relative_eq!(transform_a.position, Vec3::new(-0.5, 0.0, 0.0));
        assert_relative_eq!(body_a.velocity, Vec3::zeros());
        assert_eq!((wall, transform_wall), wall_before);
    }

    #[test]
    fn test_two_static_bodies_are_untouched() {
        let mut body_a = RigidBodyComponent::new_static();
        let mut body_b = RigidBodyComponent::new_static();
        let mut transform_a = TransformComponent::default();
        let mut transform_b = TransformComponent::default();

        let hit = IntersectionData::new(1.0, Vec3::x());
        let resolution = ContactSolver::default().resolve(
            &hit,
            BodyMut::new(&mut body_a, &mut transform_a),
            BodyMut::new(&mut body_b, &mut transform_b),
        );

        assert!(resolution.is_noop());
        assert_eq!(transform_a, TransformComponent::default());
        assert_eq!(transform_b, TransformComponent::default());
    }

    #[test]
    fn test_separating_bodies_keep_velocity() {
        let mut body_a = dynamic(1.0, Vec3::new(0.0, 2.0, 0.0));
        let mut transform_a = TransformComponent::default();

        let hit = IntersectionData::new(0.25, Vec3::y());
        let resolution = exact_solver().resolve_static(&hit, BodyMut::new(&mut body_a, &mut transform_a));

        assert_eq!(resolution.impulse, 0.0);
        assert_eq!(body_a.velocity, Vec3::new(0.0, 2.0, 0.0));
        assert_relative_eq!(transform_a.position, Vec3::new(0.0, 0.25, 0.0));
    }

    #[test]
    fn test_only_normal_velocity_is_removed() {
        let mut body_a = dynamic(1.0, Vec3::new(4.0, -3.0, 0.0));
        let mut transform_a = TransformComponent::default();

        let hit = IntersectionData::new(0.1, Vec3::y());
        exact_solver().resolve_static(&hit, BodyMut::new(&mut body_a, &mut transform_a));

        assert_relative_eq!(body_a.velocity, Vec3::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn test_restitution_reflects_without_energy_gain() {
        let solver = ContactSolver::new(SolverSettings { restitution: 0.5, separation_epsilon: 0.0 });
        let mut body_a = dynamic(1.0, Vec3::new(0.0, -4.0, 0.0));
        let mut transform_a = TransformComponent::default();

        let hit = IntersectionData::new(0.1, Vec3::y());
        solver.resolve_static(&hit, BodyMut::new(&mut body_a, &mut transform_a));

        assert_relative_eq!(body_a.velocity, Vec3::new(0.0, 2.0, 0.0));
        assert!(body_a.velocity.norm() <= 4.0);
    }

    #[test]
    fn test_separation_epsilon_pushes_past_contact() {
        let solver = ContactSolver::new(SolverSettings { restitution: 0.0, separation_epsilon: 0.01 });
        let mut body_a = dynamic(1.0, Vec3::zeros());
        let mut transform_a = TransformComponent::default();

        let hit = IntersectionData::new(0.5, Vec3::y());
        solver.resolve_static(&hit, BodyMut::new(&mut body_a, &mut transform_a));

        assert_relative_eq!(transform_a.position.y, 0.51, epsilon = 1e-6);
    }
}
