//! Narrowphase detectors
//!
//! Exact overlap tests between two world-space shapes. Every detector is a
//! pure function returning `Some(IntersectionData)` only for strict overlap:
//! shapes that exactly touch are reported as separate, so bodies resting in
//! contact are not re-resolved every tick.
//!
//! `direction` always points the way the *first* argument must move.

use crate::foundation::math::{self, Vec3, WORLD_UP};

use super::intersection::IntersectionData;
use super::shape::{WorldBox, WorldPlane, WorldSphere};

/// Axis-aligned box versus axis-aligned box
///
/// Resolves along the axis of least overlap (minimum translation vector).
/// Equal overlaps prefer x, then y, then z. If the centers coincide on the
/// chosen axis, `a` is pushed toward the positive side.
///
/// Swapping the arguments negates `direction`, except when the centers
/// coincide on the chosen axis: both orders then report the positive axis.
pub fn box_vs_box(a: &WorldBox, b: &WorldBox) -> Option<IntersectionData> {
    let delta = a.center - b.center;

    let mut best_axis = 0;
    let mut best_overlap = f32::INFINITY;
    for axis in 0..3 {
        let overlap = (a.half_extents[axis] + b.half_extents[axis]) - delta[axis].abs();
        if overlap.is_nan() || overlap <= 0.0 {
            return None;
        }
        if overlap < best_overlap {
            best_overlap = overlap;
            best_axis = axis;
        }
    }

    let sign = if delta[best_axis] < 0.0 { -1.0 } else { 1.0 };
    Some(IntersectionData::new(best_overlap, math::signed_axis(best_axis, sign)))
}

/// Sphere versus sphere
///
/// Coincident centers have no geometric separation direction; `WORLD_UP`
/// is used so the result stays finite and deterministic. In that case both
/// argument orders report `WORLD_UP` rather than opposite directions.
pub fn sphere_vs_sphere(a: &WorldSphere, b: &WorldSphere) -> Option<IntersectionData> {
    let delta = a.center - b.center;
    let dist = delta.norm();
    let radius_sum = a.radius + b.radius;

    // NaN compares false and so never reports a hit
    if !(dist < radius_sum) {
        return None;
    }

    let direction = math::normalize_or(&delta, WORLD_UP);
    Some(IntersectionData::new(radius_sum - dist, direction))
}

/// Plane versus sphere
///
/// The plane bounds a solid half-space. A sphere whose center has sunk
/// below the surface is still pushed out along the normal by the full
/// `radius - d`; the depth is never clamped.
pub fn plane_vs_sphere(plane: &WorldPlane, sphere: &WorldSphere) -> Option<IntersectionData> {
    let d = plane.signed_distance(&sphere.center);

    if !(d < sphere.radius) {
        return None;
    }

    Some(IntersectionData::new(sphere.radius - d, plane.normal))
}

/// Convenience wrapper returning the contact from the sphere's point of view
///
/// Identical to [`plane_vs_sphere`]; the sphere moves along the plane normal.
pub fn sphere_vs_plane(sphere: &WorldSphere, plane: &WorldPlane) -> Option<IntersectionData> {
    plane_vs_sphere(plane, sphere)
}
