//! Math utilities and types
//!
//! Thin aliases over nalgebra plus the world axis conventions (Y-up, right-handed).

pub use nalgebra::{Vector3, UnitQuaternion, Unit};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = UnitQuaternion<f32>;

/// World right axis (+X)
pub const WORLD_RIGHT: Vec3 = Vec3::new(1.0, 0.0, 0.0);

/// World up axis (+Y)
pub const WORLD_UP: Vec3 = Vec3::new(0.0, 1.0, 0.0);

/// World forward axis (+Z)
pub const WORLD_FORWARD: Vec3 = Vec3::new(0.0, 0.0, 1.0);

/// Vectors shorter than this are treated as zero length
pub const NORMALIZE_EPSILON: f32 = 1.0e-6;

/// Returns true if every component is finite
pub fn is_finite(v: &Vec3) -> bool {
    v.iter().all(|c| c.is_finite())
}

/// Normalize `v`, or return `fallback` when `v` is (nearly) zero length
pub fn normalize_or(v: &Vec3, fallback: Vec3) -> Vec3 {
    v.try_normalize(NORMALIZE_EPSILON).unwrap_or(fallback)
}

/// Unit vector along `axis` (0 = x, 1 = y, 2 = z) with the given sign
pub fn signed_axis(axis: usize, sign: f32) -> Vec3 {
    let mut v = Vec3::zeros();
    v[axis] = sign;
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_or_falls_back_on_zero() {
        assert_eq!(normalize_or(&Vec3::zeros(), WORLD_UP), WORLD_UP);
        assert_eq!(normalize_or(&Vec3::new(0.0, 0.0, 4.0), WORLD_UP), WORLD_FORWARD);
    }

    #[test]
    fn test_signed_axis() {
        assert_eq!(signed_axis(0, -1.0), -WORLD_RIGHT);
        assert_eq!(signed_axis(1, 1.0), WORLD_UP);
    }

    #[test]
    fn test_is_finite() {
        assert!(is_finite(&Vec3::new(1.0, 2.0, 3.0)));
        assert!(!is_finite(&Vec3::new(f32::NAN, 0.0, 0.0)));
        assert!(!is_finite(&Vec3::new(0.0, f32::INFINITY, 0.0)));
    }
}
