//! Scalar, vector and quaternion interpolation

use crate::SLERP_SIN_THRESHOLD;
use crate::quaternion::Quaternion;
use crate::vector::Vector3;

/// `a + t * (b - a)`, with `t` unclamped
pub fn lerp(t: f32, a: f32, b: f32) -> f32 {
    a + t * (b - a)
}

/// Component-wise [`lerp`] of two vectors
pub fn lerp_triple(t: f32, a: Vector3, b: Vector3) -> Vector3 {
    Vector3::new(lerp(t, a.x, b.x), lerp(t, a.y, b.y), lerp(t, a.z, b.z))
}

/// Spherical linear interpolation from `q1` to `q2`
///
/// Coincident inputs (`|cos half theta| >= 1`) return `q1`. When the half
/// angle's sine drops below [`SLERP_SIN_THRESHOLD`] the rotation axis is
/// ill-defined and the component-wise average of `q1` and `q2` is returned.
/// The shorter arc is not selected by flipping signs, and `t` is not clamped,
/// so values outside `[0, 1]` extrapolate.
pub fn slerp(t: f32, q1: &Quaternion, q2: &Quaternion) -> Quaternion {
    let cos_half_theta = q1.dot(q2);

    if cos_half_theta.abs() >= 1.0 {
        return *q1;
    }

    let half_theta = cos_half_theta.acos();
    let sin_half_theta = (1.0 - cos_half_theta * cos_half_theta).sqrt();

    // Theta = 180, any direction is valid
    if sin_half_theta.abs() < SLERP_SIN_THRESHOLD {
        return Quaternion {
            x: q1.x * 0.5 + q2.x * 0.5,
            y: q1.y * 0.5 + q2.y * 0.5,
            z: q1.z * 0.5 + q2.z * 0.5,
            w: q1.w * 0.5 + q2.w * 0.5,
        };
    }

    let ratio1 = ((1.0 - t) * half_theta).sin() / sin_half_theta;
    let ratio2 = (t * half_theta).sin() / sin_half_theta;

    Quaternion {
        x: q1.x * ratio1 + q2.x * ratio2,
        y: q1.y * ratio1 + q2.y * ratio2,
        z: q1.z * ratio1 + q2.z * ratio2,
        w: q1.w * ratio1 + q2.w * ratio2,
    }
}

/// Trait for types that can be interpolated between two keyframe values
pub trait Lerp: Clone {
    /// Interpolation between self and other
    fn lerp(&self, other: &Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        lerp(t, *self, *other)
    }
}

impl Lerp for f64 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * f64::from(t)
    }
}

impl Lerp for Vector3 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        lerp_triple(t, *self, *other)
    }
}

impl Lerp for Quaternion {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        // Use slerp for quaternion interpolation
        slerp(t, self, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0.0, 3.0, 7.0 => 3.0 ; "start")]
    #[test_case(1.0, 3.0, 7.0 => 7.0 ; "end")]
    #[test_case(0.5, 0.0, 10.0 => 5.0 ; "midpoint")]
    #[test_case(2.0, 0.0, 10.0 => 20.0 ; "extrapolates past end")]
    #[test_case(-0.5, 0.0, 10.0 => -5.0 ; "extrapolates before start")]
    fn test_lerp(t: f32, a: f32, b: f32) -> f32 {
        lerp(t, a, b)
    }

    #[test]
    fn test_lerp_triple() {
        let a = Vector3::new(0.0, 0.0, 0.0);
        let b = Vector3::new(10.0, 20.0, 30.0);

        let mid = lerp_triple(0.5, a, b);
        assert!((mid.x - 5.0).abs() < 0.001);
        assert!((mid.y - 10.0).abs() < 0.001);
        assert!((mid.z - 15.0).abs() < 0.001);

        assert_eq!(a.lerp(&b, 0.25), lerp_triple(0.25, a, b));
    }

    #[test]
    fn test_slerp_endpoints() {
        let q1 = Quaternion::from_axis_angle_degrees(Vector3::Y, 0.0);
        let q2 = Quaternion::from_axis_angle_degrees(Vector3::Y, 90.0);

        assert!(slerp(0.0, &q1, &q2).approx_eq(&q1));
        assert!(slerp(1.0, &q1, &q2).approx_eq(&q2));
    }

    #[test]
    fn test_slerp_halfway() {
        let q1 = Quaternion::IDENTITY;
        let q2 = Quaternion::from_axis_angle_degrees(Vector3::Z, 90.0);
        let expected = Quaternion::from_axis_angle_degrees(Vector3::Z, 45.0);

        assert!(slerp(0.5, &q1, &q2).approx_eq(&expected));
        assert!(q1.slerp(&q2, 0.5).approx_eq(&expected));
        assert!(q1.lerp(&q2, 0.5).approx_eq(&expected));
    }

    #[test]
    fn test_slerp_coincident_returns_first() {
        let q = Quaternion::from_axis_angle_degrees(Vector3::X, 33.0);
        for t in [0.0, 0.3, 0.5, 1.0, 1.7] {
            assert!(slerp(t, &q, &q).approx_eq(&q));
        }
    }

    #[test]
    fn test_slerp_opposite_falls_back_to_average() {
        let q1 = Quaternion::IDENTITY;
        let q2 = Quaternion::new(0.0, 0.0, 0.0, -1.0);
        // cos = -1: the coincident branch, q1 comes back unchanged
        assert_eq!(slerp(0.5, &q1, &q2), q1);

        let q3 = Quaternion::new(0.0005, 0.0, 0.0, -0.999_999_9);
        let r = slerp(0.25, &q1, &q3);
        assert!((r.x - 0.00025).abs() < 1e-6);
        assert!(r.w.abs() < 1e-3);
    }

    #[test]
    fn test_slerp_matches_glam() {
        let q1 = Quaternion::from_axis_angle_degrees(Vector3::X, 20.0);
        let q2 = Quaternion::from_axis_angle_degrees(Vector3::Y, 110.0);
        for t in [0.1, 0.4, 0.9] {
            let ours = slerp(t, &q1, &q2);
            let theirs = Quaternion::from_glam(q1.to_glam().slerp(q2.to_glam(), t));
            assert!(ours.approx_eq(&theirs), "t = {t}");
        }
    }
}
