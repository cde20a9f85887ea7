//! Rotation quaternions

use std::ops::Mul;

use crate::error::{MathError, Result};
use crate::matrix::Matrix4;
use crate::vector::Vector3;
use crate::{EPSILON, interpolation};

/// Quaternion representation for rotations
///
/// Stored as `(x, y, z, w)` with `w` the scalar part. Only unit quaternions
/// represent rotations; nothing here forces inputs onto the unit sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde-support",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quaternion {
    /// Identity quaternion (no rotation)
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    /// Create a new quaternion
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Rotation of `degrees` about `axis`
    ///
    /// The axis is used as given, so pass a unit vector to get a unit quaternion.
    pub fn from_axis_angle_degrees(axis: Vector3, degrees: f32) -> Self {
        let half = degrees.to_radians() / 2.0;
        let s = half.sin();
        Self {
            x: axis.x * s,
            y: axis.y * s,
            z: axis.z * s,
            w: half.cos(),
        }
    }

    /// Rotation from Euler angles in degrees
    ///
    /// `angles.x` is the heading about Y, `angles.y` the pitch about X and
    /// `angles.z` the roll about Z. Heading is applied first, then pitch, then
    /// roll (`q = roll * pitch * heading`).
    pub fn from_euler_degrees(angles: Vector3) -> Self {
        if angles == Vector3::ZERO {
            return Self::IDENTITY;
        }

        let heading = Self::from_axis_angle_degrees(Vector3::Y, angles.x);
        let pitch = Self::from_axis_angle_degrees(Vector3::X, angles.y);
        let roll = Self::from_axis_angle_degrees(Vector3::Z, angles.z);

        roll.multiply(&pitch).multiply(&heading)
    }

    /// Hamilton product `self * other`
    ///
    /// As a rotation this applies `other` first, then `self`.
    pub fn multiply(&self, other: &Self) -> Self {
        Self {
            w: self.w * other.w - self.x * other.x - self.y * other.y - self.z * other.z,
            x: self.w * other.x + self.x * other.w + self.y * other.z - self.z * other.y,
            y: self.w * other.y + self.y * other.w + self.z * other.x - self.x * other.z,
            z: self.w * other.z + self.z * other.w + self.x * other.y - self.y * other.x,
        }
    }

    /// Four-component dot product
    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Squared norm; 1 for a unit quaternion
    pub fn norm_squared(&self) -> f32 {
        self.dot(self)
    }

    /// Normalize the quaternion
    pub fn normalize(&self) -> Result<Self> {
        let len = self.norm_squared().sqrt();
        if len == 0.0 {
            return Err(MathError::DivideByZero {
                operation: "Quaternion::normalize",
            });
        }
        Ok(Self {
            x: self.x / len,
            y: self.y / len,
            z: self.z / len,
            w: self.w / len,
        })
    }

    /// Conjugate, the inverse rotation of a unit quaternion
    pub fn conjugate(&self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Spherical linear interpolation towards `other`, see [`interpolation::slerp`]
    pub fn slerp(&self, other: &Self, t: f32) -> Self {
        interpolation::slerp(t, self, other)
    }

    /// Rotation matrix for this (unit) quaternion
    pub fn to_matrix(&self) -> Matrix4 {
        Matrix4::from_quaternion(*self)
    }

    /// Equality within [`EPSILON`] per component
    pub fn approx_eq(&self, other: &Self) -> bool {
        (self.x - other.x).abs() <= EPSILON
            && (self.y - other.y).abs() <= EPSILON
            && (self.z - other.z).abs() <= EPSILON
            && (self.w - other.w).abs() <= EPSILON
    }

    /// Convert to a `glam` quaternion
    pub fn to_glam(&self) -> glam::Quat {
        glam::Quat::from_xyzw(self.x, self.y, self.z, self.w)
    }

    /// Convert from a `glam` quaternion
    pub fn from_glam(q: glam::Quat) -> Self {
        Self {
            x: q.x,
            y: q.y,
            z: q.z,
            w: q.w,
        }
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Quaternion {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quat_identity() {
        let q = Quaternion::IDENTITY;
        assert_eq!(q.x, 0.0);
        assert_eq!(q.y, 0.0);
        assert_eq!(q.z, 0.0);
        assert_eq!(q.w, 1.0);
        assert_eq!(Quaternion::default(), q);
    }

    #[test]
    fn test_quat_normalize() {
        let q = Quaternion::new(1.0, 1.0, 1.0, 1.0);
        let normalized = q.normalize().unwrap();
        assert!((normalized.norm_squared() - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_quat_normalize_zero_fails() {
        let q = Quaternion::new(0.0, 0.0, 0.0, 0.0);
        assert!(matches!(q.normalize(), Err(MathError::DivideByZero { .. })));
    }

    #[test]
    fn test_multiply_identity() {
        let q = Quaternion::from_axis_angle_degrees(Vector3::Y, 30.0);
        assert!(q.multiply(&Quaternion::IDENTITY).approx_eq(&q));
        assert!(Quaternion::IDENTITY.multiply(&q).approx_eq(&q));
    }

    #[test]
    fn test_multiply_is_order_sensitive() {
        let a = Quaternion::from_axis_angle_degrees(Vector3::X, 90.0);
        let b = Quaternion::from_axis_angle_degrees(Vector3::Y, 90.0);
        assert!(!a.multiply(&b).approx_eq(&b.multiply(&a)));
    }

    #[test]
    fn test_multiply_composes_angles() {
        let a = Quaternion::from_axis_angle_degrees(Vector3::Z, 30.0);
        let b = Quaternion::from_axis_angle_degrees(Vector3::Z, 60.0);
        let expected = Quaternion::from_axis_angle_degrees(Vector3::Z, 90.0);
        assert!((a * b).approx_eq(&expected));
    }

    #[test]
    fn test_multiply_matches_glam() {
        let a = Quaternion::from_axis_angle_degrees(Vector3::X, 40.0);
        let b = Quaternion::from_axis_angle_degrees(Vector3::Y, -75.0);
        let ours = a.multiply(&b);
        let theirs = Quaternion::from_glam(a.to_glam() * b.to_glam());
        assert!(ours.approx_eq(&theirs));
    }

    #[test]
    fn test_from_euler_zero_is_identity() {
        assert_eq!(
            Quaternion::from_euler_degrees(Vector3::ZERO),
            Quaternion::IDENTITY
        );
    }

    #[test]
    fn test_from_euler_single_axis() {
        let heading = Quaternion::from_euler_degrees(Vector3::new(90.0, 0.0, 0.0));
        assert!(heading.approx_eq(&Quaternion::from_axis_angle_degrees(Vector3::Y, 90.0)));

        let roll = Quaternion::from_euler_degrees(Vector3::new(0.0, 0.0, 45.0));
        assert!(roll.approx_eq(&Quaternion::from_axis_angle_degrees(Vector3::Z, 45.0)));
    }

    #[test]
    fn test_conjugate_inverts_unit_rotation() {
        let q = Quaternion::from_axis_angle_degrees(Vector3::X, 70.0);
        assert!(q.multiply(&q.conjugate()).approx_eq(&Quaternion::IDENTITY));
    }
}
