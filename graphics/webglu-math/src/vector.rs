//! 3- and 4-component vectors

use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::EPSILON;
use crate::error::{MathError, Result};

/// 3D vector for positions, scales, axes and Euler angles
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(
    feature = "serde-support",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    /// Zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Unit scale vector
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    /// Unit vector along +X
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    /// Unit vector along +Y
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    /// Unit vector along +Z
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Create a new vector
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Vector with all three components set to `v`
    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v)
    }

    /// Vector from `[x, y, z]`
    pub const fn from_array(a: [f32; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }

    /// Components as `[x, y, z]`
    pub const fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Multiply every component by `s`
    pub fn scale(self, s: f32) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s)
    }

    /// Divide every component by `s`
    pub fn divide(self, s: f32) -> Result<Self> {
        if s == 0.0 {
            return Err(MathError::DivideByZero {
                operation: "Vector3::divide",
            });
        }
        Ok(Self::new(self.x / s, self.y / s, self.z / s))
    }

    /// In-place [`Vector3::divide`]; `self` is unchanged on error
    pub fn divide_in_place(&mut self, s: f32) -> Result<()> {
        *self = self.divide(s)?;
        Ok(())
    }

    /// Squared Euclidean length
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    /// Euclidean length
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Scale to unit length
    ///
    /// A zero-length vector has no direction and fails with
    /// [`MathError::DivideByZero`].
    pub fn normalize(self) -> Result<Self> {
        let len = self.length();
        if len == 0.0 {
            return Err(MathError::DivideByZero {
                operation: "Vector3::normalize",
            });
        }
        Ok(self.scale(1.0 / len))
    }

    /// In-place [`Vector3::normalize`]; `self` is unchanged on error
    pub fn normalize_in_place(&mut self) -> Result<()> {
        *self = self.normalize()?;
        Ok(())
    }

    /// Dot product
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Right-handed cross product
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Flip the sign of every component
    pub fn negate_in_place(&mut self) {
        *self = -*self;
    }

    /// Component-wise product
    pub fn mul_elements(self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y, self.z * other.z)
    }

    /// Equality within [`EPSILON`] per component
    pub fn approx_eq(self, other: Self) -> bool {
        (self.x - other.x).abs() <= EPSILON
            && (self.y - other.y).abs() <= EPSILON
            && (self.z - other.z).abs() <= EPSILON
    }

    /// Homogeneous vector with the given `w`
    pub fn extend(self, w: f32) -> Vector4 {
        Vector4::new(self.x, self.y, self.z, w)
    }

    /// Convert to a `glam` vector
    pub fn to_glam(self) -> glam::Vec3 {
        glam::Vec3::new(self.x, self.y, self.z)
    }

    /// Convert from a `glam` vector
    pub fn from_glam(v: glam::Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl Add for Vector3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vector3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vector3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for Vector3 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Mul<f32> for Vector3 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        self.scale(rhs)
    }
}

impl MulAssign<f32> for Vector3 {
    fn mul_assign(&mut self, rhs: f32) {
        *self = self.scale(rhs);
    }
}

impl Neg for Vector3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl From<[f32; 3]> for Vector3 {
    fn from(a: [f32; 3]) -> Self {
        Self::from_array(a)
    }
}

impl From<Vector3> for [f32; 3] {
    fn from(v: Vector3) -> Self {
        v.to_array()
    }
}

/// Homogeneous 4D vector, the operand of [`crate::Matrix4::transform`]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(
    feature = "serde-support",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Vector4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vector4 {
    /// Zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Create a new vector
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Components as `[x, y, z, w]`
    pub const fn to_array(self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Drop `w` without a perspective divide
    pub fn truncate(self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Dot product over all four components
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Equality within [`EPSILON`] per component
    pub fn approx_eq(self, other: Self) -> bool {
        (self.x - other.x).abs() <= EPSILON
            && (self.y - other.y).abs() <= EPSILON
            && (self.z - other.z).abs() <= EPSILON
            && (self.w - other.w).abs() <= EPSILON
    }

    /// Convert to a `glam` vector
    pub fn to_glam(self) -> glam::Vec4 {
        glam::Vec4::new(self.x, self.y, self.z, self.w)
    }

    /// Convert from a `glam` vector
    pub fn from_glam(v: glam::Vec4) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }
}
