//! 4x4 transformation matrices

use std::ops::Mul;

use crate::error::{MathError, Result};
use crate::quaternion::Quaternion;
use crate::vector::{Vector3, Vector4};
use crate::{EPSILON, SINGULAR_EPSILON};

/// 4x4 transformation matrix (column-major, like OpenGL/WebGL)
///
/// Indexing through [`Matrix4::get`] is `(row, col)`; the storage order only
/// matters for [`Matrix4::to_cols_array`], which is what gets uploaded.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde-support",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Matrix4 {
    /// Matrix data in column-major order
    pub data: [f32; 16],
}

impl Matrix4 {
    /// Identity matrix
    pub const IDENTITY: Self = Self {
        data: [
            1.0, 0.0, 0.0, 0.0, // Column 0
            0.0, 1.0, 0.0, 0.0, // Column 1
            0.0, 0.0, 1.0, 0.0, // Column 2
            0.0, 0.0, 0.0, 1.0, // Column 3
        ],
    };

    /// Create identity matrix
    pub fn identity() -> Self {
        Self::IDENTITY
    }

    /// Wrap 16 elements already in column-major order
    pub const fn from_cols_array(data: [f32; 16]) -> Self {
        Self { data }
    }

    /// Build from rows as they would be written on paper
    pub fn from_rows(rows: [[f32; 4]; 4]) -> Self {
        let mut data = [0.0; 16];
        for (row, values) in rows.iter().enumerate() {
            for (col, value) in values.iter().enumerate() {
                data[col * 4 + row] = *value;
            }
        }
        Self { data }
    }

    /// Element at `(row, col)`
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[col * 4 + row]
    }

    /// Overwrite the element at `(row, col)`
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self.data[col * 4 + row] = value;
    }

    /// Create translation matrix
    pub fn from_translation(v: Vector3) -> Self {
        Self {
            data: [
                1.0, 0.0, 0.0, 0.0, // Column 0
                0.0, 1.0, 0.0, 0.0, // Column 1
                0.0, 0.0, 1.0, 0.0, // Column 2
                v.x, v.y, v.z, 1.0, // Column 3
            ],
        }
    }

    /// Create scale matrix
    pub fn from_scale(v: Vector3) -> Self {
        Self {
            data: [
                v.x, 0.0, 0.0, 0.0, // Column 0
                0.0, v.y, 0.0, 0.0, // Column 1
                0.0, 0.0, v.z, 0.0, // Column 2
                0.0, 0.0, 0.0, 1.0, // Column 3
            ],
        }
    }

    /// Rotation of `radians` about the X axis
    pub fn from_rotation_x(radians: f32) -> Self {
        let (s, c) = radians.sin_cos();
        Self::from_rows([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, -s, 0.0],
            [0.0, s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation of `radians` about the Y axis
    pub fn from_rotation_y(radians: f32) -> Self {
        let (s, c) = radians.sin_cos();
        Self::from_rows([
            [c, 0.0, s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation of `radians` about the Z axis
    pub fn from_rotation_z(radians: f32) -> Self {
        let (s, c) = radians.sin_cos();
        Self::from_rows([
            [c, -s, 0.0, 0.0],
            [s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Right-handed rotation of `radians` about `axis`
    ///
    /// The axis-angle formula assumes a unit axis. It is not normalized here.
    pub fn from_axis_angle(axis: Vector3, radians: f32) -> Self {
        let (s, c) = radians.sin_cos();
        let t = 1.0 - c;
        let Vector3 { x, y, z } = axis;

        Self::from_rows([
            [t * x * x + c, t * x * y - s * z, t * x * z + s * y, 0.0],
            [t * x * y + s * z, t * y * y + c, t * y * z - s * x, 0.0],
            [t * x * z - s * y, t * y * z + s * x, t * z * z + c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Create rotation matrix from quaternion
    pub fn from_quaternion(q: Quaternion) -> Self {
        let x2 = q.x + q.x;
        let y2 = q.y + q.y;
        let z2 = q.z + q.z;

        let xx = q.x * x2;
        let xy = q.x * y2;
        let xz = q.x * z2;
        let yy = q.y * y2;
        let yz = q.y * z2;
        let zz = q.z * z2;
        let wx = q.w * x2;
        let wy = q.w * y2;
        let wz = q.w * z2;

        Self {
            data: [
                1.0 - (yy + zz),
                xy + wz,
                xz - wy,
                0.0,
                xy - wz,
                1.0 - (xx + zz),
                yz + wx,
                0.0,
                xz + wy,
                yz - wx,
                1.0 - (xx + yy),
                0.0,
                0.0,
                0.0,
                0.0,
                1.0,
            ],
        }
    }

    /// Multiply two matrices (`self * other`)
    ///
    /// Applied to a vector, the result performs `other` first, then `self`.
    pub fn multiply(&self, other: &Self) -> Self {
        let a = &self.data;
        let b = &other.data;
        let mut out = [0.0; 16];

        for col in 0..4 {
            let b0 = b[col * 4];
            let b1 = b[col * 4 + 1];
            let b2 = b[col * 4 + 2];
            let b3 = b[col * 4 + 3];
            for row in 0..4 {
                out[col * 4 + row] =
                    a[row] * b0 + a[4 + row] * b1 + a[8 + row] * b2 + a[12 + row] * b3;
            }
        }

        Self { data: out }
    }

    /// Homogeneous transform of `v`
    pub fn transform(&self, v: Vector4) -> Vector4 {
        let m = &self.data;
        Vector4 {
            x: m[0] * v.x + m[4] * v.y + m[8] * v.z + m[12] * v.w,
            y: m[1] * v.x + m[5] * v.y + m[9] * v.z + m[13] * v.w,
            z: m[2] * v.x + m[6] * v.y + m[10] * v.z + m[14] * v.w,
            w: m[3] * v.x + m[7] * v.y + m[11] * v.z + m[15] * v.w,
        }
    }

    /// Transform a point (w = 1), dividing through by the resulting w when it
    /// is neither 0 nor 1
    pub fn transform_point(&self, p: Vector3) -> Vector3 {
        let v = self.transform(p.extend(1.0));
        if v.w == 0.0 || v.w == 1.0 {
            v.truncate()
        } else {
            Vector3::new(v.x / v.w, v.y / v.w, v.z / v.w)
        }
    }

    /// Transform a direction (ignores translation)
    pub fn transform_vector(&self, n: Vector3) -> Vector3 {
        self.transform(n.extend(0.0)).truncate()
    }

    /// Swap rows and columns
    pub fn transpose(&self) -> Self {
        let m = &self.data;
        Self {
            data: [
                m[0], m[4], m[8], m[12], //
                m[1], m[5], m[9], m[13], //
                m[2], m[6], m[10], m[14], //
                m[3], m[7], m[11], m[15],
            ],
        }
    }

    /// Determinant via cofactor expansion
    pub fn determinant(&self) -> f32 {
        Cofactors::new(&self.data).determinant()
    }

    /// Inverse matrix
    ///
    /// Fails with [`MathError::SingularMatrix`] when `|det|` is below
    /// [`SINGULAR_EPSILON`].
    pub fn inverse(&self) -> Result<Self> {
        let a = &self.data;
        let c = Cofactors::new(a);
        let det = c.determinant();

        if !det.is_finite() || det.abs() < SINGULAR_EPSILON {
            return Err(MathError::SingularMatrix { determinant: det });
        }

        let inv = 1.0 / det;
        let (a00, a01, a02, a03) = (a[0], a[1], a[2], a[3]);
        let (a10, a11, a12, a13) = (a[4], a[5], a[6], a[7]);
        let (a20, a21, a22, a23) = (a[8], a[9], a[10], a[11]);
        let (a30, a31, a32, a33) = (a[12], a[13], a[14], a[15]);
        let [b00, b01, b02, b03, b04, b05, b06, b07, b08, b09, b10, b11] = c.0;

        Ok(Self {
            data: [
                (a11 * b11 - a12 * b10 + a13 * b09) * inv,
                (a02 * b10 - a01 * b11 - a03 * b09) * inv,
                (a31 * b05 - a32 * b04 + a33 * b03) * inv,
                (a22 * b04 - a21 * b05 - a23 * b03) * inv,
                (a12 * b08 - a10 * b11 - a13 * b07) * inv,
                (a00 * b11 - a02 * b08 + a03 * b07) * inv,
                (a32 * b02 - a30 * b05 - a33 * b01) * inv,
                (a20 * b05 - a22 * b02 + a23 * b01) * inv,
                (a10 * b10 - a11 * b08 + a13 * b06) * inv,
                (a01 * b08 - a00 * b10 - a03 * b06) * inv,
                (a30 * b04 - a31 * b02 + a33 * b00) * inv,
                (a21 * b02 - a20 * b04 - a23 * b00) * inv,
                (a11 * b07 - a10 * b09 - a12 * b06) * inv,
                (a00 * b09 - a01 * b07 + a02 * b06) * inv,
                (a31 * b01 - a30 * b03 - a32 * b00) * inv,
                (a20 * b03 - a21 * b01 + a22 * b00) * inv,
            ],
        })
    }

    /// Upper-left 3x3 of the inverse-transpose, column-major, for lighting
    /// normals
    pub fn normal_matrix(&self) -> Result<[f32; 9]> {
        let n = self.inverse()?.transpose();
        let m = &n.data;
        Ok([m[0], m[1], m[2], m[4], m[5], m[6], m[8], m[9], m[10]])
    }

    /// Get matrix as flat column-major array for GPU upload
    pub fn to_cols_array(&self) -> [f32; 16] {
        self.data
    }

    /// Equality within [`EPSILON`] per element
    pub fn approx_eq(&self, other: &Self) -> bool {
        self.approx_eq_within(other, EPSILON)
    }

    /// Equality within `tolerance` per element
    pub fn approx_eq_within(&self, other: &Self, tolerance: f32) -> bool {
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(a, b)| (a - b).abs() <= tolerance)
    }

    /// Convert to a `glam` matrix
    pub fn to_glam(&self) -> glam::Mat4 {
        glam::Mat4::from_cols_array(&self.data)
    }

    /// Convert from a `glam` matrix
    pub fn from_glam(m: glam::Mat4) -> Self {
        Self {
            data: m.to_cols_array(),
        }
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Matrix4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl Mul<Vector4> for Matrix4 {
    type Output = Vector4;

    fn mul(self, rhs: Vector4) -> Vector4 {
        self.transform(rhs)
    }
}

/// 2x2 sub-determinants shared by the determinant and the inverse
struct Cofactors([f32; 12]);

impl Cofactors {
    fn new(a: &[f32; 16]) -> Self {
        let (a00, a01, a02, a03) = (a[0], a[1], a[2], a[3]);
        let (a10, a11, a12, a13) = (a[4], a[5], a[6], a[7]);
        let (a20, a21, a22, a23) = (a[8], a[9], a[10], a[11]);
        let (a30, a31, a32, a33) = (a[12], a[13], a[14], a[15]);

        Self([
            a00 * a11 - a01 * a10,
            a00 * a12 - a02 * a10,
            a00 * a13 - a03 * a10,
            a01 * a12 - a02 * a11,
            a01 * a13 - a03 * a11,
            a02 * a13 - a03 * a12,
            a20 * a31 - a21 * a30,
            a20 * a32 - a22 * a30,
            a20 * a33 - a23 * a30,
            a21 * a32 - a22 * a31,
            a21 * a33 - a23 * a31,
            a22 * a33 - a23 * a32,
        ])
    }

    fn determinant(&self) -> f32 {
        let [b00, b01, b02, b03, b04, b05, b06, b07, b08, b09, b10, b11] = self.0;
        b00 * b11 - b01 * b10 + b02 * b09 + b03 * b08 - b04 * b07 + b05 * b06
    }
}
