//! Vector, quaternion and matrix math for WebGL-style transforms
//!
//! This crate provides the numeric building blocks used by the transform
//! stack and the keyframe animation engine in `webglu-transform`:
//! - [`Vector3`] / [`Vector4`] value types with by-value and in-place operations
//! - [`Quaternion`] rotations with Hamilton product and [`slerp`]
//! - [`Matrix4`] column-major 4x4 matrices with inverse and GPU-ready snapshots
//! - GLU-style [`projection`] helpers
//!
//! Fallible operations (normalizing a zero vector, inverting a singular matrix)
//! report a [`MathError`] instead of producing NaNs.
//!
//! # Example
//!
//! ```rust
//! use webglu_math::{Matrix4, Quaternion, Vector3, slerp};
//!
//! let from = Quaternion::IDENTITY;
//! let to = Quaternion::from_axis_angle_degrees(Vector3::Z, 90.0);
//! let halfway = slerp(0.5, &from, &to);
//!
//! let m = Matrix4::from_translation(Vector3::new(1.0, 0.0, 0.0)) * halfway.to_matrix();
//! let uniform: [f32; 16] = m.to_cols_array();
//! # assert_eq!(uniform.len(), 16);
//! ```

pub mod error;
pub mod interpolation;
pub mod matrix;
pub mod projection;
pub mod quaternion;
pub mod vector;

pub use error::{MathError, Result};
pub use interpolation::{Lerp, lerp, lerp_triple, slerp};
pub use matrix::Matrix4;
pub use quaternion::Quaternion;
pub use vector::{Vector3, Vector4};

/// Tolerance used by the `approx_eq` comparisons
pub const EPSILON: f32 = 1e-4;

/// Determinant magnitude below which a matrix is treated as singular
pub const SINGULAR_EPSILON: f32 = 1e-8;

/// Half-angle sine below which slerp falls back to averaging
pub const SLERP_SIN_THRESHOLD: f32 = 1e-3;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
