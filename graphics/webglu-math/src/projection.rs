//! GLU-style view and projection matrices
//!
//! These mirror `gluLookAt`, `glOrtho`, `glFrustum` and `gluPerspective`,
//! producing right-handed, OpenGL clip-space matrices.

use crate::error::{MathError, Result};
use crate::matrix::Matrix4;
use crate::vector::Vector3;

/// View matrix looking from `eye` towards `target`
///
/// Fails when `eye == target` or `up` is parallel to the view direction.
pub fn look_at(eye: Vector3, target: Vector3, up: Vector3) -> Result<Matrix4> {
    let z = (eye - target).normalize()?;
    let x = up.cross(z).normalize()?;
    let y = z.cross(x).normalize()?;

    let rotation = Matrix4::from_rows([
        [x.x, x.y, x.z, 0.0],
        [y.x, y.y, y.z, 0.0],
        [z.x, z.y, z.z, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    Ok(rotation * Matrix4::from_translation(-eye))
}

/// Orthographic projection
pub fn ortho(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Result<Matrix4> {
    let (width, height, depth) = extents("ortho", left, right, bottom, top, near, far)?;

    let tx = -(right + left) / width;
    let ty = -(top + bottom) / height;
    let tz = -(far + near) / depth;

    Ok(Matrix4::from_rows([
        [2.0 / width, 0.0, 0.0, tx],
        [0.0, 2.0 / height, 0.0, ty],
        [0.0, 0.0, -2.0 / depth, tz],
        [0.0, 0.0, 0.0, 1.0],
    ]))
}

/// Perspective projection for an off-center view volume
pub fn frustum(
    left: f32,
    right: f32,
    bottom: f32,
    top: f32,
    near: f32,
    far: f32,
) -> Result<Matrix4> {
    let (width, height, depth) = extents("frustum", left, right, bottom, top, near, far)?;

    let x = 2.0 * near / width;
    let y = 2.0 * near / height;
    let a = (right + left) / width;
    let b = (top + bottom) / height;
    let c = -(far + near) / depth;
    let d = -2.0 * far * near / depth;

    Ok(Matrix4::from_rows([
        [x, 0.0, a, 0.0],
        [0.0, y, b, 0.0],
        [0.0, 0.0, c, d],
        [0.0, 0.0, -1.0, 0.0],
    ]))
}

/// Symmetric perspective projection with a vertical field of view in degrees
pub fn perspective(fovy_degrees: f32, aspect: f32, near: f32, far: f32) -> Result<Matrix4> {
    let ymax = near * (fovy_degrees.to_radians() / 2.0).tan();
    let ymin = -ymax;
    let xmin = ymin * aspect;
    let xmax = ymax * aspect;

    log::debug!(
        "Perspective projection: fovy={fovy_degrees} aspect={aspect} near={near} far={far}"
    );

    frustum(xmin, xmax, ymin, ymax, near, far)
}

fn extents(
    operation: &'static str,
    left: f32,
    right: f32,
    bottom: f32,
    top: f32,
    near: f32,
    far: f32,
) -> Result<(f32, f32, f32)> {
    let width = right - left;
    let height = top - bottom;
    let depth = far - near;

    if width == 0.0 || height == 0.0 || depth == 0.0 {
        return Err(MathError::DivideByZero { operation });
    }

    Ok((width, height, depth))
}
