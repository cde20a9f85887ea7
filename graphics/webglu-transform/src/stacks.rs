//! Model-view and projection stacks plus the camera that sets them up

use webglu_math::{Matrix4, Vector3, projection};

use crate::error::Result;
use crate::matrix_stack::{MatrixStack, MatrixStackConfig};

/// Near clip plane used by [`Camera::default`]
pub const DEFAULT_NEAR: f32 = 0.01;
/// Far clip plane used by [`Camera::default`]
pub const DEFAULT_FAR: f32 = 10000.0;

/// Viewport camera
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde-support",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Camera {
    pub position: Vector3,
    /// Extra model-view rotation in degrees about X, Y and Z, applied in that
    /// order after the look-at
    pub rotation: Vector3,
    /// Point the camera looks at
    pub target: Vector3,
    pub up: Vector3,
    /// Vertical field of view in degrees
    pub yfov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(position: Vector3, target: Vector3) -> Self {
        Self {
            position,
            target,
            ..Self::default()
        }
    }

    pub fn set_target(&mut self, target: Vector3) {
        self.target = target;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vector3::ZERO,
            rotation: Vector3::ZERO,
            target: Vector3::ZERO,
            up: Vector3::Y,
            yfov: 75.0,
            aspect_ratio: 1.0,
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
        }
    }
}

/// The pair of stacks a renderer uploads before each draw
#[derive(Debug, Clone, Default)]
pub struct TransformStacks {
    pub modelview: MatrixStack,
    pub projection: MatrixStack,
}

impl TransformStacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: MatrixStackConfig) -> Self {
        Self {
            modelview: MatrixStack::with_config(config),
            projection: MatrixStack::with_config(config),
        }
    }

    /// Replace the projection with a perspective transform
    pub fn set_perspective(
        &mut self,
        fovy_degrees: f32,
        aspect: f32,
        near: f32,
        far: f32,
    ) -> Result<()> {
        let m = projection::perspective(fovy_degrees, aspect, near, far)?;
        self.projection.load_identity();
        self.projection.mult_matrix(&m);
        Ok(())
    }

    /// Multiply a viewing transform into the projection
    pub fn look_at(&mut self, eye: Vector3, target: Vector3, up: Vector3) -> Result<()> {
        let m = projection::look_at(eye, target, up)?;
        self.projection.mult_matrix(&m);
        Ok(())
    }

    /// Reset both stacks to view the scene from `camera`
    ///
    /// Nothing is modified if the camera cannot produce a valid projection.
    pub fn setup_matrices(&mut self, camera: &Camera) -> Result<()> {
        let perspective =
            projection::perspective(camera.yfov, camera.aspect_ratio, camera.near, camera.far)?;
        let view = projection::look_at(camera.position, camera.target, camera.up)?;

        self.modelview.load_identity();
        self.projection.load_identity();

        self.projection.mult_matrix(&perspective);
        self.projection.mult_matrix(&view);

        self.modelview.rotate(camera.rotation.x, Vector3::X);
        self.modelview.rotate(camera.rotation.y, Vector3::Y);
        self.modelview.rotate(camera.rotation.z, Vector3::Z);
        Ok(())
    }

    /// 3x3 inverse transpose of the current model-view matrix, column-major
    pub fn normal_matrix(&self) -> Result<[f32; 9]> {
        Ok(self.modelview.current().normal_matrix()?)
    }

    /// `projection * modelview`
    pub fn model_view_projection(&self) -> Matrix4 {
        self.projection.current().multiply(self.modelview.current())
    }

    pub fn begin_frame(&mut self) {
        self.modelview.begin_frame();
        self.projection.begin_frame();
    }

    /// Depth change of `(modelview, projection)` since
    /// [`TransformStacks::begin_frame`]
    pub fn end_frame(&mut self) -> (isize, isize) {
        (self.modelview.end_frame(), self.projection.end_frame())
    }
}
