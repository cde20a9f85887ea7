//! Fixed-function style matrix stack
//!
//! Mirrors `glPushMatrix`/`glPopMatrix`/`glMultMatrix` and friends, except the
//! stack to operate on is chosen by the caller instead of through
//! `glMatrixMode`. Every composition right-multiplies the current matrix, so
//! the most recently applied transform acts first in object-local space.

use webglu_math::{Matrix4, Vector3};

use crate::error::{Result, TransformError};
use crate::object_state::Pose;

/// Runtime options for a [`MatrixStack`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde-support",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct MatrixStackConfig {
    /// Maximum number of saved matrices (`None` = unbounded)
    pub max_depth: Option<usize>,
    /// Warn from [`MatrixStack::end_frame`] when pushes and pops don't balance
    pub check_balance: bool,
}

impl Default for MatrixStackConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            check_balance: cfg!(debug_assertions),
        }
    }
}

/// Current transform plus a stack of saved transforms
#[derive(Debug, Clone)]
pub struct MatrixStack {
    current: Matrix4,
    stack: Vec<Matrix4>,
    config: MatrixStackConfig,
    /// Depth recorded by the last `begin_frame`
    frame_depth: Option<usize>,
}

impl MatrixStack {
    /// Create a stack holding the identity matrix
    pub fn new() -> Self {
        Self::with_config(MatrixStackConfig::default())
    }

    pub fn with_config(config: MatrixStackConfig) -> Self {
        log::debug!(
            "Creating matrix stack (max_depth: {:?}, check_balance: {})",
            config.max_depth,
            config.check_balance
        );
        Self {
            current: Matrix4::IDENTITY,
            stack: Vec::new(),
            config,
            frame_depth: None,
        }
    }

    pub fn config(&self) -> &MatrixStackConfig {
        &self.config
    }

    /// The current matrix
    pub fn current(&self) -> &Matrix4 {
        &self.current
    }

    /// Number of saved matrices
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// glPushMatrix
    ///
    /// Saves a copy of the current matrix. When `m` is given it then becomes
    /// the current matrix.
    pub fn push_matrix(&mut self, m: Option<&Matrix4>) -> Result<()> {
        if let Some(limit) = self.config.max_depth
            && self.stack.len() >= limit
        {
            return Err(TransformError::StackOverflow { limit });
        }

        self.stack.push(self.current);
        if let Some(m) = m {
            self.current = *m;
        }
        Ok(())
    }

    /// Save the current matrix
    pub fn push(&mut self) -> Result<()> {
        self.push_matrix(None)
    }

    /// Save the current matrix and replace it with `m`
    pub fn push_with(&mut self, m: &Matrix4) -> Result<()> {
        self.push_matrix(Some(m))
    }

    /// glPopMatrix
    ///
    /// Restores the most recently saved matrix and returns it.
    pub fn pop_matrix(&mut self) -> Result<Matrix4> {
        let m = self.stack.pop().ok_or(TransformError::StackUnderflow)?;
        self.current = m;
        Ok(m)
    }

    pub fn pop(&mut self) -> Result<Matrix4> {
        self.pop_matrix()
    }

    /// glMultMatrix: `current = current * m`
    pub fn mult_matrix(&mut self, m: &Matrix4) {
        self.current = self.current.multiply(m);
    }

    /// glLoadMatrix
    pub fn load_matrix(&mut self, m: &Matrix4) {
        self.current = *m;
    }

    /// glTranslate
    pub fn translate(&mut self, v: Vector3) {
        self.mult_matrix(&Matrix4::from_translation(v));
    }

    /// glRotate, with the angle in degrees about `axis`
    pub fn rotate(&mut self, angle_degrees: f32, axis: Vector3) {
        self.mult_matrix(&Matrix4::from_axis_angle(axis, angle_degrees.to_radians()));
    }

    /// glScale
    pub fn scale(&mut self, v: Vector3) {
        self.mult_matrix(&Matrix4::from_scale(v));
    }

    /// Replace the current matrix with its inverse
    ///
    /// A singular current matrix is left untouched.
    pub fn invert(&mut self) -> Result<()> {
        self.current = self.current.inverse()?;
        Ok(())
    }

    /// glLoadIdentity
    pub fn load_identity(&mut self) {
        self.current = Matrix4::IDENTITY;
    }

    /// Translate, rotate and scale by `pose`, in that order
    pub fn apply_pose(&mut self, pose: &Pose) {
        self.translate(pose.position);
        self.mult_matrix(&pose.rotation.to_matrix());
        self.scale(pose.scale);
    }

    /// Column-major copy of the current matrix for uniform upload
    pub fn get_for_uniform(&self) -> [f32; 16] {
        self.current.to_cols_array()
    }

    /// Drop all saved matrices and load the identity
    pub fn reset(&mut self) {
        self.stack.clear();
        self.current = Matrix4::IDENTITY;
        self.frame_depth = None;
    }

    /// Remember the depth at the start of a frame
    pub fn begin_frame(&mut self) {
        self.frame_depth = Some(self.stack.len());
    }

    /// Depth change since [`MatrixStack::begin_frame`]
    ///
    /// Zero means every push was matched by a pop. A non-zero result is logged
    /// as a warning when balance checking is enabled; it is never an error.
    pub fn end_frame(&mut self) -> isize {
        let Some(start) = self.frame_depth.take() else {
            return 0;
        };

        // Vec lengths never exceed isize::MAX
        let end = self.stack.len();
        let delta = if end >= start {
            isize::try_from(end - start).unwrap_or(isize::MAX)
        } else {
            isize::try_from(start - end).map_or(isize::MIN, |popped| -popped)
        };
        if delta != 0 && self.config.check_balance {
            log::warn!(
                "Unbalanced matrix stack: depth {} at frame end, {} at frame start",
                self.stack.len(),
                start
            );
        }
        delta
    }
}

impl Default for MatrixStack {
    fn default() -> Self {
        Self::new()
    }
}
