//! Position, rotation and scale of a drawable object

use webglu_math::{Matrix4, Quaternion, Vector3};

/// A resolved transform: position, rotation quaternion and scale
///
/// This is what an animation produces each tick and what
/// [`crate::MatrixStack::apply_pose`] consumes before a draw.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde-support",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Pose {
    pub position: Vector3,
    pub rotation: Quaternion,
    pub scale: Vector3,
}

impl Pose {
    /// No translation, no rotation, unit scale
    pub const IDENTITY: Self = Self {
        position: Vector3::ZERO,
        rotation: Quaternion::IDENTITY,
        scale: Vector3::ONE,
    };

    pub const fn new(position: Vector3, rotation: Quaternion, scale: Vector3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// `translation * rotation * scale`
    pub fn to_matrix(&self) -> Matrix4 {
        Matrix4::from_translation(self.position)
            * self.rotation.to_matrix()
            * Matrix4::from_scale(self.scale)
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Base transform of an object, with rotation kept as Euler angles
///
/// `rotation` holds degrees: `x` is the heading about Y, `y` the pitch about
/// X and `z` the roll about Z. The quaternion form is recomputed whenever the
/// angles change.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde-support",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct ObjectState {
    position: Vector3,
    rotation: Vector3,
    scale: Vector3,
    q: Quaternion,
}

impl ObjectState {
    pub fn new(position: Vector3, rotation: Vector3, scale: Vector3) -> Self {
        Self {
            position,
            rotation,
            scale,
            q: Quaternion::from_euler_degrees(rotation),
        }
    }

    pub fn position(&self) -> Vector3 {
        self.position
    }

    /// Euler angles in degrees
    pub fn rotation(&self) -> Vector3 {
        self.rotation
    }

    pub fn scale(&self) -> Vector3 {
        self.scale
    }

    /// Rotation derived from the Euler angles
    pub fn quaternion(&self) -> Quaternion {
        self.q
    }

    pub fn set_position(&mut self, position: Vector3) {
        self.position = position;
    }

    pub fn set_rotation(&mut self, rotation: Vector3) {
        self.rotation = rotation;
        self.q = Quaternion::from_euler_degrees(rotation);
    }

    pub fn set_scale(&mut self, scale: Vector3) {
        self.scale = scale;
    }

    pub fn set_scale_uniformly(&mut self, s: f32) {
        self.scale = Vector3::splat(s);
    }

    pub fn pose(&self) -> Pose {
        Pose::new(self.position, self.q, self.scale)
    }

    /// Combine this base state with an animation pose
    ///
    /// Positions add, rotations compose (`base * animation`), scales multiply
    /// component-wise.
    pub fn animated(&self, animation: &Pose) -> Pose {
        Pose {
            position: self.position + animation.position,
            rotation: self.q.multiply(&animation.rotation),
            scale: self.scale.mul_elements(animation.scale),
        }
    }
}

impl Default for ObjectState {
    fn default() -> Self {
        Self::new(Vector3::ZERO, Vector3::ZERO, Vector3::ONE)
    }
}
