//! Animation state shared by every animation kind

use crate::object_state::Pose;

/// Whether ticks advance the animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde-support",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum PlaybackMode {
    /// Ticks run the full update sequence
    #[default]
    Playing,
    /// Ticks are ignored; age and pose are frozen
    Paused,
}

/// Mutable state an animation's hooks operate on
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationState {
    /// Time in milliseconds since the animation began
    pub age: f64,
    /// Output transform for the current tick
    pub pose: Pose,
}

impl AnimationState {
    pub fn new() -> Self {
        Self {
            age: 0.0,
            pose: Pose::IDENTITY,
        }
    }

    /// Reset the age to the beginning, keeping the pose
    pub fn reset_time(&mut self) {
        self.age = 0.0;
    }
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::new()
    }
}
