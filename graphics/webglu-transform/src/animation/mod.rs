//! Animation system
//!
//! This module provides tick-driven animation of an object's pose:
//! - Play/pause state machine with overridable update hooks
//! - Keyframe sequences with linear position/scale and slerp rotation
//! - Configurable time scaling and age accumulation
//!
//! # Example
//!
//! ```rust
//! use webglu_math::{Quaternion, Vector3};
//! use webglu_transform::animation::{Keyframe, KeyframeAnimation, KeyframeAnimationConfig};
//!
//! let mut animation = KeyframeAnimation::with_keyframes(
//!     [
//!         Keyframe::new(Vector3::ZERO, Quaternion::IDENTITY, Vector3::ONE, 0.0),
//!         Keyframe::new(Vector3::new(10.0, 0.0, 0.0), Quaternion::IDENTITY, Vector3::ONE, 1000.0),
//!     ],
//!     KeyframeAnimationConfig::default(),
//! )?;
//!
//! // Once per frame, with the elapsed milliseconds
//! animation.tick(500.0)?;
//! assert!(animation.position().approx_eq(Vector3::new(5.0, 0.0, 0.0)));
//! # Ok::<(), webglu_transform::AnimationError>(())
//! ```

mod keyframe;
mod procedural;
mod state;

pub use keyframe::{
    AgeAccumulation, Keyframe, KeyframeAnimation, KeyframeAnimationConfig, KeyframeTrack,
};
pub use procedural::{Animation, AnimationHooks, NoopHooks, ProceduralAnimation};
pub use state::{AnimationState, PlaybackMode};
