//! Matrix stacks and keyframe animation for WebGL-style renderers
//!
//! `webglu-transform` keeps the transform state a fixed-function style
//! renderer needs between draw calls:
//! - [`MatrixStack`] with push/pop, composition and uniform snapshots
//! - [`TransformStacks`] pairing the model-view and projection stacks, set up
//!   from a [`Camera`]
//! - [`ObjectState`] base transforms that animations are layered on
//! - [`animation`]: procedural and keyframe animations ticked once per frame
//!
//! # Example
//!
//! ```rust
//! use webglu_math::{Quaternion, Vector3};
//! use webglu_transform::{MatrixStack, ObjectState};
//! use webglu_transform::animation::{Keyframe, KeyframeAnimation, KeyframeAnimationConfig};
//!
//! let object = ObjectState::default();
//! let mut animation = KeyframeAnimation::with_keyframes(
//!     [
//!         Keyframe::new(Vector3::ZERO, Quaternion::IDENTITY, Vector3::ONE, 0.0),
//!         Keyframe::new(Vector3::Y, Quaternion::IDENTITY, Vector3::ONE, 500.0),
//!     ],
//!     KeyframeAnimationConfig::default(),
//! )?;
//!
//! let mut modelview = MatrixStack::new();
//! animation.tick(16.0)?;
//!
//! modelview.push()?;
//! modelview.apply_pose(&object.animated(animation.pose()));
//! let uniform = modelview.get_for_uniform();
//! modelview.pop()?;
//! # assert_eq!(uniform.len(), 16);
//! # Ok::<(), webglu_transform::TransformError>(())
//! ```

pub mod animation;
pub mod error;
pub mod matrix_stack;
pub mod object_state;
pub mod stacks;

pub use animation::{Animation, Keyframe, KeyframeAnimation, ProceduralAnimation};
pub use error::{AnimationError, Result, TransformError};
pub use matrix_stack::{MatrixStack, MatrixStackConfig};
pub use object_state::{ObjectState, Pose};
pub use stacks::{Camera, TransformStacks};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
