use thiserror::Error;
use webglu_math::MathError;

/// Error types for matrix stack and animation operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    /// Pop requested with no saved matrix
    #[error("Stack underflow: pop on an empty matrix stack")]
    StackUnderflow,

    /// Push would exceed the configured maximum depth
    #[error("Stack overflow: matrix stack is limited to {limit} saved matrices")]
    StackOverflow { limit: usize },

    /// Underlying math failure (singular matrix, zero-length vector)
    #[error(transparent)]
    Math(#[from] MathError),

    /// Keyframe animation failure
    #[error(transparent)]
    Animation(#[from] AnimationError),
}

/// Error types for keyframe sequences and animation ticks
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    /// The active interval has zero duration
    #[error("Division by zero: keyframes {from} and {to} both occur at {at_time} ms")]
    DivisionByZero {
        from: usize,
        to: usize,
        at_time: f64,
    },

    /// Interpolation needs at least two keyframes
    #[error("Invalid keyframe set: {count} keyframe(s), at least 2 are required")]
    InvalidKeyframeSet { count: usize },

    /// Keyframe times must be finite and non-decreasing
    #[error("Keyframe out of order: {at_time} ms follows a keyframe at {previous} ms")]
    KeyframeOutOfOrder { previous: f64, at_time: f64 },

    #[error("Keyframe index {index} is out of range for {len} keyframe(s)")]
    KeyframeIndexOutOfRange { index: usize, len: usize },
}

impl TransformError {
    /// The inverse of a singular matrix was requested
    pub fn is_singular_matrix(&self) -> bool {
        matches!(self, Self::Math(MathError::SingularMatrix { .. }))
    }
}

/// Result type using TransformError
pub type Result<T> = std::result::Result<T, TransformError>;
