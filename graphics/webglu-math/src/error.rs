use thiserror::Error;

/// Error types for vector, quaternion and matrix operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// A division whose divisor is zero (zero-length normalize, zero scalar divide,
    /// degenerate projection extents)
    #[error("Divide by zero in {operation}")]
    DivideByZero { operation: &'static str },

    /// Inverse requested for a matrix whose determinant is (nearly) zero
    #[error("Singular matrix: determinant {determinant} is too close to zero")]
    SingularMatrix { determinant: f32 },
}

/// Result type using MathError
pub type Result<T> = std::result::Result<T, MathError>;
