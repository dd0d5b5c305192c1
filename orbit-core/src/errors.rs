//! Error types for the core math primitives.
//!
//! The kernel's numerical failure modes are narrow: an operation was handed
//! input outside its mathematical domain, or a value degenerated (zero-length
//! vector, non-finite intermediate). [`CoreError`] classifies those with a
//! [`MathErrorKind`] so callers can distinguish "caller bug" from "data bug"
//! without string matching.

use thiserror::Error;

/// Classification of mathematical errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathErrorKind {
    /// Attempted division by zero or near-zero value.
    DivisionByZero,
    /// Result or input is NaN or infinity.
    NotFinite,
    /// Value outside the operation's valid domain.
    OutOfRange,
    /// Input value is structurally invalid for the operation.
    InvalidInput,
}

/// Error type for core math operations.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Numerical computation failure.
    #[error("math error in {operation} ({kind:?}): {message}")]
    Math {
        operation: String,
        kind: MathErrorKind,
        message: String,
    },
}

/// Convenience alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Creates a [`Math`](Self::Math) error with the given kind.
    pub fn math(operation: &str, kind: MathErrorKind, message: &str) -> Self {
        Self::Math {
            operation: operation.to_string(),
            kind,
            message: message.to_string(),
        }
    }
}
