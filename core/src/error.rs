//! Common error types for the class-model substrate.

use thiserror::Error;

/// Errors that can occur during class-model dispatch.
#[derive(Debug, Error)]
pub enum ClassError {
    /// No member with this name anywhere on the class chain.
    #[error("No method `{method}` on class {class}")]
    MethodNotFound { class: String, method: String },

    /// A method or initializer body reported a failure.
    #[error("Method failed: {0}")]
    MethodFailed(String),
}

/// Result type for class-model operations.
pub type ClassResult<T> = Result<T, ClassError>;
