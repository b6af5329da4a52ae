//! Core error type for subtitle document operations
//!
//! # Error Philosophy
//!
//! - Use `thiserror` for structured error handling (no `anyhow` bloat)
//! - Provide detailed context for debugging and user feedback
//! - Keep variants cheap to clone so stages can collect them

use core::fmt;

use thiserror::Error;

/// Main error type for document model operations
///
/// Returned by colour conversion, time formatting and document validation.
/// Rendering crates wrap it transparently in their own error types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Color format parsing errors
    #[error("Invalid color format: {0}")]
    InvalidColor(String),

    /// Numeric value parsing errors
    #[error("Invalid numeric value: {0}")]
    InvalidNumeric(String),

    /// Timestamp cannot be represented in ASS time format
    #[error("Invalid time: {0}")]
    InvalidTime(String),

    /// Document-level validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal consistency error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Create validation error from message
    pub fn validation<T: fmt::Display>(message: T) -> Self {
        Self::Validation(format!("{message}"))
    }

    /// Create internal error (indicates a bug)
    pub fn internal<T: fmt::Display>(message: T) -> Self {
        Self::Internal(format!("{message}"))
    }

    /// Check if error is recoverable
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !self.is_internal_bug()
    }

    /// Check if error indicates a bug in the library
    #[must_use]
    pub const fn is_internal_bug(&self) -> bool {
        matches!(self, Self::Internal(_))
    }
}

/// Result type alias for convenience
pub type Result<T> = core::result::Result<T, CoreError>;
