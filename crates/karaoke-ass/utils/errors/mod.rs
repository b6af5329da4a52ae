//! Error types for the subtitle document model
//!
//! Provides the main `CoreError` enum shared by colour conversion, time
//! formatting and document validation, together with an `ErrorCategory`
//! classification for callers that surface failures to users.
//!
//! # Examples
//!
//! ```rust
//! use karaoke_ass::utils::errors::{CoreError, ErrorCategory};
//!
//! let color_err = CoreError::invalid_color("#12");
//! assert_eq!(color_err.category(), ErrorCategory::Format);
//! assert!(color_err.suggestion().is_some());
//! ```

mod category;
mod core;
mod format;

pub use self::core::{CoreError, Result};
pub use category::ErrorCategory;
pub use format::validate_color_format;

impl CoreError {
    /// Create color error from invalid format
    pub fn invalid_color<T: ::core::fmt::Display>(color: T) -> Self {
        format::invalid_color(color)
    }

    /// Create numeric error from parsing failure
    pub fn invalid_numeric<T: ::core::fmt::Display>(value: T, reason: &str) -> Self {
        format::invalid_numeric(value, reason)
    }

    /// Create time error from an unrepresentable timestamp
    pub fn invalid_time<T: ::core::fmt::Display>(time: T, reason: &str) -> Self {
        format::invalid_time(time, reason)
    }
}
