//! Error types for the karaoke-render crate
//!
//! Provides the main `RenderError` enum that wraps `CoreError` from
//! karaoke-ass and adds rendering-specific error cases. Follows the same
//! philosophy as the document crate:
//! - Use thiserror for structured error handling (no anyhow)
//! - Provide detailed context for debugging
//! - Timing problems (negative timestamps) are not errors; the producing
//!   stage drops the item and logs it

use core::fmt;

use karaoke_ass::utils::errors::CoreError;
use thiserror::Error;

/// Main error type for karaoke-render operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// Errors from karaoke-ass
    #[error(transparent)]
    Core(CoreError),

    /// Alignment data violates a structural invariant
    #[error("Invalid alignment: {message}")]
    InvalidAlignment { message: String },

    /// No style options configured for a singer, and no fallback
    #[error("No style options for singer {singer}")]
    MissingStyle { singer: i32 },

    /// Preset could not be decoded
    #[error("Invalid preset: {message}")]
    InvalidPreset { message: String },

    /// Renderer or plugin settings are unusable
    #[error("Invalid settings: {message}")]
    InvalidSettings { message: String },
}

impl RenderError {
    /// Create a new invalid alignment error
    pub fn invalid_alignment<T: fmt::Display>(message: T) -> Self {
        Self::InvalidAlignment {
            message: message.to_string(),
        }
    }

    /// Create a new invalid preset error
    pub fn invalid_preset<T: fmt::Display>(message: T) -> Self {
        Self::InvalidPreset {
            message: message.to_string(),
        }
    }

    /// Create a new invalid settings error
    pub fn invalid_settings<T: fmt::Display>(message: T) -> Self {
        Self::InvalidSettings {
            message: message.to_string(),
        }
    }

    /// Check if this error points at bad input data rather than configuration
    #[must_use]
    pub const fn is_data_error(&self) -> bool {
        matches!(self, Self::InvalidAlignment { .. })
    }

    /// Check if the caller can fix this error through its preset, runtime
    /// options or alignment
    #[must_use]
    pub const fn is_user_fixable(&self) -> bool {
        match self {
            Self::Core(core_err) => core_err.category().is_user_fixable(),
            _ => true,
        }
    }

    /// Short hint for fixing this error, when one is known
    #[must_use]
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::Core(core_err) => core_err.suggestion(),
            Self::MissingStyle { .. } => Some("Configure style options for singer 0"),
            _ => None,
        }
    }

    /// Get the underlying core error if this wraps one
    #[must_use]
    pub const fn as_core_error(&self) -> Option<&CoreError> {
        match self {
            Self::Core(core_err) => Some(core_err),
            _ => None,
        }
    }
}

/// Result type alias for rendering operations
pub type Result<T> = core::result::Result<T, RenderError>;

impl From<CoreError> for RenderError {
    fn from(err: CoreError) -> Self {
        Self::Core(err)
    }
}

impl From<serde_json::Error> for RenderError {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid_preset(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_conversion_from_core() {
        let core_err = CoreError::invalid_color("#12");
        let render_err: RenderError = core_err.clone().into();
        assert!(matches!(render_err, RenderError::Core(_)));
        assert_eq!(render_err.as_core_error(), Some(&core_err));
        assert_eq!(render_err.to_string(), core_err.to_string());
    }

    #[test]
    fn json_errors_become_preset_errors() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let render_err: RenderError = json_err.into();
        assert!(matches!(render_err, RenderError::InvalidPreset { .. }));
    }

    #[test]
    fn alignment_errors_are_data_errors() {
        assert!(RenderError::invalid_alignment("word without subwords").is_data_error());
        assert!(!RenderError::invalid_settings("zero height").is_data_error());
        assert_eq!(
            RenderError::MissingStyle { singer: 3 }.to_string(),
            "No style options for singer 3"
        );
    }

    #[test]
    fn fixability_follows_core_category() {
        let colour: RenderError = CoreError::invalid_color("black").into();
        assert!(colour.is_user_fixable());
        assert!(colour.suggestion().is_some_and(|hint| hint.contains("#RRGGBB")));

        let bug: RenderError = CoreError::internal("lost line").into();
        assert!(!bug.is_user_fixable());
        assert!(RenderError::invalid_settings("zero height").is_user_fixable());
        assert!(RenderError::invalid_settings("zero height").suggestion().is_none());
        assert!(RenderError::MissingStyle { singer: 2 }.suggestion().is_some());
    }
}
