//! Error categorization and suggestion utilities
//!
//! Groups errors for user interfaces and telemetry, and offers a short hint
//! for the mistakes callers make most often.

use super::CoreError;
use core::fmt;

/// Error category for filtering and user interface organization
///
/// # Examples
///
/// ```rust
/// use karaoke_ass::utils::errors::{CoreError, ErrorCategory};
///
/// let error = CoreError::validation("duplicate style");
/// assert_eq!(error.category(), ErrorCategory::Validation);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Problems with specific value formats like colors, numbers, or times
    Format,

    /// Issues with content validation beyond basic format checking
    Validation,

    /// Errors that indicate bugs in the library itself
    Internal,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Format => "format",
            Self::Validation => "validation",
            Self::Internal => "internal",
        })
    }
}

impl ErrorCategory {
    /// Check if errors in this category are typically user-fixable
    #[must_use]
    pub const fn is_user_fixable(self) -> bool {
        matches!(self, Self::Format | Self::Validation)
    }
}

impl CoreError {
    /// Get error category for filtering/grouping
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidColor(_) | Self::InvalidNumeric(_) | Self::InvalidTime(_) => {
                ErrorCategory::Format
            }
            Self::Validation(_) => ErrorCategory::Validation,
            Self::Internal(_) => ErrorCategory::Internal,
        }
    }

    /// Get a suggestion for fixing this error, when one is known
    #[must_use]
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::InvalidColor(_) => Some("Use #RRGGBB, #RGB or &HBBGGRR& notation"),
            Self::InvalidTime(_) => Some("Timestamps must be finite, non-negative seconds"),
            Self::InvalidNumeric(_) => Some("Check the value is a plain decimal number"),
            Self::Validation(_) => None,
            Self::Internal(_) => Some("This is a bug, please report it"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_follow_variants() {
        assert_eq!(
            CoreError::InvalidColor(String::new()).category(),
            ErrorCategory::Format
        );
        assert_eq!(
            CoreError::internal("boom").category(),
            ErrorCategory::Internal
        );
        assert!(!ErrorCategory::Internal.is_user_fixable());
        assert!(ErrorCategory::Validation.is_user_fixable());
    }

    #[test]
    fn category_display() {
        assert_eq!(ErrorCategory::Format.to_string(), "format");
    }
}
