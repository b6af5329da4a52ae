//! Format validation error utilities
//!
//! Specialized error constructors for colours, numbers and timestamps,
//! plus the colour-notation validator used before conversion.

use super::CoreError;
use core::fmt;

/// Create color format error with detailed context
pub fn invalid_color<T: fmt::Display>(color: T) -> CoreError {
    CoreError::InvalidColor(format!("{color}"))
}

/// Create numeric parsing error with value and reason
pub fn invalid_numeric<T: fmt::Display>(value: T, reason: &str) -> CoreError {
    CoreError::InvalidNumeric(format!("'{value}': {reason}"))
}

/// Create time error with the offending value and reason
pub fn invalid_time<T: fmt::Display>(time: T, reason: &str) -> CoreError {
    CoreError::InvalidTime(format!("'{time}': {reason}"))
}

/// Validate a colour string
///
/// Accepts `#RGB`, `#RRGGBB` and ASS `&HBBGGRR`/`&HAABBGGRR` notation, with
/// or without the trailing `&`.
///
/// # Errors
///
/// Returns an error if the colour is empty, has a bad length, or contains
/// non-hex digits.
pub fn validate_color_format(color: &str) -> Result<(), CoreError> {
    let trimmed = color.trim();

    if trimmed.is_empty() {
        return Err(invalid_color("Empty color value"));
    }

    let (hex_part, allowed) = if let Some(rgb) = trimmed.strip_prefix('#') {
        (rgb, &[3, 6][..])
    } else if trimmed.starts_with("&H") || trimmed.starts_with("&h") {
        (trimmed[2..].trim_end_matches('&'), &[6, 8][..])
    } else {
        return Err(invalid_color(format!(
            "Color '{trimmed}' is neither #RRGGBB nor &HBBGGRR"
        )));
    };

    if !allowed.contains(&hex_part.len()) {
        return Err(invalid_color(format!(
            "Color '{trimmed}' has {} hex digits",
            hex_part.len()
        )));
    }

    if !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid_color(format!(
            "Invalid hex digits in color '{trimmed}'"
        )));
    }

    Ok(())
}
