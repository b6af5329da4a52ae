//! Utility functions and shared types for the subtitle document model
//!
//! Colour conversion, timestamp formatting and text escaping used by the
//! document serializer and by every stage that writes override tags.
//!
//! # Example
//!
//! ```rust
//! use karaoke_ass::utils::{escape_text, format_ass_time, rgb_to_bgr};
//!
//! assert_eq!(rgb_to_bgr("#FF0000")?, "&H0000FF&");
//! assert_eq!(format_ass_time(61.5), "0:01:01.50");
//! assert_eq!(escape_text("{hi}"), r"\{hi\}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod color;
pub mod errors;
pub mod time;

pub use color::{alpha_from_opacity, bgr_to_rgb, rgb_to_bgr, Color};
pub use errors::CoreError;
pub use time::{centiseconds, format_ass_time, format_player_time, format_time, milliseconds};

/// Escape literal text so it cannot open or close an override block
///
/// Braces become `\{`/`\}` and a lone backslash becomes `\\`, which is how
/// libass (and therefore ffmpeg's `ass` filter) reads them back literally.
#[must_use]
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => escaped.push_str(r"\\"),
            '{' => escaped.push_str(r"\{"),
            '}' => escaped.push_str(r"\}"),
            '\n' => escaped.push_str(r"\N"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Check if string is usable as a style name
///
/// Commas split fields and braces open override blocks, so neither may
/// appear in a name that dialogue lines refer to.
#[must_use]
pub fn validate_ass_name(name: &str) -> bool {
    !name.is_empty()
        && !name.contains(',')
        && !name.contains('{')
        && !name.contains('}')
        && name.chars().all(|c| !c.is_control())
}

/// Format a number the way style and event fields expect
///
/// Integral values print without a fractional part, others with at most
/// two decimals and no trailing zeros.
#[must_use]
pub fn format_number(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        let text = format!("{rounded:.2}");
        text.trim_end_matches('0').to_string()
    }
}
