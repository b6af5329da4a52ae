//! Timestamp formatting
//!
//! Times are carried as `f64` seconds everywhere in the pipeline and only
//! become centiseconds at the text boundary. Conversion floors (truncates)
//! to the centisecond, with a tiny epsilon so that values such as `65.1`,
//! whose binary representation sits just below the decimal, are not pushed
//! down a whole centisecond.
//!
//! Three formatters with different contracts live here:
//!
//! - [`format_ass_time`]: dialogue timestamps, `H:MM:SS.CC`, hours unpadded
//! - [`format_time`]: general purpose, `HH:MM:SS.CC`, hours always two digits
//! - [`format_player_time`]: player display, `MM:SS.CC`, hours only when non-zero

/// Slack added before flooring to absorb binary representation error
const FLOOR_EPSILON: f64 = 1e-6;

/// Convert seconds to whole centiseconds, truncating
///
/// Negative and non-finite inputs saturate to zero; callers drop such
/// timestamps before they reach the text layer.
///
/// ```rust
/// # use karaoke_ass::utils::centiseconds;
/// assert_eq!(centiseconds(1.5), 150);
/// assert_eq!(centiseconds(65.1), 6510);
/// assert_eq!(centiseconds(0.129), 12);
/// ```
#[must_use]
pub fn centiseconds(seconds: f64) -> u64 {
    if !seconds.is_finite() || seconds <= 0.0 {
        return 0;
    }
    (seconds.mul_add(100.0, FLOOR_EPSILON)).floor() as u64
}

/// Split centiseconds into `(hours, minutes, seconds, centiseconds)`
const fn split_centiseconds(total: u64) -> (u64, u64, u64, u64) {
    let hours = total / 360_000;
    let remainder = total % 360_000;
    let minutes = remainder / 6000;
    let remainder = remainder % 6000;
    (hours, minutes, remainder / 100, remainder % 100)
}

/// Format seconds as an ASS dialogue timestamp, `H:MM:SS.CC`
///
/// ```rust
/// # use karaoke_ass::utils::format_ass_time;
/// assert_eq!(format_ass_time(1.0), "0:00:01.00");
/// assert_eq!(format_ass_time(3725.07), "1:02:05.07");
/// ```
#[must_use]
pub fn format_ass_time(seconds: f64) -> String {
    let (hours, minutes, secs, cs) = split_centiseconds(centiseconds(seconds));
    format!("{hours}:{minutes:02}:{secs:02}.{cs:02}")
}

/// Format seconds as `HH:MM:SS.CC`
///
/// ```rust
/// # use karaoke_ass::utils::format_time;
/// assert_eq!(format_time(3725.07), "01:02:05.07");
/// assert_eq!(format_time(65.1), "00:01:05.10");
/// ```
#[must_use]
pub fn format_time(seconds: f64) -> String {
    let (hours, minutes, secs, cs) = split_centiseconds(centiseconds(seconds));
    format!("{hours:02}:{minutes:02}:{secs:02}.{cs:02}")
}

/// Format seconds for a player clock; the hour field is omitted when zero
///
/// ```rust
/// # use karaoke_ass::utils::format_player_time;
/// assert_eq!(format_player_time(65.1), "01:05.10");
/// assert_eq!(format_player_time(3725.07), "1:02:05.07");
/// ```
#[must_use]
pub fn format_player_time(seconds: f64) -> String {
    let (hours, minutes, secs, cs) = split_centiseconds(centiseconds(seconds));
    if hours == 0 {
        format!("{minutes:02}:{secs:02}.{cs:02}")
    } else {
        format!("{hours}:{minutes:02}:{secs:02}.{cs:02}")
    }
}

/// Milliseconds as used by `\fad`, `\move` and `\t` arguments
#[must_use]
pub fn milliseconds(seconds: f64) -> u64 {
    centiseconds(seconds) * 10
}
