//! Override tag generation
//!
//! Builders for the ASS override tags the karaoke pipeline writes into
//! dialogue text. Every tag here is emitted in the exact spelling libass
//! accepts; numeric arguments go through [`format_number`] so identical
//! inputs always produce identical bytes.
//!
//! # Karaoke Tags
//!
//! - `\K` - Fill karaoke sweep, duration in centiseconds
//!
//! A silent gap between two highlighted units is written as a `\K` tag with
//! no text after it, so the sweep waits through the gap.
//!
//! # Examples
//!
//! ```rust
//! use karaoke_ass::tags::{karaoke_tag, OverrideBlock};
//!
//! assert_eq!(karaoke_tag(50, false), r"{\K50}");
//! let block = OverrideBlock::new().pos(960.0, 540.0).fad(200, 300).build();
//! assert_eq!(block, r"{\pos(960,540)\fad(200,300)}");
//! ```

use core::fmt::Write;

use crate::utils::{format_number, Color};

/// Rotation prefix that flips the karaoke sweep for right-to-left scripts
pub const RTL_ROTATION: &str = r"\frx180\fry180\frz180";

/// Karaoke sweep tag for `duration_cs` centiseconds
#[must_use]
pub fn karaoke_tag(duration_cs: u64, rtl: bool) -> String {
    if rtl {
        format!("{{{RTL_ROTATION}\\K{duration_cs}}}")
    } else {
        format!("{{\\K{duration_cs}}}")
    }
}

/// Vector drawing of an axis-aligned rectangle with its origin at 0,0
#[must_use]
pub fn rectangle_drawing(width: f64, height: f64) -> String {
    let w = format_number(width);
    let h = format_number(height);
    format!("m 0 0 l {w} 0 {w} {h} 0 {h}")
}

/// Fluent builder for a single `{...}` override block
///
/// Tags are written in call order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideBlock {
    tags: String,
}

impl OverrideBlock {
    /// Create an empty block
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether any tag was added
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Append a raw, already formatted tag such as `\bord0`
    #[must_use]
    pub fn raw(mut self, tag: &str) -> Self {
        self.tags.push_str(tag);
        self
    }

    /// `\anN` numpad alignment
    #[must_use]
    pub fn an(mut self, alignment: u8) -> Self {
        let _ = write!(self.tags, "\\an{alignment}");
        self
    }

    /// `\pos(x,y)`
    #[must_use]
    pub fn pos(mut self, x: f64, y: f64) -> Self {
        let _ = write!(
            self.tags,
            "\\pos({},{})",
            format_number(x),
            format_number(y)
        );
        self
    }

    /// `\move(x1,y1,x2,y2,t1,t2)` with times in milliseconds
    #[must_use]
    pub fn move_to(mut self, from: (f64, f64), to: (f64, f64), t1: u64, t2: u64) -> Self {
        let _ = write!(
            self.tags,
            "\\move({},{},{},{},{t1},{t2})",
            format_number(from.0),
            format_number(from.1),
            format_number(to.0),
            format_number(to.1)
        );
        self
    }

    /// `\fad(in,out)` with times in milliseconds
    #[must_use]
    pub fn fad(mut self, fade_in_ms: u64, fade_out_ms: u64) -> Self {
        let _ = write!(self.tags, "\\fad({fade_in_ms},{fade_out_ms})");
        self
    }

    /// `\c` primary fill colour
    #[must_use]
    pub fn color(mut self, color: Color) -> Self {
        let _ = write!(self.tags, "\\c{}", color.to_ass());
        self
    }

    /// `\2c` secondary (not yet sung) fill colour
    #[must_use]
    pub fn secondary_color(mut self, color: Color) -> Self {
        let _ = write!(self.tags, "\\2c{}", color.to_ass());
        self
    }

    /// `\alpha` for the whole line, value like `&H80&`
    #[must_use]
    pub fn alpha(mut self, alpha: &str) -> Self {
        let _ = write!(self.tags, "\\alpha{alpha}");
        self
    }

    /// `\blurN`
    #[must_use]
    pub fn blur(mut self, strength: f64) -> Self {
        let _ = write!(self.tags, "\\blur{}", format_number(strength));
        self
    }

    /// `\fsN`
    #[must_use]
    pub fn font_size(mut self, size: f64) -> Self {
        let _ = write!(self.tags, "\\fs{}", format_number(size));
        self
    }

    /// `\t(t1,t2,tags)` animated transform, times in milliseconds
    #[must_use]
    pub fn transform(mut self, t1: u64, t2: u64, tags: &str) -> Self {
        let _ = write!(self.tags, "\\t({t1},{t2},{tags})");
        self
    }

    /// `\pN` drawing mode; `0` leaves drawing mode
    #[must_use]
    pub fn drawing(mut self, scale: u8) -> Self {
        let _ = write!(self.tags, "\\p{scale}");
        self
    }

    /// Render the block, or an empty string if no tag was added
    #[must_use]
    pub fn build(self) -> String {
        if self.tags.is_empty() {
            String::new()
        } else {
            format!("{{{}}}", self.tags)
        }
    }
}
