//! `[Script Info]` section
//!
//! Holds the canvas resolution every position and size in the document is
//! expressed in, plus the global rendering flags ffmpeg reads from the header.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Canvas or video resolution in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Resolution {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Resolution {
    /// Full HD, the default authoring canvas
    pub const FULL_HD: Self = Self::new(1920, 1080);

    /// Create a resolution
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Horizontal centre
    #[must_use]
    pub fn center_x(self) -> f64 {
        f64::from(self.width) / 2.0
    }

}

impl Default for Resolution {
    fn default() -> Self {
        Self::FULL_HD
    }
}

/// Script header metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptInfo {
    /// `Title:` header
    pub title: String,
    /// Canvas width, `PlayResX:`
    pub play_res_x: u32,
    /// Canvas height, `PlayResY:`
    pub play_res_y: u32,
    /// `WrapStyle:` (0 = smart wrapping, 2 = no wrapping)
    pub wrap_style: u8,
    /// `ScaledBorderAndShadow:`
    pub scaled_border_and_shadow: bool,
}

impl ScriptInfo {
    /// Header for a canvas of the given resolution
    #[must_use]
    pub fn new(resolution: Resolution) -> Self {
        Self {
            play_res_x: resolution.width,
            play_res_y: resolution.height,
            ..Self::default()
        }
    }

    /// Canvas resolution
    #[must_use]
    pub const fn resolution(&self) -> Resolution {
        Resolution::new(self.play_res_x, self.play_res_y)
    }
}

impl Default for ScriptInfo {
    fn default() -> Self {
        Self {
            title: String::new(),
            play_res_x: Resolution::FULL_HD.width,
            play_res_y: Resolution::FULL_HD.height,
            wrap_style: 0,
            scaled_border_and_shadow: true,
        }
    }
}

impl fmt::Display for ScriptInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[Script Info]")?;
        if !self.title.is_empty() {
            writeln!(f, "Title: {}", self.title)?;
        }
        writeln!(f, "ScriptType: v4.00+")?;
        writeln!(f, "WrapStyle: {}", self.wrap_style)?;
        writeln!(
            f,
            "ScaledBorderAndShadow: {}",
            if self.scaled_border_and_shadow {
                "yes"
            } else {
                "no"
            }
        )?;
        writeln!(f, "YCbCr Matrix: None")?;
        writeln!(f, "PlayResX: {}", self.play_res_x)?;
        writeln!(f, "PlayResY: {}", self.play_res_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lists_resolution() {
        let info = ScriptInfo::new(Resolution::new(1280, 720));
        let text = info.to_string();
        assert!(text.starts_with("[Script Info]\n"));
        assert!(text.contains("PlayResX: 1280\n"));
        assert!(text.contains("PlayResY: 720\n"));
        assert!(text.contains("ScaledBorderAndShadow: yes\n"));
        assert!(!text.contains("Title:"));
    }

    #[test]
    fn title_is_written_when_present() {
        let info = ScriptInfo {
            title: "Song".to_string(),
            ..ScriptInfo::default()
        };
        assert!(info.to_string().contains("Title: Song\n"));
    }

    #[test]
    fn resolution_centre() {
        let resolution = Resolution::default();
        assert!((resolution.center_x() - 960.0).abs() < f64::EPSILON);
    }
}
