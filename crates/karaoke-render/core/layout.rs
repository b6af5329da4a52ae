//! Canvas scaling and screen slots
//!
//! Presets author every pixel quantity against a base resolution. A
//! [`Layout`] maps those quantities onto the output resolution with a single
//! factor taken from the height ratio, so text keeps its relative size when
//! the aspect ratio changes.

use karaoke_ass::document::Resolution;
use serde::{Deserialize, Serialize};

use super::errors::{RenderError, Result};

/// Point in base-resolution pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Point {
    /// Create a point
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Mapping from base-resolution pixels to output pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    /// Output canvas
    pub resolution: Resolution,
    /// Factor applied to every authored pixel quantity
    pub scale: f64,
}

impl Layout {
    /// Layout rendering `base`-authored content onto `target`
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidSettings`] if either resolution has a
    /// zero dimension.
    pub fn new(base: Resolution, target: Resolution) -> Result<Self> {
        if base.width == 0 || base.height == 0 || target.width == 0 || target.height == 0 {
            return Err(RenderError::invalid_settings(format!(
                "resolution must be non-zero (base {}x{}, target {}x{})",
                base.width, base.height, target.width, target.height
            )));
        }
        Ok(Self {
            resolution: target,
            scale: f64::from(target.height) / f64::from(base.height),
        })
    }

    /// Identity layout for content authored at `resolution`
    #[must_use]
    pub fn unscaled(resolution: Resolution) -> Self {
        Self {
            resolution,
            scale: 1.0,
        }
    }

    /// Scale a length
    #[must_use]
    pub fn px(&self, value: f64) -> f64 {
        value * self.scale
    }

    /// Scale an integer margin, rounding to the nearest pixel
    #[must_use]
    pub fn margin(&self, value: i32) -> i32 {
        (f64::from(value) * self.scale).round() as i32
    }

    /// Scale a point
    #[must_use]
    pub fn point(&self, point: Point) -> Point {
        Point::new(self.px(point.x), self.px(point.y))
    }
}

/// Vertical screen region a line is placed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Upper part of the screen
    Top,
    /// Lower part of the screen
    Bottom,
}

impl Slot {
    /// The other slot
    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
        }
    }

    /// Slot of a physical singer in a duet: even ids on top, odd below
    #[must_use]
    pub const fn for_singer(singer: i32) -> Self {
        if singer.rem_euclid(2) == 0 {
            Self::Top
        } else {
            Self::Bottom
        }
    }

    /// Slot implied by a numpad alignment
    #[must_use]
    pub const fn from_alignment(alignment: u8) -> Self {
        if alignment >= 7 {
            Self::Top
        } else {
            Self::Bottom
        }
    }

    /// Move a numpad alignment into this slot, keeping its column
    #[must_use]
    pub const fn alignment(self, base: u8) -> u8 {
        let column = base.saturating_sub(1) % 3;
        match self {
            Self::Top => 7 + column,
            Self::Bottom => 1 + column,
        }
    }

    /// Style name suffix
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Top => "Top",
            Self::Bottom => "Bottom",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_follows_height() {
        let layout = Layout::new(Resolution::FULL_HD, Resolution::new(1280, 720)).unwrap();
        assert!((layout.scale - 2.0 / 3.0).abs() < 1e-12);
        assert!((layout.px(90.0) - 60.0).abs() < 1e-9);
        assert_eq!(layout.margin(30), 20);
        let point = layout.point(Point::new(960.0, 540.0));
        assert!((point.x - 640.0).abs() < 1e-9 && (point.y - 360.0).abs() < 1e-9);
    }

    #[test]
    fn zero_resolution_is_rejected() {
        let err = Layout::new(Resolution::new(0, 0), Resolution::FULL_HD).unwrap_err();
        assert!(matches!(err, RenderError::InvalidSettings { .. }));
    }

    #[test]
    fn slots_keep_alignment_column() {
        assert_eq!(Slot::Top.alignment(2), 8);
        assert_eq!(Slot::Top.alignment(1), 7);
        assert_eq!(Slot::Bottom.alignment(9), 3);
        assert_eq!(Slot::Bottom.alignment(5), 2);
        assert_eq!(Slot::from_alignment(8), Slot::Top);
        assert_eq!(Slot::from_alignment(5), Slot::Bottom);
    }

    #[test]
    fn singer_parity_picks_slot() {
        assert_eq!(Slot::for_singer(0), Slot::Top);
        assert_eq!(Slot::for_singer(1), Slot::Bottom);
        assert_eq!(Slot::for_singer(2), Slot::Top);
        assert_eq!(Slot::Top.flip(), Slot::Bottom);
    }
}
