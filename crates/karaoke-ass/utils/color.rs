//! Colour conversion between web notation and ASS notation
//!
//! ASS stores colours little-endian as `&HBBGGRR&` (override tags) or
//! `&HAABBGGRR` (style lines), where the alpha byte is inverted: `00` is
//! opaque and `FF` is fully transparent. Style options coming from settings
//! use `#RRGGBB` (or the `#RGB` shorthand), so every colour crossing into a
//! subtitle document goes through [`Color`].
//!
//! # Example
//!
//! ```rust
//! use karaoke_ass::utils::{bgr_to_rgb, rgb_to_bgr};
//!
//! assert_eq!(rgb_to_bgr("#FF8800")?, "&H0088FF&");
//! assert_eq!(bgr_to_rgb("&H0088FF&")?, "#FF8800");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use core::fmt;

use super::errors::{validate_color_format, CoreError};

/// Colour with an ASS-style alpha channel (0 = opaque, 255 = transparent)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    /// Red channel
    pub red: u8,
    /// Green channel
    pub green: u8,
    /// Blue channel
    pub blue: u8,
    /// Inverted alpha as written by ASS
    pub alpha: u8,
}

impl Color {
    /// Opaque white
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Opaque black
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Create an opaque colour
    #[must_use]
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: 0,
        }
    }

    /// Parse `#RGB`, `#RRGGBB`, `&HBBGGRR[&]` or `&HAABBGGRR[&]`
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidColor`] for any other notation.
    pub fn parse(color: &str) -> Result<Self, CoreError> {
        validate_color_format(color)?;
        let trimmed = color.trim();

        if let Some(rgb) = trimmed.strip_prefix('#') {
            let expanded = expand_shorthand(rgb);
            let value = u32::from_str_radix(&expanded, 16)
                .map_err(|_| CoreError::invalid_color(trimmed))?;
            return Ok(Self::rgb(
                ((value >> 16) & 0xFF) as u8,
                ((value >> 8) & 0xFF) as u8,
                (value & 0xFF) as u8,
            ));
        }

        let hex_part = trimmed[2..].trim_end_matches('&');
        let value =
            u32::from_str_radix(hex_part, 16).map_err(|_| CoreError::invalid_color(trimmed))?;
        let alpha = if hex_part.len() == 8 {
            ((value >> 24) & 0xFF) as u8
        } else {
            0
        };

        Ok(Self {
            red: (value & 0xFF) as u8,
            green: ((value >> 8) & 0xFF) as u8,
            blue: ((value >> 16) & 0xFF) as u8,
            alpha,
        })
    }

    /// Same colour with a different inverted alpha
    #[must_use]
    pub const fn with_alpha(self, alpha: u8) -> Self {
        Self { alpha, ..self }
    }

    /// Override-tag notation, `&HBBGGRR&`
    #[must_use]
    pub fn to_ass(self) -> String {
        format!("&H{:02X}{:02X}{:02X}&", self.blue, self.green, self.red)
    }

    /// Style-line notation, `&HAABBGGRR`
    #[must_use]
    pub fn to_ass_style(self) -> String {
        format!(
            "&H{:02X}{:02X}{:02X}{:02X}",
            self.alpha, self.blue, self.green, self.red
        )
    }

    /// Web notation, `#RRGGBB`
    #[must_use]
    pub fn to_rgb_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_ass())
    }
}

/// Expand `RGB` shorthand to `RRGGBB`; six-digit input is returned as is
fn expand_shorthand(hex: &str) -> String {
    if hex.len() == 3 {
        hex.chars().flat_map(|c| [c, c]).collect()
    } else {
        hex.to_string()
    }
}

/// Convert `#RRGGBB` (or an ASS colour) into override-tag notation `&HBBGGRR&`
///
/// # Errors
///
/// Returns [`CoreError::InvalidColor`] if the input cannot be parsed.
pub fn rgb_to_bgr(color: &str) -> Result<String, CoreError> {
    Color::parse(color).map(Color::to_ass)
}

/// Convert an ASS colour back into `#RRGGBB`
///
/// # Errors
///
/// Returns [`CoreError::InvalidColor`] if the input cannot be parsed.
pub fn bgr_to_rgb(color: &str) -> Result<String, CoreError> {
    Color::parse(color).map(Color::to_rgb_hex)
}

/// Override-tag alpha value for an opacity in `[0, 1]`, e.g. `&H80&`
#[must_use]
pub fn alpha_from_opacity(opacity: f64) -> String {
    let inverted = ((1.0 - opacity.clamp(0.0, 1.0)) * 255.0).round() as u8;
    format!("&H{inverted:02X}&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_web_colors() {
        assert_eq!(Color::parse("#FF8800").unwrap(), Color::rgb(255, 136, 0));
        assert_eq!(Color::parse("#f80").unwrap(), Color::rgb(255, 136, 0));
        assert_eq!(Color::parse(" #000000 ").unwrap(), Color::BLACK);
    }

    #[test]
    fn parses_ass_colors() {
        assert_eq!(Color::parse("&H0088FF&").unwrap(), Color::rgb(255, 136, 0));
        assert_eq!(Color::parse("&H0088FF").unwrap(), Color::rgb(255, 136, 0));
        let translucent = Color::parse("&H80FFFFFF").unwrap();
        assert_eq!(translucent, Color::WHITE.with_alpha(0x80));
    }

    #[test]
    fn formats_each_notation() {
        let color = Color::rgb(0x12, 0x34, 0x56);
        assert_eq!(color.to_ass(), "&H563412&");
        assert_eq!(color.with_alpha(0x40).to_ass_style(), "&H40563412");
        assert_eq!(color.to_rgb_hex(), "#123456");
    }

    #[test]
    fn shorthand_expands_before_conversion() {
        assert_eq!(rgb_to_bgr("#abc").unwrap(), "&HCCBBAA&");
    }

    #[test]
    fn already_ass_colors_pass_through() {
        assert_eq!(rgb_to_bgr("&H563412&").unwrap(), "&H563412&");
    }

    #[test]
    fn rejects_garbage() {
        assert!(rgb_to_bgr("blue").is_err());
        assert!(bgr_to_rgb("#12345").is_err());
    }

    #[test]
    fn opacity_to_alpha() {
        assert_eq!(alpha_from_opacity(1.0), "&H00&");
        assert_eq!(alpha_from_opacity(0.0), "&HFF&");
        assert_eq!(alpha_from_opacity(0.5), "&H80&");
    }
}
