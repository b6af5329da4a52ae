//! Style definitions and the `[V4+ Styles]` table
//!
//! Contains the owned `Style` record with typed fields and the `Styles`
//! table, which is keyed by unique name: adding a style whose name already
//! exists replaces the earlier definition in place.

use core::fmt;

use crate::utils::{format_number, Color};

/// Column order of the `[V4+ Styles]` section
pub const STYLE_FORMAT: &str = "Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding";

/// Style definition from `[V4+ Styles]`
///
/// With `\K` karaoke the primary colour is the sung fill and the secondary
/// colour is the fill before the sweep reaches a syllable.
///
/// # Examples
///
/// ```rust
/// use karaoke_ass::document::Style;
///
/// let style = Style {
///     name: "Default".to_string(),
///     fontsize: 48.0,
///     ..Style::default()
/// };
/// assert!(style.to_string().starts_with("Style: Default,Arial,48,"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    /// Style name (must be unique within script)
    pub name: String,
    /// Font name for text rendering
    pub fontname: String,
    /// Font size in canvas pixels
    pub fontsize: f64,
    /// Sung fill colour
    pub primary_colour: Color,
    /// Unsung fill colour
    pub secondary_colour: Color,
    /// Outline colour
    pub outline_colour: Color,
    /// Shadow/background colour
    pub back_colour: Color,
    /// Bold flag
    pub bold: bool,
    /// Italic flag
    pub italic: bool,
    /// Underline flag
    pub underline: bool,
    /// Strikeout flag
    pub strikeout: bool,
    /// Horizontal scale percentage
    pub scale_x: f64,
    /// Vertical scale percentage
    pub scale_y: f64,
    /// Character spacing in pixels
    pub spacing: f64,
    /// Rotation angle in degrees
    pub angle: f64,
    /// Border style (1=outline+shadow, 3=opaque box)
    pub border_style: u8,
    /// Outline width in pixels
    pub outline: f64,
    /// Shadow depth in pixels
    pub shadow: f64,
    /// Numpad alignment, 1-9
    pub alignment: u8,
    /// Left margin in pixels
    pub margin_l: i32,
    /// Right margin in pixels
    pub margin_r: i32,
    /// Vertical margin in pixels
    pub margin_v: i32,
    /// Font encoding identifier
    pub encoding: i32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            name: "Default".to_string(),
            fontname: "Arial".to_string(),
            fontsize: 20.0,
            primary_colour: Color::WHITE,
            secondary_colour: Color::rgb(0xFF, 0, 0),
            outline_colour: Color::BLACK,
            back_colour: Color::BLACK,
            bold: false,
            italic: false,
            underline: false,
            strikeout: false,
            scale_x: 100.0,
            scale_y: 100.0,
            spacing: 0.0,
            angle: 0.0,
            border_style: 1,
            outline: 2.0,
            shadow: 0.0,
            alignment: 2,
            margin_l: 10,
            margin_r: 10,
            margin_v: 10,
            encoding: 1,
        }
    }
}

fn flag(value: bool) -> u8 {
    u8::from(value)
}

impl fmt::Display for Style {
    /// Standard V4+ style line in [`STYLE_FORMAT`] column order
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Style: {},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
            self.name,
            self.fontname,
            format_number(self.fontsize),
            self.primary_colour.to_ass_style(),
            self.secondary_colour.to_ass_style(),
            self.outline_colour.to_ass_style(),
            self.back_colour.to_ass_style(),
            flag(self.bold),
            flag(self.italic),
            flag(self.underline),
            flag(self.strikeout),
            format_number(self.scale_x),
            format_number(self.scale_y),
            format_number(self.spacing),
            format_number(self.angle),
            self.border_style,
            format_number(self.outline),
            format_number(self.shadow),
            self.alignment,
            self.margin_l,
            self.margin_r,
            self.margin_v,
            self.encoding
        )
    }
}

/// The `[V4+ Styles]` table, unique by name, in registration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Styles {
    styles: Vec<Style>,
}

impl Styles {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a style; an existing style with the same name is replaced
    pub fn add(&mut self, style: Style) {
        if let Some(existing) = self.styles.iter_mut().find(|s| s.name == style.name) {
            *existing = style;
        } else {
            self.styles.push(style);
        }
    }

    /// Look up a style by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Style> {
        self.styles.iter().find(|s| s.name == name)
    }

    /// Check if a style with this name is registered
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of registered styles
    #[must_use]
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Check if no style is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Iterate in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Style> {
        self.styles.iter()
    }
}

impl fmt::Display for Styles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[V4+ Styles]")?;
        writeln!(f, "{STYLE_FORMAT}")?;
        for style in &self.styles {
            writeln!(f, "{style}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn style_line_has_all_columns() {
        let line = Style::default().to_string();
        assert_eq!(
            line,
            "Style: Default,Arial,20,&H00FFFFFF,&H000000FF,&H00000000,&H00000000,0,0,0,0,100,100,0,0,1,2,0,2,10,10,10,1"
        );
        let columns = line.trim_start_matches("Style: ").split(',').count();
        assert_eq!(columns, STYLE_FORMAT.split(',').count());
    }

    #[test]
    fn flags_and_colours_serialize() {
        let style = Style {
            name: "Lead".to_string(),
            bold: true,
            italic: true,
            primary_colour: Color::rgb(0x11, 0x22, 0x33).with_alpha(0x80),
            alignment: 8,
            ..Style::default()
        };
        let line = style.to_string();
        assert!(line.starts_with("Style: Lead,Arial,20,&H80332211,"));
        assert!(line.contains(",1,1,0,0,100,100,"));
        assert!(line.contains(",8,10,10,10,1"));
    }

    #[test]
    fn adding_same_name_replaces() {
        let mut styles = Styles::new();
        styles.add(Style::default());
        styles.add(Style {
            name: "Other".to_string(),
            ..Style::default()
        });
        styles.add(Style {
            fontsize: 64.0,
            ..Style::default()
        });

        assert_eq!(styles.len(), 2);
        assert!((styles.get("Default").unwrap().fontsize - 64.0).abs() < f64::EPSILON);
        assert_eq!(styles.iter().next().unwrap().name, "Default");
    }

    #[test]
    fn section_lists_format_then_styles() {
        let mut styles = Styles::new();
        styles.add(Style::default());
        let text = styles.to_string();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("[V4+ Styles]"));
        assert_eq!(lines.next(), Some(STYLE_FORMAT));
        assert!(lines.next().unwrap().starts_with("Style: Default,"));
    }
}
