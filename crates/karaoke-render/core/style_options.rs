//! Per-singer style options
//!
//! [`StyleOptions`] is the user-facing style record from settings, with
//! colours in web notation. Renderers and plugins turn it into concrete ASS
//! styles through [`StyleOptions::to_style`], which applies resolution
//! scaling and colour conversion. [`StyleOptionsMapping`] maps singer ids to
//! options; the [`ALL_SINGERS_ID`] key holds the style for unison lines.

use std::collections::BTreeMap;

use karaoke_ass::{
    document::Style,
    utils::{Color, CoreError},
};
use serde::{Deserialize, Serialize};

use super::{
    errors::{RenderError, Result},
    layout::Layout,
};
use crate::alignment::ALL_SINGERS_ID;

/// Visual style of one singer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleOptions {
    /// Font family
    pub font_name: String,
    /// Font size in base-resolution pixels
    pub font_size: f64,
    /// Bold text
    pub bold: bool,
    /// Italic text
    pub italic: bool,
    /// Underlined text
    pub underline: bool,
    /// Struck-out text
    pub strikeout: bool,
    /// Fill of sung syllables, `#RRGGBB`
    pub primary_color: String,
    /// Fill of syllables not yet sung
    pub secondary_color: String,
    /// Outline colour
    pub outline_color: String,
    /// Shadow colour
    pub back_color: String,
    /// Sung fill while the line is the active one
    pub active_primary_color: Option<String>,
    /// Unsung fill while the line is the active one
    pub active_secondary_color: Option<String>,
    /// Outline width in base-resolution pixels
    pub outline: f64,
    /// Shadow depth in base-resolution pixels
    pub shadow: f64,
    /// Horizontal scale percentage
    pub scale_x: f64,
    /// Vertical scale percentage
    pub scale_y: f64,
    /// Letter spacing in base-resolution pixels
    pub spacing: f64,
    /// Numpad alignment, 1-9
    pub alignment: u8,
    /// Left margin in base-resolution pixels
    pub margin_l: i32,
    /// Right margin in base-resolution pixels
    pub margin_r: i32,
    /// Vertical margin in base-resolution pixels
    pub margin_v: i32,
    /// Font encoding identifier
    pub encoding: i32,
    /// Render lyrics in upper case
    pub uppercase: bool,
    /// Edge blur strength
    pub blur: Option<f64>,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            font_name: "Arial".to_string(),
            font_size: 64.0,
            bold: true,
            italic: false,
            underline: false,
            strikeout: false,
            primary_color: "#FFD700".to_string(),
            secondary_color: "#FFFFFF".to_string(),
            outline_color: "#000000".to_string(),
            back_color: "#000000".to_string(),
            active_primary_color: None,
            active_secondary_color: None,
            outline: 3.0,
            shadow: 0.0,
            scale_x: 100.0,
            scale_y: 100.0,
            spacing: 0.0,
            alignment: 2,
            margin_l: 40,
            margin_r: 40,
            margin_v: 80,
            encoding: 1,
            uppercase: false,
            blur: None,
        }
    }
}

impl StyleOptions {
    /// Sung fill colour
    ///
    /// # Errors
    ///
    /// Returns a colour error if the configured value cannot be parsed.
    pub fn primary(&self) -> Result<Color> {
        Ok(Color::parse(&self.primary_color)?)
    }

    /// Unsung fill colour
    ///
    /// # Errors
    ///
    /// Returns a colour error if the configured value cannot be parsed.
    pub fn secondary(&self) -> Result<Color> {
        Ok(Color::parse(&self.secondary_color)?)
    }

    /// Sung fill for the active line, if configured
    ///
    /// # Errors
    ///
    /// Returns a colour error if the configured value cannot be parsed.
    pub fn active_primary(&self) -> Result<Option<Color>> {
        self.active_primary_color
            .as_deref()
            .map(Color::parse)
            .transpose()
            .map_err(RenderError::from)
    }

    /// Unsung fill for the active line, falling back to the secondary colour
    ///
    /// # Errors
    ///
    /// Returns a colour error if a configured value cannot be parsed.
    pub fn active_secondary(&self) -> Result<Color> {
        match self.active_secondary_color.as_deref() {
            Some(color) => Ok(Color::parse(color)?),
            None => self.secondary(),
        }
    }

    /// Apply the uppercase flag to lyric text
    #[must_use]
    pub fn transform_text(&self, text: &str) -> String {
        if self.uppercase {
            text.to_uppercase()
        } else {
            text.to_string()
        }
    }

    /// Build a named ASS style, scaled onto the layout
    ///
    /// # Errors
    ///
    /// Returns a colour error if any configured colour cannot be parsed, or
    /// a numeric error if the font size is not a positive number.
    pub fn to_style(&self, name: &str, layout: &Layout) -> Result<Style> {
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(CoreError::invalid_numeric(
                self.font_size,
                "font size must be a positive number",
            )
            .into());
        }
        Ok(Style {
            name: name.to_string(),
            fontname: self.font_name.clone(),
            fontsize: layout.px(self.font_size),
            primary_colour: self.primary()?,
            secondary_colour: self.secondary()?,
            outline_colour: Color::parse(&self.outline_color)?,
            back_colour: Color::parse(&self.back_color)?,
            bold: self.bold,
            italic: self.italic,
            underline: self.underline,
            strikeout: self.strikeout,
            scale_x: self.scale_x,
            scale_y: self.scale_y,
            spacing: layout.px(self.spacing),
            angle: 0.0,
            border_style: 1,
            outline: layout.px(self.outline),
            shadow: layout.px(self.shadow),
            alignment: self.alignment,
            margin_l: layout.margin(self.margin_l),
            margin_r: layout.margin(self.margin_r),
            margin_v: layout.margin(self.margin_v),
            encoding: self.encoding,
        })
    }
}

/// Singer id to style options
///
/// Ordered by singer id so every pass over singers is deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleOptionsMapping {
    styles: BTreeMap<i32, StyleOptions>,
}

impl Default for StyleOptionsMapping {
    /// Default style for singer 0
    fn default() -> Self {
        Self::single(StyleOptions::default())
    }
}

impl StyleOptionsMapping {
    /// Empty mapping
    #[must_use]
    pub const fn new() -> Self {
        Self {
            styles: BTreeMap::new(),
        }
    }

    /// Mapping holding one style for the default singer
    #[must_use]
    pub fn single(options: StyleOptions) -> Self {
        let mut mapping = Self::new();
        mapping.insert(0, options);
        mapping
    }

    /// Set the options of a singer
    pub fn insert(&mut self, singer: i32, options: StyleOptions) {
        self.styles.insert(singer, options);
    }

    /// Options configured for exactly this singer
    #[must_use]
    pub fn get(&self, singer: i32) -> Option<&StyleOptions> {
        self.styles.get(&singer)
    }

    /// Options for a singer, falling back to the default singer
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::MissingStyle`] if neither the singer nor the
    /// default singer is configured.
    pub fn resolve(&self, singer: i32) -> Result<&StyleOptions> {
        self.styles
            .get(&singer)
            .or_else(|| self.styles.get(&0))
            .ok_or(RenderError::MissingStyle { singer })
    }

    /// Physical singer ids, ascending; the unison key is excluded
    ///
    /// Falls back to the default singer when only unison is configured.
    #[must_use]
    pub fn physical_singers(&self) -> Vec<i32> {
        let singers: Vec<i32> = self
            .styles
            .keys()
            .copied()
            .filter(|&singer| singer != ALL_SINGERS_ID)
            .collect();
        if singers.is_empty() {
            vec![0]
        } else {
            singers
        }
    }

    /// Iterate over `(singer, options)` pairs in singer order
    pub fn iter(&self) -> impl Iterator<Item = (i32, &StyleOptions)> {
        self.styles.iter().map(|(&singer, options)| (singer, options))
    }
}

/// Style name used for a singer's lines
#[must_use]
pub fn singer_style_name(prefix: &str, singer: i32) -> String {
    if singer == ALL_SINGERS_ID {
        format!("{prefix}All")
    } else {
        format!("{prefix}{singer}")
    }
}
