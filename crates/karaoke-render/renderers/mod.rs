//! Renderers: alignment to subtitle document
//!
//! Every renderer prepares the alignment the same way (offset applied,
//! blank words removed, words that would start before zero dropped, empty
//! lines dropped) and then lays the remaining lines out with its own
//! strategy:
//!
//! - [`BasicRenderer`] (`basic`): one dialogue per line, duet singers in
//!   fixed top/bottom slots
//! - [`WaitingLineRenderer`] (`waiting-line`): an inactive preview line
//!   before each active karaoke line, slots alternating
//! - [`FourLineRenderer`] (`four-line`): pairs of lines alternating between
//!   an upper and a lower region, positioned explicitly
//!
//! Karaoke dialogues are tagged `karaoke`, carry a [`LineRef`] into
//! [`Renderer::lines`], and record the singer they were styled for.

mod basic;
mod four_line;
pub mod text;
mod waiting_line;

pub use basic::{BasicRenderer, BasicSettings};
pub use four_line::{FourLineRenderer, FourLineSettings};
pub use waiting_line::{WaitingLineRenderer, WaitingLineSettings};

use karaoke_ass::document::Ass;
use serde::{Deserialize, Serialize};

use crate::{
    alignment::{Alignment, Line, ALL_SINGERS_ID},
    core::{
        singer_style_name, Layout, RenderError, Result, Slot, StyleOptions, StyleOptionsMapping,
    },
};

/// Stage tag of karaoke dialogues
pub const KARAOKE_TAG: &str = "karaoke";

/// Stage tag of inactive preview dialogues
pub const WAITING_TAG: &str = "waiting";

/// Style name prefix of lyric styles
pub const LYRICS_STYLE_PREFIX: &str = "Singer";

/// Produces a subtitle document from prepared lines
pub trait Renderer {
    /// Identifier matching the settings tag
    fn id(&self) -> &'static str;

    /// Lines after preparation; dialogue line references index this
    fn lines(&self) -> &[Line];

    /// Render the document
    ///
    /// # Errors
    ///
    /// Returns an error if a style cannot be resolved or converted.
    fn ass(&self) -> Result<Ass>;
}

/// Everything a renderer reads besides its own settings
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
    /// Alignment to render
    pub alignment: &'a Alignment,
    /// Per-singer styles
    pub styles: &'a StyleOptionsMapping,
    /// Output canvas and scaling
    pub layout: Layout,
    /// Right-to-left script
    pub rtl: bool,
}

/// Renderer selection and settings, tagged by `id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "id")]
pub enum RendererSettings {
    /// Two-line layout with a style per singer
    #[serde(rename = "basic")]
    Basic(BasicSettings),
    /// Waiting and active line pairs
    #[serde(rename = "waiting-line")]
    WaitingLine(WaitingLineSettings),
    /// Four-line scrolling layout
    #[serde(rename = "four-line")]
    FourLine(FourLineSettings),
}

impl Default for RendererSettings {
    fn default() -> Self {
        Self::Basic(BasicSettings::default())
    }
}

impl RendererSettings {
    /// Renderer identifier
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Basic(_) => "basic",
            Self::WaitingLine(_) => "waiting-line",
            Self::FourLine(_) => "four-line",
        }
    }

    /// Global offset in seconds subtracted from every timestamp
    #[must_use]
    pub fn offset(&self) -> f64 {
        match self {
            Self::Basic(settings) => settings.offset,
            Self::WaitingLine(settings) => settings.offset,
            Self::FourLine(settings) => settings.offset,
        }
    }
}

/// Build the renderer selected by the settings
///
/// # Errors
///
/// Returns [`RenderError::InvalidAlignment`] if the alignment violates a
/// structural invariant.
pub fn create_renderer<'a>(
    settings: &'a RendererSettings,
    input: RenderInput<'a>,
) -> Result<Box<dyn Renderer + 'a>> {
    Ok(match settings {
        RendererSettings::Basic(settings) => Box::new(BasicRenderer::new(input, settings)?),
        RendererSettings::WaitingLine(settings) => {
            Box::new(WaitingLineRenderer::new(input, settings)?)
        }
        RendererSettings::FourLine(settings) => Box::new(FourLineRenderer::new(input, settings)?),
    })
}

/// Apply the offset and drop everything that cannot be rendered
///
/// # Errors
///
/// Returns [`RenderError::InvalidAlignment`] for a visible word without
/// subwords.
pub fn prepare_lines(alignment: &Alignment, offset: f64) -> Result<Vec<Line>> {
    let mut lines = Vec::with_capacity(alignment.lines.len());
    for (index, line) in alignment.lines.iter().enumerate() {
        let mut words = Vec::with_capacity(line.words.len());
        for word in &line.words {
            if word.is_blank() {
                continue;
            }
            if word.subwords.is_empty() {
                return Err(RenderError::invalid_alignment(format!(
                    "word '{}' in line {index} has no subwords",
                    word.text
                )));
            }
            let shifted = word.shifted(offset);
            if shifted.start < 0.0 {
                log::debug!(
                    "dropping word '{}' of line {index}: starts at {:.2}s after offset",
                    word.text,
                    shifted.start
                );
                continue;
            }
            words.push(shifted);
        }

        if words.is_empty() {
            log::debug!("dropping line {index}: no renderable words");
            continue;
        }
        lines.push(Line::from_words(line.singer, words));
    }
    Ok(lines)
}

/// Singers a line is rendered for
///
/// A unison line with splitting enabled is duplicated for every physical
/// singer.
#[must_use]
pub fn line_singers(line: &Line, styles: &StyleOptionsMapping, split_duet: bool) -> Vec<i32> {
    if split_duet && line.singer_id() == ALL_SINGERS_ID {
        styles.physical_singers()
    } else {
        vec![line.singer_id()]
    }
}

/// Check if any line belongs to a singer other than the default one
#[must_use]
pub fn is_duet(lines: &[Line]) -> bool {
    lines.iter().any(|line| line.singer_id() != 0)
}

/// Vertical margins of the two slots, in base-resolution pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotMargins {
    /// Margin of the top slot from the upper edge
    pub top: i32,
    /// Margin of the bottom slot from the lower edge
    pub bottom: i32,
}

impl SlotMargins {
    /// Margin of a slot
    #[must_use]
    pub const fn get(self, slot: Slot) -> i32 {
        match slot {
            Slot::Top => self.top,
            Slot::Bottom => self.bottom,
        }
    }
}

/// Options moved into a screen slot
#[must_use]
pub fn slot_options(options: &StyleOptions, slot: Slot, margins: SlotMargins) -> StyleOptions {
    StyleOptions {
        alignment: slot.alignment(options.alignment),
        margin_v: margins.get(slot),
        ..options.clone()
    }
}

/// Register a style under `name` unless one is already present
///
/// # Errors
///
/// Returns an error if a configured colour is invalid.
pub fn register_style(
    ass: &mut Ass,
    name: &str,
    options: &StyleOptions,
    layout: &Layout,
) -> Result<()> {
    if !ass.styles.contains(name) {
        ass.styles.add(options.to_style(name, layout)?);
    }
    Ok(())
}

/// Lyric style name for a singer, with an optional slot suffix
#[must_use]
pub fn lyrics_style_name(singer: i32, slot: Option<Slot>) -> String {
    let base = singer_style_name(LYRICS_STYLE_PREFIX, singer);
    match slot {
        Some(slot) => format!("{base}{}", slot.suffix()),
        None => base,
    }
}
