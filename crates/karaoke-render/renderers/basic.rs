//! Two-line renderer with a style per singer
//!
//! Each line becomes one karaoke dialogue spanning the line. In a duet,
//! even singers sit in the top slot and odd singers in the bottom slot; a
//! unison line is duplicated for every physical singer when splitting is
//! enabled, and otherwise uses the unison style where it is.

use karaoke_ass::document::{Ass, Dialogue, LineRef};
use serde::{Deserialize, Serialize};

use super::{
    is_duet, line_singers, lyrics_style_name, prepare_lines, register_style, slot_options,
    text::karaoke_text, RenderInput, Renderer, SlotMargins, KARAOKE_TAG,
};
use crate::{
    alignment::{Line, ALL_SINGERS_ID},
    core::{Layout, Result, Slot, StyleOptions, StyleOptionsMapping},
};

/// Settings of the basic renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BasicSettings {
    /// Seconds subtracted from every timestamp
    pub offset: f64,
    /// Duplicate unison lines for every singer
    pub split_duet: bool,
    /// Vertical margin of the top slot in a duet
    pub top_margin_v: i32,
    /// Vertical margin of the bottom slot in a duet
    pub bottom_margin_v: i32,
}

impl Default for BasicSettings {
    fn default() -> Self {
        Self {
            offset: 0.0,
            split_duet: true,
            top_margin_v: 80,
            bottom_margin_v: 80,
        }
    }
}

/// Renderer A: one dialogue per line and singer
#[derive(Debug)]
pub struct BasicRenderer<'a> {
    lines: Vec<Line>,
    styles: &'a StyleOptionsMapping,
    settings: &'a BasicSettings,
    layout: Layout,
    rtl: bool,
    duet: bool,
}

impl<'a> BasicRenderer<'a> {
    /// Prepare the alignment for rendering
    ///
    /// # Errors
    ///
    /// Returns an error if the alignment violates a structural invariant.
    pub fn new(input: RenderInput<'a>, settings: &'a BasicSettings) -> Result<Self> {
        let lines = prepare_lines(input.alignment, settings.offset)?;
        let duet = is_duet(&lines);
        Ok(Self {
            lines,
            styles: input.styles,
            settings,
            layout: input.layout,
            rtl: input.rtl,
            duet,
        })
    }

    fn margins(&self) -> SlotMargins {
        SlotMargins {
            top: self.settings.top_margin_v,
            bottom: self.settings.bottom_margin_v,
        }
    }

    /// Style name and options for a singer, registering the style
    fn style_for(&self, ass: &mut Ass, singer: i32) -> Result<(String, StyleOptions)> {
        let options = self.styles.resolve(singer)?;
        let (name, options) = if self.duet && singer != ALL_SINGERS_ID {
            let slot = Slot::for_singer(singer);
            (
                lyrics_style_name(singer, Some(slot)),
                slot_options(options, slot, self.margins()),
            )
        } else {
            (lyrics_style_name(singer, None), options.clone())
        };
        register_style(ass, &name, &options, &self.layout)?;
        Ok((name, options))
    }
}

impl Renderer for BasicRenderer<'_> {
    fn id(&self) -> &'static str {
        "basic"
    }

    fn lines(&self) -> &[Line] {
        &self.lines
    }

    fn ass(&self) -> Result<Ass> {
        let mut ass = Ass::new(self.layout.resolution);
        for (index, line) in self.lines.iter().enumerate() {
            for singer in line_singers(line, self.styles, self.settings.split_duet) {
                let (style, options) = self.style_for(&mut ass, singer)?;
                let text = karaoke_text(line, line.start, &options, self.rtl);
                ass.events.push(
                    Dialogue::new(line.start, line.end, style, text)
                        .with_tag(KARAOKE_TAG)
                        .with_line(LineRef(index))
                        .with_singer(singer),
                );
            }
        }
        log::debug!(
            "basic renderer: {} lines, {} dialogues",
            self.lines.len(),
            ass.events.len()
        );
        Ok(ass)
    }
}
