//! Waiting and active line pairs
//!
//! Every line is shown twice: first as an inactive preview in the secondary
//! colour while the previous line is sung, then as the active karaoke line.
//! Lines alternate between the top and bottom slot. A long silence resets
//! the next line to the top slot and its preview starts a fixed lead time
//! before the line instead of with the previous line. Copies of a unison
//! line split per singer take the slot of their singer.

use karaoke_ass::{
    document::{Ass, Dialogue, LineRef},
    tags::OverrideBlock,
};
use serde::{Deserialize, Serialize};

use super::{
    line_singers, lyrics_style_name, prepare_lines, register_style, slot_options,
    text::{karaoke_text, plain_text},
    RenderInput, Renderer, SlotMargins, KARAOKE_TAG, WAITING_TAG,
};
use crate::{
    alignment::Line,
    core::{Layout, Result, Slot, StyleOptions, StyleOptionsMapping},
};

/// Settings of the waiting-line renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WaitingLineSettings {
    /// Seconds subtracted from every timestamp
    pub offset: f64,
    /// Duplicate unison lines for every singer
    pub split_duet: bool,
    /// Emit the inactive preview lines
    pub show_waiting: bool,
    /// Preview lead time after a long gap, in seconds
    pub duration_before_start: f64,
    /// Gap in seconds after which the slot resets to the top
    pub gap_reset: f64,
    /// Vertical margin of the top slot
    pub top_margin_v: i32,
    /// Vertical margin of the bottom slot
    pub bottom_margin_v: i32,
}

impl Default for WaitingLineSettings {
    fn default() -> Self {
        Self {
            offset: 0.0,
            split_duet: true,
            show_waiting: true,
            duration_before_start: 2.0,
            gap_reset: 5.0,
            top_margin_v: 80,
            bottom_margin_v: 80,
        }
    }
}

/// Where and since when a line is shown
#[derive(Debug, Clone, Copy, PartialEq)]
struct Placement {
    slot: Slot,
    waiting_start: f64,
}

/// Renderer B: inactive preview followed by the active karaoke line
#[derive(Debug)]
pub struct WaitingLineRenderer<'a> {
    lines: Vec<Line>,
    styles: &'a StyleOptionsMapping,
    settings: &'a WaitingLineSettings,
    layout: Layout,
    rtl: bool,
}

impl<'a> WaitingLineRenderer<'a> {
    /// Prepare the alignment for rendering
    ///
    /// # Errors
    ///
    /// Returns an error if the alignment violates a structural invariant.
    pub fn new(input: RenderInput<'a>, settings: &'a WaitingLineSettings) -> Result<Self> {
        Ok(Self {
            lines: prepare_lines(input.alignment, settings.offset)?,
            styles: input.styles,
            settings,
            layout: input.layout,
            rtl: input.rtl,
        })
    }

    fn placements(&self) -> Vec<Placement> {
        let mut placements: Vec<Placement> = Vec::with_capacity(self.lines.len());
        let mut previous: Option<(&Line, Slot)> = None;

        for line in &self.lines {
            let placement = match previous {
                Some((prev, slot)) if line.start - prev.end <= self.settings.gap_reset => {
                    Placement {
                        slot: slot.flip(),
                        waiting_start: prev.start,
                    }
                }
                _ => Placement {
                    slot: Slot::Top,
                    waiting_start: (line.start - self.settings.duration_before_start).max(0.0),
                },
            };
            previous = Some((line, placement.slot));
            placements.push(placement);
        }
        placements
    }

    fn slot_style(&self, ass: &mut Ass, singer: i32, slot: Slot) -> Result<(String, StyleOptions)> {
        let margins = SlotMargins {
            top: self.settings.top_margin_v,
            bottom: self.settings.bottom_margin_v,
        };
        let name = lyrics_style_name(singer, Some(slot));
        let options = slot_options(self.styles.resolve(singer)?, slot, margins);
        register_style(ass, &name, &options, &self.layout)?;
        Ok((name, options))
    }
}

fn waiting_text(line: &Line, options: &StyleOptions) -> Result<String> {
    let block = OverrideBlock::new().color(options.secondary()?).build();
    Ok(format!("{block}{}", plain_text(line, options)))
}

fn active_text(line: &Line, options: &StyleOptions, rtl: bool) -> Result<String> {
    let mut block = OverrideBlock::new();
    if let Some(primary) = options.active_primary()? {
        block = block.color(primary);
    }
    let block = block.secondary_color(options.active_secondary()?).build();
    Ok(format!("{block}{}", karaoke_text(line, line.start, options, rtl)))
}

impl Renderer for WaitingLineRenderer<'_> {
    fn id(&self) -> &'static str {
        "waiting-line"
    }

    fn lines(&self) -> &[Line] {
        &self.lines
    }

    fn ass(&self) -> Result<Ass> {
        let mut ass = Ass::new(self.layout.resolution);
        let placements = self.placements();

        for (index, (line, placement)) in self.lines.iter().zip(&placements).enumerate() {
            let singers = line_singers(line, self.styles, self.settings.split_duet);
            let split = singers.len() > 1;
            for singer in singers {
                let slot = if split {
                    Slot::for_singer(singer)
                } else {
                    placement.slot
                };
                let (style, options) = self.slot_style(&mut ass, singer, slot)?;

                if self.settings.show_waiting && placement.waiting_start < line.start {
                    ass.events.push(
                        Dialogue::new(
                            placement.waiting_start,
                            line.start,
                            style.clone(),
                            waiting_text(line, &options)?,
                        )
                        .with_tag(WAITING_TAG)
                        .with_line(LineRef(index))
                        .with_singer(singer),
                    );
                }

                ass.events.push(
                    Dialogue::new(line.start, line.end, style, active_text(line, &options, self.rtl)?)
                        .with_tag(KARAOKE_TAG)
                        .with_line(LineRef(index))
                        .with_singer(singer),
                );
            }
        }
        log::debug!(
            "waiting-line renderer: {} lines, {} dialogues",
            self.lines.len(),
            ass.events.len()
        );
        Ok(ass)
    }
}
