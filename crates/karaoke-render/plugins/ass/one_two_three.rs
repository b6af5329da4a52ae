//! "1 2 3" count-in before lines that follow a pause

use karaoke_ass::{
    document::{Ass, Dialogue, Insertion},
    tags::{karaoke_tag, OverrideBlock},
    utils::centiseconds,
};
use serde::{Deserialize, Serialize};

use super::{
    utils::{karaoke_cues, singer_style, SeenTimes},
    AssPlugin, PluginContext,
};
use crate::core::{Result, Slot};

pub(super) const ID: &str = "123";

const STYLE_PREFIX: &str = "Count";
const BEATS: [&str; 3] = ["1", "2", "3"];

/// Options of the count-in plugin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OneTwoThreeOptions {
    /// Run the plugin
    pub enabled: bool,
    /// Minimum silence before a line, in seconds
    pub min_gap: f64,
    /// Length of the whole count-in, in seconds
    pub duration: f64,
    /// Alternate the count-in between top and bottom, or in a duet place it
    /// on the side of the singer it counts in
    pub auto_alignment: bool,
    /// Numpad alignment when not alternating
    pub alignment: u8,
}

impl Default for OneTwoThreeOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            min_gap: 3.0,
            duration: 1.5,
            auto_alignment: false,
            alignment: 8,
        }
    }
}

/// Inserts a swept "1 2 3" ending exactly when the line starts
#[derive(Debug, Clone)]
pub struct OneTwoThreePlugin<'a> {
    options: &'a OneTwoThreeOptions,
}

impl<'a> OneTwoThreePlugin<'a> {
    /// Create the plugin
    #[must_use]
    pub const fn new(options: &'a OneTwoThreeOptions) -> Self {
        Self { options }
    }
}

fn count_in_text(start: f64, end: f64, alignment: u8, rtl: bool) -> String {
    let beat = (end - start) / BEATS.len() as f64;
    let mut text = OverrideBlock::new().an(alignment).build();
    let mut cursor = centiseconds(start);
    for (index, digit) in BEATS.iter().enumerate() {
        if index > 0 {
            text.push(' ');
        }
        let next = centiseconds(beat.mul_add((index + 1) as f64, start)).max(cursor);
        text.push_str(&karaoke_tag(next - cursor, rtl));
        text.push_str(digit);
        cursor = next;
    }
    text
}

impl AssPlugin for OneTwoThreePlugin<'_> {
    fn id(&self) -> &'static str {
        ID
    }

    fn apply(&self, ass: &mut Ass, context: &PluginContext<'_>) -> Result<()> {
        let mut seen = SeenTimes::tagged(ass, ID);
        let mut insertions = Vec::new();
        let mut slot = Slot::Top;

        for cue in karaoke_cues(ass, context.lines) {
            let end = cue.start;
            let start = end - self.options.duration;
            if start < 0.0 {
                log::debug!("123: count-in for line at {end:.2}s would start before zero");
                continue;
            }
            if cue.gap < self.options.min_gap {
                log::trace!("123: gap {:.2}s before line at {end:.2}s too short", cue.gap);
                continue;
            }
            if !seen.insert(start, end) {
                continue;
            }

            let alignment = if self.options.auto_alignment && context.duet {
                Slot::for_singer(cue.singer).alignment(self.options.alignment)
            } else if self.options.auto_alignment {
                let alignment = slot.alignment(self.options.alignment);
                slot = slot.flip();
                alignment
            } else {
                self.options.alignment
            };
            let (style, _) = singer_style(ass, STYLE_PREFIX, cue.singer, context, |options| options)?;
            let text = count_in_text(start, end, alignment, context.rtl());
            insertions.push(Insertion::new(
                cue.index,
                Dialogue::new(start, end, style, text)
                    .with_layer(1)
                    .with_singer(cue.singer)
                    .with_tag(ID),
            ));
        }

        ass.events.apply_insertions(insertions);
        Ok(())
    }
}
