//! Marker sliding towards a line before it is sung
//!
//! The marker travels horizontally towards the position of the line, read
//! from the `\pos` tag of its karaoke event, stops short of it and turns
//! transparent on arrival.
//! Events without an explicit position get no marker.

use karaoke_ass::{
    document::{Ass, Dialogue, Insertion},
    tags::OverrideBlock,
    utils::{milliseconds, CoreError},
};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{
    utils::{karaoke_cues, position, singer_style, SeenTimes, POSITION_PATTERN},
    AssPlugin, PluginContext,
};
use crate::core::{Result, StyleOptions};

pub(super) const ID: &str = "indicator";

const STYLE_PREFIX: &str = "Indicator";

/// Options of the indicator plugin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IndicatorOptions {
    /// Run the plugin
    pub enabled: bool,
    /// Minimum silence before a line, in seconds
    pub min_gap: f64,
    /// Travel time in seconds; the marker arrives when the line starts
    pub duration: f64,
    /// Horizontal offset of the start point from the line position, in
    /// base-resolution pixels
    #[serde(alias = "distance")]
    pub distance_before: f64,
    /// Horizontal offset of the end point from the line position, on the
    /// same side as the start, so the marker stops short of the text
    pub distance_after: f64,
    /// Fade to transparent at the end of the travel, in milliseconds
    pub fade_ms: u64,
    /// Marker for left-to-right scripts
    pub glyph: String,
    /// Marker for right-to-left scripts
    pub rtl_glyph: String,
}

impl Default for IndicatorOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            min_gap: 3.0,
            duration: 2.0,
            distance_before: 300.0,
            distance_after: 60.0,
            fade_ms: 300,
            glyph: "►".to_string(),
            rtl_glyph: "◄".to_string(),
        }
    }
}

/// Inserts a moving marker before positioned lines that follow a pause
#[derive(Debug, Clone)]
pub struct IndicatorPlugin<'a> {
    options: &'a IndicatorOptions,
}

impl<'a> IndicatorPlugin<'a> {
    /// Create the plugin
    #[must_use]
    pub const fn new(options: &'a IndicatorOptions) -> Self {
        Self { options }
    }

    fn text(&self, position: (f64, f64), offsets: (f64, f64), rtl: bool) -> String {
        let (x, y) = position;
        let (before, after) = offsets;
        let (from, to, glyph) = if rtl {
            (x + before, x + after, self.options.rtl_glyph.as_str())
        } else {
            (x - before, x - after, self.options.glyph.as_str())
        };
        let travel = milliseconds(self.options.duration);
        let block = OverrideBlock::new()
            .an(2)
            .move_to((from, y), (to, y), 0, travel)
            .transform(travel.saturating_sub(self.options.fade_ms), travel, r"\alpha&HFF&")
            .build();
        format!("{block}{glyph}")
    }
}

impl AssPlugin for IndicatorPlugin<'_> {
    fn id(&self) -> &'static str {
        ID
    }

    fn apply(&self, ass: &mut Ass, context: &PluginContext<'_>) -> Result<()> {
        let pattern = Regex::new(POSITION_PATTERN).map_err(CoreError::internal)?;
        let offsets = (
            context.layout.px(self.options.distance_before),
            context.layout.px(self.options.distance_after),
        );
        let mut seen = SeenTimes::tagged(ass, ID);
        let mut insertions = Vec::new();

        for cue in karaoke_cues(ass, context.lines) {
            let Some(position) = position(&pattern, &ass.events.events[cue.index].text) else {
                log::trace!("indicator: line at {:.2}s has no position", cue.start);
                continue;
            };
            let end = cue.start;
            let start = end - self.options.duration;
            if start < 0.0 {
                log::debug!("indicator: marker for line at {end:.2}s would start before zero");
                continue;
            }
            if cue.gap < self.options.min_gap {
                continue;
            }
            if !seen.insert(start, end) {
                continue;
            }

            let (style, _) = singer_style(ass, STYLE_PREFIX, cue.singer, context, |options| {
                StyleOptions {
                    alignment: 2,
                    ..options
                }
            })?;
            insertions.push(Insertion::new(
                cue.index,
                Dialogue::new(start, end, style, self.text(position, offsets, context.rtl()))
                    .with_layer(1)
                    .with_singer(cue.singer)
                    .with_tag(ID),
            ));
        }

        ass.events.apply_insertions(insertions);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        alignment::{Line, Word},
        core::{Layout, Runtime},
        renderers::KARAOKE_TAG,
    };
    use karaoke_ass::document::{LineRef, Resolution};
    use pretty_assertions::assert_eq;

    fn run(text: &str, rtl: bool) -> Ass {
        let lines = vec![Line::from_words(None, vec![Word::new(6.0, 7.0, "a")])];
        let mut ass = Ass::new(Resolution::FULL_HD);
        ass.events.push(
            Dialogue::new(3.0, 7.0, "Singer0", text)
                .with_tag(KARAOKE_TAG)
                .with_line(LineRef(0)),
        );
        let runtime = Runtime {
            rtl,
            ..Runtime::default()
        };
        let context = PluginContext {
            lines: &lines,
            runtime: &runtime,
            layout: Layout::unscaled(Resolution::FULL_HD),
            duet: false,
        };
        IndicatorPlugin::new(&IndicatorOptions::default())
            .apply(&mut ass, &context)
            .unwrap();
        ass
    }

    #[test]
    fn marker_stops_short_of_line_position() {
        let ass = run(r"{\pos(960,150)}{\K300}a", false);
        let marker = ass.events.iter().next().unwrap();
        assert!(marker.has_tag(ID));
        assert_eq!((marker.start, marker.end), (4.0, 6.0));
        assert_eq!(
            marker.text,
            r"{\an2\move(660,150,900,150,0,2000)\t(1700,2000,\alpha&HFF&)}►"
        );
    }

    #[test]
    fn rtl_marker_comes_from_the_right() {
        let ass = run(r"{\pos(960,150)}a", true);
        let marker = ass.events.iter().next().unwrap();
        assert!(marker.text.contains(r"\move(1260,150,1020,150,0,2000)"));
        assert!(marker.text.ends_with('◄'));
    }

    #[test]
    fn legacy_distance_key_sets_the_start_offset() {
        let options: IndicatorOptions =
            serde_json::from_str(r#"{"distance": 200, "distanceAfter": 0}"#).unwrap();
        assert_eq!((options.distance_before, options.distance_after), (200.0, 0.0));
    }

    #[test]
    fn unpositioned_lines_are_skipped() {
        let ass = run(r"{\K100}a", false);
        assert_eq!(ass.events.len(), 1);
    }
}
