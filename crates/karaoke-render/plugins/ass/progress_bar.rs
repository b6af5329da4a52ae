//! Shrinking bar that fills the pause before a line

use karaoke_ass::{
    document::{Ass, Dialogue, Insertion},
    tags::{rectangle_drawing, OverrideBlock},
    utils::{alpha_from_opacity, centiseconds},
};
use serde::{Deserialize, Serialize};

use super::{
    utils::{karaoke_cues, singer_style, SeenTimes},
    AssPlugin, PluginContext,
};
use crate::core::{Point, Result, StyleOptions};

pub(super) const ID: &str = "progress-bar";

const STYLE_PREFIX: &str = "ProgressBar";

/// Options of the progress bar plugin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressBarOptions {
    /// Run the plugin
    pub enabled: bool,
    /// Minimum silence before a line, in seconds
    pub min_gap: f64,
    /// Shortest bar in seconds
    pub min_duration: f64,
    /// Longest bar in seconds
    pub max_duration: f64,
    /// No bar starts before this time, in seconds
    pub song_start_gap: f64,
    /// Top-left corner in base-resolution pixels
    pub position: Point,
    /// Full width in base-resolution pixels
    pub width: f64,
    /// Height in base-resolution pixels
    pub height: f64,
    /// Opacity in `[0, 1]`
    pub opacity: f64,
}

impl Default for ProgressBarOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            min_gap: 3.0,
            min_duration: 1.0,
            max_duration: 5.0,
            song_start_gap: 0.5,
            position: Point::new(660.0, 60.0),
            width: 600.0,
            height: 16.0,
            opacity: 0.8,
        }
    }
}

/// Draws a bar during each long pause that shrinks to nothing as the next
/// line starts
#[derive(Debug, Clone)]
pub struct ProgressBarPlugin<'a> {
    options: &'a ProgressBarOptions,
}

impl<'a> ProgressBarPlugin<'a> {
    /// Create the plugin
    #[must_use]
    pub const fn new(options: &'a ProgressBarOptions) -> Self {
        Self { options }
    }

    fn text(&self, context: &PluginContext<'_>, style: &StyleOptions, duration_ms: u64) -> Result<String> {
        let layout = &context.layout;
        let corner = layout.point(self.options.position);
        let block = OverrideBlock::new()
            .an(7)
            .pos(corner.x, corner.y)
            .raw(r"\bord0\shad0")
            .color(style.primary()?)
            .alpha(&alpha_from_opacity(self.options.opacity))
            .transform(0, duration_ms, r"\fscx0")
            .drawing(1)
            .build();
        let shape = rectangle_drawing(layout.px(self.options.width), layout.px(self.options.height));
        Ok(format!("{block}{shape}"))
    }
}

impl AssPlugin for ProgressBarPlugin<'_> {
    fn id(&self) -> &'static str {
        ID
    }

    fn apply(&self, ass: &mut Ass, context: &PluginContext<'_>) -> Result<()> {
        let mut seen = SeenTimes::tagged(ass, ID);
        let mut insertions = Vec::new();
        let mut previous_end = f64::NEG_INFINITY;
        let (min_duration, max_duration) = if self.options.min_duration <= self.options.max_duration {
            (self.options.min_duration, self.options.max_duration)
        } else {
            (self.options.max_duration, self.options.min_duration)
        };

        for cue in karaoke_cues(ass, context.lines) {
            if cue.gap < self.options.min_gap {
                continue;
            }
            let end = cue.start;
            let start = (end - cue.gap.clamp(min_duration, max_duration))
                .max(self.options.song_start_gap)
                .max(previous_end);
            if start >= end {
                log::debug!("progress-bar: no room before line at {end:.2}s");
                continue;
            }
            if !seen.insert(start, end) {
                previous_end = end;
                continue;
            }

            let (style, options) = singer_style(ass, STYLE_PREFIX, cue.singer, context, |options| {
                StyleOptions {
                    outline: 0.0,
                    shadow: 0.0,
                    alignment: 7,
                    ..options
                }
            })?;
            let duration_ms = (centiseconds(end) - centiseconds(start)) * 10;
            insertions.push(Insertion::new(
                cue.index,
                Dialogue::new(start, end, style, self.text(context, &options, duration_ms)?)
                    .with_layer(1)
                    .with_singer(cue.singer)
                    .with_tag(ID),
            ));
            previous_end = end;
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

    fn run(lines: &[Line], times: usize) -> Ass {
        let mut ass = Ass::new(Resolution::FULL_HD);
        for (index, line) in lines.iter().enumerate() {
            ass.events.push(
                Dialogue::new(line.start, line.end, "Singer0", "x")
                    .with_tag(KARAOKE_TAG)
                    .with_line(LineRef(index)),
            );
        }
        let runtime = Runtime::default();
        let context = PluginContext {
            lines,
            runtime: &runtime,
            layout: Layout::unscaled(Resolution::FULL_HD),
            duet: false,
        };
        let options = ProgressBarOptions::default();
        for _ in 0..times {
            ProgressBarPlugin::new(&options).apply(&mut ass, &context).unwrap();
        }
        ass
    }

    fn line(start: f64, end: f64) -> Line {
        Line::from_words(None, vec![Word::new(start, end, "a")])
    }

    #[test]
    fn bar_is_clamped_and_floored() {
        let lines = vec![line(2.0, 3.0), line(5.0, 6.0), line(20.0, 21.0)];
        let ass = run(&lines, 1);
        let bars: Vec<(f64, f64)> = ass.events.tagged(ID).map(|d| (d.start, d.end)).collect();
        assert_eq!(bars, vec![(15.0, 20.0)]);

        let lines = vec![line(3.5, 4.0), line(10.0, 11.0)];
        let ass = run(&lines, 1);
        let bars: Vec<(f64, f64)> = ass.events.tagged(ID).map(|d| (d.start, d.end)).collect();
        assert_eq!(bars, vec![(0.5, 3.5), (5.0, 10.0)]);
    }

    #[test]
    fn bar_text_draws_a_shrinking_rectangle() {
        let ass = run(&[line(4.0, 5.0)], 1);
        let bar = ass.events.iter().next().unwrap();
        assert_eq!(
            bar.text,
            r"{\an7\pos(660,60)\bord0\shad0\c&H00D7FF&\alpha&H33&\t(0,3500,\fscx0)\p1}m 0 0 l 600 0 600 16 0 16"
        );
        assert_eq!(bar.style, "ProgressBar0");
    }

    #[test]
    fn rerun_adds_nothing() {
        let lines = vec![line(3.5, 4.0), line(10.0, 11.0)];
        assert_eq!(run(&lines, 2).to_string(), run(&lines, 1).to_string());
    }
}
