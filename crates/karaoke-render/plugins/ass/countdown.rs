//! Numeric countdown before lines that follow a long pause

use karaoke_ass::document::{Ass, Dialogue, Insertion};
use serde::{Deserialize, Serialize};

use super::{
    utils::{karaoke_cues, singer_style, SeenTimes},
    AssPlugin, PluginContext,
};
use crate::core::{Result, StyleOptions};

pub(super) const ID: &str = "countdown";

const STYLE_PREFIX: &str = "Countdown";
const LAYER: i32 = 2;

/// Options of the countdown plugin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CountdownOptions {
    /// Run the plugin
    pub enabled: bool,
    /// First number shown; one number per second down to 1
    pub count: u32,
    /// Minimum silence before a line, in seconds
    pub min_gap: f64,
    /// Font size in base-resolution pixels
    pub font_size: f64,
    /// Numpad alignment of the numbers
    pub alignment: u8,
}

impl Default for CountdownOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            count: 3,
            min_gap: 5.0,
            font_size: 120.0,
            alignment: 5,
        }
    }
}

/// Shows N, N-1, ..., 1, one second each, ending when the line starts
#[derive(Debug, Clone)]
pub struct CountdownPlugin<'a> {
    options: &'a CountdownOptions,
}

impl<'a> CountdownPlugin<'a> {
    /// Create the plugin
    #[must_use]
    pub const fn new(options: &'a CountdownOptions) -> Self {
        Self { options }
    }
}

impl AssPlugin for CountdownPlugin<'_> {
    fn id(&self) -> &'static str {
        ID
    }

    fn apply(&self, ass: &mut Ass, context: &PluginContext<'_>) -> Result<()> {
        if self.options.count == 0 {
            return Ok(());
        }
        let count = f64::from(self.options.count);
        let mut seen = SeenTimes::tagged(ass, ID);
        let mut insertions = Vec::new();

        for cue in karaoke_cues(ass, context.lines) {
            if cue.start - count < 0.0 {
                log::debug!("countdown: line at {:.2}s is too early", cue.start);
                continue;
            }
            if cue.gap < self.options.min_gap {
                log::trace!("countdown: gap {:.2}s before line at {:.2}s too short", cue.gap, cue.start);
                continue;
            }

            let (style, _) = singer_style(ass, STYLE_PREFIX, cue.singer, context, |options| {
                StyleOptions {
                    font_size: self.options.font_size,
                    alignment: self.options.alignment,
                    ..options
                }
            })?;
            for number in (1..=self.options.count).rev() {
                let start = cue.start - f64::from(number);
                let end = start + 1.0;
                if !seen.insert(start, end) {
                    continue;
                }
                insertions.push(Insertion::new(
                    cue.index,
                    Dialogue::new(start, end, style.clone(), number.to_string())
                        .with_layer(LAYER)
                        .with_singer(cue.singer)
                        .with_tag(ID),
                ));
            }
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

    fn run(options: &CountdownOptions, lines: &[Line]) -> Ass {
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
        let plugin = CountdownPlugin::new(options);
        plugin.apply(&mut ass, &context).unwrap();
        plugin.apply(&mut ass, &context).unwrap();
        ass
    }

    #[test]
    fn counts_down_one_second_per_number() {
        let lines = vec![Line::from_words(None, vec![Word::new(10.0, 11.0, "a")])];
        let ass = run(&CountdownOptions::default(), &lines);
        let numbers: Vec<(&str, f64, f64, i32)> = ass
            .events
            .tagged(ID)
            .map(|d| (d.text.as_str(), d.start, d.end, d.layer))
            .collect();
        assert_eq!(
            numbers,
            vec![("3", 7.0, 8.0, 2), ("2", 8.0, 9.0, 2), ("1", 9.0, 10.0, 2)]
        );
        assert_eq!(ass.events.len(), 4);
        assert!(ass.events.iter().last().unwrap().has_tag(KARAOKE_TAG));
        assert!((ass.styles.get("Countdown0").unwrap().fontsize - 120.0).abs() < 1e-9);
    }

    #[test]
    fn short_gaps_and_early_lines_get_no_countdown() {
        let lines = vec![
            Line::from_words(None, vec![Word::new(2.0, 3.0, "early")]),
            Line::from_words(None, vec![Word::new(4.0, 5.0, "close")]),
            Line::from_words(None, vec![Word::new(20.0, 21.0, "late")]),
        ];
        let ass = run(&CountdownOptions::default(), &lines);
        let starts: Vec<f64> = ass.events.tagged(ID).map(|d| d.start).collect();
        assert_eq!(starts, vec![17.0, 18.0, 19.0]);
    }
}
