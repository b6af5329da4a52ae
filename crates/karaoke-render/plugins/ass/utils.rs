//! Shared scanning helpers for decoration plugins

use ahash::AHashSet;
use karaoke_ass::document::{Ass, Dialogue};
use regex::Regex;

use super::PluginContext;
use crate::{
    alignment::Line,
    core::{singer_style_name, Result, StyleOptions},
    renderers::{register_style, KARAOKE_TAG},
};

/// A karaoke event together with the timing of the line it was rendered from
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    /// Index of the event in the document
    pub index: usize,
    /// Singer the event was styled for
    pub singer: i32,
    /// Start of the first sung word
    pub start: f64,
    /// End of the last sung word
    pub end: f64,
    /// Index of the previous karaoke event, if any
    pub previous: Option<usize>,
    /// Silence between the previous line and this one, or the time since the
    /// song start when there is none
    pub gap: f64,
}

/// Matches the `\pos(x,y)` tag renderers place positioned lines with
pub const POSITION_PATTERN: &str = r"\\pos\(\s*(-?[0-9.]+)\s*,\s*(-?[0-9.]+)\s*\)";

/// `\pos` arguments of a dialogue text
#[must_use]
pub fn position(pattern: &Regex, text: &str) -> Option<(f64, f64)> {
    let captures = pattern.captures(text)?;
    let x = captures.get(1)?.as_str().parse().ok()?;
    let y = captures.get(2)?.as_str().parse().ok()?;
    Some((x, y))
}

/// Sung span of an event
///
/// Uses the source line moved by the event's shift when the event
/// references one, otherwise the event's own bounds.
#[must_use]
pub fn source_span(event: &Dialogue, lines: &[Line]) -> (f64, f64) {
    event
        .line
        .and_then(|line| lines.get(line.index()))
        .map_or((event.start, event.end), |line| {
            (line.start + event.shift, line.end + event.shift)
        })
}

/// Closest earlier karaoke event whose line starts strictly before the
/// event at `index`
///
/// Duplicates of the same line, as produced for unison lines, are skipped.
#[must_use]
pub fn previous_karaoke(events: &[Dialogue], index: usize, lines: &[Line]) -> Option<usize> {
    let (start, _) = source_span(&events[index], lines);
    events[..index]
        .iter()
        .enumerate()
        .rev()
        .find(|(_, event)| event.has_tag(KARAOKE_TAG) && source_span(event, lines).0 < start)
        .map(|(position, _)| position)
}

/// Every karaoke event of the document in order
#[must_use]
pub fn karaoke_cues(ass: &Ass, lines: &[Line]) -> Vec<Cue> {
    let events = ass.events.events.as_slice();
    events
        .iter()
        .enumerate()
        .filter(|(_, event)| event.has_tag(KARAOKE_TAG))
        .map(|(index, event)| {
            let (start, end) = source_span(event, lines);
            let previous = previous_karaoke(events, index, lines);
            let gap = previous.map_or(start, |previous| {
                start - source_span(&events[previous], lines).1
            });
            Cue {
                index,
                singer: event.singer.unwrap_or(0),
                start,
                end,
                previous,
                gap,
            }
        })
        .collect()
}

/// Exact time bounds of events already produced by a plugin
///
/// Bounds alone identify an event unless the plugin asks for distinct
/// texts to be told apart, as the box plugin does for clusters of
/// different singers sharing a time range.
#[derive(Debug, Clone, Default)]
pub struct SeenTimes {
    seen: AHashSet<(String, u64, u64)>,
    by_text: bool,
}

impl SeenTimes {
    /// Collect the bounds of every event carrying `tag`
    #[must_use]
    pub fn tagged(ass: &Ass, tag: &str) -> Self {
        Self::collect(ass, tag, false)
    }

    /// Collect bounds and texts of every event carrying `tag`
    #[must_use]
    pub fn tagged_by_text(ass: &Ass, tag: &str) -> Self {
        Self::collect(ass, tag, true)
    }

    fn collect(ass: &Ass, tag: &str, by_text: bool) -> Self {
        let mut seen = Self {
            seen: AHashSet::new(),
            by_text,
        };
        for event in ass.events.tagged(tag) {
            seen.insert_text(&event.text, event.start, event.end);
        }
        seen
    }

    /// Record bounds; `false` if an event with exactly these bounds exists
    pub fn insert(&mut self, start: f64, end: f64) -> bool {
        self.insert_text("", start, end)
    }

    /// Record bounds and text; the text only counts when collected by text
    pub fn insert_text(&mut self, text: &str, start: f64, end: f64) -> bool {
        let text = if self.by_text { text.to_string() } else { String::new() };
        self.seen.insert((text, start.to_bits(), end.to_bits()))
    }
}

/// Register the style `{prefix}{singer}` derived from the singer's options
///
/// `adjust` customizes the options before conversion. Returns the style
/// name and the adjusted options.
///
/// # Errors
///
/// Returns an error if no style is configured for the singer or a colour is
/// invalid.
pub fn singer_style<F>(
    ass: &mut Ass,
    prefix: &str,
    singer: i32,
    context: &PluginContext<'_>,
    adjust: F,
) -> Result<(String, StyleOptions)>
where
    F: FnOnce(StyleOptions) -> StyleOptions,
{
    let name = singer_style_name(prefix, singer);
    let options = named_style(ass, &name, singer, context, adjust)?;
    Ok((name, options))
}

/// Register the style `name` derived from the singer's options
///
/// Same as [`singer_style`] for styles shared by every singer, such as the
/// title card, whose name carries no singer suffix.
///
/// # Errors
///
/// Returns an error if no style is configured for the singer or a colour is
/// invalid.
pub fn named_style<F>(
    ass: &mut Ass,
    name: &str,
    singer: i32,
    context: &PluginContext<'_>,
    adjust: F,
) -> Result<StyleOptions>
where
    F: FnOnce(StyleOptions) -> StyleOptions,
{
    let options = adjust(context.styles().resolve(singer)?.clone());
    register_style(ass, name, &options, &context.layout)?;
    Ok(options)
}
