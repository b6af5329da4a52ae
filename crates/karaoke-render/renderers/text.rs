//! Dialogue text for lyric lines
//!
//! Karaoke text carries one `\K` tag per subword. Silence before a unit is
//! covered by a bare `\K` tag so the sweep waits, and the space between two
//! words follows the gap tag. Tag durations are differences of floored
//! absolute centisecond times, so the tags of a line always add up to the
//! span from the dialogue start to the last subword end.

use karaoke_ass::{
    tags::{karaoke_tag, OverrideBlock},
    utils::{centiseconds, escape_text},
};

use crate::{
    alignment::{needs_space, Line},
    core::StyleOptions,
};

/// Karaoke-tagged text of a line shown from `from` seconds
#[must_use]
pub fn karaoke_text(line: &Line, from: f64, options: &StyleOptions, rtl: bool) -> String {
    let mut text = style_tags(options);
    let mut cursor = centiseconds(from);
    let mut previous: Option<&str> = None;

    for word in &line.words {
        let start = centiseconds(word.start);
        if start > cursor {
            text.push_str(&karaoke_tag(start - cursor, rtl));
            cursor = start;
        }
        if previous.is_some_and(|previous| needs_space(previous, &word.text)) {
            text.push(' ');
        }

        for subword in &word.subwords {
            let sub_start = centiseconds(subword.start).max(cursor);
            if sub_start > cursor {
                text.push_str(&karaoke_tag(sub_start - cursor, rtl));
            }
            let sub_end = centiseconds(subword.end).max(sub_start);
            text.push_str(&karaoke_tag(sub_end - sub_start, rtl));
            text.push_str(&escape_text(&options.transform_text(&subword.text)));
            cursor = sub_end;
        }
        previous = Some(word.text.as_str());
    }
    text
}

/// Untimed text of a line, words joined by the same spacing rule
#[must_use]
pub fn plain_text(line: &Line, options: &StyleOptions) -> String {
    let mut text = style_tags(options);
    let mut previous: Option<&str> = None;
    for word in &line.words {
        if previous.is_some_and(|previous| needs_space(previous, &word.text)) {
            text.push(' ');
        }
        text.push_str(&escape_text(&options.transform_text(&word.text)));
        previous = Some(word.text.as_str());
    }
    text
}

/// Override tags a style asks for that a style line cannot carry
fn style_tags(options: &StyleOptions) -> String {
    let mut block = OverrideBlock::new();
    if let Some(blur) = options.blur.filter(|blur| *blur > 0.0) {
        block = block.blur(blur);
    }
    block.build()
}

/// Sum of the `\K` durations in a text, in centiseconds
#[must_use]
pub fn karaoke_total(text: &str) -> u64 {
    text.split(r"\K")
        .skip(1)
        .filter_map(|rest| {
            let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
            digits.parse::<u64>().ok()
        })
        .sum()
}
