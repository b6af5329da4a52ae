//! Cap the visible length of a line
//!
//! Lines longer than the limit are cut into pieces of roughly equal length:
//! a piece ends at whichever word boundary lands closest to the average
//! piece length, and never past the limit. A single word longer than the
//! limit gets a line of its own.

use serde::{Deserialize, Serialize};

use super::AlignmentPlugin;
use crate::alignment::{join_words, needs_space, Alignment, Line, Word};

/// Options of the max-characters plugin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MaxCharactersOptions {
    /// Run the plugin
    pub enabled: bool,
    /// Maximum characters per line, spaces included
    pub max_characters: usize,
}

impl Default for MaxCharactersOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            max_characters: 40,
        }
    }
}

/// Re-splits lines that exceed the character limit
#[derive(Debug, Clone)]
pub struct MaxCharactersPlugin<'a> {
    options: &'a MaxCharactersOptions,
}

impl<'a> MaxCharactersPlugin<'a> {
    /// Create the plugin
    #[must_use]
    pub const fn new(options: &'a MaxCharactersOptions) -> Self {
        Self { options }
    }

    fn split(&self, line: &Line) -> Vec<Line> {
        let limit = self.options.max_characters.max(1);
        let total = join_words(line.words.iter().map(|w| w.text.as_str()))
            .chars()
            .count();
        if total <= limit || line.words.len() <= 1 {
            return vec![line.clone()];
        }

        let pieces = total.div_ceil(limit);
        let target = total.div_ceil(pieces);

        let mut lines = Vec::with_capacity(pieces);
        let mut current: Vec<Word> = Vec::new();
        let mut length = 0;
        for word in &line.words {
            let space = current
                .last()
                .is_some_and(|previous| needs_space(&previous.text, &word.text));
            let added = word.char_count() + usize::from(space);
            let candidate = length + added;
            let closer_after_break =
                candidate > target && candidate - target > target.saturating_sub(length);
            if !current.is_empty() && (candidate > limit || closer_after_break) {
                lines.push(Line::from_words(line.singer, std::mem::take(&mut current)));
                length = word.char_count();
            } else {
                length = candidate;
            }
            current.push(word.clone());
        }
        if !current.is_empty() {
            lines.push(Line::from_words(line.singer, current));
        }
        lines
    }
}

impl AlignmentPlugin for MaxCharactersPlugin<'_> {
    fn id(&self) -> &'static str {
        "max-characters"
    }

    fn apply(&self, alignment: &Alignment) -> Alignment {
        Alignment::new(alignment.lines.iter().flat_map(|line| self.split(line)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn line_of(texts: &[&str]) -> Line {
        let words = texts
            .iter()
            .enumerate()
            .map(|(i, text)| {
                let start = i as f64;
                Word::new(start, start + 0.5, *text)
            })
            .collect();
        Line::from_words(Some(2), words)
    }

    fn run(line: Line, max_characters: usize) -> Vec<String> {
        let options = MaxCharactersOptions {
            enabled: true,
            max_characters,
        };
        MaxCharactersPlugin::new(&options)
            .apply(&Alignment::new(vec![line]))
            .lines
            .into_iter()
            .map(|l| l.text)
            .collect()
    }

    #[test]
    fn short_lines_pass_through() {
        assert_eq!(run(line_of(&["hello", "world"]), 40), vec!["hello world"]);
    }

    #[test]
    fn long_line_is_balanced() {
        let texts = run(line_of(&["aaaa", "bbbb", "cccc", "dddd", "eeee"]), 20);
        assert_eq!(texts, vec!["aaaa bbbb cccc", "dddd eeee"]);
    }

    #[test]
    fn oversized_word_stands_alone() {
        let texts = run(line_of(&["supercalifragilistic", "ok"]), 10);
        assert_eq!(texts, vec!["supercalifragilistic", "ok"]);
    }

    #[test]
    fn hyphen_joins_count_without_space() {
        let texts = run(line_of(&["ab-", "cd", "ef", "gh"]), 8);
        assert_eq!(texts, vec!["ab-cd", "ef gh"]);
    }

    #[test]
    fn singer_is_kept() {
        let options = MaxCharactersOptions {
            enabled: true,
            max_characters: 5,
        };
        let result = MaxCharactersPlugin::new(&options)
            .apply(&Alignment::new(vec![line_of(&["one", "two", "three"])]));
        assert!(result.lines.iter().all(|l| l.singer == Some(2)));
        assert_eq!(result.word_count(), 3);
    }
}
