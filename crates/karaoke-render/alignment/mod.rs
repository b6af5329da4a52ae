//! Lyrics alignment model
//!
//! The canonical time-coded tree consumed by every stage: an [`Alignment`]
//! holds [`Line`]s, a line holds [`Word`]s and a word holds [`Subword`]s, the
//! karaoke highlight unit. All times are seconds.
//!
//! A word is bounded by its subwords (`start` of the first, latest `end`)
//! and a line by its words. Editors that reorder or retime nodes call the
//! `normalize` methods to re-establish this.
//!
//! # Examples
//!
//! ```rust
//! use karaoke_render::alignment::{Line, Word};
//!
//! let line = Line::from_words(
//!     None,
//!     vec![Word::new(1.0, 1.5, "la"), Word::new(1.6, 2.0, "la")],
//! );
//! assert_eq!(line.text, "la la");
//! assert_eq!((line.start, line.end), (1.0, 2.0));
//! ```

mod flat;

pub use flat::{Alignment2, TimedWord};

use serde::{Deserialize, Serialize};

/// Singer id of a unison line sung by everyone
pub const ALL_SINGERS_ID: i32 = -1;

/// Smallest timed unit, highlighted by one karaoke tag
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Subword {
    /// Start in seconds
    pub start: f64,
    /// End in seconds
    pub end: f64,
    /// Text fragment
    pub text: String,
}

impl Subword {
    /// Create a subword
    #[must_use]
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    /// Copy moved earlier by `offset` seconds
    #[must_use]
    pub fn shifted(&self, offset: f64) -> Self {
        Self::new(self.start - offset, self.end - offset, self.text.clone())
    }
}

/// A word made of one or more subwords
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Word {
    /// Start in seconds
    pub start: f64,
    /// End in seconds
    pub end: f64,
    /// Full word text
    pub text: String,
    /// Timed fragments, in time order
    #[serde(default)]
    pub subwords: Vec<Subword>,
}

impl Word {
    /// Word with a single subword spanning it
    #[must_use]
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            start,
            end,
            subwords: vec![Subword::new(start, end, text.clone())],
            text,
        }
    }

    /// Word built from its fragments; text is their concatenation
    #[must_use]
    pub fn from_subwords(subwords: Vec<Subword>) -> Self {
        let mut word = Self {
            start: 0.0,
            end: 0.0,
            text: subwords.iter().map(|s| s.text.as_str()).collect(),
            subwords,
        };
        word.normalize();
        word
    }

    /// Sort subwords by start and derive the word bounds from them
    ///
    /// A word without subwords keeps its bounds.
    pub fn normalize(&mut self) {
        self.subwords.sort_by(|a, b| a.start.total_cmp(&b.start));
        if let Some(first) = self.subwords.first() {
            self.start = first.start;
            self.end = self
                .subwords
                .iter()
                .map(|s| s.end)
                .fold(first.end, f64::max);
        }
    }

    /// Check if the word has no visible text
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Copy moved earlier by `offset` seconds
    #[must_use]
    pub fn shifted(&self, offset: f64) -> Self {
        Self {
            start: self.start - offset,
            end: self.end - offset,
            text: self.text.clone(),
            subwords: self.subwords.iter().map(|s| s.shifted(offset)).collect(),
        }
    }

    /// Number of visible characters
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Whether a space belongs between two adjacent words
///
/// Hyphenated words split across units join without a space.
#[must_use]
pub fn needs_space(previous: &str, next: &str) -> bool {
    !(previous.ends_with('-') || next.starts_with('-'))
}

/// Join word texts with spaces, honouring [`needs_space`]
#[must_use]
pub fn join_words<'a, I>(words: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut text = String::new();
    let mut previous: Option<&str> = None;
    for word in words {
        if let Some(previous) = previous {
            if needs_space(previous, word) {
                text.push(' ');
            }
        }
        text.push_str(word);
        previous = Some(word);
    }
    text
}

/// A lyric line, one singer, time-ordered words
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Line {
    /// Start in seconds
    pub start: f64,
    /// End in seconds
    pub end: f64,
    /// Display text
    pub text: String,
    /// Singer id; absent means the default singer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub singer: Option<i32>,
    /// Words, in time order
    #[serde(default)]
    pub words: Vec<Word>,
}

impl Line {
    /// Line built from words, with text and bounds derived from them
    #[must_use]
    pub fn from_words(singer: Option<i32>, words: Vec<Word>) -> Self {
        let mut line = Self {
            start: 0.0,
            end: 0.0,
            text: String::new(),
            singer,
            words,
        };
        line.refresh();
        line
    }

    /// Singer id with the default singer made explicit
    #[must_use]
    pub fn singer_id(&self) -> i32 {
        self.singer.unwrap_or(0)
    }

    /// Check if this is a unison line
    #[must_use]
    pub fn is_all_singers(&self) -> bool {
        self.singer == Some(ALL_SINGERS_ID)
    }

    /// Normalize every word, sort words by start and derive the line bounds
    pub fn normalize(&mut self) {
        for word in &mut self.words {
            word.normalize();
        }
        self.words.sort_by(|a, b| a.start.total_cmp(&b.start));
        self.update_bounds();
    }

    /// Recompute text and bounds from the current words
    pub fn refresh(&mut self) {
        self.text = join_words(self.words.iter().map(|w| w.text.as_str()));
        self.update_bounds();
    }

    fn update_bounds(&mut self) {
        if let Some(first) = self.words.first() {
            self.start = first.start;
            self.end = self.words.iter().map(|w| w.end).fold(first.end, f64::max);
        }
    }

    /// Gaps between consecutive words
    pub fn gaps(&self) -> impl Iterator<Item = f64> + '_ {
        self.words.windows(2).map(|pair| pair[1].start - pair[0].end)
    }

    /// Mean gap between consecutive words, zero for fewer than two words
    #[must_use]
    pub fn mean_gap(&self) -> f64 {
        let count = self.words.len().saturating_sub(1);
        if count == 0 {
            return 0.0;
        }
        self.gaps().sum::<f64>() / count as f64
    }

    /// Number of visible characters of the joined text
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Root of the alignment tree
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Alignment {
    /// Lines in time order
    #[serde(default)]
    pub lines: Vec<Line>,
}

impl Alignment {
    /// Create an alignment
    #[must_use]
    pub const fn new(lines: Vec<Line>) -> Self {
        Self { lines }
    }

    /// Check if there are no lines
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Normalize every line and sort lines by start
    pub fn normalize(&mut self) {
        for line in &mut self.lines {
            line.normalize();
        }
        self.lines.sort_by(|a, b| a.start.total_cmp(&b.start));
    }

    /// All words in line order
    pub fn words(&self) -> impl Iterator<Item = &Word> {
        self.lines.iter().flat_map(|line| line.words.iter())
    }

    /// Total number of words
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.lines.iter().map(|line| line.words.len()).sum()
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn word_bounds_follow_subwords() {
        let mut word = Word {
            start: 9.0,
            end: 9.0,
            text: "hello".to_string(),
            subwords: vec![Subword::new(1.4, 1.8, "lo"), Subword::new(1.0, 1.4, "hel")],
        };
        word.normalize();
        assert_eq!((word.start, word.end), (1.0, 1.8));
        assert_eq!(word.subwords[0].text, "hel");
    }

    #[test]
    fn from_subwords_concatenates() {
        let word = Word::from_subwords(vec![Subword::new(0.0, 0.2, "ka"), Subword::new(0.2, 0.5, "ra")]);
        assert_eq!(word.text, "kara");
        assert_eq!((word.start, word.end), (0.0, 0.5));
    }

    #[test]
    fn line_normalize_reorders_words() {
        let mut line = Line {
            words: vec![Word::new(2.0, 2.5, "b"), Word::new(1.0, 1.5, "a")],
            ..Line::default()
        };
        line.normalize();
        assert_eq!(line.words[0].text, "a");
        assert_eq!((line.start, line.end), (1.0, 2.5));
    }

    #[test]
    fn hyphenated_words_join_without_space() {
        assert_eq!(join_words(["hap-", "py", "day"]), "hap-py day");
        assert_eq!(join_words(["well", "-known"]), "well-known");
        assert_eq!(join_words(Vec::<&str>::new()), "");
    }

    #[test]
    fn mean_gap_of_line() {
        let line = Line::from_words(
            None,
            vec![
                Word::new(0.0, 1.0, "a"),
                Word::new(1.5, 2.0, "b"),
                Word::new(3.0, 4.0, "c"),
            ],
        );
        assert!((line.mean_gap() - 0.75).abs() < 1e-12);
        assert_eq!(Line::from_words(None, vec![Word::new(0.0, 1.0, "a")]).mean_gap(), 0.0);
    }

    #[test]
    fn shifting_moves_subwords_too() {
        let word = Word::new(2.0, 3.0, "x").shifted(0.5);
        assert_eq!((word.start, word.end), (1.5, 2.5));
        assert_eq!(word.subwords[0].start, 1.5);
    }

    #[test]
    fn singer_helpers() {
        let mut line = Line::default();
        assert_eq!(line.singer_id(), 0);
        line.singer = Some(ALL_SINGERS_ID);
        assert!(line.is_all_singers());
    }

    #[test]
    fn alignment_reads_json_without_optional_fields() {
        let alignment: Alignment = serde_json::from_str(
            r#"{"lines":[{"start":1,"end":2,"text":"la","words":[{"start":1,"end":2,"text":"la"}]}]}"#,
        )
        .unwrap();
        assert_eq!(alignment.word_count(), 1);
        assert!(alignment.lines[0].singer.is_none());
        assert!(alignment.lines[0].words[0].subwords.is_empty());
    }
}
