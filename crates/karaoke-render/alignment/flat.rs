//! Flat word list used by sync editors
//!
//! Editors work on a flat list of timed words, each remembering the index of
//! the line it belongs to. Converting to the nested tree groups words by
//! that index.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Alignment, Line, Subword, Word};

/// One word of an [`Alignment2`]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TimedWord {
    /// Start in seconds
    pub start: f64,
    /// End in seconds
    pub end: f64,
    /// Word text
    pub text: String,
    /// Singer id; absent means the default singer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub singer: Option<i32>,
    /// Index of the line the word belongs to
    #[serde(default)]
    pub line: usize,
    /// Optional finer timing; empty means one fragment spanning the word
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subwords: Vec<Subword>,
}

impl TimedWord {
    /// Create a word on a line
    #[must_use]
    pub fn new(start: f64, end: f64, text: impl Into<String>, line: usize) -> Self {
        Self {
            start,
            end,
            text: text.into(),
            singer: None,
            line,
            subwords: Vec::new(),
        }
    }

    fn to_word(&self) -> Word {
        if self.subwords.is_empty() {
            Word::new(self.start, self.end, self.text.clone())
        } else {
            let mut word = Word {
                start: self.start,
                end: self.end,
                text: self.text.clone(),
                subwords: self.subwords.clone(),
            };
            word.normalize();
            word
        }
    }
}

/// Flat alignment exchanged with sync editors
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Alignment2 {
    /// Words in editor order
    #[serde(default)]
    pub alignment: Vec<TimedWord>,
}

impl Alignment2 {
    /// Create from a word list
    #[must_use]
    pub const fn new(alignment: Vec<TimedWord>) -> Self {
        Self { alignment }
    }

    /// Check if there are no words
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.alignment.is_empty()
    }

    /// Group words into lines by their line index
    ///
    /// Lines come out in index order and words in time order. A line takes
    /// the singer of its first word.
    #[must_use]
    pub fn to_alignment(&self) -> Alignment {
        let mut grouped: BTreeMap<usize, Vec<&TimedWord>> = BTreeMap::new();
        for word in &self.alignment {
            grouped.entry(word.line).or_default().push(word);
        }

        let lines = grouped
            .into_values()
            .map(|mut words| {
                words.sort_by(|a, b| a.start.total_cmp(&b.start));
                let singer = words.first().and_then(|w| w.singer);
                Line::from_words(singer, words.into_iter().map(TimedWord::to_word).collect())
            })
            .collect();

        Alignment::new(lines)
    }

    /// Flatten a nested alignment; line indices follow line order
    #[must_use]
    pub fn from_alignment(alignment: &Alignment) -> Self {
        let words = alignment
            .lines
            .iter()
            .enumerate()
            .flat_map(|(index, line)| {
                line.words.iter().map(move |word| TimedWord {
                    start: word.start,
                    end: word.end,
                    text: word.text.clone(),
                    singer: line.singer,
                    line: index,
                    subwords: word.subwords.clone(),
                })
            })
            .collect();
        Self::new(words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn groups_words_by_line_index() {
        let mut sung = TimedWord::new(3.0, 3.5, "two", 1);
        sung.singer = Some(1);
        let flat = Alignment2::new(vec![
            TimedWord::new(1.6, 2.0, "la", 0),
            TimedWord::new(1.0, 1.5, "la", 0),
            sung,
        ]);

        let alignment = flat.to_alignment();
        assert_eq!(alignment.lines.len(), 2);
        assert_eq!(alignment.lines[0].text, "la la");
        assert_eq!((alignment.lines[0].start, alignment.lines[0].end), (1.0, 2.0));
        assert_eq!(alignment.lines[1].singer, Some(1));
        assert_eq!(alignment.lines[1].words[0].subwords.len(), 1);
    }

    #[test]
    fn explicit_subwords_are_kept() {
        let mut word = TimedWord::new(0.0, 1.0, "kara", 0);
        word.subwords = vec![Subword::new(0.5, 1.0, "ra"), Subword::new(0.0, 0.5, "ka")];
        let alignment = Alignment2::new(vec![word]).to_alignment();
        let subwords = &alignment.lines[0].words[0].subwords;
        assert_eq!(subwords[0].text, "ka");
        assert_eq!(subwords.len(), 2);
    }

    #[test]
    fn flatten_then_group_preserves_lines() {
        let flat = Alignment2::new(vec![
            TimedWord::new(1.0, 1.5, "a", 0),
            TimedWord::new(2.0, 2.5, "b", 1),
        ]);
        let nested = flat.to_alignment();
        assert_eq!(Alignment2::from_alignment(&nested).to_alignment(), nested);
    }

    #[test]
    fn empty_list_is_empty() {
        let flat: Alignment2 = serde_json::from_str(r#"{"alignment": []}"#).unwrap();
        assert!(flat.is_empty());
        assert!(flat.to_alignment().is_empty());
    }
}
