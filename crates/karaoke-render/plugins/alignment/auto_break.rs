//! Re-break lines at unusually long pauses
//!
//! A line is cut wherever the pause between two words exceeds the line's
//! mean pause plus a buffer. Cutting can strand a single word; such a word
//! is merged back into the previous piece if the pause to it is within that
//! piece's threshold, otherwise into the next piece, otherwise it stays on
//! its own line. Pieces inherit the singer of the line they came from.

use serde::{Deserialize, Serialize};

use super::AlignmentPlugin;
use crate::alignment::{Alignment, Line, Word};

/// Seconds added to a neighbour's mean pause when re-absorbing a stranded
/// word; independent of the split buffer
const MERGE_BUFFER: f64 = 0.3;

/// Options of the auto-break plugin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AutoBreakOptions {
    /// Run the plugin
    pub enabled: bool,
    /// Seconds added to the mean pause before a pause counts as a break
    pub extra_buffer: f64,
}

impl Default for AutoBreakOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            extra_buffer: 0.3,
        }
    }
}

/// Splits lines at long pauses and re-absorbs stranded words
#[derive(Debug, Clone)]
pub struct AutoBreakPlugin<'a> {
    options: &'a AutoBreakOptions,
}

impl<'a> AutoBreakPlugin<'a> {
    /// Create the plugin
    #[must_use]
    pub const fn new(options: &'a AutoBreakOptions) -> Self {
        Self { options }
    }

    fn threshold(&self, line: &Line) -> f64 {
        line.mean_gap() + self.options.extra_buffer
    }

    fn merge_threshold(line: &Line) -> f64 {
        line.mean_gap() + MERGE_BUFFER
    }

    /// Cut a line at every pause above its threshold
    fn split(&self, line: &Line) -> Vec<Line> {
        let mut words = line.words.clone();
        words.sort_by(|a, b| a.start.total_cmp(&b.start));
        let ordered = Line::from_words(line.singer, words);
        if ordered.words.len() <= 1 {
            return vec![ordered];
        }

        let threshold = self.threshold(&ordered);
        let mut pieces = Vec::new();
        let mut current: Vec<Word> = Vec::new();
        for word in ordered.words {
            if let Some(previous) = current.last() {
                if word.start - previous.end > threshold {
                    pieces.push(Line::from_words(line.singer, std::mem::take(&mut current)));
                }
            }
            current.push(word);
        }
        pieces.push(Line::from_words(line.singer, current));
        pieces
    }

    /// Fold single-word pieces into a neighbour where the pause allows
    fn merge(&self, pieces: Vec<Line>) -> Vec<Line> {
        if pieces.len() <= 1 {
            return pieces;
        }

        let mut merged: Vec<Line> = Vec::with_capacity(pieces.len());
        let mut remaining = pieces.into_iter().peekable();
        while let Some(piece) = remaining.next() {
            if piece.words.len() != 1 {
                merged.push(piece);
                continue;
            }

            if let Some(previous) = merged.last_mut() {
                if piece.start - previous.end <= Self::merge_threshold(previous) {
                    previous.words.extend(piece.words);
                    previous.refresh();
                    continue;
                }
            }

            if let Some(next) = remaining.peek_mut() {
                if next.start - piece.end <= Self::merge_threshold(next) {
                    let mut words = piece.words;
                    words.append(&mut next.words);
                    next.words = words;
                    next.refresh();
                    continue;
                }
            }

            merged.push(piece);
        }
        merged
    }
}

impl AlignmentPlugin for AutoBreakPlugin<'_> {
    fn id(&self) -> &'static str {
        "auto-break"
    }

    fn apply(&self, alignment: &Alignment) -> Alignment {
        let mut lines = Vec::with_capacity(alignment.lines.len());
        for line in &alignment.lines {
            if line.words.is_empty() {
                log::debug!("auto-break: dropping line without words at {:.2}s", line.start);
                continue;
            }
            let pieces = self.merge(self.split(line));
            if pieces.len() > 1 {
                log::trace!("auto-break: '{}' split into {} lines", line.text, pieces.len());
            }
            lines.extend(pieces);
        }
        Alignment::new(lines)
    }
}
