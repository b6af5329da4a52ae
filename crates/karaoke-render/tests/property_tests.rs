//! Property-based tests for line restructuring and karaoke timing
//!
//! Uses proptest to check that the alignment plugins never lose or reorder
//! words and that karaoke tags always cover the sung span exactly.

use karaoke_ass::utils::centiseconds;
use karaoke_render::{
    alignment::{Alignment, Line, Word},
    core::StyleOptions,
    plugins::{
        alignment::{AutoBreakOptions, MaxCharactersOptions},
        apply_alignment_plugins, AlignmentPluginOptions,
    },
    renderers::{
        prepare_lines,
        text::{karaoke_text, karaoke_total},
    },
};
use proptest::prelude::*;

/// Generate a line of sequential words on a centisecond grid
fn arb_line() -> impl Strategy<Value = Line> {
    (
        prop::option::of(0i32..3),
        prop::collection::vec((0u64..300, 5u64..100, "[a-z]{1,8}"), 1..20),
    )
        .prop_map(|(singer, spans)| {
            let mut cursor = 0u64;
            let words = spans
                .into_iter()
                .map(|(gap, duration, text)| {
                    let start = cursor + gap;
                    cursor = start + duration;
                    #[allow(clippy::cast_precision_loss)]
                    Word::new(start as f64 / 100.0, cursor as f64 / 100.0, text)
                })
                .collect();
            Line::from_words(singer, words)
        })
}

fn flatten(alignment: &Alignment) -> Vec<(String, u64, u64)> {
    alignment
        .words()
        .map(|word| (word.text.clone(), word.start.to_bits(), word.end.to_bits()))
        .collect()
}

proptest! {
    #[test]
    fn auto_break_keeps_every_word_in_order(line in arb_line(), extra_buffer in 0.0f64..2.0) {
        let singer = line.singer;
        let source = Alignment::new(vec![line]);
        let plugins = vec![AlignmentPluginOptions::AutoBreak(AutoBreakOptions {
            enabled: true,
            extra_buffer,
        })];
        let broken = apply_alignment_plugins(&source, &plugins);

        prop_assert!(!broken.lines.is_empty());
        prop_assert!(broken.lines.iter().all(|line| !line.words.is_empty()));
        prop_assert!(broken.lines.iter().all(|line| line.singer == singer));
        prop_assert_eq!(flatten(&broken), flatten(&source));
    }

    #[test]
    fn max_characters_respects_the_limit(line in arb_line(), limit in 5usize..30) {
        let source = Alignment::new(vec![line]);
        let plugins = vec![AlignmentPluginOptions::MaxCharacters(MaxCharactersOptions {
            enabled: true,
            max_characters: limit,
        })];
        let split = apply_alignment_plugins(&source, &plugins);

        for line in &split.lines {
            prop_assert!(line.words.len() == 1 || line.text.chars().count() <= limit);
        }
        prop_assert_eq!(flatten(&split), flatten(&source));
    }

    #[test]
    fn karaoke_tags_cover_the_line(line in arb_line()) {
        let text = karaoke_text(&line, line.start, &StyleOptions::default(), false);
        prop_assert_eq!(
            karaoke_total(&text),
            centiseconds(line.end) - centiseconds(line.start)
        );
    }

    #[test]
    fn lead_in_is_part_of_the_sweep(line in arb_line(), lead in 0.0f64..5.0) {
        let from = (line.start - lead).max(0.0);
        let text = karaoke_text(&line, from, &StyleOptions::default(), false);
        prop_assert_eq!(karaoke_total(&text), centiseconds(line.end) - centiseconds(from));
    }

    #[test]
    fn offset_never_yields_negative_words(line in arb_line(), offset in 0.0f64..10.0) {
        let source = Alignment::new(vec![line]);
        let prepared = prepare_lines(&source, offset).unwrap();

        prop_assert!(prepared.len() <= 1);
        for line in &prepared {
            prop_assert!(line.words.iter().all(|word| word.start >= 0.0));
            prop_assert!(line.words.iter().all(|word| !word.subwords.is_empty()));
        }
        let kept = prepared.iter().map(|line| line.words.len()).sum::<usize>();
        let expected = source.words().filter(|word| word.start - offset >= 0.0).count();
        prop_assert_eq!(kept, expected);
    }
}
