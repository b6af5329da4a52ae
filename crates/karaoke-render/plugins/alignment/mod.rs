//! Alignment plugins
//!
//! Pure restructuring passes over an [`Alignment`], run in preset order
//! before rendering. Each plugin returns a new alignment and keeps no state
//! between calls.

mod auto_break;
mod max_characters;

pub use auto_break::{AutoBreakOptions, AutoBreakPlugin};
pub use max_characters::{MaxCharactersOptions, MaxCharactersPlugin};

use serde::{Deserialize, Serialize};

use crate::alignment::Alignment;

/// A restructuring pass over alignment lines
pub trait AlignmentPlugin {
    /// Identifier matching the options tag
    fn id(&self) -> &'static str;

    /// Produce the restructured alignment
    fn apply(&self, alignment: &Alignment) -> Alignment;
}

/// Options of one alignment plugin, tagged by `id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "id")]
pub enum AlignmentPluginOptions {
    /// Re-break lines at unusually long pauses
    #[serde(rename = "auto-break")]
    AutoBreak(AutoBreakOptions),
    /// Cap the number of characters per line
    #[serde(rename = "max-characters")]
    MaxCharacters(MaxCharactersOptions),
}

impl AlignmentPluginOptions {
    /// Whether the plugin should run
    #[must_use]
    pub const fn enabled(&self) -> bool {
        match self {
            Self::AutoBreak(options) => options.enabled,
            Self::MaxCharacters(options) => options.enabled,
        }
    }
}

/// Build the plugin for a set of options
#[must_use]
pub fn create_alignment_plugin(options: &AlignmentPluginOptions) -> Box<dyn AlignmentPlugin + '_> {
    match options {
        AlignmentPluginOptions::AutoBreak(options) => Box::new(AutoBreakPlugin::new(options)),
        AlignmentPluginOptions::MaxCharacters(options) => {
            Box::new(MaxCharactersPlugin::new(options))
        }
    }
}

/// Run every enabled plugin in order
#[must_use]
pub fn apply_alignment_plugins(alignment: &Alignment, plugins: &[AlignmentPluginOptions]) -> Alignment {
    let mut current = alignment.clone();
    for options in plugins.iter().filter(|options| options.enabled()) {
        let plugin = create_alignment_plugin(options);
        log::debug!("applying alignment plugin '{}'", plugin.id());
        current = plugin.apply(&current);
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::{Line, Word};

    fn long_line() -> Alignment {
        let words = (0..12)
            .map(|i| {
                let start = f64::from(i);
                Word::new(start, start + 0.5, "word")
            })
            .collect();
        Alignment::new(vec![Line::from_words(None, words)])
    }

    #[test]
    fn options_decode_by_id() {
        let options: Vec<AlignmentPluginOptions> = serde_json::from_str(
            r#"[{"id": "auto-break", "extraBuffer": 0.5}, {"id": "max-characters", "maxCharacters": 20, "enabled": false}]"#,
        )
        .unwrap();
        assert!(matches!(&options[0], AlignmentPluginOptions::AutoBreak(o) if (o.extra_buffer - 0.5).abs() < 1e-12));
        assert!(!options[1].enabled());
    }

    #[test]
    fn disabled_plugins_are_skipped() {
        let plugins = vec![AlignmentPluginOptions::MaxCharacters(MaxCharactersOptions {
            enabled: false,
            max_characters: 10,
        })];
        assert_eq!(apply_alignment_plugins(&long_line(), &plugins), long_line());
    }

    #[test]
    fn plugins_run_in_order() {
        let plugins = vec![
            AlignmentPluginOptions::AutoBreak(AutoBreakOptions::default()),
            AlignmentPluginOptions::MaxCharacters(MaxCharactersOptions {
                enabled: true,
                max_characters: 20,
            }),
        ];
        let result = apply_alignment_plugins(&long_line(), &plugins);
        assert!(result.lines.len() > 1);
        assert_eq!(result.word_count(), 12);
        assert!(result.lines.iter().all(|line| line.char_count() <= 20));
    }
}
