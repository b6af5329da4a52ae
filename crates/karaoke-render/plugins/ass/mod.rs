//! Decoration passes over a rendered document
//!
//! ASS plugins run in preset order after rendering. Per-line plugins scan
//! the karaoke events read-only, collect [`Insertion`]s placing each new
//! event before the karaoke event it decorates, and materialize them in a
//! single pass. Every plugin tags what it produces or transforms with its
//! own id, which makes a second run over decorated output a no-op.
//!
//! [`Insertion`]: karaoke_ass::document::Insertion

mod background_box;
mod countdown;
mod fade;
mod indicator;
mod offset;
mod one_two_three;
mod progress_bar;
mod title;
pub mod utils;

pub use background_box::{BoxOptions, BoxPlugin};
pub use countdown::{CountdownOptions, CountdownPlugin};
pub use fade::{FadeOptions, FadePlugin};
pub use indicator::{IndicatorOptions, IndicatorPlugin};
pub use offset::{OffsetOptions, OffsetPlugin};
pub use one_two_three::{OneTwoThreeOptions, OneTwoThreePlugin};
pub use progress_bar::{ProgressBarOptions, ProgressBarPlugin};
pub use title::{TitleOptions, TitlePlugin};

use karaoke_ass::document::Ass;
use serde::{Deserialize, Serialize};

use crate::{
    alignment::Line,
    core::{Layout, Result, Runtime, StyleOptionsMapping},
};

/// Everything a plugin may read besides the document
#[derive(Debug, Clone, Copy)]
pub struct PluginContext<'a> {
    /// Lines the document was rendered from; dialogue line references index this
    pub lines: &'a [Line],
    /// Song being rendered
    pub runtime: &'a Runtime,
    /// Output canvas and scaling
    pub layout: Layout,
    /// More than one singer takes part
    pub duet: bool,
}

impl PluginContext<'_> {
    /// Per-singer styles
    #[must_use]
    pub fn styles(&self) -> &StyleOptionsMapping {
        &self.runtime.style_options_mapping
    }

    /// Right-to-left script
    #[must_use]
    pub fn rtl(&self) -> bool {
        self.runtime.rtl
    }
}

/// A pass that decorates or adjusts a rendered document in place
pub trait AssPlugin {
    /// Identifier, also used as the tag of produced events
    fn id(&self) -> &'static str;

    /// Apply the pass
    ///
    /// # Errors
    ///
    /// Returns an error if a style cannot be resolved or converted.
    fn apply(&self, ass: &mut Ass, context: &PluginContext<'_>) -> Result<()>;
}

/// Options of one ASS plugin, tagged by `id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "id")]
pub enum AssPluginOptions {
    /// Song title card at the start
    #[serde(rename = "title")]
    Title(TitleOptions),
    /// "1 2 3" count-in before lines that follow a pause
    #[serde(rename = "123")]
    OneTwoThree(OneTwoThreeOptions),
    /// Numeric countdown before lines that follow a long pause
    #[serde(rename = "countdown")]
    Countdown(CountdownOptions),
    /// Marker sliding towards the next line
    #[serde(rename = "indicator")]
    Indicator(IndicatorOptions),
    /// Shrinking bar during pauses
    #[serde(rename = "progress-bar")]
    ProgressBar(ProgressBarOptions),
    /// Fade karaoke lines in and out
    #[serde(rename = "fade")]
    Fade(FadeOptions),
    /// Shift karaoke lines for A/V sync
    #[serde(rename = "offset")]
    Offset(OffsetOptions),
    /// Background box behind clusters of lines
    #[serde(rename = "box")]
    BackgroundBox(BoxOptions),
}

impl AssPluginOptions {
    /// Plugin identifier
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Title(_) => title::ID,
            Self::OneTwoThree(_) => one_two_three::ID,
            Self::Countdown(_) => countdown::ID,
            Self::Indicator(_) => indicator::ID,
            Self::ProgressBar(_) => progress_bar::ID,
            Self::Fade(_) => fade::ID,
            Self::Offset(_) => offset::ID,
            Self::BackgroundBox(_) => background_box::ID,
        }
    }

    /// Whether the plugin should run
    #[must_use]
    pub const fn enabled(&self) -> bool {
        match self {
            Self::Title(options) => options.enabled,
            Self::OneTwoThree(options) => options.enabled,
            Self::Countdown(options) => options.enabled,
            Self::Indicator(options) => options.enabled,
            Self::ProgressBar(options) => options.enabled,
            Self::Fade(options) => options.enabled,
            Self::Offset(options) => options.enabled,
            Self::BackgroundBox(options) => options.enabled,
        }
    }
}

/// Build the plugin for a set of options
#[must_use]
pub fn create_ass_plugin(options: &AssPluginOptions) -> Box<dyn AssPlugin + '_> {
    match options {
        AssPluginOptions::Title(options) => Box::new(TitlePlugin::new(options)),
        AssPluginOptions::OneTwoThree(options) => Box::new(OneTwoThreePlugin::new(options)),
        AssPluginOptions::Countdown(options) => Box::new(CountdownPlugin::new(options)),
        AssPluginOptions::Indicator(options) => Box::new(IndicatorPlugin::new(options)),
        AssPluginOptions::ProgressBar(options) => Box::new(ProgressBarPlugin::new(options)),
        AssPluginOptions::Fade(options) => Box::new(FadePlugin::new(options)),
        AssPluginOptions::Offset(options) => Box::new(OffsetPlugin::new(options)),
        AssPluginOptions::BackgroundBox(options) => Box::new(BoxPlugin::new(options)),
    }
}

/// Run every enabled plugin in order
///
/// # Errors
///
/// Returns the first plugin error.
pub fn apply_ass_plugins(
    ass: &mut Ass,
    plugins: &[AssPluginOptions],
    context: &PluginContext<'_>,
) -> Result<()> {
    for options in plugins.iter().filter(|options| options.enabled()) {
        let plugin = create_ass_plugin(options);
        let before = ass.events.len();
        plugin.apply(ass, context)?;
        log::debug!(
            "ass plugin '{}': {} -> {} events",
            plugin.id(),
            before,
            ass.events.len()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_id_decodes() {
        let options: Vec<AssPluginOptions> = serde_json::from_str(
            r#"[
                {"id": "title"}, {"id": "123"}, {"id": "countdown"}, {"id": "indicator"},
                {"id": "progress-bar"}, {"id": "fade"}, {"id": "offset"}, {"id": "box"}
            ]"#,
        )
        .unwrap();
        let ids: Vec<&str> = options.iter().map(AssPluginOptions::id).collect();
        assert_eq!(
            ids,
            vec!["title", "123", "countdown", "indicator", "progress-bar", "fade", "offset", "box"]
        );
        assert!(options.iter().all(AssPluginOptions::enabled));
        for options in &options {
            assert_eq!(create_ass_plugin(options).id(), options.id());
        }
    }

    #[test]
    fn options_keep_their_parameters() {
        let options: AssPluginOptions =
            serde_json::from_str(r#"{"id": "fade", "fadeInMs": 120, "enabled": false}"#).unwrap();
        assert!(!options.enabled());
        assert!(matches!(options, AssPluginOptions::Fade(f) if f.fade_in_ms == 120));
    }
}
