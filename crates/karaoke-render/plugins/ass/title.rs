//! Song title card

use karaoke_ass::{
    document::{Ass, Dialogue},
    tags::OverrideBlock,
    utils::{escape_text, milliseconds},
};
use serde::{Deserialize, Serialize};

use super::{utils::named_style, AssPlugin, PluginContext};
use crate::core::{Result, StyleOptions};

pub(super) const ID: &str = "title";

/// Style name of the title card
pub const TITLE_STYLE: &str = "Title";

/// Options of the title plugin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TitleOptions {
    /// Run the plugin
    pub enabled: bool,
    /// Start of the card in seconds
    pub start: f64,
    /// How long the card is shown, in seconds
    pub duration: f64,
    /// Fade-in in milliseconds
    pub fade_in_ms: u64,
    /// Fade-out in milliseconds
    pub fade_out_ms: u64,
    /// Edge blur of the card text
    pub blur: Option<f64>,
    /// Title font size in base-resolution pixels
    pub font_size: f64,
    /// Show the artists below the title
    pub show_artists: bool,
    /// Artist line font size in base-resolution pixels
    pub artists_font_size: f64,
    /// Numpad alignment of the card
    pub alignment: u8,
}

impl Default for TitleOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            start: 0.0,
            duration: 5.0,
            fade_in_ms: 500,
            fade_out_ms: 500,
            blur: None,
            font_size: 90.0,
            show_artists: true,
            artists_font_size: 60.0,
            alignment: 5,
        }
    }
}

/// Puts the song title, and optionally the artists, in front of every
/// other event
#[derive(Debug, Clone)]
pub struct TitlePlugin<'a> {
    options: &'a TitleOptions,
}

impl<'a> TitlePlugin<'a> {
    /// Create the plugin
    #[must_use]
    pub const fn new(options: &'a TitleOptions) -> Self {
        Self { options }
    }

    fn text(&self, title: &str, context: &PluginContext<'_>, style: &StyleOptions) -> String {
        let mut block = OverrideBlock::new().fad(self.options.fade_in_ms, self.options.fade_out_ms);
        if let Some(blur) = self.options.blur {
            block = block.blur(blur);
        }

        let mut text = format!("{}{}", block.build(), escape_text(&style.transform_text(title)));
        let artists = context.runtime.artists.join(", ");
        if self.options.show_artists && !artists.trim().is_empty() {
            let size = context.layout.px(self.options.artists_font_size);
            text.push_str(r"\N");
            text.push_str(&OverrideBlock::new().font_size(size).build());
            text.push_str(&escape_text(&style.transform_text(&artists)));
        }
        text
    }
}

impl AssPlugin for TitlePlugin<'_> {
    fn id(&self) -> &'static str {
        ID
    }

    fn apply(&self, ass: &mut Ass, context: &PluginContext<'_>) -> Result<()> {
        let Some(title) = context.runtime.title_text() else {
            log::debug!("title: no title text, skipping");
            return Ok(());
        };
        if ass.events.tagged(ID).next().is_some() {
            log::debug!("title: already present");
            return Ok(());
        }
        if self.options.start < 0.0 {
            log::debug!("title: negative start {:.2}s, skipping", self.options.start);
            return Ok(());
        }

        let style = named_style(ass, TITLE_STYLE, 0, context, |options| StyleOptions {
            font_size: self.options.font_size,
            alignment: self.options.alignment,
            ..options
        })?;
        let end = self.options.start + self.options.duration;
        let text = self.text(title, context, &style);
        let dialogue = Dialogue::new(self.options.start, end, TITLE_STYLE, text)
            .with_layer(1)
            .with_tag(ID);
        log::trace!(
            "title: {}ms card from {:.2}s",
            milliseconds(self.options.duration),
            self.options.start
        );
        ass.events.prepend(vec![dialogue]);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Layout, Runtime};
    use karaoke_ass::document::Resolution;
    use pretty_assertions::assert_eq;

    fn runtime(title: Option<&str>, artists: &[&str]) -> Runtime {
        Runtime {
            title: title.map(str::to_string),
            artists: artists.iter().map(|a| (*a).to_string()).collect(),
            ..Runtime::default()
        }
    }

    fn apply(options: &TitleOptions, runtime: &Runtime, ass: &mut Ass) {
        let context = PluginContext {
            lines: &[],
            runtime,
            layout: Layout::unscaled(Resolution::FULL_HD),
            duet: false,
        };
        TitlePlugin::new(options).apply(ass, &context).unwrap();
    }

    #[test]
    fn title_goes_first() {
        let mut ass = Ass::new(Resolution::FULL_HD);
        ass.events.push(Dialogue::new(6.0, 7.0, "Singer0", "la"));
        let runtime = runtime(Some("Song {1}"), &["A", "B"]);
        apply(&TitleOptions::default(), &runtime, &mut ass);

        let first = ass.events.iter().next().unwrap();
        assert!(first.has_tag(ID));
        assert_eq!((first.start, first.end), (0.0, 5.0));
        assert_eq!(first.text, r"{\fad(500,500)}Song \{1\}\N{\fs60}A, B");
        assert_eq!(ass.styles.get(TITLE_STYLE).unwrap().alignment, 5);
        assert!(ass.styles.get("Title0").is_none());
    }

    #[test]
    fn card_style_matches_its_dialogue() {
        let mut ass = Ass::new(Resolution::FULL_HD);
        apply(&TitleOptions::default(), &runtime(Some("Song"), &[]), &mut ass);
        let card = ass.events.iter().next().unwrap();
        assert_eq!(card.style, TITLE_STYLE);
        ass.validate().unwrap();
    }

    #[test]
    fn missing_title_is_a_no_op() {
        let mut ass = Ass::new(Resolution::FULL_HD);
        apply(&TitleOptions::default(), &runtime(None, &["A"]), &mut ass);
        assert!(ass.events.is_empty());
        assert!(ass.styles.is_empty());
    }

    #[test]
    fn blur_and_uppercase() {
        let mut runtime = runtime(Some("héllo"), &[]);
        runtime.style_options_mapping.insert(
            0,
            StyleOptions {
                uppercase: true,
                ..StyleOptions::default()
            },
        );
        let options = TitleOptions {
            blur: Some(2.0),
            ..TitleOptions::default()
        };
        let mut ass = Ass::new(Resolution::FULL_HD);
        apply(&options, &runtime, &mut ass);
        assert_eq!(ass.events.iter().next().unwrap().text, r"{\fad(500,500)\blur2}HÉLLO");
    }

    #[test]
    fn second_run_adds_nothing() {
        let mut ass = Ass::new(Resolution::FULL_HD);
        let runtime = runtime(Some("Song"), &[]);
        apply(&TitleOptions::default(), &runtime, &mut ass);
        apply(&TitleOptions::default(), &runtime, &mut ass);
        assert_eq!(ass.events.len(), 1);
    }
}
