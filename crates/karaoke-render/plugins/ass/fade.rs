//! Fade karaoke lines in and out

use karaoke_ass::{
    document::Ass,
    tags::{karaoke_tag, OverrideBlock},
    utils::centiseconds,
};
use serde::{Deserialize, Serialize};

use super::{AssPlugin, PluginContext};
use crate::{core::Result, renderers::KARAOKE_TAG};

pub(super) const ID: &str = "fade";

/// Options of the fade plugin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FadeOptions {
    /// Run the plugin
    pub enabled: bool,
    /// Fade-in in milliseconds, added before the line
    pub fade_in_ms: u64,
    /// Fade-out in milliseconds, added after the line
    pub fade_out_ms: u64,
}

impl Default for FadeOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            fade_in_ms: 300,
            fade_out_ms: 300,
        }
    }
}

/// Widens every karaoke event by the fade durations and wraps it in `\fad`
///
/// A leading `\K` covering the fade-in keeps the sweep in time with the
/// music. Events that would start before zero are left untouched.
#[derive(Debug, Clone)]
pub struct FadePlugin<'a> {
    options: &'a FadeOptions,
}

impl<'a> FadePlugin<'a> {
    /// Create the plugin
    #[must_use]
    pub const fn new(options: &'a FadeOptions) -> Self {
        Self { options }
    }
}

impl AssPlugin for FadePlugin<'_> {
    fn id(&self) -> &'static str {
        ID
    }

    fn apply(&self, ass: &mut Ass, context: &PluginContext<'_>) -> Result<()> {
        let fade_in = self.options.fade_in_ms as f64 / 1000.0;
        let fade_out = self.options.fade_out_ms as f64 / 1000.0;
        let block = OverrideBlock::new()
            .fad(self.options.fade_in_ms, self.options.fade_out_ms)
            .build();

        for event in ass.events.iter_mut() {
            if !event.has_tag(KARAOKE_TAG) || event.has_tag(ID) {
                continue;
            }
            let start = event.start - fade_in;
            if start < 0.0 {
                log::debug!("fade: event at {:.2}s would start before zero", event.start);
                continue;
            }
            let lead = centiseconds(event.start) - centiseconds(start);
            event.text = format!("{block}{}{}", karaoke_tag(lead, context.rtl()), event.text);
            event.start = start;
            event.end += fade_out;
            event.tag(ID);
        }
        Ok(())
    }
}
