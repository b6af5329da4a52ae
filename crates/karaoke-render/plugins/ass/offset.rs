//! Manual A/V sync correction

use karaoke_ass::document::Ass;
use serde::{Deserialize, Serialize};

use super::{AssPlugin, PluginContext};
use crate::{core::Result, renderers::KARAOKE_TAG};

pub(super) const ID: &str = "offset";

/// Options of the offset plugin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OffsetOptions {
    /// Run the plugin
    pub enabled: bool,
    /// Milliseconds added to every karaoke event; negative moves earlier
    pub offset_ms: i64,
}

impl Default for OffsetOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            offset_ms: 0,
        }
    }
}

/// Shifts every karaoke event once
///
/// Events pushed before zero are removed. Events already shifted by this
/// plugin are not shifted again.
#[derive(Debug, Clone)]
pub struct OffsetPlugin<'a> {
    options: &'a OffsetOptions,
}

impl<'a> OffsetPlugin<'a> {
    /// Create the plugin
    #[must_use]
    pub const fn new(options: &'a OffsetOptions) -> Self {
        Self { options }
    }
}

impl AssPlugin for OffsetPlugin<'_> {
    fn id(&self) -> &'static str {
        ID
    }

    fn apply(&self, ass: &mut Ass, _context: &PluginContext<'_>) -> Result<()> {
        if self.options.offset_ms == 0 {
            return Ok(());
        }
        let shift = self.options.offset_ms as f64 / 1000.0;

        ass.events.events.retain_mut(|event| {
            if !event.has_tag(KARAOKE_TAG) || event.has_tag(ID) {
                return true;
            }
            let start = event.start + shift;
            if start < 0.0 {
                log::debug!("offset: dropping event at {:.2}s, shifted before zero", event.start);
                return false;
            }
            event.start = start;
            event.end += shift;
            event.shift += shift;
            event.tag(ID);
            true
        });
        Ok(())
    }
}
