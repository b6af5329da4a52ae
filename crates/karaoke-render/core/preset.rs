//! Preset and runtime configuration
//!
//! A [`SubtitlesPreset`] says what the pipeline runs: the alignment plugins,
//! the renderer and the ASS plugins, all authored against a base
//! resolution. A [`Runtime`] describes the song being rendered. Both are
//! plain serde records; presets are stored by the embedding application and
//! decoded with [`SubtitlesPreset::from_json`].

use karaoke_ass::document::Resolution;
use serde::{Deserialize, Serialize};

use super::{errors::Result, style_options::StyleOptionsMapping};
use crate::{
    plugins::{alignment::AlignmentPluginOptions, ass::AssPluginOptions},
    renderers::RendererSettings,
};

/// Language code that turns on whole-line CJK highlighting
pub const CJK_LANGUAGE: &str = "zh";

/// Pipeline configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubtitlesPreset {
    /// Resolution every pixel quantity of the preset is authored in
    pub base_resolution: Resolution,
    /// Alignment restructuring passes, run in order
    pub alignment_plugins: Vec<AlignmentPluginOptions>,
    /// Decoration passes over the rendered document, run in order
    pub ass_plugins: Vec<AssPluginOptions>,
    /// Renderer selection and its settings
    pub ass_renderer_settings: RendererSettings,
}

impl SubtitlesPreset {
    /// Decode a preset from JSON
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidPreset`](super::RenderError::InvalidPreset)
    /// if the text is not a valid preset.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode the preset as JSON
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidPreset`](super::RenderError::InvalidPreset)
    /// if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Song-specific inputs assembled by the caller
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Runtime {
    /// Song title
    pub title: Option<String>,
    /// Performing artists
    pub artists: Vec<String>,
    /// Lyrics language code
    pub lang: Option<String>,
    /// Right-to-left script
    pub rtl: bool,
    /// Output video resolution
    pub resolution: Resolution,
    /// Per-singer styles
    pub style_options_mapping: StyleOptionsMapping,
}

impl Runtime {
    /// Check if lines should be highlighted as one unit of characters
    #[must_use]
    pub fn is_cjk(&self) -> bool {
        self.lang.as_deref() == Some(CJK_LANGUAGE)
    }

    /// Non-empty title, trimmed
    #[must_use]
    pub fn title_text(&self) -> Option<&str> {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::RenderError, renderers::RendererSettings};

    #[test]
    fn minimal_preset_uses_defaults() {
        let preset = SubtitlesPreset::from_json("{}").unwrap();
        assert_eq!(preset, SubtitlesPreset::default());
        assert_eq!(preset.base_resolution, Resolution::FULL_HD);
        assert_eq!(preset.ass_renderer_settings.id(), "basic");
    }

    #[test]
    fn preset_round_trips_through_json() {
        let preset = SubtitlesPreset::from_json(
            r#"{
                "baseResolution": {"width": 1280, "height": 720},
                "alignmentPlugins": [{"id": "auto-break"}],
                "assPlugins": [{"id": "fade", "fadeInMs": 200}, {"id": "box", "enabled": false}],
                "assRendererSettings": {"id": "four-line", "leadIn": 2.0}
            }"#,
        )
        .unwrap();
        assert_eq!(preset.alignment_plugins.len(), 1);
        assert_eq!(preset.ass_plugins.len(), 2);
        assert!(matches!(preset.ass_renderer_settings, RendererSettings::FourLine(_)));

        let again = SubtitlesPreset::from_json(&preset.to_json().unwrap()).unwrap();
        assert_eq!(again, preset);
    }

    #[test]
    fn unknown_plugin_id_is_rejected() {
        let err = SubtitlesPreset::from_json(r#"{"assPlugins": [{"id": "sparkles"}]}"#).unwrap_err();
        assert!(matches!(err, RenderError::InvalidPreset { .. }));
    }

    #[test]
    fn runtime_language_and_title() {
        let runtime = Runtime {
            lang: Some("zh".to_string()),
            title: Some("  ".to_string()),
            ..Runtime::default()
        };
        assert!(runtime.is_cjk());
        assert_eq!(runtime.title_text(), None);
        assert!(!Runtime::default().is_cjk());
    }
}
