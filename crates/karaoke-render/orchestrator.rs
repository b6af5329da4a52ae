//! Pipeline entry points
//!
//! [`get_ass`] runs the alignment plugins, the renderer selected by the
//! preset and the ASS plugins, in that order, and validates the result.
//! [`alignment_to_ass`] is the editor-facing entry point that accepts the
//! flat word list and reports an empty alignment as `None` instead of an
//! empty document.
//!
//! # Examples
//!
//! ```rust
//! use karaoke_render::{
//!     alignment::{Alignment2, TimedWord},
//!     core::{Runtime, SubtitlesPreset},
//!     orchestrator::alignment_to_ass,
//! };
//!
//! let words = Alignment2::new(vec![
//!     TimedWord::new(1.0, 1.5, "la", 0),
//!     TimedWord::new(1.6, 2.0, "la", 0),
//! ]);
//! let ass = alignment_to_ass(&words, &SubtitlesPreset::default(), &Runtime::default())?
//!     .expect("non-empty alignment");
//! assert!(ass.to_string().contains(r"{\K50}la{\K10} {\K40}la"));
//! # Ok::<(), karaoke_render::core::RenderError>(())
//! ```

use karaoke_ass::document::Ass;

use crate::{
    alignment::{Alignment, Alignment2, Line, Subword, Word},
    core::{Layout, RenderError, Result, Runtime, SubtitlesPreset},
    plugins::{apply_alignment_plugins, apply_ass_plugins, PluginContext},
    renderers::{create_renderer, is_duet, RenderInput},
};

/// Render an alignment into a subtitle document
///
/// Failures are logged with a fixing hint when one is known.
///
/// # Errors
///
/// Returns an error if the alignment violates a structural invariant, a
/// style is missing or invalid, or the resolutions cannot be mapped.
pub fn get_ass(alignment: &Alignment, preset: &SubtitlesPreset, runtime: &Runtime) -> Result<Ass> {
    render(alignment, preset, runtime).inspect_err(report_failure)
}

fn report_failure(err: &RenderError) {
    if !err.is_user_fixable() {
        log::error!("rendering failed: {err}");
        return;
    }
    match err.suggestion() {
        Some(hint) => log::warn!("rendering failed: {err} ({hint})"),
        None => log::warn!("rendering failed: {err}"),
    }
}

fn render(alignment: &Alignment, preset: &SubtitlesPreset, runtime: &Runtime) -> Result<Ass> {
    let mut aligned = apply_alignment_plugins(alignment, &preset.alignment_plugins);
    if runtime.is_cjk() {
        log::debug!("merging words for CJK highlighting");
        aligned = merge_cjk_words(&aligned);
    }

    let layout = Layout::new(preset.base_resolution, runtime.resolution)?;
    let input = RenderInput {
        alignment: &aligned,
        styles: &runtime.style_options_mapping,
        layout,
        rtl: runtime.rtl,
    };
    let renderer = create_renderer(&preset.ass_renderer_settings, input)?;
    log::debug!(
        "rendering {} lines with '{}' at {}x{}",
        aligned.lines.len(),
        renderer.id(),
        layout.resolution.width,
        layout.resolution.height
    );

    let mut ass = renderer.ass()?;
    if let Some(title) = runtime.title_text() {
        ass.script_info.title = title.to_string();
    }

    let context = PluginContext {
        lines: renderer.lines(),
        runtime,
        layout,
        duet: is_duet(renderer.lines()),
    };
    apply_ass_plugins(&mut ass, &preset.ass_plugins, &context)?;

    ass.validate()?;
    log::debug!(
        "document ready: {} styles, {} events",
        ass.styles.len(),
        ass.events.len()
    );
    Ok(ass)
}

/// Render a flat editor alignment
///
/// Returns `Ok(None)` when there are no words or no lines to render.
///
/// # Errors
///
/// Returns the errors of [`get_ass`].
pub fn alignment_to_ass(
    alignment: &Alignment2,
    preset: &SubtitlesPreset,
    runtime: &Runtime,
) -> Result<Option<Ass>> {
    if alignment.is_empty() {
        return Ok(None);
    }
    let nested = alignment.to_alignment();
    if nested.is_empty() {
        return Ok(None);
    }
    get_ass(&nested, preset, runtime).map(Some)
}

/// Turn every line into a single word whose subwords are the line's words
///
/// Characters of CJK scripts are written without spaces, so a line is
/// highlighted as one unit with word-level timing inside it.
#[must_use]
pub fn merge_cjk_words(alignment: &Alignment) -> Alignment {
    let lines = alignment
        .lines
        .iter()
        .map(|line| {
            let subwords: Vec<Subword> = line
                .words
                .iter()
                .filter(|word| !word.is_blank())
                .map(|word| Subword::new(word.start, word.end, word.text.trim()))
                .collect();
            if subwords.is_empty() {
                return line.clone();
            }
            Line::from_words(line.singer, vec![Word::from_subwords(subwords)])
        })
        .collect();
    Alignment::new(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        alignment::TimedWord,
        core::RenderError,
        plugins::{alignment::AlignmentPluginOptions, ass::AssPluginOptions},
        renderers::KARAOKE_TAG,
    };
    use karaoke_ass::document::Resolution;
    use pretty_assertions::assert_eq;

    fn la_la() -> Alignment {
        Alignment::new(vec![Line::from_words(
            Some(0),
            vec![Word::new(1.0, 1.5, "la"), Word::new(1.6, 2.0, "la")],
        )])
    }

    #[test]
    fn minimal_preset_renders_one_dialogue() {
        let ass = get_ass(&la_la(), &SubtitlesPreset::default(), &Runtime::default()).unwrap();
        let text = ass.to_string();
        let dialogues: Vec<&str> = text.lines().filter(|l| l.starts_with("Dialogue:")).collect();
        assert_eq!(
            dialogues,
            vec![r"Dialogue: 0,0:00:01.00,0:00:02.00,Singer0,,0,0,0,,{\K50}la{\K10} {\K40}la"]
        );
    }

    #[test]
    fn empty_flat_alignment_is_none() {
        let result = alignment_to_ass(
            &Alignment2::default(),
            &SubtitlesPreset::default(),
            &Runtime::default(),
        )
        .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn cjk_lines_become_one_word() {
        let alignment = Alignment::new(vec![Line::from_words(
            None,
            vec![Word::new(0.0, 0.5, "你"), Word::new(0.5, 1.0, "好")],
        )]);
        let merged = merge_cjk_words(&alignment);
        assert_eq!(merged.lines[0].words.len(), 1);
        assert_eq!(merged.lines[0].text, "你好");
        assert_eq!(merged.lines[0].words[0].subwords.len(), 2);

        let runtime = Runtime {
            lang: Some("zh".to_string()),
            ..Runtime::default()
        };
        let ass = get_ass(&alignment, &SubtitlesPreset::default(), &runtime).unwrap();
        assert_eq!(ass.events.iter().next().unwrap().text, r"{\K50}你{\K50}好");
    }

    #[test]
    fn title_reaches_script_info_and_scaling_applies() {
        let runtime = Runtime {
            title: Some("Song".to_string()),
            resolution: Resolution::new(1280, 720),
            ..Runtime::default()
        };
        let ass = get_ass(&la_la(), &SubtitlesPreset::default(), &runtime).unwrap();
        let text = ass.to_string();
        assert!(text.contains("Title: Song"));
        assert!(text.contains("PlayResX: 1280"));
        assert_eq!(ass.styles.get("Singer0").unwrap().margin_v, 53);
    }

    #[test]
    fn plugins_run_in_preset_order() {
        let preset = SubtitlesPreset::from_json(
            r#"{"alignmentPlugins": [{"id": "auto-break"}], "assPlugins": [{"id": "countdown"}, {"id": "fade"}]}"#,
        )
        .unwrap();
        assert!(matches!(preset.alignment_plugins[0], AlignmentPluginOptions::AutoBreak(_)));
        assert!(matches!(preset.ass_plugins[1], AssPluginOptions::Fade(_)));

        let alignment = Alignment2::new(vec![
            TimedWord::new(6.0, 6.5, "late", 0),
            TimedWord::new(6.6, 7.0, "line", 0),
        ]);
        let ass = alignment_to_ass(&alignment, &preset, &Runtime::default())
            .unwrap()
            .unwrap();
        assert_eq!(ass.events.tagged("countdown").count(), 3);
        let karaoke = ass.events.tagged(KARAOKE_TAG).next().unwrap();
        assert!(karaoke.has_tag("fade"));
        assert!(ass.events.tagged("countdown").all(|d| !d.has_tag("fade")));
    }

    #[test]
    fn invalid_structure_fails_fast() {
        let mut word = Word::new(1.0, 2.0, "x");
        word.subwords.clear();
        let alignment = Alignment::new(vec![Line::from_words(None, vec![word])]);
        let err = get_ass(&alignment, &SubtitlesPreset::default(), &Runtime::default()).unwrap_err();
        assert!(matches!(err, RenderError::InvalidAlignment { .. }));
    }
}
