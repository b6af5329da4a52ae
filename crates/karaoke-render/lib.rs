//! Karaoke rendering pipeline from lyric alignments to ASS subtitles
//!
//! `karaoke-render` turns word and subword timing data into a karaoke
//! subtitle track built on the `karaoke-ass` document model.
//!
//! # Features
//!
//! - **Alignment model**: nested line, word and subword tree plus the flat
//!   word list used by sync editors
//! - **Alignment plugins**: pause-based re-breaking and line length limits
//! - **Renderers**: duet-aware two-line layout, waiting and active line
//!   pairs, and a four-line scrolling layout
//! - **ASS plugins**: title card, count-ins, countdowns, indicators,
//!   progress bars, fades, sync offset and background boxes
//! - **Presets**: the whole pipeline configured by one serde record
//!
//! The pipeline is synchronous and deterministic: the same alignment and
//! preset always produce byte-identical output.
//!
//! # Example
//!
//! ```
//! use karaoke_render::{
//!     alignment::{Alignment, Line, Word},
//!     core::{Runtime, SubtitlesPreset},
//!     get_ass,
//! };
//!
//! let alignment = Alignment::new(vec![Line::from_words(
//!     None,
//!     vec![Word::new(1.0, 1.5, "la"), Word::new(1.6, 2.0, "la")],
//! )]);
//! let ass = get_ass(&alignment, &SubtitlesPreset::default(), &Runtime::default()).unwrap();
//!
//! assert!(ass
//!     .to_string()
//!     .contains(r"Dialogue: 0,0:00:01.00,0:00:02.00,Singer0,,0,0,0,,{\K50}la{\K10} {\K40}la"));
//! ```

pub mod alignment;
pub mod core;
pub mod orchestrator;
pub mod plugins;
pub mod renderers;

// Re-export ass types that appear in the public API
pub use karaoke_ass::{Ass, Dialogue, Resolution};

// Public API exports
pub use crate::alignment::{Alignment, Alignment2, Line, Subword, TimedWord, Word, ALL_SINGERS_ID};
pub use crate::core::{
    Layout, RenderError, Result, Runtime, StyleOptions, StyleOptionsMapping, SubtitlesPreset,
};
pub use orchestrator::{alignment_to_ass, get_ass};
pub use plugins::{AlignmentPluginOptions, AssPluginOptions};
pub use renderers::{Renderer, RendererSettings};
