//! Core types shared by every pipeline stage
//!
//! This module contains the configuration surface and the error type:
//! - `RenderError`: error type wrapping document-model errors
//! - `Layout`: base-to-output resolution scaling and screen slots
//! - `StyleOptions`: per-singer style settings and their mapping
//! - `SubtitlesPreset` and `Runtime`: what to run and for which song

pub mod errors;
pub mod layout;
pub mod preset;
pub mod style_options;

// Re-export commonly used types
pub use errors::{RenderError, Result};
pub use layout::{Layout, Point, Slot};
pub use preset::{Runtime, SubtitlesPreset};
pub use style_options::{singer_style_name, StyleOptions, StyleOptionsMapping};
