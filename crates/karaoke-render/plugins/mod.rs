//! Plugin system for the rendering pipeline
//!
//! Two kinds of pass run around the renderer:
//!
//! - [`alignment`] plugins restructure the alignment before rendering
//! - [`ass`] plugins decorate or adjust the rendered document
//!
//! Both are configured through option enums tagged by `id`, and each enum
//! has an exhaustive factory that builds the matching plugin.

pub mod alignment;
pub mod ass;

pub use alignment::{apply_alignment_plugins, AlignmentPlugin, AlignmentPluginOptions};
pub use ass::{apply_ass_plugins, AssPlugin, AssPluginOptions, PluginContext};
