//! # Karaoke ASS
//!
//! In-memory ASS (Advanced `SubStation` Alpha) subtitle document with
//! byte-exact serialization for ffmpeg's `ass` filter, plus the colour,
//! timestamp and override-tag primitives karaoke rendering is built from.
//!
//! ## Features
//!
//! - **Document model**: script info, a name-unique style table and an
//!   ordered event list with one-pass positional insertion
//! - **Exact output**: fixed column order, `H:MM:SS.CC` timestamps and
//!   floor-based centisecond conversion
//! - **Override tags**: `\K` karaoke sweeps with right-to-left rotation,
//!   positioning, fades, transforms and vector drawings
//!
//! ## Quick Start
//!
//! ```rust
//! use karaoke_ass::{
//!     document::{Ass, Dialogue, Resolution, Style},
//!     tags::karaoke_tag,
//! };
//!
//! let mut ass = Ass::new(Resolution::FULL_HD);
//! ass.styles.add(Style::default());
//!
//! let text = format!("{}la{} la", karaoke_tag(50, false), karaoke_tag(10, false));
//! ass.events.push(Dialogue::new(1.0, 2.0, "Default", text));
//!
//! assert!(ass.to_string().contains(r"{\K50}la{\K10} la"));
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(clippy::all)]
#![deny(unsafe_code)]

pub mod document;
pub mod tags;
pub mod utils;

pub use document::{Ass, Dialogue, Events, Insertion, LineRef, Resolution, ScriptInfo, Style, Styles};
pub use utils::{CoreError, Color};

/// Crate version for runtime compatibility checks
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type for document operations, using the crate's unified `CoreError`
pub type Result<T> = core::result::Result<T, CoreError>;
