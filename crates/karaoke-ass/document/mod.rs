//! In-memory subtitle document
//!
//! [`Ass`] owns the three sections of an ASS script and renders them in the
//! exact textual layout ffmpeg's `ass` filter parses: script info, styles
//! and events, separated by blank lines.
//!
//! # Examples
//!
//! ```rust
//! use karaoke_ass::document::{Ass, Dialogue, Resolution, Style};
//!
//! let mut ass = Ass::new(Resolution::FULL_HD);
//! ass.styles.add(Style::default());
//! ass.events.push(Dialogue::new(1.0, 2.0, "Default", "hello"));
//! ass.validate()?;
//!
//! let text = ass.to_string();
//! assert!(text.contains("Dialogue: 0,0:00:01.00,0:00:02.00,Default,,0,0,0,,hello"));
//! # Ok::<(), karaoke_ass::CoreError>(())
//! ```

mod event;
mod script_info;
mod style;

use core::fmt;

pub use event::{Dialogue, Events, Insertion, LineRef, EVENT_FORMAT};
pub use script_info::{Resolution, ScriptInfo};
pub use style::{Style, Styles, STYLE_FORMAT};

use crate::utils::{
    errors::{CoreError, Result},
    validate_ass_name,
};

/// A complete subtitle document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ass {
    /// `[Script Info]`
    pub script_info: ScriptInfo,
    /// `[V4+ Styles]`
    pub styles: Styles,
    /// `[Events]`
    pub events: Events,
}

impl Ass {
    /// Empty document for a canvas of the given resolution
    #[must_use]
    pub fn new(resolution: Resolution) -> Self {
        Self {
            script_info: ScriptInfo::new(resolution),
            styles: Styles::new(),
            events: Events::new(),
        }
    }

    /// Canvas resolution the document is authored in
    #[must_use]
    pub const fn resolution(&self) -> Resolution {
        self.script_info.resolution()
    }

    /// Check structural consistency before serialization
    ///
    /// Every style must carry a name dialogue lines can refer to, and every
    /// event must refer to a registered style and have finite, non-negative,
    /// ordered times.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] for a bad or unknown style name and
    /// [`CoreError::InvalidTime`] for bad event times, naming the first
    /// offender.
    pub fn validate(&self) -> Result<()> {
        if let Some(style) = self.styles.iter().find(|style| !validate_ass_name(&style.name)) {
            return Err(CoreError::validation(format!(
                "style name '{}' cannot be referenced by events",
                style.name.escape_debug()
            )));
        }
        for (index, event) in self.events.iter().enumerate() {
            if !self.styles.contains(&event.style) {
                return Err(CoreError::validation(format!(
                    "event {index} references unknown style '{}'",
                    event.style
                )));
            }
            if !event.start.is_finite() || !event.end.is_finite() {
                return Err(CoreError::invalid_time(
                    format!("{}..{}", event.start, event.end),
                    &format!("event {index} has a non-finite time"),
                ));
            }
            if event.start < 0.0 || event.end < event.start {
                return Err(CoreError::invalid_time(
                    format!("{}..{}", event.start, event.end),
                    &format!("event {index} has invalid bounds"),
                ));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Ass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}\n{}", self.script_info, self.styles, self.events)
    }
}
