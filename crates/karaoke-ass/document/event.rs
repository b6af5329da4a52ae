//! Dialogue events and the `[Events]` section
//!
//! Event order is meaningful: decorative events are placed relative to the
//! karaoke event they decorate, and plugins find "the previous event" by
//! scanning backward through the list. Insertions are therefore collected
//! during a read-only scan and applied in one pass with
//! [`Events::apply_insertions`].

use core::fmt;

use crate::utils::format_ass_time;

/// Column order of the `[Events]` section
pub const EVENT_FORMAT: &str =
    "Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text";

/// Non-owning reference to the alignment line an event was rendered from
///
/// The index points into whatever line list the producing renderer exposes;
/// it is meaningful only next to that list and never keeps data alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineRef(pub usize);

impl LineRef {
    /// Index of the referenced line
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A `Dialogue:` event
///
/// Besides the ASS columns this carries pipeline metadata that is never
/// serialized: the tags of the stages that produced or transformed it, the
/// source line reference, the singer it belongs to and how far it was moved
/// after rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Dialogue {
    /// Z-order layer, higher draws on top
    pub layer: i32,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
    /// Name of a registered style
    pub style: String,
    /// Actor name column
    pub name: String,
    /// Left margin override, `0` keeps the style margin
    pub margin_l: i32,
    /// Right margin override
    pub margin_r: i32,
    /// Vertical margin override
    pub margin_v: i32,
    /// Effect column
    pub effect: String,
    /// Text with embedded override blocks
    pub text: String,
    /// Tags of the stages that produced this event
    pub plugins: Vec<String>,
    /// Source line, when rendered from alignment data
    pub line: Option<LineRef>,
    /// Singer the event was styled for
    pub singer: Option<i32>,
    /// Seconds the event was moved after rendering; source line times plus
    /// this are the times the line is sung on screen
    pub shift: f64,
}

impl Dialogue {
    /// Create an event on layer 0 with no metadata
    #[must_use]
    pub fn new(start: f64, end: f64, style: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            layer: 0,
            start,
            end,
            style: style.into(),
            name: String::new(),
            margin_l: 0,
            margin_r: 0,
            margin_v: 0,
            effect: String::new(),
            text: text.into(),
            plugins: Vec::new(),
            line: None,
            singer: None,
            shift: 0.0,
        }
    }

    /// Set the layer
    #[must_use]
    pub const fn with_layer(mut self, layer: i32) -> Self {
        self.layer = layer;
        self
    }

    /// Add a stage tag
    #[must_use]
    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tag(tag);
        self
    }

    /// Set the source line reference
    #[must_use]
    pub const fn with_line(mut self, line: LineRef) -> Self {
        self.line = Some(line);
        self
    }

    /// Set the singer
    #[must_use]
    pub const fn with_singer(mut self, singer: i32) -> Self {
        self.singer = Some(singer);
        self
    }

    /// Record a stage tag once
    pub fn tag(&mut self, tag: &str) {
        if !self.has_tag(tag) {
            self.plugins.push(tag.to_string());
        }
    }

    /// Check if a stage tag is present
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.plugins.iter().any(|t| t == tag)
    }
}

impl fmt::Display for Dialogue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Dialogue: {},{},{},{},{},{},{},{},{},{}",
            self.layer,
            format_ass_time(self.start),
            format_ass_time(self.end),
            self.style,
            self.name,
            self.margin_l,
            self.margin_r,
            self.margin_v,
            self.effect,
            self.text
        )
    }
}

/// An event to place before the existing event at `before`
///
/// `before == len` appends.
#[derive(Debug, Clone, PartialEq)]
pub struct Insertion {
    /// Index in the list as it was when the scan ran
    pub before: usize,
    /// Event to insert
    pub dialogue: Dialogue,
}

impl Insertion {
    /// Insert `dialogue` before the event at `before`
    #[must_use]
    pub const fn new(before: usize, dialogue: Dialogue) -> Self {
        Self { before, dialogue }
    }
}

/// The `[Events]` section
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Events {
    /// Events in document order
    pub events: Vec<Dialogue>,
}

impl Events {
    /// Create an empty section
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event
    pub fn push(&mut self, dialogue: Dialogue) {
        self.events.push(dialogue);
    }

    /// Insert events at the very front, keeping their relative order
    pub fn prepend(&mut self, dialogues: Vec<Dialogue>) {
        self.events.splice(0..0, dialogues);
    }

    /// Materialize insertions computed against the current list
    ///
    /// Insertions sharing an index keep the order they were produced in and
    /// all land before the original event at that index. Indices past the
    /// end append.
    pub fn apply_insertions(&mut self, mut insertions: Vec<Insertion>) {
        if insertions.is_empty() {
            return;
        }
        insertions.sort_by_key(|insertion| insertion.before);

        let original = core::mem::take(&mut self.events);
        let mut merged = Vec::with_capacity(original.len() + insertions.len());
        let mut pending = insertions.into_iter().peekable();

        for (index, dialogue) in original.into_iter().enumerate() {
            while let Some(insertion) = pending.next_if(|i| i.before <= index) {
                merged.push(insertion.dialogue);
            }
            merged.push(dialogue);
        }
        merged.extend(pending.map(|insertion| insertion.dialogue));

        self.events = merged;
    }

    /// Number of events
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if there are no events
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Iterate in document order
    pub fn iter(&self) -> impl Iterator<Item = &Dialogue> {
        self.events.iter()
    }

    /// Iterate mutably in document order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Dialogue> {
        self.events.iter_mut()
    }

    /// Events carrying a stage tag
    pub fn tagged<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Dialogue> + 'a {
        self.events.iter().filter(move |d| d.has_tag(tag))
    }
}

impl fmt::Display for Events {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[Events]")?;
        writeln!(f, "{EVENT_FORMAT}")?;
        for event in &self.events {
            writeln!(f, "{event}")?;
        }
        Ok(())
    }
}
