//! Four-line scrolling layout
//!
//! Consecutive lines are paired into groups. Groups alternate between an
//! upper and a lower screen region, each region holding two explicitly
//! positioned lines. A group is shown from the start of the previous group
//! so the next pair is already on screen while the current one is sung;
//! after a long gap it appears a fixed lead-in before its first word.

use karaoke_ass::{
    document::{Ass, Dialogue, LineRef},
    tags::OverrideBlock,
};
use serde::{Deserialize, Serialize};

use super::{
    lyrics_style_name, prepare_lines, register_style, text::karaoke_text, RenderInput, Renderer,
    KARAOKE_TAG,
};
use crate::{
    alignment::Line,
    core::{Layout, Point, Result, StyleOptions, StyleOptionsMapping},
};

/// Settings of the four-line renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FourLineSettings {
    /// Seconds subtracted from every timestamp
    pub offset: f64,
    /// Gap in seconds above which lines are not paired
    pub gap_reset: f64,
    /// Lead time before a group that follows a long gap, in seconds
    pub lead_in: f64,
    /// Anchor of the first line in the upper region
    pub upper_first: Point,
    /// Anchor of the second line in the upper region
    pub upper_second: Point,
    /// Anchor of the first line in the lower region
    pub lower_first: Point,
    /// Anchor of the second line in the lower region
    pub lower_second: Point,
}

impl Default for FourLineSettings {
    fn default() -> Self {
        Self {
            offset: 0.0,
            gap_reset: 5.0,
            lead_in: 3.0,
            upper_first: Point::new(960.0, 150.0),
            upper_second: Point::new(960.0, 240.0),
            lower_first: Point::new(960.0, 900.0),
            lower_second: Point::new(960.0, 990.0),
        }
    }
}

impl FourLineSettings {
    fn anchors(&self, upper: bool) -> [Point; 2] {
        if upper {
            [self.upper_first, self.upper_second]
        } else {
            [self.lower_first, self.lower_second]
        }
    }
}

/// One or two lines shown together in a region
#[derive(Debug, Clone, PartialEq)]
struct Group {
    /// Indices into the prepared lines
    lines: Vec<usize>,
    upper: bool,
    start: f64,
    end: f64,
}

/// Renderer C: paired lines alternating between two screen regions
#[derive(Debug)]
pub struct FourLineRenderer<'a> {
    lines: Vec<Line>,
    styles: &'a StyleOptionsMapping,
    settings: &'a FourLineSettings,
    layout: Layout,
    rtl: bool,
}

impl<'a> FourLineRenderer<'a> {
    /// Prepare the alignment for rendering
    ///
    /// # Errors
    ///
    /// Returns an error if the alignment violates a structural invariant.
    pub fn new(input: RenderInput<'a>, settings: &'a FourLineSettings) -> Result<Self> {
        Ok(Self {
            lines: prepare_lines(input.alignment, settings.offset)?,
            styles: input.styles,
            settings,
            layout: input.layout,
            rtl: input.rtl,
        })
    }

    fn groups(&self) -> Vec<Group> {
        let gap_reset = self.settings.gap_reset;
        let mut groups: Vec<Group> = Vec::new();
        let mut index = 0;

        while index < self.lines.len() {
            let line = &self.lines[index];
            let mut members = vec![index];
            if let Some(next) = self.lines.get(index + 1) {
                if next.start - line.end <= gap_reset {
                    members.push(index + 1);
                }
            }
            index += members.len();

            let first_start = line.start;
            let end = members
                .iter()
                .map(|&i| self.lines[i].end)
                .fold(line.end, f64::max);

            let (upper, start) = match groups.last() {
                Some(previous) if first_start - previous.end <= gap_reset => {
                    let previous_first = self.lines[previous.lines[0]].start;
                    (!previous.upper, previous_first.min(first_start))
                }
                _ => (true, (first_start - self.settings.lead_in).max(0.0)),
            };

            groups.push(Group {
                lines: members,
                upper,
                start,
                end,
            });
        }
        groups
    }

    fn style(&self, ass: &mut Ass, singer: i32) -> Result<(String, StyleOptions)> {
        let name = lyrics_style_name(singer, None);
        let options = StyleOptions {
            alignment: 2,
            ..self.styles.resolve(singer)?.clone()
        };
        register_style(ass, &name, &options, &self.layout)?;
        Ok((name, options))
    }
}

impl Renderer for FourLineRenderer<'_> {
    fn id(&self) -> &'static str {
        "four-line"
    }

    fn lines(&self) -> &[Line] {
        &self.lines
    }

    fn ass(&self) -> Result<Ass> {
        let mut ass = Ass::new(self.layout.resolution);
        let groups = self.groups();

        for group in &groups {
            let anchors = self.settings.anchors(group.upper);
            for (&index, anchor) in group.lines.iter().zip(anchors) {
                let line = &self.lines[index];
                let singer = line.singer_id();
                let (style, options) = self.style(&mut ass, singer)?;
                let anchor = self.layout.point(anchor);
                let text = format!(
                    "{}{}",
                    OverrideBlock::new().pos(anchor.x, anchor.y).build(),
                    karaoke_text(line, group.start, &options, self.rtl)
                );
                ass.events.push(
                    Dialogue::new(group.start, group.end, style, text)
                        .with_tag(KARAOKE_TAG)
                        .with_line(LineRef(index))
                        .with_singer(singer),
                );
            }
        }
        log::debug!(
            "four-line renderer: {} lines in {} groups",
            self.lines.len(),
            groups.len()
        );
        Ok(ass)
    }
}
