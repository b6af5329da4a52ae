//! Background box behind clusters of lines

use std::collections::BTreeMap;

use karaoke_ass::{
    document::{Ass, Dialogue, Insertion},
    tags::{rectangle_drawing, OverrideBlock},
    utils::{alpha_from_opacity, Color, CoreError},
};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{
    utils::{position, singer_style, SeenTimes, POSITION_PATTERN},
    AssPlugin, PluginContext,
};
use crate::{
    core::{Result, Slot, StyleOptions},
    renderers::KARAOKE_TAG,
};

pub(super) const ID: &str = "box";

const STYLE_PREFIX: &str = "Box";
const LAYER: i32 = -1;

/// Options of the box plugin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BoxOptions {
    /// Run the plugin
    pub enabled: bool,
    /// Largest pause in seconds inside one box
    pub max_gap: f64,
    /// Fade-in in milliseconds, added before the box
    pub fade_in_ms: u64,
    /// Fade-out in milliseconds, added after the box
    pub fade_out_ms: u64,
    /// Fill colour
    pub color: String,
    /// Opacity in `[0, 1]`
    pub opacity: f64,
    /// Width in base-resolution pixels
    pub width: f64,
    /// Height in base-resolution pixels
    pub height: f64,
    /// Space between the text margin and the box edge, in base-resolution pixels
    pub padding: f64,
}

impl Default for BoxOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            max_gap: 3.0,
            fade_in_ms: 300,
            fade_out_ms: 300,
            color: "#000000".to_string(),
            opacity: 0.5,
            width: 1600.0,
            height: 140.0,
            padding: 20.0,
        }
    }
}

/// A karaoke event as seen by the clustering pass
#[derive(Debug, Clone, Copy)]
struct Member {
    index: usize,
    start: f64,
    end: f64,
    margin_v: i32,
    /// `y` of the event's `\pos` anchor, when it carries one
    anchor: Option<f64>,
}

/// Consecutive events of one singer and slot
#[derive(Debug, Clone)]
struct Cluster {
    first_index: usize,
    start: f64,
    end: f64,
    margin_v: i32,
    /// Highest and lowest `\pos` anchors of the members
    anchors: Option<(f64, f64)>,
}

impl Cluster {
    fn new(member: Member) -> Self {
        Self {
            first_index: member.index,
            start: member.start,
            end: member.end,
            margin_v: member.margin_v,
            anchors: member.anchor.map(|y| (y, y)),
        }
    }

    fn absorb(&mut self, member: Member) {
        self.end = self.end.max(member.end);
        self.first_index = self.first_index.min(member.index);
        if let Some(y) = member.anchor {
            self.anchors = Some(self.anchors.map_or((y, y), |(top, bottom)| {
                (top.min(y), bottom.max(y))
            }));
        }
    }
}

/// Draws one box per singer behind every run of closely spaced lines
#[derive(Debug, Clone)]
pub struct BoxPlugin<'a> {
    options: &'a BoxOptions,
}

impl<'a> BoxPlugin<'a> {
    /// Create the plugin
    #[must_use]
    pub const fn new(options: &'a BoxOptions) -> Self {
        Self { options }
    }

    /// Karaoke events grouped by singer and screen slot
    ///
    /// Events placed with `\pos` take their slot from the half of the screen
    /// the anchor lies in, others from the alignment of their style.
    fn members(
        &self,
        ass: &Ass,
        context: &PluginContext<'_>,
    ) -> Result<BTreeMap<(i32, u8), Vec<Member>>> {
        let pattern = Regex::new(POSITION_PATTERN).map_err(CoreError::internal)?;
        let default_margin = context.layout.margin(StyleOptions::default().margin_v);
        let middle = f64::from(context.layout.resolution.height) / 2.0;
        let mut groups: BTreeMap<(i32, u8), Vec<Member>> = BTreeMap::new();
        for (index, event) in ass.events.iter().enumerate() {
            if !event.has_tag(KARAOKE_TAG) {
                continue;
            }
            let style = ass.styles.get(&event.style);
            let anchor = position(&pattern, &event.text).map(|(_, y)| y);
            let slot = match anchor {
                Some(y) if y < middle => Slot::Top,
                Some(_) => Slot::Bottom,
                None => style.map_or(Slot::Bottom, |style| Slot::from_alignment(style.alignment)),
            };
            let member = Member {
                index,
                start: event.start,
                end: event.end,
                margin_v: style.map_or(default_margin, |style| style.margin_v),
                anchor,
            };
            let slot_key = u8::from(slot == Slot::Bottom);
            groups
                .entry((event.singer.unwrap_or(0), slot_key))
                .or_default()
                .push(member);
        }
        Ok(groups)
    }

    fn clusters(&self, mut members: Vec<Member>) -> Vec<Cluster> {
        members.sort_by(|a, b| a.start.total_cmp(&b.start));
        let mut clusters: Vec<Cluster> = Vec::new();
        for member in members {
            match clusters.last_mut() {
                Some(cluster) if member.start - cluster.end <= self.options.max_gap => {
                    cluster.absorb(member);
                }
                _ => clusters.push(Cluster::new(member)),
            }
        }
        clusters
    }

    fn text(&self, context: &PluginContext<'_>, slot: Slot, cluster: &Cluster) -> Result<String> {
        let layout = &context.layout;
        let resolution = layout.resolution;
        let width = layout.px(self.options.width);
        let height = layout.px(self.options.height);
        let padding = layout.px(self.options.padding);
        let margin_v = f64::from(cluster.margin_v);
        let x = resolution.center_x() - width / 2.0;
        // Anchors are the bottom centre of their line
        let (y, height) = match (cluster.anchors, slot) {
            (Some((top, bottom)), _) => (top + padding - height, height + bottom - top),
            (None, Slot::Top) => (margin_v - padding, height),
            (None, Slot::Bottom) => {
                (f64::from(resolution.height) - margin_v + padding - height, height)
            }
        };

        let mut block = OverrideBlock::new()
            .an(7)
            .pos(x, y)
            .raw(r"\bord0\shad0")
            .color(Color::parse(&self.options.color)?)
            .alpha(&alpha_from_opacity(self.options.opacity));
        if self.options.fade_in_ms > 0 || self.options.fade_out_ms > 0 {
            block = block.fad(self.options.fade_in_ms, self.options.fade_out_ms);
        }
        Ok(format!("{}{}", block.drawing(1).build(), rectangle_drawing(width, height)))
    }
}

impl AssPlugin for BoxPlugin<'_> {
    fn id(&self) -> &'static str {
        ID
    }

    fn apply(&self, ass: &mut Ass, context: &PluginContext<'_>) -> Result<()> {
        let fade_in = self.options.fade_in_ms as f64 / 1000.0;
        let fade_out = self.options.fade_out_ms as f64 / 1000.0;
        let mut seen = SeenTimes::tagged_by_text(ass, ID);
        let mut insertions = Vec::new();

        for ((singer, slot_key), members) in self.members(ass, context)? {
            let slot = if slot_key == 0 { Slot::Top } else { Slot::Bottom };
            for cluster in self.clusters(members) {
                let start = if cluster.start - fade_in < 0.0 {
                    cluster.start
                } else {
                    cluster.start - fade_in
                };
                let end = cluster.end + fade_out;
                let text = self.text(context, slot, &cluster)?;
                if !seen.insert_text(&text, start, end) {
                    continue;
                }

                let (style, _) = singer_style(ass, STYLE_PREFIX, singer, context, |options| {
                    StyleOptions {
                        outline: 0.0,
                        shadow: 0.0,
                        alignment: 7,
                        ..options
                    }
                })?;
                insertions.push(Insertion::new(
                    cluster.first_index,
                    Dialogue::new(start, end, style, text)
                        .with_layer(LAYER)
                        .with_singer(singer)
                        .with_tag(ID),
                ));
            }
        }

        ass.events.apply_insertions(insertions);
        Ok(())
    }
}
