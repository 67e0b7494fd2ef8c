//! Milestone timeline along a horizontal axis.
//!
//! Milestones sit on the axis at their `position` (or evenly by index when
//! no milestone has one). Labels alternate above and below the axis; a
//! label that would collide with an earlier one on the same side moves one
//! tier further out.

use log::debug;

use slidegraph_core::{
    draw::{RenderLayer, ShapeStyle, Sketch, StrokeDefinition, TextAnchor, VerticalAlign},
    geometry::{Bounds, Point, Size},
    metrics::{line_height, text_width},
};

use super::{
    RenderContext,
    common::{self, SMALL_FONT_SIZE},
};
use crate::model::{Milestone, Timeline};

const LABEL_FONT_SIZE: f32 = 14.0;

const MAX_LABEL_WIDTH: f32 = 180.0;

const MARKER_RADIUS: f32 = 7.0;

/// Distance between the axis and the first label tier.
const STEM: f32 = 18.0;

const TIER_GAP: f32 = 6.0;

const HORIZONTAL_GAP: f32 = 8.0;

/// Returns each milestone's offset along the axis in `0..=1`.
///
/// Explicit positions are normalised over their min..max range; milestones
/// without a usable position are spread by index instead.
fn offsets(timeline: &Timeline) -> Vec<f32> {
    let count = timeline.milestones.len();
    let positions: Vec<Option<f64>> = timeline
        .milestones
        .iter()
        .map(|m| m.position.filter(|p| p.is_finite()))
        .collect();
    let by_index = |index: usize| {
        if count > 1 {
            index as f32 / (count - 1) as f32
        } else {
            0.5
        }
    };
    if positions.iter().any(Option::is_none) {
        return (0..count).map(by_index).collect();
    }

    let min = positions.iter().flatten().copied().fold(f64::INFINITY, f64::min);
    let max = positions.iter().flatten().copied().fold(f64::NEG_INFINITY, f64::max);
    if max - min <= f64::EPSILON {
        return (0..count).map(by_index).collect();
    }
    positions
        .iter()
        .flatten()
        .map(|p| common::unit_ratio(*p, min, max) as f32)
        .collect()
}

/// Assigns each label a tier on its side of the axis.
///
/// `spans` are the horizontal extents of the labels, in order; labels on
/// even indices go above the axis and odd ones below. Returns the tier of
/// each label, 0 being closest to the axis.
fn tiers(spans: &[(f32, f32)]) -> Vec<usize> {
    // Rightmost occupied x per tier, for each side.
    let mut occupied: [Vec<f32>; 2] = [Vec::new(), Vec::new()];
    spans
        .iter()
        .enumerate()
        .map(|(index, (left, right))| {
            let side = &mut occupied[index % 2];
            match side.iter().position(|end| *end + HORIZONTAL_GAP <= *left) {
                Some(tier) => {
                    side[tier] = *right;
                    tier
                }
                None => {
                    side.push(*right);
                    side.len() - 1
                }
            }
        })
        .collect()
}

fn label_text(milestone: &Milestone) -> Vec<String> {
    let mut lines = vec![milestone.label.clone()];
    if let Some(date) = milestone.date.as_deref().filter(|d| !d.trim().is_empty()) {
        lines.push(date.to_string());
    }
    lines
}

pub fn render(timeline: &Timeline, sketch: &mut Sketch, ctx: &RenderContext<'_>) {
    let count = timeline.milestones.len();
    if count == 0 {
        common::placeholder(sketch, ctx, "timeline without milestones");
        return;
    }

    let area = sketch.clip();
    let axis_y = area.center().y();
    let track_left = area.min_x() + MARKER_RADIUS;
    let track_width = (area.width() - 2.0 * MARKER_RADIUS).max(0.0);
    let label_width = MAX_LABEL_WIDTH.min(area.width() / 2.0);

    let offsets = offsets(timeline);
    let xs: Vec<f32> = offsets.iter().map(|o| track_left + o * track_width).collect();
    let texts: Vec<Vec<String>> = timeline.milestones.iter().map(label_text).collect();

    let spans: Vec<(f32, f32)> = texts
        .iter()
        .zip(&xs)
        .map(|(lines, x)| {
            let width = lines
                .iter()
                .map(|line| text_width(line, LABEL_FONT_SIZE))
                .fold(0.0_f32, f32::max)
                .min(label_width);
            let left = (x - width / 2.0)
                .min(area.max_x() - width)
                .max(area.min_x());
            (left, left + width)
        })
        .collect();
    let tiers = tiers(&spans);

    let tier_height = line_height(LABEL_FONT_SIZE) * 2.0 + TIER_GAP;
    let max_tiers = ((area.height() / 2.0 - STEM) / tier_height).floor().max(0.0) as usize;

    sketch.line(
        RenderLayer::Grid,
        Point::new(area.min_x(), axis_y),
        Point::new(area.max_x(), axis_y),
        &StrokeDefinition::solid(ctx.theme().neutral(), 2.0),
    );

    let label_style = ctx.text_style(LABEL_FONT_SIZE).with_anchor(TextAnchor::Middle);
    let date_style = ctx.muted_style(SMALL_FONT_SIZE).with_anchor(TextAnchor::Middle);
    let stem = StrokeDefinition::solid(ctx.theme().neutral().with_alpha(0.6), 1.0);
    let mut hidden = 0;

    for (index, ((x, (left, right)), tier)) in xs.iter().zip(&spans).zip(&tiers).enumerate() {
        let color = ctx.theme().series_color(index);
        sketch.circle(
            RenderLayer::Marker,
            Point::new(*x, axis_y),
            MARKER_RADIUS,
            &ShapeStyle::filled(color).with_stroke(Some(StrokeDefinition::solid(
                ctx.theme().background(),
                2.0,
            ))),
        );

        if *tier >= max_tiers {
            hidden += 1;
            continue;
        }
        let above = index % 2 == 0;
        let offset = STEM + *tier as f32 * tier_height;
        let box_top = if above {
            axis_y - offset - tier_height + TIER_GAP
        } else {
            axis_y + offset
        };
        let label_box = Bounds::new_from_top_left(
            Point::new(*left, box_top),
            Size::new(right - left, tier_height - TIER_GAP),
        );
        let stem_end = if above { label_box.max_y() } else { label_box.min_y() };
        sketch.line(
            RenderLayer::Connector,
            Point::new(*x, axis_y),
            Point::new(*x, stem_end),
            &stem,
        );

        let lines = &texts[index];
        let (title_box, date_box) = (
            label_box.take_top(label_box.height() / 2.0),
            label_box.take_bottom(label_box.height() / 2.0),
        );
        let valign = if above { VerticalAlign::Bottom } else { VerticalAlign::Top };
        if let Some(date) = lines.get(1) {
            common::line_label(sketch, &label_style, &lines[0], title_box, valign);
            common::line_label(sketch, &date_style, date, date_box, valign);
        } else {
            common::line_label(sketch, &label_style, &lines[0], label_box, valign);
        }
    }

    if hidden > 0 {
        debug!(hidden = hidden; "Timeline labels without room were dropped");
    }
}
