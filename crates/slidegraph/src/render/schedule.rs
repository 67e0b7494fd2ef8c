//! Gantt charts and roadmaps: intervals on a shared horizontal time axis.
//!
//! Both charts reserve a label column on the left and a period header on
//! top. Positions are proportional to the offset from the earliest start
//! within the overall span. Gantt charts give every task its own row;
//! roadmap lanes pack their items into as many sub-rows as needed so that
//! overlapping intervals never overlap on the slide.

use slidegraph_core::{
    draw::{FontWeight, RenderLayer, ShapeStyle, Sketch, TextAnchor, VerticalAlign},
    geometry::{Bounds, Insets, Point, Size},
};

use super::{
    RenderContext,
    common::{self, SMALL_FONT_SIZE},
};
use crate::model::{GanttChart, Roadmap, ScheduledItem};

const LABEL_COLUMN: f32 = 200.0;

const HEADER_HEIGHT: f32 = 28.0;

const MAX_BAR_HEIGHT: f32 = 28.0;

const MIN_BAR_WIDTH: f32 = 4.0;

const LANE_GAP: f32 = 6.0;

/// The closed interval covered by a set of scheduled items.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Span {
    start: f64,
    end: f64,
}

impl Span {
    /// Returns the span of every usable item, widened to unit length when
    /// all items collapse to a single instant.
    fn of<'a>(items: impl IntoIterator<Item = &'a ScheduledItem>) -> Option<Self> {
        let (start, end) = items
            .into_iter()
            .filter_map(interval)
            .fold(None, |acc: Option<(f64, f64)>, (s, e)| {
                Some(acc.map_or((s, e), |(lo, hi)| (lo.min(s), hi.max(e))))
            })?;
        let end = if end - start > f64::EPSILON { end } else { start + 1.0 };
        Some(Self { start, end })
    }

    fn ratio(&self, value: f64) -> f32 {
        common::unit_ratio(value, self.start, self.end).clamp(0.0, 1.0) as f32
    }
}

/// Returns the item's `(start, end)` in order, or `None` for non-finite bounds.
fn interval(item: &ScheduledItem) -> Option<(f64, f64)> {
    (item.start.is_finite() && item.end.is_finite())
        .then(|| (item.start.min(item.end), item.start.max(item.end)))
}

/// Maps an interval onto `track`.
fn bar_extent(span: &Span, track: Bounds, (start, end): (f64, f64)) -> (f32, f32) {
    let from = track.min_x() + span.ratio(start) * track.width();
    let to = track.min_x() + span.ratio(end) * track.width();
    let width = (to - from).max(MIN_BAR_WIDTH.min(track.width()));
    let from = from.min(track.max_x() - width);
    (from, width)
}

/// Assigns every item a sub-row so that items sharing a row never overlap.
///
/// Items are placed greedily in start order into the first row whose last
/// interval ends at or before their start. Returns the row of each item (in
/// input order) and the number of rows used.
fn pack_rows(items: &[ScheduledItem]) -> (Vec<usize>, usize) {
    let mut order: Vec<usize> = (0..items.len()).collect();
    let key = |i: &usize| interval(&items[*i]).map_or(f64::NEG_INFINITY, |(s, _)| s);
    order.sort_by(|a, b| key(a).total_cmp(&key(b)));

    let mut row_ends: Vec<f64> = Vec::new();
    let mut rows = vec![0; items.len()];
    for index in order {
        let Some((start, end)) = interval(&items[index]) else {
            continue;
        };
        match row_ends.iter().position(|last| *last <= start) {
            Some(row) => {
                row_ends[row] = end;
                rows[index] = row;
            }
            None => {
                rows[index] = row_ends.len();
                row_ends.push(end);
            }
        }
    }
    (rows, row_ends.len().max(1))
}

/// Divides `total` into heights proportional to `weights`, leaving `gap`
/// between consecutive entries.
fn stack_heights(total: f32, weights: &[f32], gap: f32) -> Vec<f32> {
    if weights.is_empty() {
        return Vec::new();
    }
    let available = (total - gap * (weights.len() - 1) as f32).max(0.0);
    let sum: f32 = weights.iter().sum();
    if sum <= 0.0 {
        return vec![available / weights.len() as f32; weights.len()];
    }
    weights.iter().map(|w| available * w / sum).collect()
}

/// Splits the slot into label column, period header and track area.
fn frame(area: Bounds, has_periods: bool) -> (Bounds, Bounds, Bounds) {
    let label_width = LABEL_COLUMN.min(area.width() * 0.25);
    let header_height = if has_periods { HEADER_HEIGHT.min(area.height()) } else { 0.0 };
    let body = area.below(header_height, 0.0);
    let labels = body.take_left(label_width);
    let track = body.right_of(label_width, 8.0);
    let header = Bounds::new_from_top_left(
        Point::new(track.min_x(), area.min_y()),
        Size::new(track.width(), header_height),
    );
    (labels, header, track)
}

fn draw_periods(
    sketch: &mut Sketch,
    ctx: &RenderContext<'_>,
    periods: &[String],
    header: Bounds,
    track: Bounds,
) {
    if periods.is_empty() {
        return;
    }
    let style = ctx.muted_style(SMALL_FONT_SIZE).with_anchor(TextAnchor::Middle);
    let grid = common::grid_stroke(ctx);
    for (index, cell) in header.split_columns(periods.len(), 0.0).into_iter().enumerate() {
        common::line_label(sketch, &style, &periods[index], cell, VerticalAlign::Middle);
        if index > 0 {
            sketch.line(
                RenderLayer::Grid,
                Point::new(cell.min_x(), track.min_y()),
                Point::new(cell.min_x(), track.max_y()),
                &grid,
            );
        }
    }
    sketch.line(
        RenderLayer::Grid,
        Point::new(track.min_x(), track.min_y()),
        Point::new(track.max_x(), track.min_y()),
        &grid,
    );
}

pub fn gantt(chart: &GanttChart, sketch: &mut Sketch, ctx: &RenderContext<'_>) {
    let Some(span) = Span::of(&chart.tasks) else {
        common::placeholder(sketch, ctx, "gantt chart without tasks");
        return;
    };

    let (labels, header, track) = frame(sketch.clip(), !chart.periods.is_empty());
    draw_periods(sketch, ctx, &chart.periods, header, track);

    let rows = track.split_rows(chart.tasks.len(), 4.0);
    let label_style = ctx.text_style(14.0);
    for (index, (task, row)) in chart.tasks.iter().zip(&rows).enumerate() {
        let label_row = Bounds::new_from_top_left(
            Point::new(labels.min_x(), row.min_y()),
            Size::new(labels.width(), row.height()),
        );
        common::line_label(sketch, &label_style, &task.label, label_row, VerticalAlign::Middle);

        let Some(bounds) = interval(task) else {
            continue;
        };
        let (x, width) = bar_extent(&span, *row, bounds);
        let height = (row.height() * 0.7).min(MAX_BAR_HEIGHT);
        let bar = Bounds::new_from_top_left(
            Point::new(x, row.center().y() - height / 2.0),
            Size::new(width, height),
        );
        sketch.rect(
            RenderLayer::Content,
            bar,
            &ShapeStyle::filled(ctx.theme().series_color(index)),
            4.0,
        );
    }
}

pub fn roadmap(roadmap: &Roadmap, sketch: &mut Sketch, ctx: &RenderContext<'_>) {
    let Some(span) = Span::of(roadmap.lanes.iter().flat_map(|lane| &lane.items)) else {
        if roadmap.lanes.is_empty() {
            common::placeholder(sketch, ctx, "roadmap without lanes");
            return;
        }
        // Lanes without dated items still show their names.
        let (labels, _, _) = frame(sketch.clip(), false);
        let style = ctx.text_style(14.0);
        let rows = labels.split_rows(roadmap.lanes.len(), LANE_GAP);
        for (lane, row) in roadmap.lanes.iter().zip(rows) {
            common::line_label(sketch, &style, &lane.name, row, VerticalAlign::Middle);
        }
        return;
    };

    let (labels, header, track) = frame(sketch.clip(), !roadmap.periods.is_empty());
    let packed: Vec<(Vec<usize>, usize)> =
        roadmap.lanes.iter().map(|lane| pack_rows(&lane.items)).collect();
    let weights: Vec<f32> = packed.iter().map(|(_, rows)| *rows as f32).collect();

    let lane_heights = stack_heights(track.height(), &weights, LANE_GAP);

    let name_style = ctx.text_style(14.0).with_weight(FontWeight::Bold);
    let mut y = track.min_y();
    for (lane_index, ((lane, (rows, row_count)), height)) in roadmap
        .lanes
        .iter()
        .zip(&packed)
        .zip(&lane_heights)
        .enumerate()
    {
        let lane_track = Bounds::new_from_top_left(
            Point::new(track.min_x(), y),
            Size::new(track.width(), *height),
        );
        let lane_label = Bounds::new_from_top_left(
            Point::new(labels.min_x(), y),
            Size::new(labels.width(), *height),
        );
        y += height + LANE_GAP;

        if lane_index % 2 == 0 {
            sketch.rect(
                RenderLayer::Background,
                lane_track,
                &ShapeStyle::filled(ctx.theme().surface()),
                4.0,
            );
        }
        common::label(
            sketch,
            &name_style,
            &lane.name,
            lane_label.shrink(Insets::symmetric(2.0, 4.0)),
            &[14.0, 13.0, SMALL_FONT_SIZE, 11.0],
            VerticalAlign::Middle,
        );

        let sub_rows = lane_track.split_rows(*row_count, 2.0);
        let fill = ctx.theme().series_color(lane_index);
        for (item, row_index) in lane.items.iter().zip(rows) {
            let (Some(bounds), Some(row)) = (interval(item), sub_rows.get(*row_index)) else {
                continue;
            };
            let (x, width) = bar_extent(&span, *row, bounds);
            let height = (row.height() * 0.8).min(MAX_BAR_HEIGHT);
            let bar = Bounds::new_from_top_left(
                Point::new(x, row.center().y() - height / 2.0),
                Size::new(width, height),
            );
            sketch.rect(RenderLayer::Content, bar, &ShapeStyle::filled(fill), 6.0);
            common::shape_label(
                sketch,
                ctx,
                &item.label,
                bar.shrink(Insets::symmetric(1.0, 6.0)),
                fill,
                None,
            );
        }
    }

    draw_periods(sketch, ctx, &roadmap.periods, header, track);
}
