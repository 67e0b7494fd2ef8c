//! Bar, stacked bar and line charts over categories.
//!
//! All three share one frame: an optional legend on top, value ticks on the
//! left, category labels below and a zero-anchored value axis, so negative
//! values extend below a baseline that always lies inside the plot.

use log::debug;

use slidegraph_core::{
    color::Color,
    draw::{
        RenderLayer, ShapeStyle, Sketch, StrokeCap, StrokeDefinition, StrokeJoin, TextAnchor,
        VerticalAlign,
    },
    geometry::{Bounds, Insets, Point, Size},
};

use super::{
    RenderContext,
    common::{self, LEGEND_HEIGHT, LinearScale, SMALL_FONT_SIZE, format_value},
};
use crate::model::SeriesChart;

const TICK_STRIP: f32 = 52.0;

const CATEGORY_BAND: f32 = 32.0;

/// Room above the plot for value labels.
const TOP_PAD: f32 = 20.0;

const TICK_COUNT: usize = 5;

/// The regions of an axis chart.
#[derive(Debug, Clone, Copy)]
struct Frame {
    plot: Bounds,
    ticks: Bounds,
    categories: Bounds,
    legend: Option<Bounds>,
}

impl Frame {
    fn new(area: Bounds, with_legend: bool) -> Self {
        let (legend, rest) = if with_legend {
            (
                Some(area.take_top(LEGEND_HEIGHT)),
                area.below(LEGEND_HEIGHT, 4.0),
            )
        } else {
            (None, area)
        };
        let body = rest.below(TOP_PAD, 0.0);
        let body = body.take_top((body.height() - CATEGORY_BAND).max(0.0));
        let ticks = body.take_left(TICK_STRIP.min(body.width() * 0.2));
        let plot = body.right_of(ticks.width(), 0.0);
        let categories = Bounds::new_from_top_left(
            Point::new(plot.min_x(), plot.max_y()),
            Size::new(plot.width(), (rest.max_y() - plot.max_y()).max(0.0)),
        );
        Self {
            plot,
            ticks,
            categories,
            legend,
        }
    }
}

/// The data of a series chart with non-finite values removed.
struct Data<'a> {
    chart: &'a SeriesChart,
    categories: usize,
}

impl<'a> Data<'a> {
    /// Returns `None` when there is nothing to plot.
    fn new(chart: &'a SeriesChart) -> Option<Self> {
        let longest = chart.series.iter().map(|s| s.values.len()).max().unwrap_or(0);
        let categories = chart.categories.len().max(longest);
        let has_values = chart
            .series
            .iter()
            .any(|s| s.values.iter().any(|v| v.is_finite()));
        (categories > 0 && has_values).then_some(Self { chart, categories })
    }

    fn value(&self, series: usize, category: usize) -> Option<f64> {
        self.chart
            .series
            .get(series)
            .and_then(|s| s.values.get(category))
            .copied()
            .filter(|v| v.is_finite())
    }

    fn category_label(&self, index: usize) -> &'a str {
        self.chart.categories.get(index).map_or("", String::as_str)
    }

    fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.chart
            .series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .filter(|v| v.is_finite())
    }

    fn series_count(&self) -> usize {
        self.chart.series.len()
    }
}

fn series_name(chart: &SeriesChart, index: usize) -> String {
    match chart.series.get(index).map(|s| s.name.trim()) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => format!("Series {}", index + 1),
    }
}

fn draw_legend(sketch: &mut Sketch, ctx: &RenderContext<'_>, chart: &SeriesChart, frame: &Frame) {
    let Some(bounds) = frame.legend else {
        return;
    };
    let names: Vec<String> = (0..chart.series.len()).map(|i| series_name(chart, i)).collect();
    let entries: Vec<(&str, Color)> = names
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), ctx.theme().series_color(i)))
        .collect();
    common::legend(sketch, ctx, &entries, bounds);
}

fn draw_axes(sketch: &mut Sketch, ctx: &RenderContext<'_>, frame: &Frame, scale: &LinearScale) {
    let grid = common::grid_stroke(ctx);
    let style = ctx.muted_style(SMALL_FONT_SIZE).with_anchor(TextAnchor::End);
    for tick in scale.ticks(TICK_COUNT) {
        let y = scale.map(tick);
        sketch.line(
            RenderLayer::Grid,
            Point::new(frame.plot.min_x(), y),
            Point::new(frame.plot.max_x(), y),
            &grid,
        );
        let label_box = Bounds::new_from_center(
            Point::new(frame.ticks.center().x(), y),
            Size::new((frame.ticks.width() - 6.0).max(0.0), 16.0),
        )
        .shrink(Insets::new(0.0, 2.0, 0.0, 0.0));
        common::line_label(sketch, &style, &format_value(tick), label_box, VerticalAlign::Middle);
    }
    sketch.line(
        RenderLayer::Grid,
        Point::new(frame.plot.min_x(), scale.zero()),
        Point::new(frame.plot.max_x(), scale.zero()),
        &StrokeDefinition::solid(ctx.theme().neutral(), 1.5),
    );
}

fn draw_categories(
    sketch: &mut Sketch,
    ctx: &RenderContext<'_>,
    data: &Data<'_>,
    frame: &Frame,
    columns: &[Bounds],
) {
    let style = ctx
        .muted_style(SMALL_FONT_SIZE)
        .with_anchor(TextAnchor::Middle);
    for (index, column) in columns.iter().enumerate() {
        let cell = Bounds::new_from_top_left(
            Point::new(column.min_x(), frame.categories.min_y() + 4.0),
            Size::new(column.width(), (frame.categories.height() - 4.0).max(0.0)),
        );
        common::label(
            sketch,
            &style,
            data.category_label(index),
            cell,
            &[SMALL_FONT_SIZE, 11.0],
            VerticalAlign::Top,
        );
    }
}

/// A bar between `zero` and `value_y`, whichever way it points.
fn bar_bounds(column: Bounds, zero: f32, value_y: f32) -> Bounds {
    let top = zero.min(value_y);
    Bounds::new_from_top_left(
        Point::new(column.min_x(), top),
        Size::new(column.width(), (zero - value_y).abs()),
    )
}

pub fn bar_chart(chart: &SeriesChart, sketch: &mut Sketch, ctx: &RenderContext<'_>) {
    let Some(data) = Data::new(chart) else {
        common::placeholder(sketch, ctx, "bar chart without values");
        return;
    };
    let frame = Frame::new(sketch.clip(), data.series_count() > 1);
    let scale = LinearScale::zero_based(data.values(), frame.plot.max_y(), frame.plot.min_y());
    draw_legend(sketch, ctx, chart, &frame);
    draw_axes(sketch, ctx, &frame, &scale);

    let columns = frame.plot.split_columns(data.categories, 16.0);
    draw_categories(sketch, ctx, &data, &frame, &columns);

    let zero = scale.zero();
    let value_style = ctx.centered_style(SMALL_FONT_SIZE);
    let show_values = data.series_count() == 1;
    for (category, column) in columns.iter().enumerate() {
        let inner = column.shrink(Insets::symmetric(0.0, column.width() * 0.1));
        let slots = inner.split_columns(data.series_count(), 2.0);
        for (series, slot) in slots.iter().enumerate() {
            let Some(value) = data.value(series, category) else {
                continue;
            };
            let bar = bar_bounds(*slot, zero, scale.map(value));
            let fill = ctx.theme().series_color(series);
            sketch.rect(RenderLayer::Content, bar, &ShapeStyle::filled(fill), 2.0);

            if show_values && value >= 0.0 {
                let label_box = Bounds::new_from_top_left(
                    Point::new(column.min_x(), bar.min_y() - TOP_PAD),
                    Size::new(column.width(), TOP_PAD),
                );
                common::line_label(
                    sketch,
                    &value_style,
                    &format_value(value),
                    label_box,
                    VerticalAlign::Bottom,
                );
            }
        }
    }
}

pub fn stacked_bar_chart(chart: &SeriesChart, sketch: &mut Sketch, ctx: &RenderContext<'_>) {
    let Some(data) = Data::new(chart) else {
        common::placeholder(sketch, ctx, "stacked bar chart without values");
        return;
    };
    let frame = Frame::new(sketch.clip(), data.series_count() > 1);

    let stacks: Vec<(f64, f64)> = (0..data.categories)
        .map(|category| {
            (0..data.series_count())
                .filter_map(|series| data.value(series, category))
                .fold((0.0, 0.0), |(pos, neg), v| {
                    if v >= 0.0 { (pos + v, neg) } else { (pos, neg + v) }
                })
        })
        .collect();
    let scale = LinearScale::zero_based(
        stacks.iter().flat_map(|&(pos, neg)| [pos, neg]),
        frame.plot.max_y(),
        frame.plot.min_y(),
    );
    draw_legend(sketch, ctx, chart, &frame);
    draw_axes(sketch, ctx, &frame, &scale);

    let columns = frame.plot.split_columns(data.categories, 16.0);
    draw_categories(sketch, ctx, &data, &frame, &columns);

    for (category, column) in columns.iter().enumerate() {
        let bar_column = column.shrink(Insets::symmetric(0.0, column.width() * 0.15));
        let (mut positive, mut negative) = (0.0_f64, 0.0_f64);
        for series in 0..data.series_count() {
            let Some(value) = data.value(series, category) else {
                continue;
            };
            let (from, to) = if value >= 0.0 {
                let from = positive;
                positive += value;
                (from, positive)
            } else {
                let from = negative;
                negative += value;
                (from, negative)
            };
            let segment = bar_bounds(bar_column, scale.map(from), scale.map(to));
            let fill = ctx.theme().series_color(series);
            sketch.rect(RenderLayer::Content, segment, &ShapeStyle::filled(fill), 0.0);
            let inner = segment.shrink(Insets::symmetric(2.0, 4.0));
            let text = format_value(value);
            if common::fit_in(&text, inner, &[SMALL_FONT_SIZE, 11.0]).is_some_and(|f| !f.truncated()) {
                common::shape_label(sketch, ctx, &text, inner, fill, None);
            }
        }
    }
    debug!(categories = data.categories, series = data.series_count(); "Stacked bars drawn");
}

pub fn line_chart(chart: &SeriesChart, sketch: &mut Sketch, ctx: &RenderContext<'_>) {
    let Some(data) = Data::new(chart) else {
        common::placeholder(sketch, ctx, "line chart without values");
        return;
    };
    let frame = Frame::new(sketch.clip(), data.series_count() > 1);
    let scale = LinearScale::zero_based(data.values(), frame.plot.max_y(), frame.plot.min_y());
    draw_legend(sketch, ctx, chart, &frame);
    draw_axes(sketch, ctx, &frame, &scale);

    let columns = frame.plot.split_columns(data.categories, 0.0);
    draw_categories(sketch, ctx, &data, &frame, &columns);

    for series in 0..data.series_count() {
        let color = ctx.theme().series_color(series);
        let mut stroke = StrokeDefinition::solid(color, 2.5);
        stroke.set_cap(StrokeCap::Round);
        stroke.set_join(StrokeJoin::Round);
        let mut run: Vec<Point> = Vec::new();
        for (category, column) in columns.iter().enumerate() {
            match data.value(series, category) {
                Some(value) => run.push(Point::new(column.center().x(), scale.map(value))),
                None => {
                    sketch.polyline(RenderLayer::Content, &run, &stroke);
                    run.clear();
                }
            }
        }
        sketch.polyline(RenderLayer::Content, &run, &stroke);

        let marker = ShapeStyle::filled(ctx.theme().background())
            .with_stroke(Some(StrokeDefinition::solid(color, 2.0)));
        for (category, column) in columns.iter().enumerate() {
            if let Some(value) = data.value(series, category) {
                let center = Point::new(column.center().x(), scale.map(value));
                let radius = 4.0_f32.min(column.width() / 2.0);
                sketch.circle(RenderLayer::Marker, center, radius, &marker);
            }
        }
    }
}
