//! Pie and donut charts.

use std::f32::consts::TAU;

use log::debug;

use slidegraph_core::{
    draw::{PathBuilder, RenderLayer, ShapeStyle, Sketch, StrokeDefinition, VerticalAlign},
    geometry::{Bounds, Insets, Point, Size},
};

use super::{
    RenderContext,
    common::{self, SMALL_FONT_SIZE},
};
use crate::model::PieChart;

/// Inner radius of the donut hole relative to the outer radius.
const DONUT_HOLE: f32 = 0.55;

/// Slices below this share carry their percentage only in the legend.
const MIN_LABELLED_SHARE: f64 = 0.06;

const LEGEND_ROW: f32 = 24.0;

/// Room for a legend swatch and the gap before its label.
const LEGEND_INDENT: f32 = 20.0;

/// A slice with its share of the total and its angular span.
#[derive(Debug, Clone, PartialEq)]
struct Slice<'a> {
    label: &'a str,
    share: f64,
    start: f32,
    end: f32,
    color_index: usize,
}

/// Computes slices from the positive, finite values; the rest are dropped.
fn slices(chart: &PieChart) -> Vec<Slice<'_>> {
    let positive: Vec<_> = chart
        .slices
        .iter()
        .enumerate()
        .filter(|(_, slice)| slice.value.is_finite() && slice.value > 0.0)
        .collect();
    let total: f64 = positive.iter().map(|(_, slice)| slice.value).sum();
    if total <= 0.0 || !total.is_finite() {
        return Vec::new();
    }

    let mut angle = 0.0_f32;
    positive
        .into_iter()
        .map(|(index, slice)| {
            let share = slice.value / total;
            let start = angle;
            angle += share as f32 * TAU;
            Slice {
                label: &slice.label,
                share,
                start,
                end: angle,
                color_index: index,
            }
        })
        .collect()
}

/// Formats a share as a whole percentage, with one decimal below 1%.
fn percent(share: f64) -> String {
    let value = share * 100.0;
    if value > 0.0 && value < 1.0 {
        format!("{value:.1}%")
    } else {
        format!("{value:.0}%")
    }
}

pub fn render(chart: &PieChart, sketch: &mut Sketch, ctx: &RenderContext<'_>) {
    let slices = slices(chart);
    if slices.is_empty() {
        common::placeholder(sketch, ctx, "pie chart without positive values");
        return;
    }
    let dropped = chart.slices.len() - slices.len();
    if dropped > 0 {
        debug!(dropped = dropped; "Ignoring non-positive pie slices");
    }

    let area = sketch.clip();
    let (pie_area, legend_area) = area.split_horizontal(0.6, 24.0);
    let square = pie_area.centered_square().shrink(Insets::uniform(4.0));
    let center = square.center();
    let radius = square.width() / 2.0;
    let separator = StrokeDefinition::solid(ctx.theme().background(), 2.0);

    if let [only] = slices.as_slice() {
        let fill = ctx.theme().series_color(only.color_index);
        sketch.circle(RenderLayer::Content, center, radius, &ShapeStyle::filled(fill));
    } else {
        for slice in &slices {
            let fill = ctx.theme().series_color(slice.color_index);
            let path = PathBuilder::new()
                .move_to(center)
                .line_to(center.polar(radius, slice.start))
                .arc_around(center, radius, slice.start, slice.end)
                .close();
            let style = ShapeStyle::filled(fill).with_stroke(Some(separator.clone()));
            sketch.path(RenderLayer::Content, path, &style);
        }
    }

    let label_radius = if chart.donut {
        sketch.circle(
            RenderLayer::Marker,
            center,
            radius * DONUT_HOLE,
            &ShapeStyle::filled(ctx.theme().background()),
        );
        radius * (1.0 + DONUT_HOLE) / 2.0
    } else {
        radius * 0.65
    };

    for slice in slices.iter().filter(|s| s.share >= MIN_LABELLED_SHARE) {
        let fill = ctx.theme().series_color(slice.color_index);
        let mid = if slices.len() == 1 { 0.0 } else { (slice.start + slice.end) / 2.0 };
        let anchor = if slices.len() == 1 && !chart.donut {
            center
        } else {
            center.polar(label_radius, mid)
        };
        let label_box = Bounds::new_from_center(anchor, Size::new(radius * 0.5, 24.0));
        let style = ctx.label_on(fill, SMALL_FONT_SIZE);
        common::line_label(sketch, &style, &percent(slice.share), label_box, VerticalAlign::Middle);
    }

    draw_legend(sketch, ctx, &slices, legend_area);
}

fn draw_legend(sketch: &mut Sketch, ctx: &RenderContext<'_>, slices: &[Slice<'_>], area: Bounds) {
    let rows = ((area.height() / LEGEND_ROW).floor() as usize).min(slices.len());
    if rows == 0 || area.width() < LEGEND_INDENT {
        return;
    }
    let block = Bounds::new_from_center(
        area.center(),
        Size::new(area.width(), rows as f32 * LEGEND_ROW),
    );
    let style = ctx.text_style(14.0);
    for (slice, row) in slices.iter().zip(block.split_rows(rows, 0.0)) {
        let swatch = Bounds::new_from_top_left(
            Point::new(row.min_x(), row.center().y() - 6.0),
            Size::new(12.0, 12.0),
        );
        sketch.rect(
            RenderLayer::Marker,
            swatch,
            &ShapeStyle::filled(ctx.theme().series_color(slice.color_index)),
            2.0,
        );
        let text = format!("{} ({})", slice.label, percent(slice.share));
        common::line_label(sketch, &style, &text, row.right_of(LEGEND_INDENT, 0.0), VerticalAlign::Middle);
    }
    if slices.len() > rows {
        debug!(hidden = slices.len() - rows; "Pie legend truncated");
    }
}
