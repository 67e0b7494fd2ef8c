//! 2×2 matrix with optional axis labels and plotted items.

use log::debug;

use slidegraph_core::{
    draw::{
        FontWeight, RenderLayer, ShapeStyle, Sketch, StrokeDefinition, TextAnchor, VerticalAlign,
    },
    geometry::{Bounds, Insets, Point, Size},
    text_layout::LABEL_LADDER,
};

use super::{
    RenderContext,
    common::{self, SMALL_FONT_SIZE},
};
use crate::model::MatrixChart;

const QUADRANTS: usize = 4;

const Y_AXIS_STRIP: f32 = 84.0;

const X_AXIS_STRIP: f32 = 26.0;

const CELL_GAP: f32 = 6.0;

const ITEM_RADIUS: f32 = 6.0;

const ITEM_LABEL_WIDTH: f32 = 140.0;

const ITEM_LABEL_HEIGHT: f32 = 18.0;

/// Maps a unit coordinate into `0..=1`; non-finite input lands in the middle.
fn unit(value: f64) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, 1.0) as f32
    } else {
        0.5
    }
}

/// Splits `plot` into the four quadrant cells, row-major from the top-left.
fn cells(plot: Bounds) -> Vec<Bounds> {
    plot.split_rows(2, CELL_GAP)
        .into_iter()
        .flat_map(|row| row.split_columns(2, CELL_GAP))
        .collect()
}

pub fn render(chart: &MatrixChart, sketch: &mut Sketch, ctx: &RenderContext<'_>) {
    if chart.quadrants.is_empty() && chart.items.is_empty() {
        common::placeholder(sketch, ctx, "matrix without quadrants or items");
        return;
    }
    if chart.quadrants.len() > QUADRANTS {
        debug!(quadrants = chart.quadrants.len(); "Matrix keeps the first four quadrants");
    }

    let area = sketch.clip();
    let mut plot = area;
    if chart.y_axis.is_some() {
        plot = plot.right_of(Y_AXIS_STRIP.min(area.width() * 0.2), 0.0);
    }
    if chart.x_axis.is_some() {
        plot = plot.take_top((plot.height() - X_AXIS_STRIP).max(0.0));
    }

    let title_style = ctx.text_style(16.0).with_weight(FontWeight::Bold);
    let description_style = ctx.muted_style(14.0);
    for (index, cell) in cells(plot).into_iter().enumerate() {
        let fill = ctx.theme().series_color(index).with_alpha(0.12);
        sketch.rect(RenderLayer::Background, cell, &ShapeStyle::filled(fill), 6.0);

        let Some(quadrant) = chart.quadrants.get(index) else {
            continue;
        };
        let inner = cell.shrink(Insets::uniform(12.0));
        let title_box = inner.take_top(inner.height().min(44.0));
        let placed = common::label(
            sketch,
            &title_style,
            &quadrant.label,
            title_box,
            LABEL_LADDER,
            VerticalAlign::Top,
        );
        if let Some(description) = quadrant.description.as_deref() {
            let used = placed.map_or(0.0, |b| b.height());
            let rest = inner.below(used, 4.0);
            common::label(
                sketch,
                &description_style,
                description,
                rest,
                &[14.0, 13.0, SMALL_FONT_SIZE, 11.0],
                VerticalAlign::Top,
            );
        }
    }

    let axis_style = ctx.muted_style(SMALL_FONT_SIZE);
    if let Some(axis) = &chart.y_axis {
        let strip = Bounds::new_from_top_left(
            Point::new(area.min_x(), plot.min_y()),
            Size::new((plot.min_x() - area.min_x() - 8.0).max(0.0), plot.height()),
        );
        let style = axis_style.clone().with_anchor(TextAnchor::End);
        common::label(sketch, &style, &axis.high, strip, LABEL_LADDER, VerticalAlign::Top);
        common::label(sketch, &style, &axis.low, strip, LABEL_LADDER, VerticalAlign::Bottom);
    }
    if let Some(axis) = &chart.x_axis {
        let strip = Bounds::new_from_top_left(
            Point::new(plot.min_x(), plot.max_y()),
            Size::new(plot.width(), (area.max_y() - plot.max_y()).max(0.0)),
        );
        let arrow_y = strip.min_y() + 4.0;
        sketch.arrow(
            Point::new(strip.min_x(), arrow_y),
            Point::new(strip.max_x(), arrow_y),
            &StrokeDefinition::solid(ctx.theme().neutral(), 1.0),
            6.0,
            false,
        );
        let labels = strip.below(8.0, 0.0);
        let (left, right) = labels.split_horizontal(0.5, 8.0);
        common::line_label(sketch, &axis_style, &axis.low, left, VerticalAlign::Top);
        let style = axis_style.clone().with_anchor(TextAnchor::End);
        common::line_label(sketch, &style, &axis.high, right, VerticalAlign::Top);
    }

    let label_style = ctx.text_style(SMALL_FONT_SIZE);
    for (index, item) in chart.items.iter().enumerate() {
        let range = plot.shrink(Insets::uniform(ITEM_RADIUS));
        let position = Point::new(
            range.min_x() + unit(item.x) * range.width(),
            range.max_y() - unit(item.y) * range.height(),
        );
        let color = ctx.theme().series_color(index);
        sketch.circle(RenderLayer::Marker, position, ITEM_RADIUS, &ShapeStyle::filled(color));

        let label_box = common::shift_into(
            Bounds::new_from_top_left(
                Point::new(
                    position.x() + ITEM_RADIUS + 4.0,
                    position.y() - ITEM_LABEL_HEIGHT / 2.0,
                ),
                Size::new(ITEM_LABEL_WIDTH, ITEM_LABEL_HEIGHT),
            ),
            plot,
        );
        common::line_label(sketch, &label_style, &item.label, label_box, VerticalAlign::Middle);
    }
}
