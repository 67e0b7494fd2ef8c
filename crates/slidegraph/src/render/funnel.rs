//! Funnel and pyramid charts: stacks of trapezoids.
//!
//! A funnel narrows top-down; a pyramid widens from a triangular apex. Both
//! label each band inside when the text fits and beside the band otherwise.

use slidegraph_core::{
    color::Color,
    draw::{RenderLayer, ShapeStyle, Sketch, VerticalAlign},
    geometry::{Bounds, Insets, Point, Size},
    text_layout::LABEL_LADDER,
};

use super::{
    RenderContext,
    common::{self, SMALL_FONT_SIZE, format_value},
};
use crate::model::{FunnelChart, PyramidChart};

/// Width of the narrowest funnel edge relative to the widest.
const FUNNEL_NECK: f32 = 0.35;

const BAND_GAP: f32 = 6.0;

/// Share of the slot given to the band shapes; the rest holds side text.
const SHAPE_SHARE: f32 = 0.66;

const DESCRIPTION_LADDER: &[f32] = &[16.0, 14.0, 13.0, SMALL_FONT_SIZE, 11.0];

/// The four corners of a band centered on `center_x`, clockwise from top-left.
fn trapezoid(center_x: f32, row: Bounds, top_width: f32, bottom_width: f32) -> Vec<Point> {
    let (top, bottom) = (top_width / 2.0, bottom_width / 2.0);
    if top <= 0.0 {
        return vec![
            Point::new(center_x, row.min_y()),
            Point::new(center_x + bottom, row.max_y()),
            Point::new(center_x - bottom, row.max_y()),
        ];
    }
    vec![
        Point::new(center_x - top, row.min_y()),
        Point::new(center_x + top, row.min_y()),
        Point::new(center_x + bottom, row.max_y()),
        Point::new(center_x - bottom, row.max_y()),
    ]
}

/// Returns the top and bottom width of funnel stage `index` of `count`.
fn funnel_widths(index: usize, count: usize, full: f32) -> (f32, f32) {
    let step = (1.0 - FUNNEL_NECK) / count as f32;
    (
        full * (1.0 - step * index as f32),
        full * (1.0 - step * (index + 1) as f32),
    )
}

/// Conversion from the previous stage, when both values are usable.
fn conversion(previous: Option<f64>, current: Option<f64>) -> Option<f64> {
    match (previous, current) {
        (Some(prev), Some(cur)) if prev.is_finite() && cur.is_finite() && prev > 0.0 => {
            Some(cur / prev)
        }
        _ => None,
    }
}

fn band_fill(ctx: &RenderContext<'_>, index: usize, count: usize) -> Color {
    // Darker bands first, lightening towards the end of the stack.
    let amount = if count > 1 {
        0.45 * index as f32 / (count - 1) as f32
    } else {
        0.0
    };
    ctx.theme().primary().tint(amount)
}

pub fn funnel(chart: &FunnelChart, sketch: &mut Sketch, ctx: &RenderContext<'_>) {
    let count = chart.stages.len();
    if count == 0 {
        common::placeholder(sketch, ctx, "funnel without stages");
        return;
    }

    let area = sketch.clip();
    let (shape_area, side_area) = area.split_horizontal(SHAPE_SHARE, 24.0);
    let rows = shape_area.split_rows(count, BAND_GAP);
    let side_rows = side_area.split_rows(count, BAND_GAP);
    let center_x = shape_area.center().x();
    let value_style = ctx.text_style(14.0);

    let mut previous = None;
    for (index, (stage, (row, side))) in chart
        .stages
        .iter()
        .zip(rows.iter().zip(&side_rows))
        .enumerate()
    {
        let (top, bottom) = funnel_widths(index, count, shape_area.width());
        let fill = band_fill(ctx, index, count);
        sketch.polygon(
            RenderLayer::Content,
            &trapezoid(center_x, *row, top, bottom),
            &ShapeStyle::filled(fill),
        );

        let inside = Bounds::new_from_center(row.center(), Size::new(bottom * 0.9, row.height()))
            .shrink(Insets::symmetric(2.0, 4.0));
        let label_side = side.take_top(side.height() * 0.55);
        let value_side = side.below(label_side.height(), 0.0);
        let moved = common::fit_in(&stage.label, inside, LABEL_LADDER)
            .is_none_or(|fitted| fitted.truncated());
        common::shape_label(sketch, ctx, &stage.label, inside, fill, Some(label_side));

        let value = stage.value.filter(|v| v.is_finite());
        if let Some(value) = value {
            let text = match conversion(previous, Some(value)) {
                Some(rate) => format!("{} ({:.0}%)", format_value(value), rate * 100.0),
                None => format_value(value),
            };
            let (target, valign) = if moved {
                (value_side, VerticalAlign::Top)
            } else {
                (*side, VerticalAlign::Middle)
            };
            common::line_label(sketch, &value_style, &text, target, valign);
        }
        previous = value;
    }
}

pub fn pyramid(chart: &PyramidChart, sketch: &mut Sketch, ctx: &RenderContext<'_>) {
    let count = chart.levels.len();
    if count == 0 {
        common::placeholder(sketch, ctx, "pyramid without levels");
        return;
    }

    let area = sketch.clip();
    let has_descriptions = chart
        .levels
        .iter()
        .any(|level| level.description.as_deref().is_some_and(|d| !d.trim().is_empty()));
    let (shape_area, side_area) = if has_descriptions {
        let (shapes, side) = area.split_horizontal(SHAPE_SHARE, 24.0);
        (shapes, Some(side))
    } else {
        (area, None)
    };

    let rows = shape_area.split_rows(count, BAND_GAP);
    let center_x = shape_area.center().x();
    let height = shape_area.height().max(1.0);
    let width_at =
        |y: f32| shape_area.width() * ((y - shape_area.min_y()) / height).clamp(0.0, 1.0);
    let description_style = ctx.muted_style(14.0);

    for (index, (level, row)) in chart.levels.iter().zip(&rows).enumerate() {
        let top = if index == 0 { 0.0 } else { width_at(row.min_y()) };
        let bottom = width_at(row.max_y());
        let fill = band_fill(ctx, count - 1 - index, count);
        sketch.polygon(
            RenderLayer::Content,
            &trapezoid(center_x, *row, top, bottom),
            &ShapeStyle::filled(fill),
        );

        // The widest rectangle that stays inside the band's slanted sides
        // sits at its upper edge width, narrowed further for the apex.
        let inner_width = if index == 0 { bottom * 0.45 } else { top * 0.9 };
        let inside = Bounds::new_from_center(row.center(), Size::new(inner_width, row.height()))
            .shrink(Insets::symmetric(2.0, 2.0));
        let beside = Bounds::new_from_top_left(
            Point::new(shape_area.min_x(), row.min_y()),
            Size::new(
                (center_x - bottom / 2.0 - 8.0 - shape_area.min_x()).max(0.0),
                row.height(),
            ),
        );
        let adjacent = (beside.width() > 0.0).then_some(beside);
        common::shape_label(sketch, ctx, &level.label, inside, fill, adjacent);

        if let (Some(side), Some(description)) = (side_area, level.description.as_deref()) {
            let side_row = Bounds::new_from_top_left(
                Point::new(side.min_x(), row.min_y()),
                Size::new(side.width(), row.height()),
            );
            common::label(
                sketch,
                &description_style,
                description,
                side_row,
                DESCRIPTION_LADDER,
                VerticalAlign::Middle,
            );
        }
    }
}
