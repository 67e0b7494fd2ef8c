//! Process flows, convergence (many inputs into one result) and divergence
//! (signed horizontal bars around a centered zero axis).

use slidegraph_core::{
    draw::{
        ChevronDefinition, RenderLayer, ShapeDefinition, ShapeStyle, Sketch, StrokeDefinition,
        TextAnchor, VerticalAlign,
    },
    geometry::{Bounds, Insets, Point, Size},
};

use super::{
    RenderContext,
    common::{self, LinearScale, SMALL_FONT_SIZE, finite, format_value},
};
use crate::model::{ConvergenceChart, DivergenceChart, FlowChart, FlowDirection};

const MAX_CHEVRON_HEIGHT: f32 = 96.0;

const MAX_BOX_HEIGHT: f32 = 72.0;

/// Vertical room between stacked boxes, holding the arrow.
const ARROW_GAP: f32 = 24.0;

const ARROW_HEAD: f32 = 8.0;

const DESCRIPTION_LADDER: &[f32] = &[16.0, 14.0, 13.0, SMALL_FONT_SIZE, 11.0];

pub fn flow_chart(chart: &FlowChart, sketch: &mut Sketch, ctx: &RenderContext<'_>) {
    if chart.steps.is_empty() {
        common::placeholder(sketch, ctx, "flow chart without steps");
        return;
    }
    match chart.direction {
        FlowDirection::Horizontal => horizontal_flow(chart, sketch, ctx),
        FlowDirection::Vertical => vertical_flow(chart, sketch, ctx),
    }
}

fn has_descriptions(chart: &FlowChart) -> bool {
    chart
        .steps
        .iter()
        .any(|step| step.description.as_deref().is_some_and(|d| !d.trim().is_empty()))
}

fn horizontal_flow(chart: &FlowChart, sketch: &mut Sketch, ctx: &RenderContext<'_>) {
    let area = sketch.clip();
    let described = has_descriptions(chart);
    let band_height = if described {
        MAX_CHEVRON_HEIGHT.min(area.height() * 0.4)
    } else {
        MAX_CHEVRON_HEIGHT.min(area.height())
    };
    let band = if described {
        area.take_top(band_height)
    } else {
        Bounds::new_from_center(area.center(), Size::new(area.width(), band_height))
    };
    let description_style = ctx.muted_style(14.0);

    for (index, (step, column)) in chart
        .steps
        .iter()
        .zip(band.split_columns(chart.steps.len(), 4.0))
        .enumerate()
    {
        let fill = ctx.theme().series_color(index);
        let chevron = ChevronDefinition::new(ShapeStyle::filled(fill)).with_leading(index == 0);
        sketch.shape(RenderLayer::Content, &chevron, column);
        let inside = chevron
            .content_bounds(column)
            .shrink(Insets::symmetric(4.0, 2.0));
        common::shape_label(sketch, ctx, &step.label, inside, fill, None);

        if let Some(description) = step.description.as_deref() {
            let below = Bounds::new_from_top_left(
                Point::new(column.min_x(), band.max_y()),
                Size::new(column.width(), area.max_y() - band.max_y()),
            )
            .shrink(Insets::new(12.0, 8.0, 0.0, 4.0));
            common::label(
                sketch,
                &description_style,
                description,
                below,
                DESCRIPTION_LADDER,
                VerticalAlign::Top,
            );
        }
    }
}

fn vertical_flow(chart: &FlowChart, sketch: &mut Sketch, ctx: &RenderContext<'_>) {
    let area = sketch.clip();
    let described = has_descriptions(chart);
    let (boxes, descriptions) = if described {
        let (left, right) = area.split_horizontal(0.38, 24.0);
        (left, Some(right))
    } else {
        let width = area.width().min(480.0);
        (Bounds::new_from_center(area.center(), Size::new(width, area.height())), None)
    };
    let rows = boxes.split_rows(chart.steps.len(), ARROW_GAP);
    let arrow = common::connector_stroke(ctx);
    let description_style = ctx.muted_style(14.0);

    let mut previous: Option<Bounds> = None;
    for (index, (step, row)) in chart.steps.iter().zip(&rows).enumerate() {
        let height = row.height().min(MAX_BOX_HEIGHT);
        let step_box = Bounds::new_from_center(row.center(), Size::new(row.width(), height));
        let fill = ctx.theme().series_color(index);
        sketch.rect(RenderLayer::Content, step_box, &ShapeStyle::filled(fill), 8.0);
        common::shape_label(
            sketch,
            ctx,
            &step.label,
            step_box.shrink(Insets::symmetric(4.0, 10.0)),
            fill,
            None,
        );

        if let Some(above) = previous {
            sketch.arrow(
                Point::new(above.center().x(), above.max_y()),
                Point::new(step_box.center().x(), step_box.min_y()),
                &arrow,
                ARROW_HEAD,
                false,
            );
        }
        previous = Some(step_box);

        if let (Some(column), Some(description)) = (descriptions, step.description.as_deref()) {
            let target = Bounds::new_from_top_left(
                Point::new(column.min_x(), row.min_y()),
                Size::new(column.width(), row.height()),
            );
            common::label(
                sketch,
                &description_style,
                description,
                target,
                DESCRIPTION_LADDER,
                VerticalAlign::Middle,
            );
        }
    }
}

pub fn convergence(chart: &ConvergenceChart, sketch: &mut Sketch, ctx: &RenderContext<'_>) {
    let inputs: Vec<&str> = chart
        .inputs
        .iter()
        .map(String::as_str)
        .filter(|input| !input.trim().is_empty())
        .collect();
    if inputs.is_empty() && chart.output.trim().is_empty() {
        common::placeholder(sketch, ctx, "convergence without inputs or output");
        return;
    }

    let area = sketch.clip();
    let columns = area.split_columns_weighted(&[0.3, 0.4, 0.3], 0.0);
    let (input_column, output_column) = (columns[0], columns[2]);
    let output_box = Bounds::new_from_center(
        output_column.center(),
        Size::new(output_column.width(), (area.height() * 0.4).min(120.0)),
    );
    let output_fill = ctx.theme().primary();
    sketch.rect(RenderLayer::Content, output_box, &ShapeStyle::filled(output_fill), 10.0);
    common::shape_label(
        sketch,
        ctx,
        &chart.output,
        output_box.shrink(Insets::uniform(10.0)),
        output_fill,
        None,
    );

    let arrow = common::connector_stroke(ctx);
    let target = Point::new(output_box.min_x(), output_box.center().y());
    for (index, (input, row)) in inputs
        .iter()
        .zip(input_column.split_rows(inputs.len(), 12.0))
        .enumerate()
    {
        let height = row.height().min(MAX_BOX_HEIGHT);
        let input_box = Bounds::new_from_center(row.center(), Size::new(row.width(), height));
        let fill = ctx.theme().surface();
        let outline = StrokeDefinition::solid(ctx.theme().series_color(index), 2.0);
        let style = ShapeStyle::filled(fill).with_stroke(Some(outline));
        sketch.rect(RenderLayer::Content, input_box, &style, 8.0);
        common::shape_label(
            sketch,
            ctx,
            input,
            input_box.shrink(Insets::symmetric(4.0, 8.0)),
            fill,
            None,
        );
        sketch.arrow(
            Point::new(input_box.max_x(), input_box.center().y()),
            target,
            &arrow,
            ARROW_HEAD,
            false,
        );
    }
}

pub fn divergence(chart: &DivergenceChart, sketch: &mut Sketch, ctx: &RenderContext<'_>) {
    if chart.items.is_empty() {
        common::placeholder(sketch, ctx, "divergence chart without items");
        return;
    }

    let area = sketch.clip();
    let labels = area.take_left((area.width() * 0.22).min(220.0));
    let plot = area.right_of(labels.width(), 12.0);
    let magnitude = chart
        .items
        .iter()
        .map(|item| finite(item.value).abs())
        .fold(0.0_f64, f64::max);
    let magnitude = if magnitude > 0.0 { magnitude } else { 1.0 };
    let scale = LinearScale::new(-magnitude, magnitude, plot.min_x(), plot.max_x());
    let zero = scale.zero();

    sketch.line(
        RenderLayer::Grid,
        Point::new(zero, plot.min_y()),
        Point::new(zero, plot.max_y()),
        &common::grid_stroke(ctx),
    );

    let label_style = ctx.text_style(14.0);
    let value_style = ctx.text_style(SMALL_FONT_SIZE);
    let rows = plot.split_rows(chart.items.len(), 6.0);
    for (item, row) in chart.items.iter().zip(&rows) {
        let label_row = Bounds::new_from_top_left(
            Point::new(labels.min_x(), row.min_y()),
            Size::new(labels.width(), row.height()),
        );
        common::label(
            sketch,
            &label_style,
            &item.label,
            label_row,
            &[14.0, 13.0, SMALL_FONT_SIZE, 11.0],
            VerticalAlign::Middle,
        );

        let value = finite(item.value);
        let end = scale.map(value);
        let height = (row.height() * 0.7).min(36.0);
        let bar = Bounds::new_from_top_left(
            Point::new(zero.min(end), row.center().y() - height / 2.0),
            Size::new((end - zero).abs(), height),
        );
        let fill = if value < 0.0 {
            ctx.theme().negative()
        } else {
            ctx.theme().positive()
        };
        if bar.width() > 0.0 {
            sketch.rect(RenderLayer::Content, bar, &ShapeStyle::filled(fill), 3.0);
        }

        // Values go beyond the bar end, or inside the bar when it reaches the edge.
        let text = format_value(value);
        let outside = if value < 0.0 {
            Bounds::new_from_top_left(
                Point::new(plot.min_x(), bar.min_y()),
                Size::new((bar.min_x() - plot.min_x() - 4.0).max(0.0), height),
            )
        } else {
            Bounds::new_from_top_left(
                Point::new(bar.max_x() + 4.0, bar.min_y()),
                Size::new((plot.max_x() - bar.max_x() - 4.0).max(0.0), height),
            )
        };
        let anchored = if value < 0.0 {
            value_style.clone().with_anchor(TextAnchor::End)
        } else {
            value_style.clone()
        };
        if common::line_label(sketch, &anchored, &text, outside, VerticalAlign::Middle).is_none() {
            let inside = ctx.label_on(fill, SMALL_FONT_SIZE);
            common::line_label(sketch, &inside, &text, bar, VerticalAlign::Middle);
        }
    }
}
