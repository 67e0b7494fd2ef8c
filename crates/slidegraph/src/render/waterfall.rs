//! Waterfall (bridge) chart renderer.

use slidegraph_core::{
    color::Color,
    draw::{RenderLayer, ShapeStyle, Sketch, StrokeDefinition, TextAnchor, VerticalAlign},
    geometry::{Bounds, Point, Size},
};

use super::{
    RenderContext,
    common::{self, LinearScale, SMALL_FONT_SIZE, finite, format_signed, format_value},
};
use crate::model::WaterfallChart;

const VALUE_BAND: f32 = 22.0;

const CATEGORY_BAND: f32 = 36.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BarKind {
    Start,
    Increase,
    Decrease,
    Total,
}

/// One bar spanning `from..to` in data units.
#[derive(Debug, Clone, PartialEq)]
struct Bar<'a> {
    label: &'a str,
    from: f64,
    to: f64,
    kind: BarKind,
}

impl Bar<'_> {
    fn value_text(&self) -> String {
        match self.kind {
            BarKind::Start | BarKind::Total => format_value(self.to),
            BarKind::Increase | BarKind::Decrease => format_signed(self.to - self.from),
        }
    }
}

/// Returns the cumulative level after each delta.
fn running_totals(start: f64, deltas: impl IntoIterator<Item = f64>) -> Vec<f64> {
    deltas
        .into_iter()
        .scan(finite(start), |level, delta| {
            *level += finite(delta);
            Some(*level)
        })
        .collect()
}

fn bars(chart: &WaterfallChart) -> Vec<Bar<'_>> {
    let start = finite(chart.start);
    let mut bars = Vec::with_capacity(chart.deltas.len() + 2);
    if start != 0.0 || chart.start_label.is_some() {
        bars.push(Bar {
            label: chart.start_label.as_deref().unwrap_or("Start"),
            from: 0.0,
            to: start,
            kind: BarKind::Start,
        });
    }

    let totals = running_totals(start, chart.deltas.iter().map(|d| d.value));
    let mut level = start;
    for (delta, total) in chart.deltas.iter().zip(&totals) {
        let kind = if *total >= level {
            BarKind::Increase
        } else {
            BarKind::Decrease
        };
        bars.push(Bar {
            label: &delta.label,
            from: level,
            to: *total,
            kind,
        });
        level = *total;
    }

    if chart.show_total && !chart.deltas.is_empty() {
        bars.push(Bar {
            label: chart.total_label.as_deref().unwrap_or("Total"),
            from: 0.0,
            to: level,
            kind: BarKind::Total,
        });
    }
    bars
}

fn color_for(ctx: &RenderContext<'_>, kind: BarKind) -> Color {
    match kind {
        BarKind::Start | BarKind::Total => ctx.theme().primary(),
        BarKind::Increase => ctx.theme().positive(),
        BarKind::Decrease => ctx.theme().negative(),
    }
}

pub fn render(chart: &WaterfallChart, sketch: &mut Sketch, ctx: &RenderContext<'_>) {
    let bars = bars(chart);
    if bars.is_empty() {
        common::placeholder(sketch, ctx, "waterfall without deltas");
        return;
    }

    let area = sketch.clip();
    let plot = area.below(VALUE_BAND, 0.0);
    let plot = plot.take_top((plot.height() - CATEGORY_BAND).max(0.0));
    let categories = area.take_bottom(CATEGORY_BAND.min(area.height()));
    let scale = LinearScale::zero_based(
        bars.iter().flat_map(|bar| [bar.from, bar.to]),
        plot.max_y(),
        plot.min_y(),
    );

    let baseline = scale.zero();
    sketch.line(
        RenderLayer::Grid,
        Point::new(plot.min_x(), baseline),
        Point::new(plot.max_x(), baseline),
        &common::grid_stroke(ctx),
    );

    let columns = plot.split_columns(bars.len(), 12.0);
    let value_style = ctx.centered_style(SMALL_FONT_SIZE);
    let category_style = ctx.muted_style(SMALL_FONT_SIZE).with_anchor(TextAnchor::Middle);
    let connector = StrokeDefinition::dashed(ctx.theme().neutral(), 1.0);

    let mut previous: Option<(f32, f64)> = None;
    for (bar, column) in bars.iter().zip(&columns) {
        let width = column.width() * 0.7;
        let top = scale.map(bar.from.max(bar.to));
        let bottom = scale.map(bar.from.min(bar.to));
        let rect = Bounds::new_from_top_left(
            Point::new(column.center().x() - width / 2.0, top),
            Size::new(width, (bottom - top).max(0.0)),
        );
        sketch.rect(
            RenderLayer::Content,
            rect,
            &ShapeStyle::filled(color_for(ctx, bar.kind)),
            2.0,
        );

        if let Some((previous_right, level)) = previous {
            let y = scale.map(level);
            sketch.line(
                RenderLayer::Connector,
                Point::new(previous_right, y),
                Point::new(rect.min_x(), y),
                &connector,
            );
        }
        previous = Some((rect.max_x(), bar.to));

        let value_box = Bounds::new_from_top_left(
            Point::new(column.min_x(), (rect.min_y() - VALUE_BAND).max(area.min_y())),
            Size::new(column.width(), VALUE_BAND),
        );
        common::line_label(sketch, &value_style, &bar.value_text(), value_box, VerticalAlign::Bottom);

        let category_box = Bounds::new_from_top_left(
            Point::new(column.min_x(), categories.min_y()),
            Size::new(column.width(), categories.height()),
        );
        common::label(
            sketch,
            &category_style,
            bar.label,
            category_box,
            &[SMALL_FONT_SIZE, 11.0],
            VerticalAlign::Top,
        );
    }
}
