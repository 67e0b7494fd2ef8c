//! Radar (spider) chart.

use std::f32::consts::TAU;

use slidegraph_core::{
    color::Color,
    draw::{RenderLayer, ShapeStyle, Sketch, StrokeDefinition, VerticalAlign},
    geometry::{Bounds, Point, Size},
};

use super::{
    RenderContext,
    common::{self, LEGEND_HEIGHT, SMALL_FONT_SIZE, format_value},
};
use crate::model::RadarChart;

const RINGS: usize = 4;

const AXIS_LABEL_WIDTH: f32 = 120.0;

const AXIS_LABEL_HEIGHT: f32 = 20.0;

/// Gap between the outer ring and the axis labels.
const LABEL_GAP: f32 = 8.0;

/// Returns the value that maps to the outer ring.
///
/// An explicit positive maximum wins; otherwise the largest finite value,
/// and `1` when nothing positive is plotted.
fn scale_max(chart: &RadarChart) -> f64 {
    if let Some(max) = chart.max.filter(|m| m.is_finite() && *m > 0.0) {
        return max;
    }
    chart
        .series
        .iter()
        .flat_map(|s| s.values.iter().copied())
        .filter(|v| v.is_finite() && *v > 0.0)
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))))
        .unwrap_or(1.0)
}

/// Normalises a value into `0..=1` of the outer ring.
fn ratio(value: f64, max: f64) -> f32 {
    if !value.is_finite() {
        return 0.0;
    }
    (value / max).clamp(0.0, 1.0) as f32
}

fn axis_angle(index: usize, count: usize) -> f32 {
    TAU * index as f32 / count as f32
}

pub fn render(chart: &RadarChart, sketch: &mut Sketch, ctx: &RenderContext<'_>) {
    let count = chart.axes.len();
    if count < 3 {
        common::placeholder(sketch, ctx, "radar chart needs at least three axes");
        return;
    }

    let area = sketch.clip();
    let with_legend = chart.series.len() > 1;
    let plot_area = if with_legend {
        area.take_top((area.height() - LEGEND_HEIGHT - 4.0).max(0.0))
    } else {
        area
    };
    let center = plot_area.center();
    let radius = (plot_area.width() / 2.0 - AXIS_LABEL_WIDTH - LABEL_GAP)
        .min(plot_area.height() / 2.0 - AXIS_LABEL_HEIGHT - LABEL_GAP)
        .max(0.0);

    let grid = common::grid_stroke(ctx);
    for ring in 1..=RINGS {
        let r = radius * ring as f32 / RINGS as f32;
        let points: Vec<Point> = (0..count)
            .map(|i| center.polar(r, axis_angle(i, count)))
            .collect();
        sketch.polygon(RenderLayer::Grid, &points, &ShapeStyle::outlined(grid.clone()));
    }
    for i in 0..count {
        sketch.line(RenderLayer::Grid, center, center.polar(radius, axis_angle(i, count)), &grid);
    }

    let max = scale_max(chart);
    for (index, series) in chart.series.iter().enumerate() {
        let color = ctx.theme().series_color(index);
        let points: Vec<Point> = (0..count)
            .map(|i| {
                let value = series.values.get(i).copied().unwrap_or(0.0);
                center.polar(radius * ratio(value, max), axis_angle(i, count))
            })
            .collect();
        let style = ShapeStyle::filled(color.with_alpha(0.2))
            .with_stroke(Some(StrokeDefinition::solid(color, 2.0)));
        sketch.polygon(RenderLayer::Content, &points, &style);
        for point in &points {
            sketch.circle(RenderLayer::Marker, *point, 3.0, &ShapeStyle::filled(color));
        }
    }

    let style = ctx.centered_style(SMALL_FONT_SIZE);
    for (i, axis) in chart.axes.iter().enumerate() {
        let angle = axis_angle(i, count);
        let anchor = center.polar(radius + LABEL_GAP, angle);
        // Push the box outward so it never covers the ring it labels.
        let offset = Point::new(
            angle.sin() * AXIS_LABEL_WIDTH / 2.0,
            -angle.cos() * AXIS_LABEL_HEIGHT / 2.0,
        );
        let label_box = common::shift_into(
            Bounds::new_from_center(
                anchor.add_point(offset),
                Size::new(AXIS_LABEL_WIDTH, AXIS_LABEL_HEIGHT),
            ),
            plot_area,
        );
        common::line_label(sketch, &style, axis, label_box, VerticalAlign::Middle);
    }

    let tick_style = ctx.muted_style(11.0);
    let tick_box = Bounds::new_from_top_left(
        Point::new(center.x() + 4.0, center.y() - radius - 2.0),
        Size::new(48.0, 16.0),
    );
    common::line_label(
        sketch,
        &tick_style,
        &format_value(max),
        common::shift_into(tick_box, plot_area),
        VerticalAlign::Top,
    );

    if with_legend {
        let names: Vec<String> = chart
            .series
            .iter()
            .enumerate()
            .map(|(i, s)| {
                if s.name.trim().is_empty() {
                    format!("Series {}", i + 1)
                } else {
                    s.name.clone()
                }
            })
            .collect();
        let entries: Vec<(&str, Color)> = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.as_str(), ctx.theme().series_color(i)))
            .collect();
        common::legend(sketch, ctx, &entries, area.take_bottom(LEGEND_HEIGHT));
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use serde_json::json;

    use super::*;
    use crate::render::{
        common::PLACEHOLDER_TEXT,
        test_support::{assert_finite, markup, render},
    };

    fn chart(max: Option<f64>, values: Vec<f64>) -> RadarChart {
        serde_json::from_value(json!({
            "axes": ["A", "B", "C"],
            "series": [{ "name": "S", "values": values }],
            "max": max
        }))
        .unwrap()
    }

    #[test]
    fn test_scale_max() {
        assert_approx_eq!(f64, scale_max(&chart(Some(10.0), vec![3.0, 4.0, 5.0])), 10.0);
        assert_approx_eq!(f64, scale_max(&chart(None, vec![3.0, 8.0, 5.0])), 8.0);
        assert_approx_eq!(f64, scale_max(&chart(Some(-1.0), vec![0.0, -2.0])), 1.0);
    }

    #[test]
    fn test_ratio_clamps() {
        assert_approx_eq!(f32, ratio(5.0, 10.0), 0.5);
        assert_approx_eq!(f32, ratio(15.0, 10.0), 1.0);
        assert_approx_eq!(f32, ratio(-3.0, 10.0), 0.0);
        assert_approx_eq!(f32, ratio(f64::NAN, 10.0), 0.0);
    }

    #[test]
    fn test_radar_rings_and_series() {
        let svg = markup(render(json!({
            "type": "radar-chart",
            "axes": ["Speed", "Cost", "Quality", "Reach", "Support"],
            "series": [
                { "name": "Us", "values": [4, 3, 5, 2, 4] },
                { "name": "Them", "values": [3, 4, 3, 4] }
            ]
        })));
        // four rings plus one polygon per series
        assert_eq!(svg.matches("<path").count(), RINGS + 2);
        assert_eq!(svg.matches("<circle").count(), 10);
        assert!(svg.contains("Quality"));
        assert!(svg.contains("Them"));
        assert_finite(&svg);
    }

    #[test]
    fn test_too_few_axes_placeholder() {
        let svg = markup(render(json!({
            "type": "radar-chart",
            "axes": ["A", "B"],
            "series": [{ "name": "S", "values": [1, 2] }]
        })));
        assert!(svg.contains(PLACEHOLDER_TEXT));
    }
}
