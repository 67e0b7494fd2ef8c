//! Venn diagram of two or three overlapping sets.

use std::f32::consts::TAU;

use log::debug;

use slidegraph_core::{
    draw::{RenderLayer, ShapeStyle, Sketch, StrokeDefinition},
    geometry::{Bounds, Point, Size},
};

use super::{RenderContext, common};
use crate::model::VennDiagram;

const MAX_SETS: usize = 3;

/// Distance between circle centers and the diagram center, in radii.
const SPREAD: f32 = 0.6;

/// Room kept between the outermost stroke and the slot edge.
const EDGE: f32 = 2.0;

/// A circle of the diagram with the direction its label is pushed.
#[derive(Debug, Clone, Copy)]
struct Circle {
    center: Point,
    radius: f32,
    /// Unit vector pointing away from the overlap.
    outward: Point,
}

/// Places `count` (2 or 3) circles inside `area`; returns the circles and
/// the center of the common overlap.
fn circles(area: Bounds, count: usize) -> (Vec<Circle>, Point) {
    let center = area.center();
    if count == 2 {
        let radius = ((area.height() / 2.0).min(area.width() / (2.0 + 2.0 * SPREAD)) - EDGE)
            .max(0.0);
        let offset = radius * SPREAD;
        let circles = [-1.0_f32, 1.0]
            .into_iter()
            .map(|side| Circle {
                center: Point::new(center.x() + side * offset, center.y()),
                radius,
                outward: Point::new(side, 0.0),
            })
            .collect();
        return (circles, center);
    }

    // Three circles on a triangle; the triangle is shifted down so the
    // combined figure is vertically centered.
    let fit_height = area.height() / (2.0 + 1.5 * SPREAD);
    let fit_width = area.width() / (2.0 + 2.0 * SPREAD * (TAU / 3.0).sin());
    let radius = (fit_height.min(fit_width) - EDGE).max(0.0);
    let distance = radius * SPREAD;
    let middle = center.with_y(center.y() + distance / 4.0);
    let circles = (0..3)
        .map(|i| {
            let angle = TAU * i as f32 / 3.0;
            Circle {
                center: middle.polar(distance, angle),
                radius,
                outward: Point::new(angle.sin(), -angle.cos()),
            }
        })
        .collect();
    (circles, middle)
}

pub fn render(chart: &VennDiagram, sketch: &mut Sketch, ctx: &RenderContext<'_>) {
    if chart.sets.len() < 2 {
        common::placeholder(sketch, ctx, "venn diagram needs two or three sets");
        return;
    }
    if chart.sets.len() > MAX_SETS {
        debug!(sets = chart.sets.len(), kept = MAX_SETS; "Venn diagram truncated");
    }
    let sets = &chart.sets[..chart.sets.len().min(MAX_SETS)];

    let area = sketch.clip();
    let (circles, overlap) = circles(area, sets.len());
    let background = ctx.theme().background();

    for (index, circle) in circles.iter().enumerate() {
        let color = ctx.theme().series_color(index);
        let style = ShapeStyle::filled(color.with_alpha(0.35))
            .with_stroke(Some(StrokeDefinition::solid(color, 2.0)));
        sketch.circle(RenderLayer::Content, circle.center, circle.radius, &style);
    }

    for (set, circle) in sets.iter().zip(&circles) {
        let anchor = circle.center.add_point(circle.outward.scale(circle.radius * 0.4));
        let label_box = Bounds::new_from_center(
            anchor,
            Size::new(circle.radius * 0.8, circle.radius * 0.5),
        );
        common::shape_label(sketch, ctx, set, label_box, background, None);
    }

    if let Some(label) = chart.overlap_label.as_deref() {
        let radius = circles.first().map_or(0.0, |c| c.radius);
        let overlap_box = Bounds::new_from_center(overlap, Size::new(radius * 0.5, radius * 0.3));
        common::shape_label(sketch, ctx, label, overlap_box, background, None);
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use serde_json::json;

    use super::*;
    use crate::render::{
        common::PLACEHOLDER_TEXT,
        test_support::{assert_finite, markup, render, slot},
    };

    fn circle_bounds(circle: &Circle) -> Bounds {
        Bounds::new_from_center(circle.center, Size::new(circle.radius * 2.0, circle.radius * 2.0))
    }

    #[test]
    fn test_circles_fit_and_overlap() {
        for count in [2, 3] {
            let (circles, _) = circles(slot(), count);
            assert_eq!(circles.len(), count);
            for circle in &circles {
                assert!(slot().contains_bounds(&circle_bounds(circle)));
            }
            let gap = circles[0].center.sub_point(circles[1].center).hypot();
            assert!(gap < circles[0].radius * 2.0);
        }
    }

    #[test]
    fn test_two_sets_symmetric() {
        let (circles, overlap) = circles(slot(), 2);
        assert_approx_eq!(f32, overlap.x(), slot().center().x());
        assert_approx_eq!(
            f32,
            circles[1].center.x() - overlap.x(),
            overlap.x() - circles[0].center.x(),
            epsilon = 1e-3
        );
    }

    #[test]
    fn test_venn_markup() {
        let svg = markup(render(json!({
            "type": "venn-diagram",
            "sets": ["Design", "Engineering", "Product", "Sales"],
            "overlapLabel": "Core"
        })));
        assert_eq!(svg.matches("<circle").count(), 3);
        assert!(svg.contains("Product"));
        assert!(!svg.contains("Sales"));
        assert!(svg.contains("Core"));
        assert_finite(&svg);
    }

    #[test]
    fn test_single_set_placeholder() {
        let svg = markup(render(json!({ "type": "venn-diagram", "sets": ["Alone"] })));
        assert!(svg.contains(PLACEHOLDER_TEXT));
    }
}
