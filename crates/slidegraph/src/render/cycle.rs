//! Cycle chart: steps evenly spaced on a circle, joined clockwise by
//! curved arrows.

use std::f32::consts::TAU;

use slidegraph_core::{
    draw::{PathBuilder, RenderLayer, ShapeStyle, Sketch, StrokeDefinition},
    geometry::{Bounds, Insets, Point, Size},
};

use super::{RenderContext, common};
use crate::model::CycleChart;

const MAX_NODE_WIDTH: f32 = 170.0;

const MAX_NODE_HEIGHT: f32 = 56.0;

const ARROW_HEAD: f32 = 9.0;

/// Clearance between a node and the arrows touching it.
const NODE_CLEARANCE: f32 = 8.0;

#[derive(Debug, Clone, Copy)]
struct Ring {
    center: Point,
    radius: f32,
    node: Size,
}

impl Ring {
    fn new(area: Bounds, count: usize) -> Self {
        let node = Size::new(
            MAX_NODE_WIDTH.min(area.width() * 0.24),
            MAX_NODE_HEIGHT.min(area.height() * 0.18),
        );
        let radius = if count > 1 {
            ((area.width() - node.width()) / 2.0)
                .min((area.height() - node.height()) / 2.0)
                .max(0.0)
        } else {
            0.0
        };
        Self {
            center: area.center(),
            radius,
            node,
        }
    }

    fn angle(index: usize, count: usize) -> f32 {
        TAU * index as f32 / count as f32
    }

    fn node_box(&self, index: usize, count: usize) -> Bounds {
        Bounds::new_from_center(
            self.center.polar(self.radius, Self::angle(index, count)),
            self.node,
        )
    }

    /// Angular half-width a node occupies on the ring.
    fn node_span(&self) -> f32 {
        if self.radius <= 0.0 {
            return 0.0;
        }
        let half = self.node.width().max(self.node.height()) / 2.0 + NODE_CLEARANCE;
        (half / self.radius).min(1.0).asin()
    }
}

pub fn render(chart: &CycleChart, sketch: &mut Sketch, ctx: &RenderContext<'_>) {
    let count = chart.steps.len();
    if count == 0 {
        common::placeholder(sketch, ctx, "cycle without steps");
        return;
    }

    let ring = Ring::new(sketch.clip(), count);
    let stroke = StrokeDefinition::solid(ctx.theme().neutral(), 2.0);

    if count > 1 {
        let step = TAU / count as f32;
        let margin = ring.node_span();
        for index in 0..count {
            let from = Ring::angle(index, count) + margin;
            let to = Ring::angle(index, count) + step - margin;
            if to - from <= ARROW_HEAD / ring.radius {
                continue;
            }
            let path = PathBuilder::new().arc_around(ring.center, ring.radius, from, to);
            sketch.path(RenderLayer::Connector, path, &ShapeStyle::outlined(stroke.clone()));

            let tip = ring.center.polar(ring.radius, to);
            let tangent = Point::new(to.cos(), to.sin());
            let base = tip.sub_point(tangent.scale(ARROW_HEAD));
            let normal = Point::new(-tangent.y(), tangent.x()).scale(ARROW_HEAD * 0.5);
            sketch.polygon(
                RenderLayer::Connector,
                &[tip, base.add_point(normal), base.sub_point(normal)],
                &ShapeStyle::filled(stroke.color()),
            );
        }
    }

    for (index, step) in chart.steps.iter().enumerate() {
        let fill = ctx.theme().series_color(index);
        let node_box = ring.node_box(index, count);
        sketch.rect(RenderLayer::Content, node_box, &ShapeStyle::filled(fill), 10.0);
        let inside = node_box.shrink(Insets::symmetric(4.0, 8.0));
        common::shape_label(sketch, ctx, step, inside, fill, None);
    }
}
