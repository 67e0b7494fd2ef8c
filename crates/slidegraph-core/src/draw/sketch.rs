//! A drawing surface bound to one slot.
//!
//! [`Sketch`] collects layered SVG output for a single region and tracks the
//! extent of everything drawn into it. Renderers lay out inside
//! [`Sketch::clip`]; the composer checks [`Sketch::overflows`] afterwards.
//! All coordinates pass through [`px`], so no drawing call can emit `NaN`
//! or infinities.

use log::trace;
use svg::node::element as svg_element;

use crate::{
    color::Color,
    draw::{
        Drawable, LayeredOutput, PathBuilder, RectangleDefinition, RenderLayer, ShapeDefinition,
        ShapeStyle, StrokeDefinition, Text, VerticalAlign,
    },
    geometry::{Bounds, Point, Size, px, sanitize},
};

/// Layered output plus the extent of what was drawn.
///
/// # Examples
///
/// ```
/// # use slidegraph_core::draw::{RenderLayer, ShapeStyle, Sketch};
/// # use slidegraph_core::geometry::{Bounds, Point, Size};
/// # use slidegraph_core::color::Color;
/// let slot = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(200.0, 100.0));
/// let mut sketch = Sketch::new(slot);
/// let bar = Bounds::new_from_top_left(Point::new(10.0, 10.0), Size::new(20.0, 80.0));
/// sketch.rect(RenderLayer::Content, bar, &ShapeStyle::filled(Color::default()), 0.0);
/// assert_eq!(sketch.extent(), Some(bar));
/// assert!(!sketch.overflows());
/// ```
#[derive(Debug)]
pub struct Sketch {
    clip: Bounds,
    output: LayeredOutput,
    extent: Option<Bounds>,
}

impl Sketch {
    pub fn new(clip: Bounds) -> Self {
        Self {
            clip,
            output: LayeredOutput::new(),
            extent: None,
        }
    }

    /// The region this sketch is expected to stay inside.
    pub fn clip(&self) -> Bounds {
        self.clip
    }

    /// Bounds of everything drawn so far.
    pub fn extent(&self) -> Option<Bounds> {
        self.extent
    }

    /// Returns true when something was drawn outside [`Sketch::clip`].
    pub fn overflows(&self) -> bool {
        self.extent
            .is_some_and(|extent| !self.clip.contains_bounds(&extent))
    }

    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    /// Consumes the sketch, returning its layered output.
    pub fn finish(self) -> LayeredOutput {
        self.output
    }

    /// Merges a nested sketch's output and extent into this one.
    pub fn absorb(&mut self, nested: Sketch) {
        if let Some(extent) = nested.extent {
            self.record(extent);
        }
        self.output.merge(nested.output);
    }

    /// Adds a raw node with a known extent.
    pub fn node(&mut self, layer: RenderLayer, extent: Bounds, node: Box<dyn svg::Node>) {
        self.record(extent);
        self.output.add_to_layer(layer, node);
    }

    /// Draws a rectangle with optional rounded corners.
    pub fn rect(&mut self, layer: RenderLayer, bounds: Bounds, style: &ShapeStyle, radius: f32) {
        let shape = RectangleDefinition::new(style.clone()).with_rounded(radius);
        self.shape(layer, &shape, bounds);
    }

    /// Renders a shape definition into `bounds`.
    pub fn shape(&mut self, layer: RenderLayer, shape: &dyn ShapeDefinition, bounds: Bounds) {
        let bounds = rounded_bounds(bounds);
        self.node(layer, bounds, shape.render_to_svg(bounds));
    }

    pub fn line(&mut self, layer: RenderLayer, from: Point, to: Point, stroke: &StrokeDefinition) {
        let (from, to) = (rounded(from), rounded(to));
        let line = svg_element::Line::new()
            .set("x1", from.x())
            .set("y1", from.y())
            .set("x2", to.x())
            .set("y2", to.y());
        let line = crate::apply_stroke!(line, stroke);
        if let Some(extent) = Bounds::enclosing([from, to]) {
            self.node(layer, extent, Box::new(line));
        }
    }

    /// Draws an open polyline; fewer than two points draw nothing.
    pub fn polyline(&mut self, layer: RenderLayer, points: &[Point], stroke: &StrokeDefinition) {
        if points.len() < 2 {
            return;
        }
        let path = points
            .iter()
            .skip(1)
            .fold(PathBuilder::new().move_to(points[0]), |path, p| {
                path.line_to(*p)
            });
        self.path(layer, path, &ShapeStyle::outlined(stroke.clone()));
    }

    /// Draws a closed polygon; fewer than three points draw nothing.
    pub fn polygon(&mut self, layer: RenderLayer, points: &[Point], style: &ShapeStyle) {
        if points.len() < 3 {
            return;
        }
        let path = points
            .iter()
            .skip(1)
            .fold(PathBuilder::new().move_to(points[0]), |path, p| {
                path.line_to(*p)
            })
            .close();
        self.path(layer, path, style);
    }

    pub fn circle(&mut self, layer: RenderLayer, center: Point, radius: f32, style: &ShapeStyle) {
        let center = rounded(center);
        let radius = px(radius.max(0.0));
        let circle = svg_element::Circle::new()
            .set("cx", center.x())
            .set("cy", center.y())
            .set("r", radius);
        let circle = crate::apply_fill!(circle, style.fill());
        let circle = match style.stroke() {
            Some(stroke) => crate::apply_stroke!(circle, stroke),
            None => circle,
        };
        let extent = Bounds::new_from_center(center, Size::new(radius * 2.0, radius * 2.0));
        self.node(layer, extent, Box::new(circle));
    }

    /// Draws a path outline; empty paths draw nothing.
    pub fn path(&mut self, layer: RenderLayer, path: PathBuilder, style: &ShapeStyle) {
        let Some(extent) = path.bounds() else {
            return;
        };
        let element = svg_element::Path::new().set("d", path.into_data());
        let element = crate::apply_fill!(element, style.fill());
        let element = match style.stroke() {
            Some(stroke) => crate::apply_stroke!(element, stroke),
            None => element,
        };
        self.node(layer, extent, Box::new(element));
    }

    /// Draws a straight arrow with a filled head at `to`, and at `from`
    /// when `both_ends` is set.
    ///
    /// Arrows shorter than their heads degrade to a plain line.
    pub fn arrow(
        &mut self,
        from: Point,
        to: Point,
        stroke: &StrokeDefinition,
        head: f32,
        both_ends: bool,
    ) {
        let delta = to.sub_point(from);
        let length = delta.hypot();
        let heads = if both_ends { 2.0 } else { 1.0 };
        if !length.is_finite() || length <= head * heads {
            self.line(RenderLayer::Connector, from, to, stroke);
            return;
        }

        let direction = delta.scale(1.0 / length);
        let shaft_end = to.sub_point(direction.scale(head));
        let shaft_start = if both_ends {
            from.add_point(direction.scale(head))
        } else {
            from
        };
        self.line(RenderLayer::Connector, shaft_start, shaft_end, stroke);
        self.arrow_head(to, direction, head, stroke.color());
        if both_ends {
            self.arrow_head(from, direction.scale(-1.0), head, stroke.color());
        }
    }

    fn arrow_head(&mut self, tip: Point, direction: Point, head: f32, color: Color) {
        let base = tip.sub_point(direction.scale(head));
        let normal = Point::new(-direction.y(), direction.x()).scale(head * 0.5);
        let points = [tip, base.add_point(normal), base.sub_point(normal)];
        self.polygon(RenderLayer::Connector, &points, &ShapeStyle::filled(color));
    }

    /// Renders a drawable centered at `center`.
    pub fn draw<D: Drawable>(&mut self, center: Point, drawable: &D) {
        let center = Point::new(sanitize(center.x()), sanitize(center.y()));
        let output = drawable.render_to_layers(center);
        if output.is_empty() {
            return;
        }
        self.record(center.to_bounds(drawable.size()));
        self.output.merge(output);
    }

    /// Places a text block inside `bounds` according to its anchor and
    /// `valign`, returning the bounds it occupies.
    pub fn text(&mut self, text: &Text<'_>, bounds: Bounds, valign: VerticalAlign) -> Bounds {
        let center = text.center_in(bounds, valign);
        self.draw(center, text);
        center.to_bounds(text.size())
    }

    fn record(&mut self, bounds: Bounds) {
        trace!(
            min_x = bounds.min_x(),
            min_y = bounds.min_y(),
            max_x = bounds.max_x(),
            max_y = bounds.max_y();
            "Recorded sketch extent"
        );
        self.extent = Some(match self.extent {
            Some(extent) => extent.merge(&bounds),
            None => bounds,
        });
    }
}

fn rounded(point: Point) -> Point {
    Point::new(px(point.x()), px(point.y()))
}

fn rounded_bounds(bounds: Bounds) -> Bounds {
    let min = rounded(bounds.min_point());
    let size = Size::new(px(bounds.width()).max(0.0), px(bounds.height()).max(0.0));
    Bounds::new_from_top_left(min, size)
}
