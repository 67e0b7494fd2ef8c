use svg::{self, node::element as svg_element};

use super::{ShapeDefinition, ShapeStyle, points_attribute};
use crate::geometry::{Bounds, Point, Size};

/// Upward-pointing isosceles triangle.
#[derive(Debug, Clone, Default)]
pub struct TriangleDefinition {
    style: ShapeStyle,
}

impl TriangleDefinition {
    pub fn new(style: ShapeStyle) -> Self {
        Self { style }
    }
}

impl ShapeDefinition for TriangleDefinition {
    fn render_to_svg(&self, bounds: Bounds) -> Box<dyn svg::Node> {
        let points = [
            Point::new(bounds.center().x(), bounds.min_y()),
            Point::new(bounds.max_x(), bounds.max_y()),
            Point::new(bounds.min_x(), bounds.max_y()),
        ];
        let polygon = svg_element::Polygon::new().set("points", points_attribute(&points));

        Box::new(apply_style!(polygon, &self.style))
    }

    /// The lower half, narrowed to the width the sides allow at mid height.
    fn content_bounds(&self, bounds: Bounds) -> Bounds {
        let size = Size::new(bounds.width() / 2.0, bounds.height() / 2.0);
        let top_left = Point::new(bounds.min_x() + bounds.width() / 4.0, bounds.center().y());
        Bounds::new_from_top_left(top_left, size)
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn clone_box(&self) -> Box<dyn ShapeDefinition> {
        Box::new(self.clone())
    }
}
