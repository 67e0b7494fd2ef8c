use svg::{self, node::element as svg_element};

use super::{ShapeDefinition, ShapeStyle, points_attribute};
use crate::geometry::{Bounds, Point};

/// Rhombus touching the midpoints of its bounds.
#[derive(Debug, Clone, Default)]
pub struct DiamondDefinition {
    style: ShapeStyle,
}

impl DiamondDefinition {
    pub fn new(style: ShapeStyle) -> Self {
        Self { style }
    }
}

impl ShapeDefinition for DiamondDefinition {
    fn render_to_svg(&self, bounds: Bounds) -> Box<dyn svg::Node> {
        let center = bounds.center();
        let points = [
            Point::new(center.x(), bounds.min_y()),
            Point::new(bounds.max_x(), center.y()),
            Point::new(center.x(), bounds.max_y()),
            Point::new(bounds.min_x(), center.y()),
        ];
        let polygon = svg_element::Polygon::new().set("points", points_attribute(&points));

        Box::new(apply_style!(polygon, &self.style))
    }

    fn content_bounds(&self, bounds: Bounds) -> Bounds {
        Bounds::new_from_center(bounds.center(), bounds.to_size().scale(0.5))
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn clone_box(&self) -> Box<dyn ShapeDefinition> {
        Box::new(self.clone())
    }
}
