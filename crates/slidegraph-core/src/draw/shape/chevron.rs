use svg::{self, node::element as svg_element};

use super::{ShapeDefinition, ShapeStyle, points_attribute};
use crate::geometry::{Bounds, Insets, Point};

/// Right-pointing chevron, the building block of process arrows.
#[derive(Debug, Clone, Default)]
pub struct ChevronDefinition {
    style: ShapeStyle,
    /// Tip depth as a fraction of the height
    depth: f32,
    /// Leading chevrons have a flat left edge
    leading: bool,
}

impl ChevronDefinition {
    pub fn new(style: ShapeStyle) -> Self {
        Self {
            style,
            depth: 0.35,
            leading: false,
        }
    }

    /// Makes the left edge flat, for the first chevron in a row.
    pub fn with_leading(mut self, leading: bool) -> Self {
        self.leading = leading;
        self
    }

    fn tip(&self, bounds: Bounds) -> f32 {
        (bounds.height() * self.depth).min(bounds.width() / 3.0).max(0.0)
    }
}

impl ShapeDefinition for ChevronDefinition {
    fn render_to_svg(&self, bounds: Bounds) -> Box<dyn svg::Node> {
        let tip = self.tip(bounds);
        let center_y = bounds.center().y();
        let mut points = vec![
            Point::new(bounds.min_x(), bounds.min_y()),
            Point::new(bounds.max_x() - tip, bounds.min_y()),
            Point::new(bounds.max_x(), center_y),
            Point::new(bounds.max_x() - tip, bounds.max_y()),
            Point::new(bounds.min_x(), bounds.max_y()),
        ];
        if !self.leading {
            points.push(Point::new(bounds.min_x() + tip, center_y));
        }
        let polygon = svg_element::Polygon::new().set("points", points_attribute(&points));

        Box::new(apply_style!(polygon, &self.style))
    }

    fn content_bounds(&self, bounds: Bounds) -> Bounds {
        let tip = self.tip(bounds);
        let left = if self.leading { tip / 3.0 } else { tip };
        bounds.shrink(Insets::new(0.0, tip, 0.0, left))
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn clone_box(&self) -> Box<dyn ShapeDefinition> {
        Box::new(self.clone())
    }
}
