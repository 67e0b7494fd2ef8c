use svg::{self, node::element as svg_element};

use super::{ShapeDefinition, ShapeStyle};
use crate::geometry::{Bounds, px};

/// Rectangle shape definition, optionally with rounded corners.
#[derive(Debug, Clone, Default)]
pub struct RectangleDefinition {
    style: ShapeStyle,
    rounded: f32,
}

impl RectangleDefinition {
    pub fn new(style: ShapeStyle) -> Self {
        Self {
            style,
            rounded: 0.0,
        }
    }

    /// Sets the corner radius (builder style).
    pub fn with_rounded(mut self, radius: f32) -> Self {
        self.rounded = radius;
        self
    }

    pub fn rounded(&self) -> f32 {
        self.rounded
    }
}

impl ShapeDefinition for RectangleDefinition {
    fn render_to_svg(&self, bounds: Bounds) -> Box<dyn svg::Node> {
        // Radius never exceeds half of the shorter side
        let radius = self
            .rounded
            .min(bounds.width() / 2.0)
            .min(bounds.height() / 2.0)
            .max(0.0);

        let mut rect = svg_element::Rectangle::new()
            .set("x", px(bounds.min_x()))
            .set("y", px(bounds.min_y()))
            .set("width", px(bounds.width()))
            .set("height", px(bounds.height()));

        if radius > 0.0 {
            rect = rect.set("rx", px(radius));
        }

        Box::new(apply_style!(rect, &self.style))
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn clone_box(&self) -> Box<dyn ShapeDefinition> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        color::Color,
        geometry::{Point, Size},
    };

    #[test]
    fn test_radius_is_clamped() {
        let shape = RectangleDefinition::new(ShapeStyle::filled(Color::default())).with_rounded(50.0);
        let bounds = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(100.0, 20.0));
        let svg = shape.render_to_svg(bounds).to_string();
        assert!(svg.contains("rx=\"10\""));
    }

    #[test]
    fn test_square_corners_omit_rx() {
        let shape = RectangleDefinition::new(ShapeStyle::default());
        let bounds = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(10.0, 10.0));
        assert!(!shape.render_to_svg(bounds).to_string().contains("rx="));
    }
}
