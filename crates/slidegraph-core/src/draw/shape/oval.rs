use std::f32::consts::FRAC_1_SQRT_2;

use svg::{self, node::element as svg_element};

use super::{ShapeDefinition, ShapeStyle};
use crate::geometry::{Bounds, Size, px};

/// Ellipse inscribed in its bounds.
#[derive(Debug, Clone, Default)]
pub struct OvalDefinition {
    style: ShapeStyle,
}

impl OvalDefinition {
    pub fn new(style: ShapeStyle) -> Self {
        Self { style }
    }
}

impl ShapeDefinition for OvalDefinition {
    fn render_to_svg(&self, bounds: Bounds) -> Box<dyn svg::Node> {
        let center = bounds.center();
        let ellipse = svg_element::Ellipse::new()
            .set("cx", px(center.x()))
            .set("cy", px(center.y()))
            .set("rx", px(bounds.width() / 2.0))
            .set("ry", px(bounds.height() / 2.0));

        Box::new(apply_style!(ellipse, &self.style))
    }

    /// The largest axis-aligned rectangle inside the ellipse.
    fn content_bounds(&self, bounds: Bounds) -> Bounds {
        let size = Size::new(
            bounds.width() * FRAC_1_SQRT_2,
            bounds.height() * FRAC_1_SQRT_2,
        );
        Bounds::new_from_center(bounds.center(), size)
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn clone_box(&self) -> Box<dyn ShapeDefinition> {
        Box::new(self.clone())
    }
}
