//! Shape definitions and the [`ShapeDefinition`] trait.
//!
//! A shape is defined once (fill, stroke, corner rounding) and rendered into
//! any [`Bounds`]. Each definition also reports the inner region where a
//! label can sit without crossing the outline, which is how shape elements,
//! pyramid levels and chevron steps place their text.

use crate::{
    color::Color,
    draw::StrokeDefinition,
    geometry::{Bounds, Point},
};

/// Fill and outline shared by every shape definition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeStyle {
    fill: Option<Color>,
    stroke: Option<StrokeDefinition>,
}

impl ShapeStyle {
    /// A filled shape without outline.
    pub fn filled(fill: Color) -> Self {
        Self {
            fill: Some(fill),
            stroke: None,
        }
    }

    /// An outlined shape without fill.
    pub fn outlined(stroke: StrokeDefinition) -> Self {
        Self {
            fill: None,
            stroke: Some(stroke),
        }
    }

    pub fn fill(&self) -> Option<Color> {
        self.fill
    }

    pub fn stroke(&self) -> Option<&StrokeDefinition> {
        self.stroke.as_ref()
    }

    pub fn with_stroke(mut self, stroke: Option<StrokeDefinition>) -> Self {
        self.stroke = stroke;
        self
    }
}

/// Applies a [`ShapeStyle`] to an SVG element.
macro_rules! apply_style {
    ($element:expr, $style:expr) => {{
        let style: &$crate::draw::ShapeStyle = $style;
        let elem = $crate::apply_fill!($element, style.fill());
        match style.stroke() {
            Some(stroke) => $crate::apply_stroke!(elem, stroke),
            None => elem,
        }
    }};
}

mod chevron;
mod diamond;
mod oval;
mod rectangle;
mod triangle;

pub use chevron::ChevronDefinition;
pub use diamond::DiamondDefinition;
pub use oval::OvalDefinition;
pub use rectangle::RectangleDefinition;
pub use triangle::TriangleDefinition;

/// A trait for shape definitions that render into given bounds.
pub trait ShapeDefinition: std::fmt::Debug {
    /// Renders the outline filling `bounds`.
    fn render_to_svg(&self, bounds: Bounds) -> Box<dyn svg::Node>;

    /// Returns the region inside `bounds` where content stays within the outline.
    ///
    /// Defaults to the full bounds, which is right for rectangles.
    fn content_bounds(&self, bounds: Bounds) -> Bounds {
        bounds
    }

    /// Returns the fill and outline of this shape.
    fn style(&self) -> &ShapeStyle;

    /// Creates a boxed clone of this shape definition.
    fn clone_box(&self) -> Box<dyn ShapeDefinition>;
}

impl Clone for Box<dyn ShapeDefinition> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Formats polygon vertices as an SVG `points` list.
fn points_attribute(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| {
            format!(
                "{},{}",
                crate::geometry::px(p.x()),
                crate::geometry::px(p.y())
            )
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;

    fn unit_bounds() -> Bounds {
        Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(100.0, 60.0))
    }

    fn all_shapes() -> Vec<Box<dyn ShapeDefinition>> {
        let style = ShapeStyle::filled(Color::from_rgb8(10, 20, 30));
        vec![
            Box::new(RectangleDefinition::new(style.clone())),
            Box::new(RectangleDefinition::new(style.clone()).with_rounded(8.0)),
            Box::new(OvalDefinition::new(style.clone())),
            Box::new(DiamondDefinition::new(style.clone())),
            Box::new(TriangleDefinition::new(style.clone())),
            Box::new(ChevronDefinition::new(style)),
        ]
    }

    #[test]
    fn test_content_bounds_inside_shape_bounds() {
        for shape in all_shapes() {
            let bounds = unit_bounds();
            let content = shape.content_bounds(bounds);
            assert!(bounds.contains_bounds(&content), "{shape:?}");
            assert!(content.width() > 0.0, "{shape:?}");
        }
    }

    #[test]
    fn test_render_applies_fill() {
        for shape in all_shapes() {
            let svg = shape.render_to_svg(unit_bounds()).to_string();
            assert!(svg.contains("fill=\"#0a141e\""), "{svg}");
        }
    }

    #[test]
    fn test_outlined_style_has_no_fill() {
        let stroke = StrokeDefinition::solid(Color::default(), 2.0);
        let shape = RectangleDefinition::new(ShapeStyle::outlined(stroke));
        let svg = shape.render_to_svg(unit_bounds()).to_string();
        assert!(svg.contains("fill=\"none\""));
        assert!(svg.contains("stroke-width=\"2\""));
    }

    #[test]
    fn test_points_attribute() {
        let points = [Point::new(0.0, 1.5), Point::new(f32::NAN, 2.0)];
        assert_eq!(points_attribute(&points), "0,1.5 0,2");
    }
}
