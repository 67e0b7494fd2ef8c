//! Stroke and fill definitions.
//!
//! - [`StrokeDefinition`]: color, width, dash pattern, cap and join of a line
//! - [`StrokeStyle`]: the dash pattern (solid, dashed, dotted)
//! - [`apply_stroke!`](crate::apply_stroke!) and [`apply_fill!`](crate::apply_fill!):
//!   macros setting the matching SVG attributes on any element
//!
//! ```
//! use slidegraph_core::draw::{StrokeCap, StrokeDefinition};
//! use slidegraph_core::color::Color;
//! use svg::node::element as svg_element;
//!
//! let mut stroke = StrokeDefinition::dashed(Color::from_rgb8(31, 78, 121), 1.5);
//! stroke.set_cap(StrokeCap::Round);
//!
//! let line = svg_element::Line::new().set("x1", 0).set("x2", 10);
//! let line = slidegraph_core::apply_stroke!(line, &stroke);
//! assert!(line.to_string().contains("stroke-dasharray"));
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{color::Color, geometry::px};

/// Dash pattern of a stroke.
///
/// Maps to the SVG `stroke-dasharray` attribute; solid lines emit none.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrokeStyle {
    #[default]
    Solid,
    /// 6px dash, 4px gap
    Dashed,
    /// 2px dot, 3px gap
    Dotted,
}

impl StrokeStyle {
    /// Returns the SVG dasharray value for this style, or None for solid lines
    pub fn to_svg_value(self) -> Option<&'static str> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("6,4"),
            Self::Dotted => Some("2,3"),
        }
    }
}

impl FromStr for StrokeStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solid" => Ok(Self::Solid),
            "dashed" => Ok(Self::Dashed),
            "dotted" => Ok(Self::Dotted),
            _ => Err(format!(
                "invalid stroke style `{s}`, valid values: solid, dashed, dotted"
            )),
        }
    }
}

/// How line endpoints are rendered.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeCap {
    #[default]
    Butt,
    Round,
    Square,
}

impl StrokeCap {
    /// Returns the SVG stroke-linecap value
    pub fn to_svg_value(self) -> &'static str {
        match self {
            Self::Butt => "butt",
            Self::Round => "round",
            Self::Square => "square",
        }
    }
}

/// How line corners are rendered.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

impl StrokeJoin {
    /// Returns the SVG stroke-linejoin value
    pub fn to_svg_value(self) -> &'static str {
        match self {
            Self::Miter => "miter",
            Self::Round => "round",
            Self::Bevel => "bevel",
        }
    }
}

/// A stroke definition for lines and outlines.
///
/// # Examples
///
/// ```
/// use slidegraph_core::draw::{StrokeDefinition, StrokeJoin, StrokeStyle};
/// use slidegraph_core::color::Color;
///
/// let mut stroke = StrokeDefinition::solid(Color::default(), 2.0);
/// stroke.set_join(StrokeJoin::Round);
/// assert_eq!(stroke.style(), StrokeStyle::Solid);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
    cap: StrokeCap,
    join: StrokeJoin,
}

impl StrokeDefinition {
    /// Creates a solid stroke with butt caps and miter joins.
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            ..Self::default()
        }
    }

    /// Creates a solid stroke (convenience constructor).
    pub fn solid(color: Color, width: f32) -> Self {
        Self::new(color, width)
    }

    /// Creates a dashed stroke (convenience constructor).
    pub fn dashed(color: Color, width: f32) -> Self {
        let mut stroke = Self::new(color, width);
        stroke.set_style(StrokeStyle::Dashed);
        stroke
    }

    /// Creates a dotted stroke (convenience constructor).
    pub fn dotted(color: Color, width: f32) -> Self {
        let mut stroke = Self::new(color, width);
        stroke.set_style(StrokeStyle::Dotted);
        stroke
    }

    /// Creates a stroke with the given style.
    pub fn styled(color: Color, width: f32, style: StrokeStyle) -> Self {
        let mut stroke = Self::new(color, width);
        stroke.set_style(style);
        stroke
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the stroke width, rounded for output.
    pub fn width(&self) -> f32 {
        px(self.width)
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    pub fn cap(&self) -> StrokeCap {
        self.cap
    }

    pub fn join(&self) -> StrokeJoin {
        self.join
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn set_style(&mut self, style: StrokeStyle) {
        self.style = style;
    }

    pub fn set_cap(&mut self, cap: StrokeCap) {
        self.cap = cap;
    }

    pub fn set_join(&mut self, join: StrokeJoin) {
        self.join = join;
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self {
            color: Color::default(),
            width: 1.0,
            style: StrokeStyle::default(),
            cap: StrokeCap::default(),
            join: StrokeJoin::default(),
        }
    }
}

/// Apply all stroke attributes to an SVG element.
///
/// Sets color, opacity, width, line cap, line join, and the dash pattern
/// when the style is not solid.
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let mut elem = $element
            .set("stroke", $stroke.color().to_string())
            .set("stroke-opacity", $stroke.color().alpha())
            .set("stroke-width", $stroke.width())
            .set("stroke-linecap", $stroke.cap().to_svg_value())
            .set("stroke-linejoin", $stroke.join().to_svg_value());

        if let Some(dasharray) = $stroke.style().to_svg_value() {
            elem = elem.set("stroke-dasharray", dasharray);
        }

        elem
    }};
}

/// Apply an optional fill color to an SVG element.
///
/// `None` sets `fill="none"`.
#[macro_export]
macro_rules! apply_fill {
    ($element:expr, $fill:expr) => {{
        match $fill {
            Some(color) => $element
                .set("fill", color.to_string())
                .set("fill-opacity", color.alpha()),
            None => $element.set("fill", "none"),
        }
    }};
}

#[cfg(test)]
mod tests {
    use svg::node::element as svg_element;

    use super::*;

    #[test]
    fn test_stroke_default() {
        let stroke = StrokeDefinition::default();
        assert_eq!(stroke.width(), 1.0);
        assert_eq!(stroke.color().to_string(), "#000000");
        assert_eq!(stroke.style(), StrokeStyle::Solid);
        assert_eq!(stroke.cap(), StrokeCap::Butt);
        assert_eq!(stroke.join(), StrokeJoin::Miter);
    }

    #[test]
    fn test_stroke_constructors() {
        let color = Color::from_rgb8(255, 0, 0);

        assert_eq!(StrokeDefinition::solid(color, 2.0).style(), StrokeStyle::Solid);
        assert_eq!(StrokeDefinition::dashed(color, 1.5).style(), StrokeStyle::Dashed);
        assert_eq!(StrokeDefinition::dotted(color, 1.0).style(), StrokeStyle::Dotted);
        assert_eq!(
            StrokeDefinition::styled(color, 1.0, StrokeStyle::Dotted),
            StrokeDefinition::dotted(color, 1.0)
        );
    }

    #[test]
    fn test_stroke_width_is_sanitized() {
        let stroke = StrokeDefinition::new(Color::default(), f32::NAN);
        assert_eq!(stroke.width(), 0.0);
    }

    #[test]
    fn test_stroke_style_from_str() {
        assert_eq!("solid".parse::<StrokeStyle>(), Ok(StrokeStyle::Solid));
        assert_eq!("dashed".parse::<StrokeStyle>(), Ok(StrokeStyle::Dashed));
        assert_eq!("dotted".parse::<StrokeStyle>(), Ok(StrokeStyle::Dotted));

        let result = "wavy".parse::<StrokeStyle>();
        assert!(result.unwrap_err().contains("invalid stroke style"));
    }

    #[test]
    fn test_apply_stroke_dasharray() {
        let solid = StrokeDefinition::solid(Color::default(), 1.0);
        let line = crate::apply_stroke!(svg_element::Line::new(), &solid);
        assert!(!line.to_string().contains("stroke-dasharray"));

        let dashed = StrokeDefinition::dashed(Color::default(), 1.0);
        let line = crate::apply_stroke!(svg_element::Line::new(), &dashed);
        assert!(line.to_string().contains("stroke-dasharray=\"6,4\""));
    }

    #[test]
    fn test_apply_fill() {
        let rect = crate::apply_fill!(svg_element::Rectangle::new(), None::<Color>);
        assert!(rect.to_string().contains("fill=\"none\""));

        let rect = crate::apply_fill!(
            svg_element::Rectangle::new(),
            Some(Color::from_rgb8(255, 0, 0))
        );
        assert!(rect.to_string().contains("fill=\"#ff0000\""));
    }
}
