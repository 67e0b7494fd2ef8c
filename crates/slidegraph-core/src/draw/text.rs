//! Text styling and rendering.
//!
//! - [`TextDefinition`] - Reusable text style: family, size, weight, color, anchor
//! - [`Text`] - One or more pre-wrapped lines paired with a [`TextDefinition`]
//!
//! Text never wraps itself; callers wrap and fit with
//! [`text_layout`](crate::text_layout) first and hand the resulting lines
//! over. Each line is emitted as a `<tspan>` with an absolute `y`, so the
//! output does not depend on a renderer's handling of relative offsets.
//!
//! ```
//! # use slidegraph_core::draw::{Drawable, Text, TextDefinition};
//! let style = TextDefinition::new(16.0);
//! let lines = vec!["Quarterly".to_string(), "revenue".to_string()];
//! let text = Text::new(&style, &lines);
//! assert_eq!(text.size().height(), 2.0 * 16.0 * 1.3);
//! ```

use svg::node::{Text as SvgText, element as svg_element};

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer},
    geometry::{Bounds, Point, Size, px},
    metrics::{line_height, text_width},
    text_layout::FittedText,
};

/// Default font stack, used when no family is configured.
pub const DEFAULT_FONT_FAMILY: &str = "'Helvetica Neue', Arial, 'Hiragino Sans', 'Noto Sans JP', sans-serif";

/// Horizontal anchoring of text, mapped to SVG `text-anchor`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn to_svg_value(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// Vertical placement of a text block inside a box.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAlign {
    Top,
    #[default]
    Middle,
    Bottom,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

impl FontWeight {
    pub fn to_svg_value(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Bold => "bold",
        }
    }
}

/// Defines the visual style for text.
///
/// # Examples
///
/// ```
/// # use slidegraph_core::draw::{FontWeight, TextAnchor, TextDefinition};
/// # use slidegraph_core::color::Color;
/// let mut style = TextDefinition::new(14.0);
/// style.set_weight(FontWeight::Bold);
/// style.set_color(Color::from_rgb8(255, 255, 255));
/// let centered = style.clone().with_anchor(TextAnchor::Middle);
/// assert_eq!(centered.anchor(), TextAnchor::Middle);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TextDefinition {
    font_family: String,
    font_size: f32,
    weight: FontWeight,
    italic: bool,
    color: Color,
    anchor: TextAnchor,
}

impl TextDefinition {
    /// Creates a start-anchored, normal-weight definition in the default family.
    pub fn new(font_size: f32) -> Self {
        Self {
            font_size,
            ..Self::default()
        }
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn weight(&self) -> FontWeight {
        self.weight
    }

    pub fn italic(&self) -> bool {
        self.italic
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn anchor(&self) -> TextAnchor {
        self.anchor
    }

    pub fn set_font_family(&mut self, family: &str) {
        self.font_family = family.to_string();
    }

    pub fn set_weight(&mut self, weight: FontWeight) {
        self.weight = weight;
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn set_anchor(&mut self, anchor: TextAnchor) {
        self.anchor = anchor;
    }

    /// Returns a copy with a different font size.
    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: 16.0,
            weight: FontWeight::default(),
            italic: false,
            color: Color::default(),
            anchor: TextAnchor::default(),
        }
    }
}

/// Pre-wrapped lines of text with a style.
///
/// Rendering positions the block by its center; see [`Text::center_in`]
/// for placing it inside a box according to its anchor.
#[derive(Debug, Clone)]
pub struct Text<'a> {
    definition: &'a TextDefinition,
    lines: Vec<&'a str>,
}

impl<'a> Text<'a> {
    pub fn new(definition: &'a TextDefinition, lines: &'a [String]) -> Self {
        Self {
            definition,
            lines: lines.iter().map(String::as_str).collect(),
        }
    }

    /// Creates a single-line text element.
    pub fn single(definition: &'a TextDefinition, line: &'a str) -> Self {
        Self {
            definition,
            lines: vec![line],
        }
    }

    /// Creates a text element from fitted lines.
    ///
    /// The definition's font size must match the fitted size; use
    /// [`TextDefinition::with_font_size`] to derive one.
    pub fn fitted(definition: &'a TextDefinition, fitted: &'a FittedText) -> Self {
        Self::new(definition, fitted.lines())
    }

    pub fn lines(&self) -> &[&'a str] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|line| line.is_empty())
    }

    /// Returns the center point that places this block inside `bounds`.
    ///
    /// Start-anchored text hugs the left edge, end-anchored text the right
    /// edge, middle-anchored text is centered horizontally.
    pub fn center_in(&self, bounds: Bounds, valign: VerticalAlign) -> Point {
        let size = self.size();
        let x = match self.definition.anchor() {
            TextAnchor::Start => bounds.min_x() + size.width() / 2.0,
            TextAnchor::Middle => bounds.center().x(),
            TextAnchor::End => bounds.max_x() - size.width() / 2.0,
        };
        let y = match valign {
            VerticalAlign::Top => bounds.min_y() + size.height() / 2.0,
            VerticalAlign::Middle => bounds.center().y(),
            VerticalAlign::Bottom => bounds.max_y() - size.height() / 2.0,
        };
        Point::new(x, y)
    }
}

impl Drawable for Text<'_> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        if self.is_empty() {
            return output;
        }

        let size = self.size();
        let line_height = line_height(self.definition.font_size());
        let top = position.y() - size.height() / 2.0;
        let x = match self.definition.anchor() {
            TextAnchor::Start => position.x() - size.width() / 2.0,
            TextAnchor::Middle => position.x(),
            TextAnchor::End => position.x() + size.width() / 2.0,
        };
        let color = self.definition.color();

        let mut rendered_text = svg_element::Text::new("")
            .set("font-family", self.definition.font_family())
            .set("font-size", px(self.definition.font_size()))
            .set("text-anchor", self.definition.anchor().to_svg_value())
            .set("dominant-baseline", "central")
            .set("fill", color.to_string());

        if color.alpha() < 1.0 {
            rendered_text = rendered_text.set("fill-opacity", color.alpha());
        }
        if self.definition.weight() == FontWeight::Bold {
            rendered_text = rendered_text.set("font-weight", FontWeight::Bold.to_svg_value());
        }
        if self.definition.italic() {
            rendered_text = rendered_text.set("font-style", "italic");
        }

        for (index, line) in self.lines.iter().enumerate() {
            let y = top + line_height * (index as f32 + 0.5);
            let tspan = svg_element::TSpan::new("")
                .set("x", px(x))
                .set("y", px(y))
                .add(SvgText::new(*line));
            rendered_text = rendered_text.add(tspan);
        }

        output.add_to_layer(RenderLayer::Text, Box::new(rendered_text));
        output
    }

    fn size(&self) -> Size {
        let font_size = self.definition.font_size();
        let width = self
            .lines
            .iter()
            .map(|line| text_width(line, font_size))
            .fold(0.0, f32::max);
        Size::new(width, self.lines.len() as f32 * line_height(font_size))
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn render(text: &Text, position: Point) -> String {
        text.render_to_layers(position)
            .render()
            .iter()
            .map(|node| node.to_string())
            .collect()
    }

    #[test]
    fn test_text_size_uses_widest_line() {
        let style = TextDefinition::new(10.0);
        let lines = vec!["ab".to_string(), "abcd".to_string()];
        let text = Text::new(&style, &lines);
        assert_approx_eq!(f32, text.size().width(), text_width("abcd", 10.0));
        assert_approx_eq!(f32, text.size().height(), 26.0);
    }

    #[test]
    fn test_text_escapes_markup() {
        let style = TextDefinition::new(12.0);
        let text = Text::single(&style, "R&D <core>");
        let svg = render(&text, Point::new(50.0, 50.0));
        assert!(svg.contains("R&amp;D &lt;core&gt;"));
        assert!(svg.contains("data-layer=\"text\""));
    }

    #[test]
    fn test_text_lines_have_absolute_positions() {
        let style = TextDefinition::new(10.0).with_anchor(TextAnchor::Middle);
        let lines = vec!["one".to_string(), "two".to_string()];
        let text = Text::new(&style, &lines);
        let svg = render(&text, Point::new(100.0, 100.0));
        // Block height 26, so lines sit at 93.5 and 106.5
        assert!(svg.contains("y=\"93.5\""));
        assert!(svg.contains("y=\"106.5\""));
        assert!(svg.contains("text-anchor=\"middle\""));
    }

    #[test]
    fn test_empty_text_renders_nothing() {
        let style = TextDefinition::new(10.0);
        let text = Text::single(&style, "");
        assert!(text.render_to_layers(Point::default()).is_empty());
    }

    #[test]
    fn test_center_in_respects_anchor() {
        let bounds = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(200.0, 100.0));
        let style = TextDefinition::new(10.0);
        let text = Text::single(&style, "abc");
        let width = text.size().width();

        let start = text.center_in(bounds, VerticalAlign::Top);
        assert_approx_eq!(f32, start.x(), width / 2.0);
        assert_approx_eq!(f32, start.y(), 6.5);

        let end_style = style.clone().with_anchor(TextAnchor::End);
        let end = Text::single(&end_style, "abc").center_in(bounds, VerticalAlign::Bottom);
        assert_approx_eq!(f32, end.x(), 200.0 - width / 2.0);
        assert_approx_eq!(f32, end.y(), 93.5);
    }
}
