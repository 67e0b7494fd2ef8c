//! Drawing primitives for slides.
//!
//! Everything visual is expressed through the [`Drawable`] trait or drawn
//! directly into a [`Sketch`], and ends up as [`LayeredOutput`] so z-order
//! is decided by [`RenderLayer`] rather than by emission order.

use std::fmt;

use crate::geometry::{Point, Size};

mod layer;
mod path;
mod shape;
mod sketch;
mod stroke;
mod text;

pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use path::PathBuilder;
pub use shape::{
    ChevronDefinition, DiamondDefinition, OvalDefinition, RectangleDefinition, ShapeDefinition,
    ShapeStyle, TriangleDefinition,
};
pub use sketch::Sketch;
pub use stroke::{StrokeCap, StrokeDefinition, StrokeJoin, StrokeStyle};
pub use text::{
    DEFAULT_FONT_FAMILY, FontWeight, Text, TextAnchor, TextDefinition, VerticalAlign,
};

/// Something with an intrinsic size that renders itself around a center point.
pub trait Drawable: fmt::Debug {
    /// Renders the drawable centered at `position`, organized by layers.
    fn render_to_layers(&self, position: Point) -> LayeredOutput;

    /// Returns the size the drawable occupies.
    fn size(&self) -> Size;
}
