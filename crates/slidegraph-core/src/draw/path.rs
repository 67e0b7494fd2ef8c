//! Path construction with extent tracking.
//!
//! [`PathBuilder`] wraps the `svg` crate's path [`Data`] and records every
//! point the outline passes through, so a [`Sketch`](super::Sketch) can
//! account for the path's extent without parsing the emitted markup. Arcs
//! are sampled along their sweep for the same reason.

use std::f32::consts::PI;

use svg::node::element::path::Data;

use crate::geometry::{Bounds, Point, px};

const ARC_SAMPLE_STEP: f32 = PI / 12.0;

/// Fluent builder for SVG path outlines.
///
/// # Examples
///
/// ```
/// # use slidegraph_core::draw::PathBuilder;
/// # use slidegraph_core::geometry::Point;
/// let path = PathBuilder::new()
///     .move_to(Point::new(0.0, 0.0))
///     .line_to(Point::new(10.0, 0.0))
///     .line_to(Point::new(10.0, 5.0))
///     .close();
/// let bounds = path.bounds().unwrap();
/// assert_eq!(bounds.width(), 10.0);
/// assert_eq!(bounds.height(), 5.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    data: Data,
    points: Vec<Point>,
    current: Option<Point>,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new subpath at `point`.
    pub fn move_to(mut self, point: Point) -> Self {
        let point = rounded(point);
        self.data = self.data.move_to(vec![point.x(), point.y()]);
        self.record(point);
        self
    }

    /// Draws a straight segment to `point`.
    pub fn line_to(mut self, point: Point) -> Self {
        let point = rounded(point);
        self.data = self.data.line_to(vec![point.x(), point.y()]);
        self.record(point);
        self
    }

    /// Draws a circular arc around `center` from angle `from` to angle `to`.
    ///
    /// Angles follow [`Point::polar`]: zero is 12 o'clock, growing
    /// clockwise. The current point is expected to sit at `from`; when no
    /// subpath is open one is started there.
    pub fn arc_around(mut self, center: Point, radius: f32, from: f32, to: f32) -> Self {
        let radius = px(radius.max(0.0));
        let start = center.polar(radius, from);
        if self.current.is_none() {
            self = self.move_to(start);
        }

        let sweep = to - from;
        let end = rounded(center.polar(radius, to));
        let large_arc = if sweep.abs() > PI { 1.0 } else { 0.0 };
        let clockwise = if sweep >= 0.0 { 1.0 } else { 0.0 };
        self.data = self.data.elliptical_arc_to(vec![
            radius, radius, 0.0, large_arc, clockwise, end.x(), end.y(),
        ]);

        let steps = (sweep.abs() / ARC_SAMPLE_STEP).ceil().max(1.0) as usize;
        for step in 1..steps {
            let angle = from + sweep * step as f32 / steps as f32;
            self.points.push(rounded(center.polar(radius, angle)));
        }
        self.record(end);
        self
    }

    /// Closes the current subpath.
    pub fn close(mut self) -> Self {
        self.data = self.data.close();
        self.current = None;
        self
    }

    /// Returns the bounds of every point the path visits, or `None` for an
    /// empty path.
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::enclosing(self.points.iter().copied())
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Consumes the builder, returning the path data.
    pub fn into_data(self) -> Data {
        self.data
    }

    fn record(&mut self, point: Point) {
        self.points.push(point);
        self.current = Some(point);
    }
}

fn rounded(point: Point) -> Point {
    Point::new(px(point.x()), px(point.y()))
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_empty_path_has_no_bounds() {
        let path = PathBuilder::new();
        assert!(path.is_empty());
        assert!(path.bounds().is_none());
    }

    #[test]
    fn test_arc_bounds_cover_sweep() {
        let center = Point::new(100.0, 100.0);
        // Quarter from 12 o'clock to 3 o'clock
        let path = PathBuilder::new()
            .move_to(center)
            .line_to(center.polar(50.0, 0.0))
            .arc_around(center, 50.0, 0.0, FRAC_PI_2)
            .close();
        let bounds = path.bounds().unwrap();
        assert_approx_eq!(f32, bounds.min_x(), 100.0, epsilon = 0.01);
        assert_approx_eq!(f32, bounds.min_y(), 50.0, epsilon = 0.01);
        assert_approx_eq!(f32, bounds.max_x(), 150.0, epsilon = 0.01);
        assert_approx_eq!(f32, bounds.max_y(), 100.0, epsilon = 0.01);
    }

    #[test]
    fn test_nan_coordinates_are_sanitized() {
        let path = PathBuilder::new()
            .move_to(Point::new(f32::NAN, 1.0))
            .line_to(Point::new(2.0, f32::INFINITY));
        let bounds = path.bounds().unwrap();
        assert_eq!(bounds.min_x(), 0.0);
        assert_eq!(bounds.max_y(), 1.0);

        let markup = svg::node::element::Path::new()
            .set("d", path.into_data())
            .to_string();
        assert!(!markup.contains("NaN"));
        assert!(!markup.contains("inf"));
    }
}
