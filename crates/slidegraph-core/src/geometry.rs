//! Geometric primitives for slide layout and positioning.
//!
//! This module provides the fundamental geometric types used throughout
//! SlideGraph for calculating positions, sizes, slots and bounding boxes.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in canvas space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangle defined by minimum and maximum coordinates
//! - [`Insets`] - Padding/margin values for four sides
//!
//! # Coordinate System
//!
//! SlideGraph uses a coordinate system consistent with SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! All values are `f32` logical units. Nothing in this module allocates or
//! holds state; every type is `Copy` and lives for a single render pass.

/// Tolerance used when checking containment, so that rounding in the
/// emitted markup does not register as a slot overflow.
pub const EPSILON: f32 = 0.01;

/// Replaces non-finite values with zero.
///
/// Every coordinate that reaches the SVG output goes through this function
/// (via [`px`]), so degenerate arithmetic can never leak `NaN` or `inf`.
pub fn sanitize(value: f32) -> f32 {
    if value.is_finite() { value } else { 0.0 }
}

/// Sanitizes and rounds a coordinate to two decimals for emission.
///
/// # Examples
///
/// ```
/// # use slidegraph_core::geometry::px;
/// assert_eq!(px(10.004), 10.0);
/// assert_eq!(px(f32::NAN), 0.0);
/// assert_eq!(px(f32::INFINITY), 0.0);
/// ```
pub fn px(value: f32) -> f32 {
    let rounded = (sanitize(value) * 100.0).round() / 100.0;
    // Avoid emitting "-0"
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// A 2D point representing a position in canvas space.
///
/// # Examples
///
/// ```
/// # use slidegraph_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
///
/// let mid = p1.midpoint(p2);
/// assert_eq!(mid.x(), 7.5);
/// assert_eq!(mid.y(), 12.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Creates a new point with the specified y-coordinate
    pub fn with_y(mut self, y: f32) -> Self {
        self.y = y;
        self
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Calculates the hypotenuse (Euclidean distance from origin)
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Multiplies both coordinates by the given factor.
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Returns the point at `angle` radians and distance `radius` from this point.
    ///
    /// Angle zero points straight up (12 o'clock) and grows clockwise, which is
    /// the convention every radial chart on a slide uses.
    ///
    /// # Examples
    ///
    /// ```
    /// # use slidegraph_core::geometry::Point;
    /// let center = Point::new(100.0, 100.0);
    /// let top = center.polar(50.0, 0.0);
    /// assert!((top.x() - 100.0).abs() < 1e-4);
    /// assert!((top.y() - 50.0).abs() < 1e-4);
    /// ```
    pub fn polar(self, radius: f32, angle: f32) -> Self {
        Self {
            x: self.x + radius * angle.sin(),
            y: self.y - radius * angle.cos(),
        }
    }

    /// Converts a point and size into a bounds rectangle
    ///
    /// The point is treated as the center of the bounds, and the size
    /// is distributed equally in all directions around that center.
    pub fn to_bounds(self, size: Size) -> Bounds {
        Bounds::new_from_center(self, size)
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns a new Size with the maximum width and height between this size and another
    pub fn max(self, other: Size) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }

    /// Multiplies both dimension by the given factor
    pub fn scale(self, factor: f32) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
        }
    }
}

/// Represents a rectangular bounding box with minimum and maximum coordinates.
///
/// Slots handed out by the slide composer are `Bounds`, as are the extents
/// recorded while drawing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates a new bounds from a center point and a size
    pub fn new_from_center(center: Point, size: Size) -> Self {
        let half_width = size.width / 2.0;
        let half_height = size.height / 2.0;
        Self {
            min_x: center.x - half_width,
            min_y: center.y - half_height,
            max_x: center.x + half_width,
            max_y: center.y + half_height,
        }
    }

    /// Creates a new bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Creates the smallest bounds enclosing every point.
    ///
    /// Returns `None` for an empty iterator.
    pub fn enclosing(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        points.into_iter().fold(None, |acc: Option<Bounds>, p| {
            let point_bounds = Bounds {
                min_x: p.x,
                min_y: p.y,
                max_x: p.x,
                max_y: p.y,
            };
            Some(match acc {
                Some(bounds) => bounds.merge(&point_bounds),
                None => point_bounds,
            })
        })
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the top-left corner as a Point
    pub fn min_point(self) -> Point {
        Point {
            x: self.min_x,
            y: self.min_y,
        }
    }

    /// Converts bounds to a Size object
    pub fn to_size(self) -> Size {
        Size {
            width: self.width(),
            height: self.height(),
        }
    }

    /// Merges two bounds to create a larger bounds that contains both.
    ///
    /// # Examples
    ///
    /// ```
    /// # use slidegraph_core::geometry::{Bounds, Point, Size};
    /// let header = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(100.0, 30.0));
    /// let content = Bounds::new_from_top_left(Point::new(10.0, 40.0), Size::new(120.0, 80.0));
    ///
    /// let combined = header.merge(&content);
    /// assert_eq!(combined.min_x(), 0.0);
    /// assert_eq!(combined.width(), 130.0);
    /// assert_eq!(combined.height(), 120.0);
    /// ```
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Shrinks the bounds by the given insets.
    ///
    /// The result never inverts: when the insets are larger than the bounds,
    /// the affected dimension collapses onto the center line.
    ///
    /// # Examples
    ///
    /// ```
    /// # use slidegraph_core::geometry::{Bounds, Insets, Point, Size};
    /// let slot = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(100.0, 50.0));
    /// let inner = slot.shrink(Insets::uniform(10.0));
    /// assert_eq!(inner.width(), 80.0);
    /// assert_eq!(inner.height(), 30.0);
    ///
    /// let collapsed = slot.shrink(Insets::uniform(40.0));
    /// assert_eq!(collapsed.height(), 0.0);
    /// assert_eq!(collapsed.center().y(), 25.0);
    /// ```
    pub fn shrink(&self, insets: Insets) -> Self {
        let mut min_x = self.min_x + insets.left();
        let mut max_x = self.max_x - insets.right();
        let mut min_y = self.min_y + insets.top();
        let mut max_y = self.max_y - insets.bottom();
        if min_x > max_x {
            let cx = (self.min_x + self.max_x) / 2.0;
            min_x = cx;
            max_x = cx;
        }
        if min_y > max_y {
            let cy = (self.min_y + self.max_y) / 2.0;
            min_y = cy;
            max_y = cy;
        }
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Returns the band of the given height at the top of these bounds.
    pub fn take_top(&self, height: f32) -> Self {
        let height = sanitize(height).min(self.height()).max(0.0);
        Self {
            max_y: self.min_y + height,
            ..*self
        }
    }

    /// Returns the band of the given height at the bottom of these bounds.
    pub fn take_bottom(&self, height: f32) -> Self {
        let height = sanitize(height).min(self.height()).max(0.0);
        Self {
            min_y: self.max_y - height,
            ..*self
        }
    }

    /// Returns the strip of the given width on the left of these bounds.
    pub fn take_left(&self, width: f32) -> Self {
        let width = sanitize(width).min(self.width()).max(0.0);
        Self {
            max_x: self.min_x + width,
            ..*self
        }
    }

    /// Returns what remains below a top band of the given height, minus `gap`.
    pub fn below(&self, height: f32, gap: f32) -> Self {
        let top = (self.min_y + height + gap).min(self.max_y);
        Self {
            min_y: top,
            ..*self
        }
    }

    /// Returns what remains to the right of a left strip of the given width, minus `gap`.
    pub fn right_of(&self, width: f32, gap: f32) -> Self {
        let left = (self.min_x + width + gap).min(self.max_x);
        Self {
            min_x: left,
            ..*self
        }
    }

    /// Splits the bounds into `count` equal-width columns separated by `gap`.
    ///
    /// Returns an empty vector for `count == 0`. When the gaps would consume
    /// the entire width, the columns collapse to zero width instead of
    /// overlapping.
    ///
    /// # Examples
    ///
    /// ```
    /// # use slidegraph_core::geometry::{Bounds, Point, Size};
    /// let body = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(320.0, 100.0));
    /// let columns = body.split_columns(3, 10.0);
    /// assert_eq!(columns.len(), 3);
    /// assert_eq!(columns[0].width(), 100.0);
    /// assert_eq!(columns[1].min_x(), 110.0);
    /// assert_eq!(columns[2].max_x(), 320.0);
    /// ```
    pub fn split_columns(&self, count: usize, gap: f32) -> Vec<Bounds> {
        self.split_columns_weighted(&vec![1.0; count], gap)
    }

    /// Splits the bounds into columns whose widths are proportional to `weights`.
    ///
    /// Non-positive or non-finite weights count as zero; when every weight
    /// is zero the columns are distributed evenly.
    pub fn split_columns_weighted(&self, weights: &[f32], gap: f32) -> Vec<Bounds> {
        let count = weights.len();
        if count == 0 {
            return Vec::new();
        }
        let total_gap = gap * (count - 1) as f32;
        let available = (self.width() - total_gap).max(0.0);
        let gap = if available > 0.0 { gap } else { 0.0 };
        let shares = normalized_shares(weights);

        let mut columns = Vec::with_capacity(count);
        let mut x = self.min_x;
        for (index, share) in shares.iter().enumerate() {
            let width = if index + 1 == count && available > 0.0 {
                (self.max_x - x).max(0.0)
            } else {
                (available * share).min(self.max_x - x).max(0.0)
            };
            columns.push(Bounds {
                min_x: x,
                min_y: self.min_y,
                max_x: x + width,
                max_y: self.max_y,
            });
            x = (x + width + gap).min(self.max_x);
        }
        columns
    }

    /// Splits the bounds into `count` equal-height rows separated by `gap`.
    pub fn split_rows(&self, count: usize, gap: f32) -> Vec<Bounds> {
        if count == 0 {
            return Vec::new();
        }
        let total_gap = gap * (count - 1) as f32;
        let available = (self.height() - total_gap).max(0.0);
        let gap = if available > 0.0 { gap } else { 0.0 };
        let row_height = available / count as f32;

        let mut rows = Vec::with_capacity(count);
        let mut y = self.min_y;
        for index in 0..count {
            let height = if index + 1 == count && available > 0.0 {
                (self.max_y - y).max(0.0)
            } else {
                row_height
            };
            rows.push(Bounds {
                min_x: self.min_x,
                min_y: y,
                max_x: self.max_x,
                max_y: y + height,
            });
            y = (y + height + gap).min(self.max_y);
        }
        rows
    }

    /// Splits the bounds into a left and right part, `ratio` being the left share.
    pub fn split_horizontal(&self, ratio: f32, gap: f32) -> (Bounds, Bounds) {
        let ratio = sanitize(ratio).clamp(0.0, 1.0);
        let columns = self.split_columns_weighted(&[ratio, 1.0 - ratio], gap);
        (columns[0], columns[1])
    }

    /// Returns true if the point lies inside the bounds (edges included).
    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.min_x - EPSILON
            && point.x <= self.max_x + EPSILON
            && point.y >= self.min_y - EPSILON
            && point.y <= self.max_y + EPSILON
    }

    /// Returns true if `other` lies entirely inside these bounds.
    pub fn contains_bounds(&self, other: &Bounds) -> bool {
        self.contains_point(other.min_point()) && self.contains_point(Point::new(other.max_x, other.max_y))
    }

    /// Returns true if the interiors of the two bounds overlap.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min_x < other.max_x - EPSILON
            && other.min_x < self.max_x - EPSILON
            && self.min_y < other.max_y - EPSILON
            && other.min_y < self.max_y - EPSILON
    }

    /// Returns a square of side `min(width, height)` centered in these bounds.
    pub fn centered_square(&self) -> Bounds {
        let side = self.width().min(self.height()).max(0.0);
        Bounds::new_from_center(self.center(), Size::new(side, side))
    }
}

fn normalized_shares(weights: &[f32]) -> Vec<f32> {
    let cleaned: Vec<f32> = weights
        .iter()
        .map(|w| if w.is_finite() && *w > 0.0 { *w } else { 0.0 })
        .collect();
    let total: f32 = cleaned.iter().sum();
    if total <= 0.0 {
        let even = 1.0 / weights.len() as f32;
        return vec![even; weights.len()];
    }
    cleaned.iter().map(|w| w / total).collect()
}

/// Represents spacing around an element (padding, margin, etc.)
/// with potentially different values for each side
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    /// Creates new insets with specified values for each side
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Creates uniform insets with the same value for all sides
    pub fn uniform(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Creates insets with one value for top/bottom and one for left/right
    pub fn symmetric(vertical: f32, horizontal: f32) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// Returns the top inset value
    pub fn top(self) -> f32 {
        self.top
    }

    /// Returns the right inset value
    pub fn right(self) -> f32 {
        self.right
    }

    /// Returns the bottom inset value
    pub fn bottom(self) -> f32 {
        self.bottom
    }

    /// Returns the left inset value
    pub fn left(self) -> f32 {
        self.left
    }

    /// Returns the sum of left and right insets
    pub fn horizontal_sum(self) -> f32 {
        self.left + self.right
    }

    /// Returns the sum of top and bottom insets
    pub fn vertical_sum(self) -> f32 {
        self.top + self.bottom
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Bounds {
        Bounds::new_from_top_left(Point::new(x, y), Size::new(w, h))
    }

    #[test]
    fn test_point_add_sub() {
        let p1 = Point::new(3.0, 4.0);
        let p2 = Point::new(1.0, 2.0);
        assert_eq!(p1.add_point(p2), Point::new(4.0, 6.0));
        assert_eq!(p1.sub_point(p2), Point::new(2.0, 2.0));
    }

    #[test]
    fn test_point_hypot() {
        assert_eq!(Point::new(3.0, 4.0).hypot(), 5.0);
        assert_eq!(Point::default().hypot(), 0.0);
    }

    #[test]
    fn test_point_polar_quarter_turns() {
        let center = Point::new(0.0, 0.0);
        let right = center.polar(10.0, std::f32::consts::FRAC_PI_2);
        assert_approx_eq!(f32, right.x(), 10.0, epsilon = 1e-4);
        assert_approx_eq!(f32, right.y(), 0.0, epsilon = 1e-4);

        let bottom = center.polar(10.0, std::f32::consts::PI);
        assert_approx_eq!(f32, bottom.x(), 0.0, epsilon = 1e-4);
        assert_approx_eq!(f32, bottom.y(), 10.0, epsilon = 1e-4);
    }

    #[test]
    fn test_px_sanitizes() {
        assert_eq!(px(f32::NAN), 0.0);
        assert_eq!(px(f32::NEG_INFINITY), 0.0);
        assert_eq!(px(-0.001), 0.0);
        assert_eq!(px(1.236), 1.24);
    }

    #[test]
    fn test_bounds_new_from_center() {
        let bounds = Bounds::new_from_center(Point::new(50.0, 60.0), Size::new(20.0, 30.0));
        assert_eq!(bounds.min_x(), 40.0);
        assert_eq!(bounds.min_y(), 45.0);
        assert_eq!(bounds.max_x(), 60.0);
        assert_eq!(bounds.max_y(), 75.0);
        assert_eq!(bounds.center(), Point::new(50.0, 60.0));
    }

    #[test]
    fn test_bounds_enclosing() {
        let bounds = Bounds::enclosing([
            Point::new(5.0, 1.0),
            Point::new(-2.0, 8.0),
            Point::new(3.0, 3.0),
        ])
        .unwrap();
        assert_eq!(bounds, rect(-2.0, 1.0, 7.0, 7.0));
        assert!(Bounds::enclosing(Vec::new()).is_none());
    }

    #[test]
    fn test_split_columns_even() {
        let body = rect(10.0, 0.0, 300.0, 100.0);
        let columns = body.split_columns(2, 20.0);
        assert_eq!(columns.len(), 2);
        assert_approx_eq!(f32, columns[0].width(), 140.0);
        assert_approx_eq!(f32, columns[1].width(), 140.0);
        assert_approx_eq!(f32, columns[1].min_x(), 170.0);
        assert!(!columns[0].intersects(&columns[1]));
    }

    #[test]
    fn test_split_columns_zero() {
        assert!(rect(0.0, 0.0, 100.0, 100.0).split_columns(0, 5.0).is_empty());
    }

    #[test]
    fn test_split_columns_weighted() {
        let body = rect(0.0, 0.0, 400.0, 100.0);
        let columns = body.split_columns_weighted(&[1.0, 3.0], 0.0);
        assert_approx_eq!(f32, columns[0].width(), 100.0);
        assert_approx_eq!(f32, columns[1].width(), 300.0);

        let fallback = body.split_columns_weighted(&[0.0, f32::NAN], 0.0);
        assert_approx_eq!(f32, fallback[0].width(), 200.0);
    }

    #[test]
    fn test_split_columns_gap_larger_than_width() {
        let narrow = rect(0.0, 0.0, 10.0, 10.0);
        let columns = narrow.split_columns(3, 20.0);
        for column in &columns {
            assert!(narrow.contains_bounds(column));
            assert!(column.width() >= 0.0);
        }
    }

    #[test]
    fn test_split_rows() {
        let body = rect(0.0, 0.0, 100.0, 310.0);
        let rows = body.split_rows(3, 5.0);
        assert_approx_eq!(f32, rows[0].height(), 100.0);
        assert_approx_eq!(f32, rows[2].max_y(), 310.0);
        assert!(!rows[0].intersects(&rows[1]));
    }

    #[test]
    fn test_split_horizontal_ratio() {
        let body = rect(0.0, 0.0, 110.0, 50.0);
        let (left, right) = body.split_horizontal(0.3, 10.0);
        assert_approx_eq!(f32, left.width(), 30.0, epsilon = 1e-3);
        assert_approx_eq!(f32, right.width(), 70.0, epsilon = 1e-3);
    }

    #[test]
    fn test_take_and_below() {
        let body = rect(0.0, 0.0, 100.0, 100.0);
        let header = body.take_top(20.0);
        let rest = body.below(20.0, 5.0);
        assert_eq!(header.height(), 20.0);
        assert_eq!(rest.min_y(), 25.0);
        assert_eq!(body.take_bottom(30.0).min_y(), 70.0);
        assert_eq!(body.take_top(500.0).height(), 100.0);
    }

    #[test]
    fn test_contains_and_intersects() {
        let outer = rect(0.0, 0.0, 100.0, 100.0);
        assert!(outer.contains_bounds(&rect(10.0, 10.0, 20.0, 20.0)));
        assert!(!outer.contains_bounds(&rect(90.0, 90.0, 20.0, 20.0)));
        assert!(outer.intersects(&rect(90.0, 90.0, 20.0, 20.0)));
        // Touching edges do not intersect
        assert!(!outer.intersects(&rect(100.0, 0.0, 20.0, 20.0)));
    }

    #[test]
    fn test_centered_square() {
        let square = rect(0.0, 0.0, 200.0, 100.0).centered_square();
        assert_eq!(square.width(), 100.0);
        assert_eq!(square.min_x(), 50.0);
    }

    #[test]
    fn test_insets_sums() {
        let insets = Insets::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(insets.horizontal_sum(), 6.0);
        assert_eq!(insets.vertical_sum(), 4.0);
        assert_eq!(Insets::symmetric(2.0, 5.0).horizontal_sum(), 10.0);
    }
}
