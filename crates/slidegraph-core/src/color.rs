//! Color handling for SlideGraph slides
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate, providing convenience methods for working with colors
//! in slide palettes and user-supplied fills.

use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::{AlphaColor, DynamicColor, Srgb};

/// Wrapper around the `DynamicColor` type from the color crate.
///
/// Colors are always emitted as `#rrggbb` hex strings with a separate
/// opacity attribute, which every SVG consumer understands.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_hex().hash(state);
        self.alpha().to_bits().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use slidegraph_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// let blue = Color::new("blue").unwrap();
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Creates an opaque color from 8-bit sRGB components.
    ///
    /// This constructor cannot fail, which makes it suitable for constant
    /// palette tables.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            color: DynamicColor::from_alpha_color(AlphaColor::<Srgb>::from_rgba8(r, g, b, 255)),
        }
    }

    /// Returns the color as an `#rrggbb` string, ignoring alpha.
    ///
    /// # Examples
    ///
    /// ```
    /// use slidegraph_core::color::Color;
    ///
    /// assert_eq!(Color::from_rgb8(31, 78, 121).to_hex(), "#1f4e79");
    /// assert_eq!(Color::new("white").unwrap().to_hex(), "#ffffff");
    /// ```
    pub fn to_hex(self) -> String {
        let rgba = self.color.to_alpha_color::<Srgb>().to_rgba8();
        format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
    }

    /// Mixes this color with white.
    ///
    /// `amount` of `0.0` keeps the color, `1.0` yields white. Used for the
    /// lighter tints of a palette (table stripes, quadrant backgrounds).
    pub fn tint(self, amount: f32) -> Self {
        self.mix(Self::from_rgb8(255, 255, 255), amount)
    }

    /// Mixes this color with black.
    pub fn shade(self, amount: f32) -> Self {
        self.mix(Self::from_rgb8(0, 0, 0), amount)
    }

    fn mix(self, other: Self, amount: f32) -> Self {
        let amount = if amount.is_finite() {
            amount.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let a = self.color.to_alpha_color::<Srgb>().to_rgba8();
        let b = other.color.to_alpha_color::<Srgb>().to_rgba8();
        let channel = |x: u8, y: u8| -> u8 {
            let mixed = f32::from(x) + (f32::from(y) - f32::from(x)) * amount;
            mixed.round().clamp(0.0, 255.0) as u8
        };
        Self::from_rgb8(channel(a.r, b.r), channel(a.g, b.g), channel(a.b, b.b))
            .with_alpha(self.alpha())
    }

    /// Creates a new color with the specified alpha (transparency) value.
    ///
    /// # Examples
    ///
    /// ```
    /// use slidegraph_core::color::Color;
    ///
    /// let red = Color::new("red").unwrap();
    /// let semi_transparent_red = red.with_alpha(0.5);
    /// assert_eq!(semi_transparent_red.alpha(), 0.5);
    /// ```
    pub fn with_alpha(self, alpha: f32) -> Self {
        Color {
            color: self.color.with_alpha(alpha),
        }
    }

    /// Returns the alpha (transparency) component of this color.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }

    /// Returns the relative luminance approximation in `0.0..=1.0`.
    ///
    /// Used to pick a readable text color on top of a fill.
    pub fn luminance(self) -> f32 {
        let rgba = self.color.to_alpha_color::<Srgb>().to_rgba8();
        (0.2126 * f32::from(rgba.r) + 0.7152 * f32::from(rgba.g) + 0.0722 * f32::from(rgba.b))
            / 255.0
    }

    /// Returns true when light text reads better than dark text on this color.
    pub fn is_dark(self) -> bool {
        self.luminance() < 0.55
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::from_rgb8(0, 0, 0)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_new() {
        assert!(Color::new("#ff0000").is_ok());
        assert!(Color::new("not-a-color").is_err());
    }

    #[test]
    fn test_color_default_is_black() {
        assert_eq!(Color::default().to_string(), "#000000");
    }

    #[test]
    fn test_color_with_alpha() {
        let color = Color::new("red").unwrap();
        let transparent = color.with_alpha(0.5);
        assert!((transparent.alpha() - 0.5).abs() < 0.001);
        assert_eq!(transparent.to_hex(), "#ff0000");
    }

    #[test]
    fn test_color_tint_and_shade() {
        let base = Color::from_rgb8(100, 100, 100);
        assert_eq!(base.tint(0.0).to_hex(), "#646464");
        assert_eq!(base.tint(1.0).to_hex(), "#ffffff");
        assert_eq!(base.shade(1.0).to_hex(), "#000000");
        assert_eq!(base.tint(f32::NAN).to_hex(), "#646464");
    }

    #[test]
    fn test_color_is_dark() {
        assert!(Color::from_rgb8(31, 78, 121).is_dark());
        assert!(!Color::from_rgb8(255, 255, 255).is_dark());
    }

    #[test]
    fn test_color_eq_hash() {
        use std::collections::HashSet;

        let color1 = Color::new("red").unwrap();
        let color2 = Color::new("red").unwrap();
        let color3 = Color::new("blue").unwrap();

        assert_eq!(color1, color2);
        assert_ne!(color1, color3);

        let mut set = HashSet::new();
        set.insert(color1);
        assert!(set.contains(&color2));
        assert!(!set.contains(&color3));
    }
}
