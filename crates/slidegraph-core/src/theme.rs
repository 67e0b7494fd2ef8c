//! Named color palettes for slides.
//!
//! A slide names one of a closed set of palettes ([`ColorSchemeName`]); the
//! name is resolved once per render into a [`ColorScheme`] which is then
//! passed by reference to every renderer. The palette tables are constant
//! data, so resolving never fails and never allocates beyond the series ramp.
//!
//! # Example
//!
//! ```
//! # use slidegraph_core::theme::{ColorScheme, ColorSchemeName};
//! let scheme = ColorScheme::resolve(ColorSchemeName::Ocean);
//! assert_eq!(scheme.name(), ColorSchemeName::Ocean);
//! assert_eq!(scheme.series_color(0), scheme.series_color(6));
//! ```

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::Color;

type Rgb = [u8; 3];

/// The closed set of palette names a slide may request.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorSchemeName {
    /// Navy and teal, the default business palette
    #[default]
    Corporate,
    /// Blues and aquas
    Ocean,
    /// Greens and earth tones
    Forest,
    /// Oranges and reds
    Sunset,
    /// Greyscale with a single accent
    Monochrome,
}

impl ColorSchemeName {
    /// All palette names, in declaration order.
    pub const ALL: [ColorSchemeName; 5] = [
        Self::Corporate,
        Self::Ocean,
        Self::Forest,
        Self::Sunset,
        Self::Monochrome,
    ];

    /// Returns the kebab-case name used in slide JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Corporate => "corporate",
            Self::Ocean => "ocean",
            Self::Forest => "forest",
            Self::Sunset => "sunset",
            Self::Monochrome => "monochrome",
        }
    }

    fn palette(self) -> &'static PaletteTable {
        match self {
            Self::Corporate => &CORPORATE,
            Self::Ocean => &OCEAN,
            Self::Forest => &FOREST,
            Self::Sunset => &SUNSET,
            Self::Monochrome => &MONOCHROME,
        }
    }
}

impl fmt::Display for ColorSchemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown palette name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown color scheme `{0}`, valid values: corporate, ocean, forest, sunset, monochrome")]
pub struct UnknownColorScheme(pub String);

impl FromStr for ColorSchemeName {
    type Err = UnknownColorScheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| UnknownColorScheme(s.to_string()))
    }
}

struct PaletteTable {
    primary: Rgb,
    secondary: Rgb,
    accent: Rgb,
    positive: Rgb,
    negative: Rgb,
    neutral: Rgb,
    background: Rgb,
    surface: Rgb,
    text: Rgb,
    muted_text: Rgb,
    series: [Rgb; 6],
}

static CORPORATE: PaletteTable = PaletteTable {
    primary: [31, 78, 121],
    secondary: [46, 134, 171],
    accent: [242, 153, 74],
    positive: [39, 174, 96],
    negative: [214, 69, 65],
    neutral: [149, 165, 166],
    background: [255, 255, 255],
    surface: [244, 247, 250],
    text: [33, 37, 41],
    muted_text: [108, 117, 125],
    series: [
        [31, 78, 121],
        [46, 134, 171],
        [242, 153, 74],
        [39, 174, 96],
        [142, 68, 173],
        [127, 140, 141],
    ],
};

static OCEAN: PaletteTable = PaletteTable {
    primary: [0, 95, 115],
    secondary: [10, 147, 150],
    accent: [238, 155, 0],
    positive: [42, 157, 143],
    negative: [174, 32, 18],
    neutral: [148, 163, 184],
    background: [255, 255, 255],
    surface: [236, 246, 248],
    text: [15, 23, 42],
    muted_text: [100, 116, 139],
    series: [
        [0, 95, 115],
        [10, 147, 150],
        [148, 210, 189],
        [238, 155, 0],
        [202, 103, 2],
        [0, 48, 73],
    ],
};

static FOREST: PaletteTable = PaletteTable {
    primary: [45, 106, 79],
    secondary: [64, 145, 108],
    accent: [221, 161, 94],
    positive: [82, 183, 136],
    negative: [188, 71, 73],
    neutral: [160, 160, 140],
    background: [255, 255, 255],
    surface: [241, 246, 240],
    text: [27, 38, 31],
    muted_text: [99, 112, 101],
    series: [
        [45, 106, 79],
        [64, 145, 108],
        [149, 213, 178],
        [221, 161, 94],
        [188, 108, 37],
        [96, 108, 56],
    ],
};

static SUNSET: PaletteTable = PaletteTable {
    primary: [181, 60, 46],
    secondary: [231, 111, 81],
    accent: [233, 196, 106],
    positive: [42, 157, 143],
    negative: [157, 2, 8],
    neutral: [170, 160, 150],
    background: [255, 255, 255],
    surface: [253, 244, 238],
    text: [45, 28, 25],
    muted_text: [122, 102, 96],
    series: [
        [181, 60, 46],
        [231, 111, 81],
        [244, 162, 97],
        [233, 196, 106],
        [42, 157, 143],
        [38, 70, 83],
    ],
};

static MONOCHROME: PaletteTable = PaletteTable {
    primary: [52, 58, 64],
    secondary: [108, 117, 125],
    accent: [0, 123, 255],
    positive: [73, 80, 87],
    negative: [173, 181, 189],
    neutral: [206, 212, 218],
    background: [255, 255, 255],
    surface: [248, 249, 250],
    text: [33, 37, 41],
    muted_text: [134, 142, 150],
    series: [
        [52, 58, 64],
        [108, 117, 125],
        [0, 123, 255],
        [173, 181, 189],
        [73, 80, 87],
        [206, 212, 218],
    ],
};

fn rgb(channels: Rgb) -> Color {
    Color::from_rgb8(channels[0], channels[1], channels[2])
}

/// A resolved palette.
///
/// Every renderer receives a `&ColorScheme`; nothing mutates it after
/// [`ColorScheme::resolve`] returns.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScheme {
    name: ColorSchemeName,
    primary: Color,
    secondary: Color,
    accent: Color,
    positive: Color,
    negative: Color,
    neutral: Color,
    background: Color,
    surface: Color,
    text: Color,
    muted_text: Color,
    series: Vec<Color>,
}

impl ColorScheme {
    /// Resolves a palette name into concrete colors.
    pub fn resolve(name: ColorSchemeName) -> Self {
        let table = name.palette();
        Self {
            name,
            primary: rgb(table.primary),
            secondary: rgb(table.secondary),
            accent: rgb(table.accent),
            positive: rgb(table.positive),
            negative: rgb(table.negative),
            neutral: rgb(table.neutral),
            background: rgb(table.background),
            surface: rgb(table.surface),
            text: rgb(table.text),
            muted_text: rgb(table.muted_text),
            series: table.series.iter().copied().map(rgb).collect(),
        }
    }

    /// Returns the palette name this scheme was resolved from.
    pub fn name(&self) -> ColorSchemeName {
        self.name
    }

    /// Main brand color: header band, totals, hierarchy roots.
    pub fn primary(&self) -> Color {
        self.primary
    }

    pub fn secondary(&self) -> Color {
        self.secondary
    }

    /// Highlight color for rules and emphasis.
    pub fn accent(&self) -> Color {
        self.accent
    }

    /// Color for increases and positive values.
    pub fn positive(&self) -> Color {
        self.positive
    }

    /// Color for decreases and negative values.
    pub fn negative(&self) -> Color {
        self.negative
    }

    /// Color for gridlines, connectors and placeholders.
    pub fn neutral(&self) -> Color {
        self.neutral
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Light fill used behind cards, table stripes and quadrants.
    pub fn surface(&self) -> Color {
        self.surface
    }

    pub fn text(&self) -> Color {
        self.text
    }

    pub fn muted_text(&self) -> Color {
        self.muted_text
    }

    /// Text color on top of the header band.
    pub fn header_text(&self) -> Color {
        if self.primary.is_dark() {
            self.background
        } else {
            self.text
        }
    }

    /// Returns a readable text color for content drawn on `fill`.
    pub fn text_on(&self, fill: Color) -> Color {
        if fill.alpha() > 0.5 && fill.is_dark() {
            self.background
        } else {
            self.text
        }
    }

    /// Returns the series color for index `index`, cycling through the ramp.
    pub fn series_color(&self, index: usize) -> Color {
        self.series[index % self.series.len()]
    }

    /// Returns the number of distinct series colors.
    pub fn series_len(&self) -> usize {
        self.series.len()
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::resolve(ColorSchemeName::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_scheme_resolves() {
        for name in ColorSchemeName::ALL {
            let scheme = ColorScheme::resolve(name);
            assert_eq!(scheme.name(), name);
            assert_eq!(scheme.series_len(), 6);
        }
    }

    #[test]
    fn test_scheme_name_round_trip_str() {
        for name in ColorSchemeName::ALL {
            assert_eq!(name.as_str().parse::<ColorSchemeName>(), Ok(name));
        }
        assert!("neon".parse::<ColorSchemeName>().is_err());
    }

    #[test]
    fn test_default_scheme_is_corporate() {
        let scheme = ColorScheme::default();
        assert_eq!(scheme.name(), ColorSchemeName::Corporate);
        assert_eq!(scheme.primary().to_hex(), "#1f4e79");
    }

    #[test]
    fn test_series_color_cycles() {
        let scheme = ColorScheme::default();
        assert_eq!(scheme.series_color(1), scheme.series_color(7));
    }

    #[test]
    fn test_header_text_contrasts_primary() {
        let scheme = ColorScheme::resolve(ColorSchemeName::Corporate);
        assert_eq!(scheme.header_text(), scheme.background());
    }
}
