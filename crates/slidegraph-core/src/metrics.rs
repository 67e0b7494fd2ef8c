//! Approximate text metrics.
//!
//! Slides are rendered without access to real font files, so text extents
//! are estimated from per-character em factors. The estimate is
//! deterministic across platforms and strictly increasing in both string
//! length and font size, which keeps every wrapping and fallback decision
//! stable from one run to the next.
//!
//! # Examples
//!
//! ```
//! # use slidegraph_core::metrics::text_width;
//! let short = text_width("Revenue", 16.0);
//! let long = text_width("Revenue growth", 16.0);
//! assert!(long > short);
//! assert!(text_width("Revenue", 20.0) > short);
//! ```

/// Ratio between line height and font size.
pub const LINE_HEIGHT_FACTOR: f32 = 1.3;

/// Smallest font size any renderer is allowed to fall back to.
pub const MIN_LEGIBLE_FONT_SIZE: f32 = 11.0;

/// Returns true for characters that occupy a full em (CJK ideographs,
/// kana, hangul, full-width forms).
pub fn is_wide(c: char) -> bool {
    matches!(c as u32,
        0x1100..=0x115F
        | 0x2E80..=0x303E
        | 0x3041..=0x33FF
        | 0x3400..=0x4DBF
        | 0x4E00..=0x9FFF
        | 0xA000..=0xA4CF
        | 0xAC00..=0xD7A3
        | 0xF900..=0xFAFF
        | 0xFE30..=0xFE4F
        | 0xFF00..=0xFF60
        | 0xFFE0..=0xFFE6
        | 0x1F300..=0x1FAFF
        | 0x20000..=0x2FFFD)
}

/// Returns the estimated advance of `c` in ems.
///
/// Every character has a strictly positive advance.
pub fn char_em(c: char) -> f32 {
    if is_wide(c) {
        return 1.0;
    }
    match c {
        ' ' | '\u{00A0}' => 0.28,
        'i' | 'j' | 'l' | '!' | '|' | '.' | ',' | ':' | ';' | '\'' | '`' => 0.28,
        'f' | 't' | 'r' | 'I' | '(' | ')' | '[' | ']' | '-' => 0.36,
        'm' | 'w' | 'M' | 'W' | '@' | '%' => 0.86,
        'A'..='Z' => 0.66,
        'a'..='z' | '0'..='9' => 0.54,
        '…' => 0.9,
        _ => 0.6,
    }
}

/// Estimates the rendered width of a single line of text.
pub fn text_width(text: &str, font_size: f32) -> f32 {
    let font_size = if font_size.is_finite() {
        font_size.max(0.0)
    } else {
        0.0
    };
    text.chars().map(char_em).sum::<f32>() * font_size
}

/// Returns the line height used for a given font size.
pub fn line_height(font_size: f32) -> f32 {
    font_size * LINE_HEIGHT_FACTOR
}

/// Estimates the height of a block of `lines` lines.
pub fn block_height(lines: usize, font_size: f32) -> f32 {
    lines as f32 * line_height(font_size)
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_empty_text_has_zero_width() {
        assert_approx_eq!(f32, text_width("", 16.0), 0.0);
    }

    #[test]
    fn test_wide_characters_take_full_em() {
        assert_approx_eq!(f32, text_width("売上", 10.0), 20.0);
        assert!(is_wide('構'));
        assert!(is_wide('カ'));
        assert!(!is_wide('a'));
    }

    #[test]
    fn test_invalid_font_size_is_zero_width() {
        assert_approx_eq!(f32, text_width("abc", f32::NAN), 0.0);
        assert_approx_eq!(f32, text_width("abc", -4.0), 0.0);
    }

    #[test]
    fn test_line_height() {
        assert_approx_eq!(f32, line_height(10.0), 13.0);
        assert_approx_eq!(f32, block_height(3, 10.0), 39.0);
    }

    proptest! {
        #[test]
        fn prop_width_monotonic_in_length(text in "\\PC{0,40}", extra in "\\PC{1,5}", size in 6.0f32..60.0) {
            let longer = format!("{text}{extra}");
            prop_assert!(text_width(&longer, size) > text_width(&text, size));
        }

        #[test]
        fn prop_width_monotonic_in_font_size(text in "\\PC{1,40}", size in 6.0f32..60.0, bump in 0.5f32..20.0) {
            prop_assert!(text_width(&text, size + bump) > text_width(&text, size));
        }
    }
}
