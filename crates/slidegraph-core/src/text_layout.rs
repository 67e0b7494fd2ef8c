//! Word wrapping, truncation and font-size fallback.
//!
//! All decisions are driven by the estimates in [`crate::metrics`], so the
//! same text always breaks the same way.
//!
//! # Break opportunities
//!
//! Text is broken at whitespace. In addition, every wide (CJK) character is
//! its own break atom and is glued to its neighbours without a space, so
//! Japanese or Chinese sentences without spaces still wrap.
//!
//! # Examples
//!
//! ```
//! # use slidegraph_core::text_layout::{wrap, truncate};
//! let lines = wrap("grow recurring revenue across regions", 120.0, 16.0);
//! assert!(lines.len() > 1);
//! assert_eq!(lines.join(" "), "grow recurring revenue across regions");
//!
//! assert_eq!(truncate("Quarterly results", 9), "Quarterl…");
//! ```

use crate::metrics::{MIN_LEGIBLE_FONT_SIZE, line_height, text_width};

/// The marker appended to truncated text.
pub const ELLIPSIS: &str = "…";

/// Default font-size fallback ladder for body text.
pub const BODY_LADDER: &[f32] = &[20.0, 18.0, 16.0, 14.0, 12.0];

/// Fallback ladder for labels inside shapes.
pub const LABEL_LADDER: &[f32] = &[16.0, 14.0, 13.0, 12.0, MIN_LEGIBLE_FONT_SIZE];

/// Slop tolerated when comparing estimated widths against a budget.
const WIDTH_SLOP: f32 = 0.01;

#[derive(Debug, Clone, Copy)]
struct Atom<'a> {
    text: &'a str,
    space_before: bool,
}

/// Splits a paragraph into break atoms.
fn atoms(paragraph: &str) -> Vec<Atom<'_>> {
    let mut result = Vec::new();
    for word in paragraph.split_whitespace() {
        let mut first = true;
        let mut run_start: Option<usize> = None;
        for (index, c) in word.char_indices() {
            if crate::metrics::is_wide(c) {
                if let Some(start) = run_start.take() {
                    result.push(Atom {
                        text: &word[start..index],
                        space_before: first,
                    });
                    first = false;
                }
                result.push(Atom {
                    text: &word[index..index + c.len_utf8()],
                    space_before: first,
                });
                first = false;
            } else if run_start.is_none() {
                run_start = Some(index);
            }
        }
        if let Some(start) = run_start {
            result.push(Atom {
                text: &word[start..],
                space_before: first,
            });
        }
    }
    result
}

/// Greedy word-wrap against a width budget.
///
/// Words are accumulated onto a line while the estimated width stays within
/// `max_width`; otherwise a new line starts. An atom wider than the budget is
/// placed alone on its own line rather than dropped. Explicit newlines start
/// new lines; blank lines are skipped.
///
/// Wrapping is idempotent: wrapping any output line again yields that line,
/// and wrapping the output lines of a single paragraph joined with spaces
/// reproduces the same lines.
pub fn wrap(text: &str, max_width: f32, font_size: f32) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        for atom in atoms(paragraph) {
            if current.is_empty() {
                current.push_str(atom.text);
                continue;
            }
            let mut candidate = current.clone();
            if atom.space_before {
                candidate.push(' ');
            }
            candidate.push_str(atom.text);
            if text_width(&candidate, font_size) <= max_width + WIDTH_SLOP {
                current = candidate;
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(atom.text);
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}

/// Truncates `text` to at most `max_chars` characters including the ellipsis.
///
/// Text that already fits is returned unchanged. At least one visible
/// character is always kept, so a budget of 0 or 1 yields `"x…"`.
///
/// # Examples
///
/// ```
/// # use slidegraph_core::text_layout::truncate;
/// assert_eq!(truncate("abc", 3), "abc");
/// assert_eq!(truncate("abcdef", 4), "abc…");
/// assert_eq!(truncate("abcdef", 0), "a…");
/// assert_eq!(truncate(&truncate("abcdef", 4), 4), "abc…");
/// ```
pub fn truncate(text: &str, max_chars: usize) -> String {
    let count = text.chars().count();
    if count <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(1).max(1);
    let prefix: String = text.chars().take(keep).collect();
    format!("{prefix}{ELLIPSIS}")
}

/// Truncates `text` so that its estimated width fits `max_width`.
///
/// Returns the text unchanged when it already fits. Otherwise returns the
/// longest prefix (at least one character) followed by an ellipsis.
pub fn truncate_to_width(text: &str, max_width: f32, font_size: f32) -> String {
    if text_width(text, font_size) <= max_width + WIDTH_SLOP {
        return text.to_string();
    }
    force_ellipsis(text, max_width, font_size)
}

/// Returns the longest prefix of `text` that fits with a trailing ellipsis.
fn force_ellipsis(text: &str, max_width: f32, font_size: f32) -> String {
    let trimmed = text.trim_end();
    let boundaries: Vec<usize> = trimmed
        .char_indices()
        .map(|(index, c)| index + c.len_utf8())
        .collect();
    for &end in boundaries.iter().rev() {
        let candidate = format!("{}{ELLIPSIS}", trimmed[..end].trim_end());
        if text_width(&candidate, font_size) <= max_width + WIDTH_SLOP {
            return candidate;
        }
    }
    let first: String = trimmed.chars().take(1).collect();
    format!("{first}{ELLIPSIS}")
}

/// Width and height budget for [`fit_text`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitBox {
    pub width: f32,
    pub height: f32,
}

impl FitBox {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Text laid out by [`fit_text`].
#[derive(Debug, Clone, PartialEq)]
pub struct FittedText {
    lines: Vec<String>,
    font_size: f32,
    truncated: bool,
}

impl FittedText {
    /// The laid-out lines, top to bottom.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The chosen font size.
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn line_height(&self) -> f32 {
        line_height(self.font_size)
    }

    /// Whether any content had to be cut to fit.
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    /// The height of the laid-out block.
    pub fn height(&self) -> f32 {
        self.lines.len() as f32 * self.line_height()
    }

    /// The width of the widest line.
    pub fn width(&self) -> f32 {
        self.lines
            .iter()
            .map(|line| text_width(line, self.font_size))
            .fold(0.0, f32::max)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Lays out text inside a box using a descending font-size ladder.
///
/// The largest size whose wrapped lines fit both the width and the height
/// of `fit_box` wins. When none fits, the smallest size is used: overlong
/// lines are truncated, the line count is capped to what fits (at least one)
/// and the last kept line is ellipsised.
///
/// # Examples
///
/// ```
/// # use slidegraph_core::text_layout::{fit_text, FitBox, BODY_LADDER};
/// let roomy = fit_text("Short label", FitBox::new(400.0, 100.0), BODY_LADDER);
/// assert_eq!(roomy.font_size(), 20.0);
/// assert!(!roomy.truncated());
///
/// let cramped = fit_text(
///     "A considerably longer sentence that cannot possibly fit",
///     FitBox::new(80.0, 20.0),
///     BODY_LADDER,
/// );
/// assert_eq!(cramped.font_size(), 12.0);
/// assert_eq!(cramped.lines().len(), 1);
/// assert!(cramped.truncated());
/// ```
pub fn fit_text(text: &str, fit_box: FitBox, ladder: &[f32]) -> FittedText {
    let smallest = ladder
        .last()
        .copied()
        .unwrap_or(MIN_LEGIBLE_FONT_SIZE);

    for &font_size in ladder {
        let lines = wrap(text, fit_box.width, font_size);
        let fits_height = lines.len() as f32 * line_height(font_size) <= fit_box.height + WIDTH_SLOP;
        let fits_width = lines
            .iter()
            .all(|line| text_width(line, font_size) <= fit_box.width + WIDTH_SLOP);
        if fits_height && fits_width {
            return FittedText {
                lines,
                font_size,
                truncated: false,
            };
        }
    }

    let font_size = smallest;
    let wrapped = wrap(text, fit_box.width, font_size);
    let max_lines = ((fit_box.height / line_height(font_size)).floor().max(1.0)) as usize;
    let overflow = wrapped.len() > max_lines;

    let mut truncated = overflow;
    let mut lines: Vec<String> = wrapped
        .into_iter()
        .take(max_lines)
        .map(|line| {
            let fitted = truncate_to_width(&line, fit_box.width, font_size);
            if fitted != line {
                truncated = true;
            }
            fitted
        })
        .collect();

    if overflow {
        if let Some(last) = lines.last_mut() {
            if !last.ends_with(ELLIPSIS) {
                *last = force_ellipsis(last, fit_box.width, font_size);
            }
        }
    }

    FittedText {
        lines,
        font_size,
        truncated,
    }
}

/// Lays out a single line, truncating it to the width budget.
///
/// Convenience for axis labels and legends that never wrap.
pub fn single_line(text: &str, max_width: f32, font_size: f32) -> FittedText {
    let line = truncate_to_width(text.lines().next().unwrap_or("").trim(), max_width, font_size);
    let truncated = line != text;
    FittedText {
        lines: if line.is_empty() { Vec::new() } else { vec![line] },
        font_size,
        truncated,
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_wrap_empty() {
        assert!(wrap("", 100.0, 12.0).is_empty());
        assert!(wrap("   ", 100.0, 12.0).is_empty());
    }

    #[test]
    fn test_wrap_fits_on_one_line() {
        assert_eq!(wrap("hello world", 1000.0, 12.0), vec!["hello world"]);
    }

    #[test]
    fn test_wrap_breaks_between_words() {
        let lines = wrap("alpha beta gamma delta", 60.0, 12.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, 12.0) <= 60.0 + WIDTH_SLOP);
        }
        assert_eq!(lines.join(" "), "alpha beta gamma delta");
    }

    #[test]
    fn test_wrap_long_word_alone_on_line() {
        let lines = wrap("a supercalifragilistic b", 40.0, 12.0);
        assert_eq!(lines, vec!["a", "supercalifragilistic", "b"]);
    }

    #[test]
    fn test_wrap_cjk_without_spaces() {
        let lines = wrap("売上高の前年比成長率", 50.0, 12.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), "売上高の前年比成長率");
        for line in &lines {
            assert!(text_width(line, 12.0) <= 50.0 + WIDTH_SLOP);
        }
    }

    #[test]
    fn test_wrap_honours_newlines() {
        assert_eq!(wrap("one\ntwo", 1000.0, 12.0), vec!["one", "two"]);
        assert_eq!(wrap("one\n\ntwo", 1000.0, 12.0), vec!["one", "two"]);
    }

    #[test]
    fn test_truncate_never_empty() {
        assert_eq!(truncate("abc", 0), "a…");
        assert_eq!(truncate("abc", 1), "a…");
        assert_eq!(truncate("", 0), "");
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        assert_eq!(truncate("売上高成長", 3), "売上…");
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("short", 500.0, 12.0), "short");
        let cut = truncate_to_width("a rather long line of text", 60.0, 12.0);
        assert!(cut.ends_with(ELLIPSIS));
        assert!(text_width(&cut, 12.0) <= 60.0 + WIDTH_SLOP);
        assert_eq!(truncate_to_width("abcdef", 0.0, 12.0), "a…");
    }

    #[test]
    fn test_fit_text_prefers_largest_size() {
        let fitted = fit_text("Short", FitBox::new(300.0, 100.0), BODY_LADDER);
        assert_eq!(fitted.font_size(), 20.0);
        assert_eq!(fitted.lines(), ["Short"]);
    }

    #[test]
    fn test_fit_text_steps_down_ladder() {
        // Two lines are needed down to 16px, which overflows the 40 unit height
        let text = "Expand into three new markets";
        let fitted = fit_text(text, FitBox::new(200.0, 40.0), BODY_LADDER);
        assert!(fitted.font_size() < 20.0);
        assert!(fitted.height() <= 40.0 + WIDTH_SLOP);
    }

    #[test]
    fn test_fit_text_truncates_last_line() {
        let text = "one two three four five six seven eight nine ten eleven twelve";
        let fitted = fit_text(text, FitBox::new(60.0, 32.0), BODY_LADDER);
        assert!(fitted.truncated());
        assert_eq!(fitted.lines().len(), 2);
        assert!(fitted.lines()[1].ends_with(ELLIPSIS));
        assert!(fitted.width() <= 60.0 + WIDTH_SLOP);
    }

    #[test]
    fn test_fit_text_empty() {
        let fitted = fit_text("", FitBox::new(60.0, 32.0), BODY_LADDER);
        assert!(fitted.is_empty());
        assert!(!fitted.truncated());
    }

    #[test]
    fn test_single_line() {
        let fitted = single_line("Revenue by region", 40.0, 12.0);
        assert_eq!(fitted.lines().len(), 1);
        assert!(fitted.truncated());
        assert!(single_line("", 40.0, 12.0).is_empty());
    }

    proptest! {
        #[test]
        fn prop_wrap_joined_is_idempotent(
            words in prop::collection::vec("[a-zA-Z]{1,12}|[売上成長計画戦略市場]{1,4}", 1..20),
            width in 20.0f32..400.0,
            size in 8.0f32..32.0,
        ) {
            let text = words.join(" ");
            let lines = wrap(&text, width, size);
            let rewrapped = wrap(&lines.join(" "), width, size);
            prop_assert_eq!(rewrapped, lines);
        }

        #[test]
        fn prop_wrap_line_by_line_is_idempotent(
            text in "[a-z ]{0,80}",
            width in 20.0f32..400.0,
            size in 8.0f32..32.0,
        ) {
            for line in wrap(&text, width, size) {
                prop_assert_eq!(wrap(&line, width, size), vec![line.clone()]);
            }
        }

        #[test]
        fn prop_wrap_never_drops_words(text in "[a-z ]{0,80}", width in 1.0f32..400.0) {
            let lines = wrap(&text, width, 12.0);
            let original: Vec<&str> = text.split_whitespace().collect();
            let joined = lines.join(" ");
            let rejoined: Vec<&str> = joined.split_whitespace().collect();
            prop_assert_eq!(rejoined, original);
        }

        #[test]
        fn prop_truncate_is_idempotent(text in "\\PC{0,30}", max in 0usize..40) {
            let once = truncate(&text, max);
            prop_assert_eq!(truncate(&once, max), once.clone());
            if !text.is_empty() {
                prop_assert!(once.chars().count() >= 1);
            }
        }
    }
}
