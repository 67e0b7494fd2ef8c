//! Helpers shared by the renderers: value formatting, linear scales,
//! text placement, legends and the empty-state placeholder.

use log::debug;

use slidegraph_core::{
    color::Color,
    draw::{RenderLayer, ShapeStyle, Sketch, StrokeDefinition, Text, TextDefinition, VerticalAlign},
    geometry::{Bounds, EPSILON, Insets, Point, Size},
    metrics::{MIN_LEGIBLE_FONT_SIZE, line_height},
    text_layout::{FitBox, FittedText, LABEL_LADDER, fit_text, single_line},
};

use super::RenderContext;

/// Text shown by [`placeholder`].
pub const PLACEHOLDER_TEXT: &str = "No data";

/// Height reserved for a one-row legend.
pub const LEGEND_HEIGHT: f32 = 24.0;

/// Font size of axis ticks, legends and value labels.
pub const SMALL_FONT_SIZE: f32 = 12.0;

/// Replaces non-finite input values with zero.
pub fn finite(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Formats a data value for display.
///
/// Whole numbers print without decimals, everything else with at most two;
/// non-finite values print as `n/a`.
pub fn format_value(value: f64) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }
    if (value - value.round()).abs() < 1e-9 {
        return format!("{value:.0}");
    }
    let formatted = format!("{value:.2}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Formats a value with an explicit sign, as used for deltas.
pub fn format_signed(value: f64) -> String {
    if value.is_finite() && value > 0.0 {
        format!("+{}", format_value(value))
    } else {
        format_value(value)
    }
}

/// Maps data values onto a pixel range.
///
/// `start` is where the domain minimum lands; pass the bottom edge as
/// `start` for upward-growing value axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    min: f64,
    max: f64,
    start: f32,
    end: f32,
}

impl LinearScale {
    /// Creates a scale over `min..=max`; an empty or non-finite domain
    /// becomes `0..=1`.
    pub fn new(min: f64, max: f64, start: f32, end: f32) -> Self {
        let (min, max) = if min.is_finite() && max.is_finite() && max - min > f64::EPSILON {
            (min, max)
        } else {
            (0.0, 1.0)
        };
        Self {
            min,
            max,
            start,
            end,
        }
    }

    /// Creates a scale whose domain always includes zero, so bars anchor on a
    /// baseline inside the range.
    pub fn zero_based(values: impl IntoIterator<Item = f64>, start: f32, end: f32) -> Self {
        let (min, max) = values
            .into_iter()
            .map(finite)
            .fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
        Self::new(min, max, start, end)
    }

    #[cfg(test)]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[cfg(test)]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Maps a value, clamping it into the domain first.
    pub fn map(&self, value: f64) -> f32 {
        let value = finite(value).clamp(self.min, self.max);
        let ratio = unit_ratio(value, self.min, self.max) as f32;
        self.start + ratio * (self.end - self.start)
    }

    /// Position of the zero baseline.
    pub fn zero(&self) -> f32 {
        self.map(0.0)
    }

    /// `count` evenly spaced tick values from `min` to `max`.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        if count < 2 {
            return vec![self.min];
        }
        let last = (count - 1) as f64;
        (0..count)
            .map(|i| {
                let t = i as f64 / last;
                self.min * (1.0 - t) + self.max * t
            })
            .collect()
    }
}

/// Fraction of the way `value` lies from `min` to `max`.
///
/// The domain is rescaled by its largest magnitude first, so a range wider
/// than `f64::MAX` (say `-1e308..=1e308`) still yields a finite ratio.
/// Degenerate domains map everything to 0.
pub fn unit_ratio(value: f64, min: f64, max: f64) -> f64 {
    let magnitude = min.abs().max(max.abs());
    if !magnitude.is_finite() || magnitude <= 0.0 {
        return 0.0;
    }
    let span = max / magnitude - min / magnitude;
    let ratio = (value / magnitude - min / magnitude) / span;
    if ratio.is_finite() { ratio } else { 0.0 }
}

/// Lays out `text` inside `bounds`, or returns `None` when even the smallest
/// ladder size cannot keep one line inside the box.
pub fn fit_in(text: &str, bounds: Bounds, ladder: &[f32]) -> Option<FittedText> {
    if text.trim().is_empty() {
        return None;
    }
    let fitted = fit_text(text, FitBox::new(bounds.width(), bounds.height()), ladder);
    let fits = !fitted.is_empty()
        && fitted.width() <= bounds.width() + EPSILON
        && fitted.height() <= bounds.height() + EPSILON;
    fits.then_some(fitted)
}

/// Draws fitted text, deriving the style's size from the fitted size.
pub fn draw_fitted(
    sketch: &mut Sketch,
    style: &TextDefinition,
    fitted: &FittedText,
    bounds: Bounds,
    valign: VerticalAlign,
) -> Bounds {
    let style = style.clone().with_font_size(fitted.font_size());
    let text = Text::fitted(&style, fitted);
    sketch.text(&text, bounds, valign)
}

/// Fits and draws `text` inside `bounds`; returns the occupied bounds.
pub fn label(
    sketch: &mut Sketch,
    style: &TextDefinition,
    text: &str,
    bounds: Bounds,
    ladder: &[f32],
    valign: VerticalAlign,
) -> Option<Bounds> {
    let fitted = fit_in(text, bounds, ladder)?;
    Some(draw_fitted(sketch, style, &fitted, bounds, valign))
}

/// Draws a single non-wrapping line truncated to the width of `bounds`.
///
/// Nothing is drawn when `bounds` is shorter than one line.
pub fn line_label(
    sketch: &mut Sketch,
    style: &TextDefinition,
    text: &str,
    bounds: Bounds,
    valign: VerticalAlign,
) -> Option<Bounds> {
    if bounds.height() + EPSILON < line_height(style.font_size()) {
        return None;
    }
    let fitted = single_line(text, bounds.width(), style.font_size());
    if fitted.is_empty() || fitted.width() > bounds.width() + EPSILON {
        return None;
    }
    Some(draw_fitted(sketch, style, &fitted, bounds, valign))
}

/// Labels a shape: centered inside at a legible size when the text fits
/// whole, otherwise beside the shape in `adjacent`.
///
/// Without an adjacent box the label stays inside, ellipsised if needed.
pub fn shape_label(
    sketch: &mut Sketch,
    ctx: &RenderContext<'_>,
    text: &str,
    inside: Bounds,
    fill: Color,
    adjacent: Option<Bounds>,
) -> Option<Bounds> {
    let inside_style = ctx.label_on(fill, MIN_LEGIBLE_FONT_SIZE);
    let fitted = fit_in(text, inside, LABEL_LADDER);
    match (fitted, adjacent) {
        (Some(fitted), _) if !fitted.truncated() => Some(draw_fitted(
            sketch,
            &inside_style,
            &fitted,
            inside,
            VerticalAlign::Middle,
        )),
        (_, Some(adjacent)) => {
            debug!(label = text; "Label placed beside its shape");
            let style = ctx.centered_style(MIN_LEGIBLE_FONT_SIZE);
            label(sketch, &style, text, adjacent, LABEL_LADDER, VerticalAlign::Top)
        }
        (Some(fitted), None) => Some(draw_fitted(
            sketch,
            &inside_style,
            &fitted,
            inside,
            VerticalAlign::Middle,
        )),
        (None, None) => None,
    }
}

/// Draws a one-row legend of color swatches and names.
pub fn legend(sketch: &mut Sketch, ctx: &RenderContext<'_>, entries: &[(&str, Color)], bounds: Bounds) {
    if entries.is_empty() {
        return;
    }
    let swatch = 12.0_f32.min(bounds.height());
    let style = ctx.muted_style(SMALL_FONT_SIZE);
    for (cell, (name, color)) in bounds.split_columns(entries.len(), 12.0).into_iter().zip(entries) {
        let swatch_bounds = Bounds::new_from_center(
            Point::new(cell.min_x() + swatch / 2.0, cell.center().y()),
            Size::new(swatch, swatch),
        );
        if cell.width() < swatch {
            continue;
        }
        sketch.rect(RenderLayer::Marker, swatch_bounds, &ShapeStyle::filled(*color), 2.0);
        let text_box = cell.right_of(swatch, 6.0);
        line_label(sketch, &style, name, text_box, VerticalAlign::Middle);
    }
}

/// Fills the sketch with the empty-state placeholder.
pub fn placeholder(sketch: &mut Sketch, ctx: &RenderContext<'_>, reason: &'static str) {
    debug!(reason = reason; "Rendering empty-state placeholder");
    let clip = sketch.clip();
    let inset = (clip.width().min(clip.height()) * 0.1).min(16.0);
    let frame = clip.shrink(Insets::uniform(inset));
    let style = ShapeStyle::outlined(StrokeDefinition::dashed(ctx.theme().neutral(), 1.5));
    sketch.rect(RenderLayer::Background, frame, &style, 8.0);
    let text_style = ctx.centered_style(16.0).with_color(ctx.theme().muted_text());
    label(
        sketch,
        &text_style,
        PLACEHOLDER_TEXT,
        frame,
        &[16.0, 14.0, 12.0, MIN_LEGIBLE_FONT_SIZE],
        VerticalAlign::Middle,
    );
}

/// A solid hairline in the neutral color, for gridlines and axes.
pub fn grid_stroke(ctx: &RenderContext<'_>) -> StrokeDefinition {
    StrokeDefinition::solid(ctx.theme().neutral().with_alpha(0.45), 1.0)
}

/// A connector stroke in the neutral color.
pub fn connector_stroke(ctx: &RenderContext<'_>) -> StrokeDefinition {
    StrokeDefinition::solid(ctx.theme().neutral(), 1.5)
}

/// Moves `bounds` inside `area`, shrinking it first if it is larger.
pub fn shift_into(bounds: Bounds, area: Bounds) -> Bounds {
    let width = bounds.width().min(area.width());
    let height = bounds.height().min(area.height());
    let x = bounds.min_x().min(area.max_x() - width).max(area.min_x());
    let y = bounds.min_y().min(area.max_y() - height).max(area.min_y());
    Bounds::new_from_top_left(Point::new(x, y), Size::new(width, height))
}
