//! Bullet lists, numbered explanations and free text blocks.

use log::debug;

use slidegraph_core::{
    draw::{FontWeight, RenderLayer, ShapeStyle, Sketch, Text, TextAnchor, VerticalAlign},
    geometry::{Bounds, Point, Size},
    metrics::{block_height, line_height},
    text_layout::{BODY_LADDER, FittedText, wrap},
};

use super::{
    RenderContext,
    common::{self, draw_fitted},
};
use crate::model::{BulletList, NumberedExplanation, TextAlign, TextBlock};

const EMPHASIS_LADDER: &[f32] = &[32.0, 28.0, 24.0, 20.0, 18.0, 16.0, 14.0, 12.0];

const HEADING_LADDER: &[f32] = &[24.0, 22.0, 20.0, 18.0, 16.0];

/// Vertical gap between list items, relative to the font size.
const ITEM_GAP: f32 = 0.5;

/// Returns the largest ladder size at which `measure` fits `height`, or the
/// smallest size when none does.
fn choose_size(ladder: &[f32], height: f32, measure: impl Fn(f32) -> f32) -> (f32, bool) {
    for &size in ladder {
        if measure(size) <= height {
            return (size, true);
        }
    }
    (ladder.last().copied().unwrap_or(BODY_LADDER[0]), false)
}

pub fn bullet_list(list: &BulletList, sketch: &mut Sketch, ctx: &RenderContext<'_>) {
    let items: Vec<&str> = list
        .items
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .collect();
    let heading = list.heading.as_deref().map(str::trim).filter(|h| !h.is_empty());
    if items.is_empty() && heading.is_none() {
        common::placeholder(sketch, ctx, "bullet list without items");
        return;
    }

    let mut area = sketch.clip();
    if let Some(heading) = heading {
        let band = area.take_top(area.height() * 0.25);
        let style = ctx.text_style(HEADING_LADDER[0]).with_weight(FontWeight::Bold);
        if let Some(fitted) = common::fit_in(heading, band, HEADING_LADDER) {
            let placed = draw_fitted(sketch, &style, &fitted, band, VerticalAlign::Top);
            area = area.below(placed.height(), placed.height() * 0.4);
        }
    }

    let width = area.width();
    let measure = |size: f32| -> f32 {
        let text_width = (width - size * 1.2).max(0.0);
        let lines: usize = items.iter().map(|item| wrap(item, text_width, size).len()).sum();
        block_height(lines, size) + items.len().saturating_sub(1) as f32 * size * ITEM_GAP
    };
    let (size, fits) = choose_size(BODY_LADDER, area.height(), measure);
    if !fits {
        debug!(items = items.len(), size = size; "Bullet list does not fit, truncating");
    }

    let indent = size * 1.2;
    let style = ctx.text_style(size);
    let marker = ShapeStyle::filled(ctx.theme().primary());
    let mut cursor = area;
    for item in items {
        let text_box = cursor.right_of(indent, 0.0);
        let Some(fitted) = fit_item(item, text_box, size) else {
            break;
        };
        let placed = draw_fitted(sketch, &style, &fitted, text_box, VerticalAlign::Top);
        let marker_center = Point::new(
            cursor.min_x() + size * 0.4,
            placed.min_y() + fitted.line_height() / 2.0,
        );
        sketch.circle(RenderLayer::Marker, marker_center, size * 0.18, &marker);
        let used = placed.height() + size * ITEM_GAP;
        if used >= cursor.height() {
            break;
        }
        cursor = cursor.below(placed.height(), size * ITEM_GAP);
    }
}

/// Fits one list item at a fixed size; the last visible item is ellipsised.
fn fit_item(text: &str, bounds: Bounds, size: f32) -> Option<FittedText> {
    if bounds.height() < line_height(size) {
        return None;
    }
    common::fit_in(text, bounds, &[size])
}

pub fn numbered_explanation(
    list: &NumberedExplanation,
    sketch: &mut Sketch,
    ctx: &RenderContext<'_>,
) {
    let items: Vec<_> = list
        .items
        .iter()
        .filter(|item| !item.title.trim().is_empty())
        .collect();
    if items.is_empty() {
        common::placeholder(sketch, ctx, "numbered explanation without items");
        return;
    }

    let area = sketch.clip();
    let width = area.width();
    let measure = |size: f32| -> f32 {
        let badge = size * 1.8;
        let text_width = (width - badge - size).max(0.0);
        let total: f32 = items
            .iter()
            .map(|item| {
                let title = wrap(&item.title, text_width, size).len();
                let description = item
                    .description
                    .as_deref()
                    .map_or(0, |d| wrap(d, text_width, size * 0.85).len());
                (block_height(title, size) + block_height(description, size * 0.85)).max(badge)
            })
            .sum();
        total + items.len().saturating_sub(1) as f32 * size * ITEM_GAP
    };
    let (size, fits) = choose_size(BODY_LADDER, area.height(), measure);
    if !fits {
        debug!(items = items.len(), size = size; "Numbered explanation does not fit, truncating");
    }

    let badge = size * 1.8;
    let badge_style = ShapeStyle::filled(ctx.theme().primary());
    let number_style = ctx.label_on(ctx.theme().primary(), size * 0.8);
    let title_style = ctx.text_style(size).with_weight(FontWeight::Bold);
    let description_style = ctx.muted_style(size * 0.85);

    let mut cursor = area;
    for (index, item) in items.iter().enumerate() {
        if cursor.height() < badge.min(line_height(size)) {
            break;
        }
        let text_box = cursor.right_of(badge, size);
        let Some(title) = fit_item(&item.title, text_box, size) else {
            break;
        };
        let title_bounds = draw_fitted(sketch, &title_style, &title, text_box, VerticalAlign::Top);
        let mut bottom = title_bounds.max_y();

        if let Some(description) = item.description.as_deref() {
            let below = text_box.below(title_bounds.height(), 0.0);
            if let Some(fitted) = fit_item(description, below, size * 0.85) {
                let placed =
                    draw_fitted(sketch, &description_style, &fitted, below, VerticalAlign::Top);
                bottom = placed.max_y();
            }
        }

        let row_height = (bottom - cursor.min_y()).max(badge.min(cursor.height()));
        let badge_side = badge.min(cursor.height());
        let badge_bounds = Bounds::new_from_top_left(
            cursor.min_point(),
            Size::new(badge_side, badge_side),
        );
        sketch.circle(
            RenderLayer::Content,
            badge_bounds.center(),
            badge_side / 2.0,
            &badge_style,
        );
        let number = (index + 1).to_string();
        sketch.draw(badge_bounds.center(), &Text::single(&number_style, &number));

        cursor = cursor.below(row_height, size * ITEM_GAP);
    }
}

pub fn text_block(block: &TextBlock, sketch: &mut Sketch, ctx: &RenderContext<'_>) {
    let text = block.text.trim();
    if text.is_empty() {
        debug!("Skipping blank text block");
        return;
    }

    let area = sketch.clip();
    let (ladder, valign) = if block.emphasis {
        (EMPHASIS_LADDER, VerticalAlign::Middle)
    } else {
        (BODY_LADDER, VerticalAlign::Top)
    };
    let anchor = match block.align {
        TextAlign::Left => TextAnchor::Start,
        TextAlign::Center => TextAnchor::Middle,
        TextAlign::Right => TextAnchor::End,
    };
    let mut style = ctx.text_style(ladder[0]).with_anchor(anchor);
    if block.emphasis {
        style = style
            .with_weight(FontWeight::Bold)
            .with_color(ctx.theme().primary());
    }

    let Some(fitted) = common::fit_in(text, area, ladder) else {
        debug!(width = area.width(), height = area.height(); "Text block has no room in its slot");
        return;
    };
    if fitted.truncated() {
        debug!(chars = text.chars().count(); "Text block truncated to fit its slot");
    }
    draw_fitted(sketch, &style, &fitted, area, valign);
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::render::{
        common::PLACEHOLDER_TEXT,
        test_support::{markup, render, render_in},
    };

    #[test]
    fn test_bullet_list_draws_marker_per_item() {
        let sketch = render(json!({
            "type": "bullet-list",
            "items": ["Revenue up 12%", "", "Costs flat", "Margin expanded"]
        }));
        let svg = markup(sketch);
        assert_eq!(svg.matches("<circle").count(), 3);
        assert!(svg.contains("Costs flat"));
        assert!(svg.contains("font-size=\"20\""));
    }

    #[test]
    fn test_bullet_list_falls_back_to_smaller_font() {
        let items: Vec<String> = (0..10)
            .map(|i| format!("Item {i} with a sentence long enough to wrap at least once in a narrow column"))
            .collect();
        let slot = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(380.0, 300.0));
        let sketch = render_in(json!({ "type": "bullet-list", "items": items }), slot);
        let svg = markup(sketch);
        assert!(!svg.contains("font-size=\"20\""));
    }

    #[test]
    fn test_empty_bullet_list_shows_placeholder() {
        let sketch = render(json!({ "type": "bullet-list", "items": ["  "] }));
        assert!(markup(sketch).contains(PLACEHOLDER_TEXT));
    }

    #[test]
    fn test_bullet_list_heading() {
        let sketch = render(json!({
            "type": "bullet-list",
            "heading": "Highlights",
            "items": ["One"]
        }));
        let svg = markup(sketch);
        assert!(svg.contains("Highlights"));
        assert!(svg.contains("font-weight=\"bold\""));
    }

    #[test]
    fn test_numbered_explanation_badges() {
        let sketch = render(json!({
            "type": "numbered-explanation",
            "items": [
                { "title": "Discover", "description": "Interview ten customers" },
                { "title": "Define" },
                { "title": "Deliver", "description": "Ship the pilot" }
            ]
        }));
        let svg = markup(sketch);
        assert_eq!(svg.matches("<circle").count(), 3);
        assert!(svg.contains(">3<"));
        assert!(svg.contains("Ship the pilot"));
    }

    #[test]
    fn test_text_block_alignment_and_emphasis() {
        let sketch = render(json!({
            "type": "text-block",
            "text": "Growth is back",
            "emphasis": true,
            "align": "center"
        }));
        let svg = markup(sketch);
        assert!(svg.contains("text-anchor=\"middle\""));
        assert!(svg.contains("font-size=\"32\""));
        assert!(svg.contains("font-weight=\"bold\""));
    }

    #[test]
    fn test_text_block_overflow_is_ellipsised() {
        let text = "word ".repeat(400);
        let slot = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(300.0, 60.0));
        let sketch = render_in(json!({ "type": "text-block", "text": text }), slot);
        assert!(markup(sketch).contains('…'));
    }

    #[test]
    fn test_blank_text_block_draws_nothing() {
        let sketch = render(json!({ "type": "text-block", "text": "  " }));
        assert!(sketch.is_empty());
    }
}
