//! Grid of circular icon badges with a title and optional description.

use std::f32::consts::SQRT_2;

use slidegraph_core::{
    draw::{FontWeight, RenderLayer, ShapeStyle, Sketch, TextAnchor, VerticalAlign},
    geometry::{Bounds, Insets, Point, Size},
};

use super::{
    RenderContext,
    common::{self, SMALL_FONT_SIZE},
};
use crate::model::IconGrid;

const MAX_BADGE_RADIUS: f32 = 32.0;

/// Items per row when the grid has no explicit column count.
const AUTO_MAX_COLUMNS: usize = 4;

const TITLE_LADDER: &[f32] = &[18.0, 16.0, 14.0, 13.0, SMALL_FONT_SIZE];

const DESCRIPTION_LADDER: &[f32] = &[14.0, 13.0, SMALL_FONT_SIZE, 11.0];

/// Chooses the column count: the explicit one clamped to the item count,
/// otherwise rows of at most four balanced across the grid.
fn column_count(items: usize, requested: Option<usize>) -> usize {
    if items == 0 {
        return 0;
    }
    if let Some(columns) = requested.filter(|c| *c > 0) {
        return columns.min(items);
    }
    let rows = items.div_ceil(AUTO_MAX_COLUMNS);
    items.div_ceil(rows)
}

pub fn render(grid: &IconGrid, sketch: &mut Sketch, ctx: &RenderContext<'_>) {
    let columns = column_count(grid.items.len(), grid.columns);
    if columns == 0 {
        common::placeholder(sketch, ctx, "icon grid without items");
        return;
    }

    let area = sketch.clip();
    let rows = grid.items.len().div_ceil(columns);
    let cells: Vec<Bounds> = area
        .split_rows(rows, 16.0)
        .into_iter()
        .flat_map(|row| row.split_columns(columns, 16.0))
        .collect();

    let title_style = ctx.centered_style(16.0).with_weight(FontWeight::Bold);
    let description_style = ctx.muted_style(14.0).with_anchor(TextAnchor::Middle);

    for (index, (item, cell)) in grid.items.iter().zip(&cells).enumerate() {
        let radius = (cell.width().min(cell.height()) * 0.2).min(MAX_BADGE_RADIUS);
        let center = Point::new(cell.center().x(), cell.min_y() + radius);
        let fill = ctx.theme().series_color(index);
        sketch.circle(RenderLayer::Content, center, radius, &ShapeStyle::filled(fill));

        // The largest square inside the badge.
        let glyph_box = Bounds::new_from_center(center, Size::new(radius * SQRT_2, radius * SQRT_2));
        let glyph_size = (radius * 0.9).max(SMALL_FONT_SIZE);
        let glyph_style = ctx.label_on(fill, glyph_size);
        common::label(
            sketch,
            &glyph_style,
            &item.icon,
            glyph_box,
            &[glyph_size, (glyph_size * 0.75).max(SMALL_FONT_SIZE), SMALL_FONT_SIZE],
            VerticalAlign::Middle,
        );

        let text_area = cell
            .below(radius * 2.0, 8.0)
            .shrink(Insets::symmetric(0.0, 4.0));
        let title_box = text_area.take_top(text_area.height().min(48.0));
        let placed = common::label(
            sketch,
            &title_style,
            &item.title,
            title_box,
            TITLE_LADDER,
            VerticalAlign::Top,
        );
        if let Some(description) = item.description.as_deref() {
            let used = placed.map_or(0.0, |b| b.height());
            common::label(
                sketch,
                &description_style,
                description,
                text_area.below(used, 4.0),
                DESCRIPTION_LADDER,
                VerticalAlign::Top,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::render::{
        common::PLACEHOLDER_TEXT,
        test_support::{assert_finite, markup, render},
    };

    #[test]
    fn test_column_count() {
        assert_eq!(column_count(0, None), 0);
        assert_eq!(column_count(3, None), 3);
        assert_eq!(column_count(4, None), 4);
        assert_eq!(column_count(5, None), 3);
        assert_eq!(column_count(8, None), 4);
        assert_eq!(column_count(9, None), 3);
        assert_eq!(column_count(6, Some(2)), 2);
        assert_eq!(column_count(2, Some(5)), 2);
    }

    #[test]
    fn test_icon_grid_markup() {
        let svg = markup(render(json!({
            "type": "icon-grid",
            "items": [
                { "icon": "★", "title": "Quality", "description": "Zero defects shipped" },
                { "icon": "⚡", "title": "Speed" },
                { "icon": "$", "title": "Cost" },
                { "icon": "♥", "title": "Care" },
                { "icon": "✓", "title": "Trust" }
            ]
        })));
        assert_eq!(svg.matches("<circle").count(), 5);
        assert!(svg.contains("★"));
        assert!(svg.contains("Zero defects shipped"));
        assert_finite(&svg);
    }

    #[test]
    fn test_empty_icon_grid_placeholder() {
        let svg = markup(render(json!({ "type": "icon-grid", "items": [] })));
        assert!(svg.contains(PLACEHOLDER_TEXT));
    }
}
