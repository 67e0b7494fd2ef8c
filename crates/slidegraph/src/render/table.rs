//! Table renderer.
//!
//! Columns share the width evenly unless `columnWeights` supplies one
//! weight per column. Each row grows to its tallest wrapped cell (capped at
//! [`MAX_CELL_LINES`]); rows that no longer fit are summarised by a
//! "+N more rows" note.

use log::debug;

use slidegraph_core::{
    draw::{
        FontWeight, RenderLayer, ShapeStyle, Sketch, StrokeDefinition, TextDefinition,
        VerticalAlign,
    },
    geometry::{Bounds, Insets, Point, Size},
    metrics::line_height,
    text_layout::wrap,
};

use super::{
    RenderContext,
    common::{self, grid_stroke},
};
use crate::model::Table;

const TABLE_LADDER: &[f32] = &[16.0, 14.0, 13.0, 12.0];

const MAX_CELL_LINES: usize = 3;

const PAD_X: f32 = 8.0;

const PAD_Y: f32 = 6.0;

fn row_height(cells: &[String], columns: &[Bounds], size: f32) -> f32 {
    let lines = columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            let text = cells.get(index).map_or("", String::as_str);
            wrap(text, (column.width() - 2.0 * PAD_X).max(0.0), size)
                .len()
                .clamp(1, MAX_CELL_LINES)
        })
        .max()
        .unwrap_or(1);
    lines as f32 * line_height(size) + 2.0 * PAD_Y
}

pub fn render(table: &Table, sketch: &mut Sketch, ctx: &RenderContext<'_>) {
    let column_count = table
        .rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(table.headers.len()))
        .max()
        .unwrap_or(0);
    if column_count == 0 {
        common::placeholder(sketch, ctx, "table without columns");
        return;
    }

    let area = sketch.clip();
    let weights = match &table.column_weights {
        Some(weights) if weights.len() == column_count => weights.clone(),
        Some(weights) => {
            debug!(
                weights = weights.len(),
                columns = column_count;
                "Ignoring column weights that do not match the column count"
            );
            vec![1.0; column_count]
        }
        None => vec![1.0; column_count],
    };
    let columns = area.split_columns_weighted(&weights, 0.0);
    let has_header = table.headers.iter().any(|h| !h.trim().is_empty());

    let total_height = |size: f32| -> f32 {
        let header = if has_header {
            row_height(&table.headers, &columns, size)
        } else {
            0.0
        };
        header
            + table
                .rows
                .iter()
                .map(|row| row_height(row, &columns, size))
                .sum::<f32>()
    };
    let size = TABLE_LADDER
        .iter()
        .copied()
        .find(|&size| total_height(size) <= area.height())
        .unwrap_or(TABLE_LADDER[TABLE_LADDER.len() - 1]);

    let stroke = grid_stroke(ctx);
    let mut y = area.min_y();
    let max_y = area.max_y();
    let note_height = line_height(size) + 2.0 * PAD_Y;

    if has_header {
        let height = row_height(&table.headers, &columns, size);
        if y + height > max_y {
            debug!("Table header does not fit its slot");
            return;
        }
        let fill = ctx.theme().primary();
        let band = Bounds::new_from_top_left(Point::new(area.min_x(), y), Size::new(area.width(), height));
        sketch.rect(RenderLayer::Background, band, &ShapeStyle::filled(fill), 0.0);
        let style = ctx
            .text_style(size)
            .with_color(ctx.theme().text_on(fill))
            .with_weight(FontWeight::Bold);
        draw_row(sketch, &style, &table.headers, &columns, y, height, size);
        y += height;
    }

    let cell_style = ctx.text_style(size);
    let stripe = ShapeStyle::filled(ctx.theme().surface());
    let mut drawn = 0;
    for (index, row) in table.rows.iter().enumerate() {
        let height = row_height(row, &columns, size);
        let remaining_after = table.rows.len() - index - 1;
        let needed = if remaining_after > 0 {
            height + note_height
        } else {
            height
        };
        if y + needed > max_y + 0.01 {
            break;
        }
        let band = Bounds::new_from_top_left(Point::new(area.min_x(), y), Size::new(area.width(), height));
        if index % 2 == 1 {
            sketch.rect(RenderLayer::Background, band, &stripe, 0.0);
        }
        draw_row(sketch, &cell_style, row, &columns, y, height, size);
        y += height;
        sketch.line(
            RenderLayer::Grid,
            Point::new(area.min_x(), y),
            Point::new(area.max_x(), y),
            &stroke,
        );
        drawn += 1;
    }

    let hidden = table.rows.len() - drawn;
    if hidden > 0 && y + note_height <= max_y + 0.01 {
        debug!(hidden = hidden; "Table rows do not fit, adding summary note");
        let note = format!("+{hidden} more rows");
        let band = Bounds::new_from_top_left(
            Point::new(area.min_x(), y),
            Size::new(area.width(), note_height),
        )
        .shrink(Insets::symmetric(PAD_Y, PAD_X));
        common::line_label(
            sketch,
            &ctx.muted_style(size).with_weight(FontWeight::Normal),
            &note,
            band,
            VerticalAlign::Middle,
        );
    }

    let frame = Bounds::new_from_top_left(area.min_point(), Size::new(area.width(), y - area.min_y()));
    sketch.rect(
        RenderLayer::Grid,
        frame,
        &ShapeStyle::outlined(StrokeDefinition::solid(ctx.theme().neutral(), 1.0)),
        0.0,
    );
    for column in columns.iter().skip(1) {
        sketch.line(
            RenderLayer::Grid,
            Point::new(column.min_x(), area.min_y()),
            Point::new(column.min_x(), y),
            &stroke,
        );
    }
}

fn draw_row(
    sketch: &mut Sketch,
    style: &TextDefinition,
    cells: &[String],
    columns: &[Bounds],
    y: f32,
    height: f32,
    size: f32,
) {
    for (column, text) in columns.iter().zip(cells) {
        let cell = Bounds::new_from_top_left(Point::new(column.min_x(), y), Size::new(column.width(), height))
            .shrink(Insets::symmetric(PAD_Y, PAD_X));
        common::label(sketch, style, text, cell, &[size], VerticalAlign::Middle);
    }
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
    fn test_table_renders_headers_and_cells() {
        let sketch = render(json!({
            "type": "table",
            "headers": ["Region", "Revenue", "Growth"],
            "rows": [["North", "120", "8%"], ["South", "95"]]
        }));
        let svg = markup(sketch);
        assert!(svg.contains("Region"));
        assert!(svg.contains("South"));
        assert!(svg.contains("font-size=\"16\""));
        assert!(!svg.contains("more rows"));
    }

    #[test]
    fn test_column_weights_move_separator() {
        let slot = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(400.0, 200.0));
        let weighted = markup(render_in(
            json!({
                "type": "table",
                "headers": ["A", "B"],
                "rows": [["1", "2"]],
                "columnWeights": [3.0, 1.0]
            }),
            slot,
        ));
        assert!(weighted.contains("x1=\"300\""));

        let mismatched = markup(render_in(
            json!({
                "type": "table",
                "headers": ["A", "B"],
                "rows": [["1", "2"]],
                "columnWeights": [3.0, 1.0, 1.0]
            }),
            slot,
        ));
        assert!(mismatched.contains("x1=\"200\""));
    }

    #[test]
    fn test_overflowing_rows_become_note() {
        let rows: Vec<_> = (0..40).map(|i| json!([format!("row {i}"), "value"])).collect();
        let slot = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(600.0, 300.0));
        let sketch = render_in(json!({ "type": "table", "headers": ["Name", "Value"], "rows": rows }), slot);
        let svg = markup(sketch);
        assert!(svg.contains("more rows"));
        assert!(svg.contains("row 0"));
        assert!(!svg.contains("row 39"));
    }

    #[test]
    fn test_row_height_grows_with_wrapping() {
        let columns = vec![Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(80.0, 10.0))];
        let short = row_height(&["a".to_string()], &columns, 14.0);
        let long = row_height(&["a long cell that wraps".to_string()], &columns, 14.0);
        assert!(long > short);
        let capped = row_height(&["word ".repeat(50)], &columns, 14.0);
        assert!(capped <= MAX_CELL_LINES as f32 * line_height(14.0) + 2.0 * PAD_Y + 0.001);
    }

    #[test]
    fn test_empty_table_placeholder() {
        let sketch = render(json!({ "type": "table", "headers": [], "rows": [] }));
        assert!(markup(sketch).contains(PLACEHOLDER_TEXT));
    }
}
