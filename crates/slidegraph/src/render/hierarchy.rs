//! Hierarchy (organisation) chart renderer.
//!
//! The tree is laid out top-down: every node owns a column, and that column
//! is split evenly among its children. Depth selects the row, with the slot
//! height divided evenly by the depth of the tree. Parents connect to their
//! children with elbow lines.

use log::debug;

use slidegraph_core::{
    color::Color,
    draw::{RenderLayer, ShapeStyle, Sketch, StrokeDefinition},
    geometry::{Bounds, Insets, Point, Size},
};

use super::{RenderContext, common};
use crate::{
    error::SlideError,
    model::{HierarchyChart, HierarchyNode},
};

/// Largest node box height.
const MAX_NODE_HEIGHT: f32 = 64.0;

/// A node with its laid-out box.
#[derive(Debug, Clone)]
struct PlacedNode<'a> {
    label: &'a str,
    depth: usize,
    node_box: Bounds,
    parent: Option<usize>,
}

/// Depth of the tree, counting the root as 1. Stops descending once `cap`
/// is exceeded, so the walk is bounded even for degenerate input.
fn tree_depth(node: &HierarchyNode, cap: usize) -> usize {
    fn walk(node: &HierarchyNode, depth: usize, cap: usize) -> usize {
        if depth > cap {
            return depth;
        }
        node.children
            .iter()
            .map(|child| walk(child, depth + 1, cap))
            .max()
            .unwrap_or(depth)
    }
    walk(node, 1, cap)
}

fn layout<'a>(root: &'a HierarchyNode, area: Bounds, levels: usize) -> Vec<PlacedNode<'a>> {
    let rows = area.split_rows(levels, 0.0);
    let mut placed = Vec::new();
    place(root, area, 0, None, &rows, &mut placed);
    placed
}

fn place<'a>(
    node: &'a HierarchyNode,
    column: Bounds,
    depth: usize,
    parent: Option<usize>,
    rows: &[Bounds],
    placed: &mut Vec<PlacedNode<'a>>,
) {
    let Some(row) = rows.get(depth) else {
        return;
    };
    let cell = Bounds::new_from_top_left(
        Point::new(column.min_x(), row.min_y()),
        Size::new(column.width(), row.height()),
    );
    let pad_x = (column.width() * 0.08).min(8.0);
    let height = (row.height() * 0.6).min(MAX_NODE_HEIGHT);
    let node_box = Bounds::new_from_center(
        cell.center(),
        Size::new((cell.width() - 2.0 * pad_x).max(0.0), height),
    );

    let index = placed.len();
    placed.push(PlacedNode {
        label: &node.label,
        depth,
        node_box,
        parent,
    });

    let child_columns = column.split_columns(node.children.len(), 0.0);
    for (child, child_column) in node.children.iter().zip(child_columns) {
        place(child, child_column, depth + 1, Some(index), rows, placed);
    }
}

fn fill_for(ctx: &RenderContext<'_>, depth: usize) -> Color {
    match depth {
        0 => ctx.theme().primary(),
        1 => ctx.theme().secondary(),
        _ => ctx.theme().surface(),
    }
}

pub fn render(
    chart: &HierarchyChart,
    sketch: &mut Sketch,
    ctx: &RenderContext<'_>,
) -> Result<(), SlideError> {
    let cap = ctx.limits().max_hierarchy_depth();
    let levels = tree_depth(&chart.root, cap);
    if levels > cap {
        return Err(SlideError::limit_exceeded("hierarchy depth", cap, levels));
    }
    if chart.root.label.trim().is_empty() && chart.root.children.is_empty() {
        common::placeholder(sketch, ctx, "hierarchy without nodes");
        return Ok(());
    }

    let area = sketch.clip();
    let placed = layout(&chart.root, area, levels);
    debug!(nodes = placed.len(), levels = levels; "Hierarchy laid out");

    let connector = common::connector_stroke(ctx);
    for node in &placed {
        let Some(parent) = node.parent.and_then(|index| placed.get(index)) else {
            continue;
        };
        let from = Point::new(parent.node_box.center().x(), parent.node_box.max_y());
        let to = Point::new(node.node_box.center().x(), node.node_box.min_y());
        let elbow_y = (from.y() + to.y()) / 2.0;
        let points = [
            from,
            Point::new(from.x(), elbow_y),
            Point::new(to.x(), elbow_y),
            to,
        ];
        sketch.polyline(RenderLayer::Connector, &points, &connector);
    }

    for node in &placed {
        let fill = fill_for(ctx, node.depth);
        let style = ShapeStyle::filled(fill).with_stroke(Some(StrokeDefinition::solid(
            ctx.theme().neutral(),
            1.0,
        )));
        sketch.rect(RenderLayer::Content, node.node_box, &style, 6.0);
        let inner = node.node_box.shrink(Insets::symmetric(4.0, 6.0));
        common::shape_label(sketch, ctx, node.label, inner, fill, None);
    }
    Ok(())
}
