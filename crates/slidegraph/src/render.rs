//! Per-diagram renderers.
//!
//! Every element variant has exactly one renderer. A renderer receives the
//! element's data, a [`Sketch`] bound to its slot and a [`RenderContext`],
//! and draws everything inside the slot. Data-shape anomalies (empty
//! series, missing labels, odd values) are handled locally with a
//! placeholder; only structural problems surface as [`SlideError`].
//!
//! [`render_element`] is the single dispatch point: an exhaustive `match`
//! over [`SlideStructureElement`], so adding a variant without a renderer
//! does not compile.

use log::{debug, trace};

use slidegraph_core::{
    color::Color,
    draw::{FontWeight, Sketch, TextAnchor, TextDefinition},
    geometry::Bounds,
    theme::ColorScheme,
};

use crate::{
    config::{AppConfig, Limits},
    error::SlideError,
    model::SlideStructureElement,
};

mod common;
mod container;
mod cycle;
mod flow;
mod funnel;
mod hierarchy;
mod icon_grid;
mod matrix;
mod pie;
mod primitive;
mod radar;
mod schedule;
mod series;
mod table;
mod text;
mod timeline;
mod venn;
mod waterfall;

/// Read-only state shared by every renderer of one slide.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    theme: &'a ColorScheme,
    config: &'a AppConfig,
    /// Layout nesting depth; top-level elements sit at depth 1.
    depth: usize,
}

impl<'a> RenderContext<'a> {
    pub fn new(theme: &'a ColorScheme, config: &'a AppConfig) -> Self {
        Self {
            theme,
            config,
            depth: 1,
        }
    }

    pub fn theme(&self) -> &'a ColorScheme {
        self.theme
    }

    pub fn limits(&self) -> &'a Limits {
        self.config.limits()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the context for elements nested one layout level deeper.
    pub fn nested(&self) -> Self {
        Self {
            depth: self.depth + 1,
            ..*self
        }
    }

    /// Start-anchored body text in the palette's text color.
    pub fn text_style(&self, font_size: f32) -> TextDefinition {
        let mut style = TextDefinition::new(font_size);
        style.set_font_family(self.config.render().font_family());
        style.set_color(self.theme.text());
        style.set_anchor(TextAnchor::Start);
        style
    }

    /// Secondary text: descriptions, axis ticks, notes.
    pub fn muted_style(&self, font_size: f32) -> TextDefinition {
        self.text_style(font_size).with_color(self.theme.muted_text())
    }

    /// Centered bold label, readable on top of `fill`.
    pub fn label_on(&self, fill: Color, font_size: f32) -> TextDefinition {
        self.text_style(font_size)
            .with_color(self.theme.text_on(fill))
            .with_anchor(TextAnchor::Middle)
            .with_weight(FontWeight::Bold)
    }

    /// Centered label in the plain text color.
    pub fn centered_style(&self, font_size: f32) -> TextDefinition {
        self.text_style(font_size).with_anchor(TextAnchor::Middle)
    }
}

/// Renders one element into a fresh sketch bound to `slot`.
///
/// # Errors
///
/// Returns a structural [`SlideError`] when the element cannot be drawn at
/// all, for example a hierarchy deeper than the configured cap.
pub fn render_element(
    element: &SlideStructureElement,
    slot: Bounds,
    ctx: &RenderContext<'_>,
) -> Result<Sketch, SlideError> {
    trace!(
        element = element.tag(),
        depth = ctx.depth(),
        width = slot.width(),
        height = slot.height();
        "Rendering element"
    );

    let mut sketch = Sketch::new(slot);
    match element {
        SlideStructureElement::BulletList(list) => text::bullet_list(list, &mut sketch, ctx),
        SlideStructureElement::NumberedExplanation(list) => {
            text::numbered_explanation(list, &mut sketch, ctx)
        }
        SlideStructureElement::TextBlock(block) => text::text_block(block, &mut sketch, ctx),
        SlideStructureElement::Table(table) => table::render(table, &mut sketch, ctx),
        SlideStructureElement::HierarchyChart(chart) => {
            hierarchy::render(chart, &mut sketch, ctx)?
        }
        SlideStructureElement::FlowChart(chart) => flow::flow_chart(chart, &mut sketch, ctx),
        SlideStructureElement::WaterfallChart(chart) => {
            waterfall::render(chart, &mut sketch, ctx)
        }
        SlideStructureElement::BarChart(chart) => series::bar_chart(chart, &mut sketch, ctx),
        SlideStructureElement::StackedBarChart(chart) => {
            series::stacked_bar_chart(chart, &mut sketch, ctx)
        }
        SlideStructureElement::LineChart(chart) => series::line_chart(chart, &mut sketch, ctx),
        SlideStructureElement::PieChart(chart) => pie::render(chart, &mut sketch, ctx),
        SlideStructureElement::RadarChart(chart) => radar::render(chart, &mut sketch, ctx),
        SlideStructureElement::FunnelChart(chart) => funnel::funnel(chart, &mut sketch, ctx),
        SlideStructureElement::PyramidChart(chart) => funnel::pyramid(chart, &mut sketch, ctx),
        SlideStructureElement::CycleChart(chart) => cycle::render(chart, &mut sketch, ctx),
        SlideStructureElement::VennDiagram(chart) => venn::render(chart, &mut sketch, ctx),
        SlideStructureElement::MatrixChart(chart) => matrix::render(chart, &mut sketch, ctx),
        SlideStructureElement::GanttChart(chart) => schedule::gantt(chart, &mut sketch, ctx),
        SlideStructureElement::Roadmap(roadmap) => schedule::roadmap(roadmap, &mut sketch, ctx),
        SlideStructureElement::Timeline(chart) => timeline::render(chart, &mut sketch, ctx),
        SlideStructureElement::ConvergenceChart(chart) => {
            flow::convergence(chart, &mut sketch, ctx)
        }
        SlideStructureElement::DivergenceChart(chart) => {
            flow::divergence(chart, &mut sketch, ctx)
        }
        SlideStructureElement::IconGrid(grid) => icon_grid::render(grid, &mut sketch, ctx),
        SlideStructureElement::Shape(shape) => primitive::shape(shape, &mut sketch, ctx),
        SlideStructureElement::Connector(connector) => {
            primitive::connector(connector, &mut sketch, ctx)
        }
        SlideStructureElement::SplitLayout(split) => container::split(split, &mut sketch, ctx)?,
        SlideStructureElement::ThreeColumnLayout(layout) => {
            container::three_column(layout, &mut sketch, ctx)?
        }
    }

    if sketch.overflows() {
        debug!(element = element.tag(); "Element drew outside its slot");
    }
    Ok(sketch)
}


#[cfg(test)]
mod tests {
    use serde_json::json;
    use slidegraph_core::geometry::{Point, Size};

    use super::*;
    use super::test_support::{assert_finite, markup, render_in};

    fn every_element() -> Vec<serde_json::Value> {
        let text = |t: &str| json!({ "type": "text-block", "text": t });
        vec![
            json!({ "type": "bullet-list", "heading": "Goals", "items": ["Grow revenue", "Cut churn"] }),
            json!({ "type": "numbered-explanation", "items": [{ "title": "Collect", "description": "Gather data" }] }),
            json!({ "type": "text-block", "text": "Customers first.", "emphasis": true }),
            json!({ "type": "table", "headers": ["Region", "Sales"], "rows": [["East", "120"]] }),
            json!({ "type": "hierarchy-chart", "root": { "label": "CEO", "children": [{ "label": "CTO" }] } }),
            json!({ "type": "flow-chart", "steps": [{ "label": "Plan" }, { "label": "Ship" }] }),
            json!({ "type": "waterfall-chart", "deltas": [{ "label": "Q1", "value": 10 }, { "label": "Q2", "value": -4 }] }),
            json!({ "type": "bar-chart", "categories": ["A", "B"], "series": [{ "name": "S", "values": [3, 5] }] }),
            json!({ "type": "stacked-bar-chart", "categories": ["A"], "series": [
                { "name": "H", "values": [3] }, { "name": "S", "values": [2] }
            ] }),
            json!({ "type": "line-chart", "categories": ["Jan", "Feb"], "series": [{ "name": "V", "values": [10, 14] }] }),
            json!({ "type": "pie-chart", "slices": [
                { "label": "Online", "value": 60 }, { "label": "Retail", "value": 40 }
            ], "donut": true }),
            json!({ "type": "radar-chart", "axes": ["Speed", "Cost", "Quality"], "series": [{ "name": "Us", "values": [4, 3, 5] }] }),
            json!({ "type": "funnel-chart", "stages": [{ "label": "Visitors", "value": 1000 }, { "label": "Leads", "value": 300 }] }),
            json!({ "type": "pyramid-chart", "levels": [{ "label": "Vision" }, { "label": "Tactics" }] }),
            json!({ "type": "cycle-chart", "steps": ["Plan", "Do", "Check"] }),
            json!({ "type": "venn-diagram", "sets": ["Design", "Engineering"] }),
            json!({ "type": "matrix-chart", "quadrants": [{ "label": "Quick wins" }], "items": [{ "label": "CRM", "x": 0.2, "y": 0.8 }] }),
            json!({ "type": "gantt-chart", "tasks": [{ "label": "Design", "start": 0, "end": 2 }] }),
            json!({ "type": "roadmap", "lanes": [{ "name": "Platform", "items": [{ "label": "API", "start": 0, "end": 1 }] }] }),
            json!({ "type": "timeline", "milestones": [{ "label": "Kickoff" }, { "label": "Launch" }] }),
            json!({ "type": "convergence-chart", "inputs": ["Sales", "Support"], "output": "Roadmap" }),
            json!({ "type": "divergence-chart", "items": [{ "label": "Price", "value": 3 }, { "label": "Delay", "value": -2 }] }),
            json!({ "type": "icon-grid", "items": [{ "icon": "$", "title": "Cost" }] }),
            json!({ "type": "shape", "shape": "diamond", "text": "Decision" }),
            json!({ "type": "connector", "from": "Client", "to": "Server", "label": "HTTPS" }),
            json!({ "type": "split-layout", "left": text("Left"), "right": text("Right") }),
            json!({ "type": "three-column-layout", "columns": [text("One"), text("Two"), text("Three")] }),
        ]
    }

    #[test]
    fn test_every_element_stays_inside_a_sliver() {
        let sliver = Bounds::new_from_top_left(Point::new(40.0, 152.0), Size::new(36.0, 500.0));
        for value in every_element() {
            assert_finite(&markup(render_in(value, sliver)));
        }
    }
}
