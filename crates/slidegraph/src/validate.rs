//! Structural validation run before composition.
//!
//! Validation rejects what cannot be rendered at all: a blank title, an
//! element grammar violation, or input exceeding a [`Limits`] cap. Everything
//! else (empty series, odd values, ragged tables) is left to the renderers,
//! which substitute placeholders.

use log::debug;

use crate::{
    config::Limits,
    error::SlideError,
    model::{HierarchyNode, SeriesChart, SlideStructure, SlideStructureElement},
};

/// Validates a slide against the element grammar and the configured caps.
///
/// # Errors
///
/// Returns [`SlideError::MissingTitle`] for a blank title,
/// [`SlideError::InvalidElement`] for grammar violations and
/// [`SlideError::LimitExceeded`] when a cap is exceeded.
pub fn validate(structure: &SlideStructure, limits: &Limits) -> Result<(), SlideError> {
    if structure.title.trim().is_empty() {
        return Err(SlideError::MissingTitle);
    }

    let count = structure.element_count();
    check_cap("elements", count, limits.max_elements())?;

    for element in &structure.elements {
        validate_element(element, 1, limits)?;
    }

    debug!(elements = count; "Slide structure validated");
    Ok(())
}

fn validate_element(
    element: &SlideStructureElement,
    depth: usize,
    limits: &Limits,
) -> Result<(), SlideError> {
    check_cap("layout nesting depth", depth, limits.max_nesting_depth())?;

    let max_len = limits.max_series_length();
    match element {
        SlideStructureElement::BulletList(list) => check_cap("bullet items", list.items.len(), max_len),
        SlideStructureElement::NumberedExplanation(list) => {
            check_cap("explanation items", list.items.len(), max_len)
        }
        SlideStructureElement::TextBlock(_)
        | SlideStructureElement::Shape(_)
        | SlideStructureElement::Connector(_) => Ok(()),
        SlideStructureElement::Table(table) => {
            let cells = table.headers.len() + table.rows.iter().map(Vec::len).sum::<usize>();
            check_cap("table cells", cells, limits.max_table_cells())
        }
        SlideStructureElement::HierarchyChart(chart) => validate_hierarchy(&chart.root, limits),
        SlideStructureElement::FlowChart(chart) => check_cap("flow steps", chart.steps.len(), max_len),
        SlideStructureElement::WaterfallChart(chart) => {
            check_cap("waterfall deltas", chart.deltas.len(), max_len)
        }
        SlideStructureElement::BarChart(chart)
        | SlideStructureElement::StackedBarChart(chart)
        | SlideStructureElement::LineChart(chart) => validate_series_chart(chart, limits),
        SlideStructureElement::PieChart(chart) => check_cap("pie slices", chart.slices.len(), max_len),
        SlideStructureElement::RadarChart(chart) => {
            check_cap("radar axes", chart.axes.len(), max_len)?;
            check_cap("series", chart.series.len(), limits.max_series())?;
            for series in &chart.series {
                check_cap("series length", series.values.len(), max_len)?;
            }
            Ok(())
        }
        SlideStructureElement::FunnelChart(chart) => {
            check_cap("funnel stages", chart.stages.len(), max_len)
        }
        SlideStructureElement::PyramidChart(chart) => {
            check_cap("pyramid levels", chart.levels.len(), max_len)
        }
        SlideStructureElement::CycleChart(chart) => check_cap("cycle steps", chart.steps.len(), max_len),
        SlideStructureElement::VennDiagram(chart) => check_cap("venn sets", chart.sets.len(), max_len),
        SlideStructureElement::MatrixChart(chart) => {
            check_cap("matrix items", chart.items.len(), max_len)
        }
        SlideStructureElement::GanttChart(chart) => {
            check_cap("gantt tasks", chart.tasks.len(), max_len)?;
            check_cap("periods", chart.periods.len(), max_len)
        }
        SlideStructureElement::Roadmap(roadmap) => {
            check_cap("roadmap lanes", roadmap.lanes.len(), max_len)?;
            check_cap("periods", roadmap.periods.len(), max_len)?;
            for lane in &roadmap.lanes {
                check_cap("roadmap items", lane.items.len(), max_len)?;
            }
            Ok(())
        }
        SlideStructureElement::Timeline(timeline) => {
            check_cap("milestones", timeline.milestones.len(), max_len)
        }
        SlideStructureElement::ConvergenceChart(chart) => {
            check_cap("convergence inputs", chart.inputs.len(), max_len)
        }
        SlideStructureElement::DivergenceChart(chart) => {
            check_cap("divergence items", chart.items.len(), max_len)
        }
        SlideStructureElement::IconGrid(grid) => {
            if grid.columns == Some(0) {
                return Err(SlideError::invalid_element(
                    "icon-grid",
                    "columns must be at least 1",
                ));
            }
            check_cap("icon items", grid.items.len(), max_len)
        }
        SlideStructureElement::SplitLayout(split) => {
            validate_element(&split.left, depth + 1, limits)?;
            validate_element(&split.right, depth + 1, limits)
        }
        SlideStructureElement::ThreeColumnLayout(layout) => {
            if layout.columns.is_empty() || layout.columns.len() > 3 {
                return Err(SlideError::invalid_element(
                    "three-column-layout",
                    format!("expected 1 to 3 columns, got {}", layout.columns.len()),
                ));
            }
            for column in &layout.columns {
                validate_element(column, depth + 1, limits)?;
            }
            Ok(())
        }
    }
}

fn validate_series_chart(chart: &SeriesChart, limits: &Limits) -> Result<(), SlideError> {
    check_cap("series", chart.series.len(), limits.max_series())?;
    check_cap("categories", chart.categories.len(), limits.max_series_length())?;
    for series in &chart.series {
        check_cap("series length", series.values.len(), limits.max_series_length())?;
    }
    Ok(())
}

/// Checks depth before counting nodes, so the walk never descends past the cap.
fn validate_hierarchy(root: &HierarchyNode, limits: &Limits) -> Result<(), SlideError> {
    check_depth(root, 1, limits.max_hierarchy_depth())?;
    check_cap("hierarchy nodes", root.node_count(), limits.max_hierarchy_nodes())
}

fn check_depth(node: &HierarchyNode, depth: usize, max: usize) -> Result<(), SlideError> {
    check_cap("hierarchy depth", depth, max)?;
    for child in &node.children {
        check_depth(child, depth + 1, max)?;
    }
    Ok(())
}

fn check_cap(what: &'static str, actual: usize, limit: usize) -> Result<(), SlideError> {
    if actual > limit {
        return Err(SlideError::limit_exceeded(what, limit, actual));
    }
    Ok(())
}
