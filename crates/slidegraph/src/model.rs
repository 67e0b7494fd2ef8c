//! The slide data model.
//!
//! A [`SlideStructure`] describes one slide: a title, a [`LayoutKind`] and an
//! ordered list of [`SlideStructureElement`]s. Elements form a closed tagged
//! union keyed by the JSON `"type"` field; every variant carries only the
//! fields its diagram grammar needs.
//!
//! ```
//! # use slidegraph::model::{LayoutKind, SlideStructure, SlideStructureElement};
//! let json = r#"{
//!     "title": "Revenue bridge",
//!     "layout": "chart",
//!     "elements": [{
//!         "type": "waterfall-chart",
//!         "deltas": [{ "label": "Q1", "value": 10 }, { "label": "Q2", "value": -4 }]
//!     }]
//! }"#;
//! let slide: SlideStructure = serde_json::from_str(json).unwrap();
//! assert_eq!(slide.layout, LayoutKind::Chart);
//! assert!(matches!(slide.elements[0], SlideStructureElement::WaterfallChart(_)));
//! assert_eq!(slide.elements[0].tag(), "waterfall-chart");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use slidegraph_core::{draw::StrokeStyle, theme::ColorSchemeName};

/// One slide.
///
/// A missing `title` deserializes as an empty string and is rejected by
/// validation, so absent and blank titles report the same error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideStructure {
    #[serde(default)]
    pub title: String,
    pub layout: LayoutKind,
    #[serde(default)]
    pub elements: Vec<SlideStructureElement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<Footer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_scheme: Option<ColorSchemeName>,
}

impl SlideStructure {
    /// Counts all elements, including those nested in layout containers.
    pub fn element_count(&self) -> usize {
        self.elements.iter().map(SlideStructureElement::count).sum()
    }
}

/// The policy subdividing the body region into slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutKind {
    TitleOnly,
    TitleContent,
    TitleBullets,
    TwoColumn,
    ThreeColumn,
    Hierarchy,
    Steps,
    Timeline,
    Chart,
}

impl LayoutKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TitleOnly => "title-only",
            Self::TitleContent => "title-content",
            Self::TitleBullets => "title-bullets",
            Self::TwoColumn => "two-column",
            Self::ThreeColumn => "three-column",
            Self::Hierarchy => "hierarchy",
            Self::Steps => "steps",
            Self::Timeline => "timeline",
            Self::Chart => "chart",
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Footer band content; its presence reserves the band.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Footer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u32>,
}

/// The closed set of element grammars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SlideStructureElement {
    BulletList(BulletList),
    NumberedExplanation(NumberedExplanation),
    TextBlock(TextBlock),
    Table(Table),
    HierarchyChart(HierarchyChart),
    FlowChart(FlowChart),
    WaterfallChart(WaterfallChart),
    BarChart(SeriesChart),
    StackedBarChart(SeriesChart),
    LineChart(SeriesChart),
    PieChart(PieChart),
    RadarChart(RadarChart),
    FunnelChart(FunnelChart),
    PyramidChart(PyramidChart),
    CycleChart(CycleChart),
    VennDiagram(VennDiagram),
    MatrixChart(MatrixChart),
    GanttChart(GanttChart),
    Roadmap(Roadmap),
    Timeline(Timeline),
    ConvergenceChart(ConvergenceChart),
    DivergenceChart(DivergenceChart),
    IconGrid(IconGrid),
    Shape(ShapeElement),
    Connector(ConnectorElement),
    SplitLayout(SplitLayout),
    ThreeColumnLayout(ThreeColumnLayout),
}

impl SlideStructureElement {
    /// Returns the `"type"` tag of this element.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::BulletList(_) => "bullet-list",
            Self::NumberedExplanation(_) => "numbered-explanation",
            Self::TextBlock(_) => "text-block",
            Self::Table(_) => "table",
            Self::HierarchyChart(_) => "hierarchy-chart",
            Self::FlowChart(_) => "flow-chart",
            Self::WaterfallChart(_) => "waterfall-chart",
            Self::BarChart(_) => "bar-chart",
            Self::StackedBarChart(_) => "stacked-bar-chart",
            Self::LineChart(_) => "line-chart",
            Self::PieChart(_) => "pie-chart",
            Self::RadarChart(_) => "radar-chart",
            Self::FunnelChart(_) => "funnel-chart",
            Self::PyramidChart(_) => "pyramid-chart",
            Self::CycleChart(_) => "cycle-chart",
            Self::VennDiagram(_) => "venn-diagram",
            Self::MatrixChart(_) => "matrix-chart",
            Self::GanttChart(_) => "gantt-chart",
            Self::Roadmap(_) => "roadmap",
            Self::Timeline(_) => "timeline",
            Self::ConvergenceChart(_) => "convergence-chart",
            Self::DivergenceChart(_) => "divergence-chart",
            Self::IconGrid(_) => "icon-grid",
            Self::Shape(_) => "shape",
            Self::Connector(_) => "connector",
            Self::SplitLayout(_) => "split-layout",
            Self::ThreeColumnLayout(_) => "three-column-layout",
        }
    }

    /// Returns the elements nested directly inside a layout container.
    pub fn nested(&self) -> Vec<&SlideStructureElement> {
        match self {
            Self::SplitLayout(split) => vec![split.left.as_ref(), split.right.as_ref()],
            Self::ThreeColumnLayout(layout) => layout.columns.iter().collect(),
            _ => Vec::new(),
        }
    }

    /// Counts this element and every element nested inside it.
    pub fn count(&self) -> usize {
        1 + self.nested().into_iter().map(Self::count).sum::<usize>()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulletList {
    pub items: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberedExplanation {
    pub items: Vec<ExplanationItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplanationItem {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    pub text: String,
    #[serde(default)]
    pub emphasis: bool,
    #[serde(default)]
    pub align: TextAlign,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub headers: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_weights: Option<Vec<f32>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyChart {
    pub root: HierarchyNode,
}

/// A tree node; children are owned, so the structure is always a tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyNode {
    pub label: String,
    #[serde(default)]
    pub children: Vec<HierarchyNode>,
}

impl HierarchyNode {
    /// Counts this node and all its descendants.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(HierarchyNode::node_count).sum::<usize>()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlowDirection {
    #[default]
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowChart {
    pub steps: Vec<FlowStep>,
    #[serde(default)]
    pub direction: FlowDirection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowStep {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterfallChart {
    #[serde(default)]
    pub start: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_label: Option<String>,
    pub deltas: Vec<LabeledValue>,
    #[serde(default = "default_true")]
    pub show_total: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_label: Option<String>,
}

/// A named numeric value: waterfall deltas, pie slices, divergence items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabeledValue {
    pub label: String,
    pub value: f64,
}

/// Category-by-series data shared by bar, stacked bar and line charts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesChart {
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub series: Vec<Series>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieChart {
    pub slices: Vec<LabeledValue>,
    #[serde(default)]
    pub donut: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarChart {
    pub axes: Vec<String>,
    #[serde(default)]
    pub series: Vec<Series>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunnelChart {
    pub stages: Vec<FunnelStage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunnelStage {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PyramidChart {
    /// Levels from the apex down.
    pub levels: Vec<PyramidLevel>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PyramidLevel {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleChart {
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VennDiagram {
    pub sets: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlap_label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixChart {
    /// Row-major: top-left, top-right, bottom-left, bottom-right.
    #[serde(default)]
    pub quadrants: Vec<Quadrant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_axis: Option<AxisLabels>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_axis: Option<AxisLabels>,
    #[serde(default)]
    pub items: Vec<MatrixItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quadrant {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisLabels {
    pub low: String,
    pub high: String,
}

/// A plotted point; `x` and `y` are expected in `0..=1`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixItem {
    pub label: String,
    pub x: f64,
    pub y: f64,
}

/// An interval on a shared time axis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledItem {
    pub label: String,
    pub start: f64,
    pub end: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GanttChart {
    pub tasks: Vec<ScheduledItem>,
    #[serde(default)]
    pub periods: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Roadmap {
    pub lanes: Vec<RoadmapLane>,
    #[serde(default)]
    pub periods: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapLane {
    pub name: String,
    #[serde(default)]
    pub items: Vec<ScheduledItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    pub milestones: Vec<Milestone>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvergenceChart {
    pub inputs: Vec<String>,
    pub output: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DivergenceChart {
    pub items: Vec<LabeledValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconGrid {
    pub items: Vec<IconItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconItem {
    /// A short glyph (emoji or a few characters) drawn inside the badge.
    pub icon: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeKind {
    #[default]
    Rectangle,
    RoundedRectangle,
    Ellipse,
    Diamond,
    Triangle,
    Chevron,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeElement {
    pub shape: ShapeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// CSS color; unparsable values fall back to the palette.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorElement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub style: StrokeStyle,
    #[serde(default)]
    pub bidirectional: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitLayout {
    pub left: Box<SlideStructureElement>,
    pub right: Box<SlideStructureElement>,
    /// Left share of the width, clamped to `0.2..=0.8`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratio: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreeColumnLayout {
    pub columns: Vec<SlideStructureElement>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_missing_title_defaults_to_empty() {
        let slide: SlideStructure =
            serde_json::from_value(json!({ "layout": "title-only" })).unwrap();
        assert!(slide.title.is_empty());
        assert!(slide.elements.is_empty());
    }

    #[test]
    fn test_unknown_element_tag_is_rejected() {
        let result = serde_json::from_value::<SlideStructure>(json!({
            "title": "T",
            "layout": "chart",
            "elements": [{ "type": "sankey-chart" }]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_layout_is_rejected() {
        let result =
            serde_json::from_value::<SlideStructure>(json!({ "title": "T", "layout": "grid" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_waterfall_defaults() {
        let element: SlideStructureElement = serde_json::from_value(json!({
            "type": "waterfall-chart",
            "deltas": []
        }))
        .unwrap();
        let SlideStructureElement::WaterfallChart(chart) = element else {
            panic!("expected waterfall chart");
        };
        assert_eq!(chart.start, 0.0);
        assert!(chart.show_total);
    }

    #[test]
    fn test_nested_count() {
        let element: SlideStructureElement = serde_json::from_value(json!({
            "type": "split-layout",
            "left": { "type": "bullet-list", "items": ["a"] },
            "right": {
                "type": "three-column-layout",
                "columns": [
                    { "type": "text-block", "text": "x" },
                    { "type": "cycle-chart", "steps": ["a", "b"] }
                ]
            }
        }))
        .unwrap();
        assert_eq!(element.count(), 5);
        assert_eq!(element.nested().len(), 2);
    }

    #[test]
    fn test_connector_style_parses() {
        let element: SlideStructureElement = serde_json::from_value(json!({
            "type": "connector",
            "from": "A",
            "to": "B",
            "style": "dashed"
        }))
        .unwrap();
        let SlideStructureElement::Connector(connector) = element else {
            panic!("expected connector");
        };
        assert_eq!(connector.style, StrokeStyle::Dashed);
        assert!(!connector.bidirectional);
    }

    #[test]
    fn test_layout_kind_display() {
        assert_eq!(LayoutKind::TwoColumn.to_string(), "two-column");
        assert_eq!(
            serde_json::to_value(LayoutKind::TitleBullets).unwrap(),
            json!("title-bullets")
        );
    }
}
