//! End-to-end rendering through the public API.

use serde_json::{Value, json};

use slidegraph::{
    RenderResult, SlideError, SlideRenderer, config::AppConfig, model::SlideStructure,
    render_slide,
};

fn slide(value: Value) -> SlideStructure {
    serde_json::from_value(value).expect("valid slide structure")
}

fn render_ok(value: Value) -> String {
    let result = render_slide(Some(&value));
    assert!(result.success, "render failed: {:?}", result.error);
    result.svg_data.expect("svg data on success")
}

fn assert_clean(svg: &str) {
    assert!(svg.starts_with("<svg"), "not an svg document");
    assert!(svg.trim_end().ends_with("</svg>"), "truncated document");
    assert!(!svg.contains("NaN"), "NaN in output");
    assert!(!svg.contains("inf"), "non-finite number in output");
    assert!(!svg.contains("href"), "external reference in output");
}

/// One representative element per variant.
fn gallery() -> Vec<Value> {
    vec![
        json!({ "type": "bullet-list", "heading": "Goals", "items": ["Grow revenue", "Cut churn"] }),
        json!({ "type": "numbered-explanation", "items": [
            { "title": "Collect", "description": "Gather usage data" },
            { "title": "Decide" }
        ] }),
        json!({ "type": "text-block", "text": "Customers first.", "emphasis": true, "align": "center" }),
        json!({ "type": "table", "headers": ["Region", "Sales"], "rows": [["East", "120"], ["West", "98"]] }),
        json!({ "type": "hierarchy-chart", "root": { "label": "CEO", "children": [
            { "label": "CTO" }, { "label": "CFO" }
        ] } }),
        json!({ "type": "flow-chart", "steps": [{ "label": "Plan" }, { "label": "Build" }, { "label": "Ship" }] }),
        json!({ "type": "waterfall-chart", "deltas": [
            { "label": "Q1", "value": 10 }, { "label": "Q2", "value": -4 }
        ] }),
        json!({ "type": "bar-chart", "categories": ["A", "B"], "series": [{ "name": "2024", "values": [3, 5] }] }),
        json!({ "type": "stacked-bar-chart", "categories": ["A", "B"], "series": [
            { "name": "Hardware", "values": [3, 5] }, { "name": "Services", "values": [2, 1] }
        ] }),
        json!({ "type": "line-chart", "categories": ["Jan", "Feb", "Mar"], "series": [
            { "name": "Visits", "values": [10, 14, 9] }
        ] }),
        json!({ "type": "pie-chart", "slices": [
            { "label": "Online", "value": 60 }, { "label": "Retail", "value": 40 }
        ], "donut": true }),
        json!({ "type": "radar-chart", "axes": ["Speed", "Cost", "Quality"], "series": [
            { "name": "Us", "values": [4, 3, 5] }
        ] }),
        json!({ "type": "funnel-chart", "stages": [
            { "label": "Visitors", "value": 1000 }, { "label": "Leads", "value": 300 }
        ] }),
        json!({ "type": "pyramid-chart", "levels": [{ "label": "Vision" }, { "label": "Strategy" }, { "label": "Tactics" }] }),
        json!({ "type": "cycle-chart", "steps": ["Plan", "Do", "Check", "Act"] }),
        json!({ "type": "venn-diagram", "sets": ["Design", "Engineering"], "overlapLabel": "Product" }),
        json!({ "type": "matrix-chart", "quadrants": [
            { "label": "Quick wins" }, { "label": "Big bets" }, { "label": "Fillers" }, { "label": "Money pits" }
        ], "items": [{ "label": "CRM", "x": 0.2, "y": 0.8 }] }),
        json!({ "type": "gantt-chart", "tasks": [
            { "label": "Design", "start": 0, "end": 2 }, { "label": "Build", "start": 2, "end": 5 }
        ], "periods": ["Jan", "Feb", "Mar", "Apr", "May"] }),
        json!({ "type": "roadmap", "lanes": [
            { "name": "Platform", "items": [{ "label": "API v2", "start": 0, "end": 1 }] },
            { "name": "Mobile", "items": [] }
        ] }),
        json!({ "type": "timeline", "milestones": [
            { "label": "Kickoff", "date": "Jan" }, { "label": "Launch", "date": "Jun" }
        ] }),
        json!({ "type": "convergence-chart", "inputs": ["Sales", "Support"], "output": "Roadmap" }),
        json!({ "type": "divergence-chart", "items": [
            { "label": "Price", "value": 3 }, { "label": "Delay", "value": -2 }
        ] }),
        json!({ "type": "icon-grid", "items": [{ "icon": "★", "title": "Quality" }, { "icon": "$", "title": "Cost" }] }),
        json!({ "type": "shape", "shape": "diamond", "text": "Decision" }),
        json!({ "type": "connector", "from": "Client", "to": "Server", "label": "HTTPS" }),
        json!({ "type": "split-layout", "left": { "type": "text-block", "text": "Left" },
                "right": { "type": "text-block", "text": "Right" } }),
        json!({ "type": "three-column-layout", "columns": [
            { "type": "text-block", "text": "One" }, { "type": "text-block", "text": "Two" }
        ] }),
    ]
}

#[test]
fn test_title_only_slide() {
    let svg = render_ok(json!({ "title": "Annual kickoff", "layout": "title-only" }));
    assert_clean(&svg);
    assert!(svg.contains("Annual kickoff"));
    assert!(!svg.contains("data-slot"));
}

#[test]
fn test_two_column_bullets() {
    let svg = render_ok(json!({
        "title": "Pros and cons",
        "layout": "two-column",
        "elements": [
            { "type": "bullet-list", "items": ["Fast", "Cheap"] },
            { "type": "bullet-list", "items": ["Risky", "New"] }
        ]
    }));
    assert_clean(&svg);
    assert_eq!(svg.matches("data-slot=").count(), 2);
    assert!(svg.contains("data-element=\"bullet-list\" data-slot=\"0\""));
    assert!(svg.contains("data-element=\"bullet-list\" data-slot=\"1\""));
    // Left column content precedes the right one in document order.
    assert!(svg.find("Fast").unwrap() < svg.find("Risky").unwrap());
}

#[test]
fn test_waterfall_running_totals() {
    let svg = render_ok(json!({
        "title": "Bridge",
        "layout": "chart",
        "elements": [{ "type": "waterfall-chart", "start": 0, "deltas": [
            { "label": "A", "value": 10 },
            { "label": "B", "value": -4 },
            { "label": "C", "value": 6 }
        ] }]
    }));
    assert_clean(&svg);
    for label in ["+10", "-4", "+6", "12"] {
        assert!(svg.contains(label), "missing {label}");
    }
}

#[test]
fn test_three_level_hierarchy() {
    let svg = render_ok(json!({
        "title": "Organisation",
        "layout": "hierarchy",
        "elements": [{ "type": "hierarchy-chart", "root": {
            "label": "Board",
            "children": [
                { "label": "Sales" },
                { "label": "Engineering", "children": [{ "label": "Web" }, { "label": "Mobile" }] },
                { "label": "Finance" }
            ]
        } }]
    }));
    assert_clean(&svg);
    for label in ["Board", "Sales", "Engineering", "Web", "Mobile", "Finance"] {
        assert!(svg.contains(label), "missing {label}");
    }
}

#[test]
fn test_absent_structure() {
    let result = render_slide(None);
    assert_eq!(
        result,
        RenderResult {
            success: false,
            svg_data: None,
            error: Some("structure が必要です".to_string()),
        }
    );
}

#[test]
fn test_three_column_over_capacity() {
    let column = json!({ "type": "text-block", "text": "Column" });
    let structure = slide(json!({
        "title": "Too many columns",
        "layout": "three-column",
        "elements": [column.clone(), column.clone(), column.clone(), column]
    }));
    let err = SlideRenderer::default().render(&structure).unwrap_err();
    assert!(err.is_structural());
    assert!(matches!(
        err,
        SlideError::SlotCapacity {
            capacity: 3,
            count: 4,
            ..
        }
    ));

    let result = SlideRenderer::default().render_result(&structure);
    assert!(!result.success);
    assert!(result.error.unwrap().contains("at most 3"));
}

#[test]
fn test_every_element_type_renders() {
    for element in gallery() {
        let tag = element["type"].as_str().unwrap().to_string();
        let svg = render_ok(json!({
            "title": "Gallery",
            "layout": "title-content",
            "elements": [element]
        }));
        assert_clean(&svg);
        assert!(
            svg.contains(&format!("data-element=\"{tag}\"")),
            "missing fragment for {tag}"
        );
    }
}

#[test]
fn test_every_element_type_renders_in_a_narrow_column() {
    for element in gallery() {
        let filler = json!({ "type": "text-block", "text": "Side" });
        let svg = render_ok(json!({
            "title": "Narrow",
            "layout": "three-column",
            "footer": { "text": "Draft", "pageNumber": 1, "totalPages": 2 },
            "elements": [filler.clone(), element, filler]
        }));
        assert_clean(&svg);
    }
}

#[test]
fn test_rendering_is_deterministic() {
    let renderer = SlideRenderer::new(AppConfig::default());
    for element in gallery() {
        let structure = slide(json!({
            "title": "Same input",
            "subtitle": "Same output",
            "layout": "chart",
            "elements": [element]
        }));
        let first = renderer.render(&structure).unwrap();
        let second = renderer.render(&structure).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_empty_data_renders_placeholders() {
    let empties = [
        json!({ "type": "bar-chart", "categories": [], "series": [] }),
        json!({ "type": "pie-chart", "slices": [] }),
        json!({ "type": "line-chart", "categories": ["A"], "series": [{ "name": "S", "values": [] }] }),
        json!({ "type": "table", "headers": [], "rows": [] }),
        json!({ "type": "timeline", "milestones": [] }),
    ];
    for element in empties {
        let svg = render_ok(json!({
            "title": "Nothing yet",
            "layout": "chart",
            "elements": [element]
        }));
        assert_clean(&svg);
        assert!(svg.contains("stroke-dasharray"), "placeholder frame expected");
    }
}

#[test]
fn test_limits_reject_oversized_input() {
    let values: Vec<f64> = (0..100).map(f64::from).collect();
    let structure = slide(json!({
        "title": "Too long",
        "layout": "chart",
        "elements": [{ "type": "line-chart", "series": [{ "name": "S", "values": values }] }]
    }));
    let err = SlideRenderer::default().render(&structure).unwrap_err();
    assert!(err.is_structural(), "{err}");
}
