//! Layout containers that split their slot and render children into the
//! parts.

use log::trace;

use slidegraph_core::{draw::Sketch, geometry::Bounds};

use super::{RenderContext, common, render_element};
use crate::{
    error::SlideError,
    model::{SlideStructureElement, SplitLayout, ThreeColumnLayout},
};

const DEFAULT_RATIO: f32 = 0.5;

const MIN_RATIO: f32 = 0.2;

const MAX_RATIO: f32 = 0.8;

const COLUMN_GAP: f32 = 24.0;

const MAX_COLUMNS: usize = 3;

fn split_ratio(ratio: Option<f32>) -> f32 {
    ratio
        .filter(|r| r.is_finite())
        .map_or(DEFAULT_RATIO, |r| r.clamp(MIN_RATIO, MAX_RATIO))
}

/// Returns the context for children, failing when it would nest deeper
/// than the configured cap.
fn child_context<'a>(ctx: &RenderContext<'a>) -> Result<RenderContext<'a>, SlideError> {
    let nested = ctx.nested();
    let limit = ctx.limits().max_nesting_depth();
    if nested.depth() > limit {
        return Err(SlideError::limit_exceeded(
            "layout nesting depth",
            limit,
            nested.depth(),
        ));
    }
    Ok(nested)
}

fn render_children<'e>(
    children: impl IntoIterator<Item = (&'e SlideStructureElement, Bounds)>,
    sketch: &mut Sketch,
    ctx: &RenderContext<'_>,
) -> Result<(), SlideError> {
    let nested = child_context(ctx)?;
    for (child, bounds) in children {
        let child_sketch = render_element(child, bounds, &nested)?;
        sketch.absorb(child_sketch);
    }
    Ok(())
}

pub fn split(
    split: &SplitLayout,
    sketch: &mut Sketch,
    ctx: &RenderContext<'_>,
) -> Result<(), SlideError> {
    let ratio = split_ratio(split.ratio);
    let (left, right) = sketch.clip().split_horizontal(ratio, COLUMN_GAP);
    trace!(ratio = ratio; "Splitting slot");
    render_children(
        [(split.left.as_ref(), left), (split.right.as_ref(), right)],
        sketch,
        ctx,
    )
}

pub fn three_column(
    layout: &ThreeColumnLayout,
    sketch: &mut Sketch,
    ctx: &RenderContext<'_>,
) -> Result<(), SlideError> {
    if layout.columns.is_empty() {
        common::placeholder(sketch, ctx, "three-column layout without columns");
        return Ok(());
    }
    let count = layout.columns.len().min(MAX_COLUMNS);
    let columns = sketch.clip().split_columns(count, COLUMN_GAP);
    render_children(layout.columns.iter().zip(columns), sketch, ctx)
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use serde_json::json;

    use super::*;
    use crate::{
        config::{AppConfig, Limits, RenderConfig},
        render::{
            common::PLACEHOLDER_TEXT,
            test_support::{assert_finite, markup, render, try_render},
        },
    };

    fn bullets(text: &str) -> serde_json::Value {
        json!({ "type": "bullet-list", "items": [text] })
    }

    #[test]
    fn test_split_ratio_is_clamped() {
        assert_approx_eq!(f32, split_ratio(None), 0.5);
        assert_approx_eq!(f32, split_ratio(Some(0.05)), 0.2);
        assert_approx_eq!(f32, split_ratio(Some(0.95)), 0.8);
        assert_approx_eq!(f32, split_ratio(Some(0.6)), 0.6);
        assert_approx_eq!(f32, split_ratio(Some(f32::NAN)), 0.5);
    }

    #[test]
    fn test_split_renders_both_sides() {
        let svg = markup(render(json!({
            "type": "split-layout",
            "ratio": 0.4,
            "left": bullets("Left side point"),
            "right": { "type": "pie-chart", "slices": [
                { "label": "A", "value": 3 },
                { "label": "B", "value": 1 }
            ] }
        })));
        assert!(svg.contains("Left side point"));
        assert!(svg.contains("<path"));
        assert_finite(&svg);
    }

    #[test]
    fn test_three_column_renders_each_column() {
        let svg = markup(render(json!({
            "type": "three-column-layout",
            "columns": [bullets("First"), bullets("Second"), bullets("Third")]
        })));
        for word in ["First", "Second", "Third"] {
            assert!(svg.contains(word), "{word}");
        }
    }

    #[test]
    fn test_empty_three_column_placeholder() {
        let svg = markup(render(json!({ "type": "three-column-layout", "columns": [] })));
        assert!(svg.contains(PLACEHOLDER_TEXT));
    }

    #[test]
    fn test_nesting_beyond_cap_fails() {
        let nested = json!({
            "type": "split-layout",
            "left": {
                "type": "split-layout",
                "left": bullets("deep"),
                "right": bullets("deep")
            },
            "right": bullets("shallow")
        });
        let config = AppConfig::new(
            RenderConfig::default(),
            Limits::default().with_max_nesting_depth(2),
        );
        let err = try_render(nested.clone(), &config).unwrap_err();
        assert_eq!(err, SlideError::limit_exceeded("layout nesting depth", 2, 3));

        assert!(try_render(nested, &AppConfig::default()).is_ok());
    }
}
