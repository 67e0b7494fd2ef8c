//! Single primitives: a labelled shape, and a connector arrow between two
//! optional end boxes.

use log::debug;

use slidegraph_core::{
    color::Color,
    draw::{
        ChevronDefinition, DiamondDefinition, OvalDefinition, RectangleDefinition, RenderLayer,
        ShapeDefinition, ShapeStyle, Sketch, StrokeDefinition, TriangleDefinition, VerticalAlign,
    },
    geometry::{Bounds, Insets, Point, Size},
};

use super::{
    RenderContext,
    common::{self, SMALL_FONT_SIZE},
};
use crate::model::{ConnectorElement, ShapeElement, ShapeKind};

const ROUNDED_RADIUS: f32 = 16.0;

const MAX_END_BOX_WIDTH: f32 = 280.0;

const MAX_END_BOX_HEIGHT: f32 = 96.0;

const ARROW_HEAD: f32 = 10.0;

/// Resolves the fill of a shape element, falling back to the palette's
/// primary color when the value does not parse.
fn resolve_fill(fill: Option<&str>, ctx: &RenderContext<'_>) -> Color {
    match fill.map(Color::new) {
        Some(Ok(color)) => color,
        Some(Err(err)) => {
            debug!(err = err.as_str(); "Unusable shape fill, using the palette");
            ctx.theme().primary()
        }
        None => ctx.theme().primary(),
    }
}

fn definition(kind: ShapeKind, style: ShapeStyle) -> Box<dyn ShapeDefinition> {
    match kind {
        ShapeKind::Rectangle => Box::new(RectangleDefinition::new(style)),
        ShapeKind::RoundedRectangle => {
            Box::new(RectangleDefinition::new(style).with_rounded(ROUNDED_RADIUS))
        }
        ShapeKind::Ellipse => Box::new(OvalDefinition::new(style)),
        ShapeKind::Diamond => Box::new(DiamondDefinition::new(style)),
        ShapeKind::Triangle => Box::new(TriangleDefinition::new(style)),
        ShapeKind::Chevron => Box::new(ChevronDefinition::new(style).with_leading(true)),
    }
}

pub fn shape(element: &ShapeElement, sketch: &mut Sketch, ctx: &RenderContext<'_>) {
    let fill = resolve_fill(element.fill.as_deref(), ctx);
    let bounds = sketch.clip().shrink(Insets::uniform(4.0));
    let definition = definition(element.shape, ShapeStyle::filled(fill));
    sketch.shape(RenderLayer::Content, definition.as_ref(), bounds);

    if let Some(text) = element.text.as_deref() {
        let inside = definition
            .content_bounds(bounds)
            .shrink(Insets::uniform(6.0));
        common::shape_label(sketch, ctx, text, inside, fill, None);
    }
}

/// Draws an end box and returns its bounds.
fn end_box(sketch: &mut Sketch, ctx: &RenderContext<'_>, text: &str, bounds: Bounds) -> Bounds {
    let fill = ctx.theme().surface();
    let style = ShapeStyle::filled(fill)
        .with_stroke(Some(StrokeDefinition::solid(ctx.theme().primary(), 2.0)));
    sketch.rect(RenderLayer::Content, bounds, &style, 8.0);
    common::shape_label(
        sketch,
        ctx,
        text,
        bounds.shrink(Insets::symmetric(4.0, 8.0)),
        fill,
        None,
    );
    bounds
}

pub fn connector(element: &ConnectorElement, sketch: &mut Sketch, ctx: &RenderContext<'_>) {
    let area = sketch.clip();
    let center_y = area.center().y();
    let box_size = Size::new(
        MAX_END_BOX_WIDTH.min(area.width() * 0.3),
        MAX_END_BOX_HEIGHT.min(area.height() * 0.5),
    );
    let left_box = Bounds::new_from_top_left(
        Point::new(area.min_x(), center_y - box_size.height() / 2.0),
        box_size,
    );
    let right_box = Bounds::new_from_top_left(
        Point::new(area.max_x() - box_size.width(), center_y - box_size.height() / 2.0),
        box_size,
    );

    let start = match element.from.as_deref() {
        Some(text) => end_box(sketch, ctx, text, left_box).max_x() + 4.0,
        None => area.min_x() + 8.0,
    };
    let end = match element.to.as_deref() {
        Some(text) => end_box(sketch, ctx, text, right_box).min_x() - 4.0,
        None => area.max_x() - 8.0,
    };

    let stroke = StrokeDefinition::styled(ctx.theme().neutral(), 2.0, element.style);
    sketch.arrow(
        Point::new(start, center_y),
        Point::new(end, center_y),
        &stroke,
        ARROW_HEAD,
        element.bidirectional,
    );

    if let Some(label) = element.label.as_deref() {
        let label_box = Bounds::new_from_top_left(
            Point::new(start, (center_y - 40.0).max(area.min_y())),
            Size::new((end - start).max(0.0), 32.0),
        );
        let style = ctx.centered_style(14.0);
        common::label(
            sketch,
            &style,
            label,
            label_box,
            &[14.0, 13.0, SMALL_FONT_SIZE, 11.0],
            VerticalAlign::Bottom,
        );
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use slidegraph_core::theme::ColorScheme;

    use super::*;
    use crate::{
        config::AppConfig,
        render::test_support::{assert_finite, markup, render},
    };

    #[test]
    fn test_resolve_fill_falls_back_to_palette() {
        let theme = ColorScheme::default();
        let config = AppConfig::default();
        let ctx = RenderContext::new(&theme, &config);
        assert_eq!(resolve_fill(Some("#ff0000"), &ctx), Color::new("#ff0000").unwrap());
        assert_eq!(resolve_fill(Some("chartreuse-ish"), &ctx), theme.primary());
        assert_eq!(resolve_fill(None, &ctx), theme.primary());
    }

    #[test]
    fn test_every_shape_kind_renders_inside() {
        for kind in [
            "rectangle",
            "rounded-rectangle",
            "ellipse",
            "diamond",
            "triangle",
            "chevron",
        ] {
            let svg = markup(render(json!({
                "type": "shape",
                "shape": kind,
                "text": "Core platform",
                "fill": "#336699"
            })));
            assert!(svg.contains("Core platform"), "{kind}");
            assert_finite(&svg);
        }
    }

    #[test]
    fn test_connector_with_boxes_and_label() {
        let svg = markup(render(json!({
            "type": "connector",
            "from": "Client",
            "to": "Server",
            "label": "HTTPS",
            "style": "dashed",
            "bidirectional": true
        })));
        assert!(svg.contains("Client"));
        assert!(svg.contains("Server"));
        assert!(svg.contains("HTTPS"));
        assert!(svg.contains("stroke-dasharray=\"6,4\""));
        // one head per end
        assert_eq!(svg.matches("<path").count(), 2);
    }

    #[test]
    fn test_bare_connector() {
        let svg = markup(render(json!({ "type": "connector", "style": "dotted" })));
        assert!(svg.contains("stroke-dasharray=\"2,3\""));
        assert_eq!(svg.matches("<path").count(), 1);
        assert!(!svg.contains("<rect"));
    }
}
