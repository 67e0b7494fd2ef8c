//! Slide composition.
//!
//! The composer turns a validated [`SlideStructure`] into a complete SVG
//! document: it draws the frame (background, header band with the title,
//! accent rule, optional footer), carves the body region into slots
//! according to the [`LayoutKind`], and hands each slot to exactly one
//! element renderer. Fragments are wrapped in
//! `<g data-element="tag" data-slot="i">` so consumers can locate them.

use log::{debug, info};
use svg::{Document, node::element::Group};

use slidegraph_core::{
    canvas::{CANVAS_HEIGHT, CANVAS_WIDTH, CanvasLayout, canvas_bounds},
    draw::{
        FontWeight, RenderLayer, ShapeStyle, Sketch, StrokeDefinition, Text, TextAnchor,
        VerticalAlign,
    },
    geometry::{Bounds, Point, Size},
    metrics::line_height,
    text_layout::{FitBox, FittedText, fit_text, single_line},
    theme::ColorScheme,
};

use crate::{
    config::AppConfig,
    error::SlideError,
    model::{Footer, LayoutKind, SlideStructure},
    render::{RenderContext, render_element},
};

/// Gap between side-by-side slots.
pub const SLOT_GAP: f32 = 24.0;

const TITLE_LADDER: &[f32] = &[36.0, 28.0, 24.0];

const TITLE_MAX_LINES: usize = 2;

const SUBTITLE_HEIGHT: f32 = 28.0;

const SUBTITLE_FONT_SIZE: f32 = 18.0;

const ACCENT_RULE_HEIGHT: f32 = 4.0;

const FOOTER_FONT_SIZE: f32 = 14.0;

/// Returns how many elements a layout kind accepts.
pub fn capacity(layout: LayoutKind) -> usize {
    match layout {
        LayoutKind::TitleOnly => 0,
        LayoutKind::TitleContent
        | LayoutKind::TitleBullets
        | LayoutKind::Hierarchy
        | LayoutKind::Steps
        | LayoutKind::Timeline
        | LayoutKind::Chart => 1,
        LayoutKind::TwoColumn => 2,
        LayoutKind::ThreeColumn => 3,
    }
}

/// Subdivides the body region into the slots of `layout`, left to right.
pub fn slot_plan(layout: LayoutKind, body: Bounds) -> Vec<Bounds> {
    match capacity(layout) {
        0 => Vec::new(),
        1 => vec![body],
        count => body.split_columns(count, SLOT_GAP),
    }
}

/// Composes a slide into an SVG document.
///
/// # Errors
///
/// Returns [`SlideError::SlotCapacity`] when the slide holds more elements
/// than its layout has slots, and propagates structural errors raised by
/// element renderers.
pub fn compose(
    structure: &SlideStructure,
    theme: &ColorScheme,
    config: &AppConfig,
) -> Result<Document, SlideError> {
    info!(
        layout:% = structure.layout,
        elements = structure.elements.len(),
        scheme = theme.name().as_str();
        "Composing slide"
    );

    let capacity = capacity(structure.layout);
    if structure.elements.len() > capacity {
        return Err(SlideError::SlotCapacity {
            layout: structure.layout,
            capacity,
            count: structure.elements.len(),
        });
    }

    let canvas = CanvasLayout::new(structure.footer.is_some());
    let ctx = RenderContext::new(theme, config);
    let slots = slot_plan(structure.layout, canvas.body());

    let mut frame = Sketch::new(canvas_bounds());
    draw_header(&mut frame, &ctx, structure, canvas.header());
    if let (Some(footer), Some(bounds)) = (structure.footer.as_ref(), canvas.footer()) {
        draw_footer(&mut frame, &ctx, footer, bounds);
    }

    let mut document = Document::new()
        .set("width", CANVAS_WIDTH)
        .set("height", CANVAS_HEIGHT)
        .set("viewBox", format!("0 0 {CANVAS_WIDTH} {CANVAS_HEIGHT}"));
    for node in frame.finish().render() {
        document = document.add(node);
    }

    for (index, (element, slot)) in structure.elements.iter().zip(&slots).enumerate() {
        let sketch = render_element(element, *slot, &ctx)?;
        let mut group = Group::new()
            .set("data-slot", index.to_string())
            .set("data-element", element.tag());
        for node in sketch.finish().render() {
            group = group.add(node);
        }
        document = document.add(group);
    }

    if config.render().show_slot_frames() {
        debug!(slots = slots.len(); "Drawing slot frames");
        let mut overlay = Sketch::new(canvas_bounds());
        let style = ShapeStyle::outlined(StrokeDefinition::dashed(theme.accent(), 1.0));
        for slot in &slots {
            overlay.rect(RenderLayer::Marker, *slot, &style, 0.0);
        }
        let mut group = Group::new().set("data-debug", "slot-frames");
        for node in overlay.finish().render() {
            group = group.add(node);
        }
        document = document.add(group);
    }

    Ok(document)
}

/// Lays out the title in at most two lines, stepping down the ladder.
fn fit_title(title: &str, bounds: Bounds) -> FittedText {
    let fit_at = |size: f32| {
        let height = bounds
            .height()
            .min(TITLE_MAX_LINES as f32 * line_height(size));
        fit_text(title, FitBox::new(bounds.width(), height), &[size])
    };
    TITLE_LADDER
        .iter()
        .map(|size| fit_at(*size))
        .find(|fitted| !fitted.truncated())
        .unwrap_or_else(|| fit_at(TITLE_LADDER[TITLE_LADDER.len() - 1]))
}

fn draw_header(
    sketch: &mut Sketch,
    ctx: &RenderContext<'_>,
    structure: &SlideStructure,
    header: Bounds,
) {
    let theme = ctx.theme();
    let canvas = canvas_bounds();
    sketch.rect(
        RenderLayer::Background,
        canvas,
        &ShapeStyle::filled(theme.background()),
        0.0,
    );

    let band = Bounds::new_from_top_left(
        Point::default(),
        Size::new(canvas.width(), header.max_y()),
    );
    sketch.rect(
        RenderLayer::Background,
        band,
        &ShapeStyle::filled(theme.primary()),
        0.0,
    );
    let rule = Bounds::new_from_top_left(
        Point::new(0.0, header.max_y()),
        Size::new(canvas.width(), ACCENT_RULE_HEIGHT),
    );
    sketch.rect(
        RenderLayer::Content,
        rule,
        &ShapeStyle::filled(theme.accent()),
        0.0,
    );

    let subtitle = structure
        .subtitle
        .as_deref()
        .filter(|s| !s.trim().is_empty());
    let title_box = match subtitle {
        Some(_) => header.take_top(header.height() - SUBTITLE_HEIGHT),
        None => header,
    };

    let fitted = fit_title(structure.title.trim(), title_box);
    let title_style = ctx
        .text_style(fitted.font_size())
        .with_color(theme.header_text())
        .with_weight(FontWeight::Bold);
    sketch.text(
        &Text::fitted(&title_style, &fitted),
        title_box,
        VerticalAlign::Middle,
    );

    if let Some(subtitle) = subtitle {
        let subtitle_box = header.take_bottom(SUBTITLE_HEIGHT);
        let line = single_line(subtitle, subtitle_box.width(), SUBTITLE_FONT_SIZE);
        let style = ctx
            .text_style(SUBTITLE_FONT_SIZE)
            .with_color(theme.header_text().with_alpha(0.85));
        sketch.text(&Text::fitted(&style, &line), subtitle_box, VerticalAlign::Top);
    }
}

/// Formats the page indicator: `n / total`, or just `n`.
fn page_indicator(footer: &Footer) -> Option<String> {
    match (footer.page_number, footer.total_pages) {
        (Some(page), Some(total)) => Some(format!("{page} / {total}")),
        (Some(page), None) => Some(page.to_string()),
        (None, _) => None,
    }
}

fn draw_footer(sketch: &mut Sketch, ctx: &RenderContext<'_>, footer: &Footer, bounds: Bounds) {
    sketch.line(
        RenderLayer::Grid,
        Point::new(bounds.min_x(), bounds.min_y()),
        Point::new(bounds.max_x(), bounds.min_y()),
        &StrokeDefinition::solid(ctx.theme().neutral().with_alpha(0.45), 1.0),
    );

    let page = page_indicator(footer);
    let page_style = ctx
        .muted_style(FOOTER_FONT_SIZE)
        .with_anchor(TextAnchor::End);
    let page_width = match page.as_deref() {
        Some(page) => {
            let line = single_line(page, bounds.width(), FOOTER_FONT_SIZE);
            sketch
                .text(&Text::fitted(&page_style, &line), bounds, VerticalAlign::Middle)
                .width()
        }
        None => 0.0,
    };

    if let Some(text) = footer.text.as_deref().filter(|t| !t.trim().is_empty()) {
        let width = (bounds.width() - page_width - SLOT_GAP).max(0.0);
        let text_box = bounds.take_left(width);
        let line = single_line(text, text_box.width(), FOOTER_FONT_SIZE);
        if !line.is_empty() {
            let style = ctx.muted_style(FOOTER_FONT_SIZE);
            sketch.text(&Text::fitted(&style, &line), text_box, VerticalAlign::Middle);
        }
    }
}
