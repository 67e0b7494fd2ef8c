//! The fixed slide canvas and its frame regions.
//!
//! Every slide is drawn on a 1280×720 canvas. [`CanvasLayout`] carves the
//! canvas into a header band, an optional footer band and the body region
//! that the slide composer subdivides into slots.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │ padding                                  │
//! │  ┌────────────── header ──────────────┐  │
//! │  └────────────────────────────────────┘  │
//! │  ┌─────────────── body ───────────────┐  │
//! │  │                                    │  │
//! │  └────────────────────────────────────┘  │
//! │  ┌────────────── footer ──────────────┐  │
//! │  └────────────────────────────────────┘  │
//! └──────────────────────────────────────────┘
//! ```

use crate::geometry::{Bounds, Insets, Point, Size};

/// Canvas width in logical units.
pub const CANVAS_WIDTH: f32 = 1280.0;

/// Canvas height in logical units.
pub const CANVAS_HEIGHT: f32 = 720.0;

/// Margin between the canvas edge and any content.
pub const CONTENT_PADDING: f32 = 40.0;

/// Height of the title band.
pub const HEADER_HEIGHT: f32 = 96.0;

/// Height of the footer band, reserved only when a footer is present.
pub const FOOTER_HEIGHT: f32 = 36.0;

/// Vertical gap between the frame bands and the body.
pub const BAND_GAP: f32 = 16.0;

/// Returns the full canvas bounds.
pub fn canvas_bounds() -> Bounds {
    Bounds::new_from_top_left(Point::default(), Size::new(CANVAS_WIDTH, CANVAS_HEIGHT))
}

/// The frame regions of one slide.
///
/// # Examples
///
/// ```
/// # use slidegraph_core::canvas::{CanvasLayout, CANVAS_WIDTH, CONTENT_PADDING};
/// let layout = CanvasLayout::new(false);
/// assert!(layout.footer().is_none());
/// assert_eq!(layout.body().width(), CANVAS_WIDTH - 2.0 * CONTENT_PADDING);
/// assert!(layout.content_area().contains_bounds(&layout.body()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasLayout {
    content_area: Bounds,
    header: Bounds,
    body: Bounds,
    footer: Option<Bounds>,
}

impl CanvasLayout {
    /// Computes the frame regions; `has_footer` reserves the footer band.
    pub fn new(has_footer: bool) -> Self {
        let content_area = canvas_bounds().shrink(Insets::uniform(CONTENT_PADDING));
        let header = content_area.take_top(HEADER_HEIGHT);
        let after_header = content_area.below(HEADER_HEIGHT, BAND_GAP);

        let (body, footer) = if has_footer {
            let footer = content_area.take_bottom(FOOTER_HEIGHT);
            let body = after_header
                .take_top((after_header.height() - FOOTER_HEIGHT - BAND_GAP).max(0.0));
            (body, Some(footer))
        } else {
            (after_header, None)
        };

        Self {
            content_area,
            header,
            body,
            footer,
        }
    }

    /// The canvas minus padding on all sides.
    pub fn content_area(&self) -> Bounds {
        self.content_area
    }

    /// The header band holding the slide title.
    pub fn header(&self) -> Bounds {
        self.header
    }

    /// The body region subdivided into slots.
    pub fn body(&self) -> Bounds {
        self.body
    }

    /// The footer band, when one was requested.
    pub fn footer(&self) -> Option<Bounds> {
        self.footer
    }
}
