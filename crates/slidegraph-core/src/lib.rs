//! SlideGraph core types.
//!
//! This crate holds everything the slide renderer needs that is independent
//! of the slide data model:
//!
//! - **Geometry**: points, sizes, bounds and slot splitting ([`geometry`])
//! - **Canvas**: the fixed 1280×720 canvas and its frame regions ([`canvas`])
//! - **Colors**: CSS color parsing and hex output ([`color::Color`])
//! - **Themes**: named palettes resolved once per render ([`theme`])
//! - **Metrics**: deterministic text width estimates ([`metrics`])
//! - **Text layout**: wrapping, truncation and font fallback ([`text_layout`])
//! - **Draw**: layered SVG output, shapes, strokes, text ([`draw`])

pub mod canvas;
pub mod color;
pub mod draw;
pub mod geometry;
pub mod metrics;
pub mod text_layout;
pub mod theme;
