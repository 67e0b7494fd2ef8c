//! Slidegraph - deterministic slide-structure to SVG rendering.
//!
//! A slide is described declaratively as a [`model::SlideStructure`]: a
//! title, a layout kind and a list of typed diagram elements. The engine
//! validates it, lays the elements out into slots on a 1280×720 canvas and
//! renders each one into a single self-contained SVG document.
//!
//! Rendering is pure: no I/O, no clocks and no randomness, so the same
//! input always yields byte-identical output.

pub mod compose;
pub mod config;
pub mod model;

mod error;
mod render;
mod validate;

pub use slidegraph_core::{color, theme};

pub use error::SlideError;
pub use validate::validate;

use std::panic::{self, AssertUnwindSafe};

use log::{debug, error, info};
use serde::{Deserialize, Serialize};

use slidegraph_core::theme::ColorScheme;

use config::AppConfig;
use model::SlideStructure;

/// The outcome of one render, shaped for JSON consumers.
///
/// ```
/// # use slidegraph::RenderResult;
/// let failed = RenderResult::failure("structure が必要です");
/// assert_eq!(
///     serde_json::to_string(&failed).unwrap(),
///     r#"{"success":false,"error":"structure が必要です"}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svg_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RenderResult {
    /// A successful render carrying the SVG document.
    pub fn success(svg: String) -> Self {
        Self {
            success: true,
            svg_data: Some(svg),
            error: None,
        }
    }

    /// A failed render carrying a human-readable message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            svg_data: None,
            error: Some(message.into()),
        }
    }
}

impl From<Result<String, SlideError>> for RenderResult {
    fn from(result: Result<String, SlideError>) -> Self {
        match result {
            Ok(svg) => Self::success(svg),
            Err(err) => Self::failure(err.to_string()),
        }
    }
}

/// Renders slides with a fixed configuration.
///
/// # Examples
///
/// ```
/// use slidegraph::{SlideRenderer, config::AppConfig, model::SlideStructure};
///
/// let slide: SlideStructure = serde_json::from_str(
///     r#"{ "title": "Agenda", "layout": "title-bullets",
///          "elements": [{ "type": "bullet-list", "items": ["Intro", "Plan"] }] }"#,
/// ).unwrap();
///
/// let renderer = SlideRenderer::new(AppConfig::default());
/// let svg = renderer.render(&slide).unwrap();
/// assert!(svg.starts_with("<svg"));
/// assert!(svg.contains("Agenda"));
/// ```
#[derive(Debug, Default)]
pub struct SlideRenderer {
    config: AppConfig,
}

impl SlideRenderer {
    /// Create a new renderer with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Validates and renders a slide to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns an input error for a blank title or a grammar violation, and
    /// a structural error when a cap or a layout capacity is exceeded.
    pub fn render(&self, structure: &SlideStructure) -> Result<String, SlideError> {
        validate(structure, self.config.limits())?;

        let scheme = structure
            .color_scheme
            .unwrap_or_else(|| self.config.render().default_color_scheme());
        let theme = ColorScheme::resolve(scheme);
        debug!(scheme = scheme.as_str(); "Resolved color scheme");

        let document = compose::compose(structure, &theme, &self.config)?;
        let svg = document.to_string();
        info!(bytes = svg.len(); "Slide rendered");
        Ok(svg)
    }

    /// Renders a slide behind a panic boundary: a renderer panic becomes
    /// [`SlideError::Internal`] instead of unwinding into the caller.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`SlideRenderer::render`], plus
    /// [`SlideError::Internal`] for a caught panic.
    pub fn render_guarded(&self, structure: &SlideStructure) -> Result<String, SlideError> {
        panic::catch_unwind(AssertUnwindSafe(|| self.render(structure))).unwrap_or_else(|payload| {
            let message = panic_message(payload.as_ref());
            error!(message = message.as_str(); "Renderer panicked");
            Err(SlideError::Internal(message))
        })
    }

    /// Renders a slide, converting every failure (panics included) into an
    /// unsuccessful [`RenderResult`].
    pub fn render_result(&self, structure: &SlideStructure) -> RenderResult {
        let result = self.render_guarded(structure);
        if let Err(err) = &result {
            debug!(err:% = err; "Slide rejected");
        }
        result.into()
    }

    /// Deserializes and renders a slide given as a JSON value.
    ///
    /// `None` and JSON `null` are reported as a missing structure.
    pub fn render_value(&self, value: Option<&serde_json::Value>) -> RenderResult {
        let value = match value {
            Some(value) if !value.is_null() => value,
            _ => return RenderResult::failure(SlideError::MissingStructure.to_string()),
        };
        match SlideStructure::deserialize(value) {
            Ok(structure) => self.render_result(&structure),
            Err(err) => {
                debug!(err:% = err; "Slide structure does not deserialize");
                RenderResult::failure(SlideError::InvalidStructure(err.to_string()).to_string())
            }
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Renders a slide given as a JSON value with the default configuration.
///
/// # Examples
///
/// ```
/// let result = slidegraph::render_slide(None);
/// assert!(!result.success);
/// assert_eq!(result.error.as_deref(), Some("structure が必要です"));
/// ```
pub fn render_slide(value: Option<&serde_json::Value>) -> RenderResult {
    SlideRenderer::default().render_value(value)
}

/// Parses JSON text and renders it with the default configuration.
pub fn render_slide_json(json: &str) -> RenderResult {
    match serde_json::from_str::<serde_json::Value>(json) {
        Ok(value) => render_slide(Some(&value)),
        Err(err) => RenderResult::failure(SlideError::InvalidStructure(err.to_string()).to_string()),
    }
}
