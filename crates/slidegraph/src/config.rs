//! Configuration types for slide rendering.
//!
//! All types implement [`serde::Deserialize`] with defaults for every field,
//! so a partial (or empty) configuration file is always valid.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining render and limit settings.
//! - [`RenderConfig`] - Visual defaults: palette, font family, debug frames.
//! - [`Limits`] - Caps on element, series and hierarchy cardinality.
//!
//! # Example
//!
//! ```
//! # use slidegraph::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.limits().max_elements(), 12);
//! assert!(!config.render().show_slot_frames());
//! ```

use serde::Deserialize;

use slidegraph_core::{draw::DEFAULT_FONT_FAMILY, theme::ColorSchemeName};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Render configuration section.
    #[serde(default)]
    render: RenderConfig,

    /// Resource limit section.
    #[serde(default)]
    limits: Limits,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(render: RenderConfig, limits: Limits) -> Self {
        Self { render, limits }
    }

    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }
}

/// Visual defaults applied to every slide.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RenderConfig {
    /// Palette used when a slide names none.
    #[serde(default)]
    default_color_scheme: ColorSchemeName,

    /// Font family stack written into every text element.
    #[serde(default)]
    font_family: Option<String>,

    /// Outlines every slot with a dashed frame, for layout debugging.
    #[serde(default)]
    show_slot_frames: bool,
}

impl RenderConfig {
    pub fn new(
        default_color_scheme: ColorSchemeName,
        font_family: Option<String>,
        show_slot_frames: bool,
    ) -> Self {
        Self {
            default_color_scheme,
            font_family,
            show_slot_frames,
        }
    }

    pub fn default_color_scheme(&self) -> ColorSchemeName {
        self.default_color_scheme
    }

    /// Returns the configured font family, or the built-in stack.
    pub fn font_family(&self) -> &str {
        self.font_family.as_deref().unwrap_or(DEFAULT_FONT_FAMILY)
    }

    pub fn show_slot_frames(&self) -> bool {
        self.show_slot_frames
    }
}

/// Caps bounding the cost of a single render.
///
/// Exceeding any cap fails the whole slide; nothing is silently truncated.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Elements per slide, nested ones included.
    max_elements: usize,
    /// Points per series and entries per data list.
    max_series_length: usize,
    /// Series per chart.
    max_series: usize,
    /// Header plus body cells per table.
    max_table_cells: usize,
    max_hierarchy_depth: usize,
    max_hierarchy_nodes: usize,
    /// Depth of split and three-column layout nesting.
    max_nesting_depth: usize,
}

impl Limits {
    pub fn max_elements(&self) -> usize {
        self.max_elements
    }

    pub fn max_series_length(&self) -> usize {
        self.max_series_length
    }

    pub fn max_series(&self) -> usize {
        self.max_series
    }

    pub fn max_table_cells(&self) -> usize {
        self.max_table_cells
    }

    pub fn max_hierarchy_depth(&self) -> usize {
        self.max_hierarchy_depth
    }

    pub fn max_hierarchy_nodes(&self) -> usize {
        self.max_hierarchy_nodes
    }

    pub fn max_nesting_depth(&self) -> usize {
        self.max_nesting_depth
    }

    /// Sets the hierarchy depth cap (builder style).
    pub fn with_max_hierarchy_depth(mut self, depth: usize) -> Self {
        self.max_hierarchy_depth = depth;
        self
    }

    /// Sets the layout nesting cap (builder style).
    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    /// Sets the element cap (builder style).
    pub fn with_max_elements(mut self, count: usize) -> Self {
        self.max_elements = count;
        self
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_elements: 12,
            max_series_length: 64,
            max_series: 8,
            max_table_cells: 240,
            max_hierarchy_depth: 8,
            max_hierarchy_nodes: 128,
            max_nesting_depth: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_limits_keep_defaults() {
        let limits: Limits = serde_json::from_str(r#"{ "max_series": 3 }"#).unwrap();
        assert_eq!(limits.max_series(), 3);
        assert_eq!(limits.max_elements(), 12);
        assert_eq!(limits.max_hierarchy_depth(), 8);
    }

    #[test]
    fn test_render_config_font_family_fallback() {
        let config = RenderConfig::default();
        assert_eq!(config.font_family(), DEFAULT_FONT_FAMILY);

        let config = RenderConfig::new(ColorSchemeName::Ocean, Some("Inter".to_string()), true);
        assert_eq!(config.font_family(), "Inter");
        assert_eq!(config.default_color_scheme(), ColorSchemeName::Ocean);
        assert!(config.show_slot_frames());
    }

    #[test]
    fn test_app_config_from_json_sections() {
        let config: AppConfig = serde_json::from_str(
            r#"{ "render": { "default_color_scheme": "forest" }, "limits": { "max_elements": 4 } }"#,
        )
        .unwrap();
        assert_eq!(config.render().default_color_scheme(), ColorSchemeName::Forest);
        assert_eq!(config.limits().max_elements(), 4);
    }
}
