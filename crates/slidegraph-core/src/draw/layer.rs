//! Layer-based rendering for SVG output.
//!
//! Drawables and renderers tag every SVG node with a [`RenderLayer`]; the
//! [`LayeredOutput`] collecting them emits one `<g data-layer="…">` group
//! per non-empty layer, bottom to top. This keeps z-ordering correct without
//! renderers having to emit nodes in paint order.
//!
//! # Example
//!
//! ```
//! # use slidegraph_core::draw::{RenderLayer, LayeredOutput};
//! # use svg::node::element::Rectangle;
//!
//! let mut output = LayeredOutput::new();
//!
//! let text = svg::node::element::Text::new("Hello");
//! output.add_to_layer(RenderLayer::Text, Box::new(text));
//!
//! let bg = Rectangle::new().set("fill", "white");
//! output.add_to_layer(RenderLayer::Background, Box::new(bg));
//!
//! // Background is emitted first even though it was added last
//! let svg_nodes = output.render();
//! assert_eq!(svg_nodes.len(), 2);
//! assert!(svg_nodes[0].to_string().contains("background"));
//! ```

use svg::node::element as svg_element;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Defines the rendering layers for SVG output.
///
/// Layers are rendered from bottom to top in the order defined by variant declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Panels, cards and stripes - renders first
    Background,
    /// Axes, gridlines and baselines
    Grid,
    /// Main content shapes: bars, slices, boxes - default layer
    Content,
    /// Arrows and connector lines between shapes
    Connector,
    /// Dots, value markers and badges drawn over content
    Marker,
    /// Text labels - renders last
    Text,
}

impl RenderLayer {
    /// Returns a human-readable name for this layer.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Grid => "grid",
            Self::Content => "content",
            Self::Connector => "connector",
            Self::Marker => "marker",
            Self::Text => "text",
        }
    }
}

/// SVG nodes grouped by rendering layer.
///
/// Nodes keep their insertion order within a layer; layers are emitted in
/// [`RenderLayer`] order.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, SvgNode)>,
}

impl LayeredOutput {
    /// Creates a new empty `LayeredOutput`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single node to the specified layer.
    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.items.push((layer, node));
    }

    /// Merges all layers from another `LayeredOutput` into this one.
    pub fn merge(&mut self, other: LayeredOutput) {
        self.items.extend(other.items);
    }

    /// Returns `true` if there are no nodes in any layer.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of nodes collected so far.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Renders all layers to SVG groups, consuming the output.
    ///
    /// Each non-empty layer becomes an SVG `<g>` element with a `data-layer`
    /// attribute identifying the layer. Empty layers are skipped.
    pub fn render(mut self) -> Vec<SvgNode> {
        // Stable: nodes of one layer keep their insertion order.
        self.items.sort_by_key(|(layer, _)| *layer);

        let mut layers: Vec<(RenderLayer, Vec<SvgNode>)> = Vec::new();
        for (layer, node) in self.items {
            if let Some((last, nodes)) = layers.last_mut() {
                if *last == layer {
                    nodes.push(node);
                    continue;
                }
            }
            layers.push((layer, vec![node]));
        }

        layers
            .into_iter()
            .map(|(layer, nodes)| {
                let group = nodes.into_iter().fold(
                    svg_element::Group::new().set("data-layer", layer.name()),
                    |group, node| group.add(node),
                );
                Box::new(group) as SvgNode
            })
            .collect()
    }
}
