//! Host-facing registration surface.
//!
//! The host application owns node registration; this module gives it a
//! static descriptor table (name, category, port specs with defaults) plus
//! the execute entry point that turns host parameter JSON into a validated
//! [`OverlayConfig`] and runs the transform.

use crate::data_types::FrameBatch;
use crate::error::{OverlayError, Result};
use crate::fonts::FontLibrary;
use crate::overlay::{FrameNumberOverlay, OverlayConfig};
use serde_json::json;

/// Value kind a port carries, from the host's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortKind {
    ImageBatch,
    Integer,
    Float,
    Text,
    Color,
    Position,
    Font,
}

/// One input or output port in a node descriptor.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PortSpec {
    pub name: String,
    pub kind: PortKind,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
}

impl PortSpec {
    pub fn new(name: &str, kind: PortKind, description: &str) -> PortSpec {
        PortSpec {
            name: name.to_string(),
            kind,
            description: description.to_string(),
            default: None,
        }
    }

    pub fn with_default(mut self, default: serde_json::Value) -> PortSpec {
        self.default = Some(default);
        self
    }
}

/// Registration metadata the host consumes when loading the node.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NodeDescriptor {
    pub type_name: String,
    pub display_name: String,
    pub category: String,
    pub description: String,
    pub inputs: Vec<PortSpec>,
    pub outputs: Vec<PortSpec>,
}

/// A node the host can register from a static descriptor.
pub trait GraphNode {
    fn descriptor() -> NodeDescriptor;
}

/// The frame-number overlay node.
#[derive(Debug, Default)]
pub struct FrameNumberOverlayNode;

impl GraphNode for FrameNumberOverlayNode {
    fn descriptor() -> NodeDescriptor {
        NodeDescriptor {
            type_name: "OverlayFrameNumber".to_string(),
            display_name: "Overlay Frame Number".to_string(),
            category: "Image/Processing".to_string(),
            description: "Stamps a prefixed, zero-padded frame number onto every frame of an image batch".to_string(),
            inputs: vec![
                PortSpec::new("images", PortKind::ImageBatch, "Batch of frames to label"),
                PortSpec::new("prefix", PortKind::Text, "Text prepended to the frame number")
                    .with_default(json!("Frame ")),
                PortSpec::new("pad_width", PortKind::Integer, "Zero-pad the number to this many digits (0 = none)")
                    .with_default(json!(3)),
                PortSpec::new("start_index", PortKind::Integer, "Number given to the first frame")
                    .with_default(json!(1)),
                PortSpec::new("font", PortKind::Font, "Font face name or .ttf/.otf path")
                    .with_default(json!("DejaVuSans")),
                PortSpec::new("font_size", PortKind::Float, "Glyph height in pixels")
                    .with_default(json!(32.0)),
                PortSpec::new("position", PortKind::Position, "Corner anchor or custom {x, y} point")
                    .with_default(json!("top-left")),
                PortSpec::new("margin_x", PortKind::Integer, "Horizontal inset for corner anchors")
                    .with_default(json!(20)),
                PortSpec::new("margin_y", PortKind::Integer, "Vertical inset for corner anchors")
                    .with_default(json!(20)),
                PortSpec::new("text_color", PortKind::Color, "Fill color (named or hex)")
                    .with_default(json!("white")),
                PortSpec::new("outline_color", PortKind::Color, "Stroke color (named or hex)")
                    .with_default(json!("black")),
                PortSpec::new("outline_width", PortKind::Integer, "Stroke radius in pixels (0 = fill only)")
                    .with_default(json!(0)),
            ],
            outputs: vec![PortSpec::new(
                "images",
                PortKind::ImageBatch,
                "Labeled copy of the input batch",
            )],
        }
    }
}

impl FrameNumberOverlayNode {
    /// Runs the node: deserializes the host's parameter JSON into an
    /// [`OverlayConfig`] and renders. Unparsable parameters are an
    /// `InvalidConfig` error, raised before any frame is touched.
    pub fn execute(&self, batch: &FrameBatch, parameters: &serde_json::Value) -> Result<FrameBatch> {
        let config = Self::parse_parameters(parameters)?;
        FrameNumberOverlay::render(batch, &config)
    }

    /// Same as [`execute`](Self::execute), against an explicit font library.
    pub fn execute_with_library(
        &self,
        batch: &FrameBatch,
        parameters: &serde_json::Value,
        library: &FontLibrary,
    ) -> Result<FrameBatch> {
        let config = Self::parse_parameters(parameters)?;
        FrameNumberOverlay::render_with_library(batch, &config, library)
    }

    fn parse_parameters(parameters: &serde_json::Value) -> Result<OverlayConfig> {
        serde_json::from_value(parameters.clone()).map_err(|e| {
            OverlayError::InvalidConfig(format!("Could not parse node parameters: {}", e))
        })
    }
}

/// The static registration table handed to the host's extension loader.
pub fn registered_nodes() -> Vec<NodeDescriptor> {
    vec![FrameNumberOverlayNode::descriptor()]
}
