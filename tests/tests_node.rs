//! Tests for the host registration surface.

use frame_number_overlay::data_types::descriptors::{ColorChannelLayout, ImageXYResolution};
use frame_number_overlay::data_types::{FrameBatch, ImageFrame};
use frame_number_overlay::fonts::FontLibrary;
use frame_number_overlay::node::{registered_nodes, FrameNumberOverlayNode, GraphNode, PortKind};
use frame_number_overlay::{OverlayConfig, OverlayError};
use serde_json::json;
use std::path::PathBuf;

fn test_font_library() -> FontLibrary {
    FontLibrary::with_directories(vec![PathBuf::from("tests/fonts")])
}

fn small_batch() -> FrameBatch {
    let resolution = ImageXYResolution::new(32, 32).unwrap();
    let frames = vec![
        ImageFrame::new(&ColorChannelLayout::RGB, &resolution),
        ImageFrame::new(&ColorChannelLayout::RGB, &resolution),
    ];
    FrameBatch::new(frames).unwrap()
}

#[test]
fn test_registration_table_contains_the_node() {
    let nodes = registered_nodes();
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].type_name, "OverlayFrameNumber");
}

#[test]
fn test_descriptor_metadata() {
    let descriptor = FrameNumberOverlayNode::descriptor();
    assert_eq!(descriptor.display_name, "Overlay Frame Number");
    assert_eq!(descriptor.category, "Image/Processing");

    let image_input = descriptor
        .inputs
        .iter()
        .find(|p| p.name == "images")
        .expect("node should take an image batch input");
    assert_eq!(image_input.kind, PortKind::ImageBatch);

    assert_eq!(descriptor.outputs.len(), 1);
    assert_eq!(descriptor.outputs[0].kind, PortKind::ImageBatch);
}

#[test]
fn test_descriptor_defaults_match_config_defaults() {
    let descriptor = FrameNumberOverlayNode::descriptor();
    let mut params = serde_json::Map::new();
    for port in &descriptor.inputs {
        if let Some(default) = &port.default {
            params.insert(port.name.clone(), default.clone());
        }
    }
    let parsed: OverlayConfig = serde_json::from_value(serde_json::Value::Object(params))
        .expect("descriptor defaults should deserialize");
    assert_eq!(parsed, OverlayConfig::default());
}

#[test]
fn test_descriptor_serializes_for_the_host() {
    let descriptor = FrameNumberOverlayNode::descriptor();
    let json = serde_json::to_string(&descriptor).unwrap();
    let back: frame_number_overlay::node::NodeDescriptor = serde_json::from_str(&json).unwrap();
    assert_eq!(back, descriptor);
}

#[test]
fn test_execute_with_valid_parameters() {
    let node = FrameNumberOverlayNode;
    let params = json!({
        "prefix": "",
        "pad_width": 4,
        "position": "bottom-left",
        "text_color": "#ff0000",
    });

    let output = node
        .execute_with_library(&small_batch(), &params, &test_font_library())
        .expect("execute should succeed");
    assert_eq!(output.len(), 2);
}

#[test]
fn test_execute_rejects_unknown_position() {
    let node = FrameNumberOverlayNode;
    let params = json!({ "position": "center-ish" });

    let result = node.execute_with_library(&small_batch(), &params, &test_font_library());
    assert!(matches!(result, Err(OverlayError::InvalidConfig(_))));
}

#[test]
fn test_execute_rejects_bad_color() {
    let node = FrameNumberOverlayNode;
    let params = json!({ "text_color": "not-a-color" });

    let result = node.execute_with_library(&small_batch(), &params, &test_font_library());
    assert!(matches!(result, Err(OverlayError::InvalidConfig(_))));
}

#[test]
fn test_execute_rejects_malformed_parameters() {
    let node = FrameNumberOverlayNode;
    let params = json!({ "pad_width": "three" });

    let result = node.execute_with_library(&small_batch(), &params, &test_font_library());
    assert!(matches!(result, Err(OverlayError::InvalidConfig(_))));
}
