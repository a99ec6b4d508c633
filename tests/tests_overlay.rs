//! Tests for the frame-number overlay transform.
//!
//! Rendering output is checked structurally (shapes, which pixels changed,
//! clipping behavior) rather than against golden images, since glyph
//! coverage differs between font files.

use frame_number_overlay::data_types::descriptors::{
    ColorChannelLayout, ImageXYPoint, ImageXYResolution, LabelPosition, Rgba,
};
use frame_number_overlay::data_types::{FrameBatch, ImageFrame};
use frame_number_overlay::fonts::{FontLibrary, FontSelection};
use frame_number_overlay::{FrameNumberOverlay, OverlayConfig, OverlayError};
use ndarray::Array4;
use std::path::PathBuf;

//region Helper Functions

fn test_font_library() -> FontLibrary {
    FontLibrary::with_directories(vec![PathBuf::from("tests/fonts")])
}

fn test_config() -> OverlayConfig {
    OverlayConfig {
        font: FontSelection::Named("DejaVuSans".to_string()),
        ..OverlayConfig::default()
    }
}

fn create_test_frame(width: u32, height: u32, layout: ColorChannelLayout) -> ImageFrame {
    let resolution = ImageXYResolution::new(width, height).unwrap();
    let mut frame = ImageFrame::new(&layout, &resolution);

    // Fill with a gradient so blended label pixels are detectable
    let channels = frame.get_color_channel_count();
    {
        let mut pixels = frame.get_pixels_view_mut();
        for y in 0..height as usize {
            for x in 0..width as usize {
                for c in 0..channels {
                    pixels[(y, x, c)] = ((x + y * 2 + c * 7) % 100 + 60) as u8;
                }
            }
        }
    }
    frame
}

fn create_test_batch(frames: usize, width: u32, height: u32) -> FrameBatch {
    let frames = (0..frames)
        .map(|_| create_test_frame(width, height, ColorChannelLayout::RGB))
        .collect();
    FrameBatch::new(frames).unwrap()
}

fn changed_pixel_count(before: &ImageFrame, after: &ImageFrame) -> usize {
    let a = before.get_pixels_view();
    let b = after.get_pixels_view();
    let resolution = before.get_xy_resolution();
    let channels = before.get_color_channel_count();
    let mut changed = 0;
    for y in 0..resolution.height as usize {
        for x in 0..resolution.width as usize {
            if (0..channels).any(|c| a[(y, x, c)] != b[(y, x, c)]) {
                changed += 1;
            }
        }
    }
    changed
}

//endregion

//region Shape and Immutability

#[test]
fn test_render_preserves_batch_shape() {
    let batch = create_test_batch(4, 64, 48);
    let config = test_config();

    let output = FrameNumberOverlay::render_with_library(&batch, &config, &test_font_library())
        .expect("render should succeed");

    assert_eq!(output.len(), batch.len());
    assert_eq!(output.get_properties(), batch.get_properties());
    for i in 0..output.len() {
        let frame = output.get_frame(i).unwrap();
        assert_eq!(frame.get_xy_resolution(), ImageXYResolution::new(64, 48).unwrap());
        assert_eq!(frame.get_color_channel_count(), 3);
    }
}

#[test]
fn test_render_does_not_mutate_input() {
    let batch = create_test_batch(2, 64, 48);
    let pristine = batch.clone();
    let config = test_config();

    let output =
        FrameNumberOverlay::render_with_library(&batch, &config, &test_font_library()).unwrap();

    assert_eq!(batch, pristine);
    // And the output actually differs from the input
    assert!(changed_pixel_count(batch.get_frame(0).unwrap(), output.get_frame(0).unwrap()) > 0);
}

#[test]
fn test_pixels_outside_label_region_unchanged() {
    let batch = create_test_batch(1, 128, 128);
    let config = OverlayConfig {
        font_size: 12.0,
        margin_x: 2,
        margin_y: 2,
        position: LabelPosition::TopLeft,
        ..test_config()
    };

    let output =
        FrameNumberOverlay::render_with_library(&batch, &config, &test_font_library()).unwrap();

    let before = batch.get_frame(0).unwrap().get_pixels_view();
    let after = output.get_frame(0).unwrap().get_pixels_view();
    // A 12px label anchored near the top-left cannot reach the lower half
    for y in 64..128 {
        for x in 0..128 {
            for c in 0..3 {
                assert_eq!(before[(y, x, c)], after[(y, x, c)]);
            }
        }
    }
}

//endregion

//region Clipping

#[test]
fn test_label_fully_off_frame_is_noop_not_error() {
    let batch = create_test_batch(1, 32, 32);
    let config = OverlayConfig {
        position: LabelPosition::Custom(ImageXYPoint::new(10_000, 10_000)),
        ..test_config()
    };

    let output =
        FrameNumberOverlay::render_with_library(&batch, &config, &test_font_library()).unwrap();
    assert_eq!(
        changed_pixel_count(batch.get_frame(0).unwrap(), output.get_frame(0).unwrap()),
        0
    );
}

#[test]
fn test_label_partially_off_frame_is_cropped() {
    let batch = create_test_batch(1, 64, 64);
    let config = OverlayConfig {
        position: LabelPosition::Custom(ImageXYPoint::new(-20, -10)),
        ..test_config()
    };

    let output =
        FrameNumberOverlay::render_with_library(&batch, &config, &test_font_library()).unwrap();
    // Some of the label survives the crop
    assert!(changed_pixel_count(batch.get_frame(0).unwrap(), output.get_frame(0).unwrap()) > 0);
}

#[test]
fn test_label_wider_than_frame_is_cropped() {
    let batch = create_test_batch(1, 16, 16);
    let config = OverlayConfig {
        margin_x: 0,
        margin_y: 0,
        font_size: 20.0,
        ..test_config()
    };

    let output =
        FrameNumberOverlay::render_with_library(&batch, &config, &test_font_library()).unwrap();
    // The visible part of the label still gets drawn
    assert!(changed_pixel_count(batch.get_frame(0).unwrap(), output.get_frame(0).unwrap()) > 0);
}

//endregion

//region Outline

#[test]
fn test_outline_widens_drawn_region() {
    let batch = create_test_batch(1, 128, 64);

    let plain = OverlayConfig {
        outline_width: 0,
        text_color: Rgba::WHITE,
        ..test_config()
    };
    let outlined = OverlayConfig {
        outline_width: 2,
        text_color: Rgba::WHITE,
        outline_color: Rgba::BLACK,
        ..test_config()
    };

    let library = test_font_library();
    let plain_out = FrameNumberOverlay::render_with_library(&batch, &plain, &library).unwrap();
    let outlined_out =
        FrameNumberOverlay::render_with_library(&batch, &outlined, &library).unwrap();

    let input = batch.get_frame(0).unwrap();
    let plain_changed = changed_pixel_count(input, plain_out.get_frame(0).unwrap());
    let outlined_changed = changed_pixel_count(input, outlined_out.get_frame(0).unwrap());
    assert!(plain_changed > 0);
    assert!(outlined_changed > plain_changed);
}

//endregion

//region Invalid Configuration

#[test]
fn test_invalid_pad_width_fails_fast() {
    let batch = create_test_batch(1, 32, 32);
    let config = OverlayConfig {
        pad_width: 99,
        ..test_config()
    };
    let result = FrameNumberOverlay::render_with_library(&batch, &config, &test_font_library());
    assert!(matches!(result, Err(OverlayError::InvalidConfig(_))));
}

#[test]
fn test_invalid_font_size_fails_fast() {
    let batch = create_test_batch(1, 32, 32);
    let config = OverlayConfig {
        font_size: 2.0,
        ..test_config()
    };
    let result = FrameNumberOverlay::render_with_library(&batch, &config, &test_font_library());
    assert!(matches!(result, Err(OverlayError::InvalidConfig(_))));
}

#[test]
fn test_overflowing_start_index_fails_fast() {
    let batch = create_test_batch(2, 32, 32);
    let config = OverlayConfig {
        start_index: u64::MAX,
        ..test_config()
    };
    let result = FrameNumberOverlay::render_with_library(&batch, &config, &test_font_library());
    assert!(matches!(result, Err(OverlayError::InvalidConfig(_))));
}

#[test]
fn test_missing_font_fails_fast() {
    let batch = create_test_batch(1, 32, 32);
    let config = OverlayConfig {
        font: FontSelection::Named("NoSuchFace".to_string()),
        ..test_config()
    };
    let result = FrameNumberOverlay::render_with_library(&batch, &config, &test_font_library());
    assert!(matches!(result, Err(OverlayError::FontLoad(_))));
}

//endregion

//region Channel Layouts and Tensors

#[test]
fn test_grayscale_frames_render() {
    let frames = vec![create_test_frame(64, 48, ColorChannelLayout::GrayScale)];
    let batch = FrameBatch::new(frames).unwrap();
    let config = test_config();

    let output =
        FrameNumberOverlay::render_with_library(&batch, &config, &test_font_library()).unwrap();
    assert_eq!(output.get_frame(0).unwrap().get_color_channel_count(), 1);
    assert!(changed_pixel_count(batch.get_frame(0).unwrap(), output.get_frame(0).unwrap()) > 0);
}

#[test]
fn test_rgba_frames_render() {
    let frames = vec![create_test_frame(64, 48, ColorChannelLayout::RGBA)];
    let batch = FrameBatch::new(frames).unwrap();
    let config = test_config();

    let output =
        FrameNumberOverlay::render_with_library(&batch, &config, &test_font_library()).unwrap();
    assert_eq!(output.get_frame(0).unwrap().get_color_channel_count(), 4);
}

#[test]
fn test_float_tensor_round_trip_through_render() {
    let mut tensor = Array4::<f32>::zeros((3, 32, 48, 3));
    tensor.fill(0.25);
    let batch = FrameBatch::from_f32_tensor(&tensor).unwrap();

    let output =
        FrameNumberOverlay::render_with_library(&batch, &test_config(), &test_font_library())
            .unwrap();
    let out_tensor = output.to_f32_tensor();

    assert_eq!(out_tensor.shape(), &[3, 32, 48, 3]);
    assert!(out_tensor.iter().all(|v| (0.0..=1.0).contains(v)));
}

//endregion

//region Image Import and Export

#[test]
fn test_png_decode_render_export_round_trip() {
    let source = create_test_frame(48, 32, ColorChannelLayout::RGB);
    let png = source.export_as_png_bytes().unwrap();
    let decoded = ImageFrame::from_png_bytes(&png).unwrap();
    // PNG is lossless, so the decoded frame matches the source exactly
    assert_eq!(decoded, source);

    let batch = FrameBatch::new(vec![decoded]).unwrap();
    let output =
        FrameNumberOverlay::render_with_library(&batch, &test_config(), &test_font_library())
            .unwrap();

    let labeled_png = output.get_frame(0).unwrap().export_as_png_bytes().unwrap();
    let labeled = ImageFrame::from_png_bytes(&labeled_png).unwrap();
    assert_eq!(labeled.get_xy_resolution(), ImageXYResolution::new(48, 32).unwrap());
    assert_eq!(labeled.get_color_channel_count(), 3);
    assert!(changed_pixel_count(&source, &labeled) > 0);
}

#[test]
fn test_jpeg_frames_decode_and_render() {
    let source = create_test_frame(48, 32, ColorChannelLayout::RGB);
    let mut jpeg = Vec::new();
    source
        .export_as_dynamic_image()
        .unwrap()
        .write_to(&mut std::io::Cursor::new(&mut jpeg), image::ImageFormat::Jpeg)
        .unwrap();

    let decoded = ImageFrame::from_jpeg_bytes(&jpeg).unwrap();
    assert_eq!(decoded.get_xy_resolution(), ImageXYResolution::new(48, 32).unwrap());
    assert_eq!(decoded.get_color_channel_count(), 3);

    let batch = FrameBatch::new(vec![decoded]).unwrap();
    assert!(
        FrameNumberOverlay::render_with_library(&batch, &test_config(), &test_font_library())
            .is_ok()
    );
}

//endregion

//region Font Library

#[test]
fn test_available_fonts_lists_bundled_face() {
    let names = test_font_library().available_fonts();
    assert!(names.iter().any(|n| n == "DejaVuSans"));
}

#[test]
fn test_font_loads_by_explicit_path() {
    let batch = create_test_batch(1, 32, 32);
    let config = OverlayConfig {
        font: FontSelection::Path(PathBuf::from("tests/fonts/DejaVuSans.ttf")),
        ..test_config()
    };
    assert!(
        FrameNumberOverlay::render_with_library(&batch, &config, &test_font_library()).is_ok()
    );
}

//endregion
