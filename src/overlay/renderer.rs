//! Glyph layout and compositing.
//!
//! The label is rasterized once per frame into a local coverage mask, the
//! outline (if any) is a disk dilation of that mask drawn first, then the
//! fill blends on top. All frame writes clip to the frame bounds, so labels
//! hanging off an edge crop instead of erroring.

use crate::data_types::descriptors::{ColorChannelLayout, LabelPosition, Rgba};
use crate::data_types::ImageFrame;
use crate::fonts::LoadedFont;
use crate::overlay::OverlayConfig;
use ab_glyph::{point, Glyph, ScaleFont};
use ndarray::Array2;

/// Coverage mask of a laid-out label, positioned relative to the text box.
struct LabelMask {
    /// Per-pixel coverage in 0.0..=1.0, (height, width) indexed.
    coverage: Array2<f32>,
    /// Mask edge padding; the text box top-left sits at (padding, padding).
    padding: u32,
    /// Advance width of the laid-out text in pixels.
    text_width: u32,
    /// Ascent-to-descent height of the face in pixels.
    text_height: u32,
}

/// Draws one label onto the frame. Returns false when clipping removed the
/// label entirely (the caller logs this; it is not an error).
pub(crate) fn draw_label(
    frame: &mut ImageFrame,
    font: &LoadedFont,
    text: &str,
    config: &OverlayConfig,
) -> bool {
    let mask = rasterize_label(font, text, config.outline_width);
    let (anchor_x, anchor_y) = anchor_text_box(frame, &mask, config);

    // Mask origin on the frame; the mask extends `padding` past the text box.
    let origin_x = anchor_x - mask.padding as i32;
    let origin_y = anchor_y - mask.padding as i32;

    let mut wrote_any = false;
    if config.outline_width > 0 {
        let stroke = dilate(&mask.coverage, config.outline_width);
        wrote_any |= blend_mask(frame, &stroke, origin_x, origin_y, &config.outline_color);
    }
    wrote_any |= blend_mask(frame, &mask.coverage, origin_x, origin_y, &config.text_color);
    wrote_any
}

fn rasterize_label(font: &LoadedFont, text: &str, outline_width: u32) -> LabelMask {
    let scaled = font.scaled();
    let padding = outline_width + 1;

    // Lay out glyphs along a baseline at the face's ascent.
    let mut caret = point(0.0, scaled.ascent());
    let mut previous: Option<Glyph> = None;
    let mut glyphs: Vec<Glyph> = Vec::new();
    for ch in text.chars() {
        if ch.is_control() {
            continue;
        }
        let mut glyph = scaled.scaled_glyph(ch);
        if let Some(prev) = previous.take() {
            caret.x += scaled.kern(prev.id, glyph.id);
        }
        glyph.position = caret;
        caret.x += scaled.h_advance(glyph.id);
        previous = Some(glyph.clone());
        glyphs.push(glyph);
    }

    let text_width = caret.x.ceil().max(0.0) as u32;
    let text_height = (scaled.ascent() - scaled.descent()).ceil().max(0.0) as u32;

    let mask_height = (text_height + 2 * padding) as usize;
    let mask_width = (text_width + 2 * padding) as usize;
    let mut coverage = Array2::<f32>::zeros((mask_height, mask_width));

    for glyph in glyphs {
        let Some(outlined) = scaled.outline_glyph(glyph) else {
            continue; // whitespace has no outline
        };
        let bounds = outlined.px_bounds();
        outlined.draw(|x, y, c| {
            let mx = bounds.min.x as i32 + x as i32 + padding as i32;
            let my = bounds.min.y as i32 + y as i32 + padding as i32;
            if mx >= 0 && my >= 0 && (my as usize) < mask_height && (mx as usize) < mask_width {
                let cell = &mut coverage[(my as usize, mx as usize)];
                *cell = cell.max(c.clamp(0.0, 1.0));
            }
        });
    }

    LabelMask {
        coverage,
        padding,
        text_width,
        text_height,
    }
}

/// Top-left corner of the text box on the frame for the configured anchor.
fn anchor_text_box(frame: &ImageFrame, mask: &LabelMask, config: &OverlayConfig) -> (i32, i32) {
    let resolution = frame.get_xy_resolution();
    let frame_w = resolution.width as i32;
    let frame_h = resolution.height as i32;
    let text_w = mask.text_width as i32;
    let text_h = mask.text_height as i32;
    let margin_x = config.margin_x as i32;
    let margin_y = config.margin_y as i32;

    match &config.position {
        LabelPosition::TopLeft => (margin_x, margin_y),
        LabelPosition::TopRight => (frame_w - text_w - margin_x, margin_y),
        LabelPosition::BottomLeft => (margin_x, frame_h - text_h - margin_y),
        LabelPosition::BottomRight => (frame_w - text_w - margin_x, frame_h - text_h - margin_y),
        LabelPosition::Custom(point) => (point.x, point.y),
    }
}

/// Disk dilation of the coverage mask, radius in pixels.
fn dilate(coverage: &Array2<f32>, radius: u32) -> Array2<f32> {
    let r = radius as i32;
    let mut offsets: Vec<(i32, i32)> = Vec::new();
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy <= r * r {
                offsets.push((dy, dx));
            }
        }
    }

    let (height, width) = coverage.dim();
    let mut dilated = Array2::<f32>::zeros((height, width));
    for ((y, x), out) in dilated.indexed_iter_mut() {
        let mut best = 0.0f32;
        for (dy, dx) in &offsets {
            let sy = y as i32 + dy;
            let sx = x as i32 + dx;
            if sy >= 0 && sx >= 0 && (sy as usize) < height && (sx as usize) < width {
                best = best.max(coverage[(sy as usize, sx as usize)]);
            }
        }
        *out = best;
    }
    dilated
}

/// Alpha-blends a coverage mask into the frame at the given origin,
/// clipping to the frame bounds. Returns true if any pixel changed.
fn blend_mask(
    frame: &mut ImageFrame,
    coverage: &Array2<f32>,
    origin_x: i32,
    origin_y: i32,
    color: &Rgba,
) -> bool {
    let resolution = frame.get_xy_resolution();
    let frame_w = resolution.width as i32;
    let frame_h = resolution.height as i32;
    let layout = *frame.get_channel_layout();
    let luma = color.luma();
    let color_alpha = color.a as f32 / 255.0;

    let mut pixels = frame.get_pixels_view_mut();
    let mut wrote_any = false;
    for ((my, mx), c) in coverage.indexed_iter() {
        if *c <= 0.0 {
            continue;
        }
        let fx = origin_x + mx as i32;
        let fy = origin_y + my as i32;
        if fx < 0 || fy < 0 || fx >= frame_w || fy >= frame_h {
            continue;
        }
        let alpha = c.min(1.0) * color_alpha;
        if alpha <= 0.0 {
            continue;
        }
        let (y, x) = (fy as usize, fx as usize);
        match layout {
            ColorChannelLayout::GrayScale => {
                blend_channel(&mut pixels[(y, x, 0)], luma, alpha);
            }
            ColorChannelLayout::RGB => {
                blend_channel(&mut pixels[(y, x, 0)], color.r, alpha);
                blend_channel(&mut pixels[(y, x, 1)], color.g, alpha);
                blend_channel(&mut pixels[(y, x, 2)], color.b, alpha);
            }
            ColorChannelLayout::RGBA => {
                blend_channel(&mut pixels[(y, x, 0)], color.r, alpha);
                blend_channel(&mut pixels[(y, x, 1)], color.g, alpha);
                blend_channel(&mut pixels[(y, x, 2)], color.b, alpha);
                // labels stay visible on transparent frames
                blend_channel(&mut pixels[(y, x, 3)], 255, alpha);
            }
        }
        wrote_any = true;
    }
    wrote_any
}

#[inline]
fn blend_channel(dst: &mut u8, src: u8, alpha: f32) {
    *dst = (*dst as f32 * (1.0 - alpha) + src as f32 * alpha).round() as u8;
}
