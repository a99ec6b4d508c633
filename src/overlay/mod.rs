mod config;
mod label;
mod renderer;

pub use config::{OverlayConfig, MAX_FONT_SIZE, MAX_OUTLINE_WIDTH, MAX_PAD_WIDTH, MIN_FONT_SIZE};
pub use label::format_label;

use crate::data_types::FrameBatch;
use crate::error::{OverlayError, Result};
use crate::fonts::FontLibrary;
use tracing::{debug, trace, warn};

/// The frame-number overlay transform.
///
/// Stateless: each invocation validates its configuration, loads the font
/// once, and returns a new batch. The input batch is never mutated, and a
/// batch either renders fully or the call fails.
pub struct FrameNumberOverlay;

impl FrameNumberOverlay {
    /// Renders a frame-number label onto every frame of the batch, using
    /// the platform's font directories to resolve named fonts.
    pub fn render(batch: &FrameBatch, config: &OverlayConfig) -> Result<FrameBatch> {
        Self::render_with_library(batch, config, &FontLibrary::new())
    }

    /// Renders against an explicit font library (hosts and tests that
    /// bundle their own fonts).
    pub fn render_with_library(
        batch: &FrameBatch,
        config: &OverlayConfig,
        library: &FontLibrary,
    ) -> Result<FrameBatch> {
        config.validate()?;
        let font = library.load(&config.font, config.font_size)?;
        debug!(
            frames = batch.len(),
            position = %config.position,
            pad_width = config.pad_width,
            outline_width = config.outline_width,
            "rendering frame-number overlay"
        );

        let mut output = batch.clone();
        for (i, frame) in output.frames_mut().iter_mut().enumerate() {
            let frame_number = config.start_index.checked_add(i as u64).ok_or_else(|| {
                OverlayError::InvalidConfig(format!(
                    "start_index {} overflows at frame {} of the batch!",
                    config.start_index, i
                ))
            })?;
            let text = format_label(&config.prefix, frame_number, config.pad_width);
            let visible = renderer::draw_label(frame, &font, &text, config);
            if visible {
                trace!(frame = i, label = %text, "drew label");
            } else {
                warn!(frame = i, label = %text, "label fully outside frame bounds, nothing drawn");
            }
        }
        Ok(output)
    }
}
