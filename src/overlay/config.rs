use crate::data_types::descriptors::{LabelPosition, Rgba};
use crate::error::{OverlayError, Result};
use crate::fonts::FontSelection;

/// Smallest font size the node accepts, in pixels.
pub const MIN_FONT_SIZE: f32 = 8.0;
/// Largest font size the node accepts, in pixels.
pub const MAX_FONT_SIZE: f32 = 200.0;
/// Upper bound on zero-pad width; wider labels are never useful.
pub const MAX_PAD_WIDTH: u32 = 16;
/// Upper bound on the outline stroke radius, in pixels.
pub const MAX_OUTLINE_WIDTH: u32 = 32;

/// Per-invocation parameters for the frame-number overlay.
///
/// Supplied by the host as JSON; every field has a default so hosts may send
/// only what the user changed. Validation happens once per invocation via
/// [`OverlayConfig::validate`] and fails fast with a descriptive error.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Text prepended verbatim to the padded frame number.
    pub prefix: String,
    /// Minimum digit count of the frame number; shorter numbers are
    /// zero-padded, longer ones print in full. 0 disables padding.
    pub pad_width: u32,
    /// Number given to the first frame of the batch.
    pub start_index: u64,
    /// Font face to rasterize with.
    pub font: FontSelection,
    /// Rendered glyph height in pixels.
    pub font_size: f32,
    /// Anchor of the label's text box.
    pub position: LabelPosition,
    /// Horizontal inset used by the corner positions.
    pub margin_x: u32,
    /// Vertical inset used by the corner positions.
    pub margin_y: u32,
    /// Fill color of the glyphs.
    pub text_color: Rgba,
    /// Stroke color drawn under the fill when `outline_width > 0`.
    pub outline_color: Rgba,
    /// Stroke radius in pixels; 0 draws fill only.
    pub outline_width: u32,
}

impl Default for OverlayConfig {
    fn default() -> OverlayConfig {
        OverlayConfig {
            prefix: "Frame ".to_string(),
            pad_width: 3,
            start_index: 1,
            font: FontSelection::Named("DejaVuSans".to_string()),
            font_size: 32.0,
            position: LabelPosition::TopLeft,
            margin_x: 20,
            margin_y: 20,
            text_color: Rgba::WHITE,
            outline_color: Rgba::BLACK,
            outline_width: 0,
        }
    }
}

impl OverlayConfig {
    /// Checks value ranges. Font resolution is checked separately at load
    /// time since it touches the filesystem.
    pub fn validate(&self) -> Result<()> {
        if !self.font_size.is_finite()
            || self.font_size < MIN_FONT_SIZE
            || self.font_size > MAX_FONT_SIZE
        {
            return Err(OverlayError::InvalidConfig(format!(
                "font_size must be between {} and {}, got {}!",
                MIN_FONT_SIZE, MAX_FONT_SIZE, self.font_size
            )));
        }
        if self.pad_width > MAX_PAD_WIDTH {
            return Err(OverlayError::InvalidConfig(format!(
                "pad_width must be at most {}, got {}!",
                MAX_PAD_WIDTH, self.pad_width
            )));
        }
        if self.outline_width > MAX_OUTLINE_WIDTH {
            return Err(OverlayError::InvalidConfig(format!(
                "outline_width must be at most {}, got {}!",
                MAX_OUTLINE_WIDTH, self.outline_width
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(OverlayConfig::default().validate().is_ok());
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        let config = OverlayConfig {
            font_size: 4.0,
            ..OverlayConfig::default()
        };
        assert!(config.validate().is_err());

        let config = OverlayConfig {
            font_size: f32::NAN,
            ..OverlayConfig::default()
        };
        assert!(config.validate().is_err());

        let config = OverlayConfig {
            pad_width: 40,
            ..OverlayConfig::default()
        };
        assert!(config.validate().is_err());

        let config = OverlayConfig {
            outline_width: 99,
            ..OverlayConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: OverlayConfig =
            serde_json::from_str("{\"pad_width\": 5, \"position\": \"bottom-right\"}").unwrap();
        assert_eq!(config.pad_width, 5);
        assert_eq!(config.position, LabelPosition::BottomRight);
        assert_eq!(config.prefix, "Frame ");
        assert_eq!(config.start_index, 1);
    }
}
