//! Descriptors and parameter value types for frame data.
//!
//! Small copyable structures describing image properties, colors, and label
//! placement. All of them serialize with serde so the host can pass them as
//! node parameters.

use super::ImageFrame;
use crate::error::OverlayError;
use std::fmt::Display;
use std::str::FromStr;

//region Image XY

/// Represents a coordinate relative to an image. +x goes to the right,
/// +y goes downward. (0,0) is in the top left. Coordinates may be negative
/// or exceed the image bounds; drawing clips to the frame.
#[derive(Debug, PartialEq, Clone, Copy, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ImageXYPoint {
    pub x: i32,
    pub y: i32,
}

impl ImageXYPoint {
    pub fn new(x: i32, y: i32) -> ImageXYPoint {
        ImageXYPoint { x, y }
    }
}

impl Display for ImageXYPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Describes the resolution of an image (width and height), both non-zero.
#[derive(Debug, PartialEq, Clone, Copy, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ImageXYResolution {
    pub width: u32,
    pub height: u32,
}

impl ImageXYResolution {
    /// Creates a new resolution, rejecting zero width or height.
    pub fn new(width: u32, height: u32) -> Result<ImageXYResolution, OverlayError> {
        if width == 0 || height == 0 {
            return Err(OverlayError::InvalidConfig(format!(
                "Image resolution must be non-zero in both axes, got {}x{}!",
                width, height
            )));
        }
        Ok(ImageXYResolution { width, height })
    }
}

impl Display for ImageXYResolution {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

//endregion

//region Enums

/// Represents the color channel format of an image.
///
/// - GrayScale: Single channel
/// - RGB: Three channels (red, green, blue)
/// - RGBA: Four channels (red, green, blue, alpha)
#[derive(Debug, PartialEq, Clone, Copy, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ColorChannelLayout {
    GrayScale = 1,
    RGB = 3,
    RGBA = 4,
}

impl Display for ColorChannelLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ColorChannelLayout::GrayScale => write!(f, "ChannelLayout(GrayScale)"),
            ColorChannelLayout::RGB => write!(f, "ChannelLayout(RedGreenBlue)"),
            ColorChannelLayout::RGBA => write!(f, "ChannelLayout(RedGreenBlueAlpha)"),
        }
    }
}

impl TryFrom<usize> for ColorChannelLayout {
    type Error = OverlayError;
    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ColorChannelLayout::GrayScale),
            3 => Ok(ColorChannelLayout::RGB),
            4 => Ok(ColorChannelLayout::RGBA),
            _ => Err(OverlayError::DimensionMismatch(format!(
                "No channel layout has {} channels! Acceptable values are 1, 3, 4!",
                value
            ))),
        }
    }
}

impl TryFrom<image::ColorType> for ColorChannelLayout {
    type Error = OverlayError;
    fn try_from(value: image::ColorType) -> Result<Self, Self::Error> {
        match value {
            image::ColorType::L8 => Ok(ColorChannelLayout::GrayScale),
            image::ColorType::Rgb8 => Ok(ColorChannelLayout::RGB),
            image::ColorType::Rgba8 => Ok(ColorChannelLayout::RGBA),
            _ => Err(OverlayError::DimensionMismatch(format!(
                "Unsupported image color type {:?}!",
                value
            ))),
        }
    }
}

impl From<ColorChannelLayout> for usize {
    fn from(value: ColorChannelLayout) -> usize {
        value as usize
    }
}

impl From<ColorChannelLayout> for u32 {
    fn from(value: ColorChannelLayout) -> u32 {
        value as u32
    }
}

//endregion

//region Image Frame Properties

/// Resolution and channel layout shared by every frame in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ImageFrameProperties {
    image_resolution: ImageXYResolution,
    color_channel_layout: ColorChannelLayout,
}

impl ImageFrameProperties {
    pub fn new(
        image_resolution: ImageXYResolution,
        color_channel_layout: ColorChannelLayout,
    ) -> ImageFrameProperties {
        ImageFrameProperties {
            image_resolution,
            color_channel_layout,
        }
    }

    /// Verifies that an image frame matches these properties.
    ///
    /// # Returns
    ///
    /// * `Ok(())` if the image frame matches these properties
    /// * `Err(OverlayError::DimensionMismatch)` if resolution or channel
    ///   layout differ
    pub fn verify_image_frame_matches_properties(
        &self,
        image_frame: &ImageFrame,
    ) -> Result<(), OverlayError> {
        if image_frame.get_xy_resolution() != self.image_resolution {
            return Err(OverlayError::DimensionMismatch(format!(
                "Expected resolution of {} but received a frame with resolution of {}!",
                self.image_resolution,
                image_frame.get_xy_resolution()
            )));
        }
        if image_frame.get_channel_layout() != &self.color_channel_layout {
            return Err(OverlayError::DimensionMismatch(format!(
                "Expected {} but received a frame with {}!",
                self.color_channel_layout,
                image_frame.get_channel_layout()
            )));
        }
        Ok(())
    }

    /// Returns the XY resolution.
    pub fn get_image_resolution(&self) -> ImageXYResolution {
        self.image_resolution
    }

    /// Returns the color channel layout.
    pub fn get_color_channel_layout(&self) -> ColorChannelLayout {
        self.color_channel_layout
    }
}

impl Display for ImageFrameProperties {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} {}", self.image_resolution, self.color_channel_layout)
    }
}

//endregion

//region Colors

/// An 8-bit RGBA color.
///
/// Parses from the named colors the host offers in its dropdown (white,
/// black, red, green, blue, yellow, cyan, magenta) or from `#rrggbb` /
/// `#rrggbbaa` hex strings.
#[derive(Debug, PartialEq, Clone, Copy, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Rgba {
        Rgba { r, g, b, a }
    }

    /// Rec. 601 luma of the color, used when drawing onto grayscale frames.
    pub fn luma(&self) -> u8 {
        let y = 0.299 * self.r as f32 + 0.587 * self.g as f32 + 0.114 * self.b as f32;
        y.round().clamp(0.0, 255.0) as u8
    }

    fn from_named(name: &str) -> Option<Rgba> {
        let (r, g, b) = match name {
            "white" => (255, 255, 255),
            "black" => (0, 0, 0),
            "red" => (255, 0, 0),
            "green" => (0, 255, 0),
            "blue" => (0, 0, 255),
            "yellow" => (255, 255, 0),
            "cyan" => (0, 255, 255),
            "magenta" => (255, 0, 255),
            _ => return None,
        };
        Some(Rgba::new(r, g, b, 255))
    }

    fn from_hex(hex: &str) -> Option<Rgba> {
        let digits = hex.strip_prefix('#')?;
        if !digits.is_ascii() || !matches!(digits.len(), 6 | 8) {
            return None;
        }
        let parse = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
        let r = parse(0..2)?;
        let g = parse(2..4)?;
        let b = parse(4..6)?;
        let a = if digits.len() == 8 { parse(6..8)? } else { 255 };
        Some(Rgba::new(r, g, b, a))
    }
}

impl FromStr for Rgba {
    type Err = OverlayError;
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Rgba::from_named(&trimmed.to_ascii_lowercase())
            .or_else(|| Rgba::from_hex(trimmed))
            .ok_or_else(|| {
                OverlayError::InvalidConfig(format!(
                    "Unknown color '{}'! Use a named color or #rrggbb / #rrggbbaa hex.",
                    value
                ))
            })
    }
}

impl TryFrom<String> for Rgba {
    type Error = OverlayError;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgba> for String {
    fn from(value: Rgba) -> String {
        value.to_string()
    }
}

impl Display for Rgba {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

//endregion

//region Label Position

/// Where the label's text box is anchored on each frame.
///
/// The corner variants inset the box by the configured margins; `Custom`
/// places the box's top-left corner at an exact point (which may lie outside
/// the frame, in which case the label is cropped).
#[derive(Debug, PartialEq, Clone, Copy, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "LabelPositionRepr", into = "LabelPositionRepr")]
pub enum LabelPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Custom(ImageXYPoint),
}

impl FromStr for LabelPosition {
    type Err = OverlayError;
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "top-left" => Ok(LabelPosition::TopLeft),
            "top-right" => Ok(LabelPosition::TopRight),
            "bottom-left" => Ok(LabelPosition::BottomLeft),
            "bottom-right" => Ok(LabelPosition::BottomRight),
            _ => Err(OverlayError::InvalidConfig(format!(
                "Unknown label position '{}'! Acceptable values are top-left, top-right, \
                 bottom-left, bottom-right, or a custom {{x, y}} point.",
                value
            ))),
        }
    }
}

impl Display for LabelPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            LabelPosition::TopLeft => write!(f, "top-left"),
            LabelPosition::TopRight => write!(f, "top-right"),
            LabelPosition::BottomLeft => write!(f, "bottom-left"),
            LabelPosition::BottomRight => write!(f, "bottom-right"),
            LabelPosition::Custom(point) => write!(f, "custom{}", point),
        }
    }
}

/// Wire form of [`LabelPosition`]: either a position name or an `{x, y}` map.
#[derive(Clone, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
enum LabelPositionRepr {
    Name(String),
    Point(ImageXYPoint),
}

impl TryFrom<LabelPositionRepr> for LabelPosition {
    type Error = OverlayError;
    fn try_from(value: LabelPositionRepr) -> Result<Self, Self::Error> {
        match value {
            LabelPositionRepr::Name(name) => name.parse(),
            LabelPositionRepr::Point(point) => Ok(LabelPosition::Custom(point)),
        }
    }
}

impl From<LabelPosition> for LabelPositionRepr {
    fn from(value: LabelPosition) -> LabelPositionRepr {
        match value {
            LabelPosition::Custom(point) => LabelPositionRepr::Point(point),
            named => LabelPositionRepr::Name(named.to_string()),
        }
    }
}

//endregion
