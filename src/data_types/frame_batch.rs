use super::descriptors::ImageFrameProperties;
use super::ImageFrame;
use crate::error::{OverlayError, Result};
use ndarray::{Array4, Axis};

/// An ordered, non-empty sequence of frames sharing one resolution and
/// channel layout. The position of a frame in the batch is the frame number
/// used for labeling (offset by the configured start index).
///
/// Hosts hand batches over as 4D tensors in (batch, height, width, channels)
/// order, either as raw bytes or as floats in 0.0..=1.0; both forms convert
/// losslessly in and out.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameBatch {
    frames: Vec<ImageFrame>,
    properties: ImageFrameProperties,
}

impl FrameBatch {
    /// Creates a batch from frames, verifying every frame matches the first
    /// frame's resolution and channel layout.
    pub fn new(frames: Vec<ImageFrame>) -> Result<FrameBatch> {
        let first = frames.first().ok_or_else(|| {
            OverlayError::DimensionMismatch("A frame batch cannot be empty!".to_string())
        })?;
        let properties = first.get_image_frame_properties();
        for frame in &frames[1..] {
            properties.verify_image_frame_matches_properties(frame)?;
        }
        Ok(FrameBatch { frames, properties })
    }

    /// Creates a batch from a (batch, height, width, channels) byte tensor.
    pub fn from_u8_tensor(tensor: Array4<u8>) -> Result<FrameBatch> {
        let shape = tensor.shape();
        if shape[0] == 0 {
            return Err(OverlayError::DimensionMismatch(
                "Input tensor has an empty batch axis!".to_string(),
            ));
        }
        let frames = tensor
            .axis_iter(Axis(0))
            .map(|frame| ImageFrame::from_array(frame.to_owned()))
            .collect::<Result<Vec<ImageFrame>>>()?;
        FrameBatch::new(frames)
    }

    /// Creates a batch from the host's float tensor convention:
    /// (batch, height, width, channels) with values in 0.0..=1.0. Values are
    /// clamped into range before quantizing to bytes.
    pub fn from_f32_tensor(tensor: &Array4<f32>) -> Result<FrameBatch> {
        let quantized = tensor.mapv(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8);
        FrameBatch::from_u8_tensor(quantized)
    }

    /// Exports the batch as a (batch, height, width, channels) byte tensor.
    pub fn to_u8_tensor(&self) -> Array4<u8> {
        let resolution = self.properties.get_image_resolution();
        let mut tensor = Array4::<u8>::zeros((
            self.frames.len(),
            resolution.height as usize,
            resolution.width as usize,
            usize::from(self.properties.get_color_channel_layout()),
        ));
        for (i, frame) in self.frames.iter().enumerate() {
            tensor
                .index_axis_mut(Axis(0), i)
                .assign(&frame.get_pixels_view());
        }
        tensor
    }

    /// Exports the batch in the host's float tensor convention (0.0..=1.0).
    pub fn to_f32_tensor(&self) -> Array4<f32> {
        self.to_u8_tensor().mapv(|v| v as f32 / 255.0)
    }

    /// Number of frames in the batch.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always false; empty batches cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Returns the properties shared by every frame.
    pub fn get_properties(&self) -> ImageFrameProperties {
        self.properties
    }

    pub fn get_frame(&self, index: usize) -> Option<&ImageFrame> {
        self.frames.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ImageFrame> {
        self.frames.iter()
    }

    pub(crate) fn frames_mut(&mut self) -> &mut [ImageFrame] {
        &mut self.frames
    }
}

impl std::fmt::Display for FrameBatch {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "FrameBatch({} frames, {})", self.frames.len(), self.properties)
    }
}
