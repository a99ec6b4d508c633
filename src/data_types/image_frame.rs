use super::descriptors::{ColorChannelLayout, ImageFrameProperties, ImageXYResolution};
use crate::error::{OverlayError, Result};
use image::DynamicImage;
use ndarray::{Array3, ArrayView3, ArrayViewMut3};

/// A container for one frame's pixel data.
///
/// Stores pixels as a 3D array in height, width, channel order (row major).
/// Supports grayscale, RGB, and RGBA layouts and can import/export common
/// image formats for tests and host previews.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageFrame {
    pixels: Array3<u8>, // (height, width, channels)
    channel_layout: ColorChannelLayout,
}

// NOTE -> (0,0) is in the top left corner!

impl ImageFrame {
    //region Constructors

    /// Creates a new ImageFrame with zero-filled pixel data.
    pub fn new(channel_layout: &ColorChannelLayout, xy_resolution: &ImageXYResolution) -> ImageFrame {
        ImageFrame {
            channel_layout: *channel_layout,
            pixels: Array3::<u8>::zeros((
                xy_resolution.height as usize,
                xy_resolution.width as usize,
                *channel_layout as usize,
            )),
        }
    }

    /// Creates an ImageFrame from a row-major (height, width, channels)
    /// array. The channel layout is inferred from the third axis.
    pub fn from_array(pixels: Array3<u8>) -> Result<ImageFrame> {
        let shape = pixels.shape();
        if shape[0] == 0 || shape[1] == 0 {
            return Err(OverlayError::DimensionMismatch(
                "Frame arrays must have non-zero height and width!".to_string(),
            ));
        }
        let channel_layout = ColorChannelLayout::try_from(shape[2])?;
        Ok(ImageFrame {
            pixels,
            channel_layout,
        })
    }

    /// Creates an ImageFrame from a DynamicImage, keeping its channel layout.
    pub fn from_dynamic_image(img: DynamicImage) -> Result<ImageFrame> {
        let (width, height) = (img.width() as usize, img.height() as usize);
        let channel_layout = ColorChannelLayout::try_from(img.color())?;
        let pixels = match channel_layout {
            ColorChannelLayout::GrayScale => {
                Array3::from_shape_vec((height, width, 1), img.to_luma8().into_raw())
            }
            ColorChannelLayout::RGB => {
                Array3::from_shape_vec((height, width, 3), img.to_rgb8().into_raw())
            }
            ColorChannelLayout::RGBA => {
                Array3::from_shape_vec((height, width, 4), img.to_rgba8().into_raw())
            }
        }
        .map_err(|e| OverlayError::Internal(format!("Failed to shape decoded image: {}", e)))?;
        Ok(ImageFrame {
            pixels,
            channel_layout,
        })
    }

    /// Decodes PNG bytes into an ImageFrame.
    pub fn from_png_bytes(input: &[u8]) -> Result<ImageFrame> {
        let img = image::load_from_memory_with_format(input, image::ImageFormat::Png)?;
        Self::from_dynamic_image(img)
    }

    /// Decodes JPEG bytes into an ImageFrame.
    pub fn from_jpeg_bytes(input: &[u8]) -> Result<ImageFrame> {
        let img = image::load_from_memory_with_format(input, image::ImageFormat::Jpeg)?;
        Self::from_dynamic_image(img)
    }

    //endregion

    //region Properties

    /// Returns the properties (resolution + channel layout) of this frame.
    pub fn get_image_frame_properties(&self) -> ImageFrameProperties {
        ImageFrameProperties::new(self.get_xy_resolution(), self.channel_layout)
    }

    /// Returns a reference to the channel layout of this frame.
    pub fn get_channel_layout(&self) -> &ColorChannelLayout {
        &self.channel_layout
    }

    /// Returns the number of color channels in this frame.
    pub fn get_color_channel_count(&self) -> usize {
        self.channel_layout as usize
    }

    /// Returns the resolution of the frame (width, height).
    pub fn get_xy_resolution(&self) -> ImageXYResolution {
        let shape: &[usize] = self.pixels.shape();
        // ndarray is row major, so coords are (y, x, c)
        ImageXYResolution {
            width: shape[1] as u32,
            height: shape[0] as u32,
        }
    }

    /// Returns a read-only view of the pixel data.
    pub fn get_pixels_view(&self) -> ArrayView3<u8> {
        self.pixels.view()
    }

    /// Returns a mutable view of the pixel data as a 3D array.
    pub fn get_pixels_view_mut(&mut self) -> ArrayViewMut3<u8> {
        self.pixels.view_mut()
    }

    //endregion

    //region Export as Image

    /// Exports the frame as a DynamicImage from the image crate.
    pub fn export_as_dynamic_image(&self) -> Result<DynamicImage> {
        let resolution = self.get_xy_resolution();
        let (width, height) = (resolution.width, resolution.height);
        let raw: Vec<u8> = self.pixels.iter().copied().collect();

        match self.channel_layout {
            ColorChannelLayout::GrayScale => {
                let buffer = image::GrayImage::from_raw(width, height, raw).ok_or_else(|| {
                    OverlayError::Internal("Failed to create grayscale image".to_string())
                })?;
                Ok(DynamicImage::ImageLuma8(buffer))
            }
            ColorChannelLayout::RGB => {
                let buffer = image::RgbImage::from_raw(width, height, raw).ok_or_else(|| {
                    OverlayError::Internal("Failed to create RGB image".to_string())
                })?;
                Ok(DynamicImage::ImageRgb8(buffer))
            }
            ColorChannelLayout::RGBA => {
                let buffer = image::RgbaImage::from_raw(width, height, raw).ok_or_else(|| {
                    OverlayError::Internal("Failed to create RGBA image".to_string())
                })?;
                Ok(DynamicImage::ImageRgba8(buffer))
            }
        }
    }

    /// Exports the frame as PNG bytes.
    pub fn export_as_png_bytes(&self) -> Result<Vec<u8>> {
        let dynamic_img = self.export_as_dynamic_image()?;
        let mut buffer = Vec::new();
        dynamic_img.write_to(&mut std::io::Cursor::new(&mut buffer), image::ImageFormat::Png)?;
        Ok(buffer)
    }

    //endregion
}

impl std::fmt::Display for ImageFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "ImageFrame({})", self.get_image_frame_properties())
    }
}
