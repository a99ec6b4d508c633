mod frame_batch;
mod image_frame;

pub mod descriptors;
pub use frame_batch::FrameBatch;
pub use image_frame::ImageFrame;
