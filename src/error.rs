//! Error types for the overlay node.

/// Result type alias using OverlayError
pub type Result<T> = std::result::Result<T, OverlayError>;

/// Error types surfaced to the host when an overlay invocation fails.
///
/// All errors are synchronous and terminal for the invocation: the batch
/// either renders fully or the call returns one of these.
#[derive(Debug, thiserror::Error)]
pub enum OverlayError {
    /// Invalid node parameters (bad pad width, unknown position, bad color, ...)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Requested font could not be resolved, read, or parsed
    #[error("Font load failed: {0}")]
    FontLoad(String),

    /// Frames within a batch (or a tensor shape) do not agree
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// Image decode/encode error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Internal error indicating a bug (please report)
    #[error("Internal error, please raise an issue on Github: {0}")]
    Internal(String),
}
