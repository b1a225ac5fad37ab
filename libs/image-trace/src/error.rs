//! # Trace Errors
//!
//! Error types for image decoding and vectorization.

use thiserror::Error;

/// Errors that can occur while decoding or tracing an image.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The image bytes could not be decoded
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// No image bytes were supplied
    #[error("Image data is empty")]
    EmptyInput,

    /// The encoded image exceeds the accepted byte size
    #[error("Image too large: {size} bytes (max: {max})")]
    TooLarge { size: usize, max: usize },

    /// The decoded image has too many pixels
    #[error("Too many pixels: {count} (max: {max})")]
    TooManyPixels { count: u64, max: u64 },

    /// The pixel buffer does not match the stated dimensions
    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// A damaged image whose pixel format cannot be recovered row by row
    #[error("Cannot recover a partial image with color type {color:?}")]
    UnsalvageableColor { color: image::ColorType },

    /// Vectorizer parameters are out of range
    #[error("Invalid trace parameters: {message}")]
    InvalidParams { message: String },
}

impl TraceError {
    /// Creates an invalid parameters error.
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::InvalidParams {
            message: message.into(),
        }
    }
}
