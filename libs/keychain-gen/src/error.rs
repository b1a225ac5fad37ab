//! # Generation Errors
//!
//! Fatal outcomes of a generation run. Recoverable conditions are reported
//! as [`GenerationNote`](crate::GenerationNote)s instead.

use image_trace::TraceError;
use solid_mesh::MeshError;
use thiserror::Error;

/// Errors that stop a generation run.
///
/// No partial output accompanies an error.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// No image bytes were supplied
    #[error("Image data is empty")]
    EmptyImage,

    /// The image could not be decoded by any stage
    #[error("Image could not be read: {0}")]
    UnreadableImage(#[source] TraceError),

    /// Generation options are out of range
    #[error("Invalid options: {message}")]
    InvalidOptions { message: String },

    /// Not even the base plate could be built
    #[error("No geometry created, please try a different image")]
    EmptyGeometry,

    /// The final mesh could not be serialized
    #[error("Serialization failed: {0}")]
    Serialization(#[from] MeshError),

    /// The host cancelled the run between stages
    #[error("Generation cancelled before {stage}")]
    Cancelled { stage: &'static str },
}

impl GenerateError {
    /// Creates an invalid options error.
    pub fn invalid_options(message: impl Into<String>) -> Self {
        Self::InvalidOptions {
            message: message.into(),
        }
    }

    /// Returns true for errors caused by the caller's input.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyImage | Self::UnreadableImage(_) | Self::InvalidOptions { .. }
        )
    }
}

impl From<TraceError> for GenerateError {
    fn from(err: TraceError) -> Self {
        match err {
            TraceError::EmptyInput => Self::EmptyImage,
            other => Self::UnreadableImage(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_trace_input_maps_to_empty_image() {
        let err: GenerateError = TraceError::EmptyInput.into();
        assert!(matches!(err, GenerateError::EmptyImage));
        assert!(err.is_input_error());
    }

    #[test]
    fn test_other_trace_errors_are_unreadable() {
        let err: GenerateError = TraceError::InvalidDimensions {
            width: 0,
            height: 3,
        }
        .into();
        assert!(matches!(err, GenerateError::UnreadableImage(_)));
        assert!(err.to_string().contains("0x3"));
    }

    #[test]
    fn test_geometry_errors_are_not_input_errors() {
        assert!(!GenerateError::EmptyGeometry.is_input_error());
        assert!(!GenerateError::Serialization(MeshError::EmptyMesh).is_input_error());
        assert!(!GenerateError::Cancelled { stage: "merge" }.is_input_error());
    }
}
