//! Error types for the image compressor.
//!
//! Every error is `Serialize` so the UI shell can render it directly.

use std::io;
use thiserror::Error;
use serde::Serialize;

use crate::utils::ImageFormat;

/// Main error type for the compressor.
///
/// All errors are terminal for the compression attempt that raised them.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "camelCase")]
pub enum CompressorError {
    /// Declared type is not an image; nothing was processed
    #[error("Unsupported file type: {0}. Please choose an image file")]
    UnsupportedFile(String),

    /// Input bytes could not be decoded into a raster surface
    #[error("Failed to decode image: {0}")]
    DecodeFailed(String),

    /// Encoder produced no candidate for a (format, quality) pair
    #[error("Failed to encode {format} at quality {quality:.3}: {reason}")]
    EncodeFailed {
        format: ImageFormat,
        quality: f32,
        reason: String,
    },

    /// A compression was requested before any image was selected
    #[error("No image selected")]
    NoImageSelected,

    /// Download or preview requested for a handle that was already released
    #[error("Output handle not found: {0}")]
    HandleNotFound(String),

    /// File IO error
    #[error("IO error: {0}")]
    Io(String),

    /// Blocking encode task panicked or was cancelled
    #[error("Task error: {0}")]
    Task(String),
}

/// Convenience result type for compressor operations.
pub type CompressorResult<T> = Result<T, CompressorError>;

impl CompressorError {
    pub fn unsupported_file<T: Into<String>>(mime_type: T) -> Self {
        Self::UnsupportedFile(mime_type.into())
    }

    pub fn decode<T: ToString>(err: T) -> Self {
        Self::DecodeFailed(err.to_string())
    }

    pub fn encode<T: ToString>(format: ImageFormat, quality: f32, err: T) -> Self {
        Self::EncodeFailed {
            format,
            quality,
            reason: err.to_string(),
        }
    }

    /// `true` for errors after which the original payload is still a usable result.
    pub fn is_recoverable_with_original(&self) -> bool {
        matches!(self, Self::EncodeFailed { .. })
    }
}

impl From<io::Error> for CompressorError {
    fn from(err: io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<tokio::task::JoinError> for CompressorError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Task(format!("Compression task failed: {err}"))
    }
}
