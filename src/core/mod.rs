//! Core application types and state management.
//!
//! - [`AppState`]: Explicitly owned state handed to every command
//! - [`ImagePayload`]: The selected image, immutable once read
//! - [`QualityTier`] / [`CompressionStrategy`]: Tier → (format, quality factor) lookup
//! - [`CompressionResult`]: The payload chosen for preview and download

mod state;
mod strategy;
mod types;

pub use state::AppState;
pub use strategy::{CompressionStrategy, RETRY_FLOOR, RETRY_SCALE, quality_factor, retry_factor};
pub use types::{
    CompressSettings,
    CompressionOutcome,
    CompressionResult,
    FileInput,
    ImagePayload,
    QualityTier,
};
