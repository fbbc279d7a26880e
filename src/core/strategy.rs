//! Quality table and retry policy.
//!
//! The table is keyed by the closed [`ImageFormat`] set. Declared types outside
//! that set never reach the table directly: [`CompressionStrategy::for_mime`]
//! resolves them to JPEG first, for both the output format and the quality row.

use serde::Serialize;

use crate::core::QualityTier;
use crate::utils::ImageFormat;

/// Retry quality is the first attempt's factor scaled by this...
pub const RETRY_SCALE: f32 = 0.7;
/// ...but never below this floor.
pub const RETRY_FLOOR: f32 = 0.5;

/// Encoder quality factor in (0, 1] for a format and tier.
pub fn quality_factor(format: ImageFormat, tier: QualityTier) -> f32 {
    match (format, tier) {
        (ImageFormat::JPEG, QualityTier::High) => 0.95,
        (ImageFormat::JPEG, QualityTier::Medium) => 0.85,
        (ImageFormat::JPEG, QualityTier::Low) => 0.65,
        (ImageFormat::PNG, QualityTier::High) => 0.95,
        (ImageFormat::PNG, QualityTier::Medium) => 0.85,
        (ImageFormat::PNG, QualityTier::Low) => 0.75,
        (ImageFormat::WebP, QualityTier::High) => 0.95,
        (ImageFormat::WebP, QualityTier::Medium) => 0.85,
        (ImageFormat::WebP, QualityTier::Low) => 0.65,
    }
}

/// Quality factor for the single reduced-quality retry.
pub fn retry_factor(quality: f32) -> f32 {
    RETRY_FLOOR.max(quality * RETRY_SCALE)
}

/// Output format and quality factor for one compression.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressionStrategy {
    pub output_format: ImageFormat,
    pub quality_factor: f32,
}

impl CompressionStrategy {
    pub fn new(output_format: ImageFormat, tier: QualityTier) -> Self {
        Self {
            output_format,
            quality_factor: quality_factor(output_format, tier),
        }
    }

    /// Strategy for a declared MIME type; unknown types use the JPEG row and output.
    pub fn for_mime(mime_type: &str, tier: QualityTier) -> Self {
        Self::new(ImageFormat::resolve(mime_type), tier)
    }

    pub fn retry_factor(&self) -> f32 {
        retry_factor(self.quality_factor)
    }
}
