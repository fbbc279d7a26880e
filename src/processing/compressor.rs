//! Compression with a size guarantee.
//!
//! One encode at the tier's quality factor; if that overshoots the input size,
//! exactly one retry at a reduced factor; if nothing fits, the original payload.

use std::sync::Arc;
use image::DynamicImage;
use tracing::{debug, warn};

use crate::core::{CompressionOutcome, CompressionResult, CompressionStrategy, ImagePayload, QualityTier};
use crate::utils::CompressorResult;

use super::codec::{self, Candidate, ImageEncoder, RasterEncoder};

/// Chooses a strategy per (format, tier), encodes, and enforces the size bound.
#[derive(Clone)]
pub struct Compressor {
    encoder: Arc<dyn ImageEncoder>,
}

impl Default for Compressor {
    fn default() -> Self {
        Self::new(Arc::new(RasterEncoder))
    }
}

impl Compressor {
    pub fn new(encoder: Arc<dyn ImageEncoder>) -> Self {
        Self { encoder }
    }

    /// Compresses `image` at `tier`.
    ///
    /// The result is never larger than `image` and keeps its MIME type (or
    /// `image/jpeg` for declared types outside the re-encodable set). Decode and
    /// encode failures abort the attempt.
    pub fn compress(&self, image: &ImagePayload, tier: QualityTier) -> CompressorResult<CompressionResult> {
        let strategy = CompressionStrategy::for_mime(image.mime_type(), tier);
        debug!(
            "Compressing {} ({} bytes) at {tier}: {} q={:.3}",
            image.mime_type(),
            image.size_bytes(),
            strategy.output_format,
            strategy.quality_factor
        );

        let raster = codec::decode(image)?;
        self.compress_raster(image, &raster, strategy)
    }

    fn compress_raster(
        &self,
        image: &ImagePayload,
        raster: &DynamicImage,
        strategy: CompressionStrategy,
    ) -> CompressorResult<CompressionResult> {
        let limit = image.size_bytes();

        let first = self.encode(raster, strategy, strategy.quality_factor)?;
        if first.size_bytes() <= limit {
            debug!("First candidate fits: {} <= {limit}", first.size_bytes());
            return Ok(accept(first, strategy, strategy.quality_factor, CompressionOutcome::Initial));
        }

        let retry_quality = strategy.retry_factor();
        debug!(
            "First candidate too large ({} > {limit}), retrying at q={retry_quality:.3}",
            first.size_bytes()
        );
        let retry = self.encode(raster, strategy, retry_quality)?;

        let (best, quality, outcome) = if retry.size_bytes() < first.size_bytes() {
            (retry, retry_quality, CompressionOutcome::Retried)
        } else {
            (first, strategy.quality_factor, CompressionOutcome::Initial)
        };

        if best.size_bytes() <= limit {
            return Ok(accept(best, strategy, quality, outcome));
        }

        debug!(
            "No candidate fits ({} > {limit}), keeping original",
            best.size_bytes()
        );
        Ok(CompressionResult::original(image))
    }

    fn encode(
        &self,
        raster: &DynamicImage,
        strategy: CompressionStrategy,
        quality: f32,
    ) -> CompressorResult<Candidate> {
        self.encoder.encode(raster, strategy.output_format, quality)
    }
}

/// Labels an accepted candidate with the format that was asked for.
fn accept(
    candidate: Candidate,
    strategy: CompressionStrategy,
    quality: f32,
    outcome: CompressionOutcome,
) -> CompressionResult {
    if candidate.format != strategy.output_format {
        warn!(
            "Encoder reported {} for a {} request; labelling as requested",
            candidate.format, strategy.output_format
        );
    }
    CompressionResult {
        bytes: candidate.bytes,
        mime_type: strategy.output_format.mime_type().to_string(),
        outcome,
        quality: Some(quality),
    }
}
