// src/processing/codec.rs

//! Raster decode and per-format encode.
//!
//! The [`ImageEncoder`] trait is the seam between the retry policy in
//! [`Compressor`](super::Compressor) and the actual codecs, so the policy can be
//! exercised with encoders that return sizes of our choosing.

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{DynamicImage, ExtendedColorType, ImageEncoder as _};
use tracing::debug;

use crate::core::ImagePayload;
use crate::utils::{CompressorError, CompressorResult, ImageFormat};

/// Quality factors at or above this keep PNG at default deflate effort.
const PNG_DEFAULT_EFFORT_THRESHOLD: f32 = 0.9;

/// Output of a single encode attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub bytes: Vec<u8>,
    /// Format the encoder says it produced
    pub format: ImageFormat,
}

impl Candidate {
    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Encodes a decoded raster at a (format, quality) pair.
pub trait ImageEncoder: Send + Sync {
    fn encode(
        &self,
        image: &DynamicImage,
        format: ImageFormat,
        quality: f32,
    ) -> CompressorResult<Candidate>;
}

/// Decodes payload bytes into a raster surface, sniffing the real format.
pub fn decode(payload: &ImagePayload) -> CompressorResult<DynamicImage> {
    let image = image::load_from_memory(payload.bytes()).map_err(CompressorError::decode)?;
    debug!(
        "Decoded {} ({} bytes): {}×{}",
        payload.mime_type(),
        payload.size_bytes(),
        image.width(),
        image.height()
    );
    Ok(image)
}

/// Encoder backed by `image` (JPEG, PNG) and libwebp (lossy WebP).
#[derive(Debug, Default, Clone, Copy)]
pub struct RasterEncoder;

impl ImageEncoder for RasterEncoder {
    fn encode(
        &self,
        image: &DynamicImage,
        format: ImageFormat,
        quality: f32,
    ) -> CompressorResult<Candidate> {
        let bytes = match format {
            ImageFormat::JPEG => encode_jpeg(image, quality)?,
            ImageFormat::PNG => encode_png(image, quality)?,
            ImageFormat::WebP => encode_webp(image, quality)?,
        };
        debug!("Encoded {format} at q={quality:.3}: {} bytes", bytes.len());
        Ok(Candidate { bytes, format })
    }
}

/// Maps a (0, 1] factor onto the 1..=100 scale libjpeg-style encoders use.
fn percent(quality: f32) -> u8 {
    (quality * 100.0).round().clamp(1.0, 100.0) as u8
}

/// Baseline JPEG. Alpha is dropped, as a canvas export would.
fn encode_jpeg(image: &DynamicImage, quality: f32) -> CompressorResult<Vec<u8>> {
    let rgb = image.to_rgb8();
    let mut buf = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buf, percent(quality));
    encoder
        .encode(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)
        .map_err(|e| CompressorError::encode(ImageFormat::JPEG, quality, e))?;
    Ok(buf)
}

/// PNG is lossless; the factor only chooses how hard deflate works.
fn encode_png(image: &DynamicImage, quality: f32) -> CompressorResult<Vec<u8>> {
    let compression = if quality >= PNG_DEFAULT_EFFORT_THRESHOLD {
        CompressionType::Default
    } else {
        CompressionType::Best
    };

    let mut buf = Vec::new();
    let encoder = PngEncoder::new_with_quality(&mut buf, compression, FilterType::Adaptive);
    let result = if image.color().has_alpha() {
        let rgba = image.to_rgba8();
        encoder.write_image(rgba.as_raw(), rgba.width(), rgba.height(), ExtendedColorType::Rgba8)
    } else {
        let rgb = image.to_rgb8();
        encoder.write_image(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)
    };
    result.map_err(|e| CompressorError::encode(ImageFormat::PNG, quality, e))?;
    Ok(buf)
}

/// Lossy WebP through libwebp.
fn encode_webp(image: &DynamicImage, quality: f32) -> CompressorResult<Vec<u8>> {
    let rgba = image.to_rgba8();
    let encoder = webp::Encoder::from_rgba(rgba.as_raw(), rgba.width(), rgba.height());
    let memory = encoder
        .encode_simple(false, quality * 100.0)
        .map_err(|e| CompressorError::encode(ImageFormat::WebP, quality, format!("{e:?}")))?;
    Ok(memory.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat as Codec, Rgba, RgbaImage};
    use std::io::Cursor;

    fn gradient(width: u32, height: u32) -> DynamicImage {
        let img = RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 255 / width) as u8, (y * 255 / height) as u8, 128, 255])
        });
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn percent_scale() {
        assert_eq!(percent(0.95), 95);
        assert_eq!(percent(0.6), 60);
        assert_eq!(percent(0.5), 50);
        assert_eq!(percent(0.001), 1);
    }

    #[test]
    fn every_format_produces_decodable_output() {
        let image = gradient(32, 24);
        let expected = [
            (ImageFormat::JPEG, Codec::Jpeg),
            (ImageFormat::PNG, Codec::Png),
            (ImageFormat::WebP, Codec::WebP),
        ];
        for (format, codec) in expected {
            let candidate = RasterEncoder.encode(&image, format, 0.85).unwrap();
            assert_eq!(candidate.format, format);
            assert_eq!(image::guess_format(&candidate.bytes).unwrap(), codec);
            let round = image::load_from_memory(&candidate.bytes).unwrap();
            assert_eq!((round.width(), round.height()), (32, 24));
        }
    }

    #[test]
    fn decode_rejects_garbage() {
        let payload = ImagePayload::new(b"definitely not an image".to_vec(), "image/png");
        assert!(matches!(decode(&payload), Err(CompressorError::DecodeFailed(_))));
    }

    #[test]
    fn decode_sniffs_actual_format() {
        let mut bytes = Vec::new();
        gradient(8, 8)
            .write_to(&mut Cursor::new(&mut bytes), Codec::Png)
            .unwrap();
        // Declared as JPEG, but the bytes are PNG
        let payload = ImagePayload::new(bytes, "image/jpeg");
        let image = decode(&payload).unwrap();
        assert_eq!(image.width(), 8);
    }
}
