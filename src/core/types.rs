//! Core types for image payloads, quality tiers and compression results.

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::utils::{CompressorError, ImageFormat};

/// Binary image data plus its declared format and byte size.
///
/// Immutable once read from user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    bytes: Vec<u8>,
    mime_type: String,
}

impl ImagePayload {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Declared MIME type, exactly as the file picker reported it
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Declared format, if it is one we re-encode in kind
    pub fn format(&self) -> Option<ImageFormat> {
        ImageFormat::from_mime(&self.mime_type)
    }
}

/// User-facing coarse compression level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    High,
    #[default]
    Medium,
    Low,
}

impl QualityTier {
    pub const ALL: [QualityTier; 3] = [Self::High, Self::Medium, Self::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QualityTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(format!("unknown quality tier: {other}")),
        }
    }
}

/// Which step of the compression pipeline produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CompressionOutcome {
    /// First encode at the tier's quality factor fit
    Initial,
    /// The reduced-quality retry was the smaller fitting candidate
    Retried,
    /// No candidate fit; the original payload is returned unchanged
    Original,
}

/// The payload chosen for preview and download.
///
/// `size_bytes` never exceeds the size of the payload it was produced from.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressionResult {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub outcome: CompressionOutcome,
    /// Quality factor of the accepted candidate; `None` for the original
    pub quality: Option<f32>,
}

impl CompressionResult {
    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Original payload passed through untouched
    pub fn original(image: &ImagePayload) -> Self {
        Self {
            bytes: image.bytes().to_vec(),
            mime_type: image.mime_type().to_string(),
            outcome: CompressionOutcome::Original,
            quality: None,
        }
    }

    pub fn is_original(&self) -> bool {
        self.outcome == CompressionOutcome::Original
    }
}

/// Compression settings sent by the UI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressSettings {
    /// Selected quality tier
    #[serde(default)]
    pub tier: QualityTier,
}

/// A file handed over by the picker or drop zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInput {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl FileInput {
    /// Validates the declared type and turns the file into an immutable payload.
    pub fn into_payload(self) -> Result<ImagePayload, CompressorError> {
        if !crate::utils::is_image_mime(&self.mime_type) {
            return Err(CompressorError::unsupported_file(self.mime_type));
        }
        Ok(ImagePayload::new(self.bytes, self.mime_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_default_to_medium() {
        let settings: CompressSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.tier, QualityTier::Medium);

        let settings: CompressSettings = serde_json::from_str(r#"{"tier":"low"}"#).unwrap();
        assert_eq!(settings.tier, QualityTier::Low);
    }

    #[test]
    fn unknown_tier_is_rejected_by_serde() {
        assert!(serde_json::from_str::<CompressSettings>(r#"{"tier":"ultra"}"#).is_err());
        assert!("ultra".parse::<QualityTier>().is_err());
        assert_eq!("HIGH".parse::<QualityTier>(), Ok(QualityTier::High));
    }

    #[test]
    fn non_image_file_is_rejected() {
        let file = FileInput {
            name: "notes.txt".into(),
            mime_type: "text/plain".into(),
            bytes: b"hello".to_vec(),
        };
        assert_eq!(
            file.into_payload(),
            Err(CompressorError::UnsupportedFile("text/plain".into()))
        );
    }

    #[test]
    fn original_result_keeps_payload() {
        let image = ImagePayload::new(vec![1, 2, 3], "image/gif");
        let result = CompressionResult::original(&image);
        assert_eq!(result.bytes, image.bytes());
        assert_eq!(result.mime_type, "image/gif");
        assert_eq!(result.size_bytes(), 3);
        assert!(result.is_original());
    }
}
