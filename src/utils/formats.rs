use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::utils::CompressorError;

/// Image formats the compressor can re-encode.
///
/// Anything a browser can decode but we cannot re-encode in kind (GIF, BMP, ...)
/// is handled through [`ImageFormat::resolve`], which falls back to JPEG.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    JPEG,
    PNG,
    WebP,
}

impl ImageFormat {
    pub const ALL: [ImageFormat; 3] = [Self::JPEG, Self::PNG, Self::WebP];

    /// Used whenever the declared type is not one we can re-encode.
    pub const FALLBACK: ImageFormat = Self::JPEG;

    /// Canonical MIME type for this format
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::JPEG => "image/jpeg",
            Self::PNG => "image/png",
            Self::WebP => "image/webp",
        }
    }

    /// Looks up a declared MIME type. `None` for anything outside the closed set.
    pub fn from_mime(mime_type: &str) -> Option<Self> {
        let mime_type = mime_type.trim();
        Self::ALL
            .into_iter()
            .find(|format| format.mime_type().eq_ignore_ascii_case(mime_type))
    }

    /// Total lookup: unknown MIME types resolve to JPEG.
    pub fn resolve(mime_type: &str) -> Self {
        Self::from_mime(mime_type).unwrap_or(Self::FALLBACK)
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&mime_subtype(self.mime_type()).to_uppercase())
    }
}

impl FromStr for ImageFormat {
    type Err = CompressorError;

    fn from_str(mime_type: &str) -> Result<Self, Self::Err> {
        Self::from_mime(mime_type).ok_or_else(|| CompressorError::unsupported_file(mime_type))
    }
}

/// `true` when the declared type is in the image category (`image/*`).
pub fn is_image_mime(mime_type: &str) -> bool {
    mime_type
        .get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("image/"))
}

/// Subtype half of a MIME type: `image/jpeg` → `jpeg`.
pub fn mime_subtype(mime_type: &str) -> &str {
    mime_type
        .split_once('/')
        .map(|(_, subtype)| subtype)
        .unwrap_or(mime_type)
}

/// Download file name for a payload of the given MIME type
pub fn download_file_name(mime_type: &str) -> String {
    format!("compressed-image.{}", mime_subtype(mime_type))
}

/// Best-effort MIME type for a file name, by extension.
///
/// Only used by the headless driver; browsers hand us a declared type.
pub fn mime_from_extension(path: &str) -> Option<&'static str> {
    let ext = std::path::Path::new(path)
        .extension()
        .and_then(|e| e.to_str())?
        .to_lowercase();

    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "bmp" => Some("image/bmp"),
        "txt" => Some("text/plain"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_mime_types_round_trip() {
        for format in ImageFormat::ALL {
            assert_eq!(ImageFormat::from_mime(format.mime_type()), Some(format));
        }
        assert_eq!(ImageFormat::from_mime("IMAGE/PNG"), Some(ImageFormat::PNG));
    }

    #[test]
    fn unknown_image_types_resolve_to_jpeg() {
        assert_eq!(ImageFormat::from_mime("image/gif"), None);
        assert_eq!(ImageFormat::resolve("image/gif"), ImageFormat::JPEG);
        assert_eq!(ImageFormat::resolve("image/bmp"), ImageFormat::FALLBACK);
        assert_eq!(ImageFormat::FALLBACK.mime_type(), "image/jpeg");
    }

    #[test]
    fn image_category_check() {
        assert!(is_image_mime("image/png"));
        assert!(is_image_mime("image/x-icon"));
        assert!(!is_image_mime("text/plain"));
        assert!(!is_image_mime("imag"));
        assert!(!is_image_mime(""));
    }

    #[test]
    fn download_name_uses_subtype() {
        assert_eq!(download_file_name("image/jpeg"), "compressed-image.jpeg");
        assert_eq!(download_file_name("image/webp"), "compressed-image.webp");
        assert_eq!(ImageFormat::WebP.to_string(), "WEBP");
    }

    #[test]
    fn extension_lookup() {
        assert_eq!(mime_from_extension("photo.JPG"), Some("image/jpeg"));
        assert_eq!(mime_from_extension("notes.txt"), Some("text/plain"));
        assert_eq!(mime_from_extension("archive"), None);
    }
}
