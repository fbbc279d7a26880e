//! Command handlers for single-image compression.

use serde::Serialize;
use tracing::debug;

use crate::core::{AppState, CompressSettings, FileInput, QualityTier};
use crate::session::{Download, Preview};
use crate::utils::{CompressorResult, size_label};

/// What the UI shows for the original side.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginalInfo {
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    /// `Size: 1.2 MB | Format: PNG`
    pub label: String,
}

/// Response to a file selection.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionView {
    pub original: OriginalInfo,
    /// `None` when a newer request overtook this one
    pub compressed: Option<Preview>,
}

/// Selects a file and compresses it at the currently selected tier.
///
/// # Errors
/// * `UnsupportedFile` - the declared type is not `image/*`; nothing is processed
/// * `DecodeFailed` - the bytes are not a decodable image
pub async fn select_image(state: &AppState, file: FileInput) -> CompressorResult<SelectionView> {
    let file_name = file.name.clone();
    let image = state.session().select(file).await?;

    let original = OriginalInfo {
        file_name,
        mime_type: image.mime_type().to_string(),
        size_bytes: image.size_bytes(),
        label: size_label(image.size_bytes(), image.mime_type()),
    };

    let tier = state.tier().await;
    let compressed = state.session().compress_current(tier).await?.into_preview();

    Ok(SelectionView { original, compressed })
}

/// Compresses the current image with the given settings and remembers the tier.
///
/// Returns `Ok(None)` when no image is selected yet (the tier is still stored)
/// or when a newer request overtook this one.
pub async fn compress_image(
    state: &AppState,
    settings: CompressSettings,
) -> CompressorResult<Option<Preview>> {
    debug!("compress_image with {:?}", settings);
    state.set_tier(settings.tier).await;

    if state.session().current_image().await.is_none() {
        return Ok(None);
    }

    let applied = state.session().compress_current(settings.tier).await?;
    Ok(applied.into_preview())
}

/// Tier selector changed.
pub async fn set_quality_tier(
    state: &AppState,
    tier: QualityTier,
) -> CompressorResult<Option<Preview>> {
    compress_image(state, CompressSettings { tier }).await
}

/// Download of the current result as `compressed-image.<subtype>`.
pub async fn download_compressed(state: &AppState) -> CompressorResult<Download> {
    state.session().download().await
}
