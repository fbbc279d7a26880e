//! Single-image compression session.
//!
//! Owns the current-image slot and the one live output handle. Every UI
//! event becomes a [`CompressRequest`] stamped with a ticket; a finished
//! compression is applied only if no newer request was issued since, so the
//! preview never shows a stale result.

use std::sync::Arc;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::core::{
    CompressionOutcome,
    CompressionResult,
    FileInput,
    ImagePayload,
    QualityTier,
};
use crate::processing::Compressor;
use crate::utils::{CompressorError, CompressorResult, download_file_name, size_label};

use super::handles::{HandleRegistry, ObjectHandle};

/// One compression of one image at one tier.
#[derive(Debug, Clone)]
pub struct CompressRequest {
    pub image: Arc<ImagePayload>,
    pub tier: QualityTier,
    /// Initiation order; higher wins
    pub ticket: u64,
}

/// What the UI renders for the compressed side.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Preview {
    pub handle: ObjectHandle,
    pub mime_type: String,
    pub size_bytes: u64,
    /// `Size: 12.5 KB | Format: JPEG`
    pub label: String,
    pub download_name: String,
    pub tier: QualityTier,
    pub outcome: CompressionOutcome,
    /// Set when compression failed and the original is shown instead
    pub notice: Option<String>,
}

/// Result of dispatching a request.
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    /// The result is now the current preview
    Shown(Preview),
    /// A newer request started first; the result was dropped
    Superseded,
}

impl Applied {
    pub fn into_preview(self) -> Option<Preview> {
        match self {
            Self::Shown(preview) => Some(preview),
            Self::Superseded => None,
        }
    }
}

/// Bytes offered for download.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Download {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Default)]
struct Slot {
    image: Option<Arc<ImagePayload>>,
    latest_ticket: u64,
    preview: Option<Preview>,
}

pub struct CompressionSession {
    compressor: Compressor,
    handles: Arc<HandleRegistry>,
    slot: Mutex<Slot>,
}

impl CompressionSession {
    pub fn new(compressor: Compressor, handles: Arc<HandleRegistry>) -> Self {
        Self {
            compressor,
            handles,
            slot: Mutex::new(Slot::default()),
        }
    }

    /// Replaces the current image.
    ///
    /// Non-image files are rejected and leave the session untouched. Otherwise
    /// the previous preview is released and any compression still running for
    /// the previous image is invalidated.
    pub async fn select(&self, file: FileInput) -> CompressorResult<Arc<ImagePayload>> {
        let name = file.name.clone();
        let image = Arc::new(file.into_payload().inspect_err(|e| warn!("Rejected {name}: {e}"))?);

        let mut slot = self.slot.lock().await;
        slot.image = Some(Arc::clone(&image));
        slot.latest_ticket += 1;
        if let Some(previous) = slot.preview.take() {
            self.handles.revoke(&previous.handle);
        }
        info!(
            "Selected {name} ({}, {} bytes)",
            image.mime_type(),
            image.size_bytes()
        );
        Ok(image)
    }

    pub async fn current_image(&self) -> Option<Arc<ImagePayload>> {
        self.slot.lock().await.image.clone()
    }

    pub async fn current_preview(&self) -> Option<Preview> {
        self.slot.lock().await.preview.clone()
    }

    /// Compresses the current image at `tier` and applies the result if it is
    /// still the latest request.
    ///
    /// Encode failures show the original payload with a notice; decode
    /// failures are returned and nothing is shown.
    pub async fn compress_current(&self, tier: QualityTier) -> CompressorResult<Applied> {
        let request = self.issue(tier).await?;
        debug!("Dispatching request #{} at {tier}", request.ticket);

        let compressor = self.compressor.clone();
        let image = Arc::clone(&request.image);
        let outcome = tokio::task::spawn_blocking(move || compressor.compress(&image, tier))
            .await
            .map_err(CompressorError::from)
            .and_then(|outcome| outcome);

        let (result, notice) = match outcome {
            Ok(result) => (result, None),
            Err(e) if e.is_recoverable_with_original() => {
                warn!("Request #{} failed, showing original: {e}", request.ticket);
                (CompressionResult::original(&request.image), Some(e.to_string()))
            }
            Err(e) => {
                if self.is_stale(&request).await {
                    debug!("Dropping error of superseded request #{}: {e}", request.ticket);
                    return Ok(Applied::Superseded);
                }
                return Err(e);
            }
        };

        Ok(self.apply(&request, result, notice).await)
    }

    /// Bytes and file name for the current preview.
    pub async fn download(&self) -> CompressorResult<Download> {
        let preview = self
            .current_preview()
            .await
            .ok_or(CompressorError::NoImageSelected)?;
        let result = self
            .handles
            .resolve(&preview.handle)
            .ok_or_else(|| CompressorError::HandleNotFound(preview.handle.to_string()))?;

        Ok(Download {
            file_name: preview.download_name,
            mime_type: result.mime_type.clone(),
            bytes: result.bytes.clone(),
        })
    }

    async fn issue(&self, tier: QualityTier) -> CompressorResult<CompressRequest> {
        let mut slot = self.slot.lock().await;
        let image = slot.image.clone().ok_or(CompressorError::NoImageSelected)?;
        slot.latest_ticket += 1;
        Ok(CompressRequest {
            image,
            tier,
            ticket: slot.latest_ticket,
        })
    }

    async fn is_stale(&self, request: &CompressRequest) -> bool {
        self.slot.lock().await.latest_ticket != request.ticket
    }

    /// Last-write-wins: only the most recently issued request may replace the preview.
    async fn apply(
        &self,
        request: &CompressRequest,
        result: CompressionResult,
        notice: Option<String>,
    ) -> Applied {
        let mut slot = self.slot.lock().await;
        if slot.latest_ticket != request.ticket {
            debug!(
                "Discarding request #{} (latest is #{})",
                request.ticket, slot.latest_ticket
            );
            return Applied::Superseded;
        }

        let size_bytes = result.size_bytes();
        let preview = Preview {
            mime_type: result.mime_type.clone(),
            size_bytes,
            label: size_label(size_bytes, &result.mime_type),
            download_name: download_file_name(&result.mime_type),
            tier: request.tier,
            outcome: result.outcome,
            notice,
            handle: self.handles.create(Arc::new(result)),
        };

        if let Some(previous) = slot.preview.replace(preview.clone()) {
            self.handles.revoke(&previous.handle);
        }

        info!(
            "Request #{} applied: {} → {} bytes ({:?})",
            request.ticket,
            request.image.size_bytes(),
            size_bytes,
            preview.outcome
        );
        Applied::Shown(preview)
    }
}

impl Drop for CompressionSession {
    fn drop(&mut self) {
        if let Some(preview) = self.slot.get_mut().preview.take() {
            self.handles.revoke(&preview.handle);
        }
    }
}
