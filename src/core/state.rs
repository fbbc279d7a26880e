//! Application state handed to every command.

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::core::QualityTier;
use crate::processing::{Compressor, ImageEncoder};
use crate::session::{CompressionSession, HandleRegistry};

/// Explicitly owned state of one compressor window.
///
/// Holds the session (current image + live preview) and the tier the user
/// has selected. Clones share the same session.
#[derive(Clone)]
pub struct AppState {
    session: Arc<CompressionSession>,
    handles: Arc<HandleRegistry>,
    tier: Arc<RwLock<QualityTier>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_compressor(Compressor::default())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State driven by a specific encoder instead of the built-in codecs.
    pub fn with_encoder(encoder: Arc<dyn ImageEncoder>) -> Self {
        Self::with_compressor(Compressor::new(encoder))
    }

    fn with_compressor(compressor: Compressor) -> Self {
        let handles = Arc::new(HandleRegistry::new());
        let session = CompressionSession::new(compressor, Arc::clone(&handles));
        debug!("AppState initialized");

        Self {
            session: Arc::new(session),
            handles,
            tier: Arc::new(RwLock::new(QualityTier::default())),
        }
    }

    pub fn session(&self) -> &Arc<CompressionSession> {
        &self.session
    }

    pub fn handles(&self) -> &Arc<HandleRegistry> {
        &self.handles
    }

    pub async fn tier(&self) -> QualityTier {
        *self.tier.read().await
    }

    pub async fn set_tier(&self, tier: QualityTier) {
        *self.tier.write().await = tier;
    }
}
