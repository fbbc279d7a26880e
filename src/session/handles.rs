//! Transient handles for produced payloads.
//!
//! A handle plays the part of a browser object URL: the UI gets a string it
//! can point a preview or download at, and the owner must revoke it exactly
//! once when the payload is superseded.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use serde::Serialize;
use tracing::{debug, warn};

use crate::core::CompressionResult;

const HANDLE_PREFIX: &str = "blob:image-compressor/";

/// Opaque reference to a live payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ObjectHandle(String);

impl ObjectHandle {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Registry of live handles.
#[derive(Debug, Default)]
pub struct HandleRegistry {
    next_id: AtomicU64,
    live: Mutex<HashMap<ObjectHandle, Arc<CompressionResult>>>,
}

impl HandleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a payload and returns a fresh handle for it.
    pub fn create(&self, result: Arc<CompressionResult>) -> ObjectHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let handle = ObjectHandle(format!("{HANDLE_PREFIX}{id}"));
        self.live().insert(handle.clone(), result);
        debug!("Created {handle}");
        handle
    }

    pub fn resolve(&self, handle: &ObjectHandle) -> Option<Arc<CompressionResult>> {
        self.live().get(handle).cloned()
    }

    /// Releases a handle. Returns `false` if it was not live.
    pub fn revoke(&self, handle: &ObjectHandle) -> bool {
        let released = self.live().remove(handle).is_some();
        if released {
            debug!("Revoked {handle}");
        } else {
            warn!("Revoke of unknown or already released handle {handle}");
        }
        released
    }

    pub fn live_count(&self) -> usize {
        self.live().len()
    }

    /// A poisoned lock still holds a consistent map; keep serving it.
    fn live(&self) -> MutexGuard<'_, HashMap<ObjectHandle, Arc<CompressionResult>>> {
        self.live.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
