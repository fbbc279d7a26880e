//! Collaborator-side state: the current-image slot, request dispatch and
//! output handle lifetime.

mod dispatch;
mod handles;

pub use dispatch::{Applied, CompressRequest, CompressionSession, Download, Preview};
pub use handles::{HandleRegistry, ObjectHandle};
