// Module declarations in dependency order
pub mod commands;
pub mod core;
pub mod processing;
pub mod session;
pub mod utils;

// Public exports for external consumers
pub use self::core::{
    AppState,
    CompressSettings,
    CompressionOutcome,
    CompressionResult,
    CompressionStrategy,
    FileInput,
    ImagePayload,
    QualityTier,
};
pub use processing::{Candidate, Compressor, ImageEncoder, RasterEncoder};
pub use session::{Applied, CompressionSession, Download, HandleRegistry, ObjectHandle, Preview};
pub use utils::{CompressorError, CompressorResult, ImageFormat};
pub use commands::*;
