pub mod codec;
mod compressor;

pub use codec::{Candidate, ImageEncoder, RasterEncoder};
pub use compressor::Compressor;
