//! Command handlers for the UI shell.
//!
//! - [`select_image`]: Take a dropped or picked file and compress it
//! - [`compress_image`] / [`set_quality_tier`]: Re-compress at another tier
//! - [`download_compressed`]: Bytes and file name of the current result

mod image;

pub use self::image::*;
