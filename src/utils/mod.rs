pub mod error;
pub mod formats;
pub mod size;

pub use error::{CompressorError, CompressorResult};
pub use formats::{
    ImageFormat,
    download_file_name,
    is_image_mime,
    mime_from_extension,
    mime_subtype,
};
pub use size::{format_file_size, size_label};
