//! Media store interface
//!
//! Media files are addressed by bare filename. The MIME type is inferred from the
//! extension alone.

use crate::error::{Result, StoreError};

pub const DEFAULT_MIME: &str = "application/octet-stream";

const MIME_TYPES: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("svg", "image/svg+xml"),
    ("mp3", "audio/mpeg"),
    ("ogg", "audio/ogg"),
    ("wav", "audio/wav"),
    ("m4a", "audio/mp4"),
    ("mp4", "video/mp4"),
    ("webm", "video/webm"),
    ("pdf", "application/pdf"),
];

/// A media file as served to the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaBlob {
    pub filename: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

pub trait MediaStore {
    fn fetch(&self, filename: &str) -> Result<MediaBlob>;
}

/// MIME type for a filename, by case-insensitive extension.
pub fn mime_for(filename: &str) -> &'static str {
    let Some((_, extension)) = filename.rsplit_once('.') else {
        return DEFAULT_MIME;
    };
    let extension = extension.to_ascii_lowercase();
    MIME_TYPES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map_or(DEFAULT_MIME, |(_, mime)| *mime)
}

/// Reject anything that is not a plain filename.
pub fn validate_filename(filename: &str) -> Result<()> {
    if filename.is_empty()
        || filename == "."
        || filename.contains("..")
        || filename.contains('/')
        || filename.contains('\\')
    {
        return Err(StoreError::Validation(format!(
            "invalid media filename '{filename}'"
        )));
    }
    Ok(())
}
