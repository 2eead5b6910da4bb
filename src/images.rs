use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::debug;

use crate::MoodflixError;

/// Represents where an image for style analysis comes from
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// Image from a file path
    Path(String),
    /// Image as base64-encoded data
    Base64(String),
    /// Raw encoded image bytes (PNG, JPEG, ...)
    Bytes(Vec<u8>),
}

/// An encoded image held in memory, ready to be sent to a vision model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageData {
    /// Wrap raw image bytes, sniffing the MIME type from the content.
    ///
    /// # Errors
    /// Returns `InvalidInput` if the buffer is empty
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, MoodflixError> {
        if bytes.is_empty() {
            return Err(MoodflixError::InvalidInput(
                "Image data cannot be empty".to_string(),
            ));
        }

        Ok(ImageData {
            mime_type: sniff_mime_type(&bytes).to_string(),
            bytes,
        })
    }

    /// Decode a base64 payload into image data
    pub fn from_base64(data: &str) -> Result<Self, MoodflixError> {
        let bytes = STANDARD
            .decode(data.trim())
            .map_err(|e| MoodflixError::InvalidInput(format!("Invalid base64 image: {}", e)))?;
        Self::from_bytes(bytes)
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }
}

/// Load an image from any supported source
///
/// # Errors
/// Returns an error if the file cannot be read, the base64 payload is
/// malformed, or the resulting buffer is empty
pub async fn load(source: &ImageSource) -> Result<ImageData, MoodflixError> {
    match source {
        ImageSource::Path(path) => {
            let bytes = tokio::fs::read(path).await?;
            debug!("Read {} bytes of image data from {}", bytes.len(), path);
            ImageData::from_bytes(bytes)
        }
        ImageSource::Base64(data) => ImageData::from_base64(data),
        ImageSource::Bytes(bytes) => ImageData::from_bytes(bytes.clone()),
    }
}

fn sniff_mime_type(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        "image/png"
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        "image/jpeg"
    } else if bytes.starts_with(b"GIF8") {
        "image/gif"
    } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        "image/webp"
    } else {
        "image/jpeg"
    }
}
