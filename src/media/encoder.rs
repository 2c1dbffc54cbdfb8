//! Media payload encoding
//!
//! Converts an accepted file into the data-URI form the detection service
//! ingests as a JSON field. The whole file is buffered in memory before
//! encoding, so usable file size is bounded by available RAM; uploads are
//! not streamed or chunked.

use base64::{engine::general_purpose::STANDARD, Engine};

use super::validator::MediaFile;

#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Transport-safe representation of the selected file
#[derive(Debug, Clone)]
pub struct EncodedMedia {
    /// `data:<mime>;base64,<payload>`
    pub data_uri: String,
    pub byte_len: usize,
}

/// Read the file and wrap its content in a data URI
pub async fn encode_media(file: &MediaFile) -> Result<EncodedMedia, EncodeError> {
    let bytes = tokio::fs::read(&file.path)
        .await
        .map_err(|source| EncodeError::Read {
            path: file.path.display().to_string(),
            source,
        })?;

    let payload = STANDARD.encode(&bytes);
    tracing::debug!(file = %file.name, bytes = bytes.len(), "Encoded media payload");

    Ok(EncodedMedia {
        data_uri: format!("data:{};base64,{}", file.media_type, payload),
        byte_len: bytes.len(),
    })
}
