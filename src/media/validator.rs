//! Media file validation
//!
//! Decides whether a picked or dropped file is something the detection
//! service can analyze. Only the declared media type matters here; the
//! advertised size limit is advisory and never enforced.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Fixed rejection message rendered inline in the upload panel
pub const UNSUPPORTED_TYPE_MESSAGE: &str = "Please upload an image or video file";

/// Advertised upload ceiling (100MB). Oversize files are logged, not rejected.
pub const ADVISORY_MAX_BYTES: u64 = 100 * 1024 * 1024;

/// A media file accepted for analysis
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MediaFile {
    pub path: PathBuf,
    pub name: String,
    pub media_type: String,
    pub size: u64,
}

/// A file the user picked or dropped, before validation.
/// Drag-drop supplies a declared MIME type; the file dialog only gives a path.
#[derive(Debug, Clone)]
pub struct MediaCandidate {
    pub path: PathBuf,
    pub declared_type: Option<String>,
    pub size: u64,
}

impl MediaCandidate {
    /// Build a candidate from a path on disk, reading its size from metadata
    pub fn from_path(path: &Path, declared_type: Option<String>) -> Result<Self, String> {
        let meta = std::fs::metadata(path)
            .map_err(|e| format!("Failed to read file metadata: {}", e))?;

        if !meta.is_file() {
            return Err(format!("Not a file: {}", path.display()));
        }

        Ok(Self {
            path: path.to_path_buf(),
            declared_type,
            size: meta.len(),
        })
    }

    /// Effective media type: the declared one, or a guess from the extension
    fn media_type(&self) -> String {
        match &self.declared_type {
            Some(declared) if !declared.is_empty() => declared.clone(),
            _ => mime_guess::from_path(&self.path)
                .first_or_octet_stream()
                .essence_str()
                .to_string(),
        }
    }
}

/// The service accepts any image or video subtype
pub fn is_supported_media_type(media_type: &str) -> bool {
    media_type.starts_with("image/") || media_type.starts_with("video/")
}

/// Decision for a candidate file. The caller applies it to workflow state;
/// validation itself has no side effects.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    Accepted(MediaFile),
    Rejected(String),
}

pub fn validate_candidate(candidate: &MediaCandidate) -> ValidationOutcome {
    let media_type = candidate.media_type();

    if !is_supported_media_type(&media_type) {
        tracing::debug!(media_type = %media_type, "Rejected unsupported media type");
        return ValidationOutcome::Rejected(UNSUPPORTED_TYPE_MESSAGE.to_string());
    }

    if candidate.size > ADVISORY_MAX_BYTES {
        tracing::warn!(
            size = candidate.size,
            "File exceeds the advertised 100MB limit; upload may be slow"
        );
    }

    let name = candidate
        .path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "file".to_string());

    ValidationOutcome::Accepted(MediaFile {
        path: candidate.path.clone(),
        name,
        media_type,
        size: candidate.size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(path: &str, declared: Option<&str>) -> MediaCandidate {
        MediaCandidate {
            path: PathBuf::from(path),
            declared_type: declared.map(String::from),
            size: 2 * 1024 * 1024,
        }
    }

    #[test]
    fn accepts_declared_image_and_video_types() {
        assert!(matches!(
            validate_candidate(&candidate("face.jpg", Some("image/jpeg"))),
            ValidationOutcome::Accepted(_)
        ));
        assert!(matches!(
            validate_candidate(&candidate("clip.mov", Some("video/quicktime"))),
            ValidationOutcome::Accepted(_)
        ));
    }

    #[test]
    fn infers_type_from_extension_when_not_declared() {
        match validate_candidate(&candidate("clip.mp4", None)) {
            ValidationOutcome::Accepted(file) => assert_eq!(file.media_type, "video/mp4"),
            ValidationOutcome::Rejected(reason) => panic!("rejected: {}", reason),
        }
    }

    #[test]
    fn rejects_unsupported_types_with_fixed_message() {
        match validate_candidate(&candidate("report.pdf", Some("application/pdf"))) {
            ValidationOutcome::Rejected(reason) => assert_eq!(reason, UNSUPPORTED_TYPE_MESSAGE),
            ValidationOutcome::Accepted(_) => panic!("pdf should be rejected"),
        }

        // extension fallback path
        assert!(matches!(
            validate_candidate(&candidate("archive.zip", None)),
            ValidationOutcome::Rejected(_)
        ));
    }

    #[test]
    fn oversize_files_are_advisory_only() {
        let mut big = candidate("movie.mp4", Some("video/mp4"));
        big.size = ADVISORY_MAX_BYTES + 1;
        assert!(matches!(
            validate_candidate(&big),
            ValidationOutcome::Accepted(_)
        ));
    }

    #[test]
    fn accepted_file_carries_name_and_size() {
        match validate_candidate(&candidate("photos/face.jpg", Some("image/jpeg"))) {
            ValidationOutcome::Accepted(file) => {
                assert_eq!(file.name, "face.jpg");
                assert_eq!(file.size, 2 * 1024 * 1024);
            }
            _ => panic!("expected acceptance"),
        }
    }
}
