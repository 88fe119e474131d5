use std::path::PathBuf;
use thiserror::Error;

/// Rejections raised by the upload zone before a file ever reaches the scanner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("Invalid file type. Please upload a DICOM or Image file.")]
    InvalidType { media_type: Option<String> },

    #[error("File size too large. Max 10MB.")]
    TooLarge { size_bytes: u64, limit_bytes: u64 },

    #[error("Unable to read {}: {reason}", .path.display())]
    Unreadable { path: PathBuf, reason: String },
}

/// Failure of an analysis call. Every variant ends the session in the error state.
/// The mock backend never fails.
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("inference backend unavailable: {0}")]
    Unavailable(String),

    #[error("inference backend rejected the scan: {0}")]
    Rejected(String),
}

impl AnalysisError {
    /// Text shown to the user regardless of the underlying cause.
    pub const USER_MESSAGE: &'static str = "Unable to process the image. Please try again.";
}
