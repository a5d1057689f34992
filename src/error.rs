//! Error types for the resumeflow library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`TailorError`] — **Blocking**: the operation that produced it did not
//!   complete (bad upload, missing fields at submit time, backend failure).
//!   Returned as `Err(TailorError)` from the intake and generation entry
//!   points. Every variant leaves the intake state retryable: the caller may
//!   fix the input and invoke the same operation again.
//!
//! * [`DownloadError`] — **Non-fatal**: a single artifact download failed.
//!   Logged at the download boundary and never propagated, so one failed
//!   artifact cannot abort a sibling download that is already scheduled.

use std::path::PathBuf;
use thiserror::Error;

/// All blocking errors returned by the resumeflow library.
///
/// Per-artifact download failures use [`DownloadError`] and are logged
/// rather than propagated here.
#[derive(Debug, Error)]
pub enum TailorError {
    // ── Intake errors ─────────────────────────────────────────────────────
    /// A dropped file declared a media type other than PDF.
    #[error("'{file_name}' is not a PDF (declared media type: {media_type})\nUpload a PDF file.")]
    InvalidFormat {
        file_name: String,
        media_type: String,
    },

    /// The text layer could not be read from the document.
    #[error("Failed to extract text from '{file_name}': {detail}\nTry re-exporting the PDF and uploading again.")]
    ExtractionFailed { file_name: String, detail: String },

    /// An extraction is already running; the caller must wait for it.
    #[error("A document is already being processed")]
    ExtractionInProgress,

    // ── Validation errors ─────────────────────────────────────────────────
    /// Required fields were blank at submit time. No request was sent.
    #[error("Missing information: {}\nUpload a resume and fill out all fields.", missing.join(", "))]
    MissingInformation { missing: Vec<String> },

    // ── Generation errors ─────────────────────────────────────────────────
    /// A generation request is already in flight.
    #[error("A generation request is already in flight")]
    GenerationInProgress,

    /// No backend base URL was configured; the request cannot be addressed.
    #[error("No backend URL configured.\nSet RESUMEFLOW_BACKEND_URL or pass --backend-url.")]
    BackendUnconfigured,

    /// The generation request could not be sent or produced no response.
    #[error("Generation request failed: {reason}\nCheck your internet connection and try again.")]
    GenerationRequestFailed { reason: String },

    /// The backend answered with a non-success HTTP status.
    #[error("Generation failed: backend returned HTTP {status}\nTry again in a moment.")]
    GenerationBadStatus { status: u16 },

    /// The backend answered 2xx but the body was not the expected JSON.
    #[error("Generation response could not be decoded: {detail}")]
    GenerationBadResponse { detail: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// A non-fatal error for a single generated artifact.
///
/// Caught and logged by the download dispatcher; never surfaced to the
/// caller beyond the absence of the expected output file.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The artifact URL could not be fetched.
    #[error("Failed to fetch '{url}': {reason}")]
    FetchFailed { url: String, reason: String },

    /// The artifact host answered with a non-success HTTP status.
    #[error("Fetch of '{url}' returned HTTP {status}")]
    BadStatus { url: String, status: u16 },

    /// The fetched bytes could not be written to disk.
    #[error("Failed to save artifact to '{path}': {source}")]
    SaveFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_information_lists_fields() {
        let e = TailorError::MissingInformation {
            missing: vec!["email".into(), "phone".into()],
        };
        let msg = e.to_string();
        assert!(msg.contains("email, phone"), "got: {msg}");
    }

    #[test]
    fn invalid_format_names_file_and_type() {
        let e = TailorError::InvalidFormat {
            file_name: "resume.docx".into(),
            media_type: "application/msword".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("resume.docx"));
        assert!(msg.contains("application/msword"));
    }

    #[test]
    fn bad_status_display() {
        let e = TailorError::GenerationBadStatus { status: 502 };
        assert!(e.to_string().contains("502"));
    }

    #[test]
    fn download_error_display() {
        let e = DownloadError::BadStatus {
            url: "https://files.example/resume.pdf".into(),
            status: 404,
        };
        assert!(e.to_string().contains("404"));
        assert!(e.to_string().contains("resume.pdf"));
    }
}
