//! # resumeflow
//!
//! Tailor a resume and cover letter to a job posting: extract the text layer
//! from an uploaded resume PDF, collect the job description and contact
//! details, submit everything to a generation backend, and download the
//! tailored documents.
//!
//! ## Pipeline Overview
//!
//! ```text
//! resume.pdf
//!  │
//!  ├─ 1. Extract   read the text layer (CPU-bound, spawn_blocking)
//!  ├─ 2. Infer     pre-fill name / email / phone from the text
//!  ├─ 3. Intake    job description + contact fields, readiness checks
//!  ├─ 4. Generate  POST {base}/generate, decode the document URLs
//!  └─ 5. Download  save Tailored_Resume.pdf / Tailored_Cover_Letter.pdf
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use resumeflow::{
//!     ArtifactDownloader, DocumentSource, DownloadKind, Generator, HttpBackend,
//!     HttpFetcher, IntakeState, TailorConfig, UploadOrigin, UploadedFile,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = TailorConfig::from_env()?;
//!
//!     let source = DocumentSource::default();
//!     let document = source
//!         .extract(UploadedFile {
//!             file_name: "resume.pdf".into(),
//!             media_type: "application/pdf".into(),
//!             bytes: std::fs::read("resume.pdf")?,
//!             origin: UploadOrigin::Picker,
//!         })
//!         .await?;
//!
//!     let mut state = IntakeState::new();
//!     state.ingest_document(document.text, document.file_name);
//!     state.set_job_description("Senior Rust Engineer, Berlin ...");
//!
//!     let generator = Generator::new(HttpBackend::new(&config)?);
//!     let documents = generator.submit(&mut state).await?;
//!
//!     let downloader = ArtifactDownloader::new(HttpFetcher::new(&config)?, ".");
//!     let saved = downloader.download(&documents, DownloadKind::Both).await;
//!     println!("saved {} file(s)", saved.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `resumeflow` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! resumeflow = { version = "0.2", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod infer;
pub mod intake;
pub mod pipeline;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{TailorConfig, TailorConfigBuilder, BACKEND_URL_ENV};
pub use error::{DownloadError, TailorError};
pub use infer::{infer_contact, InferredContact};
pub use intake::{
    ContactFields, GenerationLifecycle, IngestReport, IntakeState, ResumeSource,
    JOB_DESCRIPTION_MAX_CHARS,
};
pub use pipeline::download::{
    ArtifactDownloader, ArtifactFetcher, DownloadKind, HttpFetcher, COVER_LETTER_FILE_NAME,
    RESUME_FILE_NAME,
};
pub use pipeline::extract::{
    DocumentSource, ExtractedDocument, PdfTextExtractor, TextExtractor, UploadOrigin,
    UploadedFile,
};
pub use pipeline::generate::{
    warm_up, GenerateBackend, GeneratedDocuments, GenerationRequest, Generator, HttpBackend,
};
