//! Document intake: accept an uploaded PDF, extract its text layer, and hand
//! the result to the intake state.
//!
//! Extraction is CPU-bound and runs on the blocking pool. A single in-flight
//! extraction is enforced per [`DocumentSource`] with an atomic busy flag; a
//! second upload while one is running is rejected, never queued.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use tracing::{debug, info};

use crate::error::TailorError;

/// How the file reached us. Files from a picker are pre-filtered to PDF by
/// the picker itself; dropped files carry whatever media type the source
/// declared and must be checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOrigin {
    Picker,
    DragDrop,
}

/// An uploaded file, before extraction.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
    pub origin: UploadOrigin,
}

/// The extracted text layer of a document.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    /// Page texts joined in page order, trimmed.
    pub text: String,
    pub page_count: usize,
    pub file_name: String,
}

/// Extracts the text layer from raw document bytes, page by page.
///
/// Synchronous on purpose: implementations are CPU-bound and the caller
/// decides where they run ([`DocumentSource`] uses `spawn_blocking`).
pub trait TextExtractor: Clone + Send + 'static {
    fn extract_pages(&self, bytes: &[u8], file_name: &str) -> Result<Vec<String>, TailorError>;
}

/// Text-layer extraction backed by the `pdf-extract` crate.
///
/// Only the embedded text layer is read; scanned PDFs without one come back
/// empty rather than failing.
#[derive(Debug, Clone, Default)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract_pages(&self, bytes: &[u8], file_name: &str) -> Result<Vec<String>, TailorError> {
        pdf_extract::extract_text_from_mem_by_pages(bytes).map_err(|e| {
            TailorError::ExtractionFailed {
                file_name: file_name.to_string(),
                detail: e.to_string(),
            }
        })
    }
}

/// Accepts uploads, validates them, and runs extraction off the async runtime.
///
/// At most one extraction runs at a time; `extract` returns
/// [`TailorError::ExtractionInProgress`] for concurrent calls instead of
/// queueing them.
#[derive(Debug)]
pub struct DocumentSource<E: TextExtractor> {
    extractor: E,
    busy: AtomicBool,
    /// File name of the in-flight upload, for status display.
    selected: Mutex<Option<String>>,
}

impl Default for DocumentSource<PdfTextExtractor> {
    fn default() -> Self {
        Self::new(PdfTextExtractor)
    }
}

impl<E: TextExtractor> DocumentSource<E> {
    pub fn new(extractor: E) -> Self {
        Self {
            extractor,
            busy: AtomicBool::new(false),
            selected: Mutex::new(None),
        }
    }

    /// True while an extraction is running.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// File name of the upload currently being processed, if any.
    pub fn selected_file(&self) -> Option<String> {
        self.selected.lock().ok().and_then(|guard| guard.clone())
    }

    /// Validate the upload and extract its text layer.
    ///
    /// Dropped files with a non-PDF media type are rejected up front with
    /// [`TailorError::InvalidFormat`], before the busy flag is taken. On
    /// success the selected file name is cleared again, so submitting the
    /// same file a second time is indistinguishable from a fresh upload. On
    /// failure it stays set, naming the document that produced no text.
    pub async fn extract(&self, file: UploadedFile) -> Result<ExtractedDocument, TailorError> {
        if file.origin == UploadOrigin::DragDrop && file.media_type != "application/pdf" {
            return Err(TailorError::InvalidFormat {
                file_name: file.file_name,
                media_type: file.media_type,
            });
        }

        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(TailorError::ExtractionInProgress);
        }

        if let Ok(mut guard) = self.selected.lock() {
            *guard = Some(file.file_name.clone());
        }

        debug!("Extracting text from '{}' ({} bytes)", file.file_name, file.bytes.len());
        let result = self.run_extraction(file).await;

        if result.is_ok() {
            if let Ok(mut guard) = self.selected.lock() {
                *guard = None;
            }
        }
        self.busy.store(false, Ordering::Release);
        result
    }

    async fn run_extraction(&self, file: UploadedFile) -> Result<ExtractedDocument, TailorError> {
        let extractor = self.extractor.clone();
        let file_name = file.file_name;
        let bytes = file.bytes;

        let join_name = file_name.clone();
        let pages = tokio::task::spawn_blocking(move || {
            extractor.extract_pages(&bytes, &join_name)
        })
        .await
        .map_err(|e| TailorError::ExtractionFailed {
            file_name: file_name.clone(),
            detail: format!("extraction task failed: {e}"),
        })??;

        let page_count = pages.len();
        let mut text = String::new();
        for page in &pages {
            text.push_str(page);
            text.push('\n');
        }
        let text = text.trim().to_string();

        info!("Extracted {} page(s) from '{}'", page_count, file_name);
        Ok(ExtractedDocument {
            text,
            page_count,
            file_name,
        })
    }
}
