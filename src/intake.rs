//! Intake state: the resume source, job description, contact fields, and the
//! generation lifecycle, with the readiness rules that gate a submit.
//!
//! All mutation goes through methods so the two core invariants hold in one
//! place:
//!
//! * inference never overwrites a contact field the user already filled, and
//! * at most one [`GeneratedDocuments`] value exists at a time, discarded
//!   whenever the resume source is reset.

use crate::infer::{infer_contact, InferredContact};
use crate::pipeline::generate::{GeneratedDocuments, GenerationRequest};
use tracing::info;

/// Upper bound on the stored job description, in characters.
pub const JOB_DESCRIPTION_MAX_CHARS: usize = 5000;

/// The ingested resume document. Replaced wholesale on each new upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeSource {
    pub text: String,
    pub file_name: String,
}

/// User contact details. Each field is independently editable; inference
/// only ever fills a field that is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

/// Where the generation flow currently stands.
///
/// `Failed` is retryable: a new submit is allowed from every state except
/// `Generating`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationLifecycle {
    #[default]
    Idle,
    Generating,
    Complete,
    Failed,
}

/// Which contact field an ingestion filled by inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InferredField {
    FullName,
    Email,
    Phone,
}

impl InferredField {
    pub fn as_str(&self) -> &'static str {
        match self {
            InferredField::FullName => "full name",
            InferredField::Email => "email",
            InferredField::Phone => "phone",
        }
    }
}

/// Outcome of a successful document ingestion.
#[derive(Debug, Clone)]
pub struct IngestReport {
    pub file_name: String,
    /// Contact fields that were empty and got filled by inference.
    pub inferred: Vec<InferredField>,
}

/// All client-side state between upload and download.
#[derive(Debug, Default)]
pub struct IntakeState {
    resume: Option<ResumeSource>,
    job_description: String,
    contact: ContactFields,
    generated: Option<GeneratedDocuments>,
    lifecycle: GenerationLifecycle,
}

impl IntakeState {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn resume(&self) -> Option<&ResumeSource> {
        self.resume.as_ref()
    }

    pub fn contact(&self) -> &ContactFields {
        &self.contact
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    pub fn generated(&self) -> Option<&GeneratedDocuments> {
        self.generated.as_ref()
    }

    pub fn lifecycle(&self) -> GenerationLifecycle {
        self.lifecycle
    }

    /// Word count of the job description, as shown next to the input.
    pub fn job_description_word_count(&self) -> usize {
        self.job_description.split_whitespace().count()
    }

    /// Character count of the job description, against
    /// [`JOB_DESCRIPTION_MAX_CHARS`].
    pub fn job_description_char_count(&self) -> usize {
        self.job_description.chars().count()
    }

    // ── Mutators ──────────────────────────────────────────────────────────

    /// Overwrite the job description, truncating to
    /// [`JOB_DESCRIPTION_MAX_CHARS`] characters.
    pub fn set_job_description(&mut self, text: impl Into<String>) {
        let text: String = text.into();
        if text.chars().count() > JOB_DESCRIPTION_MAX_CHARS {
            self.job_description = text.chars().take(JOB_DESCRIPTION_MAX_CHARS).collect();
        } else {
            self.job_description = text;
        }
    }

    pub fn set_full_name(&mut self, value: impl Into<String>) {
        self.contact.full_name = value.into();
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.contact.email = value.into();
    }

    pub fn set_phone(&mut self, value: impl Into<String>) {
        self.contact.phone = value.into();
    }

    /// Ingest extracted document text as the resume source.
    ///
    /// Replaces any previous source, then runs contact-field inference and
    /// applies each candidate only to a field that is currently empty.
    /// Already-populated fields are left untouched regardless of what the
    /// document says.
    pub fn ingest_document(
        &mut self,
        text: impl Into<String>,
        file_name: impl Into<String>,
    ) -> IngestReport {
        let text = text.into();
        let file_name = file_name.into();

        let inferred = self.apply_inference(infer_contact(&text));

        self.resume = Some(ResumeSource {
            text,
            file_name: file_name.clone(),
        });

        info!(
            "Ingested '{}' ({} contact field(s) inferred)",
            file_name,
            inferred.len()
        );

        IngestReport { file_name, inferred }
    }

    fn apply_inference(&mut self, candidate: InferredContact) -> Vec<InferredField> {
        let mut applied = Vec::new();
        if self.contact.full_name.is_empty() {
            if let Some(name) = candidate.full_name {
                self.contact.full_name = name;
                applied.push(InferredField::FullName);
            }
        }
        if self.contact.email.is_empty() {
            if let Some(email) = candidate.email {
                self.contact.email = email;
                applied.push(InferredField::Email);
            }
        }
        if self.contact.phone.is_empty() {
            if let Some(phone) = candidate.phone {
                self.contact.phone = phone;
                applied.push(InferredField::Phone);
            }
        }
        applied
    }

    /// Clear the resume source and any generated documents.
    ///
    /// The job description and typed contact fields survive a reset: removing
    /// the uploaded file must not throw away what the user entered by hand.
    pub fn reset(&mut self) {
        self.resume = None;
        self.generated = None;
        self.lifecycle = GenerationLifecycle::Idle;
    }

    // ── Readiness ─────────────────────────────────────────────────────────

    pub fn has_resume(&self) -> bool {
        self.resume.is_some()
    }

    pub fn has_job_description(&self) -> bool {
        !self.job_description.trim().is_empty()
    }

    /// True when a generation request may be dispatched: resume present and
    /// job description plus all three contact fields non-blank after trim.
    pub fn is_ready(&self) -> bool {
        self.missing_information().is_empty()
    }

    /// Names of the required inputs that are still blank, in display order.
    pub fn missing_information(&self) -> Vec<String> {
        let mut missing = Vec::new();
        if !self.has_resume() {
            missing.push("resume".to_string());
        }
        if !self.has_job_description() {
            missing.push("job description".to_string());
        }
        if self.contact.full_name.trim().is_empty() {
            missing.push("full name".to_string());
        }
        if self.contact.email.trim().is_empty() {
            missing.push("email".to_string());
        }
        if self.contact.phone.trim().is_empty() {
            missing.push("phone".to_string());
        }
        missing
    }

    // ── Generation lifecycle ──────────────────────────────────────────────

    /// Validate readiness and enter the `Generating` state.
    ///
    /// Returns the request payload with every field trimmed. Errors leave the
    /// state unchanged: `GenerationInProgress` while a request is in flight,
    /// `MissingInformation` when readiness fails (no request is ever built in
    /// that case).
    pub fn begin_generation(&mut self) -> Result<GenerationRequest, crate::TailorError> {
        if self.lifecycle == GenerationLifecycle::Generating {
            return Err(crate::TailorError::GenerationInProgress);
        }
        let missing = self.missing_information();
        if !missing.is_empty() {
            return Err(crate::TailorError::MissingInformation { missing });
        }

        // missing_information() already checked for the resume source.
        let resume = match self.resume.as_ref() {
            Some(resume) => resume,
            None => {
                return Err(crate::TailorError::MissingInformation {
                    missing: vec!["resume".to_string()],
                })
            }
        };
        let request = GenerationRequest {
            full_name: self.contact.full_name.trim().to_string(),
            email: self.contact.email.trim().to_string(),
            phone: self.contact.phone.trim().to_string(),
            resume_text: resume.text.trim().to_string(),
            job_desc: self.job_description.trim().to_string(),
        };
        self.lifecycle = GenerationLifecycle::Generating;
        Ok(request)
    }

    /// Store the generation result and enter `Complete`.
    ///
    /// Replaces any previous result, keeping at most one
    /// [`GeneratedDocuments`] alive.
    pub fn complete_generation(&mut self, documents: GeneratedDocuments) {
        self.generated = Some(documents);
        self.lifecycle = GenerationLifecycle::Complete;
    }

    /// Record a failed generation attempt.
    ///
    /// No partial state is kept from the failed attempt, but documents from
    /// an earlier successful run stay available. The inputs are untouched
    /// and a new submit is allowed immediately.
    pub fn fail_generation(&mut self) {
        self.lifecycle = GenerationLifecycle::Failed;
    }
}
