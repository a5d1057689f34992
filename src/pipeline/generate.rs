//! Generation: submit the intake payload to the backend and record the
//! outcome on the intake state.
//!
//! The HTTP layer sits behind the [`GenerateBackend`] trait so the submit
//! flow can be driven in tests without a network. [`HttpBackend`] is the real
//! implementation; it posts JSON to `{base}/generate` and decodes the
//! response into [`GeneratedDocuments`].

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::TailorConfig;
use crate::error::TailorError;
use crate::intake::IntakeState;

/// JSON payload for the `/generate` request. Every field is trimmed by
/// [`IntakeState::begin_generation`] before this is built.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GenerationRequest {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub resume_text: String,
    pub job_desc: String,
}

/// The backend's answer: two artifact URLs and two plain-text renditions.
///
/// Every field defaults to empty so a response missing a key still decodes;
/// an empty URL then surfaces as a download failure for that artifact rather
/// than failing the whole generation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneratedDocuments {
    #[serde(default)]
    pub resume_pdf: String,
    #[serde(default)]
    pub cover_pdf: String,
    #[serde(default)]
    pub text_resume: String,
    #[serde(default)]
    pub text_cover: String,
}

/// A generation backend. One call per submit; implementations decide
/// transport and timeout.
pub trait GenerateBackend {
    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> impl std::future::Future<Output = Result<GeneratedDocuments, TailorError>> + Send;
}

/// HTTP backend posting to `{base}/generate`.
pub struct HttpBackend {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpBackend {
    /// Build a backend from the configuration.
    ///
    /// Fails fast with [`TailorError::BackendUnconfigured`] when no base URL
    /// is set, before any request is attempted.
    pub fn new(config: &TailorConfig) -> Result<Self, TailorError> {
        let endpoint = config.endpoint("generate")?;
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.api_timeout_secs))
            .build()
            .map_err(|e| TailorError::InvalidConfig(format!("HTTP client: {e}")))?;
        Ok(Self { client, endpoint })
    }
}

impl GenerateBackend for HttpBackend {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GeneratedDocuments, TailorError> {
        debug!("POST {}", self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| TailorError::GenerationRequestFailed {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TailorError::GenerationBadStatus {
                status: status.as_u16(),
            });
        }

        response
            .json::<GeneratedDocuments>()
            .await
            .map_err(|e| TailorError::GenerationBadResponse {
                detail: e.to_string(),
            })
    }
}

/// Drives a full submit: readiness validation, the backend call, and the
/// lifecycle transition on the intake state.
pub struct Generator<B: GenerateBackend> {
    backend: B,
}

impl<B: GenerateBackend> Generator<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Submit the current intake for generation.
    ///
    /// Validation failures return before any request is sent and leave the
    /// lifecycle untouched. A backend failure moves the lifecycle to
    /// `Failed`, keeping documents from an earlier successful run; success
    /// stores the new documents and moves it to `Complete`.
    pub async fn submit(
        &self,
        state: &mut IntakeState,
    ) -> Result<GeneratedDocuments, TailorError> {
        let request = state.begin_generation()?;
        info!("Submitting generation request for '{}'", request.full_name);

        match self.backend.generate(&request).await {
            Ok(documents) => {
                info!("Generation complete");
                state.complete_generation(documents.clone());
                Ok(documents)
            }
            Err(e) => {
                warn!("Generation failed: {e}");
                state.fail_generation();
                Err(e)
            }
        }
    }
}

/// Fire the backend warm-up probe.
///
/// A single GET to `{base}/vxh` wakes a backend that idles out on free-tier
/// hosting. The result is logged and otherwise ignored; with no backend
/// configured the probe is skipped.
pub async fn warm_up(config: &TailorConfig) {
    let url = match config.endpoint("vxh") {
        Ok(url) => url,
        Err(_) => {
            debug!("No backend configured, skipping warm-up probe");
            return;
        }
    };

    let client = match reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(config.warmup_timeout_secs))
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            warn!("Warm-up client could not be built: {e}");
            return;
        }
    };

    match client.get(&url).send().await {
        Ok(response) => info!("Backend warm-up probe answered HTTP {}", response.status()),
        Err(e) => warn!("Backend warm-up probe failed: {e}"),
    }
}
