//! Configuration for the generation backend and downloads.
//!
//! Everything the library needs from the environment is collected in one
//! [`TailorConfig`] value built via its [`TailorConfigBuilder`]. The backend
//! base URL is deliberately an explicit field rather than an ad-hoc env read:
//! tests inject arbitrary endpoints and the CLI decides once, at startup,
//! where requests go.

use crate::error::TailorError;
use serde::{Deserialize, Serialize};

/// Environment variable holding the backend base URL.
pub const BACKEND_URL_ENV: &str = "RESUMEFLOW_BACKEND_URL";

/// Configuration for backend requests and artifact downloads.
///
/// Built via [`TailorConfig::builder()`] or [`TailorConfig::from_env()`].
///
/// # Example
/// ```rust
/// use resumeflow::TailorConfig;
///
/// let config = TailorConfig::builder()
///     .backend_base_url("https://api.example.com")
///     .api_timeout_secs(30)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TailorConfig {
    /// Base URL of the generation backend, without a trailing slash.
    ///
    /// `None` means no backend is configured: the warm-up probe is skipped
    /// and constructing an HTTP backend fails fast with
    /// [`TailorError::BackendUnconfigured`].
    pub backend_base_url: Option<String>,

    /// Per-call timeout for the `/generate` request in seconds. Default: 120.
    ///
    /// Document generation on the backend involves an LLM round trip and PDF
    /// rendering; cold starts on free-tier hosting add tens of seconds more,
    /// hence the generous default.
    pub api_timeout_secs: u64,

    /// Per-artifact download timeout in seconds. Default: 60.
    pub download_timeout_secs: u64,

    /// Warm-up probe timeout in seconds. Default: 10.
    ///
    /// The probe exists only to wake a sleeping backend; a slow answer is as
    /// good as a fast one, so it gets a short leash and its result is ignored.
    pub warmup_timeout_secs: u64,
}

impl Default for TailorConfig {
    fn default() -> Self {
        Self {
            backend_base_url: None,
            api_timeout_secs: 120,
            download_timeout_secs: 60,
            warmup_timeout_secs: 10,
        }
    }
}

impl TailorConfig {
    /// Create a new builder for `TailorConfig`.
    pub fn builder() -> TailorConfigBuilder {
        TailorConfigBuilder {
            config: Self::default(),
        }
    }

    /// Build a config from the process environment.
    ///
    /// Reads [`BACKEND_URL_ENV`]; an unset or empty variable leaves the
    /// backend unconfigured rather than failing.
    pub fn from_env() -> Result<Self, TailorError> {
        let mut builder = Self::builder();
        if let Ok(url) = std::env::var(BACKEND_URL_ENV) {
            if !url.trim().is_empty() {
                builder = builder.backend_base_url(url);
            }
        }
        builder.build()
    }

    /// Join a path onto the backend base URL.
    ///
    /// Returns `Err(BackendUnconfigured)` when no base URL is set, so the
    /// failure happens before any socket is opened.
    pub fn endpoint(&self, path: &str) -> Result<String, TailorError> {
        let base = self
            .backend_base_url
            .as_deref()
            .ok_or(TailorError::BackendUnconfigured)?;
        Ok(format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/')))
    }
}

/// Builder for [`TailorConfig`].
#[derive(Debug)]
pub struct TailorConfigBuilder {
    config: TailorConfig,
}

impl TailorConfigBuilder {
    pub fn backend_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.backend_base_url = Some(url.into());
        self
    }

    pub fn api_timeout_secs(mut self, secs: u64) -> Self {
        self.config.api_timeout_secs = secs.max(1);
        self
    }

    pub fn download_timeout_secs(mut self, secs: u64) -> Self {
        self.config.download_timeout_secs = secs.max(1);
        self
    }

    pub fn warmup_timeout_secs(mut self, secs: u64) -> Self {
        self.config.warmup_timeout_secs = secs.max(1);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<TailorConfig, TailorError> {
        if let Some(ref url) = self.config.backend_base_url {
            let url = url.trim();
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(TailorError::InvalidConfig(format!(
                    "backend URL must start with http:// or https://, got '{url}'"
                )));
            }
        }
        Ok(self.config)
    }
}
