//! Artifact download: fetch the generated PDFs and save them under fixed
//! file names.
//!
//! Downloads are deliberately forgiving. A failed artifact is logged and
//! skipped; it never aborts a sibling download and never bubbles up as an
//! error. The caller learns what landed on disk from the returned paths.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::{info, warn};

use crate::config::TailorConfig;
use crate::error::{DownloadError, TailorError};
use crate::pipeline::generate::GeneratedDocuments;

/// File name the tailored resume is saved under.
pub const RESUME_FILE_NAME: &str = "Tailored_Resume.pdf";
/// File name the tailored cover letter is saved under.
pub const COVER_LETTER_FILE_NAME: &str = "Tailored_Cover_Letter.pdf";

/// Which generated artifact(s) to download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DownloadKind {
    Resume,
    CoverLetter,
    /// Resume first, then the cover letter once the resume has fully
    /// completed.
    #[default]
    Both,
}

impl FromStr for DownloadKind {
    type Err = TailorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "resume" => Ok(DownloadKind::Resume),
            "cover" | "cover-letter" => Ok(DownloadKind::CoverLetter),
            "both" => Ok(DownloadKind::Both),
            other => Err(TailorError::InvalidConfig(format!(
                "unknown download kind '{other}' (expected resume, cover-letter, or both)"
            ))),
        }
    }
}

/// Fetches the bytes behind an artifact URL.
pub trait ArtifactFetcher {
    fn fetch(
        &self,
        url: &str,
    ) -> impl std::future::Future<Output = Result<Vec<u8>, DownloadError>> + Send;
}

/// HTTP artifact fetcher.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &TailorConfig) -> Result<Self, TailorError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.download_timeout_secs))
            .build()
            .map_err(|e| TailorError::InvalidConfig(format!("HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl ArtifactFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, DownloadError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DownloadError::FetchFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::BadStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| DownloadError::FetchFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        Ok(bytes.to_vec())
    }
}

/// Saves generated artifacts into an output directory.
pub struct ArtifactDownloader<F: ArtifactFetcher> {
    fetcher: F,
    out_dir: PathBuf,
}

impl<F: ArtifactFetcher> ArtifactDownloader<F> {
    pub fn new(fetcher: F, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            fetcher,
            out_dir: out_dir.into(),
        }
    }

    /// Download the selected artifact(s), returning the paths that were
    /// written.
    ///
    /// For [`DownloadKind::Both`] the resume download runs to completion
    /// before the cover letter starts, so the two never interleave. Each
    /// artifact fails independently: a missing URL or a fetch error is
    /// logged, the artifact is skipped, and the other one still proceeds.
    pub async fn download(
        &self,
        documents: &GeneratedDocuments,
        kind: DownloadKind,
    ) -> Vec<PathBuf> {
        let mut written = Vec::new();

        if matches!(kind, DownloadKind::Resume | DownloadKind::Both) {
            if let Some(path) = self
                .download_one(&documents.resume_pdf, RESUME_FILE_NAME)
                .await
            {
                written.push(path);
            }
        }
        if matches!(kind, DownloadKind::CoverLetter | DownloadKind::Both) {
            if let Some(path) = self
                .download_one(&documents.cover_pdf, COVER_LETTER_FILE_NAME)
                .await
            {
                written.push(path);
            }
        }

        written
    }

    async fn download_one(&self, url: &str, file_name: &str) -> Option<PathBuf> {
        if url.is_empty() {
            warn!("No URL for '{file_name}', skipping");
            return None;
        }

        match self.fetch_and_save(url, file_name).await {
            Ok(path) => {
                info!("Saved '{}'", path.display());
                Some(path)
            }
            Err(e) => {
                warn!("Download of '{file_name}' failed: {e}");
                None
            }
        }
    }

    async fn fetch_and_save(&self, url: &str, file_name: &str) -> Result<PathBuf, DownloadError> {
        let bytes = self.fetcher.fetch(url).await?;
        tokio::fs::create_dir_all(&self.out_dir)
            .await
            .map_err(|source| DownloadError::SaveFailed {
                path: self.out_dir.clone(),
                source,
            })?;
        let path = self.out_dir.join(file_name);
        save_bytes(&path, &bytes).await?;
        Ok(path)
    }
}

async fn save_bytes(path: &Path, bytes: &[u8]) -> Result<(), DownloadError> {
    tokio::fs::write(path, bytes)
        .await
        .map_err(|source| DownloadError::SaveFailed {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Fetcher double recording the order of fetched URLs.
    #[derive(Default)]
    struct RecordingFetcher {
        fetched: Mutex<Vec<String>>,
        /// URLs that fail with HTTP 404.
        failing: Vec<String>,
    }

    impl ArtifactFetcher for &RecordingFetcher {
        async fn fetch(&self, url: &str) -> Result<Vec<u8>, DownloadError> {
            self.fetched.lock().unwrap().push(url.to_string());
            if self.failing.iter().any(|f| f == url) {
                return Err(DownloadError::BadStatus {
                    url: url.to_string(),
                    status: 404,
                });
            }
            Ok(format!("bytes of {url}").into_bytes())
        }
    }

    fn documents() -> GeneratedDocuments {
        GeneratedDocuments {
            resume_pdf: "https://files.example/resume.pdf".into(),
            cover_pdf: "https://files.example/cover.pdf".into(),
            text_resume: String::new(),
            text_cover: String::new(),
        }
    }

    #[tokio::test]
    async fn both_fetches_resume_strictly_before_cover() {
        let fetcher = RecordingFetcher::default();
        let dir = tempfile::tempdir().unwrap();
        let downloader = ArtifactDownloader::new(&fetcher, dir.path());

        let written = downloader.download(&documents(), DownloadKind::Both).await;
        assert_eq!(
            *fetcher.fetched.lock().unwrap(),
            vec![
                "https://files.example/resume.pdf".to_string(),
                "https://files.example/cover.pdf".to_string(),
            ]
        );
        assert_eq!(
            written,
            vec![
                dir.path().join(RESUME_FILE_NAME),
                dir.path().join(COVER_LETTER_FILE_NAME),
            ]
        );
        assert!(written.iter().all(|p| p.exists()));
    }

    #[tokio::test]
    async fn failed_resume_does_not_abort_cover() {
        let fetcher = RecordingFetcher {
            failing: vec!["https://files.example/resume.pdf".into()],
            ..RecordingFetcher::default()
        };
        let dir = tempfile::tempdir().unwrap();
        let downloader = ArtifactDownloader::new(&fetcher, dir.path());

        let written = downloader.download(&documents(), DownloadKind::Both).await;
        assert_eq!(written, vec![dir.path().join(COVER_LETTER_FILE_NAME)]);
        assert_eq!(fetcher.fetched.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn single_kind_fetches_only_its_artifact() {
        let fetcher = RecordingFetcher::default();
        let dir = tempfile::tempdir().unwrap();
        let downloader = ArtifactDownloader::new(&fetcher, dir.path());

        let written = downloader
            .download(&documents(), DownloadKind::CoverLetter)
            .await;
        assert_eq!(written, vec![dir.path().join(COVER_LETTER_FILE_NAME)]);
        assert_eq!(
            *fetcher.fetched.lock().unwrap(),
            vec!["https://files.example/cover.pdf".to_string()]
        );
    }

    #[tokio::test]
    async fn missing_output_directory_is_created() {
        let fetcher = RecordingFetcher::default();
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("nested").join("out");
        let downloader = ArtifactDownloader::new(&fetcher, &out_dir);

        let written = downloader.download(&documents(), DownloadKind::Both).await;
        assert_eq!(
            written,
            vec![
                out_dir.join(RESUME_FILE_NAME),
                out_dir.join(COVER_LETTER_FILE_NAME),
            ]
        );
        assert!(written.iter().all(|p| p.exists()));
    }

    #[tokio::test]
    async fn empty_url_is_skipped_without_a_fetch() {
        let fetcher = RecordingFetcher::default();
        let dir = tempfile::tempdir().unwrap();
        let downloader = ArtifactDownloader::new(&fetcher, dir.path());

        let docs = GeneratedDocuments::default();
        let written = downloader.download(&docs, DownloadKind::Both).await;
        assert!(written.is_empty());
        assert!(fetcher.fetched.lock().unwrap().is_empty());
    }

    #[test]
    fn download_kind_parses_cli_spellings() {
        assert_eq!("resume".parse::<DownloadKind>().unwrap(), DownloadKind::Resume);
        assert_eq!(
            "cover-letter".parse::<DownloadKind>().unwrap(),
            DownloadKind::CoverLetter
        );
        assert_eq!("Both".parse::<DownloadKind>().unwrap(), DownloadKind::Both);
        assert!("pdf".parse::<DownloadKind>().is_err());
    }
}
