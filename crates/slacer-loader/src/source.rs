//! Mesh sources and byte acquisition
//!
//! A mesh arrives as an in-memory buffer (drag and drop), a local file, or a
//! URL. [`Fetcher`] turns any of them into raw bytes; parsing happens later in
//! the pipeline.

use async_trait::async_trait;
use slacer_core::LoadError;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

const FILE_SCHEME: &str = "file://";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Where mesh bytes come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeshSource {
    /// Bytes already in memory
    Bytes { name: String, data: Vec<u8> },
    /// Local file
    File(PathBuf),
    /// `http://`, `https://` or `file://` URL
    Url(String),
}

impl MeshSource {
    /// Classify a command-line argument as a URL or a file path
    pub fn parse(input: &str) -> Self {
        let lower = input.to_ascii_lowercase();
        let is_url = ["http://", "https://", FILE_SCHEME]
            .iter()
            .any(|scheme| lower.starts_with(scheme));
        if is_url {
            Self::Url(input.to_string())
        } else {
            Self::File(PathBuf::from(input))
        }
    }

    /// Short name used in messages
    pub fn name(&self) -> String {
        match self {
            Self::Bytes { name, .. } => name.clone(),
            Self::File(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            Self::Url(url) => url.clone(),
        }
    }
}

impl fmt::Display for MeshSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytes { name, data } => write!(f, "{} ({} bytes)", name, data.len()),
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// Acquire raw bytes for a source
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, source: &MeshSource) -> Result<Vec<u8>, LoadError>;
}

/// Fetcher for in-memory buffers, local files and http(s) URLs
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("slacer/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn read_file(path: &Path, name: &str) -> Result<Vec<u8>, LoadError> {
        debug!("Reading mesh file {}", path.display());
        tokio::fs::read(path)
            .await
            .map_err(|e| acquisition_failed(name, e))
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, LoadError> {
        debug!("Downloading mesh from {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| acquisition_failed(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(acquisition_failed(url, format!("HTTP error {}", status)));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| acquisition_failed(url, e))?;
        Ok(body.to_vec())
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, source: &MeshSource) -> Result<Vec<u8>, LoadError> {
        match source {
            MeshSource::Bytes { data, .. } => Ok(data.clone()),
            MeshSource::File(path) => Self::read_file(path, &source.name()).await,
            MeshSource::Url(url) => {
                let lower = url.to_ascii_lowercase();
                if lower.starts_with(FILE_SCHEME) {
                    let path = Path::new(&url[FILE_SCHEME.len()..]);
                    Self::read_file(path, url).await
                } else if lower.starts_with("http://") || lower.starts_with("https://") {
                    self.download(url).await
                } else {
                    Err(acquisition_failed(url, "unsupported URL scheme"))
                }
            }
        }
    }
}

fn acquisition_failed(name: &str, reason: impl fmt::Display) -> LoadError {
    LoadError::AcquisitionFailed {
        source_name: name.to_string(),
        reason: reason.to_string(),
    }
}
