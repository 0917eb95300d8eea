//! URL downloader

use crate::error::{FetchError, FetchResult};
use derivia_core::mime;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use uuid::Uuid;

fn default_timeout_secs() -> u64 {
    60
}

/// Downloader configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Disable TLS certificate verification. Off by default; only enable
    /// for trusted internal endpoints with self-signed certificates.
    pub accept_invalid_certs: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            accept_invalid_certs: false,
        }
    }
}

/// Downloads remote files to locally stored temporary files.
pub struct UrlDownloader {
    client: reqwest::Client,
    tmp_dir: PathBuf,
}

impl UrlDownloader {
    pub fn new(config: FetchConfig) -> FetchResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            client,
            tmp_dir: std::env::temp_dir(),
        })
    }

    /// Override the directory that downloads are written to.
    pub fn with_tmp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.tmp_dir = dir.into();
        self
    }

    /// Download a URL and return the path to a locally stored temporary
    /// file.
    ///
    /// Redirects are followed. When the URL path (query string stripped)
    /// names a file without an extension, the downloaded file is renamed in
    /// place to `<basename>.<ext>`, with the extension guessed from the
    /// downloaded content.
    pub async fn download(&self, url: &str) -> FetchResult<PathBuf> {
        let path = self.tmp_dir.join(format!("download-{}", Uuid::new_v4()));

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transfer {
                url: url.to_string(),
                source: e,
            })?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status(),
            });
        }

        let body = response.bytes().await.map_err(|e| FetchError::Transfer {
            url: url.to_string(),
            source: e,
        })?;

        fs::write(&path, &body).await.map_err(|e| FetchError::Write {
            path: path.clone(),
            source: e,
        })?;

        let basename = inferred_basename(url);
        if Path::new(basename).extension().is_some() {
            tracing::debug!(url = %url, path = %path.display(), "Downloaded file");
            return Ok(path);
        }

        let extension = mime::extension_for(mime::sniff(&body)).unwrap_or("bin");
        let renamed = path.with_file_name(format!("{basename}.{extension}"));
        fs::rename(&path, &renamed)
            .await
            .map_err(|e| FetchError::Rename {
                from: path.clone(),
                to: renamed.clone(),
                source: e,
            })?;

        tracing::debug!(
            url = %url,
            path = %renamed.display(),
            extension = %extension,
            "Downloaded file, extension added"
        );
        Ok(renamed)
    }
}

/// Last path segment of the URL, query string stripped.
fn inferred_basename(url: &str) -> &str {
    let trimmed = url.split('?').next().unwrap_or(url);
    let base = trimmed.rsplit('/').next().unwrap_or(trimmed);
    if base.is_empty() {
        "download"
    } else {
        base
    }
}
