//! Source video fetching
//!
//! A file reference is read from its remote URL when one is given, otherwise
//! from its local path.

use crate::traits::{StorageError, StorageResult, VideoSource};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use std::time::Duration;
use tokio::fs;
use vidshift_core::models::FileReference;

const DOWNLOAD_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone)]
pub struct VideoFetcher {
    http_client: Client,
}

impl VideoFetcher {
    pub fn new() -> StorageResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(DOWNLOAD_TIMEOUT_SECS))
            .build()
            .map_err(|e| {
                StorageError::ConfigError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { http_client })
    }

    async fn download(&self, url: &str) -> StorageResult<Bytes> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| StorageError::DownloadFailed(format!("{}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StorageError::DownloadFailed(format!(
                "{} returned {}",
                url, status
            )));
        }

        response
            .bytes()
            .await
            .map_err(|e| StorageError::DownloadFailed(format!("Failed to read body: {}", e)))
    }

    async fn read_local(&self, path: &str) -> StorageResult<Bytes> {
        if !fs::try_exists(path).await? {
            return Err(StorageError::NotFound(path.to_string()));
        }

        let data = fs::read(path).await.map_err(|e| {
            StorageError::DownloadFailed(format!("Failed to read file {}: {}", path, e))
        })?;

        Ok(Bytes::from(data))
    }
}

#[async_trait]
impl VideoSource for VideoFetcher {
    async fn fetch(&self, file: &FileReference) -> StorageResult<Bytes> {
        let start = std::time::Instant::now();

        let non_empty = |v: &Option<String>| v.clone().filter(|s| !s.trim().is_empty());

        let data = if let Some(url) = non_empty(&file.url) {
            self.download(&url).await?
        } else if let Some(path) = non_empty(&file.path) {
            self.read_local(&path).await?
        } else {
            return Err(StorageError::NotFound(format!(
                "No path or URL for {}",
                file.name
            )));
        };

        tracing::info!(
            name = %file.name,
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Fetched source video"
        );

        Ok(data)
    }
}
