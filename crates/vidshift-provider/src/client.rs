//! Upstream video-to-video HTTP client
//!
//! One call is one multipart POST: the video under `data`, the prompt under
//! `prompt`. Nothing here retries; callers decide what a failure means.

use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;

use vidshift_core::{ProviderConfig, ProviderError};

const API_KEY_HEADER: &str = "X-API-KEY";
const UPLOAD_FILE_NAME: &str = "input.mp4";
const UPLOAD_MIME_TYPE: &str = "video/mp4";

/// Performs a single transformation call against the upstream model.
#[async_trait]
pub trait TransformClient: Send + Sync + Debug {
    /// Submit `video` with `prompt` and return the transformed video bytes.
    async fn transform(
        &self,
        api_key: &str,
        video: Bytes,
        prompt: &str,
        enhance_prompt: Option<bool>,
    ) -> Result<Bytes, ProviderError>;
}

/// reqwest-backed client for the Decart generation endpoint
pub struct DecartClient {
    http_client: Client,
    api_url: String,
}

impl Debug for DecartClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("DecartClient")
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl DecartClient {
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client for Decart")?;

        Ok(Self {
            http_client,
            api_url: api_url.into(),
        })
    }

    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        Self::new(config.api_url.clone(), config.timeout())
    }

    fn build_form(
        video: Bytes,
        prompt: &str,
        enhance_prompt: Option<bool>,
    ) -> Result<Form, ProviderError> {
        let video_part = Part::stream(video)
            .file_name(UPLOAD_FILE_NAME)
            .mime_str(UPLOAD_MIME_TYPE)
            .map_err(transport_error)?;

        let mut form = Form::new()
            .part("data", video_part)
            .text("prompt", prompt.to_string());

        if let Some(enhance) = enhance_prompt {
            form = form.text("enhance_prompt", enhance.to_string());
        }

        Ok(form)
    }
}

fn transport_error(err: reqwest::Error) -> ProviderError {
    ProviderError::Transport {
        timed_out: err.is_timeout(),
        message: err.to_string(),
    }
}

#[async_trait]
impl TransformClient for DecartClient {
    async fn transform(
        &self,
        api_key: &str,
        video: Bytes,
        prompt: &str,
        enhance_prompt: Option<bool>,
    ) -> Result<Bytes, ProviderError> {
        let start = std::time::Instant::now();
        let video_size = video.len();
        let form = Self::build_form(video, prompt, enhance_prompt)?;

        tracing::debug!(
            api_url = %self.api_url,
            video_size,
            prompt_length = prompt.chars().count(),
            "Sending video to Decart"
        );

        let response = self
            .http_client
            .post(&self.api_url)
            .header(API_KEY_HEADER, api_key)
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ProviderError::Upstream {
                status: status.as_u16(),
                body: error_text,
            });
        }

        let output = response.bytes().await.map_err(transport_error)?;

        tracing::info!(
            status = %status,
            input_bytes = video_size,
            output_bytes = output.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Decart transformation completed"
        );

        Ok(output)
    }
}
