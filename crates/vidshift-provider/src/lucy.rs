//! Decart lucy-pro-v2v provider
//!
//! Submission only validates and mints a handle. All upstream work happens on
//! the poll that follows, which runs the single or batch pipeline to
//! completion and reports a terminal outcome.

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;
use uuid::Uuid;

use vidshift_core::models::{
    Job, JobStatus, RequestKind, TransformOutcome, TransformOutput, TransformRequest,
};
use vidshift_core::{validate_request, ErrorMetadata, LogLevel, ProviderConfig, ProviderError};
use vidshift_storage::{LocalOutputStore, OutputStore, VideoFetcher, VideoSource};

use crate::client::{DecartClient, TransformClient};
use crate::pipeline::{run_batch, run_single, PipelineContext};
use crate::provider::{Provider, ProviderInfo, HANDLE_SEPARATOR};

pub const LUCY_PROVIDER_NAME: &str = "lucy";
pub const LUCY_NAMESPACE: &str = "decart-lucy";

const MISSING_KEY_MESSAGE: &str = "DECART_API_KEY environment variable not set";

pub struct LucyProvider {
    config: ProviderConfig,
    client: Arc<dyn TransformClient>,
    source: Arc<dyn VideoSource>,
    outputs: Arc<dyn OutputStore>,
}

impl Debug for LucyProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("LucyProvider")
            .field("config", &self.config)
            .field("client", &self.client)
            .finish()
    }
}

impl LucyProvider {
    pub fn new(
        config: ProviderConfig,
        client: Arc<dyn TransformClient>,
        source: Arc<dyn VideoSource>,
        outputs: Arc<dyn OutputStore>,
    ) -> Self {
        Self {
            config,
            client,
            source,
            outputs,
        }
    }

    /// Wire the provider to the Decart endpoint, the URL/path fetcher and
    /// the local output directories named in `config`.
    pub async fn from_config(config: ProviderConfig) -> Result<Self> {
        let client = DecartClient::from_config(&config)?;
        let source = VideoFetcher::new()?;
        let outputs = LocalOutputStore::new(
            &config.output_dir,
            &config.preview_dir,
            config.preview_base_url.clone(),
        )
        .await?;

        Ok(Self::new(
            config,
            Arc::new(client),
            Arc::new(source),
            Arc::new(outputs),
        ))
    }

    pub fn info() -> ProviderInfo {
        ProviderInfo {
            name: LUCY_PROVIDER_NAME.to_string(),
            description: "Decart lucy-pro-v2v video-to-video transformation".to_string(),
            supported_kinds: vec![RequestKind::Single, RequestKind::Batch],
        }
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn require_api_key(&self) -> Result<&str, ProviderError> {
        self.config
            .api_key()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ProviderError::Configuration(MISSING_KEY_MESSAGE.to_string()))
    }

    fn new_handle(&self) -> String {
        format!(
            "{}{}{}",
            LUCY_NAMESPACE,
            HANDLE_SEPARATOR,
            Uuid::new_v4().simple()
        )
    }

    async fn execute(
        &self,
        handle: &str,
        request: &TransformRequest,
    ) -> Result<TransformOutput, ProviderError> {
        let api_key = self.require_api_key()?;
        validate_request(request)?;

        let ctx = PipelineContext {
            api_key,
            client: self.client.as_ref(),
            source: self.source.as_ref(),
            outputs: self.outputs.as_ref(),
        };

        tracing::info!(handle = %handle, kind = %request.kind(), "Running transformation job");

        match request {
            TransformRequest::Single(single) => {
                run_single(ctx, single).await.map(TransformOutput::Single)
            }
            TransformRequest::Batch(batch) => {
                run_batch(ctx, batch).await.map(TransformOutput::Batch)
            }
        }
    }
}

fn log_job_failure(handle: &str, error: &ProviderError) {
    let error_code = error.error_code();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(handle = %handle, error = %error, error_code, "Transformation job failed");
        }
        LogLevel::Warn => {
            tracing::warn!(handle = %handle, error = %error, error_code, "Transformation job failed");
        }
        LogLevel::Error => {
            tracing::error!(handle = %handle, error = %error, error_code, "Transformation job failed");
        }
    }
}

#[async_trait]
impl Provider for LucyProvider {
    fn name(&self) -> &str {
        LUCY_PROVIDER_NAME
    }

    fn namespace(&self) -> &str {
        LUCY_NAMESPACE
    }

    fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    fn submit(&self, request: &TransformRequest) -> Result<Job, ProviderError> {
        self.require_api_key()?;
        validate_request(request)?;

        let job = Job {
            handle: self.new_handle(),
            kind: request.kind(),
            status: JobStatus::Pending,
            submitted_at: Utc::now(),
        };

        tracing::info!(
            handle = %job.handle,
            kind = %job.kind,
            file_name = request.file().map(|f| f.name.as_str()).unwrap_or_default(),
            "Transformation job submitted"
        );

        Ok(job)
    }

    async fn poll(&self, handle: &str, request: Option<&TransformRequest>) -> TransformOutcome {
        if !self.owns(handle) {
            tracing::debug!(handle = %handle, "Handle not issued by this provider");
            return TransformOutcome::Running;
        }

        let Some(request) = request else {
            tracing::debug!(handle = %handle, "Poll without request payload");
            return TransformOutcome::Running;
        };

        match self.execute(handle, request).await {
            Ok(output) => {
                tracing::info!(handle = %handle, "Transformation job succeeded");
                TransformOutcome::Succeeded { output }
            }
            Err(e) => {
                log_job_failure(handle, &e);
                TransformOutcome::failed(e.to_string())
            }
        }
    }
}
