//! Mock upstream client for testing without network access

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use vidshift_core::ProviderError;

use crate::client::TransformClient;

/// Failure a [`MockTransformClient`] returns for a given prompt.
///
/// `ProviderError` is not `Clone`, so the mock keeps a recipe and builds a
/// fresh error for every call.
#[derive(Debug, Clone)]
pub enum MockFailure {
    Upstream { status: u16, body: String },
    Timeout,
    Network(String),
}

impl MockFailure {
    fn to_error(&self) -> ProviderError {
        match self {
            MockFailure::Upstream { status, body } => ProviderError::Upstream {
                status: *status,
                body: body.clone(),
            },
            MockFailure::Timeout => ProviderError::Transport {
                message: "operation timed out".to_string(),
                timed_out: true,
            },
            MockFailure::Network(message) => ProviderError::Transport {
                message: message.clone(),
                timed_out: false,
            },
        }
    }
}

pub fn upstream_error(status: u16, body: &str) -> MockFailure {
    MockFailure::Upstream {
        status,
        body: body.to_string(),
    }
}

pub fn timeout_error() -> MockFailure {
    MockFailure::Timeout
}

pub fn network_error(message: &str) -> MockFailure {
    MockFailure::Network(message.to_string())
}

/// One recorded call to the mock client
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub api_key: String,
    pub video: Vec<u8>,
    pub prompt: String,
    pub enhance_prompt: Option<bool>,
}

/// Mock client that echoes `transformed:<prompt>` and records every call
#[derive(Debug, Clone, Default)]
pub struct MockTransformClient {
    failures: HashMap<String, MockFailure>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockTransformClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make calls with exactly this prompt fail
    pub fn fail_on(mut self, prompt: &str, failure: MockFailure) -> Self {
        self.failures.insert(prompt.to_string(), failure);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TransformClient for MockTransformClient {
    async fn transform(
        &self,
        api_key: &str,
        video: Bytes,
        prompt: &str,
        enhance_prompt: Option<bool>,
    ) -> Result<Bytes, ProviderError> {
        self.calls.lock().unwrap().push(RecordedCall {
            api_key: api_key.to_string(),
            video: video.to_vec(),
            prompt: prompt.to_string(),
            enhance_prompt,
        });

        match self.failures.get(prompt) {
            Some(failure) => Err(failure.to_error()),
            None => Ok(Bytes::from(format!("transformed:{}", prompt))),
        }
    }
}
