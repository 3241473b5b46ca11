//! Provider system core infrastructure
//!
//! A provider turns a [`TransformRequest`] into a deferred job: `submit`
//! validates and hands back an opaque handle at once, `poll` does the actual
//! work when the caller comes back with the handle and the original request.

use async_trait::async_trait;
use serde::Serialize;
use std::fmt::Debug;

use vidshift_core::models::{Job, RequestKind, TransformOutcome, TransformRequest};
use vidshift_core::ProviderError;

/// Separator between a provider namespace and the unique part of a handle.
pub const HANDLE_SEPARATOR: char = '_';

/// Trait that all providers must implement
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Get the provider name/identifier
    fn name(&self) -> &str;

    /// Prefix carried by every handle this provider issues
    fn namespace(&self) -> &str;

    /// Readiness probe: whether the upstream credential is available
    fn is_configured(&self) -> bool;

    /// Whether `handle` was issued by this provider
    fn owns(&self, handle: &str) -> bool {
        handle
            .strip_prefix(self.namespace())
            .and_then(|rest| rest.strip_prefix(HANDLE_SEPARATOR))
            .is_some_and(|id| !id.is_empty())
    }

    /// Validate the request and issue a pending job without doing any work.
    ///
    /// Fails synchronously on missing configuration or invalid input.
    fn submit(&self, request: &TransformRequest) -> Result<Job, ProviderError>;

    /// Advance a job. Handles this provider does not recognise, and polls
    /// without the original request, report [`TransformOutcome::Running`].
    async fn poll(&self, handle: &str, request: Option<&TransformRequest>) -> TransformOutcome;
}

/// Provider information for listing available providers
#[derive(Debug, Clone, Serialize)]
pub struct ProviderInfo {
    /// Provider name/identifier
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Request kinds the provider accepts
    pub supported_kinds: Vec<RequestKind>,
}
