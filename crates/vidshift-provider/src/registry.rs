//! Provider registry and poll routing

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use vidshift_core::models::{TransformOutcome, TransformRequest};

use crate::provider::{Provider, ProviderInfo};

/// Registry for managing and retrieving providers.
///
/// Thread-safe and async-compatible using tokio's RwLock. Registration
/// normally happens once at startup; lookups and poll routing run
/// concurrently afterwards.
#[derive(Clone)]
pub struct ProviderRegistry {
    providers: Arc<RwLock<HashMap<String, Arc<dyn Provider>>>>,
    provider_info: Arc<RwLock<HashMap<String, ProviderInfo>>>,
}

impl ProviderRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            providers: Arc::new(RwLock::new(HashMap::new())),
            provider_info: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Register a provider. A provider with the same name is replaced.
    pub async fn register(&self, provider: Arc<dyn Provider>, info: ProviderInfo) -> Result<()> {
        let name = provider.name().to_string();

        let mut providers = self.providers.write().await;
        let mut provider_info = self.provider_info.write().await;

        providers.insert(name.clone(), provider);
        provider_info.insert(name, info);

        Ok(())
    }

    /// Get a provider by name
    pub async fn get(&self, name: &str) -> Result<Arc<dyn Provider>> {
        let providers = self.providers.read().await;

        providers
            .get(name)
            .cloned()
            .with_context(|| format!("Provider '{}' not found", name))
    }

    /// List all registered providers
    pub async fn list(&self) -> Result<Vec<ProviderInfo>> {
        let provider_info = self.provider_info.read().await;

        Ok(provider_info.values().cloned().collect())
    }

    /// Find the provider that issued `handle`, if any
    pub async fn find_for_handle(&self, handle: &str) -> Option<Arc<dyn Provider>> {
        let providers = self.providers.read().await;

        providers.values().find(|p| p.owns(handle)).cloned()
    }

    /// Route a poll to the provider that issued `handle`.
    ///
    /// Unknown handles report [`TransformOutcome::Running`], the same answer a
    /// provider gives for a handle it does not own.
    pub async fn poll(&self, handle: &str, request: Option<&TransformRequest>) -> TransformOutcome {
        match self.find_for_handle(handle).await {
            Some(provider) => provider.poll(handle, request).await,
            None => {
                tracing::debug!(handle = %handle, "No provider owns handle");
                TransformOutcome::Running
            }
        }
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Arc;
    use vidshift_core::models::{Job, JobStatus, RequestKind};
    use vidshift_core::ProviderError;

    // Mock provider for testing
    #[derive(Debug)]
    struct MockProvider {
        name: String,
    }

    impl MockProvider {
        fn new(name: impl Into<String>) -> Self {
            Self { name: name.into() }
        }
    }

    #[async_trait]
    impl Provider for MockProvider {
        fn name(&self) -> &str {
            &self.name
        }

        fn namespace(&self) -> &str {
            &self.name
        }

        fn is_configured(&self) -> bool {
            true
        }

        fn submit(&self, request: &TransformRequest) -> Result<Job, ProviderError> {
            Ok(Job {
                handle: format!("{}_1", self.name),
                kind: request.kind(),
                status: JobStatus::Pending,
                submitted_at: Utc::now(),
            })
        }

        async fn poll(
            &self,
            handle: &str,
            _request: Option<&TransformRequest>,
        ) -> TransformOutcome {
            if self.owns(handle) {
                TransformOutcome::failed(format!("handled by {}", self.name))
            } else {
                TransformOutcome::Running
            }
        }
    }

    fn info(name: &str) -> ProviderInfo {
        ProviderInfo {
            name: name.to_string(),
            description: format!("{} provider", name),
            supported_kinds: vec![RequestKind::Single],
        }
    }

    async fn registry_with(names: &[&str]) -> ProviderRegistry {
        let registry = ProviderRegistry::new();
        for name in names {
            registry
                .register(Arc::new(MockProvider::new(*name)), info(name))
                .await
                .unwrap();
        }
        registry
    }

    #[tokio::test]
    async fn test_new_registry_is_empty() {
        let registry = ProviderRegistry::new();
        assert!(registry.list().await.unwrap().is_empty());
        assert!(registry.get("lucy").await.is_err());
    }

    #[tokio::test]
    async fn test_default_registry_is_empty() {
        let registry = ProviderRegistry::default();
        assert!(registry.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_register_and_get_provider() {
        let registry = registry_with(&["lucy"]).await;

        assert_eq!(registry.list().await.unwrap().len(), 1);
        assert_eq!(registry.get("lucy").await.unwrap().name(), "lucy");
    }

    #[tokio::test]
    async fn test_get_nonexistent_provider() {
        let registry = ProviderRegistry::new();
        let result = registry.get("nonexistent").await;
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Provider 'nonexistent' not found"));
    }

    #[tokio::test]
    async fn test_register_same_name_replaces() {
        let registry = registry_with(&["lucy", "lucy"]).await;
        assert_eq!(registry.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_find_for_handle_by_namespace() {
        let registry = registry_with(&["alpha", "beta"]).await;

        let found = registry.find_for_handle("beta_42").await.unwrap();
        assert_eq!(found.name(), "beta");
        assert!(registry.find_for_handle("gamma_42").await.is_none());
        assert!(registry.find_for_handle("beta").await.is_none());
    }

    #[tokio::test]
    async fn test_poll_routes_to_owner() {
        let registry = registry_with(&["alpha", "beta"]).await;

        let outcome = registry.poll("alpha_7", None).await;
        assert_eq!(outcome, TransformOutcome::failed("handled by alpha"));
    }

    #[tokio::test]
    async fn test_poll_unknown_handle_is_running() {
        let registry = registry_with(&["alpha"]).await;
        assert_eq!(
            registry.poll("unknown_7", None).await,
            TransformOutcome::Running
        );
    }

    #[tokio::test]
    async fn test_clone_registry_shares_providers() {
        let registry = ProviderRegistry::new();
        let cloned = registry.clone();
        registry
            .register(Arc::new(MockProvider::new("lucy")), info("lucy"))
            .await
            .unwrap();

        assert!(cloned.get("lucy").await.is_ok());
    }
}
