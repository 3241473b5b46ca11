//! Configuration module
//!
//! Provider settings are read from the environment (and an optional `.env`
//! file). The upstream credential is optional at load time so that the
//! readiness probe can report it missing instead of failing startup.

use std::env;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;

const DEFAULT_API_URL: &str = "https://api.decart.ai/v1/generate/lucy-pro-v2v";
const DEFAULT_TIMEOUT_SECS: u64 = 300;
const DEFAULT_OUTPUT_DIR: &str = "output_videos";
const DEFAULT_PREVIEW_DIR: &str = "static/videos";
const DEFAULT_PREVIEW_BASE_URL: &str = "/static/videos";

/// Name of the environment variable holding the upstream API key.
pub const API_KEY_ENV: &str = "DECART_API_KEY";

/// Characters of the API key that may appear in diagnostics.
const REDACTED_PREFIX_LEN: usize = 4;

#[derive(Clone)]
pub struct ProviderConfig {
    /// Upstream API key
    ///
    /// WARNING: Never log this field directly; use `redacted_api_key()`.
    pub api_key: Option<String>,
    pub api_url: String,
    pub timeout_secs: u64,
    /// Directory receiving sequentially numbered outputs
    pub output_dir: String,
    /// Directory receiving preview copies
    pub preview_dir: String,
    /// Public prefix under which preview copies are served
    pub preview_base_url: String,
}

impl Debug for ProviderConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ProviderConfig")
            .field("api_key", &self.redacted_api_key())
            .field("api_url", &self.api_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("output_dir", &self.output_dir)
            .field("preview_dir", &self.preview_dir)
            .field("preview_base_url", &self.preview_base_url)
            .finish()
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
            preview_dir: DEFAULT_PREVIEW_DIR.to_string(),
            preview_base_url: DEFAULT_PREVIEW_BASE_URL.to_string(),
        }
    }
}

impl ProviderConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let api_key = env::var(API_KEY_ENV)
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let timeout_secs = match env::var("DECART_TIMEOUT_SECS") {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("DECART_TIMEOUT_SECS must be a valid number"))?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        let config = Self {
            api_key,
            api_url: env::var("DECART_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            timeout_secs,
            output_dir: env::var("VIDSHIFT_OUTPUT_DIR")
                .unwrap_or_else(|_| DEFAULT_OUTPUT_DIR.to_string()),
            preview_dir: env::var("VIDSHIFT_PREVIEW_DIR")
                .unwrap_or_else(|_| DEFAULT_PREVIEW_DIR.to_string()),
            preview_base_url: env::var("VIDSHIFT_PREVIEW_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_PREVIEW_BASE_URL.to_string()),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.timeout_secs == 0 {
            return Err(anyhow::anyhow!(
                "DECART_TIMEOUT_SECS must be greater than zero"
            ));
        }

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(anyhow::anyhow!(
                "DECART_API_URL must be an http(s) URL"
            ));
        }

        Ok(())
    }

    /// Readiness probe: true when the upstream credential is present.
    pub fn is_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Short, non-identifying form of the API key for diagnostics.
    pub fn redacted_api_key(&self) -> String {
        match self.api_key.as_deref() {
            Some(key) if !key.is_empty() => {
                let prefix: String = key.chars().take(REDACTED_PREFIX_LEN).collect();
                format!("{}...", prefix)
            }
            _ => "<not set>".to_string(),
        }
    }
}
