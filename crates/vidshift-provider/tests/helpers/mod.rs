//! Test helpers: build a real provider against a mock upstream.
//!
//! The provider uses the reqwest client, the URL/path fetcher and the local
//! output store; only the Decart endpoint is replaced by a mockito server.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use tempfile::TempDir;
use vidshift_core::models::{
    BatchRequest, FileReference, SingleRequest, TransformRequest, SUPPORTED_MODEL,
};
use vidshift_core::ProviderConfig;
use vidshift_provider::LucyProvider;

pub const TEST_KEY: &str = "integration-key";
pub const SOURCE_VIDEO: &[u8] = b"fake mp4 payload";

/// Provider plus the directories it writes to.
pub struct TestProvider {
    pub provider: LucyProvider,
    pub source_path: PathBuf,
    pub output_dir: PathBuf,
    pub preview_dir: PathBuf,
    pub _temp_dir: TempDir,
}

impl TestProvider {
    pub fn single(&self, prompt: &str, orientation: &str) -> TransformRequest {
        TransformRequest::Single(SingleRequest {
            model: SUPPORTED_MODEL.to_string(),
            file: Some(self.source_file()),
            prompt: prompt.to_string(),
            orientation: orientation.to_string(),
            enhance_prompt: None,
        })
    }

    pub fn batch(&self, prompts: &[&str], orientation: &str) -> TransformRequest {
        TransformRequest::Batch(BatchRequest {
            model: SUPPORTED_MODEL.to_string(),
            file: Some(self.source_file()),
            prompts: Some(prompts.iter().map(|p| p.to_string()).collect()),
            orientation: orientation.to_string(),
            enhance_prompt: None,
        })
    }

    fn source_file(&self) -> FileReference {
        FileReference {
            path: Some(self.source_path.to_string_lossy().into_owned()),
            url: None,
            mime_type: Some("video/mp4".to_string()),
            size: SOURCE_VIDEO.len() as u64,
            name: "source.mp4".to_string(),
        }
    }
}

pub async fn setup_test_provider(api_url: String, api_key: Option<&str>) -> TestProvider {
    let temp_dir = TempDir::new().unwrap();
    let source_path = temp_dir.path().join("source.mp4");
    std::fs::write(&source_path, SOURCE_VIDEO).unwrap();

    let output_dir = temp_dir.path().join("output_videos");
    let preview_dir = temp_dir.path().join("static").join("videos");

    let config = ProviderConfig {
        api_key: api_key.map(str::to_string),
        api_url,
        timeout_secs: 5,
        output_dir: output_dir.to_string_lossy().into_owned(),
        preview_dir: preview_dir.to_string_lossy().into_owned(),
        preview_base_url: "/static/videos".to_string(),
    };

    let provider = LucyProvider::from_config(config).await.unwrap();

    TestProvider {
        provider,
        source_path,
        output_dir,
        preview_dir,
        _temp_dir: temp_dir,
    }
}

/// Sorted file names in `dir`
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
