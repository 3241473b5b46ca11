//! Storage abstraction traits
//!
//! The pipelines read the source video through [`VideoSource`] and persist
//! results through [`OutputStore`]. Both are external collaborators: the
//! provider never decides where files live.

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use thiserror::Error;
use vidshift_core::models::FileReference;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid file name: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Which pipeline produced an output; selects the preview file name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Single,
    BatchItem,
}

impl OutputKind {
    pub fn preview_prefix(&self) -> &'static str {
        match self {
            OutputKind::Single => "processed",
            OutputKind::BatchItem => "batch",
        }
    }
}

impl Display for OutputKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            OutputKind::Single => write!(f, "single"),
            OutputKind::BatchItem => write!(f, "batch_item"),
        }
    }
}

/// Where a persisted output ended up.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredOutput {
    /// Location reference handed back to callers (preview URL)
    pub location: String,
    /// Sequential file name, e.g. `output_012.mp4`
    pub output_name: String,
}

/// Resolves a caller-supplied file reference to the video bytes.
#[async_trait]
pub trait VideoSource: Send + Sync {
    async fn fetch(&self, file: &FileReference) -> StorageResult<Bytes>;
}

/// Persists a transformed video and names it.
#[async_trait]
pub trait OutputStore: Send + Sync {
    async fn store(&self, data: &[u8], kind: OutputKind) -> StorageResult<StoredOutput>;
}
