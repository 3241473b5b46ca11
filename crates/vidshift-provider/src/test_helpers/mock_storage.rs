//! Mock storage seams for testing

use async_trait::async_trait;
use bytes::Bytes;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use vidshift_core::models::FileReference;
use vidshift_storage::{OutputKind, OutputStore, StorageError, StorageResult, StoredOutput, VideoSource};

/// Source that serves fixed bytes, or always fails
#[derive(Debug, Clone)]
pub struct MockVideoSource {
    data: Option<Vec<u8>>,
    fetches: Arc<AtomicUsize>,
}

impl MockVideoSource {
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data: Some(data),
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing() -> Self {
        Self {
            data: None,
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VideoSource for MockVideoSource {
    async fn fetch(&self, file: &FileReference) -> StorageResult<Bytes> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        match &self.data {
            Some(data) => Ok(Bytes::from(data.clone())),
            None => Err(StorageError::NotFound(file.name.clone())),
        }
    }
}

/// In-memory output store numbering outputs from `output_001.mp4`
#[derive(Debug, Clone, Default)]
pub struct MockOutputStore {
    stored: Arc<Mutex<Vec<Vec<u8>>>>,
    reject: Option<Vec<u8>>,
}

impl MockOutputStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject writes of exactly these bytes
    pub fn fail_on_data(mut self, data: Vec<u8>) -> Self {
        self.reject = Some(data);
        self
    }

    pub fn stored(&self) -> Vec<Vec<u8>> {
        self.stored.lock().unwrap().clone()
    }
}

#[async_trait]
impl OutputStore for MockOutputStore {
    async fn store(&self, data: &[u8], kind: OutputKind) -> StorageResult<StoredOutput> {
        if self.reject.as_deref() == Some(data) {
            return Err(StorageError::WriteFailed("disk full".to_string()));
        }

        let mut stored = self.stored.lock().unwrap();
        stored.push(data.to_vec());
        let number = stored.len();

        Ok(StoredOutput {
            location: format!("/static/videos/{}_{:08x}.mp4", kind.preview_prefix(), number),
            output_name: format!("output_{:03}.mp4", number),
        })
    }
}
