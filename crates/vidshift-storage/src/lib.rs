//! Vidshift Storage Library
//!
//! This crate provides the seams through which the pipelines touch files:
//! [`VideoSource`] to read the caller's source video and [`OutputStore`] to
//! persist transformed videos, with a URL/path fetcher and a local
//! filesystem store.
//!
//! # Output naming
//!
//! - **Sequential copy**: `output_NNN.mp4` in the output directory, numbered
//!   from the highest existing file.
//! - **Preview copy**: `processed_<8 hex>.mp4` for single jobs and
//!   `batch_<8 hex>.mp4` for batch items, served under the preview base URL.

pub mod fetch;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use fetch::VideoFetcher;
pub use local::LocalOutputStore;
pub use traits::{OutputKind, OutputStore, StorageError, StorageResult, StoredOutput, VideoSource};
