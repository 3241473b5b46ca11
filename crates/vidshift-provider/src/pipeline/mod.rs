//! Single-video and batch pipelines
//!
//! Both run on the caller's task, one upstream call at a time. They expect a
//! request that already passed validation.

mod batch;
mod single;

pub use batch::run_batch;
pub use single::run_single;

use vidshift_core::models::FileReference;
use vidshift_core::{ProviderError, ValidationError};
use vidshift_storage::{OutputStore, VideoSource};

use crate::client::TransformClient;

/// Collaborators a pipeline run needs
#[derive(Clone, Copy)]
pub struct PipelineContext<'a> {
    pub api_key: &'a str,
    pub client: &'a dyn TransformClient,
    pub source: &'a dyn VideoSource,
    pub outputs: &'a dyn OutputStore,
}

fn require_file(file: Option<&FileReference>) -> Result<&FileReference, ProviderError> {
    file.ok_or_else(|| {
        ValidationError::new("A video file with a fetchable path or URL is required").into()
    })
}
