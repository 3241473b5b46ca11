//! Test helpers for provider and pipeline tests
//!
//! In-memory stand-ins for the upstream client and the storage seams, plus
//! request fixtures. No network or filesystem access is needed.

pub mod fixtures;
pub mod mock_client;
pub mod mock_storage;

pub use fixtures::*;
pub use mock_client::*;
pub use mock_storage::*;

use crate::pipeline::PipelineContext;

/// API key handed to every mocked pipeline run
pub const TEST_API_KEY: &str = "test-decart-key";

/// Build a pipeline context over the given mocks
pub fn context<'a>(
    client: &'a MockTransformClient,
    source: &'a MockVideoSource,
    outputs: &'a MockOutputStore,
) -> PipelineContext<'a> {
    PipelineContext {
        api_key: TEST_API_KEY,
        client,
        source,
        outputs,
    }
}
