//! Vidshift Provider Library
//!
//! Adapters that hand a video and a text prompt to a remote video-to-video
//! model. Each provider follows a two-phase protocol: [`Provider::submit`]
//! validates and returns a handle immediately, [`Provider::poll`] performs
//! the work and reports the outcome.
//!
//! The only provider today is [`LucyProvider`] for Decart's lucy-pro-v2v.

pub mod client;
pub mod lucy;
pub mod pipeline;
pub mod provider;
pub mod registry;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

// Re-export commonly used types
pub use client::{DecartClient, TransformClient};
pub use lucy::{LucyProvider, LUCY_NAMESPACE, LUCY_PROVIDER_NAME};
pub use pipeline::{run_batch, run_single, PipelineContext};
pub use provider::{Provider, ProviderInfo, HANDLE_SEPARATOR};
pub use registry::ProviderRegistry;
