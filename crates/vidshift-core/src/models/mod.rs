//! Data models for the video-to-video provider
//!
//! Requests as submitted by callers, job handles and poll outcomes, and the
//! output descriptors produced by the pipelines.

mod job;
mod output;
mod request;

// Re-export all models for convenient imports
pub use job::*;
pub use output::*;
pub use request::*;
