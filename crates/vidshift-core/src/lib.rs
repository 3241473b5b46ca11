//! Vidshift Core Library
//!
//! This crate provides the domain models, error types, configuration and
//! input validation shared by the provider, storage and CLI crates.

pub mod config;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::ProviderConfig;
pub use error::{ErrorMetadata, LogLevel, ProviderError, ValidationError};
pub use validation::{validate_batch, validate_request, validate_single};
