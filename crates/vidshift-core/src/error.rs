//! Error types module
//!
//! `ValidationError` is produced by the input validator before any network
//! call. `ProviderError` covers everything that can stop a job: bad input,
//! missing configuration, transport failures and upstream rejections. Batch
//! items that fail are not errors; they are recorded in the batch output.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like timeouts
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata describing how an error should be reported
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "UPSTREAM_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether resubmitting the same request may succeed
    fn is_recoverable(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

/// A request rejected by the input validator.
///
/// `row` is the 1-based index of the offending prompt for batch requests.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason}")]
pub struct ValidationError {
    pub reason: String,
    pub row: Option<usize>,
}

impl ValidationError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            row: None,
        }
    }

    pub fn at_row(row: usize, reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            row: Some(row),
        }
    }
}

pub const TIMEOUT_MESSAGE: &str = "Request timed out. The video processing is taking too long. Please try again with a smaller file.";

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Configuration(String),

    /// The request never produced an HTTP response (connect failure, timeout, abort).
    #[error("{}", transport_message(.message, .timed_out))]
    Transport { message: String, timed_out: bool },

    /// The upstream answered with a non-success status.
    #[error("API request failed: {status} - {body}")]
    Upstream { status: u16, body: String },

    #[error("Failed to read source video: {0}")]
    Source(String),

    #[error("Failed to store output video: {0}")]
    Output(String),
}

fn transport_message(message: &str, timed_out: &bool) -> String {
    if *timed_out {
        TIMEOUT_MESSAGE.to_string()
    } else {
        format!("Network error: {}", message)
    }
}

impl ProviderError {
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            ProviderError::Transport {
                timed_out: true,
                ..
            }
        )
    }
}

impl ErrorMetadata for ProviderError {
    fn error_code(&self) -> &'static str {
        match self {
            ProviderError::Validation(_) => "VALIDATION_ERROR",
            ProviderError::Configuration(_) => "CONFIGURATION_ERROR",
            ProviderError::Transport {
                timed_out: true, ..
            } => "UPSTREAM_TIMEOUT",
            ProviderError::Transport { .. } => "TRANSPORT_ERROR",
            ProviderError::Upstream { .. } => "UPSTREAM_ERROR",
            ProviderError::Source(_) => "SOURCE_ERROR",
            ProviderError::Output(_) => "OUTPUT_ERROR",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            ProviderError::Validation(_) | ProviderError::Configuration(_) => false,
            ProviderError::Transport { .. } | ProviderError::Output(_) => true,
            ProviderError::Upstream { status, .. } => *status == 429 || *status >= 500,
            ProviderError::Source(_) => false,
        }
    }

    fn log_level(&self) -> LogLevel {
        match self {
            ProviderError::Validation(_) => LogLevel::Debug,
            ProviderError::Transport { .. } => LogLevel::Warn,
            ProviderError::Upstream { status, .. } if *status < 500 => LogLevel::Warn,
            _ => LogLevel::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message_differs_from_network_error() {
        let timeout = ProviderError::Transport {
            message: "operation timed out".to_string(),
            timed_out: true,
        };
        let network = ProviderError::Transport {
            message: "connection refused".to_string(),
            timed_out: false,
        };

        assert!(timeout.is_timeout());
        assert!(!network.is_timeout());
        assert!(timeout.to_string().contains("timed out"));
        assert!(timeout.to_string().contains("smaller file"));
        assert_eq!(network.to_string(), "Network error: connection refused");
        assert_eq!(timeout.error_code(), "UPSTREAM_TIMEOUT");
        assert_eq!(network.error_code(), "TRANSPORT_ERROR");
    }

    #[test]
    fn test_upstream_message_embeds_status_and_body() {
        let err = ProviderError::Upstream {
            status: 422,
            body: "prompt rejected".to_string(),
        };
        assert_eq!(err.to_string(), "API request failed: 422 - prompt rejected");
        assert!(!err.is_recoverable());
        assert_eq!(err.log_level(), LogLevel::Warn);

        let server = ProviderError::Upstream {
            status: 503,
            body: String::new(),
        };
        assert!(server.is_recoverable());
        assert_eq!(server.log_level(), LogLevel::Error);
    }

    #[test]
    fn test_validation_error_is_transparent() {
        let err: ProviderError = ValidationError::at_row(2, "Empty prompt found at row 2").into();
        assert_eq!(err.to_string(), "Empty prompt found at row 2");
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert_eq!(err.log_level(), LogLevel::Debug);
        assert!(!err.is_recoverable());
    }
}
