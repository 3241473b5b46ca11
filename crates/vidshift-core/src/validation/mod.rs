//! Input validation for transform requests
//!
//! Checks run in a fixed order and stop at the first failure; the returned
//! reason is meant to be shown to the caller as-is.

use crate::error::ValidationError;
use crate::models::{
    BatchRequest, FileReference, Orientation, SingleRequest, TransformRequest, SUPPORTED_MODEL,
};

/// Largest accepted source video, in megabytes (1 MB = 1024 * 1024 bytes).
pub const MAX_FILE_SIZE_MB: f64 = 100.0;

/// Longest accepted prompt, in characters.
pub const MAX_PROMPT_LENGTH: usize = 1000;

pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["mp4", "avi", "mov", "mkv", "webm"];

pub fn validate_request(request: &TransformRequest) -> Result<(), ValidationError> {
    let result = match request {
        TransformRequest::Single(single) => validate_single(single),
        TransformRequest::Batch(batch) => validate_batch(batch),
    };

    if let Err(err) = &result {
        tracing::debug!(
            kind = %request.kind(),
            row = ?err.row,
            reason = %err.reason,
            "Transform request rejected by validation"
        );
    }

    result
}

pub fn validate_single(request: &SingleRequest) -> Result<(), ValidationError> {
    validate_video(&request.model, request.file.as_ref())?;
    validate_prompt(&request.prompt)?;
    parse_orientation(&request.orientation)?;
    Ok(())
}

/// Validates the shared video, then every prompt in order, then orientation.
pub fn validate_batch(request: &BatchRequest) -> Result<(), ValidationError> {
    validate_video(&request.model, request.file.as_ref())?;

    let prompts = request
        .prompts
        .as_ref()
        .ok_or_else(|| ValidationError::new("Prompts list is required for batch processing"))?;

    if prompts.is_empty() {
        return Err(ValidationError::new(
            "At least one prompt is required for batch processing",
        ));
    }

    for (index, prompt) in prompts.iter().enumerate() {
        let row = index + 1;
        let trimmed = prompt.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::at_row(
                row,
                format!("Empty prompt found at row {}", row),
            ));
        }
        if trimmed.chars().count() > MAX_PROMPT_LENGTH {
            return Err(ValidationError::at_row(
                row,
                format!(
                    "Prompt at row {} exceeds maximum length of {} characters",
                    row, MAX_PROMPT_LENGTH
                ),
            ));
        }
    }

    parse_orientation(&request.orientation)?;
    Ok(())
}

/// Model tag, fetchable reference, size ceiling and extension, in that order.
fn validate_video(model: &str, file: Option<&FileReference>) -> Result<(), ValidationError> {
    if model != SUPPORTED_MODEL {
        return Err(ValidationError::new(format!(
            "Unsupported model: received '{}', expected '{}'",
            model, SUPPORTED_MODEL
        )));
    }

    let file = match file {
        Some(file) if file.is_fetchable() => file,
        _ => {
            return Err(ValidationError::new(
                "A video file with a fetchable path or URL is required",
            ))
        }
    };

    let size_mb = file.size_mb();
    if size_mb > MAX_FILE_SIZE_MB {
        return Err(ValidationError::new(format!(
            "File size {:.2}MB exceeds maximum of {}MB",
            size_mb, MAX_FILE_SIZE_MB
        )));
    }

    let supported = file
        .extension()
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()));
    if !supported {
        return Err(ValidationError::new(format!(
            "Unsupported file type for '{}'. Supported types: {}",
            file.name,
            SUPPORTED_EXTENSIONS.join(", ")
        )));
    }

    Ok(())
}

fn validate_prompt(prompt: &str) -> Result<(), ValidationError> {
    let trimmed = prompt.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new("Please provide a prompt"));
    }
    if trimmed.chars().count() > MAX_PROMPT_LENGTH {
        return Err(ValidationError::new(format!(
            "Prompt exceeds maximum length of {} characters",
            MAX_PROMPT_LENGTH
        )));
    }
    Ok(())
}

/// Parses an orientation string, rejecting anything but the two known values.
pub fn parse_orientation(value: &str) -> Result<Orientation, ValidationError> {
    value.parse::<Orientation>().map_err(|_| {
        ValidationError::new(format!(
            "Invalid orientation '{}'. Must be 'landscape' or 'portrait'",
            value
        ))
    })
}
