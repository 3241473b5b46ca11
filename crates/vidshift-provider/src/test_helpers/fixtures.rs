//! Request fixtures

use vidshift_core::models::{BatchRequest, FileReference, SingleRequest, SUPPORTED_MODEL};

/// A fetchable 40MB video reference with the given file name
pub fn video_file(name: &str) -> FileReference {
    FileReference {
        path: Some(format!("/uploads/{}", name)),
        url: None,
        mime_type: Some("video/mp4".to_string()),
        size: 40 * 1024 * 1024,
        name: name.to_string(),
    }
}

pub fn single_request(name: &str, prompt: &str, orientation: &str) -> SingleRequest {
    SingleRequest {
        model: SUPPORTED_MODEL.to_string(),
        file: Some(video_file(name)),
        prompt: prompt.to_string(),
        orientation: orientation.to_string(),
        enhance_prompt: None,
    }
}

pub fn batch_request(prompts: &[&str], orientation: &str) -> BatchRequest {
    BatchRequest {
        model: SUPPORTED_MODEL.to_string(),
        file: Some(video_file("clip.mp4")),
        prompts: Some(prompts.iter().map(|p| p.to_string()).collect()),
        orientation: orientation.to_string(),
        enhance_prompt: None,
    }
}
