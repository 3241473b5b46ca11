use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Model tag accepted by the upstream video-to-video endpoint.
pub const SUPPORTED_MODEL: &str = "lucy-pro-v2v";

/// Reference to the source video supplied by the caller.
///
/// At least one of `url` or `path` must be set for the video to be fetchable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FileReference {
    /// Local filesystem path to the video
    #[serde(default)]
    pub path: Option<String>,
    /// Remote URL the video can be downloaded from (preferred over `path`)
    #[serde(default)]
    pub url: Option<String>,
    /// Declared MIME type (informational)
    #[serde(default)]
    pub mime_type: Option<String>,
    /// File size in bytes
    pub size: u64,
    /// Original file name, used for extension checks
    pub name: String,
}

impl FileReference {
    pub fn is_fetchable(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        present(&self.url) || present(&self.path)
    }

    /// Lowercased last dot-segment of the file name, if any.
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.name.rsplit_once('.')?;
        if stem.is_empty() && ext.is_empty() {
            return None;
        }
        Some(ext.to_lowercase())
    }

    pub fn size_mb(&self) -> f64 {
        self.size as f64 / (1024.0 * 1024.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Landscape,
    Portrait,
}

impl Orientation {
    /// Output frame size the upstream model renders for this orientation.
    pub fn dimensions(&self) -> Dimensions {
        match self {
            Orientation::Landscape => Dimensions {
                width: 1280,
                height: 704,
            },
            Orientation::Portrait => Dimensions {
                width: 704,
                height: 1280,
            },
        }
    }
}

impl Display for Orientation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Orientation::Landscape => write!(f, "landscape"),
            Orientation::Portrait => write!(f, "portrait"),
        }
    }
}

impl FromStr for Orientation {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "landscape" => Ok(Orientation::Landscape),
            "portrait" => Ok(Orientation::Portrait),
            _ => Err(anyhow::anyhow!("Invalid orientation: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

fn default_model() -> String {
    SUPPORTED_MODEL.to_string()
}

fn default_orientation() -> String {
    Orientation::Landscape.to_string()
}

/// One video, one prompt.
///
/// `orientation` is kept as the raw caller-supplied string so the validator
/// can reject unknown values with a readable message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SingleRequest {
    #[serde(default = "default_model")]
    pub model: String,
    pub file: Option<FileReference>,
    #[serde(default)]
    pub prompt: String,
    #[serde(default = "default_orientation")]
    pub orientation: String,
    #[serde(default)]
    pub enhance_prompt: Option<bool>,
}

/// One shared video, many prompts. Prompt order determines result order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchRequest {
    #[serde(default = "default_model")]
    pub model: String,
    pub file: Option<FileReference>,
    #[serde(default)]
    pub prompts: Option<Vec<String>>,
    #[serde(default = "default_orientation")]
    pub orientation: String,
    #[serde(default)]
    pub enhance_prompt: Option<bool>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    Single,
    Batch,
}

impl Display for RequestKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            RequestKind::Single => write!(f, "single"),
            RequestKind::Batch => write!(f, "batch"),
        }
    }
}

/// Submission payload, discriminated by an explicit `kind` tag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransformRequest {
    Single(SingleRequest),
    Batch(BatchRequest),
}

impl TransformRequest {
    pub fn kind(&self) -> RequestKind {
        match self {
            TransformRequest::Single(_) => RequestKind::Single,
            TransformRequest::Batch(_) => RequestKind::Batch,
        }
    }

    pub fn file(&self) -> Option<&FileReference> {
        match self {
            TransformRequest::Single(r) => r.file.as_ref(),
            TransformRequest::Batch(r) => r.file.as_ref(),
        }
    }
}
