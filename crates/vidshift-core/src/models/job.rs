use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

use super::output::TransformOutput;
use super::request::RequestKind;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Running,
    Succeeded,
    Failed,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Succeeded | JobStatus::Failed)
    }
}

impl Display for JobStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            JobStatus::Pending => write!(f, "pending"),
            JobStatus::Running => write!(f, "running"),
            JobStatus::Succeeded => write!(f, "succeeded"),
            JobStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Handle returned by a successful submission.
///
/// Nothing here is persisted by the provider: the caller keeps the handle and
/// hands it back, together with the original request, on every poll.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Job {
    pub handle: String,
    pub kind: RequestKind,
    pub status: JobStatus,
    pub submitted_at: DateTime<Utc>,
}

/// Result of polling a job.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TransformOutcome {
    Running,
    Succeeded { output: TransformOutput },
    Failed { error: String },
}

impl TransformOutcome {
    pub fn failed(error: impl Into<String>) -> Self {
        TransformOutcome::Failed {
            error: error.into(),
        }
    }

    pub fn status(&self) -> JobStatus {
        match self {
            TransformOutcome::Running => JobStatus::Running,
            TransformOutcome::Succeeded { .. } => JobStatus::Succeeded,
            TransformOutcome::Failed { .. } => JobStatus::Failed,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status().is_terminal()
    }
}
