use serde::{Deserialize, Serialize};

use super::request::Orientation;

/// Container format of everything the upstream model returns.
pub const OUTPUT_FORMAT: &str = "mp4";

/// Descriptor of one transformed video.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SingleOutput {
    /// Where the result can be fetched from (preview location)
    pub location: String,
    /// Sequential output file name, e.g. `output_007.mp4`
    pub output_name: String,
    pub format: String,
    pub width: u32,
    pub height: u32,
    pub prompt: String,
    pub orientation: Orientation,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BatchItemOutcome {
    Success {
        location: String,
        output_name: String,
    },
    Failure {
        reason: String,
    },
}

/// Result of one prompt within a batch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchItemResult {
    /// 1-based position of the prompt in the submitted list
    pub row: usize,
    pub prompt: String,
    #[serde(flatten)]
    pub outcome: BatchItemOutcome,
}

impl BatchItemResult {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, BatchItemOutcome::Success { .. })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchOutput {
    pub total_processed: usize,
    pub success_count: usize,
    pub failure_count: usize,
    pub width: u32,
    pub height: u32,
    pub orientation: Orientation,
    pub results: Vec<BatchItemResult>,
}

impl BatchOutput {
    /// Tallies the per-item outcomes. Results keep the order they were given in.
    pub fn from_results(results: Vec<BatchItemResult>, orientation: Orientation) -> Self {
        let success_count = results.iter().filter(|r| r.is_success()).count();
        let dimensions = orientation.dimensions();
        Self {
            total_processed: results.len(),
            success_count,
            failure_count: results.len() - success_count,
            width: dimensions.width,
            height: dimensions.height,
            orientation,
            results,
        }
    }

    /// True when at least one prompt ran and none succeeded.
    ///
    /// The batch itself still completes as `succeeded`; this is for callers
    /// that want to surface total failure differently.
    pub fn all_failed(&self) -> bool {
        self.total_processed > 0 && self.success_count == 0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransformOutput {
    Single(SingleOutput),
    Batch(BatchOutput),
}
