use bytes::Bytes;
use vidshift_core::models::{BatchItemOutcome, BatchItemResult, BatchOutput, BatchRequest};
use vidshift_core::validation::parse_orientation;
use vidshift_core::ProviderError;
use vidshift_storage::{OutputKind, StoredOutput};

use super::{require_file, PipelineContext};

const EMPTY_PROMPT_REASON: &str = "Empty prompt";

/// Apply every prompt, in order, to one shared video.
///
/// The source video is fetched once. Each prompt's failure is recorded in its
/// own result and never stops the remaining prompts. Only a failure to fetch
/// the shared video fails the batch as a whole.
pub async fn run_batch(
    ctx: PipelineContext<'_>,
    request: &BatchRequest,
) -> Result<BatchOutput, ProviderError> {
    let orientation = parse_orientation(&request.orientation)?;
    let file = require_file(request.file.as_ref())?;
    let prompts = request.prompts.as_deref().unwrap_or_default();

    tracing::info!(
        file_name = %file.name,
        orientation = %orientation,
        prompt_count = prompts.len(),
        "Starting batch video transformation"
    );

    let video = ctx
        .source
        .fetch(file)
        .await
        .map_err(|e| ProviderError::Source(e.to_string()))?;

    let mut results = Vec::with_capacity(prompts.len());
    for (index, raw_prompt) in prompts.iter().enumerate() {
        let row = index + 1;
        let prompt = raw_prompt.trim();

        let outcome = if prompt.is_empty() {
            BatchItemOutcome::Failure {
                reason: EMPTY_PROMPT_REASON.to_string(),
            }
        } else {
            match process_item(ctx, video.clone(), prompt, request.enhance_prompt).await {
                Ok(stored) => {
                    tracing::info!(
                        row,
                        output_name = %stored.output_name,
                        "Batch item completed"
                    );
                    BatchItemOutcome::Success {
                        location: stored.location,
                        output_name: stored.output_name,
                    }
                }
                Err(e) => {
                    tracing::warn!(row, error = %e, "Batch item failed");
                    BatchItemOutcome::Failure {
                        reason: e.to_string(),
                    }
                }
            }
        };

        results.push(BatchItemResult {
            row,
            prompt: prompt.to_string(),
            outcome,
        });
    }

    let output = BatchOutput::from_results(results, orientation);

    tracing::info!(
        total = output.total_processed,
        succeeded = output.success_count,
        failed = output.failure_count,
        "Batch video transformation finished"
    );

    Ok(output)
}

async fn process_item(
    ctx: PipelineContext<'_>,
    video: Bytes,
    prompt: &str,
    enhance_prompt: Option<bool>,
) -> Result<StoredOutput, ProviderError> {
    let transformed = ctx
        .client
        .transform(ctx.api_key, video, prompt, enhance_prompt)
        .await?;

    ctx.outputs
        .store(&transformed, OutputKind::BatchItem)
        .await
        .map_err(|e| ProviderError::Output(e.to_string()))
}
