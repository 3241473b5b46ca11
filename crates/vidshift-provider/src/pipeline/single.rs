use vidshift_core::models::{SingleOutput, SingleRequest, OUTPUT_FORMAT};
use vidshift_core::validation::parse_orientation;
use vidshift_core::ProviderError;
use vidshift_storage::OutputKind;

use super::{require_file, PipelineContext};

/// Transform one video with one prompt.
///
/// Any failure (fetch, upstream, storage) ends the job; nothing is retried.
pub async fn run_single(
    ctx: PipelineContext<'_>,
    request: &SingleRequest,
) -> Result<SingleOutput, ProviderError> {
    let orientation = parse_orientation(&request.orientation)?;
    let dimensions = orientation.dimensions();
    let file = require_file(request.file.as_ref())?;
    let prompt = request.prompt.trim();

    tracing::info!(
        file_name = %file.name,
        orientation = %orientation,
        width = dimensions.width,
        height = dimensions.height,
        "Starting single video transformation"
    );

    let video = ctx
        .source
        .fetch(file)
        .await
        .map_err(|e| ProviderError::Source(e.to_string()))?;

    let transformed = ctx
        .client
        .transform(ctx.api_key, video, prompt, request.enhance_prompt)
        .await?;

    let stored = ctx
        .outputs
        .store(&transformed, OutputKind::Single)
        .await
        .map_err(|e| ProviderError::Output(e.to_string()))?;

    tracing::info!(
        output_name = %stored.output_name,
        location = %stored.location,
        "Single video transformation completed"
    );

    Ok(SingleOutput {
        location: stored.location,
        output_name: stored.output_name,
        format: OUTPUT_FORMAT.to_string(),
        width: dimensions.width,
        height: dimensions.height,
        prompt: prompt.to_string(),
        orientation,
    })
}
