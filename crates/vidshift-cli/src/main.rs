//! Vidshift CLI: submit videos to the lucy-pro-v2v provider.
//!
//! Reads DECART_API_KEY (and the optional DECART_* / VIDSHIFT_* settings)
//! from the environment or a `.env` file. Results are printed as JSON.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

use vidshift_cli::{file_reference_from_path, init_tracing, truncate_string};
use vidshift_core::models::{BatchRequest, SingleRequest, TransformOutcome, TransformRequest, SUPPORTED_MODEL};
use vidshift_core::ProviderConfig;
use vidshift_provider::{LucyProvider, ProviderRegistry, LUCY_PROVIDER_NAME};

#[derive(Parser)]
#[command(name = "vidshift", about = "Video-to-video transformation CLI")]
struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct VideoArgs {
    /// Path to the source video
    #[arg(long)]
    video: PathBuf,
    /// landscape (1280x704) or portrait (704x1280)
    #[arg(long, default_value = "landscape")]
    orientation: String,
    /// Ask the upstream model to rewrite the prompt
    #[arg(long)]
    enhance_prompt: Option<bool>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show whether the provider is configured
    Check,
    /// List registered providers
    Providers,
    /// Validate a single-video request and print the issued job
    Submit {
        #[command(flatten)]
        video: VideoArgs,
        /// Transformation prompt
        #[arg(long)]
        prompt: String,
    },
    /// Transform one video with one prompt
    Run {
        #[command(flatten)]
        video: VideoArgs,
        /// Transformation prompt
        #[arg(long)]
        prompt: String,
    },
    /// Apply several prompts to the same video
    Batch {
        #[command(flatten)]
        video: VideoArgs,
        /// Transformation prompt; repeat for each output
        #[arg(long = "prompt", required = true)]
        prompts: Vec<String>,
    },
}

#[derive(Serialize)]
struct CheckReport {
    configured: bool,
    api_key: String,
    api_url: String,
    timeout_secs: u64,
    output_dir: String,
    preview_dir: String,
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

fn single_request(video: VideoArgs, prompt: String) -> anyhow::Result<TransformRequest> {
    Ok(TransformRequest::Single(SingleRequest {
        model: SUPPORTED_MODEL.to_string(),
        file: Some(file_reference_from_path(&video.video)?),
        prompt,
        orientation: video.orientation,
        enhance_prompt: video.enhance_prompt,
    }))
}

fn batch_request(video: VideoArgs, prompts: Vec<String>) -> anyhow::Result<TransformRequest> {
    Ok(TransformRequest::Batch(BatchRequest {
        model: SUPPORTED_MODEL.to_string(),
        file: Some(file_reference_from_path(&video.video)?),
        prompts: Some(prompts),
        orientation: video.orientation,
        enhance_prompt: video.enhance_prompt,
    }))
}

async fn build_registry(config: ProviderConfig) -> anyhow::Result<ProviderRegistry> {
    let provider = LucyProvider::from_config(config)
        .await
        .context("Failed to initialize lucy provider")?;

    let registry = ProviderRegistry::new();
    registry
        .register(Arc::new(provider), LucyProvider::info())
        .await?;
    Ok(registry)
}

/// Submit then poll to completion.
async fn submit_and_wait(
    registry: &ProviderRegistry,
    request: &TransformRequest,
) -> anyhow::Result<TransformOutcome> {
    let provider = registry.get(LUCY_PROVIDER_NAME).await?;
    let job = provider.submit(request)?;

    if let TransformRequest::Single(single) = request {
        tracing::info!(
            handle = %job.handle,
            prompt = %truncate_string(single.prompt.trim(), 60),
            "Job submitted"
        );
    } else {
        tracing::info!(handle = %job.handle, "Job submitted");
    }

    Ok(registry.poll(&job.handle, Some(request)).await)
}

fn finish(outcome: TransformOutcome) -> anyhow::Result<()> {
    print_json(&outcome)?;
    if let TransformOutcome::Failed { error } = outcome {
        anyhow::bail!("Transformation failed: {}", error);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let config = ProviderConfig::from_env().context("Invalid provider configuration")?;

    match cli.command {
        Commands::Check => {
            print_json(&CheckReport {
                configured: config.is_configured(),
                api_key: config.redacted_api_key(),
                api_url: config.api_url.clone(),
                timeout_secs: config.timeout_secs,
                output_dir: config.output_dir.clone(),
                preview_dir: config.preview_dir.clone(),
            })?;
        }
        Commands::Providers => {
            let registry = build_registry(config).await?;
            print_json(&registry.list().await?)?;
        }
        Commands::Submit { video, prompt } => {
            let registry = build_registry(config).await?;
            let provider = registry.get(LUCY_PROVIDER_NAME).await?;
            let job = provider.submit(&single_request(video, prompt)?)?;
            print_json(&job)?;
        }
        Commands::Run { video, prompt } => {
            let registry = build_registry(config).await?;
            let request = single_request(video, prompt)?;
            finish(submit_and_wait(&registry, &request).await?)?;
        }
        Commands::Batch { video, prompts } => {
            let registry = build_registry(config).await?;
            let request = batch_request(video, prompts)?;
            finish(submit_and_wait(&registry, &request).await?)?;
        }
    }

    Ok(())
}
