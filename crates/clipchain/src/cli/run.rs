//! Handlers for one-shot commands.

use anyhow::{Context, Result};
use clipchain::{ClipchainConfig, ModelCatalog, Pipeline, StoryRequest, probe};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Generate a full story video, printing progress as it happens.
pub async fn run_story(
    config: &ClipchainConfig,
    character: String,
    prompt: String,
    optimize_with: Option<String>,
    keep_temp: bool,
) -> Result<()> {
    let pipeline = Pipeline::from_config(config)?.with_cleanup(!keep_temp);
    let estimate = pipeline.pricing().estimate(clipchain::SCENE_COUNT, false);
    println!(
        "Estimated cost: ${:.2} ({} clips at ${:.2})",
        estimate.total, estimate.clips, estimate.cost_per_clip
    );

    let mut req = StoryRequest::new(character, prompt);
    if let Some(model) = optimize_with {
        req = req.with_optimize_model(model);
    }

    let (run_id, mut events, handle) = Arc::new(pipeline).spawn(req);
    info!(run = %run_id, "Run started");
    while let Some(event) = events.recv().await {
        println!("{}", event);
    }

    let output = handle.await.context("Run task panicked")??;
    println!("\nFinal video: {}", output.output.display());
    Ok(())
}

/// Print three scene scripts.
pub async fn print_scripts(config: &ClipchainConfig, character: &str, prompt: &str) -> Result<()> {
    let pipeline = Pipeline::from_config(config)?;
    let draft = pipeline.scripts().draft(character, prompt).await?;
    println!("Source: {:?}\n", draft.source);
    for (i, script) in draft.scripts.iter().enumerate() {
        println!("Scene {}:\n{}\n", i + 1, script);
    }
    Ok(())
}

/// Print the model catalogue.
pub fn print_models() {
    let catalog = ModelCatalog::openrouter();
    for model in catalog.models() {
        let vision = if model.supports_vision { " [vision]" } else { "" };
        println!("{}{}\n  {} - {}", model.id, vision, model.name, model.description);
    }
}

/// Print probe output as JSON.
pub async fn print_probe(config: &ClipchainConfig, file: &Path) -> Result<()> {
    let info = probe(config.encoder.ffprobe(), file).await?;
    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}

/// Print a cost estimate as JSON.
pub fn print_cost(config: &ClipchainConfig, clips: usize, prompts_only: bool) -> Result<()> {
    let estimate = config.pricing.estimate(clips, prompts_only);
    println!("{}", serde_json::to_string_pretty(&estimate)?);
    Ok(())
}
