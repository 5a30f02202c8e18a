//! clipchain CLI binary.
//!
//! - Serve the HTTP API
//! - Run the whole pipeline from the terminal
//! - Inspect scripts, models, costs and media files

use anyhow::Result;
use clap::Parser;
use clipchain::{ClipchainConfig, LogConfig, init_logging, shutdown_logging};
use cli::{
    Cli, Commands, print_cost, print_models, print_probe, print_scripts, run_story, serve,
};

mod cli;

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(&LogConfig::new(cli.verbose, cli.json_logs))
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    let config = match &cli.config {
        Some(path) => ClipchainConfig::load_file(path)?,
        None => ClipchainConfig::load()?,
    };

    let outcome = dispatch(cli.command, config).await;
    shutdown_logging();
    outcome
}

async fn dispatch(command: Commands, config: ClipchainConfig) -> Result<()> {
    match command {
        Commands::Serve { host, port } => serve(config, host, port).await?,
        Commands::Run {
            character,
            prompt,
            optimize_with,
            keep_temp,
        } => run_story(&config, character, prompt, optimize_with, keep_temp).await?,
        Commands::Scripts { character, prompt } => {
            print_scripts(&config, &character, &prompt).await?
        }
        Commands::Models => print_models(),
        Commands::Probe { file } => print_probe(&config, &file).await?,
        Commands::Cost {
            clips,
            prompts_only,
        } => print_cost(&config, clips, prompts_only)?,
    }

    Ok(())
}
