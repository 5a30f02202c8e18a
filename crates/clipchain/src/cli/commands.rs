//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// clipchain - turn a character and a story prompt into a short video
#[derive(Parser, Debug)]
#[command(name = "clipchain")]
#[command(about = "Turn a character and a story prompt into a short video", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Configuration file layered over the bundled defaults
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Bind address (overrides configuration)
        #[arg(long)]
        host: Option<String>,

        /// Port (overrides configuration)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Generate a complete story video
    Run {
        /// Preset key or character description
        #[arg(long)]
        character: String,

        /// Story premise
        #[arg(long)]
        prompt: String,

        /// Optimize scripts with this model before generating clips
        #[arg(long, value_name = "MODEL")]
        optimize_with: Option<String>,

        /// Keep scene clips after concatenation
        #[arg(long)]
        keep_temp: bool,
    },

    /// Generate scene scripts only
    Scripts {
        /// Preset key or character description
        #[arg(long)]
        character: String,

        /// Story premise
        #[arg(long)]
        prompt: String,
    },

    /// List prompt optimizer models
    Models,

    /// Show media information for a video file
    Probe {
        /// File to inspect
        file: PathBuf,
    },

    /// Estimate video generation cost
    Cost {
        /// Number of clips
        #[arg(long, default_value = "3")]
        clips: usize,

        /// Scripts only, no video generation
        #[arg(long)]
        prompts_only: bool,
    },
}
