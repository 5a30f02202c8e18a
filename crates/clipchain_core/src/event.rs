//! Progress events emitted by a pipeline run.

use crate::RunId;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A discrete stage transition in a pipeline run.
///
/// Scene indices are zero-based, matching script order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_more::Display)]
#[serde(tag = "event", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum PipelineEvent {
    /// The run was accepted
    #[display("Run {} started", run_id)]
    RunStarted {
        /// Run identifier
        run_id: RunId,
    },
    /// Scene scripts are available
    #[display("Scripts ready ({} scenes)", scenes.len())]
    ScriptsReady {
        /// Scripts in story order
        scenes: Vec<String>,
    },
    /// Scene scripts were rewritten by the prompt optimizer
    #[display("Scripts optimized ({} failed)", failures)]
    ScriptsOptimized {
        /// Optimized scripts in story order
        scenes: Vec<String>,
        /// Number of scenes that kept their original text
        failures: usize,
    },
    /// A clip request was submitted
    #[display("Scene {} of {} generating", index + 1, total)]
    SceneGenerating {
        /// Zero-based scene index
        index: usize,
        /// Number of scenes
        total: usize,
    },
    /// A clip was downloaded
    #[display("Scene {} of {} complete ({:.1}%)", index + 1, total, percent)]
    SceneComplete {
        /// Zero-based scene index
        index: usize,
        /// Number of scenes
        total: usize,
        /// Local clip path
        path: PathBuf,
        /// Share of scenes finished
        percent: f64,
    },
    /// The final video was written
    #[display("Concatenation complete: {}", output.display())]
    ConcatenationComplete {
        /// Final video path
        output: PathBuf,
    },
    /// The run finished successfully
    #[display("Run {} complete", run_id)]
    RunComplete {
        /// Run identifier
        run_id: RunId,
        /// Final video path
        output: PathBuf,
    },
    /// The run stopped on an error
    #[display("Run {} failed: {}", run_id, message)]
    RunFailed {
        /// Run identifier
        run_id: RunId,
        /// Error message
        message: String,
    },
}

impl PipelineEvent {
    /// Whether this is the last event of a run.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::RunComplete { .. } | Self::RunFailed { .. })
    }
}
