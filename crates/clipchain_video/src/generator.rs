//! Per-scene clip generation.

use crate::{EventSender, emit};
use clipchain_core::{PipelineEvent, PricingPolicy, RunId};
use clipchain_error::{
    ClipchainError, ClipchainErrorKind, ClipchainResult, ProviderErrorKind, VideoError,
    VideoErrorKind,
};
use clipchain_interface::{VideoBackend, VideoRequest};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Default output aspect ratio.
pub const DEFAULT_ASPECT_RATIO: &str = "16:9";

/// Turns scene scripts into local clip files through a [`VideoBackend`].
///
/// Clips for a run are written under `<temp_dir>/<run_id>/` as
/// `scene_<n>_<millis>.mp4`, with `n` counted from 1.
#[derive(Clone, derive_getters::Getters)]
pub struct VideoGenerator {
    #[getter(skip)]
    backend: Arc<dyn VideoBackend>,
    /// Root for per-run clip directories
    temp_dir: PathBuf,
    /// Aspect ratio sent with every request
    aspect_ratio: String,
    /// Pricing used for cost logging
    pricing: PricingPolicy,
}

impl VideoGenerator {
    /// Create a generator writing clips under `temp_dir`.
    pub fn new(backend: Arc<dyn VideoBackend>, temp_dir: impl Into<PathBuf>) -> Self {
        Self {
            backend,
            temp_dir: temp_dir.into(),
            aspect_ratio: DEFAULT_ASPECT_RATIO.to_string(),
            pricing: PricingPolicy::default(),
        }
    }

    /// Set the aspect ratio.
    pub fn with_aspect_ratio(mut self, aspect_ratio: impl Into<String>) -> Self {
        self.aspect_ratio = aspect_ratio.into();
        self
    }

    /// Set the pricing policy.
    pub fn with_pricing(mut self, pricing: PricingPolicy) -> Self {
        self.pricing = pricing;
        self
    }

    /// Directory holding the clips of one run.
    pub fn run_dir(&self, run_id: &RunId) -> PathBuf {
        self.temp_dir.join(run_id.to_string())
    }

    fn clip_path(&self, run_id: &RunId, index: usize) -> PathBuf {
        let millis = chrono::Utc::now().timestamp_millis();
        self.run_dir(run_id)
            .join(format!("scene_{}_{}.mp4", index + 1, millis))
    }

    /// Generate and download the clip for one scene.
    ///
    /// `index` is zero-based; errors name the scene counted from 1.
    #[instrument(skip(self, script), fields(run = %run_id.short(), scene = index + 1))]
    pub async fn generate(
        &self,
        run_id: &RunId,
        script: &str,
        character: &str,
        index: usize,
    ) -> ClipchainResult<PathBuf> {
        let scene = index + 1;
        info!(character, prompt = %preview(script), "Generating scene clip");

        let request = VideoRequest::builder()
            .prompt(script)
            .aspect_ratio(self.aspect_ratio.as_str())
            .build()
            .map_err(|e| generation_error(scene, e.to_string()))?;

        let video = match self.backend.generate(&request).await {
            Ok(video) => video,
            Err(e) => {
                error!(error = %e, "Scene generation failed");
                return Err(scene_error(scene, e, Stage::Generate));
            }
        };
        debug!(url = %video.url(), request_id = ?video.request_id(), "Clip ready, downloading");

        let path = self.clip_path(run_id, index);
        let bytes = self
            .backend
            .download(video.url(), &path)
            .await
            .map_err(|e| scene_error(scene, e, Stage::Download))?;

        info!(path = %path.display(), bytes, "Scene clip saved");
        Ok(path)
    }

    /// Generate every scene in order, stopping at the first failure.
    ///
    /// Returns one path per script in script order. No scene after a
    /// failed one is attempted.
    #[instrument(skip_all, fields(run = %run_id.short(), scenes = scripts.len()))]
    pub async fn generate_all(
        &self,
        run_id: &RunId,
        scripts: &[String],
        character: &str,
        events: Option<&EventSender>,
    ) -> ClipchainResult<Vec<PathBuf>> {
        if scripts.is_empty() {
            return Err(VideoError::new(VideoErrorKind::EmptyBatch).into());
        }
        let total = scripts.len();
        let estimate = self.pricing.estimate(total, false);
        info!(
            total,
            estimated_usd = estimate.total,
            "Starting clip generation"
        );

        let mut paths = Vec::with_capacity(total);
        for (index, script) in scripts.iter().enumerate() {
            emit(events, PipelineEvent::SceneGenerating { index, total });
            let path = self.generate(run_id, script, character, index).await?;

            let percent = progress_percent(index, total);
            info!(
                scene = index + 1,
                total,
                percent = %format_args!("{:.1}", percent),
                spent_usd = self.pricing.per_clip() * (index + 1) as f64,
                "Scene complete"
            );
            emit(
                events,
                PipelineEvent::SceneComplete {
                    index,
                    total,
                    path: path.clone(),
                    percent,
                },
            );
            paths.push(path);
        }

        info!(total, cost_usd = estimate.total, "All clips generated");
        Ok(paths)
    }

    /// Remove the run directory if it is empty.
    pub async fn remove_run_dir(&self, run_id: &RunId) {
        let dir = self.run_dir(run_id);
        if let Err(e) = tokio::fs::remove_dir(&dir).await {
            warn!(dir = %dir.display(), error = %e, "Run directory not removed");
        }
    }
}

/// Share of scenes finished after scene `index` (zero-based), in percent.
pub fn progress_percent(index: usize, total: usize) -> f64 {
    if total == 0 {
        return 100.0;
    }
    (index + 1) as f64 / total as f64 * 100.0
}

fn preview(script: &str) -> String {
    let head: String = script.chars().take(100).collect();
    if head.len() < script.len() {
        format!("{}...", head)
    } else {
        head
    }
}

#[derive(Clone, Copy)]
enum Stage {
    Generate,
    Download,
}

fn generation_error(scene: usize, message: String) -> ClipchainError {
    VideoError::new(VideoErrorKind::Generation { scene, message }).into()
}

/// Attach the scene number to a backend failure.
fn scene_error(scene: usize, err: ClipchainError, stage: Stage) -> ClipchainError {
    let kind = match (err.kind(), stage) {
        (ClipchainErrorKind::Provider(p), _) => match &p.kind {
            ProviderErrorKind::Validation { details, .. } => {
                for detail in details {
                    warn!(scene, detail = %detail, "Validation detail");
                }
                VideoErrorKind::Validation {
                    scene,
                    details: details.clone(),
                }
            }
            _ => match stage {
                Stage::Generate => VideoErrorKind::Generation {
                    scene,
                    message: err.detail(),
                },
                Stage::Download => VideoErrorKind::Download {
                    scene,
                    message: err.detail(),
                },
            },
        },
        (ClipchainErrorKind::Storage(_), _) => VideoErrorKind::Save {
            scene,
            message: err.detail(),
        },
        (_, Stage::Generate) => VideoErrorKind::Generation {
            scene,
            message: err.detail(),
        },
        (_, Stage::Download) => VideoErrorKind::Download {
            scene,
            message: err.detail(),
        },
    };
    VideoError::new(kind).into()
}
