//! End-to-end story runs: scripts, optional optimization, clips, final video.

use crate::ClipchainConfig;
use clipchain_core::{CharacterCatalog, ModelCatalog, PipelineEvent, PricingPolicy, RunId};
use clipchain_error::{
    ClipchainResult, StorageError, StorageErrorKind, VideoError, VideoErrorKind,
};
use clipchain_interface::{TextDriver, VideoBackend};
use clipchain_models::{ChatCompletionClient, FalVideoClient};
use clipchain_optimizer::{PromptOptimizer, StyleGuide};
use clipchain_script::ScriptGenerator;
use clipchain_video::{Concatenator, EventSender, VideoGenerator, cleanup, emit, validate_files};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};
use tokio::task::JoinHandle;
use tracing::{error, info, instrument, warn};

/// What to make a video about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryRequest {
    /// Preset key or free-form character description
    pub character: String,
    /// Story premise
    pub prompt: String,
    /// Rewrite scripts with this optimizer model before generating clips
    #[serde(default)]
    pub optimize_model: Option<String>,
}

impl StoryRequest {
    /// A request without optimization.
    pub fn new(character: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            character: character.into(),
            prompt: prompt.into(),
            optimize_model: None,
        }
    }

    /// Optimize scripts with `model` first.
    pub fn with_optimize_model(mut self, model: impl Into<String>) -> Self {
        self.optimize_model = Some(model.into());
        self
    }
}

/// Result of a finished run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryOutput {
    /// Run identifier
    pub run_id: RunId,
    /// Scripts the clips were generated from
    pub scripts: Vec<String>,
    /// Final video
    pub output: PathBuf,
}

/// Runs the story stages in order and reports progress as
/// [`PipelineEvent`]s.
#[derive(Clone, derive_getters::Getters)]
pub struct Pipeline {
    /// Script stage
    scripts: ScriptGenerator,
    /// Optimization stage
    optimizer: PromptOptimizer,
    /// Clip stage
    videos: VideoGenerator,
    /// Assembly stage
    concatenator: Concatenator,
    /// Cost model
    pricing: PricingPolicy,
    /// Delete clips after assembly
    cleanup_temp: bool,
}

impl Pipeline {
    /// Assemble a pipeline from its stages.
    pub fn new(
        scripts: ScriptGenerator,
        optimizer: PromptOptimizer,
        videos: VideoGenerator,
        concatenator: Concatenator,
    ) -> Self {
        let pricing = *videos.pricing();
        Self {
            scripts,
            optimizer,
            videos,
            concatenator,
            pricing,
            cleanup_temp: true,
        }
    }

    /// Keep or delete scene clips after assembly.
    pub fn with_cleanup(mut self, cleanup_temp: bool) -> Self {
        self.cleanup_temp = cleanup_temp;
        self
    }

    /// Build every stage from configuration, using the real providers.
    #[instrument(skip(config))]
    pub fn from_config(config: &ClipchainConfig) -> ClipchainResult<Self> {
        let characters = match &config.paths.characters {
            Some(path) => CharacterCatalog::load(path)?,
            None => CharacterCatalog::bundled()?,
        };

        let script_driver: Arc<dyn TextDriver> = Arc::new(
            ChatCompletionClient::new("openai", &config.scripts.base_url, &config.scripts.model)
                .with_api_key_env(&config.scripts.api_key_env),
        );
        let scripts = ScriptGenerator::new(script_driver, characters).with_sampling(
            Some(config.scripts.temperature),
            Some(config.scripts.max_tokens),
        );

        let opt = &config.optimizer;
        let mut optimizer_client =
            ChatCompletionClient::new("openrouter", &opt.base_url, &opt.default_model)
                .with_api_key_env(&opt.api_key_env);
        if let Some(referer) = &opt.referer {
            optimizer_client = optimizer_client.with_header("HTTP-Referer", referer);
        }
        if let Some(title) = &opt.title {
            optimizer_client = optimizer_client.with_header("X-Title", title);
        }
        let optimizer = PromptOptimizer::new(
            Arc::new(optimizer_client),
            StyleGuide::from_path(&config.paths.style_guide),
            ModelCatalog::openrouter(),
            &opt.default_model,
        )
        .with_batch_delay(opt.batch_delay())
        .with_sampling(Some(opt.temperature), Some(opt.max_tokens));

        let backend: Arc<dyn VideoBackend> = Arc::new(
            FalVideoClient::new(&config.video.queue_base_url, &config.video.endpoint)
                .with_api_key_env(&config.video.api_key_env)
                .with_timing(config.video.poll_interval(), config.video.max_wait()),
        );
        let videos = VideoGenerator::new(backend, &config.paths.temp_dir)
            .with_aspect_ratio(&config.video.aspect_ratio)
            .with_pricing(config.pricing);

        let concatenator = Concatenator::new(config.encoder.clone(), &config.paths.output_dir);

        info!(
            temp_dir = %config.paths.temp_dir.display(),
            output_dir = %config.paths.output_dir.display(),
            "Pipeline configured"
        );
        Ok(Self::new(scripts, optimizer, videos, concatenator)
            .with_cleanup(config.pipeline.cleanup_temp))
    }

    /// Run a story under a fresh [`RunId`].
    pub async fn run(
        &self,
        req: &StoryRequest,
        events: Option<&EventSender>,
    ) -> ClipchainResult<StoryOutput> {
        self.run_as(RunId::new(), req, events).await
    }

    /// Run a story under a caller-chosen id.
    ///
    /// Every run ends with exactly one `RunComplete` or `RunFailed` event.
    #[instrument(
        skip(self, req, events),
        fields(run = %run_id.short(), character = %req.character)
    )]
    pub async fn run_as(
        &self,
        run_id: RunId,
        req: &StoryRequest,
        events: Option<&EventSender>,
    ) -> ClipchainResult<StoryOutput> {
        emit(events, PipelineEvent::RunStarted { run_id });
        match self.execute(run_id, req, events).await {
            Ok(output) => {
                info!(output = %output.output.display(), "Run complete");
                emit(
                    events,
                    PipelineEvent::RunComplete {
                        run_id,
                        output: output.output.clone(),
                    },
                );
                Ok(output)
            }
            Err(e) => {
                error!(error = %e, "Run failed");
                emit(
                    events,
                    PipelineEvent::RunFailed {
                        run_id,
                        message: e.detail(),
                    },
                );
                Err(e)
            }
        }
    }

    /// Start a run on the runtime and hand back its event stream.
    pub fn spawn(
        self: Arc<Self>,
        req: StoryRequest,
    ) -> (
        RunId,
        UnboundedReceiver<PipelineEvent>,
        JoinHandle<ClipchainResult<StoryOutput>>,
    ) {
        let run_id = RunId::new();
        let (tx, rx) = unbounded_channel();
        let handle = tokio::spawn(async move { self.run_as(run_id, &req, Some(&tx)).await });
        (run_id, rx, handle)
    }

    async fn execute(
        &self,
        run_id: RunId,
        req: &StoryRequest,
        events: Option<&EventSender>,
    ) -> ClipchainResult<StoryOutput> {
        let mut scripts = self
            .scripts
            .generate(&req.character, &req.prompt)
            .await?
            .into_inner();
        emit(
            events,
            PipelineEvent::ScriptsReady {
                scenes: scripts.clone(),
            },
        );

        if let Some(model) = req.optimize_model.as_deref() {
            let results = self
                .optimizer
                .optimize_many(&scripts, &req.character, Some(model))
                .await;
            let failures = results.iter().filter(|r| !r.is_ok()).count();
            if failures > 0 {
                warn!(failures, "Some scripts kept their original text");
            }
            scripts = results.into_iter().map(|r| r.optimized).collect();
            emit(
                events,
                PipelineEvent::ScriptsOptimized {
                    scenes: scripts.clone(),
                    failures,
                },
            );
        }

        let output = self
            .render(run_id, &scripts, &req.character, events)
            .await?;
        Ok(StoryOutput {
            run_id,
            scripts,
            output,
        })
    }

    /// Generate clips for `scripts`, join them, and clean up.
    ///
    /// Clip generation stops at the first failed scene; nothing is
    /// concatenated in that case.
    #[instrument(
        skip(self, scripts, events),
        fields(run = %run_id.short(), scenes = scripts.len())
    )]
    pub async fn render(
        &self,
        run_id: RunId,
        scripts: &[String],
        character: &str,
        events: Option<&EventSender>,
    ) -> ClipchainResult<PathBuf> {
        let clips = self
            .videos
            .generate_all(&run_id, scripts, character, events)
            .await?;

        if clips.len() != scripts.len() {
            return Err(VideoError::new(VideoErrorKind::ClipCountMismatch {
                expected: scripts.len(),
                actual: clips.len(),
            })
            .into());
        }
        if !validate_files(&clips).await {
            return Err(StorageError::new(StorageErrorKind::FileRead(
                "Generated clips failed validation".to_string(),
            ))
            .into());
        }

        let output = self.concatenator.concatenate(&clips, character).await?;
        emit(
            events,
            PipelineEvent::ConcatenationComplete {
                output: output.clone(),
            },
        );

        if self.cleanup_temp {
            cleanup(&clips).await;
            self.videos.remove_run_dir(&run_id).await;
        }
        Ok(output)
    }
}
