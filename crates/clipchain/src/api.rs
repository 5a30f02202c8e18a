//! HTTP API over the pipeline stages.
//!
//! Every failure is answered as `{"error": <summary>, "details": <message>}`,
//! with 400 for invalid input and 500 otherwise.

use crate::Pipeline;
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use clipchain_core::{MediaSource, RunId, SystemPromptMode};
use clipchain_error::ClipchainError;
use clipchain_optimizer::OptimizeRequest;
use serde::Deserialize;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir};
use tracing::{error, info};

/// Shared handler state.
#[derive(Clone)]
pub struct ApiState {
    pipeline: Arc<Pipeline>,
}

impl ApiState {
    /// Create state around a pipeline.
    pub fn new(pipeline: Arc<Pipeline>) -> Self {
        Self { pipeline }
    }
}

/// Error response carrying a short summary and the underlying message.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    summary: String,
    details: Option<String>,
}

impl ApiError {
    /// A 400 with no underlying error.
    pub fn bad_request(summary: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            summary: summary.into(),
            details: None,
        }
    }

    /// Classify a pipeline error under `summary`.
    pub fn from_error(summary: impl Into<String>, err: ClipchainError) -> Self {
        let status = if err.is_validation() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        Self {
            status,
            summary: summary.into(),
            details: Some(err.detail()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(
                status = %self.status,
                summary = %self.summary,
                details = ?self.details,
                "Request failed"
            );
        }
        let body = match self.details {
            Some(details) => json!({ "error": self.summary, "details": details }),
            None => json!({ "error": self.summary }),
        };
        (self.status, Json(body)).into_response()
    }
}

type ApiResult = Result<Response, ApiError>;

/// Build the router: `/api/*` endpoints plus static `/output`.
pub fn create_router(state: ApiState, output_dir: impl Into<PathBuf>) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/openrouter-models", get(list_models))
        .route("/api/original-system-prompt", get(original_system_prompt))
        .route("/api/generate-scripts", post(generate_scripts))
        .route("/api/generate-videos", post(generate_videos))
        .route("/api/optimize-prompt", post(optimize_prompt))
        .route("/api/optimize-scene-prompts", post(optimize_scene_prompts))
        .route("/api/prompt-suggestions", post(prompt_suggestions))
        .route("/api/generate-from-image", post(generate_from_image))
        .nest_service("/output", ServeDir::new(output_dir.into()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "OK",
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
}

async fn list_models(State(state): State<ApiState>) -> impl IntoResponse {
    let models = state.pipeline.optimizer().catalog().models();
    Json(json!({ "success": true, "models": models }))
}

async fn original_system_prompt(State(state): State<ApiState>) -> ApiResult {
    let text = state
        .pipeline
        .optimizer()
        .original_system_prompt()
        .await
        .map_err(|e| ApiError::from_error("Failed to load system prompt", e))?;
    Ok(Json(json!({ "success": true, "systemPrompt": text })).into_response())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScriptsBody {
    #[serde(default)]
    character: String,
    #[serde(default)]
    prompt: String,
    #[serde(default)]
    prompts_only: bool,
}

async fn generate_scripts(
    State(state): State<ApiState>,
    Json(body): Json<ScriptsBody>,
) -> ApiResult {
    if body.character.trim().is_empty() || body.prompt.trim().is_empty() {
        return Err(ApiError::bad_request("Character and prompt are required"));
    }
    info!(character = %body.character, prompts_only = body.prompts_only, "Generating scripts");

    let scripts = state
        .pipeline
        .scripts()
        .generate(&body.character, &body.prompt)
        .await
        .map_err(|e| ApiError::from_error("Failed to generate scripts", e))?;
    let estimate = state
        .pipeline
        .pricing()
        .estimate(scripts.len(), body.prompts_only);

    Ok(Json(json!({
        "success": true,
        "scripts": scripts,
        "estimatedCost": estimate.total,
        "promptsOnly": body.prompts_only,
    }))
    .into_response())
}

#[derive(Debug, Deserialize)]
struct VideosBody {
    #[serde(default)]
    scripts: Vec<String>,
    #[serde(default)]
    character: String,
}

async fn generate_videos(
    State(state): State<ApiState>,
    Json(body): Json<VideosBody>,
) -> ApiResult {
    if body.scripts.is_empty() {
        return Err(ApiError::bad_request("Valid scripts array is required"));
    }
    let run_id = RunId::new();
    info!(
        run = %run_id.short(),
        scenes = body.scripts.len(),
        character = %body.character,
        "Generating videos"
    );

    let output = state
        .pipeline
        .render(run_id, &body.scripts, &body.character, None)
        .await
        .map_err(|e| ApiError::from_error("Failed to generate videos", e))?;

    Ok(Json(json!({
        "success": true,
        "runId": run_id,
        "videoPath": output,
        "message": "Video generation completed successfully",
    }))
    .into_response())
}

/// Body shared by the optimizer endpoints.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct OptimizeBody {
    prompt: String,
    character: String,
    context: String,
    model: Option<String>,
    image: Option<String>,
    system_prompt_mode: SystemPromptMode,
    system_prompt: Option<String>,
}

impl From<OptimizeBody> for OptimizeRequest {
    fn from(body: OptimizeBody) -> Self {
        OptimizeRequest {
            prompt: body.prompt,
            character: body.character,
            context: body.context,
            model: body.model.filter(|m| !m.is_empty()),
            image: body.image.filter(|i| !i.is_empty()).map(MediaSource::from),
            custom_system_prompt: body.system_prompt,
            mode: body.system_prompt_mode,
        }
    }
}

async fn optimize_prompt(
    State(state): State<ApiState>,
    Json(body): Json<OptimizeBody>,
) -> ApiResult {
    let result = state
        .pipeline
        .optimizer()
        .optimize(&body.into())
        .await
        .map_err(|e| ApiError::from_error("Failed to optimize prompt", e))?;
    Ok(Json(json!({ "success": true, "result": result })).into_response())
}

async fn prompt_suggestions(
    State(state): State<ApiState>,
    Json(body): Json<OptimizeBody>,
) -> ApiResult {
    let result = state
        .pipeline
        .optimizer()
        .suggest(&body.into())
        .await
        .map_err(|e| ApiError::from_error("Failed to get suggestions", e))?;
    Ok(Json(json!({ "success": true, "result": result })).into_response())
}

async fn generate_from_image(
    State(state): State<ApiState>,
    Json(body): Json<OptimizeBody>,
) -> ApiResult {
    let result = state
        .pipeline
        .optimizer()
        .generate_from_image(&body.into())
        .await
        .map_err(|e| ApiError::from_error("Failed to generate prompt from image", e))?;
    Ok(Json(json!({ "success": true, "result": result })).into_response())
}

#[derive(Debug, Deserialize)]
struct ScenePromptsBody {
    #[serde(default)]
    prompts: Vec<String>,
    #[serde(default)]
    character: String,
    #[serde(default)]
    model: Option<String>,
}

async fn optimize_scene_prompts(
    State(state): State<ApiState>,
    Json(body): Json<ScenePromptsBody>,
) -> ApiResult {
    if body.prompts.is_empty() {
        return Err(ApiError::bad_request("Valid prompts array is required"));
    }
    let results = state
        .pipeline
        .optimizer()
        .optimize_many(&body.prompts, &body.character, body.model.as_deref())
        .await;
    Ok(Json(json!({ "success": true, "results": results })).into_response())
}
