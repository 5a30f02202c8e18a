//! Style-guided prompt optimization.

use crate::{OptimizeRequest, StyleGuide};
use clipchain_core::{
    GenerateRequest, Message, ModelCatalog, OptimizationResult, Suggestions, SystemPromptMode,
};
use clipchain_error::{ClipchainResult, OptimizerError, OptimizerErrorKind};
use clipchain_interface::TextDriver;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Literal `original` for prompts generated from an image alone.
pub const FROM_IMAGE_ORIGINAL: &str = "[Generated from image]";

/// Delay between batch requests unless configured otherwise.
pub const DEFAULT_BATCH_DELAY: Duration = Duration::from_millis(1000);

/// Rewrites prompts through a text model using the style guide as system
/// context.
#[derive(Clone, derive_getters::Getters)]
pub struct PromptOptimizer {
    #[getter(skip)]
    driver: Arc<dyn TextDriver>,
    /// Selectable models
    catalog: ModelCatalog,
    #[getter(skip)]
    guide: Arc<StyleGuide>,
    /// Model used when a request names none
    default_model: String,
    /// Pause between batch items
    batch_delay: Duration,
    /// Sampling temperature
    temperature: Option<f32>,
    /// Completion limit
    max_tokens: Option<u32>,
}

impl PromptOptimizer {
    /// Create an optimizer.
    pub fn new(
        driver: Arc<dyn TextDriver>,
        guide: StyleGuide,
        catalog: ModelCatalog,
        default_model: impl Into<String>,
    ) -> Self {
        Self {
            driver,
            catalog,
            guide: Arc::new(guide),
            default_model: default_model.into(),
            batch_delay: DEFAULT_BATCH_DELAY,
            temperature: None,
            max_tokens: None,
        }
    }

    /// Set the pause between batch items.
    pub fn with_batch_delay(mut self, delay: Duration) -> Self {
        self.batch_delay = delay;
        self
    }

    /// Sampling settings for every request.
    pub fn with_sampling(mut self, temperature: Option<f32>, max_tokens: Option<u32>) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    /// The unmodified style guide text.
    pub async fn original_system_prompt(&self) -> ClipchainResult<String> {
        Ok(self.guide.text().await?.to_string())
    }

    /// Resolve the system prompt for a mode.
    ///
    /// A blank custom prompt behaves like [`SystemPromptMode::Default`].
    pub async fn system_prompt(
        &self,
        mode: SystemPromptMode,
        custom: Option<&str>,
    ) -> ClipchainResult<String> {
        let custom = custom.map(str::trim).filter(|c| !c.is_empty());
        let prompt = match (mode, custom) {
            (SystemPromptMode::Replace, Some(custom)) => custom.to_string(),
            (SystemPromptMode::Append, Some(custom)) => {
                format!("{}\n\n{}", self.guide.text().await?, custom)
            }
            _ => self.guide.text().await?.to_string(),
        };
        debug!(mode = %mode, custom = custom.is_some(), "Resolved system prompt");
        Ok(prompt)
    }

    fn model_for<'a>(&'a self, req: &'a OptimizeRequest) -> &'a str {
        req.model
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(&self.default_model)
    }

    async fn complete(&self, model: &str, messages: Vec<Message>) -> ClipchainResult<String> {
        let request = GenerateRequest {
            messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            model: Some(model.to_string()),
        };
        Ok(self.driver.generate(&request).await?.text)
    }

    /// Build the user message, attaching the image only for vision models.
    fn user_message(
        &self,
        model: &str,
        text: String,
        req: &OptimizeRequest,
        image_note: &str,
    ) -> Message {
        match &req.image {
            Some(image) if self.catalog.supports_vision(model) => {
                Message::user_with_image(format!("{}\n\n{}", text, image_note), image.clone())
            }
            Some(_) => {
                debug!(model, "Model lacks vision support, ignoring image");
                Message::user(text)
            }
            None => Message::user(text),
        }
    }

    /// Rewrite one prompt.
    #[instrument(skip(self, req), fields(model = %self.model_for(req), mode = %req.mode))]
    pub async fn optimize(&self, req: &OptimizeRequest) -> ClipchainResult<OptimizationResult> {
        if req.prompt.trim().is_empty() {
            return Err(OptimizerError::new(OptimizerErrorKind::EmptyPrompt).into());
        }
        let model = self.model_for(req);
        let system = self
            .system_prompt(req.mode, req.custom_system_prompt.as_deref())
            .await?;

        let mut text = format!("Original Prompt: \"{}\"", req.prompt);
        if !req.character.is_empty() {
            text.push_str(&format!("\nCharacter: {}", req.character));
        }
        if !req.context.is_empty() {
            text.push_str(&format!("\nContext: {}", req.context));
        }
        text.push_str(
            "\n\nPlease optimize this prompt using the style guide to create a professional, \
detailed prompt that will generate high-quality 8-second video content.",
        );
        let user = self.user_message(
            model,
            text,
            req,
            "Please also analyze the provided reference image and incorporate relevant visual \
details into the optimized prompt.",
        );

        let optimized = self
            .complete(model, vec![Message::system(system), user])
            .await?;
        info!("Prompt optimized");
        Ok(OptimizationResult::new(
            req.prompt.clone(),
            optimized.trim(),
            req.character.clone(),
        ))
    }

    /// Advice on improving a prompt, leaving the prompt unchanged.
    #[instrument(skip(self, req), fields(model = %self.model_for(req)))]
    pub async fn suggest(&self, req: &OptimizeRequest) -> ClipchainResult<Suggestions> {
        if req.prompt.trim().is_empty() {
            return Err(OptimizerError::new(OptimizerErrorKind::EmptyPrompt).into());
        }
        let model = self.model_for(req);
        let system = self
            .system_prompt(req.mode, req.custom_system_prompt.as_deref())
            .await?;
        let text = format!(
            "Analyze this prompt and provide optimization suggestions:\n\n\"{}\"\n\nWhat specific \
improvements would make this prompt more effective for video generation?",
            req.prompt
        );
        let user = self.user_message(
            model,
            text,
            req,
            "Please also analyze the provided reference image and suggest how visual elements \
from the image could enhance the prompt for better video generation.",
        );
        let suggestions = self
            .complete(model, vec![Message::system(system), user])
            .await?;
        Ok(Suggestions::new(req.prompt.clone(), suggestions.trim()))
    }

    /// Write a prompt from a reference image alone.
    ///
    /// # Errors
    ///
    /// Fails before any request when no image is supplied or the model
    /// cannot accept images.
    #[instrument(skip(self, req), fields(model = %self.model_for(req)))]
    pub async fn generate_from_image(
        &self,
        req: &OptimizeRequest,
    ) -> ClipchainResult<OptimizationResult> {
        let model = self.model_for(req);
        let Some(image) = req.image.clone() else {
            return Err(OptimizerError::new(OptimizerErrorKind::MissingImage).into());
        };
        if !self.catalog.supports_vision(model) {
            return Err(
                OptimizerError::new(OptimizerErrorKind::VisionUnsupported(model.to_string()))
                    .into(),
            );
        }
        let system = self
            .system_prompt(req.mode, req.custom_system_prompt.as_deref())
            .await?;
        let text = "Please analyze this image and create a professional video generation prompt \
based on what you see. Use the style guide to structure your response with all the appropriate \
components (Subject, Context, Action, Style, Camera, Ambiance, Audio).\n\nThe prompt should be \
optimized for generating an 8-second video that captures the essence of what's shown in the image.";
        let generated = self
            .complete(
                model,
                vec![Message::system(system), Message::user_with_image(text, image)],
            )
            .await?;
        info!("Prompt generated from image");
        Ok(OptimizationResult::new(FROM_IMAGE_ORIGINAL, generated.trim(), ""))
    }

    /// Optimize scene prompts in order, one result per input.
    ///
    /// A failed item keeps its original text and records the error; the
    /// batch continues.
    #[instrument(skip(self, prompts), fields(count = prompts.len()))]
    pub async fn optimize_many(
        &self,
        prompts: &[String],
        character: &str,
        model: Option<&str>,
    ) -> Vec<OptimizationResult> {
        let total = prompts.len();
        let mut results = Vec::with_capacity(total);
        for (i, prompt) in prompts.iter().enumerate() {
            debug!(scene = i + 1, total, "Optimizing scene prompt");
            let mut req = OptimizeRequest::new(prompt.clone())
                .with_character(character)
                .with_context(format!(
                    "Scene {} of {} in a cohesive story sequence",
                    i + 1,
                    total
                ));
            req.model = model.map(str::to_string);

            match self.optimize(&req).await {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!(scene = i + 1, error = %e, "Scene optimization failed, keeping original");
                    results.push(OptimizationResult::failed(
                        prompt.clone(),
                        character,
                        e.detail(),
                    ));
                }
            }

            if i + 1 < total && !self.batch_delay.is_zero() {
                tokio::time::sleep(self.batch_delay).await;
            }
        }
        results
    }
}
