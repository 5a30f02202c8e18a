//! The script generator: character + story prompt → three scene scripts.

use crate::{enhance_scene, extraction_prompt, fallback_scripts, parse_scene_array};
use crate::{system_instruction, user_prompt};
use clipchain_core::{
    Character, CharacterCatalog, GenerateRequest, Message, SCENE_COUNT, SceneScripts,
};
use clipchain_error::{ClipchainResult, ScriptError, ScriptErrorKind};
use clipchain_interface::TextDriver;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Where a set of scripts came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptSource {
    /// Parsed directly from the first reply
    Model,
    /// Recovered by asking the model to reformat its reply
    Extracted,
    /// Built from templates after the model path failed
    Fallback,
}

/// Scripts plus their provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptDraft {
    /// The three scenes
    pub scripts: SceneScripts,
    /// How they were produced
    pub source: ScriptSource,
}

/// Generates scene scripts through a text model, falling back to
/// templates so callers always receive a usable set.
#[derive(Clone)]
pub struct ScriptGenerator {
    driver: Arc<dyn TextDriver>,
    catalog: CharacterCatalog,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl ScriptGenerator {
    /// Create a generator over a text driver and character presets.
    pub fn new(driver: Arc<dyn TextDriver>, catalog: CharacterCatalog) -> Self {
        Self {
            driver,
            catalog,
            temperature: None,
            max_tokens: None,
        }
    }

    /// Sampling settings for script requests.
    pub fn with_sampling(mut self, temperature: Option<f32>, max_tokens: Option<u32>) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    /// Character presets in use.
    pub fn catalog(&self) -> &CharacterCatalog {
        &self.catalog
    }

    /// Generate three scripts.
    ///
    /// # Errors
    ///
    /// Only blank input is an error; every model failure is absorbed by
    /// the template fallback.
    pub async fn generate(&self, character: &str, prompt: &str) -> ClipchainResult<SceneScripts> {
        Ok(self.draft(character, prompt).await?.scripts)
    }

    /// Generate three scripts and report how they were produced.
    #[instrument(skip(self), fields(provider = self.driver.provider_name()))]
    pub async fn draft(&self, character: &str, prompt: &str) -> ClipchainResult<ScriptDraft> {
        if character.trim().is_empty() {
            return Err(ScriptError::new(ScriptErrorKind::EmptyCharacter).into());
        }
        if prompt.trim().is_empty() {
            return Err(ScriptError::new(ScriptErrorKind::EmptyPrompt).into());
        }

        let resolved = self.catalog.resolve(character);
        let (raw, source) = match self.from_model(&resolved, character, prompt).await {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "Script generation failed, using template scripts");
                (fallback_scripts(&resolved, prompt), ScriptSource::Fallback)
            }
        };

        let scripts = finish(raw, &resolved)?;
        info!(source = ?source, scenes = scripts.len(), "Scene scripts ready");
        Ok(ScriptDraft { scripts, source })
    }

    async fn from_model(
        &self,
        character: &Character,
        raw_character: &str,
        prompt: &str,
    ) -> ClipchainResult<(Vec<String>, ScriptSource)> {
        let request = self.request(vec![
            Message::system(system_instruction(character)),
            Message::user(user_prompt(raw_character, prompt)),
        ]);
        let reply = self.driver.generate(&request).await?;

        match parse_exact(&reply.text) {
            Ok(scenes) => Ok((scenes, ScriptSource::Model)),
            Err(e) => {
                debug!(error = %e, "First reply unusable, requesting JSON reformat");
                let retry = self.request(vec![Message::user(extraction_prompt(&reply.text))]);
                let reformatted = self.driver.generate(&retry).await?;
                let scenes = parse_exact(&reformatted.text)?;
                Ok((scenes, ScriptSource::Extracted))
            }
        }
    }

    fn request(&self, messages: Vec<Message>) -> GenerateRequest {
        GenerateRequest {
            messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            model: None,
        }
    }
}

fn parse_exact(reply: &str) -> Result<Vec<String>, ScriptError> {
    let scenes = parse_scene_array(reply)?;
    if scenes.len() != SCENE_COUNT {
        return Err(ScriptError::new(ScriptErrorKind::WrongSceneCount {
            expected: SCENE_COUNT,
            actual: scenes.len(),
        }));
    }
    if let Some(index) = scenes.iter().position(|s| s.is_empty()) {
        return Err(ScriptError::new(ScriptErrorKind::EmptyScene(index + 1)));
    }
    Ok(scenes)
}

fn finish(raw: Vec<String>, character: &Character) -> Result<SceneScripts, ScriptError> {
    let enhanced = raw
        .iter()
        .enumerate()
        .map(|(i, scene)| enhance_scene(scene, character.description(), i))
        .collect();
    SceneScripts::new(enhanced)
}
