//! Static catalogue of prompt-optimizer models.

use serde::{Deserialize, Serialize};

/// One selectable model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    /// Provider model id, e.g. `openai/gpt-4o`
    pub id: String,
    /// Display name
    pub name: String,
    /// One-line description
    pub description: String,
    /// Whether the model accepts image input
    pub supports_vision: bool,
}

impl ModelInfo {
    fn entry(id: &str, name: &str, description: &str, supports_vision: bool) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            supports_vision,
        }
    }
}

/// In-memory model table. No network discovery.
///
/// # Examples
///
/// ```
/// use clipchain_core::ModelCatalog;
///
/// let catalog = ModelCatalog::openrouter();
/// assert!(catalog.supports_vision("openai/gpt-4o"));
/// assert!(!catalog.supports_vision("anthropic/claude-3-haiku"));
/// assert!(!catalog.supports_vision("not/a-model"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelCatalog {
    models: Vec<ModelInfo>,
}

impl ModelCatalog {
    /// Build a catalogue from an explicit list.
    pub fn new(models: Vec<ModelInfo>) -> Self {
        Self { models }
    }

    /// The OpenRouter models offered for prompt optimization.
    pub fn openrouter() -> Self {
        Self::new(vec![
            ModelInfo::entry(
                "anthropic/claude-3.5-sonnet",
                "Claude 3.5 Sonnet",
                "Best for creative writing and analysis (Vision)",
                true,
            ),
            ModelInfo::entry(
                "anthropic/claude-3.5-haiku",
                "Claude 3.5 Haiku",
                "Fast and efficient with vision capabilities",
                true,
            ),
            ModelInfo::entry(
                "openai/gpt-4o",
                "GPT-4o",
                "Latest OpenAI model with vision (Vision)",
                true,
            ),
            ModelInfo::entry(
                "openai/gpt-4o-mini",
                "GPT-4o Mini",
                "Compact vision model, fast and cost-effective",
                true,
            ),
            ModelInfo::entry(
                "openai/gpt-4-turbo",
                "GPT-4 Turbo",
                "Powerful and versatile with vision (Vision)",
                true,
            ),
            ModelInfo::entry(
                "google/gemini-pro-1.5",
                "Gemini Pro 1.5",
                "Google's advanced model with vision (Vision)",
                true,
            ),
            ModelInfo::entry(
                "google/gemini-flash-1.5",
                "Gemini Flash 1.5",
                "Fast multimodal model with vision capabilities",
                true,
            ),
            ModelInfo::entry(
                "google/gemini-flash-1.5-8b",
                "Gemini Flash 1.5 8B",
                "Efficient vision model for quick processing",
                true,
            ),
            ModelInfo::entry(
                "google/gemini-2.5-flash-lite",
                "Gemini 2.5 Flash Lite",
                "Latest lightweight Gemini model with vision capabilities",
                true,
            ),
            ModelInfo::entry(
                "x-ai/grok-4",
                "Grok Vision Beta",
                "X.AI's multimodal model with vision capabilities",
                true,
            ),
            ModelInfo::entry(
                "meta-llama/llama-3.2-90b-vision-instruct",
                "Llama 3.2 90B Vision",
                "Open source vision model",
                true,
            ),
            ModelInfo::entry(
                "meta-llama/llama-3.2-11b-vision-instruct",
                "Llama 3.2 11B Vision",
                "Compact open source vision model",
                true,
            ),
            ModelInfo::entry(
                "qwen/qwen-2-vl-72b-instruct",
                "Qwen2-VL 72B",
                "Advanced Chinese vision-language model",
                true,
            ),
            ModelInfo::entry(
                "qwen/qwen-2-vl-7b-instruct",
                "Qwen2-VL 7B",
                "Efficient vision-language model",
                true,
            ),
            ModelInfo::entry(
                "anthropic/claude-3-haiku",
                "Claude 3 Haiku",
                "Fast and efficient (Text only)",
                false,
            ),
            ModelInfo::entry(
                "meta-llama/llama-3.1-70b-instruct",
                "Llama 3.1 70B",
                "Open source powerhouse (Text only)",
                false,
            ),
            ModelInfo::entry(
                "mistralai/mixtral-8x7b-instruct",
                "Mixtral 8x7B",
                "Efficient mixture of experts (Text only)",
                false,
            ),
            ModelInfo::entry(
                "perplexity/llama-3.1-sonar-large-128k-online",
                "Perplexity Sonar Large",
                "With web search capabilities (Text only)",
                false,
            ),
        ])
    }

    /// All models, in display order.
    pub fn models(&self) -> &[ModelInfo] {
        &self.models
    }

    /// Look up a model by id.
    pub fn get(&self, id: &str) -> Option<&ModelInfo> {
        self.models.iter().find(|m| m.id == id)
    }

    /// Whether `id` is known and vision-capable.
    pub fn supports_vision(&self, id: &str) -> bool {
        self.get(id).is_some_and(|m| m.supports_vision)
    }
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self::openrouter()
    }
}
