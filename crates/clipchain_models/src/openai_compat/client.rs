//! Client for OpenAI-compatible chat-completions endpoints.

use super::dto::{ChatContent, ChatMessage, ChatRequest, ChatResponse, ContentPart, ImageUrl};
use crate::{ProviderMetrics, classify_status, non_empty_env};
use base64::Engine;
use clipchain_core::{GenerateRequest, GenerateResponse, Input, MediaSource, Message};
use clipchain_error::{ClipchainResult, ProviderError, ProviderErrorKind};
use clipchain_interface::TextDriver;
use reqwest::Client;
use std::time::Instant;
use tracing::{debug, error, instrument};

/// Chat-completions client for OpenAI, OpenRouter and compatible services.
///
/// The API key is read once at construction. A missing key is reported
/// when a request is made, so a server can start without every credential.
///
/// # Examples
///
/// ```
/// use clipchain_models::ChatCompletionClient;
/// use clipchain_interface::TextDriver;
///
/// let client = ChatCompletionClient::new("openai", "https://api.openai.com/v1", "gpt-4")
///     .with_api_key("sk-test")
///     .with_defaults(Some(0.7), Some(1000));
/// assert_eq!(client.model_name(), "gpt-4");
/// assert_eq!(client.provider_name(), "openai");
/// ```
#[derive(Debug, Clone)]
pub struct ChatCompletionClient {
    client: Client,
    provider: &'static str,
    base_url: String,
    model: String,
    api_key: Option<String>,
    api_key_env: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    headers: Vec<(String, String)>,
}

impl ChatCompletionClient {
    /// Create a client with no credentials.
    pub fn new(
        provider: &'static str,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        debug!(provider, base_url = %base_url, "Creating chat completion client");
        Self {
            client: Client::new(),
            provider,
            base_url,
            model: model.into(),
            api_key: None,
            api_key_env: String::new(),
            temperature: None,
            max_tokens: None,
            headers: Vec::new(),
        }
    }

    /// Read the API key from the named environment variable.
    pub fn with_api_key_env(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.api_key = non_empty_env(&name);
        if self.api_key.is_none() {
            debug!(env = %name, "API key not set");
        }
        self.api_key_env = name;
        self
    }

    /// Use an explicit API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sampling defaults applied when a request leaves them unset.
    pub fn with_defaults(mut self, temperature: Option<f32>, max_tokens: Option<u32>) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    /// Add a header sent with every request.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Endpoint that requests are posted to.
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    #[track_caller]
    fn missing_key(&self) -> ProviderError {
        let name = if self.api_key_env.is_empty() {
            format!("{} API key", self.provider)
        } else {
            self.api_key_env.clone()
        };
        ProviderError::new(ProviderErrorKind::MissingApiKey(name))
    }

    /// Convert a generic request into the wire format.
    pub fn convert_request(&self, request: &GenerateRequest) -> ChatRequest {
        ChatRequest {
            model: request.model.clone().unwrap_or_else(|| self.model.clone()),
            messages: request.messages.iter().map(convert_message).collect(),
            temperature: request.temperature.or(self.temperature),
            max_tokens: request.max_tokens.or(self.max_tokens),
        }
    }

    /// Post a wire request and return the parsed reply.
    #[instrument(skip(self, request), fields(provider = self.provider, model = %request.model))]
    pub async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| self.missing_key())?;
        let metrics = ProviderMetrics::get();
        let started = Instant::now();

        debug!(messages = request.messages.len(), "Sending chat completion request");
        let mut builder = self
            .client
            .post(self.completions_url())
            .bearer_auth(api_key)
            .json(request);
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await.map_err(|e| {
            error!(error = ?e, "Failed to send chat completion request");
            metrics.record_error(self.provider, &request.model, "http");
            ProviderError::new(ProviderErrorKind::Http(e.to_string()))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Chat completion API returned error");
            metrics.record_error(self.provider, &request.model, classify_status(status.as_u16()));
            return Err(ProviderError::new(ProviderErrorKind::Api {
                status: status.as_u16(),
                message: body,
            }));
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse chat completion response");
            metrics.record_error(self.provider, &request.model, "parse");
            ProviderError::new(ProviderErrorKind::ResponseParse(e.to_string()))
        })?;

        metrics.record_request(
            self.provider,
            &request.model,
            started.elapsed().as_secs_f64(),
        );
        Ok(parsed)
    }
}

fn convert_message(message: &Message) -> ChatMessage {
    let content = if message.has_image() {
        ChatContent::Parts(
            message
                .content
                .iter()
                .map(|input| match input {
                    Input::Text(text) => ContentPart::Text { text: text.clone() },
                    Input::Image { mime, source } => ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: image_url(mime.as_deref(), source),
                        },
                    },
                })
                .collect(),
        )
    } else {
        ChatContent::Text(message.text())
    };
    ChatMessage {
        role: message.role,
        content,
    }
}

/// Render an image source as a URL the API accepts.
pub fn image_url(mime: Option<&str>, source: &MediaSource) -> String {
    let mime = mime.unwrap_or("image/png");
    match source {
        MediaSource::Url(url) => url.clone(),
        MediaSource::Base64(data) => format!("data:{};base64,{}", mime, data),
        MediaSource::Binary(bytes) => format!(
            "data:{};base64,{}",
            mime,
            base64::engine::general_purpose::STANDARD.encode(bytes)
        ),
    }
}

#[async_trait::async_trait]
impl TextDriver for ChatCompletionClient {
    #[instrument(skip(self, req), fields(provider = self.provider))]
    async fn generate(&self, req: &GenerateRequest) -> ClipchainResult<GenerateResponse> {
        let wire = self.convert_request(req);
        let response = self.send(&wire).await?;
        let text = response
            .first_text()
            .ok_or_else(|| ProviderError::new(ProviderErrorKind::EmptyResponse))?
            .to_string();
        debug!(chars = text.len(), "Received chat completion");
        Ok(GenerateResponse {
            text,
            model: response.model.clone(),
        })
    }

    fn provider_name(&self) -> &'static str {
        self.provider
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
