//! fal.ai queue client for text-to-video endpoints.

use super::dto::{
    FalQueueStatus, FalQueueSubmission, FalSubmitRequest, FalVideoResult,
    parse_validation_details,
};
use crate::{ProviderMetrics, classify_status, non_empty_env};
use clipchain_error::{
    ClipchainResult, ProviderError, ProviderErrorKind, StorageError, StorageErrorKind,
};
use clipchain_interface::{GeneratedVideo, VideoBackend, VideoRequest};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::time::{Duration, Instant};
use tokio::io::AsyncWriteExt;
use tracing::{debug, error, info, instrument, warn};

/// Client for the fal.ai request queue.
///
/// A job is submitted to `{queue_base_url}/{endpoint}`, polled until it
/// reports `COMPLETED`, and its result is fetched from the response URL.
#[derive(Debug, Clone, derive_getters::Getters)]
pub struct FalVideoClient {
    #[getter(skip)]
    client: Client,
    /// Queue host, e.g. `https://queue.fal.run`
    queue_base_url: String,
    /// Model endpoint, e.g. `fal-ai/veo3`
    endpoint: String,
    #[getter(skip)]
    api_key: Option<String>,
    #[getter(skip)]
    api_key_env: String,
    /// Delay between status polls
    poll_interval: Duration,
    /// Give up after this long
    max_wait: Duration,
}

impl FalVideoClient {
    /// Create a client with default timings and no credentials.
    pub fn new(queue_base_url: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            queue_base_url: queue_base_url.into().trim_end_matches('/').to_string(),
            endpoint: endpoint.into().trim_matches('/').to_string(),
            api_key: None,
            api_key_env: "FAL_KEY".to_string(),
            poll_interval: Duration::from_secs(5),
            max_wait: Duration::from_secs(900),
        }
    }

    /// Read the API key from the named environment variable.
    pub fn with_api_key_env(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.api_key = non_empty_env(&name);
        self.api_key_env = name;
        self
    }

    /// Use an explicit API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set polling cadence and overall deadline.
    pub fn with_timing(mut self, poll_interval: Duration, max_wait: Duration) -> Self {
        self.poll_interval = poll_interval;
        self.max_wait = max_wait;
        self
    }

    fn submit_url(&self) -> String {
        format!("{}/{}", self.queue_base_url, self.endpoint)
    }

    fn key(&self) -> Result<&str, ProviderError> {
        self.api_key.as_deref().ok_or_else(|| {
            ProviderError::new(ProviderErrorKind::MissingApiKey(self.api_key_env.clone()))
        })
    }

    /// Submit a job to the queue.
    #[instrument(skip(self, req), fields(endpoint = %self.endpoint))]
    pub async fn submit(&self, req: &VideoRequest) -> Result<FalQueueSubmission, ProviderError> {
        let key = self.key()?;
        let body = FalSubmitRequest {
            prompt: req.prompt().clone(),
            aspect_ratio: req.aspect_ratio().clone(),
        };
        let response = self
            .client
            .post(self.submit_url())
            .header(reqwest::header::AUTHORIZATION, format!("Key {}", key))
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        let submission: FalQueueSubmission = self.read_json(response).await?;
        info!(request_id = %submission.request_id, "Video job queued");
        Ok(submission)
    }

    /// Poll a job until it completes, fails, or the deadline passes.
    #[instrument(skip(self, status_url))]
    pub async fn wait_for(&self, request_id: &str, status_url: &str) -> Result<(), ProviderError> {
        let key = self.key()?;
        let started = Instant::now();
        loop {
            let response = self
                .client
                .get(status_url)
                .header(reqwest::header::AUTHORIZATION, format!("Key {}", key))
                .send()
                .await
                .map_err(|e| self.transport_error(e))?;
            let status: FalQueueStatus = self.read_json(response).await?;

            if let Some(message) = status.error.as_ref().filter(|m| !m.is_empty()) {
                error!(status = %status.status, error = %message, "Video job failed");
                return Err(ProviderError::new(ProviderErrorKind::JobFailed(
                    message.clone(),
                )));
            }
            if status.is_completed() {
                debug!(elapsed_secs = started.elapsed().as_secs(), "Video job completed");
                return Ok(());
            }
            if !status.is_pending() {
                return Err(ProviderError::new(ProviderErrorKind::JobFailed(format!(
                    "unexpected status {}",
                    status.status
                ))));
            }
            if started.elapsed() >= self.max_wait {
                warn!(waited_secs = self.max_wait.as_secs(), "Video job timed out");
                return Err(ProviderError::new(ProviderErrorKind::Timeout(
                    self.max_wait.as_secs(),
                )));
            }
            debug!(status = %status.status, position = ?status.queue_position, "Video job pending");
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// Fetch the result of a completed job.
    #[instrument(skip(self))]
    pub async fn result(&self, response_url: &str) -> Result<FalVideoResult, ProviderError> {
        let key = self.key()?;
        let response = self
            .client
            .get(response_url)
            .header(reqwest::header::AUTHORIZATION, format!("Key {}", key))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        self.read_json(response).await
    }

    fn transport_error(&self, e: reqwest::Error) -> ProviderError {
        error!(error = ?e, "fal.ai request failed");
        ProviderMetrics::get().record_error("fal", &self.endpoint, "http");
        ProviderError::new(ProviderErrorKind::Http(e.to_string()))
    }

    async fn read_json<T: DeserializeOwned>(&self, response: Response) -> Result<T, ProviderError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            ProviderMetrics::get().record_error(
                "fal",
                &self.endpoint,
                classify_status(status.as_u16()),
            );
            return Err(status_error(status, &body));
        }
        response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse fal.ai response");
            ProviderError::new(ProviderErrorKind::ResponseParse(e.to_string()))
        })
    }
}

/// Map a non-success response to an error, keeping validation detail.
fn status_error(status: StatusCode, body: &str) -> ProviderError {
    if status == StatusCode::UNPROCESSABLE_ENTITY || status == StatusCode::BAD_REQUEST {
        if let Some(details) = parse_validation_details(body) {
            for detail in &details {
                error!(status = %status, detail = %detail, "Video request rejected");
            }
            return ProviderError::new(ProviderErrorKind::Validation {
                status: status.as_u16(),
                details,
            });
        }
    }
    error!(status = %status, body = %body, "fal.ai returned error");
    ProviderError::new(ProviderErrorKind::Api {
        status: status.as_u16(),
        message: body.to_string(),
    })
}

#[async_trait::async_trait]
impl VideoBackend for FalVideoClient {
    #[instrument(skip(self, req), fields(endpoint = %self.endpoint))]
    async fn generate(&self, req: &VideoRequest) -> ClipchainResult<GeneratedVideo> {
        let started = Instant::now();
        let submission = self.submit(req).await?;
        let base = format!("{}/requests/{}", self.submit_url(), submission.request_id);
        let status_url = submission
            .status_url
            .clone()
            .unwrap_or_else(|| format!("{}/status", base));
        let response_url = submission.response_url.clone().unwrap_or(base);

        self.wait_for(&submission.request_id, &status_url).await?;
        let result = self.result(&response_url).await?;
        let url = result
            .video
            .map(|file| file.url)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| ProviderError::new(ProviderErrorKind::MissingResult))?;

        ProviderMetrics::get().record_request(
            "fal",
            &self.endpoint,
            started.elapsed().as_secs_f64(),
        );
        Ok(GeneratedVideo::new(url, Some(submission.request_id)))
    }

    #[instrument(skip(self, url), fields(dest = %dest.display()))]
    async fn download(&self, url: &str, dest: &Path) -> ClipchainResult<u64> {
        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::new(ProviderErrorKind::Api {
                status: status.as_u16(),
                message: body,
            })
            .into());
        }

        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }
        let write_err = |e: std::io::Error| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                dest.display(),
                e
            )))
        };
        let mut file = tokio::fs::File::create(dest).await.map_err(write_err)?;
        let mut written = 0u64;
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| ProviderError::new(ProviderErrorKind::Http(e.to_string())))?
        {
            file.write_all(&chunk).await.map_err(write_err)?;
            written += chunk.len() as u64;
        }
        file.flush().await.map_err(write_err)?;
        debug!(bytes = written, "Clip downloaded");
        Ok(written)
    }

    fn provider_name(&self) -> &'static str {
        "fal"
    }
}
