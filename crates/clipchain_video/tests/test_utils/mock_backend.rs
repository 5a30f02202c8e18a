//! Scripted video backend.

use async_trait::async_trait;
use clipchain_error::{ClipchainResult, ProviderError, ProviderErrorKind};
use clipchain_interface::{GeneratedVideo, VideoBackend, VideoRequest};
use std::path::Path;
use std::sync::Mutex;

/// Outcome of one `generate` call.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    /// Clip ready at a fake URL
    Ready,
    /// Transport failure
    Fail(String),
    /// Provider rejected these fields
    Reject(Vec<String>),
}

/// Plays back outcomes in order; extra calls succeed.
pub struct MockBackend {
    outcomes: Mutex<Vec<MockOutcome>>,
    prompts: Mutex<Vec<VideoRequest>>,
    downloads: Mutex<Vec<String>>,
}

impl MockBackend {
    pub fn new(outcomes: Vec<MockOutcome>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into_iter().rev().collect()),
            prompts: Mutex::new(Vec::new()),
            downloads: Mutex::new(Vec::new()),
        }
    }

    pub fn ready() -> Self {
        Self::new(Vec::new())
    }

    pub fn requests(&self) -> Vec<VideoRequest> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn downloads(&self) -> Vec<String> {
        self.downloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl VideoBackend for MockBackend {
    async fn generate(&self, req: &VideoRequest) -> ClipchainResult<GeneratedVideo> {
        let n = {
            let mut prompts = self.prompts.lock().unwrap();
            prompts.push(req.clone());
            prompts.len()
        };
        let outcome = self.outcomes.lock().unwrap().pop().unwrap_or(MockOutcome::Ready);
        match outcome {
            MockOutcome::Ready => Ok(GeneratedVideo::new(
                format!("https://cdn.test/clip{}.mp4", n),
                Some(format!("req-{}", n)),
            )),
            MockOutcome::Fail(message) => {
                Err(ProviderError::new(ProviderErrorKind::Http(message)).into())
            }
            MockOutcome::Reject(details) => Err(ProviderError::new(ProviderErrorKind::Validation {
                status: 422,
                details,
            })
            .into()),
        }
    }

    async fn download(&self, url: &str, dest: &Path) -> ClipchainResult<u64> {
        self.downloads.lock().unwrap().push(url.to_string());
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await.unwrap();
        }
        let body = format!("clip from {}", url);
        tokio::fs::write(dest, &body).await.unwrap();
        Ok(body.len() as u64)
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}
