//! Scripted text driver.

use async_trait::async_trait;
use clipchain_core::{GenerateRequest, GenerateResponse};
use clipchain_error::{ClipchainResult, ProviderError, ProviderErrorKind};
use clipchain_interface::TextDriver;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Return this text
    Text(String),
    /// Fail with this message
    Error(String),
}

/// Replays scripted replies in order and records every request.
///
/// When the script runs out, the last reply is repeated.
pub struct MockDriver {
    replies: Mutex<VecDeque<MockReply>>,
    last: Mutex<Option<MockReply>>,
    requests: Mutex<Vec<GenerateRequest>>,
    calls: AtomicUsize,
}

impl MockDriver {
    pub fn new(replies: Vec<MockReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            last: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn text(reply: &str) -> Self {
        Self::new(vec![MockReply::Text(reply.to_string())])
    }

    pub fn failing(message: &str) -> Self {
        Self::new(vec![MockReply::Error(message.to_string())])
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextDriver for MockDriver {
    async fn generate(&self, req: &GenerateRequest) -> ClipchainResult<GenerateResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(req.clone());

        let reply = {
            let mut replies = self.replies.lock().unwrap();
            let mut last = self.last.lock().unwrap();
            match replies.pop_front() {
                Some(reply) => {
                    *last = Some(reply.clone());
                    reply
                }
                None => last.clone().unwrap_or(MockReply::Error("no reply".into())),
            }
        };

        match reply {
            MockReply::Text(text) => Ok(GenerateResponse::new(text)),
            MockReply::Error(message) => {
                Err(ProviderError::new(ProviderErrorKind::Http(message)).into())
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
