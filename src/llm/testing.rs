//! Mock LLM client for tests
//!
//! Returns queued responses and records every request it receives.

use super::{LlmError, LlmRequest, LlmResponse, LlmService, Usage};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Mock LLM client that returns queued responses
pub struct MockLlmClient {
    responses: Mutex<VecDeque<Result<LlmResponse, LlmError>>>,
    /// Served once the queue is empty; `None` means fail with a network error
    repeat: Mutex<Option<String>>,
    model_id: String,
    requests: Mutex<Vec<LlmRequest>>,
}

impl MockLlmClient {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            repeat: Mutex::new(None),
            model_id: model_id.into(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A client that answers every request with the same text
    pub fn always(text: impl Into<String>) -> Self {
        let client = Self::new("mock");
        *client.repeat.lock().unwrap() = Some(text.into());
        client
    }

    /// Queue a successful text completion
    pub fn queue_text(&self, text: impl Into<String>) {
        self.responses.lock().unwrap().push_back(Ok(LlmResponse {
            content: text.into(),
            usage: Usage::default(),
        }));
    }

    /// Queue an error response
    pub fn queue_error(&self, error: LlmError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Get recorded requests
    pub fn recorded_requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmService for MockLlmClient {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(queued) = self.responses.lock().unwrap().pop_front() {
            return queued;
        }
        match self.repeat.lock().unwrap().as_ref() {
            Some(text) => Ok(LlmResponse {
                content: text.clone(),
                usage: Usage::default(),
            }),
            None => Err(LlmError::network("No mock response queued")),
        }
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
