//! LLM provider abstraction
//!
//! The chat-completion capability the crisis orchestrator consumes. Providers
//! are selected once at startup and injected as `Arc<dyn LlmService>`.

mod anthropic;
mod error;
mod openai;
mod registry;
mod types;

#[cfg(test)]
mod proptests;
#[cfg(test)]
pub mod testing;

pub use anthropic::AnthropicService;
#[allow(unused_imports)] // Public API re-exports
pub use error::{LlmError, LlmErrorKind};
pub use openai::OpenAIService;
#[allow(unused_imports)]
pub use registry::{build_service, LlmConfig, Provider};
#[allow(unused_imports)]
pub use types::*;

use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for LLM providers
#[async_trait]
pub trait LlmService: Send + Sync {
    /// Make a completion request
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError>;

    /// Get the model ID
    fn model_id(&self) -> &str;
}

/// Logging wrapper for LLM services
pub struct LoggingService {
    inner: Arc<dyn LlmService>,
    model_id: String,
}

impl LoggingService {
    pub fn new(inner: Arc<dyn LlmService>) -> Self {
        let model_id = inner.model_id().to_string();
        Self { inner, model_id }
    }
}

#[async_trait]
impl LlmService for LoggingService {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        let start = std::time::Instant::now();
        let result = self.inner.complete(request).await;
        let duration = start.elapsed();

        match &result {
            Ok(response) => {
                tracing::info!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    messages = request.messages.len(),
                    reply_chars = response.text().chars().count(),
                    input_tokens = response.usage.input_tokens,
                    output_tokens = response.usage.output_tokens,
                    "LLM request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    kind = ?e.kind,
                    error = %e.message,
                    retryable = e.kind.is_retryable(),
                    retry_after_secs = e.retry_after.map(|d| d.as_secs()),
                    "LLM request failed"
                );
            }
        }

        result
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

/// Stand-in used when no provider credential is configured.
///
/// Every completion fails with an auth error, so chats land on the fallback
/// response while the immediate-crisis path keeps working.
pub struct UnavailableService;

#[async_trait]
impl LlmService for UnavailableService {
    async fn complete(&self, _request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        Err(LlmError::auth("No LLM provider credential configured"))
    }

    fn model_id(&self) -> &str {
        "unavailable"
    }
}
