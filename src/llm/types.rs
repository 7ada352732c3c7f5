//! Common types for LLM interactions

/// LLM request
#[derive(Debug, Clone, PartialEq)]
pub struct LlmRequest {
    /// System instructions, placed ahead of the conversation by each provider
    pub system: String,
    pub messages: Vec<LlmMessage>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

/// Message in conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmMessage {
    pub role: MessageRole,
    pub content: String,
}

impl LlmMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

/// Decoding parameters applied to every chat completion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecodingParams {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for DecodingParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 300,
        }
    }
}

/// LLM response
#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub content: String,
    pub usage: Usage,
}

impl LlmResponse {
    pub fn text(&self) -> &str {
        &self.content
    }
}

/// Usage statistics
#[derive(Debug, Clone, Copy, Default)]
pub struct Usage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}
