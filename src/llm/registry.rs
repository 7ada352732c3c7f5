//! Provider selection for the chat-completion capability

use super::{
    AnthropicService, DecodingParams, LlmError, LlmService, LoggingService, OpenAIService,
    UnavailableService,
};
use crate::config::{parse_var, ConfigError};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// LLM provider enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    OpenAI,
    Anthropic,
}

impl Provider {
    pub fn display_name(self) -> &'static str {
        match self {
            Provider::OpenAI => "OpenAI",
            Provider::Anthropic => "Anthropic",
        }
    }

    /// Get the environment variable name for this provider's API key
    pub fn api_key_env_var(self) -> &'static str {
        match self {
            Provider::OpenAI => "OPENAI_API_KEY",
            Provider::Anthropic => "ANTHROPIC_API_KEY",
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            Provider::OpenAI => "gpt-4",
            Provider::Anthropic => "claude-3-5-sonnet-20241022",
        }
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Provider::OpenAI),
            "anthropic" | "claude" => Ok(Provider::Anthropic),
            other => Err(format!("unknown provider '{other}'")),
        }
    }
}

/// Configuration for LLM providers
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Explicit provider choice; otherwise the first provider with a key wins
    pub provider: Option<Provider>,
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub model: Option<String>,
    /// Endpoint override (gateways, local test servers)
    pub base_url: Option<String>,
    pub timeout: Duration,
    pub decoding: DecodingParams,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: None,
            openai_api_key: None,
            anthropic_api_key: None,
            model: None,
            base_url: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            decoding: DecodingParams::default(),
        }
    }
}

impl LlmConfig {
    pub fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = DecodingParams::default();
        Ok(Self {
            provider: parse_var(lookup, "LLM_PROVIDER")?,
            openai_api_key: non_empty(lookup("OPENAI_API_KEY")),
            anthropic_api_key: non_empty(lookup("ANTHROPIC_API_KEY")),
            model: non_empty(lookup("LLM_MODEL")),
            base_url: non_empty(lookup("LLM_BASE_URL")),
            timeout: Duration::from_secs(
                parse_var(lookup, "LLM_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
            decoding: DecodingParams {
                temperature: parse_var(lookup, "LLM_TEMPERATURE")?
                    .unwrap_or(defaults.temperature),
                max_tokens: parse_var(lookup, "LLM_MAX_TOKENS")?.unwrap_or(defaults.max_tokens),
            },
        })
    }

    fn api_key(&self, provider: Provider) -> Option<&str> {
        match provider {
            Provider::OpenAI => self.openai_api_key.as_deref(),
            Provider::Anthropic => self.anthropic_api_key.as_deref(),
        }
    }

    /// Resolve which provider to use and its credential.
    pub fn resolve(&self) -> Option<(Provider, &str)> {
        match self.provider {
            Some(provider) => self.api_key(provider).map(|key| (provider, key)),
            None => [Provider::OpenAI, Provider::Anthropic]
                .into_iter()
                .find_map(|p| self.api_key(p).map(|key| (p, key))),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Build the LLM service described by `config`.
///
/// Without a usable credential this returns [`UnavailableService`], so the
/// server still starts and answers every chat with the fallback response.
pub fn build_service(config: &LlmConfig) -> Result<Arc<dyn LlmService>, LlmError> {
    let Some((provider, api_key)) = config.resolve() else {
        if let Some(provider) = config.provider {
            tracing::warn!(
                provider = provider.display_name(),
                env = provider.api_key_env_var(),
                "Requested LLM provider has no API key; chats will use the fallback response"
            );
        } else {
            tracing::warn!(
                "No LLM API keys configured. Set OPENAI_API_KEY or ANTHROPIC_API_KEY."
            );
        }
        return Ok(Arc::new(UnavailableService));
    };

    let model = config
        .model
        .clone()
        .unwrap_or_else(|| provider.default_model().to_string());
    let base_url = config.base_url.as_deref();

    let service: Arc<dyn LlmService> = match provider {
        Provider::OpenAI => Arc::new(OpenAIService::new(
            api_key.to_string(),
            model,
            base_url,
            config.timeout,
        )?),
        Provider::Anthropic => Arc::new(AnthropicService::new(
            api_key.to_string(),
            model,
            base_url,
            config.timeout,
        )?),
    };

    tracing::info!(
        provider = provider.display_name(),
        model = %service.model_id(),
        timeout_secs = config.timeout.as_secs(),
        "LLM provider initialized"
    );

    Ok(Arc::new(LoggingService::new(service)))
}
