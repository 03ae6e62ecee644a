//! LLM traits - Unified completion interface

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::entities::Message;

/// Reply shown whenever a usable completion cannot be obtained
pub const FALLBACK_REPLY: &str = "Error in response";

/// LLM response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMResponse {
    /// Response content
    pub content: String,
    /// Model used
    pub model: String,
    /// Number of tokens used (if available)
    pub usage: Option<LLMUsage>,
    /// Finish reason
    pub finish_reason: Option<String>,
}

/// Token usage information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMUsage {
    pub prompt_tokens: Option<u32>,
    pub completion_tokens: Option<u32>,
    pub total_tokens: Option<u32>,
}

/// LLM errors
#[derive(Debug)]
pub enum LLMError {
    /// API key missing
    MissingApiKey,
    /// Transport failure (connect, timeout, body read)
    NetworkError(String),
    /// Non-success HTTP status from provider
    ApiError { status: u16, body: String },
    /// Response body is not the JSON we expect
    ParseError(String),
    /// A link in the reply path is absent or null
    MissingField(&'static str),
    /// Reply path present but the text is empty
    EmptyReply,
    /// Configuration error
    ConfigError(String),
}

impl std::fmt::Display for LLMError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LLMError::MissingApiKey => write!(f, "Missing API key"),
            LLMError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            LLMError::ApiError { status, body } => {
                write!(f, "API error: status: {}, body: {}", status, body)
            }
            LLMError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            LLMError::MissingField(path) => write!(f, "Missing field: {}", path),
            LLMError::EmptyReply => write!(f, "Empty reply"),
            LLMError::ConfigError(msg) => write!(f, "Config error: {}", msg),
        }
    }
}

impl std::error::Error for LLMError {}

/// Result type for LLM operations
pub type LLMResult<T> = Result<T, LLMError>;

/// LLM Provider trait
#[async_trait]
pub trait LLM: Send + Sync {
    /// Get the provider name
    fn name(&self) -> &str;

    /// Complete a conversation: `history` is the prior transcript in order,
    /// `utterance` the new user text that goes last.
    async fn complete(&self, history: &[Message], utterance: &str) -> LLMResult<LLMResponse>;

    /// Like `complete`, but every failure collapses into `FALLBACK_REPLY`.
    async fn reply(&self, history: &[Message], utterance: &str) -> String {
        match self.complete(history, utterance).await {
            Ok(response) => {
                if let Some(usage) = &response.usage {
                    tracing::debug!(
                        provider = self.name(),
                        model = %response.model,
                        prompt_tokens = ?usage.prompt_tokens,
                        completion_tokens = ?usage.completion_tokens,
                        total_tokens = ?usage.total_tokens,
                        finish_reason = ?response.finish_reason,
                        "Completion received"
                    );
                }
                response.content
            }
            Err(e) => {
                tracing::warn!(provider = self.name(), "Completion failed: {}", e);
                FALLBACK_REPLY.to_string()
            }
        }
    }
}
