//! Gemini Provider - Google generative language API

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Message, Sender};
use crate::infrastructure::llm::{LLMConfig, LLMError, LLMResponse, LLMResult, LLMUsage, LLM};

/// Gemini provider
pub struct GeminiProvider {
    api_key: String,
    client: Client,
    model: String,
    base_url: String,
}

impl GeminiProvider {
    /// Build a provider from config. Fails fast when no key is configured.
    pub fn new(config: &LLMConfig) -> LLMResult<Self> {
        let api_key = config.api_key().ok_or(LLMError::MissingApiKey)?;

        if config.request_timeout_secs == 0 {
            return Err(LLMError::ConfigError(
                "request-timeout-secs must be greater than zero".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| LLMError::ConfigError(e.to_string()))?;

        Ok(Self {
            api_key: api_key.to_string(),
            client,
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get the generateContent URL for the configured model
    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

/// Role labels the API accepts
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl From<Sender> for Role {
    fn from(sender: Sender) -> Self {
        match sender {
            Sender::User => Role::User,
            Sender::Assistant => Role::Model,
        }
    }
}

/// API request structure
#[derive(Serialize, Debug)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

/// One conversation turn
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Content {
    pub role: Role,
    pub parts: Vec<Part>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Part {
    pub text: String,
}

impl Content {
    fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            parts: vec![Part { text: text.into() }],
        }
    }
}

impl GenerateContentRequest {
    /// Role-map the history in order, then append the utterance as a user turn
    pub fn new(history: &[Message], utterance: &str) -> Self {
        let contents = history
            .iter()
            .map(|msg| Content::new(msg.sender().into(), msg.text()))
            .chain(std::iter::once(Content::new(Role::User, utterance)))
            .collect();
        Self { contents }
    }
}

/// API response structure. Every link is optional so that a missing or
/// null field is reported as such rather than as a decode failure.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    usage_metadata: Option<UsageMetadata>,
    model_version: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
struct CandidateContent {
    parts: Option<Vec<ResponsePart>>,
}

#[derive(Deserialize, Debug)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: Option<u32>,
    candidates_token_count: Option<u32>,
    total_token_count: Option<u32>,
}

/// Extract the reply from a response body by walking
/// `candidates[0].content.parts[0].text`.
pub fn parse_response(body: &str, model: &str) -> LLMResult<LLMResponse> {
    let response: GenerateContentResponse =
        serde_json::from_str(body).map_err(|e| LLMError::ParseError(e.to_string()))?;

    let candidate = response
        .candidates
        .and_then(|c| c.into_iter().next())
        .ok_or(LLMError::MissingField("candidates[0]"))?;

    let Candidate {
        content,
        finish_reason,
    } = candidate;

    let part = content
        .ok_or(LLMError::MissingField("candidates[0].content"))?
        .parts
        .and_then(|p| p.into_iter().next())
        .ok_or(LLMError::MissingField("candidates[0].content.parts[0]"))?;

    let text = part
        .text
        .ok_or(LLMError::MissingField("candidates[0].content.parts[0].text"))?;

    if text.is_empty() {
        return Err(LLMError::EmptyReply);
    }

    let usage = response.usage_metadata.map(|u| LLMUsage {
        prompt_tokens: u.prompt_token_count,
        completion_tokens: u.candidates_token_count,
        total_tokens: u.total_token_count,
    });

    Ok(LLMResponse {
        content: text,
        model: response.model_version.unwrap_or_else(|| model.to_string()),
        usage,
        finish_reason,
    })
}

#[async_trait]
impl LLM for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn complete(&self, history: &[Message], utterance: &str) -> LLMResult<LLMResponse> {
        let request = GenerateContentRequest::new(history, utterance);

        tracing::info!(
            model = %self.model,
            turns = request.contents.len(),
            "Sending generateContent request"
        );

        // without_url() keeps the key out of error messages
        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| LLMError::NetworkError(e.without_url().to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LLMError::NetworkError(e.without_url().to_string()))?;

        if !status.is_success() {
            return Err(LLMError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        parse_response(&body, &self.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_maps_roles_in_order() {
        let history = vec![Message::user("hi"), Message::assistant("hello")];

        let request = GenerateContentRequest::new(&history, "how are you");

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "contents": [
                    { "role": "user", "parts": [{ "text": "hi" }] },
                    { "role": "model", "parts": [{ "text": "hello" }] },
                    { "role": "user", "parts": [{ "text": "how are you" }] }
                ]
            })
        );
    }

    #[test]
    fn test_request_with_empty_history() {
        let request = GenerateContentRequest::new(&[], "first");
        assert_eq!(request.contents, vec![Content::new(Role::User, "first")]);
    }

    #[test]
    fn test_parse_response_extracts_text() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"I am well"}]}}]}"#;
        let response = parse_response(body, "gemini-2.0-flash").unwrap();
        assert_eq!(response.content, "I am well");
        assert_eq!(response.model, "gemini-2.0-flash");
        assert!(response.usage.is_none());
    }

    #[test]
    fn test_parse_response_reads_metadata() {
        let body = json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "ok" }] },
                "finishReason": "STOP"
            }],
            "usageMetadata": {
                "promptTokenCount": 4,
                "candidatesTokenCount": 1,
                "totalTokenCount": 5
            },
            "modelVersion": "gemini-2.0-flash-001"
        })
        .to_string();

        let response = parse_response(&body, "gemini-2.0-flash").unwrap();
        assert_eq!(response.model, "gemini-2.0-flash-001");
        assert_eq!(response.finish_reason.as_deref(), Some("STOP"));
        let usage = response.usage.unwrap();
        assert_eq!(usage.prompt_tokens, Some(4));
        assert_eq!(usage.completion_tokens, Some(1));
        assert_eq!(usage.total_tokens, Some(5));
    }

    #[test]
    fn test_parse_response_missing_links() {
        let cases = [
            ("{}", "candidates[0]"),
            (r#"{"candidates":[]}"#, "candidates[0]"),
            (r#"{"candidates":null}"#, "candidates[0]"),
            (r#"{"candidates":[{}]}"#, "candidates[0].content"),
            (r#"{"candidates":[{"content":{}}]}"#, "candidates[0].content.parts[0]"),
            (r#"{"candidates":[{"content":{"parts":[]}}]}"#, "candidates[0].content.parts[0]"),
            (
                r#"{"candidates":[{"content":{"parts":[{"text":null}]}}]}"#,
                "candidates[0].content.parts[0].text",
            ),
        ];

        for (body, expected) in cases {
            match parse_response(body, "m") {
                Err(LLMError::MissingField(path)) => assert_eq!(path, expected, "body: {}", body),
                other => panic!("expected MissingField for {}, got {:?}", body, other),
            }
        }
    }

    #[test]
    fn test_parse_response_empty_text() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":""}]}}]}"#;
        assert!(matches!(parse_response(body, "m"), Err(LLMError::EmptyReply)));
    }

    #[test]
    fn test_parse_response_malformed_json() {
        assert!(matches!(
            parse_response("<html>oops</html>", "m"),
            Err(LLMError::ParseError(_))
        ));
    }

    #[test]
    fn test_new_requires_api_key() {
        let config = LLMConfig::default();
        assert!(matches!(
            GeminiProvider::new(&config),
            Err(LLMError::MissingApiKey)
        ));
    }

    #[test]
    fn test_new_rejects_zero_timeout() {
        let config = LLMConfig {
            api_key: Some("k".to_string()),
            request_timeout_secs: 0,
            ..LLMConfig::default()
        };
        assert!(matches!(
            GeminiProvider::new(&config),
            Err(LLMError::ConfigError(_))
        ));
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let config = LLMConfig {
            api_key: Some("k".to_string()),
            base_url: "http://localhost:1234/v1beta/".to_string(),
            ..LLMConfig::default()
        };
        let provider = GeminiProvider::new(&config).unwrap();
        assert_eq!(
            provider.endpoint(),
            "http://localhost:1234/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }
}
