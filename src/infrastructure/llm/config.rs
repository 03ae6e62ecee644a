//! LLM Configuration

use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// LLM Configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct LLMConfig {
    /// API credential, sent as the `key` query parameter
    pub api_key: Option<String>,

    /// Model identifier placed in the request path
    pub model: String,

    /// API root, without trailing `/models`
    pub base_url: String,

    /// Whole-request timeout; expiry counts as a network failure
    pub request_timeout_secs: u64,
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 60,
        }
    }
}

impl LLMConfig {
    /// Overlay values from an environment lookup
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup("GEMINI_API_KEY") {
            self.api_key = Some(key);
        } else if let Some(key) = lookup("GOOGLE_API_KEY") {
            // Also check GOOGLE_API_KEY, the name Google's own tooling uses
            if self.api_key.is_none() {
                self.api_key = Some(key);
            }
        }

        if let Some(model) = lookup("GEMINI_MODEL") {
            self.model = model;
        }

        if let Some(url) = lookup("GEMINI_BASE_URL") {
            self.base_url = url;
        }
    }

    /// Get the API key, treating an empty string as absent
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.trim().is_empty())
    }
}
