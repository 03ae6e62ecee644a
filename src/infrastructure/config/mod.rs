//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::application::errors::ConfigError;
use crate::application::view::Labels;
use crate::infrastructure::llm::LLMConfig;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub chat: ChatConfig,
    pub llm: LLMConfig,
}

/// Console front-end settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ChatConfig {
    pub user_name: String,
    pub assistant_name: String,
    pub prompt: String,
    pub waiting_indicator: String,
    pub command_prefix: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        let labels = Labels::default();
        Self {
            user_name: labels.user,
            assistant_name: labels.assistant,
            prompt: "> ".to_string(),
            waiting_indicator: "Thinking...".to_string(),
            command_prefix: "/".to_string(),
        }
    }
}

impl ChatConfig {
    pub fn labels(&self) -> Labels {
        Labels {
            user: self.user_name.clone(),
            assistant: self.assistant_name.clone(),
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))
    }

    /// Load the file when it exists, otherwise start from defaults, then
    /// overlay environment variables
    pub fn load_or_default(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let mut config = if path.exists() {
            Self::load(&path)?
        } else {
            tracing::info!("Config file {} not found, using defaults", path.display());
            Config::default()
        };

        config.llm.apply_env(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.llm.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "llm.request-timeout-secs must be greater than zero".to_string(),
            ));
        }
        if self.llm.model.trim().is_empty() {
            return Err(ConfigError::InvalidValue("llm.model must not be empty".to_string()));
        }
        Ok(())
    }
}
