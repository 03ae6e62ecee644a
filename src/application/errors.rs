//! Application layer errors

use thiserror::Error;

use crate::infrastructure::llm::LLMError;

/// General chat errors
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("LLM error: {0}")]
    LLM(#[from] LLMError),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("A request is already in flight")]
    RequestInFlight,

    #[error("Nothing sent: {0}")]
    Submit(#[from] SubmitError),
}

/// Reasons a submission is turned away before any request is made
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Nothing to send")]
    Blank,

    #[error("Still waiting for the previous reply")]
    AwaitingReply,
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
