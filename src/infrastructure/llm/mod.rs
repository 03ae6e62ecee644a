//! LLM integration - Remote completion client

pub mod traits;
pub mod config;
pub mod providers;


pub use traits::{LLM, LLMResponse, LLMError, LLMResult, LLMUsage};
pub use config::LLMConfig;
pub use providers::GeminiProvider;
