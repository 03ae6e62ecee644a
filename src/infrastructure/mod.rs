//! Infrastructure layer - External concerns
//!
//! This layer contains:
//! - Config: Configuration loading
//! - LLM: Remote completion client
//! - Clipboard: System clipboard access
//! - Adapters: Front ends (console)

pub mod adapters;
pub mod clipboard;
pub mod config;
pub mod llm;
