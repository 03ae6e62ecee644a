//! Application services - Business logic orchestration

pub mod chat_service;
pub mod conversation_store;

pub use chat_service::{ChatService, ReplyFuture};
pub use conversation_store::ConversationStore;
