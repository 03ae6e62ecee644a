//! Application layer - Use cases and business logic
//!
//! This layer contains:
//! - Services: Conversation store and the submit/reply round trip
//! - View: Framework-agnostic observers of the conversation store
//! - Errors: Domain-specific errors
//! - Messaging: Console input parsing

pub mod errors;
pub mod messaging;
pub mod services;
pub mod view;
