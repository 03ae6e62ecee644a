//! Domain layer - Core business logic with no external dependencies
//!
//! This layer contains:
//! - Entities: Core business objects (Message, Sender)
//! - Traits: Abstractions for infrastructure (StoreObserver, Clipboard)

pub mod entities;
pub mod traits;
