//! Domain traits - Abstractions for infrastructure implementations

pub mod clipboard;
pub mod observer;

pub use clipboard::Clipboard;
pub use observer::{StoreEvent, StoreObserver};
