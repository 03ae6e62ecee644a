//! View-side observers of the conversation store

pub mod auto_scroll;
pub mod transcript;

pub use auto_scroll::AutoScroll;
pub use transcript::{render_entry, Labels};
