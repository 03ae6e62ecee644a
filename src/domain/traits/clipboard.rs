use crate::application::errors::ChatError;

/// Clipboard trait - abstraction over the system clipboard
pub trait Clipboard {
    fn copy_text(&mut self, text: &str) -> Result<(), ChatError>;
}
