//! System clipboard backed by copypasta

use copypasta::{ClipboardContext, ClipboardProvider};

use crate::application::errors::ChatError;
use crate::domain::traits::Clipboard;

/// Clipboard that talks to the desktop session. The context is opened
/// lazily so headless runs only fail when a copy is actually attempted.
#[derive(Default)]
pub struct SystemClipboard {
    context: Option<ClipboardContext>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn context(&mut self) -> Result<&mut ClipboardContext, ChatError> {
        if self.context.is_none() {
            let ctx = ClipboardContext::new().map_err(|e| ChatError::Clipboard(e.to_string()))?;
            self.context = Some(ctx);
        }
        self.context
            .as_mut()
            .ok_or_else(|| ChatError::Clipboard("clipboard unavailable".to_string()))
    }
}

impl Clipboard for SystemClipboard {
    fn copy_text(&mut self, text: &str) -> Result<(), ChatError> {
        self.context()?
            .set_contents(text.to_string())
            .map_err(|e| ChatError::Clipboard(e.to_string()))
    }
}
