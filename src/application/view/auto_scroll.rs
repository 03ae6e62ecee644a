use std::sync::Mutex;

use crate::domain::traits::{StoreEvent, StoreObserver};

/// Keeps the view pinned to the newest message: every append moves the
/// anchor to the message just added.
#[derive(Debug, Default)]
pub struct AutoScroll {
    anchor: Mutex<Option<usize>>,
}

impl AutoScroll {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the message the view should be showing
    pub fn anchor(&self) -> Option<usize> {
        *self.lock()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<usize>> {
        self.anchor.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl StoreObserver for AutoScroll {
    fn on_change(&self, event: &StoreEvent<'_>) {
        if let StoreEvent::MessageAppended { index, .. } = event {
            *self.lock() = Some(*index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::ConversationStore;
    use crate::domain::entities::Message;
    use std::sync::Arc;

    #[test]
    fn test_anchor_follows_appends() {
        let scroll = Arc::new(AutoScroll::new());
        let mut store = ConversationStore::new();
        store.subscribe(scroll.clone());

        assert_eq!(scroll.anchor(), None);
        store.append(Message::user("hi"));
        assert_eq!(scroll.anchor(), Some(0));
        store.append(Message::assistant("hello"));
        assert_eq!(scroll.anchor(), Some(1));
    }

    #[test]
    fn test_ignores_non_append_events() {
        let scroll = Arc::new(AutoScroll::new());
        let mut store = ConversationStore::new();
        store.subscribe(scroll.clone());

        store.set_input("draft");
        store.begin_request().unwrap();

        assert_eq!(scroll.anchor(), None);
    }
}
