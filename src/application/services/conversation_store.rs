//! Conversation store - append-only transcript plus request/draft state

use std::sync::Arc;

use crate::application::errors::ChatError;
use crate::domain::entities::Message;
use crate::domain::traits::{StoreEvent, StoreObserver};

/// In-memory transcript for one chat view.
///
/// Messages are only ever appended. Every state transition is published
/// to the subscribed observers, in subscription order.
#[derive(Default)]
pub struct ConversationStore {
    messages: Vec<Message>,
    awaiting_reply: bool,
    input: String,
    observers: Vec<Arc<dyn StoreObserver>>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: Arc<dyn StoreObserver>) {
        self.observers.push(observer);
    }

    /// Add one message to the end of the transcript
    pub fn append(&mut self, message: Message) {
        let index = self.messages.len();
        tracing::debug!(
            index,
            id = message.id(),
            sender = message.sender().as_str(),
            "Appending message"
        );
        self.messages.push(message);
        self.notify(&StoreEvent::MessageAppended {
            index,
            message: &self.messages[index],
        });
    }

    /// Mark a request as in flight
    pub fn begin_request(&mut self) -> Result<(), ChatError> {
        if self.awaiting_reply {
            return Err(ChatError::RequestInFlight);
        }
        self.set_awaiting(true);
        Ok(())
    }

    /// Mark the in-flight request as finished
    pub fn end_request(&mut self) {
        if self.awaiting_reply {
            self.set_awaiting(false);
        }
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.awaiting_reply
    }

    pub fn current_input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.notify(&StoreEvent::InputChanged(&self.input));
    }

    /// Clear the draft and hand it back
    pub fn take_input(&mut self) -> String {
        let input = std::mem::take(&mut self.input);
        self.notify(&StoreEvent::InputChanged(&self.input));
        input
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn get(&self, index: usize) -> Option<&Message> {
        self.messages.get(index)
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    fn set_awaiting(&mut self, awaiting: bool) {
        self.awaiting_reply = awaiting;
        self.notify(&StoreEvent::AwaitingChanged(awaiting));
    }

    fn notify(&self, event: &StoreEvent<'_>) {
        for observer in &self.observers {
            observer.on_change(event);
        }
    }
}
