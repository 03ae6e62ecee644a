use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::application::errors::{ChatError, SubmitError};
use crate::application::services::ConversationStore;
use crate::domain::entities::Message;
use crate::infrastructure::llm::LLM;

/// A reply that is still on the wire
pub type ReplyFuture = Pin<Box<dyn Future<Output = String> + Send>>;

/// A submission that passed validation and is ready to go out
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRequest {
    history: Vec<Message>,
    utterance: String,
}

/// Service that moves one utterance through the store and the LLM
pub struct ChatService {
    client: Arc<dyn LLM>,
}

impl ChatService {
    pub fn new(client: Arc<dyn LLM>) -> Self {
        Self { client }
    }

    /// Validate the draft, record it, and raise the awaiting flag.
    ///
    /// Blank drafts and drafts submitted while a reply is pending leave the
    /// store untouched.
    pub fn prepare(&self, store: &mut ConversationStore) -> Result<PendingRequest, SubmitError> {
        if store.current_input().trim().is_empty() {
            return Err(SubmitError::Blank);
        }
        if store.is_awaiting_reply() {
            return Err(SubmitError::AwaitingReply);
        }

        let history = store.messages().to_vec();
        let utterance = store.take_input();
        store.append(Message::user(utterance.clone()));
        store
            .begin_request()
            .map_err(|_| SubmitError::AwaitingReply)?;

        Ok(PendingRequest { history, utterance })
    }

    /// Issue the request. The returned future owns everything it needs and
    /// does not borrow the store.
    pub fn dispatch(&self, pending: PendingRequest) -> ReplyFuture {
        let client = Arc::clone(&self.client);
        Box::pin(async move { client.reply(&pending.history, &pending.utterance).await })
    }

    /// Record the reply and lower the awaiting flag
    pub fn settle(&self, store: &mut ConversationStore, reply: String) {
        store.append(Message::assistant(reply));
        store.end_request();
    }

    /// Full round trip for callers that can hold the store across the await
    pub async fn submit(&self, store: &mut ConversationStore) -> Result<(), SubmitError> {
        let pending = self.prepare(store)?;
        let reply = self.dispatch(pending).await;
        self.settle(store, reply);
        Ok(())
    }

    /// Put `text` in the draft and submit it
    pub async fn submit_text(
        &self,
        store: &mut ConversationStore,
        text: impl Into<String>,
    ) -> Result<(), SubmitError> {
        store.set_input(text);
        self.submit(store).await
    }

    /// One-shot exchange on a fresh conversation; returns the reply text
    pub async fn ask(&self, text: impl Into<String>) -> Result<String, ChatError> {
        let mut store = ConversationStore::new();
        self.submit_text(&mut store, text).await?;
        Ok(store
            .last()
            .map(|reply| reply.text().to_string())
            .unwrap_or_default())
    }
}
