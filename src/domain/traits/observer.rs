use crate::domain::entities::Message;

/// Change notification published by the conversation store
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent<'a> {
    /// A message was appended at `index`
    MessageAppended { index: usize, message: &'a Message },
    /// The "awaiting reply" flag changed
    AwaitingChanged(bool),
    /// The draft input changed
    InputChanged(&'a str),
}

/// Observer trait - anything that reacts to conversation changes
pub trait StoreObserver: Send + Sync {
    fn on_change(&self, event: &StoreEvent<'_>);
}
