use chrono::{DateTime, Utc};

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

impl Sender {
    pub fn as_str(&self) -> &str {
        match self {
            Sender::User => "user",
            Sender::Assistant => "assistant",
        }
    }
}

/// A single transcript entry. Fields are private so a message cannot
/// change once it has been created.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    id: String,
    sender: Sender,
    text: String,
    timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            sender,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Sender::Assistant, text)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_sender() {
        let msg = Message::user("hi");
        assert_eq!(msg.sender(), Sender::User);
        assert_eq!(msg.text(), "hi");

        let reply = Message::assistant("hello");
        assert_eq!(reply.sender(), Sender::Assistant);
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Message::user("same");
        let b = Message::user("same");
        assert_ne!(a.id(), b.id());
        assert_ne!(a, b);
    }

    #[test]
    fn test_sender_as_str() {
        assert_eq!(Sender::User.as_str(), "user");
        assert_eq!(Sender::Assistant.as_str(), "assistant");
    }
}
