use crate::domain::entities::{Message, Sender};

/// Display names for each sender
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub user: String,
    pub assistant: String,
}

impl Labels {
    pub fn for_sender(&self, sender: Sender) -> &str {
        match sender {
            Sender::User => &self.user,
            Sender::Assistant => &self.assistant,
        }
    }
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            user: "you".to_string(),
            assistant: "gemini".to_string(),
        }
    }
}

/// Render one transcript entry as `[index] name: text`.
///
/// Continuation lines are indented under the first so multi-line replies
/// stay visually grouped.
pub fn render_entry(index: usize, message: &Message, labels: &Labels) -> String {
    let header = format!("[{}] {}: ", index, labels.for_sender(message.sender()));
    let indent = " ".repeat(header.chars().count());

    let mut out = header;
    for (i, line) in message.text().lines().enumerate() {
        if i > 0 {
            out.push('\n');
            out.push_str(&indent);
        }
        out.push_str(line);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_single_line() {
        let labels = Labels::default();
        assert_eq!(render_entry(0, &Message::user("hi"), &labels), "[0] you: hi");
        assert_eq!(
            render_entry(1, &Message::assistant("hello"), &labels),
            "[1] gemini: hello"
        );
    }

    #[test]
    fn test_render_multi_line_indents() {
        let labels = Labels::default();
        let rendered = render_entry(2, &Message::assistant("one\ntwo"), &labels);
        assert_eq!(rendered, "[2] gemini: one\n            two");
    }

    #[test]
    fn test_render_empty_text() {
        let labels = Labels::default();
        assert_eq!(render_entry(3, &Message::assistant(""), &labels), "[3] gemini: ");
    }
}
