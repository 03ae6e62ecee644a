//! Input parser - Parses raw console lines into structured input

/// Commands the console understands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Copy a message to the clipboard; `None` means the latest one
    Copy(Option<usize>),
    /// Reprint the whole transcript
    History,
    Help,
    Quit,
    /// Anything else that starts with the prefix
    Unknown(String),
}

/// A parsed console line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Command(ConsoleCommand),
    /// Text destined for the conversation, kept verbatim
    Utterance(String),
}

/// Parses console lines into `Input`
pub struct InputParser {
    command_prefix: String,
}

impl InputParser {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            command_prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.command_prefix
    }

    /// Parse a line
    pub fn parse(&self, line: &str) -> Input {
        match line.trim_start().strip_prefix(self.command_prefix.as_str()) {
            Some(cmd_text) if !self.command_prefix.is_empty() => {
                Input::Command(self.parse_command(cmd_text))
            }
            _ => Input::Utterance(line.to_string()),
        }
    }

    /// Parse a command without its prefix
    fn parse_command(&self, cmd_text: &str) -> ConsoleCommand {
        // Split command and arguments
        let mut parts = cmd_text.split_whitespace();
        let name = parts.next().unwrap_or("").to_lowercase();
        let arg = parts.next();

        match name.as_str() {
            "copy" | "c" => match arg.map(str::parse::<usize>) {
                None => ConsoleCommand::Copy(None),
                Some(Ok(index)) => ConsoleCommand::Copy(Some(index)),
                Some(Err(_)) => ConsoleCommand::Unknown(cmd_text.trim().to_string()),
            },
            "history" | "h" => ConsoleCommand::History,
            "help" | "?" => ConsoleCommand::Help,
            "quit" | "exit" | "q" => ConsoleCommand::Quit,
            _ => ConsoleCommand::Unknown(cmd_text.trim().to_string()),
        }
    }
}

impl Default for InputParser {
    fn default() -> Self {
        Self::new("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_utterance() {
        let parser = InputParser::default();
        assert_eq!(
            parser.parse("how are you"),
            Input::Utterance("how are you".to_string())
        );
    }

    #[test]
    fn test_utterance_kept_verbatim() {
        let parser = InputParser::default();
        assert_eq!(parser.parse("  hi  "), Input::Utterance("  hi  ".to_string()));
    }

    #[test]
    fn test_copy_command() {
        let parser = InputParser::default();
        assert_eq!(parser.parse("/copy"), Input::Command(ConsoleCommand::Copy(None)));
        assert_eq!(parser.parse("/copy 3"), Input::Command(ConsoleCommand::Copy(Some(3))));
        assert_eq!(parser.parse("/C 0"), Input::Command(ConsoleCommand::Copy(Some(0))));
        assert_eq!(
            parser.parse("/copy last"),
            Input::Command(ConsoleCommand::Unknown("copy last".to_string()))
        );
    }

    #[test]
    fn test_other_commands() {
        let parser = InputParser::default();
        assert_eq!(parser.parse("/history"), Input::Command(ConsoleCommand::History));
        assert_eq!(parser.parse("/help"), Input::Command(ConsoleCommand::Help));
        assert_eq!(parser.parse(" /quit"), Input::Command(ConsoleCommand::Quit));
        assert_eq!(
            parser.parse("/frobnicate now"),
            Input::Command(ConsoleCommand::Unknown("frobnicate now".to_string()))
        );
    }

    #[test]
    fn test_custom_prefix() {
        let parser = InputParser::new(":");
        assert_eq!(parser.parse(":q"), Input::Command(ConsoleCommand::Quit));
        assert_eq!(parser.parse("/q"), Input::Utterance("/q".to_string()));
    }
}
