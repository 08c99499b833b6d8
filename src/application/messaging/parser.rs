//! Message parser - Splits prefixed text into a command name and arguments

/// Command invocation extracted from message text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub name: String,
    pub args: Vec<String>,
    /// Raw text after the command name, trimmed
    pub rest: String,
}

/// Parses command-prefixed text
#[derive(Debug, Clone)]
pub struct MessageParser {
    command_prefix: String,
}

impl MessageParser {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            command_prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.command_prefix
    }

    /// Returns `None` when the text does not start with the prefix.
    ///
    /// The command name is everything between the prefix and the first
    /// whitespace, so `"! online"` yields an empty name.
    pub fn parse(&self, text: &str) -> Option<ParsedCommand> {
        let cmd_text = text.strip_prefix(self.command_prefix.as_str())?;

        let (name, rest) = match cmd_text.find(char::is_whitespace) {
            Some(idx) => cmd_text.split_at(idx),
            None => (cmd_text, ""),
        };

        Some(ParsedCommand {
            name: name.to_string(),
            args: rest.split_whitespace().map(str::to_string).collect(),
            rest: rest.trim().to_string(),
        })
    }
}
