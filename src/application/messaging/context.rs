//! Context handed to command handlers, and the single reply path

use std::borrow::Cow;
use std::sync::Arc;

use crate::application::errors::{BotError, CommandError};
use crate::domain::entities::{Channel, Message};
use crate::domain::traits::Bot;

/// Longest reply sent as-is, in characters
pub const MAX_REPLY_CHARS: usize = 2000;

/// Appended to replies cut at `MAX_REPLY_CHARS`
pub const TRUNCATION_MARKER: &str = "...";

/// Cuts `text` to `MAX_REPLY_CHARS` characters plus the marker when it is longer.
pub fn truncate_reply(text: &str) -> Cow<'_, str> {
    match text.char_indices().nth(MAX_REPLY_CHARS) {
        Some((cut, _)) => Cow::Owned(format!("{}{}", &text[..cut], TRUNCATION_MARKER)),
        None => Cow::Borrowed(text),
    }
}

/// Sends `text` to `channel`. Every outbound reply goes through here.
pub async fn send_reply(bot: &dyn Bot, channel: &Channel, text: &str) -> Result<String, BotError> {
    let text = truncate_reply(text);
    bot.send_message(&channel.id, &text).await
}

/// Invocation of a command: the originating message plus parsed arguments
#[derive(Clone)]
pub struct CommandContext {
    bot: Arc<dyn Bot>,
    pub message: Message,
    pub command: String,
    pub args: Vec<String>,
    /// Raw text after the command name, trimmed
    pub rest: String,
}

impl CommandContext {
    pub fn new(
        bot: Arc<dyn Bot>,
        message: Message,
        command: impl Into<String>,
        args: Vec<String>,
        rest: impl Into<String>,
    ) -> Self {
        Self {
            bot,
            message,
            command: command.into(),
            args,
            rest: rest.into(),
        }
    }

    pub fn channel(&self) -> &Channel {
        &self.message.channel
    }

    /// Reply in the channel the command came from
    pub async fn reply(&self, text: impl AsRef<str>) -> Result<(), CommandError> {
        send_reply(self.bot.as_ref(), self.channel(), text.as_ref())
            .await
            .map(|_| ())
            .map_err(|e| CommandError::Reply(e.to_string()))
    }
}
