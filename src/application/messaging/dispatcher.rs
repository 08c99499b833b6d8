//! Message dispatcher - Routes inbound messages to command handlers

use std::sync::Arc;

use crate::application::errors::CommandError;
use crate::application::state::SharedState;
use crate::domain::entities::{CommandHandler, CommandRegistry, Message};
use crate::domain::traits::Bot;
use super::context::{send_reply, CommandContext};
use super::parser::MessageParser;

/// Sent to the channel when a handler fails
pub const APOLOGY_REPLY: &str = "Oops, something went wrong 😖";

/// Where a message ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Written by a bot; counted only
    Ignored,
    /// Recorded, not a command
    Plain,
    /// Prefixed, but no command has that name
    Unmatched,
    /// Handler ran to completion
    Completed,
    /// Handler failed and the apology was attempted
    Failed,
}

/// Message dispatcher - counts, records and routes one message at a time
pub struct MessageDispatcher {
    parser: MessageParser,
    registry: Arc<CommandRegistry>,
    state: SharedState,
    bot: Arc<dyn Bot>,
}

impl MessageDispatcher {
    pub fn new(
        prefix: impl Into<String>,
        registry: CommandRegistry,
        state: SharedState,
        bot: Arc<dyn Bot>,
    ) -> Self {
        Self {
            parser: MessageParser::new(prefix),
            registry: Arc::new(registry),
            state,
            bot,
        }
    }

    /// Process one inbound message to completion
    pub async fn dispatch(&self, message: Message) -> DispatchOutcome {
        if !self.state.observe(&message).await {
            tracing::trace!("Ignoring message {} from bot {}", message.id, message.author);
            return DispatchOutcome::Ignored;
        }

        tracing::debug!("[{}] {}: {}", message.channel.name, message.author, message.content);

        let Some(parsed) = self.parser.parse(&message.content) else {
            return DispatchOutcome::Plain;
        };

        let Some(handler) = self.registry.resolve(&parsed.name) else {
            tracing::debug!("Unknown command: {}{}", self.parser.prefix(), parsed.name);
            return DispatchOutcome::Unmatched;
        };

        tracing::info!(
            "Command {} from {} in #{} (args: {:?})",
            parsed.name,
            message.author,
            message.channel.name,
            parsed.args
        );

        let channel = message.channel.clone();
        let ctx = CommandContext::new(
            Arc::clone(&self.bot),
            message,
            parsed.name.clone(),
            parsed.args,
            parsed.rest,
        );

        match invoke(handler, ctx).await {
            Ok(()) => DispatchOutcome::Completed,
            Err(e) => {
                tracing::error!("Command {} failed: {}", parsed.name, e);
                if let Err(send_err) = send_reply(self.bot.as_ref(), &channel, APOLOGY_REPLY).await {
                    tracing::warn!("Failed to send apology to #{}: {}", channel.name, send_err);
                }
                DispatchOutcome::Failed
            }
        }
    }
}

/// Runs the handler on its own task so a panic surfaces as an error
async fn invoke(handler: Arc<dyn CommandHandler>, ctx: CommandContext) -> Result<(), CommandError> {
    match tokio::spawn(async move { handler.execute(ctx).await }).await {
        Ok(result) => result,
        Err(join_err) => Err(CommandError::Panicked(join_err.to_string())),
    }
}
