use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::messaging::MessageDispatcher;
use crate::application::state::SharedState;
use crate::domain::traits::{Bot, BotEvent};
use super::presence_service::INITIAL_PRESENCE;

/// Consumes transport events strictly in arrival order
pub struct MessageService {
    bot: Arc<dyn Bot>,
    dispatcher: MessageDispatcher,
    state: SharedState,
}

impl MessageService {
    pub fn new(bot: Arc<dyn Bot>, dispatcher: MessageDispatcher, state: SharedState) -> Self {
        Self { bot, dispatcher, state }
    }

    pub async fn handle_event(&self, event: BotEvent) {
        match event {
            BotEvent::Ready => {
                let info = self.bot.bot_info();
                tracing::info!("{} bot active as {} ({})", info.platform, info.name, info.id);
                self.state.mark_alive().await;
                if let Err(e) = self.bot.set_presence(INITIAL_PRESENCE).await {
                    tracing::warn!("Failed to set initial presence: {}", e);
                }
            }
            BotEvent::Message(message) => {
                self.dispatcher.dispatch(message).await;
            }
        }
    }

    /// Runs until the transport closes its event stream
    pub async fn run(&self, mut events: mpsc::UnboundedReceiver<BotEvent>) {
        while let Some(event) = events.recv().await {
            self.handle_event(event).await;
        }
        tracing::warn!("Transport event stream closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::errors::CommandError;
    use crate::application::messaging::CommandContext;
    use crate::domain::entities::{Channel, Command, CommandRegistry, Message, User};
    use crate::test_support::RecordingBot;

    async fn ping(ctx: CommandContext) -> Result<(), CommandError> {
        ctx.reply(format!("pong {}", ctx.rest)).await
    }

    #[tokio::test]
    async fn test_events_are_handled_in_order() {
        let bot = Arc::new(RecordingBot::default());
        let state = SharedState::default();
        let mut registry = CommandRegistry::new();
        registry.register(Command::new("ping", ping));
        let dispatcher = MessageDispatcher::new("!", registry, state.clone(), bot.clone());
        let service = MessageService::new(bot.clone(), dispatcher, state.clone());

        let (tx, rx) = mpsc::unbounded_channel();
        let channel = Channel::new("c", "general");
        tx.send(BotEvent::Ready).unwrap();
        for n in 0..3 {
            let message = Message::new(channel.clone(), User::new("u", "nomad"), format!("!ping {n}"));
            tx.send(BotEvent::Message(message)).unwrap();
        }
        drop(tx);

        service.run(rx).await;

        assert_eq!(bot.presence(), vec![INITIAL_PRESENCE.to_string()]);
        assert_eq!(bot.replies(), vec!["pong 0", "pong 1", "pong 2"]);
        let snapshot = state.snapshot().await;
        assert!(snapshot.alive);
        assert_eq!(snapshot.messages_processed, 3);
    }
}
