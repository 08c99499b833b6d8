use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::application::errors::BotError;
use crate::domain::entities::Message;

/// Events delivered by a transport, in arrival order
#[derive(Debug, Clone)]
pub enum BotEvent {
    /// The transport finished connecting
    Ready,
    Message(Message),
}

/// Bot trait - abstraction for messaging platform adapters
#[async_trait]
pub trait Bot: Send + Sync {
    /// Connect and begin listening; events arrive on the returned receiver
    async fn start(&self) -> Result<mpsc::UnboundedReceiver<BotEvent>, BotError>;

    /// Send a message to a channel
    async fn send_message(&self, channel_id: &str, text: &str) -> Result<String, BotError>;

    /// Replace the visible activity text
    async fn set_presence(&self, text: &str) -> Result<(), BotError>;

    /// Get bot info
    fn bot_info(&self) -> BotInfo;
}

/// Bot information
#[derive(Debug, Clone)]
pub struct BotInfo {
    pub id: String,
    pub name: String,
    pub platform: String,
}
