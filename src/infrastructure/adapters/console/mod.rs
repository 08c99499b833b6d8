//! Console adapter for development/testing

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::application::errors::BotError;
use crate::domain::entities::{Channel, Message, User};
use crate::domain::traits::{Bot, BotEvent, BotInfo};

/// Console bot adapter for local development
pub struct ConsoleAdapter {
    info: BotInfo,
    channel: Channel,
    user: User,
}

impl ConsoleAdapter {
    pub fn new() -> Self {
        Self {
            info: BotInfo {
                id: "console".to_string(),
                name: "crymp-bot".to_string(),
                platform: "console".to_string(),
            },
            channel: Channel::new("console", "console"),
            user: User::new("console-user", whoami()),
        }
    }
}

impl Default for ConsoleAdapter {
    fn default() -> Self {
        Self::new()
    }
}

/// Message for one line typed on stdin
fn line_message(channel: &Channel, user: &User, line: &str) -> Message {
    Message::new(channel.clone(), user.clone(), line.trim_end())
}

fn whoami() -> String {
    std::env::var("USER").unwrap_or_else(|_| "you".to_string())
}

#[async_trait]
impl Bot for ConsoleAdapter {
    async fn start(&self) -> Result<mpsc::UnboundedReceiver<BotEvent>, BotError> {
        tracing::info!("Starting console bot (dev mode)");
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(BotEvent::Ready)
            .map_err(|e| BotError::Transport(e.to_string()))?;

        let channel = self.channel.clone();
        let user = self.user.clone();
        tokio::spawn(async move {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        let message = line_message(&channel, &user, &line);
                        if tx.send(BotEvent::Message(message)).is_err() {
                            break;
                        }
                    }
                    Ok(None) => break,
                    Err(e) => {
                        tracing::error!("Failed to read stdin: {}", e);
                        break;
                    }
                }
            }
            tracing::info!("Console input closed");
        });

        Ok(rx)
    }

    async fn send_message(&self, _channel_id: &str, text: &str) -> Result<String, BotError> {
        println!("[BOT] {}", text);
        Ok(uuid::Uuid::new_v4().to_string())
    }

    async fn set_presence(&self, text: &str) -> Result<(), BotError> {
        println!("[PRESENCE] {}", text);
        Ok(())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_become_human_messages() {
        let adapter = ConsoleAdapter::new();
        let message = line_message(&adapter.channel, &adapter.user, "!online mesa\r");
        assert_eq!(message.channel.id, "console");
        assert!(!message.author.is_bot);
        assert_eq!(message.content, "!online mesa");
    }

    #[tokio::test]
    async fn test_start_reports_ready_first() {
        let adapter = ConsoleAdapter::new();
        let mut rx = adapter.start().await.unwrap();
        assert!(matches!(rx.recv().await, Some(BotEvent::Ready)));
    }
}
