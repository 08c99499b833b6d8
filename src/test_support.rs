//! In-memory transport and directory for unit tests

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::application::errors::{BotError, DirectoryError};
use crate::domain::entities::ServerEntry;
use crate::domain::traits::{Bot, BotEvent, BotInfo, Directory};

/// Transport that records everything sent through it
#[derive(Default)]
pub struct RecordingBot {
    sent: Mutex<Vec<(String, String)>>,
    presence: Mutex<Vec<String>>,
    fail_sends: bool,
}

impl RecordingBot {
    pub fn failing_sends() -> Self {
        Self {
            fail_sends: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn replies(&self) -> Vec<String> {
        self.sent().into_iter().map(|(_, text)| text).collect()
    }

    pub fn presence(&self) -> Vec<String> {
        self.presence.lock().unwrap().clone()
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn start(&self) -> Result<mpsc::UnboundedReceiver<BotEvent>, BotError> {
        let (_tx, rx) = mpsc::unbounded_channel();
        Ok(rx)
    }

    async fn send_message(&self, channel_id: &str, text: &str) -> Result<String, BotError> {
        if self.fail_sends {
            return Err(BotError::Transport("send refused".to_string()));
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push((channel_id.to_string(), text.to_string()));
        Ok(format!("sent-{}", sent.len()))
    }

    async fn set_presence(&self, text: &str) -> Result<(), BotError> {
        self.presence.lock().unwrap().push(text.to_string());
        Ok(())
    }

    fn bot_info(&self) -> BotInfo {
        BotInfo {
            id: "test".to_string(),
            name: "test-bot".to_string(),
            platform: "test".to_string(),
        }
    }
}

/// Directory that replays queued responses, then repeats the last one
pub struct ScriptedDirectory {
    responses: Mutex<VecDeque<Result<Vec<ServerEntry>, DirectoryError>>>,
    calls: Mutex<usize>,
}

impl ScriptedDirectory {
    pub fn new(responses: Vec<Result<Vec<ServerEntry>, DirectoryError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(0),
        }
    }

    pub fn serving(servers: Vec<ServerEntry>) -> Self {
        Self::new(vec![Ok(servers)])
    }

    pub fn failing(error: DirectoryError) -> Self {
        Self::new(vec![Err(error)])
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl Directory for ScriptedDirectory {
    async fn fetch_servers(&self) -> Result<Vec<ServerEntry>, DirectoryError> {
        *self.calls.lock().unwrap() += 1;
        let mut responses = self.responses.lock().unwrap();
        if responses.len() > 1 {
            responses.pop_front().unwrap()
        } else {
            responses.front().cloned().unwrap_or_else(|| Ok(Vec::new()))
        }
    }
}

pub fn server(name: &str, numpl: u32, maxpl: u32) -> ServerEntry {
    ServerEntry {
        name: name.to_string(),
        numpl,
        maxpl,
        ..ServerEntry::default()
    }
}
