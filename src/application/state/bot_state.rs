//! Process-wide bot state shared by the dispatcher, the presence refresher
//! and the state endpoint

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

use super::history::HistoryBuffer;
use crate::domain::entities::{InboundMessageRecord, Message};

/// Liveness, counters and recent history
#[derive(Debug, Clone)]
pub struct BotState {
    pub alive: bool,
    /// Reserved, never set
    pub tested: bool,
    /// Stays at the Unix epoch; nothing reassigns it
    pub last_sync: DateTime<Utc>,
    pub total_messages_processed: u64,
    pub history: HistoryBuffer,
}

impl BotState {
    pub fn new() -> Self {
        Self {
            alive: false,
            tested: false,
            last_sync: DateTime::<Utc>::UNIX_EPOCH,
            total_messages_processed: 0,
            history: HistoryBuffer::new(),
        }
    }

    /// Counts `message` and records it unless a bot wrote it.
    /// Returns whether it was recorded.
    pub fn observe(&mut self, message: &Message) -> bool {
        self.total_messages_processed += 1;
        if message.author.is_bot {
            return false;
        }
        self.history.record(InboundMessageRecord::from(message));
        true
    }

    pub fn snapshot(&self, now: DateTime<Utc>) -> StateSnapshot {
        let since = now.signed_duration_since(self.last_sync).num_milliseconds().max(0);
        StateSnapshot {
            alive: self.alive,
            tested: self.tested,
            time_since_last_sync: since as u64,
            messages_processed: self.total_messages_processed,
            messages: self.history.snapshot(),
        }
    }
}

impl Default for BotState {
    fn default() -> Self {
        Self::new()
    }
}

/// Exported view of `BotState`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSnapshot {
    pub alive: bool,
    pub tested: bool,
    /// Milliseconds
    pub time_since_last_sync: u64,
    pub messages_processed: u64,
    pub messages: Vec<InboundMessageRecord>,
}

/// Cloneable handle to the single `BotState`
#[derive(Debug, Clone, Default)]
pub struct SharedState {
    inner: Arc<RwLock<BotState>>,
}

impl SharedState {
    pub async fn is_alive(&self) -> bool {
        self.inner.read().await.alive
    }

    pub async fn mark_alive(&self) {
        self.inner.write().await.alive = true;
    }

    pub async fn observe(&self, message: &Message) -> bool {
        self.inner.write().await.observe(message)
    }

    pub async fn snapshot(&self) -> StateSnapshot {
        self.inner.read().await.snapshot(Utc::now())
    }

    /// Read-only handle for the state endpoint
    pub fn reader(&self) -> StateReader {
        StateReader {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Snapshot-only access to the bot state
#[derive(Debug, Clone)]
pub struct StateReader {
    inner: Arc<RwLock<BotState>>,
}

impl StateReader {
    pub async fn snapshot(&self) -> StateSnapshot {
        self.inner.read().await.snapshot(Utc::now())
    }
}
