use super::User;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Channel a message arrived on; replies go back to the same channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub id: String,
    pub name: String,
}

impl Channel {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Message delivered by a transport
#[derive(Debug, Clone)]
pub struct Message {
    pub id: String,
    pub channel: Channel,
    pub author: User,
    pub kind: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(channel: Channel, author: User, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            channel,
            author,
            kind: "default".to_string(),
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// Author reference as exported in the state snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorRecord {
    pub name: String,
    pub id: String,
}

/// Immutable record of a processed human-authored message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundMessageRecord {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub channel: String,
    pub channel_id: String,
    pub author: AuthorRecord,
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
}

impl From<&Message> for InboundMessageRecord {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id.clone(),
            created_at: message.timestamp,
            channel: message.channel.name.clone(),
            channel_id: message.channel.id.clone(),
            author: AuthorRecord {
                name: message.author.username.clone(),
                id: message.author.id.clone(),
            },
            kind: message.kind.clone(),
            content: message.content.clone(),
        }
    }
}
