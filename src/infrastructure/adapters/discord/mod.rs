//! Discord adapter

use std::sync::{Arc, Mutex, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use twilight_cache_inmemory::{InMemoryCache, ResourceType};
use twilight_gateway::{Event, EventTypeFlags, Intents, MessageSender, Shard, ShardId, StreamExt};
use twilight_http::Client as HttpClient;
use twilight_model::gateway::payload::incoming::MessageCreate;
use twilight_model::gateway::payload::outgoing::UpdatePresence;
use twilight_model::gateway::presence::{Activity, ActivityType, MinimalActivity, Status};
use twilight_model::id::marker::ChannelMarker;
use twilight_model::id::Id;
use twilight_model::util::Timestamp;

use crate::application::errors::BotError;
use crate::domain::entities::{Channel, Message, User};
use crate::domain::traits::{Bot, BotEvent, BotInfo};

/// Discord bot adapter: one gateway shard plus the REST client
pub struct DiscordAdapter {
    token: String,
    http: Arc<HttpClient>,
    cache: Arc<InMemoryCache>,
    sender: Mutex<Option<MessageSender>>,
    info: RwLock<BotInfo>,
}

impl DiscordAdapter {
    pub fn new(token: impl Into<String>) -> Self {
        let token = token.into();
        let cache: InMemoryCache = InMemoryCache::builder()
            .resource_types(ResourceType::CHANNEL)
            .build();

        Self {
            http: Arc::new(HttpClient::new(token.clone())),
            token,
            cache: Arc::new(cache),
            sender: Mutex::new(None),
            info: RwLock::new(BotInfo {
                id: "unknown".to_string(),
                name: "crymp-bot".to_string(),
                platform: "discord".to_string(),
            }),
        }
    }

    /// Verify the token and remember who we are
    async fn fetch_bot_info(&self) -> Result<(), BotError> {
        let user = self.http
            .current_user()
            .await
            .map_err(|e| BotError::Transport(format!("Discord login failed: {}", e)))?
            .model()
            .await
            .map_err(|e| BotError::Transport(format!("Invalid current user payload: {}", e)))?;

        let mut info = self.info.write().map_err(|_| BotError::Internal("Lock poisoned".to_string()))?;
        info.id = user.id.to_string();
        info.name = user.name;
        Ok(())
    }

    fn current_sender(&self) -> Result<MessageSender, BotError> {
        self.sender
            .lock()
            .map_err(|_| BotError::Internal("Lock poisoned".to_string()))?
            .clone()
            .ok_or_else(|| BotError::Transport("Discord gateway not started".to_string()))
    }
}

#[async_trait]
impl Bot for DiscordAdapter {
    async fn start(&self) -> Result<UnboundedReceiver<BotEvent>, BotError> {
        self.fetch_bot_info().await?;

        let intents = Intents::GUILDS
            | Intents::GUILD_MESSAGES
            | Intents::DIRECT_MESSAGES
            | Intents::MESSAGE_CONTENT;
        let shard = Shard::new(ShardId::ONE, self.token.clone(), intents);

        *self.sender
            .lock()
            .map_err(|_| BotError::Internal("Lock poisoned".to_string()))? = Some(shard.sender());

        let (tx, rx) = unbounded_channel();
        tokio::spawn(shard_runner(shard, tx, Arc::clone(&self.cache)));

        tracing::info!("Discord gateway starting");
        Ok(rx)
    }

    async fn send_message(&self, channel_id: &str, text: &str) -> Result<String, BotError> {
        let channel_id = parse_channel_id(channel_id)?;
        let sent = self.http
            .create_message(channel_id)
            .content(text)
            .await
            .map_err(|e| BotError::Network(format!("Error sending Discord message: {}", e)))?
            .model()
            .await
            .map_err(|e| BotError::Network(format!("Invalid sent message payload: {}", e)))?;

        Ok(sent.id.to_string())
    }

    async fn set_presence(&self, text: &str) -> Result<(), BotError> {
        let update = presence_update(text)?;
        self.current_sender()?
            .command(&update)
            .map_err(|e| BotError::Transport(format!("Failed to update presence: {}", e)))
    }

    fn bot_info(&self) -> BotInfo {
        match self.info.read() {
            Ok(info) => info.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

/// Pumps gateway events into `tx` until the shard stops or the receiver is dropped
async fn shard_runner(mut shard: Shard, tx: UnboundedSender<BotEvent>, cache: Arc<InMemoryCache>) {
    let shard_id = shard.id().number();
    let mut ready_seen = false;

    while let Some(item) = shard.next_event(EventTypeFlags::all()).await {
        let event = match item {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!("Shard {} => error receiving event: {}", shard_id, e);
                continue;
            }
        };
        cache.update(&event);

        let forwarded = match event {
            Event::Ready(ready) => {
                tracing::info!("Shard {} => READY as {} (ID={})", shard_id, ready.user.name, ready.user.id);
                first_ready(&mut ready_seen)
            }
            Event::MessageCreate(msg) => {
                let channel_name = cache
                    .channel(msg.channel_id)
                    .and_then(|c| c.name.clone())
                    .unwrap_or_else(|| msg.channel_id.to_string());
                Some(BotEvent::Message(to_message(&msg, channel_name)))
            }
            _ => None,
        };

        if let Some(event) = forwarded {
            if tx.send(event).is_err() {
                break;
            }
        }
    }

    tracing::warn!("Shard {} event loop ended", shard_id);
}

/// Reconnects re-identify and send READY again; only the first one is forwarded
fn first_ready(seen: &mut bool) -> Option<BotEvent> {
    if std::mem::replace(seen, true) {
        None
    } else {
        Some(BotEvent::Ready)
    }
}

fn to_message(msg: &MessageCreate, channel_name: String) -> Message {
    let mut author = User::new(msg.author.id.to_string(), msg.author.name.clone());
    if msg.author.bot {
        author = author.bot();
    }

    Message::new(Channel::new(msg.channel_id.to_string(), channel_name), author, msg.content.clone())
        .with_id(msg.id.to_string())
        .with_kind(format!("{:?}", msg.kind))
        .with_timestamp(to_datetime(msg.timestamp))
}

fn to_datetime(timestamp: Timestamp) -> DateTime<Utc> {
    let micros = timestamp.as_micros();
    let nanos = (micros.rem_euclid(1_000_000) * 1_000) as u32;
    DateTime::from_timestamp(micros.div_euclid(1_000_000), nanos).unwrap_or_else(Utc::now)
}

fn parse_channel_id(channel_id: &str) -> Result<Id<ChannelMarker>, BotError> {
    channel_id
        .parse::<u64>()
        .ok()
        .and_then(Id::new_checked)
        .ok_or_else(|| BotError::Transport(format!("Invalid channel ID: {}", channel_id)))
}

/// "Playing <text>" activity
fn presence_update(text: &str) -> Result<UpdatePresence, BotError> {
    let activity: Activity = MinimalActivity {
        kind: ActivityType::Playing,
        name: text.to_string(),
        url: None,
    }
    .into();

    UpdatePresence::new(vec![activity], false, None::<u64>, Status::Online)
        .map_err(|e| BotError::Transport(format!("Invalid presence: {}", e)))
}
