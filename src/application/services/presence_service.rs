//! Presence refresher - keeps the bot's activity text in step with the directory

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::application::state::SharedState;
use crate::domain::entities::total_players;
use crate::domain::traits::{Bot, Directory};

pub const DEFAULT_REFRESH_PERIOD: Duration = Duration::from_secs(30);

/// Shown once the transport is ready, until the first refresh lands
pub const INITIAL_PRESENCE: &str = "😊";

/// Activity text for a player total
pub fn presence_text(total: u64) -> String {
    match total {
        0 => "No players online 😔".to_string(),
        1 => "1 player online 🤩".to_string(),
        2..=4 => format!("{} players online 🤗", total),
        _ => format!("{} players online 😊", total),
    }
}

/// Result of a single refresh tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Not connected yet
    Skipped,
    Updated(String),
    Failed,
}

pub struct PresenceService {
    directory: Arc<dyn Directory>,
    bot: Arc<dyn Bot>,
    state: SharedState,
    period: Duration,
}

impl PresenceService {
    pub fn new(directory: Arc<dyn Directory>, bot: Arc<dyn Bot>, state: SharedState) -> Self {
        Self {
            directory,
            bot,
            state,
            period: DEFAULT_REFRESH_PERIOD,
        }
    }

    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    pub async fn refresh(&self) -> RefreshOutcome {
        if !self.state.is_alive().await {
            return RefreshOutcome::Skipped;
        }

        let servers = match self.directory.fetch_servers().await {
            Ok(servers) => servers,
            Err(e) => {
                tracing::error!("Presence refresh failed: {}", e);
                return RefreshOutcome::Failed;
            }
        };

        let text = presence_text(total_players(&servers));
        if let Err(e) = self.bot.set_presence(&text).await {
            tracing::warn!("Failed to set presence: {}", e);
            return RefreshOutcome::Failed;
        }

        tracing::debug!("Presence set to {:?}", text);
        RefreshOutcome::Updated(text)
    }

    /// Refresh every period, first tick one period from now. Runs until the
    /// runtime shuts down; a panicking tick is logged and the next one still fires.
    pub fn spawn(self: Arc<Self>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + self.period, self.period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let service = Arc::clone(&self);
                if let Err(e) = tokio::spawn(async move { service.refresh().await }).await {
                    tracing::error!("Presence refresh aborted: {}", e);
                }
            }
        })
    }
}
