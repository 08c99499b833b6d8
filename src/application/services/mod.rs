//! Application services - event loop and presence refresh

pub mod message_service;
pub mod presence_service;

pub use message_service::MessageService;
pub use presence_service::{presence_text, PresenceService, RefreshOutcome, DEFAULT_REFRESH_PERIOD, INITIAL_PRESENCE};
