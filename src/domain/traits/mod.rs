//! Domain traits - Abstractions for infrastructure implementations

pub mod bot;
pub mod directory;

pub use bot::{Bot, BotEvent, BotInfo};
pub use directory::Directory;
