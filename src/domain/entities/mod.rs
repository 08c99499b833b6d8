//! Domain entities - Core bot objects

pub mod user;
pub mod message;
pub mod command;
pub mod server;

pub use user::User;
pub use message::{AuthorRecord, Channel, InboundMessageRecord, Message};
pub use command::{Command, CommandHandler, CommandRegistry};
pub use server::{total_players, PlayerEntry, ServerEntry};
