//! Bot state - liveness, counters and message history

pub mod bot_state;
pub mod history;

pub use bot_state::{BotState, SharedState, StateReader, StateSnapshot};
pub use history::{HistoryBuffer, HISTORY_CAPACITY};
