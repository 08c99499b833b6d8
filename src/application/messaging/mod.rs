//! Message handling - parsing, dispatching and replying

pub mod context;
pub mod dispatcher;
pub mod parser;

pub use context::{send_reply, truncate_reply, CommandContext, MAX_REPLY_CHARS, TRUNCATION_MARKER};
pub use dispatcher::{DispatchOutcome, MessageDispatcher, APOLOGY_REPLY};
pub use parser::{MessageParser, ParsedCommand};
