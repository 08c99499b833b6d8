//! Chat commands

pub mod online;

use std::sync::Arc;

use crate::domain::entities::CommandRegistry;
use crate::domain::traits::Directory;

pub use online::OnlineCommand;

/// Registry with every built-in command
pub fn default_registry(directory: Arc<dyn Directory>) -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    registry.register(OnlineCommand::command(directory));
    registry
}
