//! Application layer - Use cases and business logic
//! 
//! This layer contains:
//! - Commands: chat command handlers
//! - Errors: Domain-specific errors
//! - Messaging: Command parsing and dispatching
//! - Services: Event loop and presence refresh
//! - State: Shared bot state and message history

pub mod commands;
pub mod errors;
pub mod messaging;
pub mod services;
pub mod state;
