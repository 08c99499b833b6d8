//! Infrastructure layer - External concerns
//! 
//! This layer contains:
//! - Config: Configuration loading
//! - Directory: HTTP client for the server listing
//! - Adapters: Platform integrations (Discord, console)
//! - State server: HTTP endpoint exposing the bot state

pub mod adapters;
pub mod config;
pub mod directory;
pub mod state_server;
