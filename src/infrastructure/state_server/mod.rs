//! Read-only HTTP view of the bot state for external monitors

use std::net::SocketAddr;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::application::errors::BotError;
use crate::application::state::{StateReader, StateSnapshot};

pub const STATE_PATH: &str = "/discord/state";

pub fn router(reader: StateReader) -> Router {
    Router::new()
        .route(STATE_PATH, get(state_handler))
        .with_state(reader)
}

async fn state_handler(State(reader): State<StateReader>) -> Json<StateSnapshot> {
    Json(reader.snapshot().await)
}

/// Binds `addr` and serves the state endpoint on its own task.
/// Returns the bound address, which differs from `addr` for port 0.
pub async fn spawn(addr: SocketAddr, reader: StateReader) -> Result<(SocketAddr, JoinHandle<()>), BotError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| BotError::Network(format!("Failed to bind state endpoint on {}: {}", addr, e)))?;
    let local = listener
        .local_addr()
        .map_err(|e| BotError::Network(e.to_string()))?;

    tracing::info!("State endpoint listening on http://{}{}", local, STATE_PATH);

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router(reader)).await {
            tracing::error!("State endpoint error: {}", e);
        }
    });

    Ok((local, handle))
}
