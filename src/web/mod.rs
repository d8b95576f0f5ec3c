//! Session web transport.
//!
//! Mirrors the command log to WebSocket clients, relays action envelopes from
//! the [`ActionDispatcher`](crate::actions::ActionDispatcher) to them, and
//! accepts action envelopes back.
mod api;
mod websocket;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{routing::get, Router};
use tokio::sync::broadcast;
use tower_http::cors::CorsLayer;
use tracing::{debug, info};

use crate::actions::{action_from_str, Action};
use crate::error::ActionError;
use crate::session::Session;

#[derive(Clone)]
pub struct WebState {
    pub session: Arc<Session>,
    pub actions_tx: broadcast::Sender<String>,
}

pub fn router(state: WebState) -> Router {
    Router::new()
        .route("/api/session", get(api::get_session))
        .route("/api/commands", get(api::list_commands))
        .route("/api/actions", axum::routing::post(api::post_action))
        .route("/ws", get(websocket::ws_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start_server(state: WebState, port: u16) -> Result<()> {
    let addr = format!("127.0.0.1:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind web transport on {}", addr))?;

    info!("Web transport listening on http://{}", addr);

    axum::serve(listener, router(state)).await?;
    Ok(())
}

/// Decodes an envelope sent by a client and acts on it.
///
/// `RUN` actions are executed in the session; other actions are only logged.
pub(crate) fn accept_action(session: &Arc<Session>, text: &str) -> Result<Action, ActionError> {
    let action = action_from_str(text)?;

    match &action {
        Action::Run(args) => {
            let session = session.clone();
            let command = args.command.clone();
            tokio::spawn(async move {
                session.execute(&command).await;
            });
        }
        other => debug!(action = ?other.action_type(), "ignoring client action"),
    }

    Ok(action)
}
