//! HTTP endpoints of the session web transport.
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use super::{accept_action, WebState};
use crate::types::Command;

#[derive(Serialize)]
pub struct SessionResponse {
    id: String,
    prompt: String,
    commands: usize,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// Session id, rendered prompt and number of log records.
pub async fn get_session(State(state): State<WebState>) -> impl IntoResponse {
    Json(SessionResponse {
        id: state.session.id.to_string(),
        prompt: state.session.prompt.to_string(),
        commands: state.session.log.len(),
    })
}

/// The full command log, oldest first.
pub async fn list_commands(State(state): State<WebState>) -> Json<Vec<Command>> {
    Json(state.session.log.commands())
}

/// Accepts one action envelope as the request body.
pub async fn post_action(State(state): State<WebState>, body: String) -> impl IntoResponse {
    match accept_action(&state.session, &body) {
        Ok(action) => (StatusCode::ACCEPTED, Json(action.to_envelope())).into_response(),
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}
