//! Health check handler

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::database::connection;
use crate::state::AppState;
use crate::utils::errors::{Result, UniEventsError};
use crate::utils::response::success;

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Result<Response> {
    connection::health_check(&state.pool).await?;

    state
        .services
        .session_store
        .health_check()
        .await
        .map_err(|_| UniEventsError::ServiceUnavailable("Session store unreachable".to_string()))?;

    let payload = HealthPayload {
        status: "ok",
        service: "unievents-api",
    };
    Ok(success(payload, "Health check successful").into_response())
}
