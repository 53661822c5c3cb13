//! School handlers
//!
//! Schools back the event list's theming and filtering; read-only.

use axum::extract::State;
use axum::response::{IntoResponse, Response};

use crate::state::AppState;
use crate::utils::errors::Result;
use crate::utils::response::success;

/// GET /api/v1/schools
pub async fn list_schools(State(state): State<AppState>) -> Result<Response> {
    let schools = state.db.schools.list().await?;
    Ok(success(schools, "Schools listed").into_response())
}
