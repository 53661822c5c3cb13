//! Profile handlers

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use uuid::Uuid;

use crate::middleware::CurrentUser;
use crate::models::profile::UpsertProfileRequest;
use crate::state::AppState;
use crate::utils::errors::Result;
use crate::utils::response::success;

/// GET /api/v1/profile
pub async fn get_profile(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> Result<Response> {
    let profile = state
        .services
        .profile_service
        .get(current_user.user_id)
        .await?;

    Ok(success(profile, "Profile found").into_response())
}

/// PUT /api/v1/profile
pub async fn upsert_profile(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(body): Json<UpsertProfileRequest>,
) -> Result<Response> {
    let profile = state
        .services
        .profile_service
        .upsert(current_user.user_id, body)
        .await?;

    Ok(success(profile, "Profile updated").into_response())
}

/// GET /api/v1/profile/missing-fields/:event_id
pub async fn missing_fields(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(event_id): Path<Uuid>,
) -> Result<Response> {
    let missing = state
        .services
        .profile_service
        .missing_fields(current_user.user_id, event_id)
        .await?;

    Ok(success(missing, "Missing fields computed").into_response())
}
