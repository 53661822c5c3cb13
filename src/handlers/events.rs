//! Public event discovery handlers

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::event::EventFilter;
use crate::state::AppState;
use crate::utils::errors::Result;
use crate::utils::helpers::parse_csv_param;
use crate::utils::response::success;

#[derive(Debug, Default, Deserialize)]
pub struct EventListQuery {
    /// Case-insensitive name search
    pub q: Option<String>,
    /// Comma-separated category list
    pub categories: Option<String>,
    pub school: Option<String>,
    #[serde(default)]
    pub include_expired: bool,
}

#[derive(Debug, Serialize)]
struct SharePayload {
    url: String,
}

/// GET /api/v1/events
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventListQuery>,
) -> Result<Response> {
    let filter = EventFilter {
        search: query.q.filter(|q| !q.trim().is_empty()),
        categories: query
            .categories
            .map(|raw| parse_csv_param(&raw))
            .unwrap_or_default(),
        school: query.school.filter(|s| !s.trim().is_empty()),
        include_expired: query.include_expired,
    };

    let events = state.services.event_service.list_public(filter).await?;
    let message = format!("{} events found", events.len());
    Ok(success(events, message).into_response())
}

/// GET /api/v1/events/:id
pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Response> {
    let event = state.services.event_service.get_with_counts(event_id).await?;
    Ok(success(event, "Event found").into_response())
}

/// GET /api/v1/events/:id/share
pub async fn share_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Response> {
    let url = state.services.event_service.share_url(event_id).await?;
    Ok(success(SharePayload { url }, "Share link built").into_response())
}

/// GET /api/v1/events/meta/categories
pub async fn list_categories(State(state): State<AppState>) -> Result<Response> {
    let categories = state.services.event_service.categories().await?;
    Ok(success(categories, "Categories listed").into_response())
}
