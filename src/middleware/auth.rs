//! Authentication middleware
//!
//! Bearer-token extraction: handlers that need an authenticated caller take
//! a `CurrentUser` argument, which resolves the Authorization header to a
//! live session or rejects the request with 401.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::state::AppState;
use crate::utils::errors::UniEventsError;

/// The authenticated caller, resolved from the bearer token's session
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: Uuid,
    pub email: String,
    /// Raw bearer token; needed for sign-out
    pub token: String,
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = UniEventsError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(parts).ok_or_else(|| {
            UniEventsError::Authentication("Missing or malformed Authorization header".to_string())
        })?;

        let session = state
            .services
            .session_store
            .get_session(&token)
            .await?
            .ok_or_else(|| {
                UniEventsError::Authentication("Session is invalid or expired".to_string())
            })?;

        Ok(CurrentUser {
            user_id: session.user_id,
            email: session.email,
            token,
        })
    }
}

fn extract_bearer_token(parts: &Parts) -> Option<String> {
    let header = parts.headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
