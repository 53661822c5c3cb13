//! Router construction
//!
//! Builds the full API router with CORS and request tracing layers.

use axum::http::{header, HeaderValue, Method};
use axum::routing::{delete, get, patch, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::CorsConfig;
use crate::handlers::{admin, auth, events, health, profiles, schools, signups};
use crate::state::AppState;

/// Build the application router
pub fn create_routes(state: AppState) -> Router {
    let cors = create_cors_layer(&state.settings.cors);

    let auth_routes = Router::new()
        .route("/signup", post(auth::sign_up))
        .route("/login", post(auth::sign_in))
        .route("/logout", post(auth::sign_out))
        .route("/session", get(auth::session))
        .route("/reset-request", post(auth::reset_request))
        .route("/reset-password", post(auth::reset_password));

    let event_routes = Router::new()
        .route("/", get(events::list_events))
        .route("/meta/categories", get(events::list_categories))
        .route("/:id", get(events::get_event))
        .route("/:id/share", get(events::share_event))
        .route("/:id/signups", post(signups::sign_up))
        .route("/:id/signups/me", delete(signups::cancel_signup));

    let admin_routes = Router::new()
        .route("/events", post(admin::create_event).get(admin::list_events))
        .route("/events/:id", patch(admin::update_event).delete(admin::delete_event))
        .route("/events/:id/lock", post(admin::lock_event))
        .route("/events/:id/unlock", post(admin::unlock_event))
        .route("/events/:id/archive", post(admin::archive_event))
        .route("/events/:id/unarchive", post(admin::unarchive_event))
        .route("/events/:id/attendees", get(admin::list_attendees))
        .route("/signups/:id/promote", post(admin::promote_signup))
        .route("/signups/:id/demote", post(admin::demote_signup))
        .route("/signups/:id", delete(admin::remove_signup));

    let profile_routes = Router::new()
        .route("/", get(profiles::get_profile).put(profiles::upsert_profile))
        .route("/missing-fields/:event_id", get(profiles::missing_fields));

    let api = Router::new()
        .nest("/auth", auth_routes)
        .nest("/events", event_routes)
        .nest("/admin", admin_routes)
        .nest("/profile", profile_routes)
        .route("/me/signups", get(signups::my_signups))
        .route("/schools", get(schools::list_schools));

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Build the CORS layer from configuration.
///
/// An empty origin list falls back to a permissive policy for development.
fn create_cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| {
            let trimmed = origin.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!("CORS: Invalid origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        warn!("CORS: No valid origins configured, using permissive settings for development");
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_layer_from_configured_origins() {
        let config = CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        };
        let _layer = create_cors_layer(&config);
    }

    #[test]
    fn test_cors_layer_with_empty_origins_does_not_panic() {
        let config = CorsConfig {
            allowed_origins: vec![],
        };
        let _layer = create_cors_layer(&config);
    }
}
