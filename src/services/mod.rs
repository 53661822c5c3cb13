//! Services module
//!
//! This module contains business logic services

pub mod auth;
pub mod event;
pub mod profile;
pub mod session;
pub mod signup;

// Re-export commonly used services
pub use auth::{AuthOutcome, AuthService};
pub use event::EventService;
pub use profile::ProfileService;
pub use session::{SessionData, SessionStore};
pub use signup::SignupService;

use crate::config::settings::Settings;
use crate::database::service::DatabaseService;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub auth_service: AuthService,
    pub event_service: EventService,
    pub signup_service: SignupService,
    pub profile_service: ProfileService,
    pub session_store: SessionStore,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub async fn new(settings: Settings, db: DatabaseService) -> Result<Self> {
        let session_store = SessionStore::new(settings.redis.clone()).await?;
        let auth_service = AuthService::new(
            db.users.clone(),
            db.profiles.clone(),
            session_store.clone(),
            settings.clone(),
        );
        let event_service = EventService::new(db.clone(), settings.clone());
        let signup_service = SignupService::new(db.clone());
        let profile_service = ProfileService::new(db);

        Ok(Self {
            auth_service,
            event_service,
            signup_service,
            profile_service,
            session_store,
        })
    }
}
