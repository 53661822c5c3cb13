//! Application state
//!
//! The shared state handed to every request handler: configuration, the
//! database service, the service factory, and the login rate limiter.

use std::sync::Arc;

use crate::config::Settings;
use crate::database::{DatabasePool, DatabaseService};
use crate::middleware::rate_limit::RateLimiter;
use crate::services::ServiceFactory;

#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub pool: DatabasePool,
    pub db: DatabaseService,
    pub services: Arc<ServiceFactory>,
    pub rate_limiter: Arc<RateLimiter>,
}

impl AppState {
    pub fn new(
        settings: Settings,
        pool: DatabasePool,
        db: DatabaseService,
        services: ServiceFactory,
    ) -> Self {
        Self {
            settings,
            pool,
            db,
            services: Arc::new(services),
            rate_limiter: Arc::new(RateLimiter::default()),
        }
    }
}
