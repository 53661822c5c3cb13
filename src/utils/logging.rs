//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging
//! utilities for the UniEvents application.

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration
///
/// Writes to stdout and to a daily-rolling log file. The returned guard must
/// stay alive for the lifetime of the process or file logging stops.
pub fn init_logging(config: &LoggingConfig) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "unievents.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log user actions with structured data
pub fn log_user_action(user_id: Uuid, action: &str, details: Option<&str>) {
    info!(
        user_id = %user_id,
        action = action,
        details = details,
        "User action performed"
    );
}

/// Log signup admissions and status changes
pub fn log_signup_action(event_id: Uuid, user_id: Uuid, action: &str, status: &str) {
    info!(
        event_id = %event_id,
        user_id = %user_id,
        action = action,
        status = status,
        "Signup action performed"
    );
}

/// Log organizer actions on events and rosters
pub fn log_organizer_action(organizer_id: Uuid, action: &str, event_id: Option<Uuid>, details: Option<&str>) {
    warn!(
        organizer_id = %organizer_id,
        action = action,
        event_id = ?event_id,
        details = details,
        "Organizer action performed"
    );
}
