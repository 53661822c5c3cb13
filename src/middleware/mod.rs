//! Middleware module
//!
//! This module contains middleware for request processing

pub mod auth;
pub mod rate_limit;

// Re-export commonly used middleware
pub use auth::CurrentUser;
pub use rate_limit::{RateLimitConfig, RateLimiter};
