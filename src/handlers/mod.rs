//! Request handlers module
//!
//! This module contains all HTTP request handlers, grouped by surface:
//! authentication, public event discovery, signups, the organizer
//! dashboard, profiles, schools, and health.

pub mod admin;
pub mod auth;
pub mod events;
pub mod health;
pub mod profiles;
pub mod schools;
pub mod signups;
