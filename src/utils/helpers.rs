//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use std::sync::OnceLock;

use regex::Regex;
use url::Url;
use uuid::Uuid;

use crate::utils::errors::{Result, UniEventsError};

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email regex")
    })
}

/// Check whether a string looks like an email address
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Validate an email address, returning a domain error on failure
pub fn validate_email(email: &str) -> Result<()> {
    if !is_valid_email(email) {
        return Err(UniEventsError::InvalidInput(format!(
            "'{}' is not a valid email address",
            email
        )));
    }
    Ok(())
}

/// Validate password length against the configured minimum
pub fn validate_password(password: &str, min_length: usize) -> Result<()> {
    if password.chars().count() < min_length {
        return Err(UniEventsError::InvalidInput(format!(
            "Password must be at least {} characters long",
            min_length
        )));
    }
    Ok(())
}

/// Build the public deep-link URL for an event.
///
/// Matches the web client's query-parameter scheme: `?event=<id>&welcome=1`.
/// The client renders this URL as a QR code and copies it to the clipboard.
pub fn build_share_url(base_url: &str, event_id: Uuid) -> Result<String> {
    let mut url = Url::parse(base_url)?;
    url.query_pairs_mut()
        .append_pair("event", &event_id.to_string())
        .append_pair("welcome", "1");
    Ok(url.to_string())
}

/// Parse a comma-separated filter value into trimmed, non-empty items
pub fn parse_csv_param(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("student@university.edu"));
        assert!(is_valid_email("first.last+tag@example.co.uk"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("missing@tld"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@.com"));
    }

    #[test]
    fn test_password_length() {
        assert!(validate_password("short", 8).is_err());
        assert!(validate_password("longenough", 8).is_ok());
    }

    #[test]
    fn test_share_url_carries_event_and_welcome_flag() {
        let id = Uuid::new_v4();
        let url = build_share_url("https://events.example.edu/", id).unwrap();
        assert!(url.contains(&format!("event={}", id)));
        assert!(url.contains("welcome=1"));
    }

    #[test]
    fn test_share_url_rejects_invalid_base() {
        assert!(build_share_url("not a url", Uuid::new_v4()).is_err());
    }

    #[test]
    fn test_parse_csv_param() {
        assert_eq!(
            parse_csv_param("Tech, Music ,,Art"),
            vec!["Tech".to_string(), "Music".to_string(), "Art".to_string()]
        );
        assert!(parse_csv_param("").is_empty());
    }
}
