//! Test data builders
//!
//! Helper functions for generating request payloads and random account
//! data used across the integration tests.

use fake::faker::internet::en::SafeEmail;
use fake::Fake;

use unievents::config::settings::Settings;
use unievents::models::profile::UpsertProfileRequest;

/// Settings suitable for service-level tests; no live Redis or server
pub fn test_settings() -> Settings {
    let mut settings = Settings::default();
    settings.auth.jwt_secret = "test-secret-key-for-integration-tests".to_string();
    settings.app.public_base_url = "https://events.test".to_string();
    settings
}

/// A random, unique-looking email address
pub fn random_email() -> String {
    let local: String = SafeEmail().fake();
    // Prefix with a uuid fragment so parallel fixtures never collide
    format!("{}-{}", &uuid::Uuid::new_v4().to_string()[..8], local)
}

/// A profile request with every field filled in
pub fn complete_profile_request() -> UpsertProfileRequest {
    UpsertProfileRequest {
        first_name: Some("Alex".to_string()),
        last_name: Some("Lindgren".to_string()),
        student_number: Some("s1234567".to_string()),
        age: Some(22),
        dietary_restrictions: Some("vegetarian".to_string()),
        interests: Some(vec!["dance".to_string(), "music".to_string()]),
    }
}

/// A profile request with only a first name set
pub fn partial_profile_request() -> UpsertProfileRequest {
    UpsertProfileRequest {
        first_name: Some("Alex".to_string()),
        last_name: None,
        student_number: None,
        age: None,
        dietary_restrictions: None,
        interests: None,
    }
}
