//! Authentication service implementation
//!
//! This service handles account registration, password sign-in, session
//! retrieval and sign-out, and the password-reset token flow. Passwords are
//! hashed with Argon2; reset tokens are short-lived, purpose-tagged JWTs.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::settings::Settings;
use crate::database::repositories::{ProfileRepository, UserRepository};
use crate::models::user::{CreateUserRequest, User};
use crate::services::session::{SessionData, SessionStore};
use crate::utils::errors::{map_unique_violation, Result, UniEventsError};
use crate::utils::helpers;

const RESET_TOKEN_PURPOSE: &str = "password_reset";

/// Claims carried by a password-reset token
#[derive(Debug, Serialize, Deserialize)]
pub struct ResetClaims {
    pub sub: Uuid,
    pub exp: i64,
    pub purpose: String,
}

/// Outcome of a successful sign-up or sign-in
#[derive(Debug, Clone)]
pub struct AuthOutcome {
    pub user: User,
    pub token: String,
}

/// Authentication service for accounts and sessions
#[derive(Clone)]
pub struct AuthService {
    users: UserRepository,
    profiles: ProfileRepository,
    sessions: SessionStore,
    settings: Settings,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(
        users: UserRepository,
        profiles: ProfileRepository,
        sessions: SessionStore,
        settings: Settings,
    ) -> Self {
        Self {
            users,
            profiles,
            sessions,
            settings,
        }
    }

    /// Register a new account, create its empty profile, and open a session
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthOutcome> {
        helpers::validate_email(email)?;
        helpers::validate_password(password, self.settings.auth.min_password_length)?;

        let password_hash = hash_password(password)?;
        let user = self
            .users
            .create(CreateUserRequest {
                email: email.to_string(),
                password_hash,
            })
            .await
            .map_err(|e| match e {
                UniEventsError::Database(db) => {
                    map_unique_violation(db, UniEventsError::EmailTaken)
                }
                other => other,
            })?;

        self.profiles.create_empty(user.id).await?;

        let token = self
            .sessions
            .create_session(user.id, &user.email, self.settings.auth.session_ttl_seconds)
            .await?;

        info!(user_id = %user.id, "New account registered");
        Ok(AuthOutcome { user, token })
    }

    /// Verify credentials and open a session
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthOutcome> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| UniEventsError::Authentication("Invalid email or password".to_string()))?;

        if !verify_password(password, &user.password_hash) {
            warn!(user_id = %user.id, "Failed sign-in attempt");
            return Err(UniEventsError::Authentication(
                "Invalid email or password".to_string(),
            ));
        }

        let token = self
            .sessions
            .create_session(user.id, &user.email, self.settings.auth.session_ttl_seconds)
            .await?;

        info!(user_id = %user.id, "User signed in");
        Ok(AuthOutcome { user, token })
    }

    /// Revoke the session behind a bearer token
    pub async fn sign_out(&self, token: &str) -> Result<()> {
        self.sessions.delete_session(token).await
    }

    /// Resolve a bearer token to its session, if still valid
    pub async fn get_session(&self, token: &str) -> Result<Option<SessionData>> {
        self.sessions.get_session(token).await
    }

    /// Issue a password-reset token for an account.
    ///
    /// Returns None for unknown emails so the caller can answer with the
    /// same shape either way and not confirm account existence.
    pub async fn request_password_reset(&self, email: &str) -> Result<Option<String>> {
        let user = match self.users.find_by_email(email).await? {
            Some(user) => user,
            None => {
                debug!("Password reset requested for unknown email");
                return Ok(None);
            }
        };

        let claims = ResetClaims {
            sub: user.id,
            exp: (chrono::Utc::now()
                + chrono::Duration::seconds(self.settings.auth.reset_token_ttl_seconds as i64))
            .timestamp(),
            purpose: RESET_TOKEN_PURPOSE.to_string(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.settings.auth.jwt_secret.as_bytes()),
        )?;

        info!(user_id = %user.id, "Password reset token issued");
        Ok(Some(token))
    }

    /// Redeem a reset token and set a new password.
    ///
    /// Existing sessions are left untouched, matching the source system.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<()> {
        helpers::validate_password(new_password, self.settings.auth.min_password_length)?;

        let claims = decode::<ResetClaims>(
            token,
            &DecodingKey::from_secret(self.settings.auth.jwt_secret.as_bytes()),
            &Validation::default(),
        )?
        .claims;

        if claims.purpose != RESET_TOKEN_PURPOSE {
            return Err(UniEventsError::Authentication(
                "Token is not a password-reset token".to_string(),
            ));
        }

        let user = self
            .users
            .find_by_id(claims.sub)
            .await?
            .ok_or(UniEventsError::UserNotFound { user_id: claims.sub })?;

        let password_hash = hash_password(new_password)?;
        self.users.update_password_hash(user.id, &password_hash).await?;

        info!(user_id = %user.id, "Password reset completed");
        Ok(())
    }
}

/// Hash a password with Argon2 and a fresh random salt
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| UniEventsError::Authentication(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored Argon2 hash
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_round_trip() {
        let hash = hash_password("correct horse battery staple").unwrap();
        assert!(verify_password("correct horse battery staple", &hash));
        assert!(!verify_password("wrong password", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("same password").unwrap();
        let b = hash_password("same password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_garbage_stored_hash_never_verifies() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }

    #[test]
    fn test_reset_token_round_trip() {
        let secret = b"test-secret";
        let user_id = Uuid::new_v4();
        let claims = ResetClaims {
            sub: user_id,
            exp: (chrono::Utc::now() + chrono::Duration::hours(1)).timestamp(),
            purpose: RESET_TOKEN_PURPOSE.to_string(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret),
        )
        .unwrap();

        let decoded = decode::<ResetClaims>(
            &token,
            &DecodingKey::from_secret(secret),
            &Validation::default(),
        )
        .unwrap()
        .claims;

        assert_eq!(decoded.sub, user_id);
        assert_eq!(decoded.purpose, RESET_TOKEN_PURPOSE);
    }

    #[test]
    fn test_expired_reset_token_is_rejected() {
        let secret = b"test-secret";
        let claims = ResetClaims {
            sub: Uuid::new_v4(),
            exp: (chrono::Utc::now() - chrono::Duration::hours(1)).timestamp(),
            purpose: RESET_TOKEN_PURPOSE.to_string(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret),
        )
        .unwrap();

        let result = decode::<ResetClaims>(
            &token,
            &DecodingKey::from_secret(secret),
            &Validation::default(),
        );
        assert!(result.is_err());
    }
}
