//! Session storage implementation
//!
//! This module handles persistence of authenticated sessions using Redis,
//! including serialization, expiration, and revocation. Sessions are keyed
//! by an opaque bearer token handed to the client at login.

use chrono::{DateTime, Duration, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use uuid::Uuid;

use crate::config::RedisConfig;
use crate::utils::errors::Result;

const TOKEN_LENGTH: usize = 48;

/// Data held for an authenticated session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    pub user_id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SessionData {
    pub fn is_expired(&self) -> bool {
        self.expires_at < Utc::now()
    }
}

/// Redis-based session store
#[derive(Clone)]
pub struct SessionStore {
    connection_manager: redis::aio::ConnectionManager,
    config: RedisConfig,
}

impl SessionStore {
    /// Create a new session store instance
    pub async fn new(config: RedisConfig) -> Result<Self> {
        let client = redis::Client::open(config.url.as_str())?;
        let connection_manager = redis::aio::ConnectionManager::new(client).await?;

        Ok(Self {
            connection_manager,
            config,
        })
    }

    /// Open a new session for a user, returning the bearer token
    pub async fn create_session(
        &self,
        user_id: Uuid,
        email: &str,
        ttl_seconds: u64,
    ) -> Result<String> {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LENGTH)
            .map(char::from)
            .collect();

        let session = SessionData {
            user_id,
            email: email.to_string(),
            created_at: Utc::now(),
            expires_at: Utc::now() + Duration::seconds(ttl_seconds as i64),
        };

        let key = self.session_key(&token);
        let serialized = serde_json::to_string(&session)?;

        let mut conn = self.connection_manager.clone();
        match conn.set_ex::<_, _, ()>(&key, serialized, ttl_seconds).await {
            Ok(_) => {
                debug!(user_id = %user_id, ttl_seconds = ttl_seconds, "Session created");
                Ok(token)
            }
            Err(e) => {
                error!(user_id = %user_id, error = %e, "Failed to save session to Redis");
                Err(e.into())
            }
        }
    }

    /// Load the session behind a bearer token, if valid
    pub async fn get_session(&self, token: &str) -> Result<Option<SessionData>> {
        let key = self.session_key(token);
        let mut conn = self.connection_manager.clone();

        let serialized: Option<String> = conn.get(&key).await?;

        match serialized {
            Some(data) => {
                let session: SessionData = serde_json::from_str(&data)?;

                // Redis TTL should have evicted it, but the timestamp is authoritative
                if session.is_expired() {
                    debug!(user_id = %session.user_id, "Session expired, removing");
                    self.delete_session(token).await?;
                    return Ok(None);
                }

                Ok(Some(session))
            }
            None => Ok(None),
        }
    }

    /// Revoke a session (sign-out)
    pub async fn delete_session(&self, token: &str) -> Result<()> {
        let key = self.session_key(token);
        let mut conn = self.connection_manager.clone();

        let deleted: u32 = conn.del(&key).await?;
        debug!(deleted = deleted, "Session delete requested");

        Ok(())
    }

    /// Check Redis connectivity
    pub async fn health_check(&self) -> Result<()> {
        let mut conn = self.connection_manager.clone();
        redis::cmd("PING").query_async::<_, String>(&mut conn).await?;
        Ok(())
    }

    fn session_key(&self, token: &str) -> String {
        format!("{}session:{}", self.config.prefix, token)
    }
}
