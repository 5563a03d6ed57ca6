//! Session store implementation
//!
//! This module handles persistence of session contexts in Redis, including
//! serialization, expiration, and explicit invalidation.

use redis::AsyncCommands;
use tracing::{debug, warn, error};
use crate::utils::errors::Result;
use crate::config::RedisConfig;
use super::context::SessionContext;

/// Redis-backed session context store
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

    /// Save a session context under its token
    pub async fn save(&self, token: &str, context: &SessionContext) -> Result<()> {
        let key = self.session_key(token);
        debug!(user_id = context.user_id, "Saving session context");

        let serialized = match serde_json::to_string(context) {
            Ok(data) => data,
            Err(e) => {
                error!(user_id = context.user_id, error = %e, "Failed to serialize session context");
                return Err(e.into());
            }
        };

        let mut conn = self.connection_manager.clone();

        let ttl_seconds = {
            let now = chrono::Utc::now();
            let remaining = context.expires_at - now;
            std::cmp::max(remaining.num_seconds(), 60) as u64
        };

        conn.set_ex::<_, _, ()>(&key, serialized, ttl_seconds).await?;
        debug!(user_id = context.user_id, ttl_seconds = ttl_seconds, "Session context saved");
        Ok(())
    }

    /// Load the session context for a token, removing it if it has expired
    pub async fn load(&self, token: &str) -> Result<Option<SessionContext>> {
        let key = self.session_key(token);
        let mut conn = self.connection_manager.clone();

        let serialized: Option<String> = conn.get(&key).await?;

        match serialized {
            Some(data) => {
                let context: SessionContext = match serde_json::from_str(&data) {
                    Ok(ctx) => ctx,
                    Err(e) => {
                        warn!(error = %e, "Failed to deserialize session context, discarding");
                        self.delete(token).await?;
                        return Ok(None);
                    }
                };

                if context.is_expired() {
                    debug!(user_id = context.user_id, "Session context expired, removing");
                    self.delete(token).await?;
                    return Ok(None);
                }

                Ok(Some(context))
            }
            None => Ok(None),
        }
    }

    /// Invalidate a session (sign-out path)
    pub async fn delete(&self, token: &str) -> Result<()> {
        let key = self.session_key(token);
        let mut conn = self.connection_manager.clone();

        let deleted: u32 = conn.del(&key).await?;
        if deleted > 0 {
            debug!("Deleted session context");
        }

        Ok(())
    }

    /// Test Redis connection
    pub async fn test_connection(&self) -> Result<()> {
        let mut conn = self.connection_manager.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }

    fn session_key(&self, token: &str) -> String {
        format!("{}session:{}", self.config.prefix, token)
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
