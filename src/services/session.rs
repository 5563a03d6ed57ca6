//! Session/profile provider
//!
//! Resolves the current identity once, loads the profile, derives the
//! capability set, seeds the registration/favorite ledger from the store,
//! and caches the whole context with an explicit load/invalidate lifecycle.

use std::collections::HashSet;
use tracing::{debug, info};

use crate::config::RedisConfig;
use crate::database::DatabaseService;
use crate::services::auth::AuthClient;
use crate::services::reconciler::RegistrationLedger;
use crate::state::{SessionContext, SessionStore};
use crate::utils::errors::{CampusHubError, Result};
use crate::utils::logging::log_session_event;

/// Loads and caches session contexts
#[derive(Debug, Clone)]
pub struct SessionService {
    auth: AuthClient,
    db: DatabaseService,
    store: SessionStore,
    ttl_seconds: u64,
}

impl SessionService {
    pub async fn new(
        auth: AuthClient,
        db: DatabaseService,
        redis_config: RedisConfig,
    ) -> Result<Self> {
        let ttl_seconds = redis_config.ttl_seconds;
        let store = SessionStore::new(redis_config).await?;
        store.test_connection().await?;

        Ok(Self {
            auth,
            db,
            store,
            ttl_seconds,
        })
    }

    /// Load the session context for a token: cached if present, otherwise
    /// resolved against the auth service and the store.
    pub async fn load(&self, token: &str) -> Result<SessionContext> {
        if let Some(context) = self.store.load(token).await? {
            log_session_event(context.user_id, "cache_hit");
            return Ok(context);
        }

        let identity = self.auth.current_user(token).await.map_err(|e| match e {
            CampusHubError::AuthService(crate::utils::errors::AuthError::NoSession) => {
                CampusHubError::Authentication("No active session".to_string())
            }
            other => other,
        })?;

        let profile = self
            .db
            .initialize_profile(identity.id, identity.resolved_name())
            .await?;

        let registered: HashSet<i64> = self
            .db
            .attendance
            .event_ids_for_user(profile.user_id)
            .await?
            .into_iter()
            .collect();
        let favorited: HashSet<i64> = self
            .db
            .favorites
            .event_ids_for_user(profile.user_id)
            .await?
            .into_iter()
            .collect();

        let ledger = RegistrationLedger::new(registered, favorited);
        let context = SessionContext::new(&profile, ledger, self.ttl_seconds);

        self.store.save(token, &context).await?;
        info!(user_id = context.user_id, role = ?context.role, "Session loaded");

        Ok(context)
    }

    /// Persist an updated session context (after a confirmed toggle)
    pub async fn persist(&self, token: &str, context: &mut SessionContext) -> Result<()> {
        context.touch();
        self.store.save(token, context).await
    }

    /// Invalidate the session: drop the cached context and sign out upstream
    pub async fn invalidate(&self, token: &str) -> Result<()> {
        self.store.delete(token).await?;
        self.auth.sign_out(token).await?;
        debug!("Session invalidated");
        Ok(())
    }
}
