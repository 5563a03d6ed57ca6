//! Session context management
//!
//! One context per authenticated session: the profile snapshot, the
//! capability set resolved once at load, and the registration/favorite
//! ledger. Views read this context instead of re-fetching the profile.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc, Duration};

use crate::models::profile::{Profile, Role};
use crate::services::reconciler::RegistrationLedger;

/// What a session is allowed to do. Resolved once per session from the
/// profile role, not re-derived per view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    RegisterForEvents,
    FavoriteEvents,
    Comment,
    UploadImage,
    CreateEvent,
    EditEvent,
    DeleteEvent,
    UploadVideo,
}

impl Capability {
    /// Capability set for a role. Admins hold every user capability plus the
    /// event lifecycle and video upload gates.
    pub fn for_role(role: Role) -> HashSet<Capability> {
        let mut capabilities: HashSet<Capability> = [
            Capability::RegisterForEvents,
            Capability::FavoriteEvents,
            Capability::Comment,
            Capability::UploadImage,
        ]
        .into_iter()
        .collect();

        if role == Role::Admin {
            capabilities.insert(Capability::CreateEvent);
            capabilities.insert(Capability::EditEvent);
            capabilities.insert(Capability::DeleteEvent);
            capabilities.insert(Capability::UploadVideo);
        }

        capabilities
    }
}

/// Cached session state for one authenticated user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionContext {
    pub user_id: i64,
    pub display_name: String,
    pub role: Role,
    pub capabilities: HashSet<Capability>,
    pub ledger: RegistrationLedger,
    pub expires_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SessionContext {
    /// Build a fresh context from a loaded profile and membership sets
    pub fn new(profile: &Profile, ledger: RegistrationLedger, ttl_seconds: u64) -> Self {
        let role = Role::from_str(&profile.role);
        Self {
            user_id: profile.user_id,
            display_name: profile.display_name.clone(),
            role,
            capabilities: Capability::for_role(role),
            ledger,
            expires_at: Utc::now() + Duration::seconds(ttl_seconds as i64),
            updated_at: Utc::now(),
        }
    }

    pub fn can(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(role: &str) -> Profile {
        Profile {
            user_id: 42,
            display_name: "Sam".to_string(),
            role: role.to_string(),
            avatar_url: None,
            department: None,
            bio: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_admin_gets_lifecycle_and_video_capabilities() {
        let ctx = SessionContext::new(&profile("admin"), RegistrationLedger::default(), 3600);
        assert!(ctx.can(Capability::CreateEvent));
        assert!(ctx.can(Capability::EditEvent));
        assert!(ctx.can(Capability::DeleteEvent));
        assert!(ctx.can(Capability::UploadVideo));
        assert!(ctx.can(Capability::RegisterForEvents));
    }

    #[test]
    fn test_user_lacks_admin_capabilities() {
        let ctx = SessionContext::new(&profile("user"), RegistrationLedger::default(), 3600);
        assert!(!ctx.can(Capability::CreateEvent));
        assert!(!ctx.can(Capability::UploadVideo));
        assert!(ctx.can(Capability::RegisterForEvents));
        assert!(ctx.can(Capability::Comment));
        assert!(ctx.can(Capability::UploadImage));
    }

    #[test]
    fn test_fresh_context_is_not_expired() {
        let ctx = SessionContext::new(&profile("user"), RegistrationLedger::default(), 3600);
        assert!(!ctx.is_expired());
    }
}
