//! Attendance and favorite join rows

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A user's registration for an event. Existence implies registration.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Attendance {
    pub id: i64,
    pub event_id: i64,
    pub user_id: i64,
    pub registered_at: DateTime<Utc>,
}

/// A user's bookmark of an event without registering.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Favorite {
    pub id: i64,
    pub event_id: i64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Attendee roster row joined with the attendee's profile
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AttendeeProfile {
    pub user_id: i64,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub department: Option<String>,
    pub registered_at: DateTime<Utc>,
}
