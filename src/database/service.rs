//! Database service layer
//!
//! This module provides a high-level interface to database operations

use crate::database::{
    DatabasePool, EventRepository, AttendanceRepository, FavoriteRepository,
    DiscussionRepository, ProfileRepository, CategoryRepository,
};
use crate::models::*;
use crate::utils::errors::CampusHubError;

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub events: EventRepository,
    pub attendance: AttendanceRepository,
    pub favorites: FavoriteRepository,
    pub discussions: DiscussionRepository,
    pub profiles: ProfileRepository,
    pub categories: CategoryRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            events: EventRepository::new(pool.clone()),
            attendance: AttendanceRepository::new(pool.clone()),
            favorites: FavoriteRepository::new(pool.clone()),
            discussions: DiscussionRepository::new(pool.clone()),
            profiles: ProfileRepository::new(pool.clone()),
            categories: CategoryRepository::new(pool),
        }
    }

    /// Ensure a profile row exists for an authenticated identity
    pub async fn initialize_profile(&self, user_id: i64, display_name: String) -> Result<Profile, CampusHubError> {
        if let Some(existing) = self.profiles.find_by_id(user_id).await? {
            return Ok(existing);
        }

        let request = UpsertProfileRequest {
            user_id,
            display_name,
            avatar_url: None,
            department: None,
            bio: None,
        };

        self.profiles.upsert(request).await
    }

    /// Post a comment and return the refetched full thread
    pub async fn post_comment(&self, request: CreateCommentRequest) -> Result<Vec<CommentWithAuthor>, CampusHubError> {
        let event_id = request.event_id;

        if self.events.find_by_id(event_id).await?.is_none() {
            return Err(CampusHubError::EventNotFound { event_id });
        }

        self.discussions.create(request).await?;
        self.discussions.thread_for_event(event_id).await
    }
}
