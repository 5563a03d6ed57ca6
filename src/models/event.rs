//! Event model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::utils::errors::{CampusHubError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub location: String,
    pub image_url: Option<String>,
    pub capacity: Option<i32>,
    pub tags: Option<Vec<String>>,
    pub category_id: Option<i64>,
    pub organizer_id: i64,
    pub video_urls: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An event as it appears in the catalog: annotated with the aggregated
/// attendee count and the optional category label/color.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CatalogEntry {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub location: String,
    pub image_url: Option<String>,
    pub capacity: Option<i32>,
    pub tags: Option<Vec<String>>,
    pub category_id: Option<i64>,
    pub organizer_id: i64,
    pub video_urls: Option<Vec<String>>,
    pub attendee_count: i64,
    pub category_label: Option<String>,
    pub category_color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub location: String,
    pub image_url: Option<String>,
    pub capacity: Option<i32>,
    pub tags: Option<Vec<String>>,
    pub category_id: Option<i64>,
    pub video_urls: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateEventRequest {
    pub title: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub location: String,
    pub image_url: Option<String>,
    pub capacity: Option<i32>,
    pub tags: Option<Vec<String>>,
    pub category_id: Option<i64>,
    pub video_urls: Option<Vec<String>>,
}

/// Required fields must be present and the end must fall strictly after the
/// start. Rejected before any store mutation is attempted.
fn validate_event_fields(
    title: &str,
    location: &str,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
) -> Result<()> {
    if title.trim().is_empty() {
        return Err(CampusHubError::InvalidInput("Title is required".to_string()));
    }

    if location.trim().is_empty() {
        return Err(CampusHubError::InvalidInput("Location is required".to_string()));
    }

    if end_time <= start_time {
        return Err(CampusHubError::InvalidInput(
            "End time must be after start time".to_string(),
        ));
    }

    Ok(())
}

impl CreateEventRequest {
    pub fn validate(&self) -> Result<()> {
        validate_event_fields(&self.title, &self.location, self.start_time, self.end_time)
    }
}

impl UpdateEventRequest {
    pub fn validate(&self) -> Result<()> {
        validate_event_fields(&self.title, &self.location, self.start_time, self.end_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn request(start: DateTime<Utc>, end: DateTime<Utc>) -> UpdateEventRequest {
        UpdateEventRequest {
            title: "Spring Concert".to_string(),
            description: None,
            start_time: start,
            end_time: end,
            location: "Amphitheater".to_string(),
            image_url: None,
            capacity: Some(200),
            tags: None,
            category_id: None,
            video_urls: None,
        }
    }

    #[test]
    fn test_end_after_start_is_accepted() {
        let now = Utc::now();
        assert!(request(now, now + Duration::hours(2)).validate().is_ok());
    }

    #[test]
    fn test_end_equal_to_start_is_rejected() {
        let now = Utc::now();
        assert!(request(now, now).validate().is_err());
    }

    #[test]
    fn test_end_before_start_is_rejected() {
        let now = Utc::now();
        assert!(request(now, now - Duration::minutes(1)).validate().is_err());
    }

    #[test]
    fn test_blank_required_fields_are_rejected() {
        let now = Utc::now();
        let mut req = request(now, now + Duration::hours(1));
        req.title = "   ".to_string();
        assert!(req.validate().is_err());

        let mut req = request(now, now + Duration::hours(1));
        req.location = String::new();
        assert!(req.validate().is_err());
    }
}
