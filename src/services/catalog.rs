//! Event catalog loading and filtering
//!
//! The catalog is the ordered set of upcoming events shown to a user: every
//! event whose end timestamp is at or after "now", ascending by start time,
//! annotated with attendee counts and category labels.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::database::DatabaseService;
use crate::models::category::Category;
use crate::models::event::CatalogEntry;
use crate::utils::errors::Result;

/// Boundary predicate for the catalog: an event ending exactly at `now` is
/// still upcoming, one ending strictly before is not.
pub fn is_upcoming(end_time: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    end_time >= now
}

/// Category selector for the filter predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategorySelector {
    #[default]
    All,
    Category(i64),
}

/// Free-text + category filter, recomputed on every change
#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    pub search: String,
    pub category: CategorySelector,
}

impl CatalogFilter {
    pub fn new(search: Option<String>, category: Option<i64>) -> Self {
        Self {
            search: search.unwrap_or_default(),
            category: category.map_or(CategorySelector::All, CategorySelector::Category),
        }
    }

    /// Retain entries whose title or description case-insensitively contains
    /// the search text AND whose category matches the selector.
    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        self.matches_search(entry) && self.matches_category(entry)
    }

    fn matches_search(&self, entry: &CatalogEntry) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        if entry.title.to_lowercase().contains(&needle) {
            return true;
        }
        entry
            .description
            .as_deref()
            .map(|d| d.to_lowercase().contains(&needle))
            .unwrap_or(false)
    }

    fn matches_category(&self, entry: &CatalogEntry) -> bool {
        match self.category {
            CategorySelector::All => true,
            // An absent category never matches a specific selector
            CategorySelector::Category(id) => entry.category_id == Some(id),
        }
    }
}

/// Loads the upcoming-events catalog from the store
#[derive(Debug, Clone)]
pub struct CatalogService {
    db: DatabaseService,
}

impl CatalogService {
    pub fn new(db: DatabaseService) -> Self {
        Self { db }
    }

    /// Load all upcoming events, ascending by start time. Events ending
    /// exactly now are included.
    pub async fn load_upcoming(&self) -> Result<Vec<CatalogEntry>> {
        self.load_upcoming_at(Utc::now()).await
    }

    /// Load the catalog relative to an explicit "now". The store query
    /// pre-filters; `is_upcoming` is the boundary of record.
    pub async fn load_upcoming_at(&self, now: DateTime<Utc>) -> Result<Vec<CatalogEntry>> {
        let mut entries = self.db.events.upcoming_catalog(now).await?;
        entries.retain(|e| is_upcoming(e.end_time, now));
        debug!(count = entries.len(), "Catalog loaded");
        Ok(entries)
    }

    /// Load the catalog and apply a filter predicate
    pub async fn load_filtered(&self, filter: &CatalogFilter) -> Result<Vec<CatalogEntry>> {
        let entries = self.load_upcoming().await?;
        Ok(entries.into_iter().filter(|e| filter.matches(e)).collect())
    }

    /// List the available category labels
    pub async fn categories(&self) -> Result<Vec<Category>> {
        self.db.categories.list().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, description: Option<&str>, category_id: Option<i64>) -> CatalogEntry {
        let now = Utc::now();
        CatalogEntry {
            id: 1,
            title: title.to_string(),
            description: description.map(|d| d.to_string()),
            start_time: now,
            end_time: now,
            location: "Quad".to_string(),
            image_url: None,
            capacity: None,
            tags: None,
            category_id,
            organizer_id: 1,
            video_urls: None,
            attendee_count: 0,
            category_label: None,
            category_color: None,
        }
    }

    #[test]
    fn test_event_ending_exactly_now_is_upcoming() {
        let now = Utc::now();
        assert!(is_upcoming(now, now));
        assert!(is_upcoming(now + chrono::Duration::seconds(1), now));
        assert!(!is_upcoming(now - chrono::Duration::seconds(1), now));
    }

    #[test]
    fn test_search_is_case_insensitive_on_title() {
        let filter = CatalogFilter::new(Some("art".to_string()), None);
        assert!(filter.matches(&entry("Art Fair", None, None)));
        assert!(filter.matches(&entry("START HERE", None, None)));
        assert!(!filter.matches(&entry("Tech Talk", None, None)));
    }

    #[test]
    fn test_search_also_matches_description() {
        let filter = CatalogFilter::new(Some("ART".to_string()), None);
        assert!(filter.matches(&entry("Tech Talk", Some("with an art demo"), None)));
        assert!(!filter.matches(&entry("Tech Talk", None, None)));
    }

    #[test]
    fn test_category_selector_excludes_other_and_absent_categories() {
        let filter = CatalogFilter::new(None, Some(3));
        assert!(filter.matches(&entry("A", None, Some(3))));
        assert!(!filter.matches(&entry("B", None, Some(4))));
        assert!(!filter.matches(&entry("C", None, None)));
    }

    #[test]
    fn test_all_selector_matches_everything() {
        let filter = CatalogFilter::new(None, None);
        assert!(filter.matches(&entry("A", None, Some(3))));
        assert!(filter.matches(&entry("B", None, None)));
    }

    #[test]
    fn test_search_and_category_combine_with_and() {
        let filter = CatalogFilter::new(Some("fair".to_string()), Some(2));
        assert!(filter.matches(&entry("Art Fair", None, Some(2))));
        assert!(!filter.matches(&entry("Art Fair", None, Some(9))));
        assert!(!filter.matches(&entry("Tech Talk", None, Some(2))));
    }
}
