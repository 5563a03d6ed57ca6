//! Event catalog, calendar and lifecycle handlers

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::attendance::AttendeeProfile;
use crate::models::category::Category;
use crate::models::discussion::CommentWithAuthor;
use crate::models::event::{CatalogEntry, CreateEventRequest, Event, UpdateEventRequest};
use crate::services::catalog::CatalogFilter;
use crate::services::calendar::{month_grid, MonthGrid};
use crate::state::Capability;
use crate::utils::errors::{CampusHubError, Result};
use crate::utils::logging::log_event_action;

use super::{load_session, require, AppState};

#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    pub search: Option<String>,
    pub category: Option<i64>,
}

/// List upcoming events, optionally filtered by search text and category
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Result<Json<Vec<CatalogEntry>>> {
    let filter = CatalogFilter::new(query.search, query.category);
    let entries = state.services.catalog.load_filtered(&filter).await?;
    Ok(Json(entries))
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub year: i32,
    pub month: u32,
    pub search: Option<String>,
    pub category: Option<i64>,
}

/// Month grid of the filtered catalog for the requested reference month
pub async fn calendar_view(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<MonthGrid>> {
    let filter = CatalogFilter::new(query.search, query.category);
    let entries = state.services.catalog.load_filtered(&filter).await?;

    let grid = month_grid(query.year, query.month, &entries).ok_or_else(|| {
        CampusHubError::InvalidInput(format!("Invalid reference month: {}-{}", query.year, query.month))
    })?;

    Ok(Json(grid))
}

/// List the available categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>> {
    let categories = state.services.catalog.categories().await?;
    Ok(Json(categories))
}

#[derive(Debug, Serialize)]
pub struct EventDetail {
    pub event: CatalogEntry,
    pub thread: Vec<CommentWithAuthor>,
    pub roster: Vec<AttendeeProfile>,
}

/// Single-event detail: annotated event, discussion thread, attendee roster
pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
) -> Result<Json<EventDetail>> {
    let event = state
        .db
        .events
        .catalog_entry(event_id)
        .await?
        .ok_or(CampusHubError::EventNotFound { event_id })?;

    let thread = state.db.discussions.thread_for_event(event_id).await?;
    let roster = state.db.attendance.roster(event_id).await?;

    Ok(Json(EventDetail { event, thread, roster }))
}

/// Reject a category id that has no corresponding row before the store
/// turns it into a foreign-key error
async fn ensure_known_category(state: &AppState, category_id: Option<i64>) -> Result<()> {
    if let Some(id) = category_id {
        if state.db.categories.find_by_id(id).await?.is_none() {
            return Err(CampusHubError::InvalidInput(format!("Unknown category: {}", id)));
        }
    }
    Ok(())
}

/// Create an event (admin capability)
pub async fn create_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateEventRequest>,
) -> Result<Json<Event>> {
    let (_, session) = load_session(&state, &headers).await?;
    require(&session, Capability::CreateEvent)?;

    request.validate()?;
    ensure_known_category(&state, request.category_id).await?;

    let event = state.db.events.create(session.user_id, request).await?;
    log_event_action(event.id, "create", session.user_id, None);

    Ok(Json(event))
}

/// Update an event in place (admin capability). The response carries the
/// stored row with the submitted values; derived counts are not recomputed.
pub async fn update_event(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
    headers: HeaderMap,
    Json(request): Json<UpdateEventRequest>,
) -> Result<Json<Event>> {
    let (_, session) = load_session(&state, &headers).await?;
    require(&session, Capability::EditEvent)?;

    request.validate()?;
    ensure_known_category(&state, request.category_id).await?;

    if state.db.events.find_by_id(event_id).await?.is_none() {
        return Err(CampusHubError::EventNotFound { event_id });
    }

    let event = state.db.events.update(event_id, request).await?;
    log_event_action(event_id, "update", session.user_id, None);

    Ok(Json(event))
}

/// Delete an event (admin capability)
pub async fn delete_event(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>> {
    let (_, session) = load_session(&state, &headers).await?;
    require(&session, Capability::DeleteEvent)?;

    if state.db.events.find_by_id(event_id).await?.is_none() {
        return Err(CampusHubError::EventNotFound { event_id });
    }

    state.db.events.delete(event_id).await?;
    info!(event_id = event_id, user_id = session.user_id, "Event deleted");

    Ok(Json(serde_json::json!({ "deleted": event_id })))
}
