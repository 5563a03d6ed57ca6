//! HTTP handlers module
//!
//! Thin axum layer over the services: session resolution, capability gates,
//! and JSON request/response mapping.

pub mod events;
pub mod registrations;
pub mod discussions;
pub mod profiles;
pub mod media;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::database::{DatabasePool, DatabaseService};
use crate::services::ServiceFactory;
use crate::state::{Capability, SessionContext};
use crate::utils::errors::{AuthError, CampusHubError, Result, StorageError};

/// Shared application state for all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub pool: DatabasePool,
    pub db: DatabaseService,
    pub services: ServiceFactory,
}

/// Build the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/events", get(events::list_events).post(events::create_event))
        .route("/api/events/calendar", get(events::calendar_view))
        .route(
            "/api/events/:id",
            get(events::get_event)
                .put(events::update_event)
                .delete(events::delete_event),
        )
        .route("/api/events/:id/registration", post(registrations::toggle_registration))
        .route("/api/events/:id/favorite", post(registrations::toggle_favorite))
        .route("/api/events/:id/attendees", get(registrations::attendee_roster))
        .route(
            "/api/events/:id/comments",
            get(discussions::get_thread).post(discussions::post_comment),
        )
        .route("/api/categories", get(events::list_categories))
        .route("/api/profile", get(profiles::me))
        .route("/api/signout", post(profiles::sign_out))
        .route("/api/media/:kind", post(media::upload_media))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
    database: bool,
}

async fn health_check(State(state): State<AppState>) -> Response {
    let database = crate::database::health_check(&state.pool).await.is_ok();
    Json(HealthPayload {
        status: "ok",
        service: "campushub-api",
        database,
    })
    .into_response()
}

/// Extract the bearer token from the Authorization header
pub(crate) fn bearer_token(headers: &HeaderMap) -> Result<String> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| CampusHubError::Authentication("Missing authorization header".to_string()))?;

    value
        .strip_prefix("Bearer ")
        .map(|t| t.to_string())
        .ok_or_else(|| CampusHubError::Authentication("Malformed authorization header".to_string()))
}

/// Resolve the session for a request
pub(crate) async fn load_session(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<(String, SessionContext)> {
    let token = bearer_token(headers)?;
    let session = state.services.session.load(&token).await?;
    Ok((token, session))
}

/// Capability gate; the set was resolved once at session load
pub(crate) fn require(session: &SessionContext, capability: Capability) -> Result<()> {
    if session.can(capability) {
        Ok(())
    } else {
        Err(CampusHubError::PermissionDenied(format!(
            "Session lacks capability {:?}",
            capability
        )))
    }
}

#[derive(Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl CampusHubError {
    fn status_code(&self) -> StatusCode {
        match self {
            CampusHubError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            CampusHubError::Authentication(_) => StatusCode::UNAUTHORIZED,
            CampusHubError::AuthService(AuthError::NoSession) => StatusCode::UNAUTHORIZED,
            CampusHubError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            CampusHubError::EventNotFound { .. } => StatusCode::NOT_FOUND,
            CampusHubError::ProfileNotFound { .. } => StatusCode::NOT_FOUND,
            CampusHubError::CapacityReached { .. } => StatusCode::CONFLICT,
            CampusHubError::OperationInFlight { .. } => StatusCode::CONFLICT,
            CampusHubError::Storage(StorageError::UnsupportedContentType(_))
            | CampusHubError::Storage(StorageError::FileTooLarge { .. }) => StatusCode::BAD_REQUEST,
            CampusHubError::Storage(_) | CampusHubError::AuthService(_) => StatusCode::BAD_GATEWAY,
            CampusHubError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            CampusHubError::InvalidInput(_) => "VALIDATION_ERROR",
            CampusHubError::Authentication(_) => "AUTH_ERROR",
            CampusHubError::AuthService(AuthError::NoSession) => "AUTH_ERROR",
            CampusHubError::PermissionDenied(_) => "FORBIDDEN",
            CampusHubError::EventNotFound { .. } => "NOT_FOUND",
            CampusHubError::ProfileNotFound { .. } => "NOT_FOUND",
            CampusHubError::CapacityReached { .. } => "EVENT_FULL",
            CampusHubError::OperationInFlight { .. } => "TOGGLE_IN_FLIGHT",
            CampusHubError::Storage(_) => "STORAGE_ERROR",
            CampusHubError::AuthService(_) => "AUTH_SERVICE_ERROR",
            _ => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for CampusHubError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();

        tracing::error!(error = %self, severity = %self.severity(), "Request failed");

        // Internal store errors are not exposed to the client
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            "An internal error occurred".to_string()
        } else {
            self.to_string()
        };

        (status, Json(ErrorBody { code, message })).into_response()
    }
}
