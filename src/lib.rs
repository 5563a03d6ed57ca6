//! CampusHub Events Platform
//!
//! Backend for a campus events platform: an event catalog with live
//! attendee counts, registration and favorite reconciliation with
//! capacity checks, a month-grid calendar view, discussion threads,
//! media uploads, and session-based capability gating.

pub mod config;
pub mod database;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{CampusHubError, Result};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use handlers::{create_router, AppState};
pub use services::ServiceFactory;
pub use state::{SessionContext, SessionStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
