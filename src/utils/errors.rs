//! Error handling for CampusHub
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for the CampusHub application
#[derive(Error, Debug)]
pub enum CampusHubError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: i64 },

    #[error("Profile not found: {user_id}")]
    ProfileNotFound { user_id: i64 },

    #[error("Event {event_id} has reached its capacity")]
    CapacityReached { event_id: i64 },

    #[error("A toggle for event {event_id} is already in flight")]
    OperationInFlight { event_id: i64 },

    #[error("Object storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Auth service error: {0}")]
    AuthService(#[from] AuthError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Object storage specific errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Storage request timed out")]
    Timeout,

    #[error("Unsupported content type: {0}")]
    UnsupportedContentType(String),

    #[error("File too large: {size} bytes exceeds limit of {limit}")]
    FileTooLarge { size: usize, limit: usize },

    #[error("Storage service unavailable")]
    ServiceUnavailable,
}

/// Auth service specific errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Auth request failed: {0}")]
    RequestFailed(String),

    #[error("Auth service timed out")]
    Timeout,

    #[error("Invalid auth response: {0}")]
    InvalidResponse(String),

    #[error("No active session")]
    NoSession,
}

/// Result type alias for CampusHub operations
pub type Result<T> = std::result::Result<T, CampusHubError>;

/// Result type alias for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

impl CampusHubError {
    /// Check if the error is recoverable by retrying the operation
    pub fn is_recoverable(&self) -> bool {
        match self {
            CampusHubError::Database(_) => false,
            CampusHubError::Migration(_) => false,
            CampusHubError::Redis(_) => true,
            CampusHubError::Http(_) => true,
            CampusHubError::Serialization(_) => false,
            CampusHubError::Io(_) => true,
            CampusHubError::UrlParse(_) => false,
            CampusHubError::Config(_) => false,
            CampusHubError::PermissionDenied(_) => false,
            CampusHubError::Authentication(_) => false,
            CampusHubError::EventNotFound { .. } => false,
            CampusHubError::ProfileNotFound { .. } => false,
            CampusHubError::CapacityReached { .. } => false,
            CampusHubError::OperationInFlight { .. } => true,
            CampusHubError::Storage(_) => true,
            CampusHubError::AuthService(_) => true,
            CampusHubError::InvalidInput(_) => false,
            CampusHubError::ServiceUnavailable(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CampusHubError::Database(_) => ErrorSeverity::Critical,
            CampusHubError::Migration(_) => ErrorSeverity::Critical,
            CampusHubError::Config(_) => ErrorSeverity::Critical,
            CampusHubError::PermissionDenied(_) => ErrorSeverity::Warning,
            CampusHubError::Authentication(_) => ErrorSeverity::Warning,
            CampusHubError::CapacityReached { .. } => ErrorSeverity::Info,
            CampusHubError::OperationInFlight { .. } => ErrorSeverity::Info,
            CampusHubError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_error_is_not_recoverable() {
        let err = CampusHubError::CapacityReached { event_id: 7 };
        assert!(!err.is_recoverable());
        assert_eq!(err.severity(), ErrorSeverity::Info);
    }

    #[test]
    fn test_in_flight_error_is_recoverable() {
        let err = CampusHubError::OperationInFlight { event_id: 7 };
        assert!(err.is_recoverable());
    }
}
