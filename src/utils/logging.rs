//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging
//! utilities for the CampusHub application.

use tracing::{info, warn, error, debug};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration. The returned guard owns the
/// file writer's worker thread; the caller must hold it for the process
/// lifetime or the rolling-file layer stops flushing.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "campushub.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log registration and favorite toggles with structured data
pub fn log_toggle(user_id: i64, event_id: i64, action: &str, applied: bool) {
    if applied {
        info!(
            user_id = user_id,
            event_id = event_id,
            action = action,
            "Toggle applied"
        );
    } else {
        warn!(
            user_id = user_id,
            event_id = event_id,
            action = action,
            "Toggle rejected"
        );
    }
}

/// Log event lifecycle actions (create/edit/delete)
pub fn log_event_action(event_id: i64, action: &str, user_id: i64, details: Option<&str>) {
    info!(
        event_id = event_id,
        action = action,
        user_id = user_id,
        details = details,
        "Event action performed"
    );
}

/// Log media uploads
pub fn log_media_upload(user_id: i64, content_type: &str, size: usize, url: &str) {
    info!(
        user_id = user_id,
        content_type = content_type,
        size = size,
        url = url,
        "Media uploaded"
    );
}

/// Log external API errors with context
pub fn log_api_error(api: &str, error: &str, context: Option<&str>) {
    error!(
        api = api,
        error = error,
        context = context,
        "API error occurred"
    );
}

/// Log session lifecycle events
pub fn log_session_event(user_id: i64, event: &str) {
    debug!(user_id = user_id, event = event, "Session event");
}

#[cfg(test)]
mod tests {
    use super::*;

    // The only test in the binary that installs a global subscriber
    #[test]
    fn test_init_logging_hands_back_the_writer_guard() {
        let dir = std::env::temp_dir().join("campushub-logging-test");
        std::fs::create_dir_all(&dir).unwrap();

        let config = LoggingConfig {
            level: "info".to_string(),
            file_path: dir.to_string_lossy().into_owned(),
        };

        let guard = init_logging(&config).unwrap();
        info!("guard held across this write");
        drop(guard);
    }
}
