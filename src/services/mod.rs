//! Services module
//!
//! This module contains business logic services

pub mod auth;
pub mod calendar;
pub mod catalog;
pub mod reconciler;
pub mod session;
pub mod storage;

// Re-export commonly used services
pub use auth::{AuthClient, AuthIdentity};
pub use calendar::{MonthGrid, DayCell, month_grid, prev_month, next_month};
pub use catalog::{CatalogService, CatalogFilter, CategorySelector, is_upcoming};
pub use reconciler::{ReconcilerService, RegistrationLedger, ToggleOutcome, FavoriteOutcome};
pub use session::SessionService;
pub use storage::{StorageClient, MediaKind};

use crate::config::settings::Settings;
use crate::database::DatabaseService;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Debug, Clone)]
pub struct ServiceFactory {
    pub catalog: CatalogService,
    pub reconciler: ReconcilerService,
    pub session: SessionService,
    pub storage: StorageClient,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub async fn new(settings: Settings, db: DatabaseService) -> Result<Self> {
        let auth = AuthClient::new(settings.auth.clone())?;
        let catalog = CatalogService::new(db.clone());
        let reconciler = ReconcilerService::new(db.clone());
        let session = SessionService::new(auth, db, settings.redis.clone()).await?;
        let storage = StorageClient::new(settings.storage.clone())?;

        Ok(Self {
            catalog,
            reconciler,
            session,
            storage,
        })
    }
}
