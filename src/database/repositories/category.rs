//! Category repository implementation

use sqlx::PgPool;
use crate::models::category::Category;
use crate::utils::errors::CampusHubError;

#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all categories
    pub async fn list(&self) -> Result<Vec<Category>, CampusHubError> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, label, color FROM event_categories ORDER BY label ASC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Find category by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Category>, CampusHubError> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, label, color FROM event_categories WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }
}
