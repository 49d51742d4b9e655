use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use annalist_application::ContentRepository;
use annalist_core::{AppError, AppResult};
use annalist_domain::ContentItem;

/// PostgreSQL-backed lookup for live content items.
#[derive(Clone)]
pub struct PostgresContentRepository {
    pool: PgPool,
}

impl PostgresContentRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ContentItemRow {
    contentid: String,
    title: String,
}

#[async_trait]
impl ContentRepository for PostgresContentRepository {
    async fn find_content(
        &self,
        contenttype: &str,
        contentid: &str,
    ) -> AppResult<Option<ContentItem>> {
        let row = sqlx::query_as::<_, ContentItemRow>(
            r#"
            SELECT contentid, title
            FROM content_items
            WHERE contenttype = $1 AND contentid = $2
            "#,
        )
        .bind(contenttype)
        .bind(contentid)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find content item: {error}")))?;

        Ok(row.map(|row| ContentItem {
            id: row.contentid,
            title: row.title,
        }))
    }
}
