use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use annalist_application::{SystemLogFilter, SystemLogRepository};
use annalist_core::{AppError, AppResult};
use annalist_domain::SystemLogEntry;

/// Rows `trim` keeps when no explicit retention is configured.
const DEFAULT_RETAINED_ENTRIES: u32 = 2_000;

/// PostgreSQL-backed system-log store.
#[derive(Clone)]
pub struct PostgresSystemLogRepository {
    pool: PgPool,
    retained_entries: u32,
}

impl PostgresSystemLogRepository {
    /// Creates a repository with the default retention policy.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self::with_retention(pool, DEFAULT_RETAINED_ENTRIES)
    }

    /// Creates a repository whose `trim` keeps the newest `retained_entries`
    /// rows.
    #[must_use]
    pub fn with_retention(pool: PgPool, retained_entries: u32) -> Self {
        Self {
            pool,
            retained_entries,
        }
    }
}

#[derive(Debug, FromRow)]
struct SystemLogRow {
    id: i64,
    recorded_at: DateTime<Utc>,
    message: String,
    level: String,
    context: String,
    source: Option<String>,
}

impl From<SystemLogRow> for SystemLogEntry {
    fn from(row: SystemLogRow) -> Self {
        Self {
            id: row.id,
            recorded_at: row.recorded_at,
            message: row.message,
            level: row.level,
            context: row.context,
            source: row.source,
        }
    }
}

#[async_trait]
impl SystemLogRepository for PostgresSystemLogRepository {
    async fn clear(&self) -> AppResult<()> {
        sqlx::query("DELETE FROM system_log_entries")
            .execute(&self.pool)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to clear system log: {error}"))
            })?;

        Ok(())
    }

    async fn trim(&self) -> AppResult<()> {
        sqlx::query(
            r#"
            DELETE FROM system_log_entries
            WHERE id NOT IN (
                SELECT id
                FROM system_log_entries
                ORDER BY recorded_at DESC, id DESC
                LIMIT $1
            )
            "#,
        )
        .bind(i64::from(self.retained_entries))
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to trim system log: {error}")))?;

        Ok(())
    }

    async fn list_recent(
        &self,
        limit: u32,
        filter: SystemLogFilter,
    ) -> AppResult<Vec<SystemLogEntry>> {
        let rows = sqlx::query_as::<_, SystemLogRow>(
            r#"
            SELECT id, recorded_at, message, level, context, source
            FROM system_log_entries
            WHERE ($1::TEXT IS NULL OR level = $1)
                AND ($2::TEXT IS NULL OR context = $2)
            ORDER BY recorded_at DESC, id DESC
            LIMIT $3
            "#,
        )
        .bind(filter.level)
        .bind(filter.context)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list system log entries: {error}"))
        })?;

        Ok(rows.into_iter().map(SystemLogEntry::from).collect())
    }
}
