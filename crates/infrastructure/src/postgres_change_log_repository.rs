use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use annalist_application::{ChangeLogRepository, EntryRange};
use annalist_core::{AppError, AppResult};
use annalist_domain::{ChangeLogEntry, MutationKind};

#[cfg(test)]
mod tests;

/// Rows `trim` keeps when no explicit retention is configured.
const DEFAULT_RETAINED_ENTRIES: u32 = 2_000;

/// PostgreSQL-backed change-log store.
#[derive(Clone)]
pub struct PostgresChangeLogRepository {
    pool: PgPool,
    retained_entries: u32,
}

impl PostgresChangeLogRepository {
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
struct ChangeLogRow {
    id: i64,
    recorded_at: DateTime<Utc>,
    title: String,
    contenttype: String,
    contentid: String,
    mutation: String,
    diff: Option<String>,
    comment: Option<String>,
    ownerid: Option<i64>,
}

impl TryFrom<ChangeLogRow> for ChangeLogEntry {
    type Error = AppError;

    fn try_from(row: ChangeLogRow) -> Result<Self, Self::Error> {
        let mutation = MutationKind::from_str(row.mutation.as_str()).map_err(|_| {
            AppError::Internal(format!(
                "change log entry {} has corrupt mutation kind '{}'",
                row.id, row.mutation
            ))
        })?;

        Ok(Self {
            id: row.id,
            recorded_at: row.recorded_at,
            title: row.title,
            contenttype: row.contenttype,
            contentid: row.contentid,
            mutation,
            diff: row.diff,
            comment: row.comment,
            ownerid: row.ownerid,
        })
    }
}

fn map_rows(rows: Vec<ChangeLogRow>) -> AppResult<Vec<ChangeLogEntry>> {
    rows.into_iter().map(ChangeLogEntry::try_from).collect()
}

fn storage_error(operation: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |error| AppError::Internal(format!("failed to {operation}: {error}"))
}

#[async_trait]
impl ChangeLogRepository for PostgresChangeLogRepository {
    async fn clear(&self) -> AppResult<()> {
        sqlx::query("DELETE FROM change_log_entries")
            .execute(&self.pool)
            .await
            .map_err(storage_error("clear change log"))?;

        Ok(())
    }

    async fn trim(&self) -> AppResult<()> {
        sqlx::query(
            r#"
            DELETE FROM change_log_entries
            WHERE id NOT IN (
                SELECT id
                FROM change_log_entries
                ORDER BY recorded_at DESC, id DESC
                LIMIT $1
            )
            "#,
        )
        .bind(i64::from(self.retained_entries))
        .execute(&self.pool)
        .await
        .map_err(storage_error("trim change log"))?;

        Ok(())
    }

    async fn list_recent(&self, limit: u32) -> AppResult<Vec<ChangeLogEntry>> {
        let rows = sqlx::query_as::<_, ChangeLogRow>(
            r#"
            SELECT id, recorded_at, title, contenttype, contentid,
                   mutation, diff, comment, ownerid
            FROM change_log_entries
            ORDER BY recorded_at DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error("list recent change log entries"))?;

        map_rows(rows)
    }

    async fn find_entry(
        &self,
        contenttype: &str,
        contentid: &str,
        id: i64,
    ) -> AppResult<Option<ChangeLogEntry>> {
        let row = sqlx::query_as::<_, ChangeLogRow>(
            r#"
            SELECT id, recorded_at, title, contenttype, contentid,
                   mutation, diff, comment, ownerid
            FROM change_log_entries
            WHERE contenttype = $1 AND contentid = $2 AND id = $3
            "#,
        )
        .bind(contenttype)
        .bind(contentid)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error("find change log entry"))?;

        row.map(ChangeLogEntry::try_from).transpose()
    }

    async fn find_previous_entry(
        &self,
        contenttype: &str,
        contentid: &str,
        id: i64,
    ) -> AppResult<Option<ChangeLogEntry>> {
        let row = sqlx::query_as::<_, ChangeLogRow>(
            r#"
            SELECT id, recorded_at, title, contenttype, contentid,
                   mutation, diff, comment, ownerid
            FROM change_log_entries
            WHERE contenttype = $1 AND contentid = $2 AND id < $3
            ORDER BY id DESC
            LIMIT 1
            "#,
        )
        .bind(contenttype)
        .bind(contentid)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error("find previous change log entry"))?;

        row.map(ChangeLogEntry::try_from).transpose()
    }

    async fn find_next_entry(
        &self,
        contenttype: &str,
        contentid: &str,
        id: i64,
    ) -> AppResult<Option<ChangeLogEntry>> {
        let row = sqlx::query_as::<_, ChangeLogRow>(
            r#"
            SELECT id, recorded_at, title, contenttype, contentid,
                   mutation, diff, comment, ownerid
            FROM change_log_entries
            WHERE contenttype = $1 AND contentid = $2 AND id > $3
            ORDER BY id ASC
            LIMIT 1
            "#,
        )
        .bind(contenttype)
        .bind(contentid)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error("find next change log entry"))?;

        row.map(ChangeLogEntry::try_from).transpose()
    }

    async fn list_entries(&self, range: EntryRange) -> AppResult<Vec<ChangeLogEntry>> {
        // LIMIT NULL means no limit in PostgreSQL, matching the unbounded
        // "all" page.
        let rows = sqlx::query_as::<_, ChangeLogRow>(
            r#"
            SELECT id, recorded_at, title, contenttype, contentid,
                   mutation, diff, comment, ownerid
            FROM change_log_entries
            ORDER BY recorded_at DESC, id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(range.limit.map(i64::from))
        .bind(range.offset as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error("list change log entries"))?;

        map_rows(rows)
    }

    async fn count_entries(&self) -> AppResult<u64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM change_log_entries")
            .fetch_one(&self.pool)
            .await
            .map_err(storage_error("count change log entries"))?;

        Ok(count.max(0) as u64)
    }

    async fn list_entries_for_content_type(
        &self,
        contenttype: &str,
        range: EntryRange,
    ) -> AppResult<Vec<ChangeLogEntry>> {
        let rows = sqlx::query_as::<_, ChangeLogRow>(
            r#"
            SELECT id, recorded_at, title, contenttype, contentid,
                   mutation, diff, comment, ownerid
            FROM change_log_entries
            WHERE contenttype = $1
            ORDER BY recorded_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(contenttype)
        .bind(range.limit.map(i64::from))
        .bind(range.offset as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error("list change log entries for content type"))?;

        map_rows(rows)
    }

    async fn count_entries_for_content_type(&self, contenttype: &str) -> AppResult<u64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM change_log_entries WHERE contenttype = $1",
        )
        .bind(contenttype)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_error("count change log entries for content type"))?;

        Ok(count.max(0) as u64)
    }

    async fn list_entries_for_content_item(
        &self,
        contenttype: &str,
        contentid: &str,
        range: EntryRange,
    ) -> AppResult<Vec<ChangeLogEntry>> {
        let rows = sqlx::query_as::<_, ChangeLogRow>(
            r#"
            SELECT id, recorded_at, title, contenttype, contentid,
                   mutation, diff, comment, ownerid
            FROM change_log_entries
            WHERE contenttype = $1 AND contentid = $2
            ORDER BY recorded_at DESC, id DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(contenttype)
        .bind(contentid)
        .bind(range.limit.map(i64::from))
        .bind(range.offset as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error("list change log entries for content item"))?;

        map_rows(rows)
    }

    async fn count_entries_for_content_item(
        &self,
        contenttype: &str,
        contentid: &str,
    ) -> AppResult<u64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM change_log_entries
            WHERE contenttype = $1 AND contentid = $2
            "#,
        )
        .bind(contenttype)
        .bind(contentid)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_error("count change log entries for content item"))?;

        Ok(count.max(0) as u64)
    }
}
