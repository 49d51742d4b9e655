use async_trait::async_trait;

use annalist_core::AppResult;
use annalist_domain::{ChangeLogEntry, ContentItem, ContentTypeDefinition, SystemLogEntry};

/// Row window applied to listing queries.
///
/// `limit: None` means unbounded: the store returns every matching row and
/// callers must not compute a page count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryRange {
    /// Maximum rows returned, or `None` for all rows.
    pub limit: Option<u32>,
    /// Number of rows skipped for offset pagination.
    pub offset: u64,
}

impl EntryRange {
    /// Range covering every matching row.
    #[must_use]
    pub fn unbounded() -> Self {
        Self {
            limit: None,
            offset: 0,
        }
    }
}

/// Optional filters for system log activity queries.
///
/// Values are matched verbatim by the store; this layer never interprets
/// level or context labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemLogFilter {
    /// Exact severity label to match.
    pub level: Option<String>,
    /// Exact context label to match.
    pub context: Option<String>,
}

/// Storage port for the change log.
///
/// Every listing method returns entries ordered by recording date
/// descending. Title derivation for deleted content relies on the first
/// element being the most recent entry, so adapters must preserve this.
#[async_trait]
pub trait ChangeLogRepository: Send + Sync {
    /// Deletes every change-log entry. A no-op on an empty log.
    async fn clear(&self) -> AppResult<()>;

    /// Enforces retention, deleting entries beyond the policy threshold.
    async fn trim(&self) -> AppResult<()>;

    /// Returns the most recent entries for dashboard-style overviews.
    async fn list_recent(&self, limit: u32) -> AppResult<Vec<ChangeLogEntry>>;

    /// Finds one entry by its exact (contenttype, contentid, id) key.
    async fn find_entry(
        &self,
        contenttype: &str,
        contentid: &str,
        id: i64,
    ) -> AppResult<Option<ChangeLogEntry>>;

    /// Finds the entry recorded immediately before `id` for the same item.
    async fn find_previous_entry(
        &self,
        contenttype: &str,
        contentid: &str,
        id: i64,
    ) -> AppResult<Option<ChangeLogEntry>>;

    /// Finds the entry recorded immediately after `id` for the same item.
    async fn find_next_entry(
        &self,
        contenttype: &str,
        contentid: &str,
        id: i64,
    ) -> AppResult<Option<ChangeLogEntry>>;

    /// Lists entries across all content types.
    async fn list_entries(&self, range: EntryRange) -> AppResult<Vec<ChangeLogEntry>>;

    /// Counts entries across all content types.
    async fn count_entries(&self) -> AppResult<u64>;

    /// Lists entries for one content type.
    async fn list_entries_for_content_type(
        &self,
        contenttype: &str,
        range: EntryRange,
    ) -> AppResult<Vec<ChangeLogEntry>>;

    /// Counts entries for one content type.
    async fn count_entries_for_content_type(&self, contenttype: &str) -> AppResult<u64>;

    /// Lists entries for one content item.
    async fn list_entries_for_content_item(
        &self,
        contenttype: &str,
        contentid: &str,
        range: EntryRange,
    ) -> AppResult<Vec<ChangeLogEntry>>;

    /// Counts entries for one content item.
    async fn count_entries_for_content_item(
        &self,
        contenttype: &str,
        contentid: &str,
    ) -> AppResult<u64>;
}

/// Storage port for the system log.
#[async_trait]
pub trait SystemLogRepository: Send + Sync {
    /// Deletes every system-log entry. A no-op on an empty log.
    async fn clear(&self) -> AppResult<()>;

    /// Enforces retention, deleting entries beyond the policy threshold.
    async fn trim(&self) -> AppResult<()>;

    /// Returns the most recent entries matching the filter.
    async fn list_recent(
        &self,
        limit: u32,
        filter: SystemLogFilter,
    ) -> AppResult<Vec<SystemLogEntry>>;
}

/// Lookup port for content-type definitions.
#[async_trait]
pub trait ContentTypeRegistry: Send + Sync {
    /// Finds a content-type definition by slug.
    async fn find_content_type(&self, slug: &str) -> AppResult<Option<ContentTypeDefinition>>;
}

/// Lookup port for live content items.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Finds a live content item. Deleted content yields `None`.
    async fn find_content(
        &self,
        contenttype: &str,
        contentid: &str,
    ) -> AppResult<Option<ContentItem>>;
}
