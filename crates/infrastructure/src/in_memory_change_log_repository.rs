use async_trait::async_trait;
use tokio::sync::RwLock;

use annalist_application::{ChangeLogRepository, EntryRange};
use annalist_core::AppResult;
use annalist_domain::ChangeLogEntry;


/// Rows `trim` keeps when no explicit retention is configured.
const DEFAULT_RETAINED_ENTRIES: usize = 2_000;

/// In-memory change-log store for tests and local development.
///
/// Entries are kept sorted by recording date descending so every read path
/// observes the same ordering the PostgreSQL adapter produces.
#[derive(Debug)]
pub struct InMemoryChangeLogRepository {
    entries: RwLock<Vec<ChangeLogEntry>>,
    retained_entries: usize,
}

impl Default for InMemoryChangeLogRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryChangeLogRepository {
    /// Creates an empty store with the default retention policy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_retention(DEFAULT_RETAINED_ENTRIES)
    }

    /// Creates an empty store whose `trim` keeps the newest
    /// `retained_entries` rows.
    #[must_use]
    pub fn with_retention(retained_entries: usize) -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            retained_entries,
        }
    }

    /// Appends an entry, keeping the newest-first ordering.
    pub async fn append(&self, entry: ChangeLogEntry) {
        let mut entries = self.entries.write().await;
        entries.push(entry);
        entries.sort_by(|left, right| {
            right
                .recorded_at
                .cmp(&left.recorded_at)
                .then(right.id.cmp(&left.id))
        });
    }

    fn window(entries: &[ChangeLogEntry], range: EntryRange) -> Vec<ChangeLogEntry> {
        let skipped = entries.iter().skip(range.offset as usize);
        match range.limit {
            Some(limit) => skipped.take(limit as usize).cloned().collect(),
            None => skipped.cloned().collect(),
        }
    }
}

#[async_trait]
impl ChangeLogRepository for InMemoryChangeLogRepository {
    async fn clear(&self) -> AppResult<()> {
        self.entries.write().await.clear();
        Ok(())
    }

    async fn trim(&self) -> AppResult<()> {
        self.entries.write().await.truncate(self.retained_entries);
        Ok(())
    }

    async fn list_recent(&self, limit: u32) -> AppResult<Vec<ChangeLogEntry>> {
        let entries = self.entries.read().await;
        Ok(entries.iter().take(limit as usize).cloned().collect())
    }

    async fn find_entry(
        &self,
        contenttype: &str,
        contentid: &str,
        id: i64,
    ) -> AppResult<Option<ChangeLogEntry>> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .find(|entry| {
                entry.contenttype == contenttype
                    && entry.contentid == contentid
                    && entry.id == id
            })
            .cloned())
    }

    async fn find_previous_entry(
        &self,
        contenttype: &str,
        contentid: &str,
        id: i64,
    ) -> AppResult<Option<ChangeLogEntry>> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter(|entry| {
                entry.contenttype == contenttype
                    && entry.contentid == contentid
                    && entry.id < id
            })
            .max_by_key(|entry| entry.id)
            .cloned())
    }

    async fn find_next_entry(
        &self,
        contenttype: &str,
        contentid: &str,
        id: i64,
    ) -> AppResult<Option<ChangeLogEntry>> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter(|entry| {
                entry.contenttype == contenttype
                    && entry.contentid == contentid
                    && entry.id > id
            })
            .min_by_key(|entry| entry.id)
            .cloned())
    }

    async fn list_entries(&self, range: EntryRange) -> AppResult<Vec<ChangeLogEntry>> {
        let entries = self.entries.read().await;
        Ok(Self::window(&entries, range))
    }

    async fn count_entries(&self) -> AppResult<u64> {
        Ok(self.entries.read().await.len() as u64)
    }

    async fn list_entries_for_content_type(
        &self,
        contenttype: &str,
        range: EntryRange,
    ) -> AppResult<Vec<ChangeLogEntry>> {
        let entries = self.entries.read().await;
        let matching: Vec<ChangeLogEntry> = entries
            .iter()
            .filter(|entry| entry.contenttype == contenttype)
            .cloned()
            .collect();
        Ok(Self::window(&matching, range))
    }

    async fn count_entries_for_content_type(&self, contenttype: &str) -> AppResult<u64> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter(|entry| entry.contenttype == contenttype)
            .count() as u64)
    }

    async fn list_entries_for_content_item(
        &self,
        contenttype: &str,
        contentid: &str,
        range: EntryRange,
    ) -> AppResult<Vec<ChangeLogEntry>> {
        let entries = self.entries.read().await;
        let matching: Vec<ChangeLogEntry> = entries
            .iter()
            .filter(|entry| entry.contenttype == contenttype && entry.contentid == contentid)
            .cloned()
            .collect();
        Ok(Self::window(&matching, range))
    }

    async fn count_entries_for_content_item(
        &self,
        contenttype: &str,
        contentid: &str,
    ) -> AppResult<u64> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter(|entry| entry.contenttype == contenttype && entry.contentid == contentid)
            .count() as u64)
    }
}
