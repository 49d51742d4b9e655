use async_trait::async_trait;
use tokio::sync::RwLock;

use annalist_application::{SystemLogFilter, SystemLogRepository};
use annalist_core::AppResult;
use annalist_domain::SystemLogEntry;

/// Rows `trim` keeps when no explicit retention is configured.
const DEFAULT_RETAINED_ENTRIES: usize = 2_000;

/// In-memory system-log store for tests and local development.
#[derive(Debug)]
pub struct InMemorySystemLogRepository {
    entries: RwLock<Vec<SystemLogEntry>>,
    retained_entries: usize,
}

impl Default for InMemorySystemLogRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySystemLogRepository {
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
    pub async fn append(&self, entry: SystemLogEntry) {
        let mut entries = self.entries.write().await;
        entries.push(entry);
        entries.sort_by(|left, right| {
            right
                .recorded_at
                .cmp(&left.recorded_at)
                .then(right.id.cmp(&left.id))
        });
    }
}

#[async_trait]
impl SystemLogRepository for InMemorySystemLogRepository {
    async fn clear(&self) -> AppResult<()> {
        self.entries.write().await.clear();
        Ok(())
    }

    async fn trim(&self) -> AppResult<()> {
        self.entries.write().await.truncate(self.retained_entries);
        Ok(())
    }

    async fn list_recent(
        &self,
        limit: u32,
        filter: SystemLogFilter,
    ) -> AppResult<Vec<SystemLogEntry>> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter(|entry| {
                filter
                    .level
                    .as_deref()
                    .is_none_or(|level| entry.level == level)
                    && filter
                        .context
                        .as_deref()
                        .is_none_or(|context| entry.context == context)
            })
            .take(limit as usize)
            .cloned()
            .collect())
    }
}
