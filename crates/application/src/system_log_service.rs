use std::sync::Arc;

use annalist_core::AppResult;
use annalist_domain::SystemLogEntry;

use crate::log_ports::{SystemLogFilter, SystemLogRepository};


/// Entries shown on the system-log overview.
const ACTIVITY_LIMIT: u32 = 16;

/// Read and lifecycle operations over the system log.
#[derive(Clone)]
pub struct SystemLogService {
    repository: Arc<dyn SystemLogRepository>,
}

impl SystemLogService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(repository: Arc<dyn SystemLogRepository>) -> Self {
        Self { repository }
    }

    /// Deletes every system-log entry. Idempotent.
    pub async fn clear(&self) -> AppResult<()> {
        self.repository.clear().await
    }

    /// Enforces retention on the system log. Idempotent.
    pub async fn trim(&self) -> AppResult<()> {
        self.repository.trim().await
    }

    /// Returns the most recent entries matching the filter, newest first.
    pub async fn recent_activity(
        &self,
        filter: SystemLogFilter,
    ) -> AppResult<Vec<SystemLogEntry>> {
        self.repository.list_recent(ACTIVITY_LIMIT, filter).await
    }
}
