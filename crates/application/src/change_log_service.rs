use std::sync::Arc;

use annalist_core::{AppError, AppResult};
use annalist_domain::{ChangeLogEntry, ContentItem, ContentTypeDefinition};

use crate::log_ports::{ChangeLogRepository, ContentRepository, ContentTypeRegistry};
use crate::pagination::{LISTING_PAGE_SIZE, PageParam, PageWindow, page_count};


/// Entries shown on the change-log overview.
const ACTIVITY_LIMIT: u32 = 16;

/// Which change-log entries a listing request targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryScope {
    /// Entries across all content types.
    AllEntries,
    /// Entries for every item of one content type.
    ByContentType(String),
    /// Entries for one content item.
    ByContentItem(String, String),
}

impl QueryScope {
    /// Resolves the scope from path parameters.
    ///
    /// An empty contenttype always means all entries, whatever the
    /// contentid says. A contentid of `"0"` or the empty string is the
    /// explicit unset marker inherited from the panel's URLs.
    #[must_use]
    pub fn resolve(contenttype: &str, contentid: &str) -> Self {
        if contenttype.is_empty() {
            return Self::AllEntries;
        }

        if contentid.is_empty() || contentid == "0" {
            return Self::ByContentType(contenttype.to_owned());
        }

        Self::ByContentItem(contenttype.to_owned(), contentid.to_owned())
    }
}

/// Render context for one change-record listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeLogPage {
    /// Entries for the current page, most recent first.
    pub entries: Vec<ChangeLogEntry>,
    /// Display title for the listing.
    pub title: String,
    /// Live content item, when the scope names one that still exists.
    pub content_item: Option<ContentItem>,
    /// Current 1-based page, unset when the pager is disabled.
    pub page: Option<u32>,
    /// Total pages, unset when the pager is disabled.
    pub page_count: Option<u32>,
    /// Content type slug the listing is scoped to; empty for all types.
    pub contenttype: String,
}

/// Render context for one change-log entry with prev/next navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeLogEntryDetail {
    /// The requested entry.
    pub entry: ChangeLogEntry,
    /// Entry recorded immediately before, absent at the start of history.
    pub previous: Option<ChangeLogEntry>,
    /// Entry recorded immediately after, absent at the end of history.
    pub next: Option<ChangeLogEntry>,
}

/// Read and lifecycle operations over the change log.
#[derive(Clone)]
pub struct ChangeLogService {
    repository: Arc<dyn ChangeLogRepository>,
    content_types: Arc<dyn ContentTypeRegistry>,
    content: Arc<dyn ContentRepository>,
}

impl ChangeLogService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        repository: Arc<dyn ChangeLogRepository>,
        content_types: Arc<dyn ContentTypeRegistry>,
        content: Arc<dyn ContentRepository>,
    ) -> Self {
        Self {
            repository,
            content_types,
            content,
        }
    }

    /// Deletes every change-log entry. Idempotent.
    pub async fn clear(&self) -> AppResult<()> {
        self.repository.clear().await
    }

    /// Enforces retention on the change log. Idempotent.
    pub async fn trim(&self) -> AppResult<()> {
        self.repository.trim().await
    }

    /// Returns the most recent entries for the overview.
    pub async fn recent_activity(&self) -> AppResult<Vec<ChangeLogEntry>> {
        self.repository.list_recent(ACTIVITY_LIMIT).await
    }

    /// Returns one entry together with its prev/next neighbours.
    pub async fn entry_detail(
        &self,
        contenttype: &str,
        contentid: &str,
        id: i64,
    ) -> AppResult<ChangeLogEntryDetail> {
        let entry = self
            .repository
            .find_entry(contenttype, contentid, id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("change log entry {id} does not exist"))
            })?;

        let previous = self
            .repository
            .find_previous_entry(contenttype, contentid, id)
            .await?;
        let next = self
            .repository
            .find_next_entry(contenttype, contentid, id)
            .await?;

        Ok(ChangeLogEntryDetail {
            entry,
            previous,
            next,
        })
    }

    /// Returns one listing page for the scope named by the path parameters.
    pub async fn listing(
        &self,
        contenttype: &str,
        contentid: &str,
        page: PageParam,
    ) -> AppResult<ChangeLogPage> {
        let window = PageWindow::resolve(page, LISTING_PAGE_SIZE);

        match QueryScope::resolve(contenttype, contentid) {
            QueryScope::AllEntries => self.list_all_entries(window).await,
            QueryScope::ByContentType(slug) => self.list_content_type(&slug, window).await,
            QueryScope::ByContentItem(slug, item_id) => {
                self.list_content_item(&slug, &item_id, window).await
            }
        }
    }

    async fn list_all_entries(&self, window: PageWindow) -> AppResult<ChangeLogPage> {
        let entries = self.repository.list_entries(window.range()).await?;
        let total = self.repository.count_entries().await?;

        Ok(ChangeLogPage {
            entries,
            title: "All content types".to_owned(),
            content_item: None,
            page: window.page,
            page_count: page_count(total, window.limit),
            contenttype: String::new(),
        })
    }

    async fn list_content_type(
        &self,
        slug: &str,
        window: PageWindow,
    ) -> AppResult<ChangeLogPage> {
        let definition = self.require_content_type(slug).await?;

        let entries = self
            .repository
            .list_entries_for_content_type(slug, window.range())
            .await?;
        let total = self.repository.count_entries_for_content_type(slug).await?;

        Ok(ChangeLogPage {
            entries,
            title: definition.plural_name,
            content_item: None,
            page: window.page,
            page_count: page_count(total, window.limit),
            contenttype: slug.to_owned(),
        })
    }

    async fn list_content_item(
        &self,
        slug: &str,
        contentid: &str,
        window: PageWindow,
    ) -> AppResult<ChangeLogPage> {
        let definition = self.require_content_type(slug).await?;

        let content_item = self.content.find_content(slug, contentid).await?;
        let entries = self
            .repository
            .list_entries_for_content_item(slug, contentid, window.range())
            .await?;
        let total = self
            .repository
            .count_entries_for_content_item(slug, contentid)
            .await?;

        // Title precedence: live item, then a synthesized placeholder when
        // the history is empty too, then the newest entry's recorded title.
        let title = match (&content_item, entries.first()) {
            (Some(item), _) => item.title.clone(),
            (None, None) => format!("{} #{contentid}", definition.singular_name),
            (None, Some(most_recent)) => most_recent.title.clone(),
        };

        Ok(ChangeLogPage {
            entries,
            title,
            content_item,
            page: window.page,
            page_count: page_count(total, window.limit),
            contenttype: slug.to_owned(),
        })
    }

    async fn require_content_type(&self, slug: &str) -> AppResult<ContentTypeDefinition> {
        self.content_types
            .find_content_type(slug)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("unknown content type '{slug}'")))
    }
}
