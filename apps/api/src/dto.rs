use annalist_application::{ChangeLogEntryDetail, ChangeLogPage};
use annalist_domain::{ChangeLogEntry, ContentItem, SystemLogEntry};
use serde::Serialize;
use ts_rs::TS;

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/admin-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// API representation of one change-log entry.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/admin-types/src/generated/change-log-entry-response.ts"
)]
pub struct ChangeLogEntryResponse {
    pub id: i64,
    pub recorded_at: String,
    pub title: String,
    pub contenttype: String,
    pub contentid: String,
    pub mutation: String,
    pub diff: Option<String>,
    pub comment: Option<String>,
    pub ownerid: Option<i64>,
}

impl From<ChangeLogEntry> for ChangeLogEntryResponse {
    fn from(entry: ChangeLogEntry) -> Self {
        Self {
            id: entry.id,
            recorded_at: entry.recorded_at.to_rfc3339(),
            title: entry.title,
            contenttype: entry.contenttype,
            contentid: entry.contentid,
            mutation: entry.mutation.as_str().to_owned(),
            diff: entry.diff,
            comment: entry.comment,
            ownerid: entry.ownerid,
        }
    }
}

/// API representation of a live content item.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/admin-types/src/generated/content-item-response.ts"
)]
pub struct ContentItemResponse {
    pub id: String,
    pub title: String,
}

impl From<ContentItem> for ContentItemResponse {
    fn from(item: ContentItem) -> Self {
        Self {
            id: item.id,
            title: item.title,
        }
    }
}

/// Render context for the change-log overview.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/admin-types/src/generated/change-log-overview-response.ts"
)]
pub struct ChangeLogOverviewResponse {
    pub entries: Vec<ChangeLogEntryResponse>,
    pub notification: Option<String>,
}

/// Render context for one change-record listing page.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/admin-types/src/generated/change-log-page-response.ts"
)]
pub struct ChangeLogPageResponse {
    pub entries: Vec<ChangeLogEntryResponse>,
    pub title: String,
    pub content_item: Option<ContentItemResponse>,
    pub page: Option<u32>,
    pub page_count: Option<u32>,
    pub contenttype: String,
}

impl From<ChangeLogPage> for ChangeLogPageResponse {
    fn from(page: ChangeLogPage) -> Self {
        Self {
            entries: page
                .entries
                .into_iter()
                .map(ChangeLogEntryResponse::from)
                .collect(),
            title: page.title,
            content_item: page.content_item.map(ContentItemResponse::from),
            page: page.page,
            page_count: page.page_count,
            contenttype: page.contenttype,
        }
    }
}

/// Render context for one change-log entry with prev/next navigation.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/admin-types/src/generated/change-log-entry-detail-response.ts"
)]
pub struct ChangeLogEntryDetailResponse {
    pub entry: ChangeLogEntryResponse,
    pub previous: Option<ChangeLogEntryResponse>,
    pub next: Option<ChangeLogEntryResponse>,
}

impl From<ChangeLogEntryDetail> for ChangeLogEntryDetailResponse {
    fn from(detail: ChangeLogEntryDetail) -> Self {
        Self {
            entry: ChangeLogEntryResponse::from(detail.entry),
            previous: detail.previous.map(ChangeLogEntryResponse::from),
            next: detail.next.map(ChangeLogEntryResponse::from),
        }
    }
}

/// API representation of one system-log entry.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/admin-types/src/generated/system-log-entry-response.ts"
)]
pub struct SystemLogEntryResponse {
    pub id: i64,
    pub recorded_at: String,
    pub message: String,
    pub level: String,
    pub context: String,
    pub source: Option<String>,
}

impl From<SystemLogEntry> for SystemLogEntryResponse {
    fn from(entry: SystemLogEntry) -> Self {
        Self {
            id: entry.id,
            recorded_at: entry.recorded_at.to_rfc3339(),
            message: entry.message,
            level: entry.level,
            context: entry.context,
            source: entry.source,
        }
    }
}

/// Render context for the system-log overview.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/admin-types/src/generated/system-log-overview-response.ts"
)]
pub struct SystemLogOverviewResponse {
    pub entries: Vec<SystemLogEntryResponse>,
    pub notification: Option<String>,
}
