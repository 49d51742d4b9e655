use std::str::FromStr;

use annalist_core::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Log categories with independent storage and retention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogCategory {
    /// Content mutation audit trail.
    Change,
    /// System event audit trail.
    System,
}

impl LogCategory {
    /// Returns a stable storage value for this category.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Change => "change",
            Self::System => "system",
        }
    }

    /// Returns the user-facing name of the log this category tags.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Change => "change log",
            Self::System => "system log",
        }
    }
}

/// Kind of content mutation a change-log entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationKind {
    /// Content item was created.
    Insert,
    /// Content item was updated.
    Update,
    /// Content item was deleted.
    Delete,
}

impl MutationKind {
    /// Returns a stable storage value for this mutation kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl FromStr for MutationKind {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "insert" => Ok(Self::Insert),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            other => Err(AppError::Validation(format!(
                "unknown mutation kind '{other}'"
            ))),
        }
    }
}

/// One content mutation event, scoped to a content type and item.
///
/// Created by the storage layer when content changes; read-only everywhere
/// else. The recorded title preserves what the item was called at mutation
/// time, which listing views fall back to once the live item is gone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeLogEntry {
    /// Stable entry identifier, monotonic per store.
    pub id: i64,
    /// Moment the mutation was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Content title at mutation time.
    pub title: String,
    /// Content type slug the mutated item belongs to.
    pub contenttype: String,
    /// Identifier of the mutated content item.
    pub contentid: String,
    /// Kind of mutation.
    pub mutation: MutationKind,
    /// Optional serialized field diff.
    pub diff: Option<String>,
    /// Optional editor comment.
    pub comment: Option<String>,
    /// Optional identifier of the user who made the change.
    pub ownerid: Option<i64>,
}

/// One system event entry.
///
/// Level and context are free-form labels owned by whatever emitted the
/// event; this crate stores and filters them without interpreting them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemLogEntry {
    /// Stable entry identifier, monotonic per store.
    pub id: i64,
    /// Moment the event was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Human-readable event summary.
    pub message: String,
    /// Severity label.
    pub level: String,
    /// Context label naming the subsystem that emitted the event.
    pub context: String,
    /// Optional source location.
    pub source: Option<String>,
}
