//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod content;
mod log;

pub use content::{ContentItem, ContentTypeDefinition};
pub use log::{ChangeLogEntry, LogCategory, MutationKind, SystemLogEntry};
