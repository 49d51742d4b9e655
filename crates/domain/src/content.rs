use annalist_core::{AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

/// Definition of a content type known to the panel.
///
/// Content types come from configuration, not from the database, so the
/// registry holding these is seeded at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentTypeDefinition {
    /// URL slug identifying the type.
    pub slug: String,
    /// Singular display name, e.g. "Page".
    pub singular_name: String,
    /// Plural display name, e.g. "Pages".
    pub plural_name: String,
}

impl ContentTypeDefinition {
    /// Creates a definition, rejecting empty slugs and names.
    pub fn new(
        slug: impl Into<String>,
        singular_name: impl Into<String>,
        plural_name: impl Into<String>,
    ) -> AppResult<Self> {
        Ok(Self {
            slug: NonEmptyString::new(slug)?.into(),
            singular_name: NonEmptyString::new(singular_name)?.into(),
            plural_name: NonEmptyString::new(plural_name)?.into(),
        })
    }
}

/// A live content item, as far as log views care about it.
///
/// Deleted content is expected; lookups return `None` rather than an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Item identifier within its content type.
    pub id: String,
    /// Current item title.
    pub title: String,
}
