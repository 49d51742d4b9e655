use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use annalist_application::ContentRepository;
use annalist_core::AppResult;
use annalist_domain::ContentItem;

/// In-memory content lookup for tests and local development.
#[derive(Debug, Default)]
pub struct InMemoryContentRepository {
    items: RwLock<HashMap<(String, String), ContentItem>>,
}

impl InMemoryContentRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a live content item.
    pub async fn insert(&self, contenttype: &str, item: ContentItem) {
        self.items
            .write()
            .await
            .insert((contenttype.to_owned(), item.id.clone()), item);
    }

    /// Removes a content item, simulating deletion.
    pub async fn remove(&self, contenttype: &str, contentid: &str) {
        self.items
            .write()
            .await
            .remove(&(contenttype.to_owned(), contentid.to_owned()));
    }
}

#[async_trait]
impl ContentRepository for InMemoryContentRepository {
    async fn find_content(
        &self,
        contenttype: &str,
        contentid: &str,
    ) -> AppResult<Option<ContentItem>> {
        Ok(self
            .items
            .read()
            .await
            .get(&(contenttype.to_owned(), contentid.to_owned()))
            .cloned())
    }
}
