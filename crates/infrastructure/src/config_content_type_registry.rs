use std::collections::HashMap;

use async_trait::async_trait;

use annalist_application::ContentTypeRegistry;
use annalist_core::AppResult;
use annalist_domain::ContentTypeDefinition;

/// Content-type registry seeded from configuration at startup.
///
/// Content types are configuration, not data, so the registry is immutable
/// once built and needs no locking.
#[derive(Debug, Default)]
pub struct ConfigContentTypeRegistry {
    definitions: HashMap<String, ContentTypeDefinition>,
}

impl ConfigContentTypeRegistry {
    /// Builds a registry from configured definitions. Later duplicates of a
    /// slug replace earlier ones.
    #[must_use]
    pub fn new(definitions: Vec<ContentTypeDefinition>) -> Self {
        Self {
            definitions: definitions
                .into_iter()
                .map(|definition| (definition.slug.clone(), definition))
                .collect(),
        }
    }
}

#[async_trait]
impl ContentTypeRegistry for ConfigContentTypeRegistry {
    async fn find_content_type(&self, slug: &str) -> AppResult<Option<ContentTypeDefinition>> {
        Ok(self.definitions.get(slug).cloned())
    }
}
