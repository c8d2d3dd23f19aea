//! Inspection and control of the mock collection cache.

use std::sync::Arc;

use alum_core::entities::{
    Answer, Chapter, Event, Mentorship, MentorshipSession, Opportunity, Partner, Question, Sponsor,
    Spotlight, User,
};
use alum_core::resource::Resource;
use alum_mock::MockDataLoader;
use serde::Serialize;

/// Every collection the mock backend serves.
pub const COLLECTIONS: &[&str] = &[
    Event::COLLECTION,
    Sponsor::COLLECTION,
    Partner::COLLECTION,
    Chapter::COLLECTION,
    Mentorship::COLLECTION,
    MentorshipSession::COLLECTION,
    Question::COLLECTION,
    Answer::COLLECTION,
    Opportunity::COLLECTION,
    Spotlight::COLLECTION,
    User::COLLECTION,
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub entries: usize,
    pub keys: Vec<String>,
}

/// Items loaded per collection by [`CacheManager::warm`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WarmedCollection {
    pub collection: String,
    pub items: usize,
}

pub struct CacheManager {
    loader: Arc<MockDataLoader>,
}

impl CacheManager {
    #[must_use]
    pub const fn new(loader: Arc<MockDataLoader>) -> Self {
        Self { loader }
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        let keys = self.loader.cache().keys();
        CacheStats {
            entries: keys.len(),
            keys,
        }
    }

    pub fn invalidate(&self, collection: &str) {
        tracing::debug!(collection, "invalidating cached collection");
        self.loader.invalidate(collection);
    }

    pub fn clear(&self) {
        tracing::debug!("clearing collection cache");
        self.loader.cache().clear();
    }

    /// Load `collections` (every known one when empty) into the cache.
    ///
    /// A no-op in real mode, where the loader is disabled.
    pub async fn warm(&self, collections: &[&str]) -> Vec<WarmedCollection> {
        let targets = if collections.is_empty() { COLLECTIONS } else { collections };
        let mut warmed = Vec::with_capacity(targets.len());
        for collection in targets {
            let items = self.loader.fetch_collection(collection).await.len();
            warmed.push(WarmedCollection {
                collection: (*collection).to_string(),
                items,
            });
        }
        warmed
    }
}
