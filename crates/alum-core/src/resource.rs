//! The [`Resource`] trait binds an entity struct to its record collection.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// A record type stored in a named flat collection.
///
/// `COLLECTION` is the path segment on both backends (`/api/{COLLECTION}` on
/// the real one, `{mock_base}/{COLLECTION}` on the mock one). `ENTITY` is the
/// singular, human-readable name used in messages.
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const COLLECTION: &'static str;
    const ENTITY: &'static str;

    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);

    /// Record creation time. Records without timestamps ignore it.
    fn stamp_created(&mut self, _now: DateTime<Utc>) {}

    /// Record modification time. Records without timestamps ignore it.
    fn stamp_updated(&mut self, _now: DateTime<Utc>) {}
}
