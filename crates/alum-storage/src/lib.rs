//! # alum-storage
//!
//! Client-side persisted state, the desktop analogue of browser local storage:
//! - [`LocalStore`]: a string key/value map persisted as one JSON file
//! - [`token`]: the bearer token consumed by the HTTP client
//! - [`PreferencesStore`]: namespaced user settings with default-and-merge-on-read
//! - [`merge`]: the one-level-deep JSON merge used for partial updates

mod error;
mod local;
pub mod merge;
mod preferences;
pub mod token;

pub use error::StorageError;
pub use local::LocalStore;
pub use preferences::{
    DigestFrequency, NotificationPreferences, PreferencesStore, PrivacySettings,
    ProfilePreferences, UserSettings, Visibility,
};
