//! Namespaced user settings with default-and-merge-on-read.
//!
//! Each user owns two JSON blobs in the key/value store:
//! `alum.settings.<userId>` and `alum.profilePreferences.<userId>`.
//! Reading a missing blob writes and returns the defaults. Reading a partial
//! blob hydrates the missing fields from the defaults. Updates merge one
//! level deep (see [`merge_one_level`]).

use std::sync::Arc;

use alum_core::state::KeyValueStore;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StorageError;
use crate::merge::merge_one_level;

const SETTINGS_NAMESPACE: &str = "alum.settings";
const PROFILE_PREFERENCES_NAMESPACE: &str = "alum.profilePreferences";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Public,
    AlumniOnly,
    Private,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DigestFrequency {
    Daily,
    #[default]
    Weekly,
    Monthly,
    Never,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NotificationPreferences {
    pub digest_frequency: DigestFrequency,
    pub email_events: bool,
    pub email_mentorship: bool,
    pub email_opportunities: bool,
    pub push_enabled: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            digest_frequency: DigestFrequency::Weekly,
            email_events: true,
            email_mentorship: true,
            email_opportunities: true,
            push_enabled: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PrivacySettings {
    pub show_email: bool,
    pub show_phone: bool,
    pub allow_messages: bool,
}

impl Default for PrivacySettings {
    fn default() -> Self {
        Self {
            show_email: false,
            show_phone: false,
            allow_messages: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserSettings {
    pub visibility: Visibility,
    pub notifications: NotificationPreferences,
    pub privacy: PrivacySettings,
    pub language: String,
    pub timezone: String,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            visibility: Visibility::Public,
            notifications: NotificationPreferences::default(),
            privacy: PrivacySettings::default(),
            language: "en".to_string(),
            timezone: "UTC".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfilePreferences {
    pub theme: String,
    pub dashboard_layout: String,
    pub items_per_page: usize,
    pub pinned_sections: Vec<String>,
}

impl Default for ProfilePreferences {
    fn default() -> Self {
        Self {
            theme: "system".to_string(),
            dashboard_layout: "grid".to_string(),
            items_per_page: 20,
            pinned_sections: Vec::new(),
        }
    }
}

/// Typed access to the per-user preference blobs.
#[derive(Clone)]
pub struct PreferencesStore {
    store: Arc<dyn KeyValueStore>,
}

impl PreferencesStore {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn settings_key(user_id: &str) -> String {
        format!("{SETTINGS_NAMESPACE}.{user_id}")
    }

    #[must_use]
    pub fn profile_preferences_key(user_id: &str) -> String {
        format!("{PROFILE_PREFERENCES_NAMESPACE}.{user_id}")
    }

    /// Read settings, writing defaults when none are stored.
    #[must_use]
    pub fn settings(&self, user_id: &str) -> UserSettings {
        self.read_hydrated(&Self::settings_key(user_id))
    }

    /// Merge `patch` into the stored settings and persist the result.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidUpdate`] if the merged value no longer
    /// deserializes (e.g. an unknown `visibility`). Nothing is written then.
    pub fn update_settings(&self, user_id: &str, patch: &Value) -> Result<UserSettings, StorageError> {
        self.update_merged(&Self::settings_key(user_id), patch)
    }

    pub fn reset_settings(&self, user_id: &str) -> UserSettings {
        let defaults = UserSettings::default();
        self.write(&Self::settings_key(user_id), &defaults);
        defaults
    }

    #[must_use]
    pub fn profile_preferences(&self, user_id: &str) -> ProfilePreferences {
        self.read_hydrated(&Self::profile_preferences_key(user_id))
    }

    /// # Errors
    ///
    /// Same as [`Self::update_settings`].
    pub fn update_profile_preferences(
        &self,
        user_id: &str,
        patch: &Value,
    ) -> Result<ProfilePreferences, StorageError> {
        self.update_merged(&Self::profile_preferences_key(user_id), patch)
    }

    fn read_hydrated<T>(&self, key: &str) -> T
    where
        T: Default + Serialize + DeserializeOwned,
    {
        let Some(raw) = self.store.get_item(key) else {
            let defaults = T::default();
            self.write(key, &defaults);
            return defaults;
        };

        let hydrated = serde_json::from_str::<Value>(&raw)
            .map_err(|e| e.to_string())
            .and_then(|stored| {
                let mut base = serde_json::to_value(T::default()).map_err(|e| e.to_string())?;
                merge_one_level(&mut base, &stored);
                serde_json::from_value::<T>(base).map_err(|e| e.to_string())
            });

        match hydrated {
            Ok(value) => value,
            Err(reason) => {
                tracing::warn!(key, %reason, "stored preferences unreadable; resetting to defaults");
                let defaults = T::default();
                self.write(key, &defaults);
                defaults
            }
        }
    }

    fn update_merged<T>(&self, key: &str, patch: &Value) -> Result<T, StorageError>
    where
        T: Default + Serialize + DeserializeOwned,
    {
        let current: T = self.read_hydrated(key);
        let mut merged = serde_json::to_value(&current).map_err(|e| StorageError::InvalidUpdate {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        merge_one_level(&mut merged, patch);
        let updated: T = serde_json::from_value(merged).map_err(|e| StorageError::InvalidUpdate {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        self.write(key, &updated);
        Ok(updated)
    }

    fn write<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => self.store.set_item(key, &json),
            Err(error) => tracing::warn!(key, %error, "failed to serialize preferences"),
        }
    }
}
