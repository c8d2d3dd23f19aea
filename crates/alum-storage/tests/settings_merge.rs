//! Nested settings merge against a file-backed store.

use std::sync::Arc;

use alum_core::state::KeyValueStore;
use alum_storage::{DigestFrequency, LocalStore, PreferencesStore, Visibility};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn nested_update_preserves_sibling_fields() {
    let dir = tempfile::tempdir().unwrap();
    let local = Arc::new(LocalStore::open(dir.path().join("local_store.json")).unwrap());
    local.set_item(
        &PreferencesStore::settings_key("usr-7"),
        &json!({
            "visibility": "public",
            "notifications": {"digestFrequency": "weekly", "emailEvents": true}
        })
        .to_string(),
    );

    let prefs = PreferencesStore::new(local.clone());
    let updated = prefs
        .update_settings("usr-7", &json!({"notifications": {"digestFrequency": "monthly"}}))
        .unwrap();

    assert_eq!(updated.visibility, Visibility::Public);
    assert_eq!(updated.notifications.digest_frequency, DigestFrequency::Monthly);
    assert!(updated.notifications.email_events);

    let reopened = Arc::new(LocalStore::open(dir.path().join("local_store.json")).unwrap());
    let persisted = PreferencesStore::new(reopened).settings("usr-7");
    assert_eq!(persisted, updated);
}

#[test]
fn reset_restores_defaults() {
    let local = Arc::new(LocalStore::in_memory());
    let prefs = PreferencesStore::new(local);
    prefs
        .update_settings("usr-1", &json!({"language": "de"}))
        .unwrap();
    let reset = prefs.reset_settings("usr-1");
    assert_eq!(reset.language, "en");
    assert_eq!(prefs.settings("usr-1").language, "en");
}
