//! Client-side persisted state seam.
//!
//! A handful of string keys (mode override, auth token, per-user settings)
//! live in a local-storage style key/value store. `alum-storage` provides a
//! JSON-file implementation and an in-memory one for tests.

/// Key for the explicit mock/real override (`"true"` / `"false"`).
pub const KEY_USE_MOCK_API: &str = "useMockApi";

/// Key for the bearer token injected into real-backend requests.
pub const KEY_AUTH_TOKEN: &str = "authToken";

/// A string key/value store with local-storage semantics.
///
/// Implementations swallow their own I/O failures: reads return `None`,
/// writes log and move on.
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;

    fn set_item(&self, key: &str, value: &str);

    fn remove_item(&self, key: &str);
}
