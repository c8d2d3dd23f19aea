//! Auth token persistence over the `authToken` key.

use alum_core::state::{KEY_AUTH_TOKEN, KeyValueStore};

/// Store the bearer token sent with real-backend requests.
pub fn store(store: &dyn KeyValueStore, token: &str) {
    store.set_item(KEY_AUTH_TOKEN, token);
}

/// Load the bearer token. Empty values count as absent.
#[must_use]
pub fn load(store: &dyn KeyValueStore) -> Option<String> {
    store
        .get_item(KEY_AUTH_TOKEN)
        .filter(|token| !token.is_empty())
}

pub fn clear(store: &dyn KeyValueStore) {
    store.remove_item(KEY_AUTH_TOKEN);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LocalStore;

    #[test]
    fn token_lifecycle() {
        let local = LocalStore::in_memory();
        assert_eq!(load(&local), None);
        store(&local, "jwt-abc");
        assert_eq!(load(&local).as_deref(), Some("jwt-abc"));
        clear(&local);
        assert_eq!(load(&local), None);
    }

    #[test]
    fn empty_token_is_absent() {
        let local = LocalStore::in_memory();
        store(&local, "");
        assert_eq!(load(&local), None);
    }
}
