//! Client-side persisted state location.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory holding `local_store.json`. Empty means the platform data
    /// directory (`~/.local/share/alum` on Linux).
    #[serde(default)]
    pub dir: String,
}

impl StorageConfig {
    /// Resolve the storage directory, or `None` when no data dir exists.
    #[must_use]
    pub fn resolved_dir(&self) -> Option<PathBuf> {
        if self.dir.is_empty() {
            dirs::data_dir().map(|p| p.join("alum"))
        } else {
            Some(PathBuf::from(&self.dir))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_dir_wins() {
        let config = StorageConfig {
            dir: "/tmp/alum-state".into(),
        };
        assert_eq!(config.resolved_dir(), Some(PathBuf::from("/tmp/alum-state")));
    }
}
