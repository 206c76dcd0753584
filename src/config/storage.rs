use std::path::PathBuf;

use serde::Deserialize;

use crate::favorites::DEFAULT_FAVORITES_KEY;

/// On-device storage settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Database file. `None` uses `<data_dir>/pantry/pantry.db`.
    pub path: Option<PathBuf>,
    /// Key the favorites collection is stored under.
    pub favorites_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: None,
            favorites_key: DEFAULT_FAVORITES_KEY.to_string(),
        }
    }
}
