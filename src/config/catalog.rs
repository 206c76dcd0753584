use serde::Deserialize;

pub const DEFAULT_CATALOG_URL: &str = "https://dummyjson.com";

/// Remote catalog settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Base URL; `/recipes` endpoints are resolved against it.
    pub base_url: String,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CATALOG_URL.to_string(),
            timeout_secs: 10,
            user_agent: concat!("pantry/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
