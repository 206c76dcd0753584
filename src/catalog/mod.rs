pub mod http_catalog;

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::{Recipe, RecipeId};

pub use http_catalog::HttpCatalog;

/// Read-only access to the remote recipe catalog. Each call is a single
/// round trip; failures are returned, never retried.
#[async_trait]
pub trait Catalog {
    async fn fetch_all_recipes(&self) -> Result<Vec<Recipe>>;

    /// Matching is done by the remote service. `query` is sent as given,
    /// including an empty string.
    async fn search_recipes(&self, query: &str) -> Result<Vec<Recipe>>;

    /// `Ok(None)` when the catalog has no recipe with `id`.
    async fn get_recipe_by_id(&self, id: RecipeId) -> Result<Option<Recipe>>;
}
