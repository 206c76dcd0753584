use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use url::Url;

use crate::app::{PantryError, Result};
use crate::catalog::Catalog;
use crate::config::CatalogConfig;
use crate::domain::{Recipe, RecipeId, RecipeListing};

pub struct HttpCatalog {
    client: Client,
    base_url: Url,
}

impl HttpCatalog {
    pub fn new(config: &CatalogConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .brotli(true)
            .user_agent(config.user_agent.as_str())
            .build()?;

        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(PantryError::Config(format!(
                "Catalog URL cannot be used as a base: {}",
                config.base_url
            )));
        }

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn fetch_listing(&self, url: Url) -> Result<Vec<Recipe>> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        response.error_for_status_ref()?;

        let body = response.bytes().await?;
        let listing: RecipeListing = serde_json::from_slice(&body)?;
        tracing::debug!("Catalog returned {} recipes", listing.recipes.len());

        Ok(listing.recipes)
    }
}

#[async_trait]
impl Catalog for HttpCatalog {
    async fn fetch_all_recipes(&self) -> Result<Vec<Recipe>> {
        self.fetch_listing(self.endpoint(&["recipes"])).await
    }

    async fn search_recipes(&self, query: &str) -> Result<Vec<Recipe>> {
        let mut url = self.endpoint(&["recipes", "search"]);
        url.query_pairs_mut().append_pair("q", query);
        self.fetch_listing(url).await
    }

    async fn get_recipe_by_id(&self, id: RecipeId) -> Result<Option<Recipe>> {
        let id_segment = id.to_string();
        let url = self.endpoint(&["recipes", id_segment.as_str()]);
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!("Recipe {} not in catalog", id);
            return Ok(None);
        }

        response.error_for_status_ref()?;

        let body = response.bytes().await?;
        Ok(Some(serde_json::from_slice(&body)?))
    }
}
