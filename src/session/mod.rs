//! The access point screens and commands use.
//!
//! [`RecipeSession`] forwards catalog and favorites operations unchanged and
//! keeps the current recipe listing that views render. Listing requests are
//! tagged with a generation number so a response that arrives after a newer
//! one has already been applied is dropped instead of overwriting it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;

use crate::app::Result;
use crate::catalog::Catalog;
use crate::domain::{Recipe, RecipeId};
use crate::favorites::FavoritesStore;

/// Which request produced the current listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ListingSource {
    #[default]
    Empty,
    All,
    Search(String),
}

#[derive(Debug, Clone, Default)]
pub struct Listing {
    pub source: ListingSource,
    pub recipes: Vec<Recipe>,
    generation: u64,
}

pub struct RecipeSession {
    catalog: Arc<dyn Catalog + Send + Sync>,
    favorites: Arc<FavoritesStore>,
    listing: watch::Sender<Listing>,
    issued: AtomicU64,
}

impl RecipeSession {
    pub fn new(catalog: Arc<dyn Catalog + Send + Sync>, favorites: Arc<FavoritesStore>) -> Self {
        let (listing, _) = watch::channel(Listing::default());
        Self {
            catalog,
            favorites,
            listing,
            issued: AtomicU64::new(0),
        }
    }

    /// Load favorites into memory, then fetch the full listing.
    pub async fn start(&self) -> Result<Vec<Recipe>> {
        self.favorites.get_favorites().await;
        self.fetch_all_recipes().await
    }

    /// Current listing.
    pub fn listing(&self) -> Listing {
        self.listing.borrow().clone()
    }

    /// Receiver notified whenever the listing changes.
    pub fn subscribe(&self) -> watch::Receiver<Listing> {
        self.listing.subscribe()
    }

    /// Fetch every recipe and make it the listing. On failure the listing is
    /// left as it was.
    pub async fn fetch_all_recipes(&self) -> Result<Vec<Recipe>> {
        let generation = self.next_generation();
        let recipes = self.catalog.fetch_all_recipes().await?;
        self.apply(generation, ListingSource::All, &recipes);
        Ok(recipes)
    }

    /// Search the catalog and make the results the listing.
    ///
    /// The query is sent as given; an empty query is a literal empty search.
    /// Callers that want the whole catalog for a blank query call
    /// [`fetch_all_recipes`](Self::fetch_all_recipes) instead.
    pub async fn search_recipes(&self, query: &str) -> Result<Vec<Recipe>> {
        let generation = self.next_generation();
        let recipes = self.catalog.search_recipes(query).await?;
        self.apply(generation, ListingSource::Search(query.to_string()), &recipes);
        Ok(recipes)
    }

    pub async fn get_recipe_by_id(&self, id: RecipeId) -> Result<Option<Recipe>> {
        self.catalog.get_recipe_by_id(id).await
    }

    pub async fn get_favorites(&self) -> Vec<Recipe> {
        self.favorites.get_favorites().await
    }

    pub async fn save_favorite(&self, recipe: Recipe) {
        self.favorites.save_favorite(recipe).await
    }

    pub async fn remove_favorite(&self, id: RecipeId) {
        self.favorites.remove_favorite(id).await
    }

    pub fn is_favorite(&self, id: RecipeId) -> bool {
        self.favorites.is_favorite(id)
    }

    /// Favorites as last loaded, without reading storage.
    pub fn favorites(&self) -> Vec<Recipe> {
        self.favorites.favorites()
    }

    fn next_generation(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn apply(&self, generation: u64, source: ListingSource, recipes: &[Recipe]) {
        let applied = self.listing.send_if_modified(|listing| {
            if generation <= listing.generation {
                return false;
            }
            *listing = Listing {
                source: source.clone(),
                recipes: recipes.to_vec(),
                generation,
            };
            true
        });

        if !applied {
            tracing::debug!("Dropping stale listing for {:?}", source);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use super::*;
    use crate::app::PantryError;
    use crate::domain::Instructions;
    use crate::storage::MemoryStorage;

    fn recipe(id: RecipeId, name: &str) -> Recipe {
        Recipe {
            id,
            name: name.to_string(),
            description: None,
            image: format!("https://example.com/{}.webp", id),
            ingredients: vec!["Rice".into()],
            instructions: Instructions::Text("Cook the rice.".into()),
            prep_time_minutes: 5,
            difficulty: "Easy".into(),
        }
    }

    /// In-process catalog. Searches for `hold` block until `release` is
    /// notified; `fail` makes every call error.
    #[derive(Default)]
    struct StubCatalog {
        recipes: Vec<Recipe>,
        searches: HashMap<String, Vec<Recipe>>,
        hold: Option<String>,
        release: Arc<Notify>,
        fail: bool,
    }

    impl StubCatalog {
        fn check(&self) -> Result<()> {
            if self.fail {
                return Err(PantryError::Io(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "catalog offline",
                )));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl Catalog for StubCatalog {
        async fn fetch_all_recipes(&self) -> Result<Vec<Recipe>> {
            self.check()?;
            Ok(self.recipes.clone())
        }

        async fn search_recipes(&self, query: &str) -> Result<Vec<Recipe>> {
            self.check()?;
            if self.hold.as_deref() == Some(query) {
                self.release.notified().await;
            }
            Ok(self.searches.get(query).cloned().unwrap_or_default())
        }

        async fn get_recipe_by_id(&self, id: RecipeId) -> Result<Option<Recipe>> {
            self.check()?;
            Ok(self.recipes.iter().find(|r| r.id == id).cloned())
        }
    }

    fn session_with(catalog: StubCatalog) -> RecipeSession {
        let favorites = Arc::new(FavoritesStore::new(Arc::new(MemoryStorage::new())));
        RecipeSession::new(Arc::new(catalog), favorites)
    }

    fn names(recipes: &[Recipe]) -> Vec<&str> {
        recipes.iter().map(|r| r.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_listing_starts_empty() {
        let session = session_with(StubCatalog::default());
        let listing = session.listing();
        assert_eq!(listing.source, ListingSource::Empty);
        assert!(listing.recipes.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_all_sets_listing() {
        let session = session_with(StubCatalog {
            recipes: vec![recipe(1, "Risotto"), recipe(2, "Paella")],
            ..Default::default()
        });

        let recipes = session.fetch_all_recipes().await.unwrap();
        assert_eq!(recipes.len(), 2);

        let listing = session.listing();
        assert_eq!(listing.source, ListingSource::All);
        assert_eq!(names(&listing.recipes), vec!["Risotto", "Paella"]);
    }

    #[tokio::test]
    async fn test_search_replaces_listing() {
        let session = session_with(StubCatalog {
            recipes: vec![recipe(1, "Risotto"), recipe(2, "Paella")],
            searches: HashMap::from([("paella".to_string(), vec![recipe(2, "Paella")])]),
            ..Default::default()
        });

        session.fetch_all_recipes().await.unwrap();
        session.search_recipes("paella").await.unwrap();

        let listing = session.listing();
        assert_eq!(listing.source, ListingSource::Search("paella".into()));
        assert_eq!(names(&listing.recipes), vec!["Paella"]);
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_listing_and_reports_error() {
        let session = session_with(StubCatalog {
            fail: true,
            ..Default::default()
        });

        assert!(session.fetch_all_recipes().await.is_err());
        assert!(session.search_recipes("soup").await.is_err());
        assert_eq!(session.listing().source, ListingSource::Empty);
    }

    #[tokio::test]
    async fn test_stale_search_does_not_overwrite_newer() {
        let release = Arc::new(Notify::new());
        let session = session_with(StubCatalog {
            searches: HashMap::from([
                ("pas".to_string(), vec![recipe(1, "Pasta"), recipe(2, "Pastel")]),
                ("pasta".to_string(), vec![recipe(1, "Pasta")]),
            ]),
            hold: Some("pas".into()),
            release: release.clone(),
            ..Default::default()
        });

        let (slow, fast) = tokio::join!(session.search_recipes("pas"), async {
            let result = session.search_recipes("pasta").await;
            release.notify_one();
            result
        });

        // The slow caller still sees its own results.
        assert_eq!(slow.unwrap().len(), 2);
        assert_eq!(fast.unwrap().len(), 1);

        let listing = session.listing();
        assert_eq!(listing.source, ListingSource::Search("pasta".into()));
        assert_eq!(names(&listing.recipes), vec!["Pasta"]);
    }

    #[tokio::test]
    async fn test_subscribers_see_listing_changes() {
        let session = session_with(StubCatalog {
            recipes: vec![recipe(1, "Risotto")],
            ..Default::default()
        });
        let mut rx = session.subscribe();

        session.fetch_all_recipes().await.unwrap();

        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().source, ListingSource::All);
    }

    #[tokio::test]
    async fn test_favorites_do_not_touch_listing() {
        let session = session_with(StubCatalog {
            recipes: vec![recipe(1, "Risotto")],
            ..Default::default()
        });
        session.fetch_all_recipes().await.unwrap();
        let mut rx = session.subscribe();

        session.save_favorite(recipe(1, "Risotto")).await;
        session.remove_favorite(1).await;

        assert!(!rx.has_changed().unwrap());
        assert_eq!(session.listing().source, ListingSource::All);
    }

    #[tokio::test]
    async fn test_favorites_pass_through() {
        let session = session_with(StubCatalog {
            recipes: vec![recipe(1, "Risotto"), recipe(2, "Paella")],
            ..Default::default()
        });

        let detail = session.get_recipe_by_id(2).await.unwrap().unwrap();
        session.save_favorite(detail).await;

        assert!(session.is_favorite(2));
        assert!(!session.is_favorite(1));
        assert_eq!(names(&session.favorites()), vec!["Paella"]);
        assert_eq!(names(&session.get_favorites().await), vec!["Paella"]);

        session.remove_favorite(2).await;
        assert!(!session.is_favorite(2));
        assert!(session.get_favorites().await.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_recipe_is_absent() {
        let session = session_with(StubCatalog::default());
        assert!(session.get_recipe_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_start_loads_favorites_and_listing() {
        let storage = Arc::new(MemoryStorage::new());
        FavoritesStore::new(storage.clone())
            .save_favorite(recipe(2, "Paella"))
            .await;

        let favorites = Arc::new(FavoritesStore::new(storage));
        let session = RecipeSession::new(
            Arc::new(StubCatalog {
                recipes: vec![recipe(1, "Risotto"), recipe(2, "Paella")],
                ..Default::default()
            }),
            favorites,
        );
        assert!(!session.is_favorite(2));

        session.start().await.unwrap();

        assert!(session.is_favorite(2));
        assert_eq!(session.listing().recipes.len(), 2);
    }
}
