//! Locally persisted favorites.
//!
//! The whole collection is stored as one JSON array under a single key and
//! rewritten in full on every mutation. Storage faults never reach the
//! caller: reads degrade to an empty collection and failed writes are
//! logged and dropped.

use std::sync::{Arc, RwLock};

use tokio::sync::Mutex;

use crate::app::Result;
use crate::domain::{Recipe, RecipeId};
use crate::storage::KeyValueStorage;

pub const DEFAULT_FAVORITES_KEY: &str = "@favorites";

pub struct FavoritesStore {
    storage: Arc<dyn KeyValueStorage + Send + Sync>,
    key: String,
    /// Serializes every read-modify-write against storage.
    gate: Mutex<()>,
    /// Last collection read from or written to storage.
    cache: RwLock<Vec<Recipe>>,
}

impl FavoritesStore {
    pub fn new(storage: Arc<dyn KeyValueStorage + Send + Sync>) -> Self {
        Self::with_key(storage, DEFAULT_FAVORITES_KEY)
    }

    pub fn with_key(storage: Arc<dyn KeyValueStorage + Send + Sync>, key: &str) -> Self {
        Self {
            storage,
            key: key.to_string(),
            gate: Mutex::new(()),
            cache: RwLock::new(Vec::new()),
        }
    }

    /// Reload the collection from storage and return it in insertion order.
    pub async fn get_favorites(&self) -> Vec<Recipe> {
        let _guard = self.gate.lock().await;

        let favorites = match self.load().await {
            Ok(favorites) => favorites,
            Err(e) => {
                tracing::warn!("Failed to read favorites: {}", e);
                Vec::new()
            }
        };

        self.replace_cache(favorites.clone());
        favorites
    }

    /// Add `recipe` unless a favorite with the same id already exists.
    pub async fn save_favorite(&self, recipe: Recipe) {
        let _guard = self.gate.lock().await;

        let mut favorites = match self.load().await {
            Ok(favorites) => favorites,
            Err(e) => {
                tracing::warn!("Failed to read favorites, not saving {}: {}", recipe.id, e);
                return;
            }
        };

        if favorites.iter().any(|fav| fav.id == recipe.id) {
            tracing::debug!("Recipe {} is already a favorite", recipe.id);
            self.replace_cache(favorites);
            return;
        }

        let id = recipe.id;
        favorites.push(recipe);

        match self.persist(&favorites).await {
            Ok(()) => {
                tracing::info!("Saved favorite {}", id);
                self.replace_cache(favorites);
            }
            Err(e) => {
                tracing::warn!("Failed to save favorite {}: {}", id, e);
                favorites.pop();
                self.replace_cache(favorites);
            }
        }
    }

    /// Remove the favorite with `id`, if any.
    pub async fn remove_favorite(&self, id: RecipeId) {
        let _guard = self.gate.lock().await;

        let favorites = match self.load().await {
            Ok(favorites) => favorites,
            Err(e) => {
                tracing::warn!("Failed to read favorites, not removing {}: {}", id, e);
                return;
            }
        };

        let before = favorites.len();
        let remaining: Vec<Recipe> = favorites
            .iter()
            .filter(|fav| fav.id != id)
            .cloned()
            .collect();

        if remaining.len() == before {
            tracing::debug!("Recipe {} is not a favorite", id);
            self.replace_cache(favorites);
            return;
        }

        match self.persist(&remaining).await {
            Ok(()) => {
                tracing::info!("Removed favorite {}", id);
                self.replace_cache(remaining);
            }
            Err(e) => {
                tracing::warn!("Failed to remove favorite {}: {}", id, e);
                self.replace_cache(favorites);
            }
        }
    }

    /// Membership against the in-memory collection. Does not touch storage;
    /// call [`get_favorites`](Self::get_favorites) first to pick up changes
    /// made elsewhere.
    pub fn is_favorite(&self, id: RecipeId) -> bool {
        self.read_cache(|favorites| favorites.iter().any(|fav| fav.id == id))
    }

    /// Snapshot of the in-memory collection.
    pub fn favorites(&self) -> Vec<Recipe> {
        self.read_cache(|favorites| favorites.to_vec())
    }

    /// Missing or unparseable values load as empty. Only storage faults are
    /// returned as errors.
    async fn load(&self) -> Result<Vec<Recipe>> {
        let Some(raw) = self.storage.get(&self.key).await? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<Recipe>>(&raw) {
            Ok(favorites) => Ok(favorites),
            Err(e) => {
                tracing::warn!("Discarding unreadable favorites under {}: {}", self.key, e);
                Ok(Vec::new())
            }
        }
    }

    async fn persist(&self, favorites: &[Recipe]) -> Result<()> {
        let raw = serde_json::to_string(favorites)?;
        self.storage.set(&self.key, &raw).await
    }

    fn replace_cache(&self, favorites: Vec<Recipe>) {
        match self.cache.write() {
            Ok(mut cache) => *cache = favorites,
            Err(poisoned) => *poisoned.into_inner() = favorites,
        }
    }

    fn read_cache<T>(&self, f: impl FnOnce(&[Recipe]) -> T) -> T {
        match self.cache.read() {
            Ok(cache) => f(&cache),
            Err(poisoned) => f(&poisoned.into_inner()),
        }
    }
}
