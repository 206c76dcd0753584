use std::path::PathBuf;
use std::sync::Arc;

use crate::app::error::{PantryError, Result};
use crate::catalog::{Catalog, HttpCatalog};
use crate::config::Config;
use crate::favorites::FavoritesStore;
use crate::session::RecipeSession;
use crate::storage::{KeyValueStorage, MemoryStorage, SqliteStorage};

pub struct AppContext {
    pub storage: Arc<dyn KeyValueStorage + Send + Sync>,
    pub catalog: Arc<dyn Catalog + Send + Sync>,
    pub favorites: Arc<FavoritesStore>,
    pub session: Arc<RecipeSession>,
}

impl AppContext {
    pub fn new(config: &Config) -> Result<Self> {
        let db_path = match &config.storage.path {
            Some(p) => p.clone(),
            None => Self::default_db_path()?,
        };

        let storage: Arc<dyn KeyValueStorage + Send + Sync> = Arc::new(SqliteStorage::new(&db_path)?);
        let catalog: Arc<dyn Catalog + Send + Sync> = Arc::new(HttpCatalog::new(&config.catalog)?);

        Ok(Self::with_parts(config, storage, catalog))
    }

    /// Favorites kept in memory only; nothing survives the process.
    pub fn in_memory(config: &Config) -> Result<Self> {
        let storage: Arc<dyn KeyValueStorage + Send + Sync> = Arc::new(MemoryStorage::new());
        let catalog: Arc<dyn Catalog + Send + Sync> = Arc::new(HttpCatalog::new(&config.catalog)?);

        Ok(Self::with_parts(config, storage, catalog))
    }

    pub fn with_parts(
        config: &Config,
        storage: Arc<dyn KeyValueStorage + Send + Sync>,
        catalog: Arc<dyn Catalog + Send + Sync>,
    ) -> Self {
        let favorites = Arc::new(FavoritesStore::with_key(
            storage.clone(),
            &config.storage.favorites_key,
        ));
        let session = Arc::new(RecipeSession::new(catalog.clone(), favorites.clone()));

        Self {
            storage,
            catalog,
            favorites,
            session,
        }
    }

    fn default_db_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| PantryError::Config("Could not find data directory".into()))?;
        let pantry_dir = data_dir.join("pantry");
        std::fs::create_dir_all(&pantry_dir)?;
        Ok(pantry_dir.join("pantry.db"))
    }
}
