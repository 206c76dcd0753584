//! # Pantry
//!
//! Recipe browsing against a remote catalog, with favorites kept on-device.
//!
//! ## Architecture
//!
//! ```text
//! KeyValueStorage → FavoritesStore ─┐
//!                                   ├→ RecipeSession → CLI
//!                    Catalog ───────┘
//! ```
//!
//! - [`catalog`]: read-only HTTP client for the recipe catalog
//! - [`favorites`]: deduplicated, persisted favorites with serialized writes
//! - [`session`]: the facade front-ends talk to
//! - [`storage`]: key-value substrates (SQLite, in-memory)
//!
//! ## Quick Start
//!
//! ```bash
//! # Browse and search
//! pantry list
//! pantry search pasta
//! pantry show 12
//!
//! # Favorites
//! pantry favorite add 12 17
//! pantry favorites
//! pantry favorite remove 12
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together storage,
/// catalog, favorites and the session.
pub mod app;

/// Remote recipe catalog.
///
/// - [`Catalog`](catalog::Catalog): Async trait for catalog lookups
/// - [`HttpCatalog`](catalog::HttpCatalog): reqwest-based implementation
pub mod catalog;

/// Command-line interface using clap.
pub mod cli;

/// Configuration loaded from `~/.config/pantry/config.toml`.
pub mod config;

/// Core domain models ([`Recipe`](domain::Recipe), [`Instructions`](domain::Instructions)).
pub mod domain;

/// Favorites persisted through a [`KeyValueStorage`](storage::KeyValueStorage).
pub mod favorites;

/// Facade combining catalog queries, favorites and the shared listing.
pub mod session;

/// Key-value storage substrates.
///
/// - [`SqliteStorage`](storage::SqliteStorage): durable, one `kv` table
/// - [`MemoryStorage`](storage::MemoryStorage): process-local
pub mod storage;
