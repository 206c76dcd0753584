pub mod memory;
pub mod sqlite;

use async_trait::async_trait;

use crate::app::Result;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

/// Durable string-keyed storage. A successful `set` must survive a restart
/// of the backing substrate.
#[async_trait]
pub trait KeyValueStorage {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}
