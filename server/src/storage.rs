// server/src/storage.rs

use crate::config::AppConfig;
use std::sync::Arc;
use storefront::{MemoryStore, Repository, ShopResult, SqliteStore};
use tracing::info;

/// The store selected by `DATABASE_URL`, kept so it can be closed at shutdown.
#[derive(Debug, Clone)]
pub enum Storage {
  Memory(MemoryStore),
  Sqlite(SqliteStore),
}

impl Storage {
  /// Opens the configured store and makes sure its schema exists.
  pub async fn open(config: &AppConfig) -> ShopResult<Self> {
    if config.uses_memory_store() {
      info!("Using the in-memory store; data is lost on shutdown.");
      return Ok(Storage::Memory(MemoryStore::new()));
    }
    let store = SqliteStore::connect(&config.database_url, config.database_max_connections).await?;
    store.migrate().await?;
    Ok(Storage::Sqlite(store))
  }

  pub fn repository(&self) -> Arc<dyn Repository> {
    match self {
      Storage::Memory(store) => Arc::new(store.clone()),
      Storage::Sqlite(store) => Arc::new(store.clone()),
    }
  }

  pub async fn close(&self) {
    if let Storage::Sqlite(store) = self {
      store.close().await;
    }
  }
}
