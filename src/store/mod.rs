//! Persistence abstractions for accounts and products.
//!
//! Storage is reached only through the `AccountStore` and `ProductStore`
//! traits; `create_store` picks the concrete backend from the configuration.

pub mod memory_store;
pub mod mongodb_store;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{error, info};

use crate::config::StoreConfig;
use crate::models::{Account, NewAccount, NewProduct, Product};
use self::memory_store::MemoryStore;
use self::mongodb_store::MongoDBStore;

/// Errors surfaced by a store backend.
///
/// `Conflict` is the uniqueness constraint rejecting a write; everything else
/// is an unexpected backend fault.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate key: {0}")]
    Conflict(String),
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Durable mapping from username to account and from id to account.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Absence is a normal outcome, not a failure.
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError>;

    /// Absence is a normal outcome. Ids that cannot possibly refer to a
    /// stored account (e.g. malformed) are also a miss, not a fault.
    async fn find_by_id(&self, id: &str) -> Result<Option<Account>, StoreError>;

    /// Creates an account. The backend's uniqueness constraint rejects a
    /// duplicate username with `StoreError::Conflict`, so two concurrent
    /// registrations can never both succeed.
    async fn create(&self, new: NewAccount) -> Result<Account, StoreError>;
}

/// Product catalog persistence.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn insert(&self, creator: &str, draft: &NewProduct) -> Result<Product, StoreError>;

    /// Deleting an id that does not exist is a no-op success.
    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError>;

    async fn list_by_creator(&self, creator: &str) -> Result<Vec<Product>, StoreError>;

    async fn list_all(&self) -> Result<Vec<Product>, StoreError>;
}

/// Creates the concrete store implementation selected by the config.
///
/// A MongoDB backend that fails to initialize is fatal at startup.
pub async fn create_store(config: &StoreConfig) -> (Arc<dyn AccountStore>, Arc<dyn ProductStore>) {
    match config {
        StoreConfig::MongoDB(mongo_config) => match MongoDBStore::new(mongo_config).await {
            Ok(store) => {
                info!("Successfully created MongoDB store.");
                let store = Arc::new(store);
                (store.clone() as Arc<dyn AccountStore>, store)
            }
            Err(e) => {
                error!("Failed to create MongoDB store: {}", e);
                std::process::exit(1);
            }
        },
        StoreConfig::Memory => {
            info!("Using in-memory store.");
            let store = Arc::new(MemoryStore::new());
            (store.clone() as Arc<dyn AccountStore>, store)
        }
    }
}
