use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Account, NewAccount, NewProduct, Product};
use crate::store::{AccountStore, ProductStore, StoreError};

/// An in-memory store, used as a lightweight backend for tests and local
/// development without a database.
///
/// The username existence check and the insert happen under one write lock,
/// so the uniqueness invariant holds here just as the unique index does for
/// the MongoDB backend.
pub struct MemoryStore {
    accounts: RwLock<HashMap<String, Account>>,
    products: RwLock<HashMap<String, Product>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            accounts: RwLock::new(HashMap::new()),
            products: RwLock::new(HashMap::new()),
        }
    }

    fn lock_poisoned(what: &str) -> StoreError {
        StoreError::Backend(format!("{} lock poisoned", what))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError> {
        let accounts = self
            .accounts
            .read()
            .map_err(|_| Self::lock_poisoned("accounts"))?;
        Ok(accounts
            .values()
            .find(|account| account.username == username)
            .cloned())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Account>, StoreError> {
        let accounts = self
            .accounts
            .read()
            .map_err(|_| Self::lock_poisoned("accounts"))?;
        Ok(accounts.get(id).cloned())
    }

    async fn create(&self, new: NewAccount) -> Result<Account, StoreError> {
        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| Self::lock_poisoned("accounts"))?;

        if accounts
            .values()
            .any(|account| account.username == new.username)
        {
            return Err(StoreError::Conflict(new.username));
        }

        let account = Account {
            id: Uuid::new_v4().to_string(),
            username: new.username,
            password_hash: new.password_hash,
            shop: new.shop,
            profile_image: new.profile_image,
        };
        accounts.insert(account.id.clone(), account.clone());

        Ok(account)
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn insert(&self, creator: &str, draft: &NewProduct) -> Result<Product, StoreError> {
        let mut products = self
            .products
            .write()
            .map_err(|_| Self::lock_poisoned("products"))?;

        let product = Product {
            id: Uuid::new_v4().to_string(),
            creator: creator.to_string(),
            image: draft.image.clone(),
            name: draft.name.clone(),
            kind: draft.kind.clone(),
            ideal_for: draft.ideal_for.clone(),
            frame_size: draft.frame_size,
            frame_type: draft.frame_type.clone(),
            frame_shape: draft.frame_shape.clone(),
            frame_color: draft.frame_color.clone(),
        };
        products.insert(product.id.clone(), product.clone());

        Ok(product)
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        let mut products = self
            .products
            .write()
            .map_err(|_| Self::lock_poisoned("products"))?;
        products.remove(id);
        Ok(())
    }

    async fn list_by_creator(&self, creator: &str) -> Result<Vec<Product>, StoreError> {
        let products = self
            .products
            .read()
            .map_err(|_| Self::lock_poisoned("products"))?;
        Ok(products
            .values()
            .filter(|product| product.creator == creator)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<Product>, StoreError> {
        let products = self
            .products
            .read()
            .map_err(|_| Self::lock_poisoned("products"))?;
        Ok(products.values().cloned().collect())
    }
}
