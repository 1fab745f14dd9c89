use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, IndexModel};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::models::{Account, NewAccount, NewProduct, Product};
use crate::store::{AccountStore, ProductStore, StoreError};

/// The config struct for MongoDB connections.
/// Contains the URI and database name.
#[derive(Deserialize, Serialize, JsonSchema, Debug)]
pub struct MongoDBConfig {
    pub uri: String,
    pub database: String,
}

/// Concrete `AccountStore` + `ProductStore` implementation backed by MongoDB.
///
/// This struct holds references to two collections:
/// - `admin_collection`: shop-owner accounts
/// - `product_collection`: the eyewear catalog
pub struct MongoDBStore {
    admin_collection: Collection<AccountDocument>,
    product_collection: Collection<ProductDocument>,
}

/// Document shape for accounts. Field names match the collection layout the
/// storefront has always used (`password` holds the bcrypt hash, `profile`
/// the image reference).
#[derive(Serialize, Deserialize, Clone, Debug)]
struct AccountDocument {
    _id: ObjectId,
    username: String,
    password: String,
    shop: Option<String>,
    profile: Option<String>,
}

/// Document shape for products.
#[derive(Serialize, Deserialize, Clone, Debug)]
struct ProductDocument {
    _id: ObjectId,
    creator: String,
    image: Option<String>,
    name: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    #[serde(rename = "idealFor")]
    ideal_for: Option<String>,
    #[serde(rename = "frameSize")]
    frame_size: Option<f64>,
    #[serde(rename = "frameType")]
    frame_type: Option<String>,
    #[serde(rename = "frameShape")]
    frame_shape: Option<String>,
    #[serde(rename = "frameColor")]
    frame_color: Option<String>,
}

/// True when the error is the server rejecting a write on a unique index.
fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        *err.kind,
        ErrorKind::Write(WriteFailure::WriteError(ref write_error)) if write_error.code == 11000
    )
}

impl MongoDBStore {
    /// Creates a new `MongoDBStore` from the given config.
    /// It initializes client connections, sets up indexes, etc.
    pub async fn new(config: &MongoDBConfig) -> Result<Self, String> {
        info!("Connecting to MongoDB at URI: {}", config.uri);

        // Parse the connection string from the config
        let mut client_options = ClientOptions::parse(&config.uri)
            .await
            .map_err(|e| format!("Failed to parse MongoDB URI: {}", e))?;

        // Optionally set the client application name
        client_options.app_name = Some("Framery".to_string());

        // Create a new MongoDB client
        let client = Client::with_options(client_options)
            .map_err(|e| format!("Failed to create MongoDB client: {}", e))?;

        info!("MongoDB connection established successfully.");

        // Retrieve the specified database and relevant collections
        let database = client.database(&config.database);
        let admin_collection = database.collection::<AccountDocument>("admins");
        let product_collection = database.collection::<ProductDocument>("products");

        // Unique index on username. The index is the backstop that keeps
        // concurrent registrations from both succeeding; the application-level
        // existence check alone cannot.
        let mut unique_on_username = IndexModel::default();
        unique_on_username.keys = doc! { "username": 1 };
        unique_on_username.options = Some(IndexOptions::builder().unique(true).build());

        admin_collection
            .create_index(unique_on_username, None)
            .await
            .map_err(|e| format!("Failed to create unique index on username: {}", e))?;

        Ok(Self {
            admin_collection,
            product_collection,
        })
    }

    /// Build a fresh document for a new account. The store assigns the id.
    fn new_account_doc(new: NewAccount) -> AccountDocument {
        AccountDocument {
            _id: ObjectId::new(),
            username: new.username,
            password: new.password_hash,
            shop: new.shop,
            profile: new.profile_image,
        }
    }

    /// Convert an `AccountDocument` back into an `Account`.
    fn doc_to_account(doc: &AccountDocument) -> Account {
        Account {
            id: doc._id.to_hex(),
            username: doc.username.clone(),
            password_hash: doc.password.clone(),
            shop: doc.shop.clone(),
            profile_image: doc.profile.clone(),
        }
    }

    /// Build a fresh document for a product draft, stamped with its creator.
    fn new_product_doc(creator: &str, draft: &NewProduct) -> ProductDocument {
        ProductDocument {
            _id: ObjectId::new(),
            creator: creator.to_string(),
            image: draft.image.clone(),
            name: draft.name.clone(),
            kind: draft.kind.clone(),
            ideal_for: draft.ideal_for.clone(),
            frame_size: draft.frame_size,
            frame_type: draft.frame_type.clone(),
            frame_shape: draft.frame_shape.clone(),
            frame_color: draft.frame_color.clone(),
        }
    }

    /// Convert a `ProductDocument` back into a `Product`.
    fn doc_to_product(doc: &ProductDocument) -> Product {
        Product {
            id: doc._id.to_hex(),
            creator: doc.creator.clone(),
            image: doc.image.clone(),
            name: doc.name.clone(),
            kind: doc.kind.clone(),
            ideal_for: doc.ideal_for.clone(),
            frame_size: doc.frame_size,
            frame_type: doc.frame_type.clone(),
            frame_shape: doc.frame_shape.clone(),
            frame_color: doc.frame_color.clone(),
        }
    }
}

#[async_trait]
impl AccountStore for MongoDBStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError> {
        let account_doc = self
            .admin_collection
            .find_one(doc! { "username": username }, None)
            .await
            .map_err(|e| StoreError::Backend(format!("Failed to query account: {}", e)))?;

        Ok(account_doc.as_ref().map(Self::doc_to_account))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Account>, StoreError> {
        // An id that is not a valid ObjectId cannot match any document.
        let object_id = match ObjectId::parse_str(id) {
            Ok(oid) => oid,
            Err(_) => {
                debug!("Account id '{}' is not a valid ObjectId.", id);
                return Ok(None);
            }
        };

        let account_doc = self
            .admin_collection
            .find_one(doc! { "_id": object_id }, None)
            .await
            .map_err(|e| StoreError::Backend(format!("Failed to query account by id: {}", e)))?;

        Ok(account_doc.as_ref().map(Self::doc_to_account))
    }

    async fn create(&self, new: NewAccount) -> Result<Account, StoreError> {
        let account_doc = Self::new_account_doc(new);

        self.admin_collection
            .insert_one(account_doc.clone(), None)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    StoreError::Conflict(account_doc.username.clone())
                } else {
                    StoreError::Backend(format!("Failed to insert account: {}", e))
                }
            })?;

        Ok(Self::doc_to_account(&account_doc))
    }
}

#[async_trait]
impl ProductStore for MongoDBStore {
    async fn insert(&self, creator: &str, draft: &NewProduct) -> Result<Product, StoreError> {
        let product_doc = Self::new_product_doc(creator, draft);

        self.product_collection
            .insert_one(product_doc.clone(), None)
            .await
            .map_err(|e| StoreError::Backend(format!("Failed to insert product: {}", e)))?;

        Ok(Self::doc_to_product(&product_doc))
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        let object_id = match ObjectId::parse_str(id) {
            Ok(oid) => oid,
            Err(_) => {
                debug!("Product id '{}' is not a valid ObjectId.", id);
                return Ok(());
            }
        };

        self.product_collection
            .delete_one(doc! { "_id": object_id }, None)
            .await
            .map_err(|e| StoreError::Backend(format!("Failed to delete product: {}", e)))?;

        Ok(())
    }

    async fn list_by_creator(&self, creator: &str) -> Result<Vec<Product>, StoreError> {
        let mut cursor = self
            .product_collection
            .find(doc! { "creator": creator }, None)
            .await
            .map_err(|e| StoreError::Backend(format!("Failed to list products: {}", e)))?;

        let mut products = Vec::new();
        while let Some(product_doc) = cursor
            .try_next()
            .await
            .map_err(|e| StoreError::Backend(format!("Failed to read product document: {}", e)))?
        {
            products.push(Self::doc_to_product(&product_doc));
        }

        Ok(products)
    }

    async fn list_all(&self) -> Result<Vec<Product>, StoreError> {
        let mut cursor = self
            .product_collection
            .find(doc! {}, None)
            .await
            .map_err(|e| StoreError::Backend(format!("Failed to list products: {}", e)))?;

        let mut products = Vec::new();
        while let Some(product_doc) = cursor
            .try_next()
            .await
            .map_err(|e| StoreError::Backend(format!("Failed to read product document: {}", e)))?
        {
            products.push(Self::doc_to_product(&product_doc));
        }

        Ok(products)
    }
}
