use serde::Serialize;

/// A registered shop owner: credentials plus profile metadata.
///
/// The password hash is kept for verification only and is never serialized
/// outward, so API responses can carry an `Account` directly.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Opaque identifier assigned by the store at creation, immutable.
    pub id: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub shop: Option<String>,
    pub profile_image: Option<String>,
}

/// The fields needed to create an account. The id is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub password_hash: String,
    pub shop: Option<String>,
    pub profile_image: Option<String>,
}
