use serde::{Deserialize, Serialize};

/// A catalog entry owned by a shop owner.
///
/// `creator` is the owning account's username, denormalized into the product
/// record rather than a referential id.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub creator: String,
    pub image: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub ideal_for: Option<String>,
    pub frame_size: Option<f64>,
    pub frame_type: Option<String>,
    pub frame_shape: Option<String>,
    pub frame_color: Option<String>,
}

/// The client-supplied product fields. Creator and id are assigned server-side.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub image: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub ideal_for: Option<String>,
    pub frame_size: Option<f64>,
    pub frame_type: Option<String>,
    pub frame_shape: Option<String>,
    pub frame_color: Option<String>,
}
