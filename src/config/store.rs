use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::store::mongodb_store::MongoDBConfig;

/// The available store backends, differentiated via a "type" tag in the YAML.
///
/// `memory` keeps everything in-process; it is meant for tests and local
/// development rather than durable deployments.
#[derive(Deserialize, Serialize, Debug, JsonSchema)]
#[serde(tag = "type")]
pub enum StoreConfig {
    #[serde(rename = "mongo")]
    MongoDB(MongoDBConfig),
    #[serde(rename = "memory")]
    Memory,
}
