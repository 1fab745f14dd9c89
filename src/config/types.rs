use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use super::store::StoreConfig;

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0: store backend, HTTP surface, token secret, CORS,
/// and logging.
#[derive(Deserialize, Serialize, Debug, JsonSchema)]
pub struct ConfigV1 {
    pub store: StoreConfig,
    pub bind_address: String,
    pub token: TokenConfig,
    pub cors: CorsConfig,
    /// Request body cap in megabytes; product images travel base64-encoded
    /// in the JSON body. Defaults to 50.
    pub body_limit_mb: Option<usize>,
    pub logging: LoggingConfig,
}

/// Load config from a YAML file named "config.yaml" in the current directory,
/// with `FRAMERY_`-prefixed environment variables taking precedence
/// (e.g. FRAMERY_TOKEN__SECRET, FRAMERY_BIND_ADDRESS).
pub fn load_config() -> ConfigV1 {
    let figment = Figment::new()
        .merge(Yaml::file("./config.yaml"))
        .merge(Env::prefixed("FRAMERY_").split("__"));
    let config = match figment.extract::<Config>() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            std::process::exit(1);
        }
    };
    match config {
        Config::ConfigV1(c) => c,
    }
}

/// Print the JSON schema for the configuration to stdout.
pub fn print_schema() {
    let schema = schema_for!(Config);
    println!("{}", serde_json::to_string_pretty(&schema).unwrap());
}

/// Signing configuration for identity tokens.
#[derive(Deserialize, Serialize, Debug, JsonSchema)]
pub struct TokenConfig {
    pub secret: String,
}

/// Cross-origin policy for the storefront frontend.
/// With no allowed origin configured, cross-origin access stays disabled.
#[derive(Deserialize, Serialize, Debug, JsonSchema)]
pub struct CorsConfig {
    pub allowed_origin: Option<String>,
}
