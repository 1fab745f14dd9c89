use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use figment::{
    providers::{Format, Yaml},
    Figment,
};
use framery::auth::{AuthFlow, TokenCodec};
use framery::config::{Config, ConfigV1};
use framery::metrics::Metrics;
use framery::routes::create_router;
use framery::state::AppState;
use framery::store::create_store;
use serde_json::Value;
use tower::ServiceExt;

pub const TEST_CONFIG: &str = r#"
version: "1.0.0"
store:
  type: memory
bind_address: 127.0.0.1:8089
token:
  secret: test-secret
cors:
  allowed_origin: http://localhost:5173
logging:
  level: "debug"
  format: "console"
"#;

pub fn load_test_config() -> ConfigV1 {
    let config: Config = Figment::new()
        .merge(Yaml::string(TEST_CONFIG))
        .extract()
        .expect("Failed to parse test config YAML");

    match config {
        Config::ConfigV1(cfg) => cfg,
    }
}

pub async fn build_app(config: ConfigV1) -> (Router, Arc<ConfigV1>) {
    let config = Arc::new(config);
    let (accounts, products) = create_store(&config.store).await;
    let auth = Arc::new(AuthFlow::new(
        accounts,
        TokenCodec::new(&config.token.secret),
    ));
    let metrics = Metrics::new();

    let state = AppState {
        config: config.clone(),
        auth,
        products,
        metrics,
    };

    (create_router(state), config)
}

pub fn post_json(path: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

pub fn get_request(path: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(path)
        .body(Body::empty())
        .expect("failed to build request")
}

pub async fn read_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    String::from_utf8(bytes.to_vec()).expect("response body not valid UTF-8")
}

pub async fn read_json(response: Response<Body>) -> Value {
    let text = read_text(response).await;
    serde_json::from_str(&text).expect("response body not valid JSON")
}

/// Registers an account and logs it in, returning the issued token.
pub async fn register_and_login(app: &Router, username: &str, password: &str) -> String {
    let response = app
        .clone()
        .oneshot(post_json(
            "/register",
            serde_json::json!({ "username": username, "password": password }),
        ))
        .await
        .expect("register request should complete");
    assert_eq!(read_text(response).await, "Registration Successfull");

    let response = app
        .clone()
        .oneshot(post_json(
            "/login",
            serde_json::json!({ "username": username, "password": password }),
        ))
        .await
        .expect("login request should complete");

    let body = read_json(response).await;
    assert_eq!(body["message"], "login successful");
    body["token"]
        .as_str()
        .expect("login should issue a token")
        .to_string()
}
