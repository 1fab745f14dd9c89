mod common;

use axum::http::StatusCode;
use common::{build_app, get_request, load_test_config, post_json, read_json, read_text};
use serde_json::json;
use tower::ServiceExt;

/// Created products are stamped with their creator; the POST listing shows
/// only the caller's products while the GET listing shows the whole catalog.
#[tokio::test]
async fn integration_create_and_list_products() {
    let (app, _config) = build_app(load_test_config()).await;

    let eve_token = common::register_and_login(&app, "eve", "hunter2").await;
    let adam_token = common::register_and_login(&app, "adam", "paradise").await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/create-product",
            json!({
                "accessToken": eve_token,
                "product": {
                    "name": "Wayfarer",
                    "type": "sunglasses",
                    "frameSize": 52,
                    "frameShape": "square",
                    "frameColor": "black"
                }
            }),
        ))
        .await
        .expect("request should complete");
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        read_json(response).await["response"],
        "product is created successfully"
    );

    let response = app
        .clone()
        .oneshot(post_json(
            "/create-product",
            json!({
                "accessToken": adam_token,
                "product": { "name": "Aviator", "type": "sunglasses" }
            }),
        ))
        .await
        .expect("request should complete");
    assert_eq!(response.status(), StatusCode::CREATED);

    // Eve sees only her own product.
    let response = app
        .clone()
        .oneshot(post_json("/product-api", json!({ "accessToken": eve_token })))
        .await
        .expect("request should complete");
    let eve_products = read_json(response).await;
    let eve_products = eve_products.as_array().expect("array reply");
    assert_eq!(eve_products.len(), 1);
    assert_eq!(eve_products[0]["creator"], "eve");
    assert_eq!(eve_products[0]["name"], "Wayfarer");
    assert_eq!(eve_products[0]["frameSize"], 52.0);

    // The public listing spans both shops.
    let response = app
        .clone()
        .oneshot(get_request("/product-api"))
        .await
        .expect("request should complete");
    let all_products = read_json(response).await;
    assert_eq!(all_products.as_array().expect("array reply").len(), 2);
}

/// Catalog writes require a resolvable identity.
#[tokio::test]
async fn integration_create_product_unauthorized() {
    let (app, _config) = build_app(load_test_config()).await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/create-product",
            json!({
                "accessToken": "not-a-token",
                "product": { "name": "Wayfarer" }
            }),
        ))
        .await
        .expect("request should complete");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(read_json(response).await["response"], "error");
}

/// Deleting a product removes it from every listing; deleting an unknown id
/// still answers "Deleted".
#[tokio::test]
async fn integration_delete_product() {
    let (app, _config) = build_app(load_test_config()).await;

    let token = common::register_and_login(&app, "eve", "hunter2").await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/create-product",
            json!({ "accessToken": token, "product": { "name": "Wayfarer" } }),
        ))
        .await
        .expect("request should complete");
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(get_request("/product-api"))
        .await
        .expect("request should complete");
    let products = read_json(response).await;
    let product_id = products.as_array().expect("array reply")[0]["id"]
        .as_str()
        .expect("product id")
        .to_string();

    let response = app
        .clone()
        .oneshot(post_json(
            "/delete-product",
            json!({ "productId": product_id }),
        ))
        .await
        .expect("request should complete");
    assert_eq!(read_json(response).await["response"], "Deleted");

    let response = app
        .clone()
        .oneshot(get_request("/product-api"))
        .await
        .expect("request should complete");
    assert!(read_json(response)
        .await
        .as_array()
        .expect("array reply")
        .is_empty());

    let response = app
        .clone()
        .oneshot(post_json(
            "/delete-product",
            json!({ "productId": "does-not-exist" }),
        ))
        .await
        .expect("request should complete");
    assert_eq!(read_json(response).await["response"], "Deleted");
}

/// The root banner and health endpoints answer without authentication.
#[tokio::test]
async fn integration_liveness_endpoints() {
    let (app, _config) = build_app(load_test_config()).await;

    let response = app
        .clone()
        .oneshot(get_request("/"))
        .await
        .expect("request should complete");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_text(response).await, "Your Server is Working");

    let response = app
        .clone()
        .oneshot(get_request("/health"))
        .await
        .expect("request should complete");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_text(response).await, "OK");
}
