//! Product catalog endpoint handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::models::{NewProduct, Product};
use crate::state::AppState;
use crate::utils::http_helpers::HTTPError;

/// Registers catalog routes. `/product-api` answers both a POST (the calling
/// owner's products, resolved from the token in the body) and a GET (the
/// whole catalog, unauthenticated).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/create-product", post(create_product))
        .route("/delete-product", post(delete_product))
        .route("/product-api", post(list_own_products).get(list_all_products))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateProductRequest {
    access_token: String,
    product: NewProduct,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteProductRequest {
    product_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListProductsRequest {
    access_token: String,
}

#[derive(Serialize)]
struct CatalogReply {
    response: &'static str,
}

/// Creates a product stamped with the calling owner's username.
async fn create_product(
    State(state): State<AppState>,
    Json(body): Json<CreateProductRequest>,
) -> Response {
    let account = match state.auth.resolve_identity(&body.access_token).await {
        Ok(Some(account)) => account,
        Ok(None) => {
            state.metrics.record_catalog("create", "unauthorized");
            return (
                StatusCode::UNAUTHORIZED,
                Json(CatalogReply { response: "error" }),
            )
                .into_response();
        }
        Err(e) => {
            state.metrics.record_catalog("create", "fault");
            return HTTPError::fault("create-product", e).into_response();
        }
    };

    match state.products.insert(&account.username, &body.product).await {
        Ok(_) => {
            state.metrics.record_catalog("create", "ok");
            (
                StatusCode::CREATED,
                Json(CatalogReply {
                    response: "product is created successfully",
                }),
            )
                .into_response()
        }
        Err(e) => {
            state.metrics.record_catalog("create", "fault");
            HTTPError::fault("create-product", e).into_response()
        }
    }
}

/// Removes a product by id. Unknown ids are a no-op success.
async fn delete_product(
    State(state): State<AppState>,
    Json(body): Json<DeleteProductRequest>,
) -> Response {
    match state.products.delete_by_id(&body.product_id).await {
        Ok(()) => {
            state.metrics.record_catalog("delete", "ok");
            Json(CatalogReply {
                response: "Deleted",
            })
            .into_response()
        }
        Err(e) => {
            state.metrics.record_catalog("delete", "fault");
            tracing::error!("Unhandled fault in delete-product: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(CatalogReply { response: "Error" }),
            )
                .into_response()
        }
    }
}

/// Lists the products created by the calling shop owner.
async fn list_own_products(
    State(state): State<AppState>,
    Json(body): Json<ListProductsRequest>,
) -> Response {
    let account = match state.auth.resolve_identity(&body.access_token).await {
        Ok(Some(account)) => account,
        Ok(None) => {
            state.metrics.record_catalog("list_own", "unauthorized");
            return (
                StatusCode::UNAUTHORIZED,
                Json(CatalogReply { response: "error" }),
            )
                .into_response();
        }
        Err(e) => {
            state.metrics.record_catalog("list_own", "fault");
            return HTTPError::fault("product-api", e).into_response();
        }
    };

    match state.products.list_by_creator(&account.username).await {
        Ok(products) => {
            state.metrics.record_catalog("list_own", "ok");
            Json::<Vec<Product>>(products).into_response()
        }
        Err(e) => {
            state.metrics.record_catalog("list_own", "fault");
            HTTPError::fault("product-api", e).into_response()
        }
    }
}

/// Lists the entire catalog across all shops.
async fn list_all_products(State(state): State<AppState>) -> Response {
    match state.products.list_all().await {
        Ok(products) => {
            state.metrics.record_catalog("list_all", "ok");
            Json::<Vec<Product>>(products).into_response()
        }
        Err(e) => {
            state.metrics.record_catalog("list_all", "fault");
            HTTPError::fault("product-api", e).into_response()
        }
    }
}
