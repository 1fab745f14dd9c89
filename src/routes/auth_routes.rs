//! Authentication endpoint handlers.
//!
//! The wire shapes match what the storefront frontend already speaks: plain
//! text replies for registration, `{message, token?}` for login, and
//! `{admin}` for identity lookups with the token in the request body.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::auth::{LoginOutcome, RegisterOutcome};
use crate::models::Account;
use crate::state::AppState;
use crate::utils::http_helpers::HTTPError;

/// Registers authentication routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/admin", post(who_am_i))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterRequest {
    profile_picture: Option<String>,
    shop: Option<String>,
    username: Option<String>,
    password: Option<String>,
}

#[derive(Deserialize)]
struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Serialize)]
struct LoginResponse {
    message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    token: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WhoAmIRequest {
    access_token: String,
}

#[derive(Serialize)]
struct WhoAmIResponse {
    admin: Option<Account>,
}

/// Creates a new shop-owner account.
///
/// A taken username is an informational reply, not an error; the caller sees
/// the same message whether the existence check or the store's unique index
/// caught the duplicate.
async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<impl IntoResponse, HTTPError> {
    let outcome = state
        .auth
        .register(body.username, body.password, body.shop, body.profile_picture)
        .await
        .map_err(|e| {
            state.metrics.record_auth("register", "fault");
            HTTPError::fault("register", e)
        })?;

    let reply = match outcome {
        RegisterOutcome::Registered => {
            state.metrics.record_auth("register", "registered");
            (StatusCode::OK, "Registration Successfull")
        }
        RegisterOutcome::AlreadyExists => {
            state.metrics.record_auth("register", "already_exists");
            (StatusCode::OK, "User Already Exist")
        }
        RegisterOutcome::MissingCredentials => {
            state.metrics.record_auth("register", "missing_credentials");
            (StatusCode::BAD_REQUEST, "username and password are required")
        }
    };
    Ok(reply)
}

/// Verifies credentials and hands out an identity token.
async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, HTTPError> {
    let outcome = state
        .auth
        .login(&body.username, &body.password)
        .await
        .map_err(|e| {
            state.metrics.record_auth("login", "fault");
            HTTPError::fault("login", e)
        })?;

    let reply = match outcome {
        LoginOutcome::Success { token } => {
            state.metrics.record_auth("login", "success");
            LoginResponse {
                message: "login successful",
                token: Some(token),
            }
        }
        LoginOutcome::NoSuchUser => {
            state.metrics.record_auth("login", "no_such_user");
            LoginResponse {
                message: "user doesn't exist",
                token: None,
            }
        }
        LoginOutcome::InvalidCredentials => {
            state.metrics.record_auth("login", "invalid_credentials");
            LoginResponse {
                message: "invalid username or password",
                token: None,
            }
        }
    };
    Ok(Json(reply))
}

/// Resolves the calling shop owner from an identity token.
///
/// Unresolvable tokens answer with `admin: null` rather than an error, so
/// the frontend can treat "not logged in" as a normal state.
async fn who_am_i(
    State(state): State<AppState>,
    Json(body): Json<WhoAmIRequest>,
) -> Result<Json<WhoAmIResponse>, HTTPError> {
    let admin = state
        .auth
        .resolve_identity(&body.access_token)
        .await
        .map_err(|e| {
            state.metrics.record_auth("resolve", "fault");
            HTTPError::fault("whoAmI", e)
        })?;

    state
        .metrics
        .record_auth("resolve", if admin.is_some() { "resolved" } else { "absent" });
    Ok(Json(WhoAmIResponse { admin }))
}
