mod common;

use axum::http::StatusCode;
use common::{build_app, get_request, load_test_config, post_json, read_json, read_text};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;
use tower::ServiceExt;

/// Register then login with the same credentials issues a non-empty token.
#[tokio::test]
async fn integration_register_then_login() {
    let (app, _config) = build_app(load_test_config()).await;

    let token = common::register_and_login(&app, "eve", "hunter2").await;
    assert!(!token.is_empty());
}

/// Registering the same username twice reports the existing account the
/// second time, and the original credentials keep working.
#[tokio::test]
async fn integration_duplicate_registration() {
    let (app, _config) = build_app(load_test_config()).await;

    let body = json!({ "username": "eve", "password": "hunter2", "shop": "Eve Eyewear" });

    let response = app
        .clone()
        .oneshot(post_json("/register", body.clone()))
        .await
        .expect("request should complete");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_text(response).await, "Registration Successfull");

    let response = app
        .clone()
        .oneshot(post_json("/register", body))
        .await
        .expect("request should complete");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_text(response).await, "User Already Exist");

    // Still exactly one working account behind the username.
    let response = app
        .clone()
        .oneshot(post_json(
            "/login",
            json!({ "username": "eve", "password": "hunter2" }),
        ))
        .await
        .expect("request should complete");
    assert_eq!(read_json(response).await["message"], "login successful");
}

/// Registration without a password is answered with the validation message.
#[tokio::test]
async fn integration_register_missing_fields() {
    let (app, _config) = build_app(load_test_config()).await;

    let response = app
        .clone()
        .oneshot(post_json("/register", json!({ "username": "eve" })))
        .await
        .expect("request should complete");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_text(response).await,
        "username and password are required"
    );
}

/// Login against a username that was never registered.
#[tokio::test]
async fn integration_login_unknown_user() {
    let (app, _config) = build_app(load_test_config()).await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/login",
            json!({ "username": "nobody", "password": "hunter2" }),
        ))
        .await
        .expect("request should complete");

    let body = read_json(response).await;
    assert_eq!(body["message"], "user doesn't exist");
    assert!(body.get("token").is_none());
}

/// Login with the wrong password is a negative outcome without a token.
#[tokio::test]
async fn integration_login_wrong_password() {
    let (app, _config) = build_app(load_test_config()).await;

    common::register_and_login(&app, "eve", "hunter2").await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/login",
            json!({ "username": "eve", "password": "wrong" }),
        ))
        .await
        .expect("request should complete");

    let body = read_json(response).await;
    assert_eq!(body["message"], "invalid username or password");
    assert!(body.get("token").is_none());
}

/// whoAmI resolves a login token back to the account that logged in, and the
/// reply never carries the password hash.
#[tokio::test]
async fn integration_who_am_i_round_trip() {
    let (app, _config) = build_app(load_test_config()).await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/register",
            json!({
                "username": "eve",
                "password": "hunter2",
                "shop": "Eve Eyewear",
                "profilePicture": "data:image/png;base64,AAAA"
            }),
        ))
        .await
        .expect("request should complete");
    assert_eq!(read_text(response).await, "Registration Successfull");

    let response = app
        .clone()
        .oneshot(post_json(
            "/login",
            json!({ "username": "eve", "password": "hunter2" }),
        ))
        .await
        .expect("request should complete");
    let token = read_json(response).await["token"]
        .as_str()
        .expect("token should be issued")
        .to_string();

    let response = app
        .clone()
        .oneshot(post_json("/admin", json!({ "accessToken": token })))
        .await
        .expect("request should complete");
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["admin"]["username"], "eve");
    assert_eq!(body["admin"]["shop"], "Eve Eyewear");
    assert_eq!(body["admin"]["profileImage"], "data:image/png;base64,AAAA");
    assert!(body["admin"].get("passwordHash").is_none());
    assert!(body["admin"].get("password_hash").is_none());
}

/// A syntactically invalid token resolves to no admin, not a fault.
#[tokio::test]
async fn integration_who_am_i_invalid_token() {
    let (app, _config) = build_app(load_test_config()).await;

    let response = app
        .clone()
        .oneshot(post_json("/admin", json!({ "accessToken": "not-a-token" })))
        .await
        .expect("request should complete");

    assert_eq!(response.status(), StatusCode::OK);
    assert!(read_json(response).await["admin"].is_null());
}

/// A token signed under a different secret is rejected even though its
/// payload decodes, so identity claims cannot be forged.
#[tokio::test]
async fn integration_who_am_i_forged_token() {
    let (app, _config) = build_app(load_test_config()).await;

    common::register_and_login(&app, "eve", "hunter2").await;

    #[derive(serde::Serialize)]
    struct ForgedClaims {
        sub: String,
    }

    let forged = encode(
        &Header::default(),
        &ForgedClaims {
            sub: "000000000000000000000000".to_string(),
        },
        &EncodingKey::from_secret(b"wrong-secret"),
    )
    .expect("forged token should encode");

    let response = app
        .clone()
        .oneshot(post_json("/admin", json!({ "accessToken": forged })))
        .await
        .expect("request should complete");

    assert_eq!(response.status(), StatusCode::OK);
    assert!(read_json(response).await["admin"].is_null());
}

/// Auth activity shows up in the Prometheus exposition.
#[tokio::test]
async fn integration_metrics_exposition() {
    let (app, _config) = build_app(load_test_config()).await;

    common::register_and_login(&app, "eve", "hunter2").await;

    let response = app
        .clone()
        .oneshot(get_request("/metrics"))
        .await
        .expect("request should complete");
    assert_eq!(response.status(), StatusCode::OK);

    let text = read_text(response).await;
    assert!(text.contains("auth_requests_total"));
    assert!(text.contains("operation=\"login\""));
    assert!(text.contains("outcome=\"success\""));
}
