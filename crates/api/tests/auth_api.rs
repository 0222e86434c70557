//! Integration tests for registration, login and the `me` endpoint.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json};
use projectdesk_db::repositories::UserRepo;
use serde_json::json;
use sqlx::PgPool;

const REGISTER: &str = "/api/v1/auth/register";
const LOGIN: &str = "/api/v1/auth/login";
const ME: &str = "/api/v1/auth/me";

async fn register(pool: &PgPool, email: &str, password: &str) -> serde_json::Value {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        REGISTER,
        json!({"name": "Alice", "email": email, "password": password}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Register
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_returns_token_and_user(pool: PgPool) {
    let json = register(&pool, "alice@test.com", "password123").await;

    assert!(json["access_token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(json["token_type"], "Bearer");
    assert_eq!(json["expires_in"], 3600);
    assert_eq!(json["user"]["email"], "alice@test.com");
    assert!(json["user"].get("password_hash").is_none());

    let stored = UserRepo::find_by_email(&pool, "alice@test.com")
        .await
        .unwrap()
        .expect("user should be stored");
    assert_ne!(stored.password_hash, "password123");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_normalizes_email(pool: PgPool) {
    let json = register(&pool, "  Alice@Test.COM ", "password123").await;
    assert_eq!(json["user"]["email"], "alice@test.com");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_duplicate_email_conflicts(pool: PgPool) {
    register(&pool, "alice@test.com", "password123").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        REGISTER,
        json!({"name": "Other", "email": "ALICE@test.com", "password": "password456"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(json["error"], "The email has already been taken.");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_validation_reports_fields(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        REGISTER,
        json!({"name": "  ", "email": "not-an-email", "password": "short"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["errors"]["name"].is_array());
    assert_eq!(
        json["errors"]["email"][0],
        "The email field must be a valid email address."
    );
    assert_eq!(
        json["errors"]["password"][0],
        "The password field must be at least 8 characters."
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_missing_fields_reports_required(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, REGISTER, json!({"password": "password123"})).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["errors"]["name"][0], "The name field is required.");
    assert_eq!(json["errors"]["email"][0], "The email field is required.");
    assert!(json["errors"].get("password").is_none());
    assert!(UserRepo::find_by_email(&pool, "").await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_with_missing_fields_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, LOGIN, json!({})).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "Invalid email or password");
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_with_correct_password(pool: PgPool) {
    register(&pool, "alice@test.com", "password123").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        LOGIN,
        json!({"email": "alice@test.com", "password": "password123"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert_eq!(json["user"]["name"], "Alice");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_wrong_password_and_unknown_email_look_the_same(pool: PgPool) {
    register(&pool, "alice@test.com", "password123").await;

    let app = common::build_test_app(pool.clone());
    let wrong = post_json(
        app,
        LOGIN,
        json!({"email": "alice@test.com", "password": "wrong-password"}),
    )
    .await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    let wrong = body_json(wrong).await;

    let app = common::build_test_app(pool);
    let unknown = post_json(
        app,
        LOGIN,
        json!({"email": "nobody@test.com", "password": "password123"}),
    )
    .await;
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    let unknown = body_json(unknown).await;

    assert_eq!(wrong, unknown);
    assert_eq!(wrong["error"], "Invalid email or password");
}

// ---------------------------------------------------------------------------
// Me
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_me_returns_current_user(pool: PgPool) {
    let json = register(&pool, "alice@test.com", "password123").await;
    let token = json["access_token"].as_str().unwrap();

    let app = common::build_test_app(pool);
    let response = get_auth(app, ME, token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let me = body_json(response).await;
    assert_eq!(me["id"], json["user"]["id"]);
    assert_eq!(me["email"], "alice@test.com");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_me_without_token_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, ME).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await["error"],
        "Missing Authorization header"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_token_from_another_secret_is_rejected(pool: PgPool) {
    let foreign = projectdesk_api::auth::jwt::JwtConfig {
        secret: "some-other-secret".to_string(),
        access_token_expiry_mins: 60,
    };
    let token = projectdesk_api::auth::jwt::issue_access_token(1, &foreign).unwrap();

    let app = common::build_test_app(pool);
    let response = get_auth(app, ME, &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "Invalid or expired token");
}
