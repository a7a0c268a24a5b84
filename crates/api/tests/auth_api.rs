//! HTTP-level integration tests for registration, login, token validation,
//! and logout revocation.

mod common;

use axum::http::StatusCode;
use common::{assert_unauthorized, body_json, get_auth, post_auth, post_json};
use sqlx::PgPool;

use dealdash_db::repositories::UserRepo;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Register a user via the API and return the auth response JSON.
async fn register_user(app: axum::Router, name: &str, email: &str, phone: &str) -> serde_json::Value {
    let body = serde_json::json!({
        "name": name,
        "email": email,
        "phone": phone,
        "password": "test_password_123!",
    });
    let response = post_json(app, "/api/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Registration returns 201 with an access token and the user, sans password.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_success(pool: PgPool) {
    let app = common::build_test_app(pool);

    let json = register_user(app, "Alice", "alice@test.com", "+15550001").await;

    assert!(json["access_token"].is_string());
    assert!(json["expires_in"].is_number());
    assert_eq!(json["user"]["name"], "Alice");
    assert_eq!(json["user"]["email"], "alice@test.com");
    assert!(
        json["user"].get("password_hash").is_none(),
        "password hash must never be serialized"
    );
}

/// Registering the same email twice returns 409.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_duplicate_email(pool: PgPool) {
    let app = common::build_test_app(pool);

    register_user(app.clone(), "Alice", "dup@test.com", "+15550001").await;

    let body = serde_json::json!({
        "name": "Imposter",
        "email": "dup@test.com",
        "phone": "+15550002",
        "password": "test_password_123!",
    });
    let response = post_json(app, "/api/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// Registering with a duplicate phone trips the unique constraint and
/// returns 409.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_duplicate_phone(pool: PgPool) {
    let app = common::build_test_app(pool);

    register_user(app.clone(), "Alice", "a@test.com", "+15550001").await;

    let body = serde_json::json!({
        "name": "Bob",
        "email": "b@test.com",
        "phone": "+15550001",
        "password": "test_password_123!",
    });
    let response = post_json(app, "/api/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// Invalid registration input returns 400 with field-level errors.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_validation_errors(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "name": "",
        "email": "not-an-email",
        "phone": "+15550001",
        "password": "short",
    });
    let response = post_json(app, "/api/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["errors"]["name"].is_array());
    assert!(json["errors"]["email"].is_array());
    assert!(json["errors"]["password"].is_array());
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// Successful login returns 200 with an access token and user info.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_success(pool: PgPool) {
    let app = common::build_test_app(pool);

    register_user(app.clone(), "Alice", "alice@test.com", "+15550001").await;

    let body = serde_json::json!({ "email": "alice@test.com", "password": "test_password_123!" });
    let response = post_json(app, "/api/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert_eq!(json["user"]["email"], "alice@test.com");
}

/// Login with a wrong password returns 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    let app = common::build_test_app(pool);

    register_user(app.clone(), "Alice", "alice@test.com", "+15550001").await;

    let body = serde_json::json!({ "email": "alice@test.com", "password": "incorrect" });
    let response = post_json(app, "/api/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Login with an unknown email returns the same 401 as a wrong password.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_unknown_email(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "ghost@test.com", "password": "whatever" });
    let response = post_json(app, "/api/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Token validation on protected routes
// ---------------------------------------------------------------------------

/// A freshly issued token grants access to a protected route.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_fresh_token_grants_access(pool: PgPool) {
    let app = common::build_test_app(pool);

    let json = register_user(app.clone(), "Alice", "alice@test.com", "+15550001").await;
    let token = json["access_token"].as_str().unwrap();

    let response = get_auth(app, "/api/v1/notifications", token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// A request without a token is rejected with the generic 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_missing_token_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = common::get(app, "/api/v1/notifications").await;
    assert_unauthorized(response).await;
}

/// A token with a single flipped signature byte is rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_tampered_token_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    let json = register_user(app.clone(), "Alice", "alice@test.com", "+15550001").await;
    let token = json["access_token"].as_str().unwrap();

    let mut tampered = token.to_string();
    let last = tampered.pop().unwrap();
    tampered.push(if last == 'A' { 'B' } else { 'A' });

    let response = get_auth(app, "/api/v1/notifications", &tampered).await;
    assert_unauthorized(response).await;
}

/// Garbage in the Authorization header is rejected, not a 500.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_garbage_token_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/notifications", "not.a.jwt").await;
    assert_unauthorized(response).await;
}

/// A token whose subject has been soft-deleted no longer authenticates.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_deleted_user_token_rejected(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let json = register_user(app.clone(), "Alice", "alice@test.com", "+15550001").await;
    let token = json["access_token"].as_str().unwrap();
    let user_id = json["user"]["id"].as_i64().unwrap();

    UserRepo::soft_delete(&pool, user_id)
        .await
        .expect("soft delete should succeed");

    let response = get_auth(app, "/api/v1/notifications", token).await;
    assert_unauthorized(response).await;
}

// ---------------------------------------------------------------------------
// Logout and revocation
// ---------------------------------------------------------------------------

/// Logout revokes the token: the same token fails on the next request.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_logout_revokes_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let json = register_user(app.clone(), "Alice", "alice@test.com", "+15550001").await;
    let token = json["access_token"].as_str().unwrap();

    let response = post_auth(app.clone(), "/api/auth/logout", token).await;
    assert_eq!(response.status(), StatusCode::OK);

    // The signature still verifies, but the jti is now in the revocation set.
    let response = get_auth(app, "/api/v1/notifications", token).await;
    assert_unauthorized(response).await;
}

/// A second logout with the same token is a 401, not a 500: the revoked
/// token no longer authenticates the request at all.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_double_logout_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);

    let json = register_user(app.clone(), "Alice", "alice@test.com", "+15550001").await;
    let token = json["access_token"].as_str().unwrap();

    let response = post_auth(app.clone(), "/api/auth/logout", token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_auth(app, "/api/auth/logout", token).await;
    assert_unauthorized(response).await;
}

/// Revoking one user's token leaves another user's session untouched.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_logout_is_scoped_to_one_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let alice = register_user(app.clone(), "Alice", "alice@test.com", "+15550001").await;
    let bob = register_user(app.clone(), "Bob", "bob@test.com", "+15550002").await;
    let alice_token = alice["access_token"].as_str().unwrap();
    let bob_token = bob["access_token"].as_str().unwrap();

    let response = post_auth(app.clone(), "/api/auth/logout", alice_token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(app.clone(), "/api/v1/notifications", bob_token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(app, "/api/v1/notifications", alice_token).await;
    assert_unauthorized(response).await;
}

/// Two logins produce independent tokens; logging out one leaves the other
/// valid for the same user.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_second_login_survives_first_logout(pool: PgPool) {
    let app = common::build_test_app(pool);

    register_user(app.clone(), "Alice", "alice@test.com", "+15550001").await;

    let body = serde_json::json!({ "email": "alice@test.com", "password": "test_password_123!" });
    let first = body_json(post_json(app.clone(), "/api/auth/login", body.clone()).await).await;
    let second = body_json(post_json(app.clone(), "/api/auth/login", body).await).await;

    let first_token = first["access_token"].as_str().unwrap();
    let second_token = second["access_token"].as_str().unwrap();
    assert_ne!(first_token, second_token, "each login issues a fresh jti");

    let response = post_auth(app.clone(), "/api/auth/logout", first_token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(app, "/api/v1/notifications", second_token).await;
    assert_eq!(response.status(), StatusCode::OK);
}
