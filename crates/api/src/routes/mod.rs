pub mod admin;
pub mod auth;
pub mod health;
pub mod mobile;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                       register (public)
/// /auth/login                          login (public)
/// /auth/logout                         logout (requires auth)
///
/// /admin/users                         list, create
/// /admin/users/trashed                 soft-deleted users
/// /admin/users/{id}                    get, update, delete (soft)
/// /admin/users/{id}/restore            restore (POST)
/// /admin/users/{id}/force-delete       permanent delete (DELETE)
/// ...same shape for /admin/categories, /admin/stores, /admin/offers
///
/// /v1/nearby-stores                    nearby store search (public)
/// /v1/nearby-offers                    nearby offer search (public)
/// /v1/stores                           active stores (public)
/// /v1/stores/{id}                      active store detail (public)
/// /v1/stores/{id}/favorite             favorite toggle (requires auth)
/// /v1/categories                       active categories (public)
/// /v1/categories/{id}                  active category detail (public)
/// /v1/notifications                    caller's feed (requires auth)
/// /v1/notifications/{id}/read          mark read (requires auth)
/// /v1/device-token                     register FCM token (requires auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
        .nest("/v1", mobile::router())
}
