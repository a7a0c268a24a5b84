//! Route definitions for the mobile `/v1` surface.
//!
//! Listings and nearby search are public; favorites, notifications, and
//! device-token registration require a bearer token (enforced by the
//! `AuthUser` extractor on the handlers).

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{categories, notifications, offers, stores, users};
use crate::state::AppState;

/// Routes mounted at `/v1`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/nearby-stores", get(stores::nearby))
        .route("/nearby-offers", get(offers::nearby))
        .route("/stores", get(stores::list_active))
        .route("/stores/{id}", get(stores::get_active))
        .route("/stores/{id}/favorite", post(stores::toggle_favorite))
        .route("/categories", get(categories::list_active))
        .route("/categories/{id}", get(categories::get_active))
        .route("/notifications", get(notifications::list))
        .route("/notifications/{id}/read", post(notifications::mark_read))
        .route("/device-token", put(users::update_device_token))
}
