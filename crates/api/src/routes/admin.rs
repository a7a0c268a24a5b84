//! Route definitions for the bearer-protected `/admin` surface.
//!
//! Every entity gets the same shape: list (soft-deleted included), create,
//! get, update, soft delete, plus `trashed`, `restore`, and `force-delete`.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{categories, offers, stores, users};
use crate::state::AppState;

/// Routes mounted at `/admin`.
pub fn router() -> Router<AppState> {
    let user_routes = Router::new()
        .route("/", get(users::list).post(users::create))
        .route("/trashed", get(users::list_trashed))
        .route(
            "/{id}",
            get(users::get_by_id)
                .put(users::update)
                .delete(users::delete),
        )
        .route("/{id}/restore", post(users::restore))
        .route("/{id}/force-delete", delete(users::force_delete));

    let category_routes = Router::new()
        .route("/", get(categories::list).post(categories::create))
        .route("/trashed", get(categories::list_trashed))
        .route(
            "/{id}",
            get(categories::get_by_id)
                .put(categories::update)
                .delete(categories::delete),
        )
        .route("/{id}/restore", post(categories::restore))
        .route("/{id}/force-delete", delete(categories::force_delete));

    let store_routes = Router::new()
        .route("/", get(stores::list).post(stores::create))
        .route("/trashed", get(stores::list_trashed))
        .route(
            "/{id}",
            get(stores::get_by_id)
                .put(stores::update)
                .delete(stores::delete),
        )
        .route("/{id}/restore", post(stores::restore))
        .route("/{id}/force-delete", delete(stores::force_delete));

    let offer_routes = Router::new()
        .route("/", get(offers::list).post(offers::create))
        .route("/trashed", get(offers::list_trashed))
        .route(
            "/{id}",
            get(offers::get_by_id)
                .put(offers::update)
                .delete(offers::delete),
        )
        .route("/{id}/restore", post(offers::restore))
        .route("/{id}/force-delete", delete(offers::force_delete));

    Router::new()
        .nest("/users", user_routes)
        .nest("/categories", category_routes)
        .nest("/stores", store_routes)
        .nest("/offers", offer_routes)
}
