//! Handlers for the `/admin/stores` resource, the public store listings,
//! nearby search, and the favorite toggle.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use dealdash_core::error::CoreError;
use dealdash_core::types::DbId;
use dealdash_db::models::store::{CreateStore, NearbyStore, Store, StoreWithStats, UpdateStore};
use dealdash_db::repositories::StoreRepo;
use serde::Serialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::NearbyParams;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Store",
        id,
    })
}

// ---------------------------------------------------------------------------
// Admin CRUD
// ---------------------------------------------------------------------------

/// GET /api/admin/stores -- all stores, soft-deleted included.
pub async fn list(State(state): State<AppState>, _auth: AuthUser) -> AppResult<Json<Vec<Store>>> {
    Ok(Json(StoreRepo::list_all(&state.pool).await?))
}

/// GET /api/admin/stores/trashed
pub async fn list_trashed(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<Vec<Store>>> {
    Ok(Json(StoreRepo::list_trashed(&state.pool).await?))
}

/// POST /api/admin/stores
pub async fn create(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(input): Json<CreateStore>,
) -> AppResult<(StatusCode, Json<Store>)> {
    input.validate()?;
    let store = StoreRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(store)))
}

/// GET /api/admin/stores/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Store>> {
    let store = StoreRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(store))
}

/// PUT /api/admin/stores/{id}
pub async fn update(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStore>,
) -> AppResult<Json<Store>> {
    input.validate()?;
    let store = StoreRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(store))
}

/// DELETE /api/admin/stores/{id} -- soft delete.
pub async fn delete(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if StoreRepo::soft_delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// POST /api/admin/stores/{id}/restore
pub async fn restore(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if StoreRepo::restore(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// DELETE /api/admin/stores/{id}/force-delete -- permanent removal.
pub async fn force_delete(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if StoreRepo::force_delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

// ---------------------------------------------------------------------------
// Public listings and nearby search
// ---------------------------------------------------------------------------

/// GET /api/v1/stores -- active stores, most favorited first.
pub async fn list_active(State(state): State<AppState>) -> AppResult<Json<Vec<StoreWithStats>>> {
    Ok(Json(StoreRepo::list_active_with_stats(&state.pool).await?))
}

/// GET /api/v1/stores/{id} -- a single active store with stats.
pub async fn get_active(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<StoreWithStats>> {
    let store = StoreRepo::find_active_with_stats(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(store))
}

/// GET /api/v1/nearby-stores?latitude=&longitude=&radius=
///
/// Active stores within the radius (default 10 km), nearest first.
pub async fn nearby(
    State(state): State<AppState>,
    Query(params): Query<NearbyParams>,
) -> AppResult<Json<Vec<NearbyStore>>> {
    let query = params.into_query()?;
    let stores = StoreRepo::find_nearby(
        &state.pool,
        query.latitude,
        query.longitude,
        query.radius_km,
    )
    .await?;
    Ok(Json(stores))
}

// ---------------------------------------------------------------------------
// Favorites
// ---------------------------------------------------------------------------

/// Response body for the favorite toggle.
#[derive(Debug, Serialize)]
pub struct FavoriteResponse {
    /// Whether the caller now has the store favorited.
    pub favorited: bool,
    /// The store's favorite count after the toggle.
    pub favorites_count: i64,
}

/// POST /api/v1/stores/{id}/favorite -- toggle the caller's favorite.
///
/// 201 when the store was favorited, 200 when it was unfavorited.
pub async fn toggle_favorite(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<(StatusCode, Json<FavoriteResponse>)> {
    // The store must exist and be active before touching the join table.
    StoreRepo::find_active_with_stats(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let currently_favorited = StoreRepo::is_favorited(&state.pool, auth_user.user_id, id).await?;

    let (status, favorited) = if currently_favorited {
        StoreRepo::remove_favorite(&state.pool, auth_user.user_id, id).await?;
        (StatusCode::OK, false)
    } else {
        StoreRepo::add_favorite(&state.pool, auth_user.user_id, id).await?;
        (StatusCode::CREATED, true)
    };

    let favorites_count = StoreRepo::favorites_count(&state.pool, id).await?;

    Ok((
        status,
        Json(FavoriteResponse {
            favorited,
            favorites_count,
        }),
    ))
}
