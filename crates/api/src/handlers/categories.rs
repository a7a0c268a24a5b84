//! Handlers for the `/admin/categories` resource and the public listings.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use dealdash_core::error::CoreError;
use dealdash_core::types::DbId;
use dealdash_db::models::category::{Category, CreateCategory, UpdateCategory};
use dealdash_db::repositories::CategoryRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Category",
        id,
    })
}

// ---------------------------------------------------------------------------
// Admin CRUD
// ---------------------------------------------------------------------------

/// GET /api/admin/categories -- all categories, soft-deleted included.
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<Vec<Category>>> {
    Ok(Json(CategoryRepo::list_all(&state.pool).await?))
}

/// GET /api/admin/categories/trashed
pub async fn list_trashed(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<Vec<Category>>> {
    Ok(Json(CategoryRepo::list_trashed(&state.pool).await?))
}

/// POST /api/admin/categories
pub async fn create(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(input): Json<CreateCategory>,
) -> AppResult<(StatusCode, Json<Category>)> {
    input.validate()?;
    let category = CategoryRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// GET /api/admin/categories/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Category>> {
    let category = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(category))
}

/// PUT /api/admin/categories/{id}
pub async fn update(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<Json<Category>> {
    input.validate()?;
    let category = CategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(category))
}

/// DELETE /api/admin/categories/{id} -- soft delete.
pub async fn delete(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if CategoryRepo::soft_delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// POST /api/admin/categories/{id}/restore
pub async fn restore(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if CategoryRepo::restore(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// DELETE /api/admin/categories/{id}/force-delete -- permanent removal.
pub async fn force_delete(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if CategoryRepo::force_delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

// ---------------------------------------------------------------------------
// Public listings
// ---------------------------------------------------------------------------

/// GET /api/v1/categories -- active categories only.
pub async fn list_active(State(state): State<AppState>) -> AppResult<Json<Vec<Category>>> {
    Ok(Json(CategoryRepo::list_active(&state.pool).await?))
}

/// GET /api/v1/categories/{id} -- a single active category.
pub async fn get_active(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Category>> {
    let category = CategoryRepo::find_active_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(category))
}
