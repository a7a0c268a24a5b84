//! Handlers for the `/admin/users` resource and the device-token endpoint.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use dealdash_core::error::CoreError;
use dealdash_core::types::DbId;
use dealdash_db::models::user::{CreateUser, UpdateUser, UserResponse};
use dealdash_db::repositories::UserRepo;
use serde::Deserialize;
use validator::Validate;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /admin/users`. The plaintext password is hashed
/// before it reaches the repository.
#[derive(Debug, Deserialize, Validate)]
pub struct AdminCreateUser {
    #[validate(length(min = 1, max = 255, message = "name must not be empty"))]
    pub name: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, max = 32, message = "phone must not be empty"))]
    pub phone: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    pub avatar: Option<String>,
}

/// Request body for `PUT /v1/device-token`.
#[derive(Debug, Deserialize, Validate)]
pub struct DeviceTokenRequest {
    #[validate(length(min = 1, message = "fcm_token must not be empty"))]
    pub fcm_token: String,
}

// ---------------------------------------------------------------------------
// Admin CRUD
// ---------------------------------------------------------------------------

/// GET /api/admin/users -- all users, soft-deleted included.
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list_all(&state.pool).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /api/admin/users/trashed -- only soft-deleted users.
pub async fn list_trashed(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list_trashed(&state.pool).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// POST /api/admin/users
pub async fn create(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(input): Json<AdminCreateUser>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    input.validate()?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            name: input.name,
            email: input.email,
            phone: input.phone,
            password_hash,
            avatar: input.avatar,
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /api/admin/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(user.into()))
}

/// PUT /api/admin/users/{id}
pub async fn update(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<UserResponse>> {
    input.validate()?;
    let user = UserRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(user.into()))
}

/// DELETE /api/admin/users/{id} -- soft delete.
pub async fn delete(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if UserRepo::soft_delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "User", id }))
    }
}

/// POST /api/admin/users/{id}/restore
pub async fn restore(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if UserRepo::restore(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "User", id }))
    }
}

/// DELETE /api/admin/users/{id}/force-delete -- permanent removal.
pub async fn force_delete(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if UserRepo::force_delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "User", id }))
    }
}

// ---------------------------------------------------------------------------
// Device token
// ---------------------------------------------------------------------------

/// PUT /api/v1/device-token -- register or refresh the caller's FCM token.
pub async fn update_device_token(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<DeviceTokenRequest>,
) -> AppResult<StatusCode> {
    input.validate()?;
    UserRepo::set_fcm_token(&state.pool, auth_user.user_id, &input.fcm_token).await?;
    Ok(StatusCode::NO_CONTENT)
}
