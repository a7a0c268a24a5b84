//! User entity model and DTOs.

use dealdash_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub avatar: Option<String>,
    pub fcm_token: Option<String>,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub avatar: Option<String>,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            avatar: user.avatar,
            deleted_at: user.deleted_at,
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a new user. `password_hash` is already Argon2id-hashed.
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub avatar: Option<String>,
}

/// DTO for updating an existing user. Only non-`None` fields are applied.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateUser {
    #[validate(length(min = 1, max = 255, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 32, message = "phone must not be empty"))]
    pub phone: Option<String>,
    pub avatar: Option<String>,
}

/// A push-notification recipient: an active user with a registered FCM token.
#[derive(Debug, Clone, FromRow)]
pub struct PushTarget {
    pub id: DbId,
    pub fcm_token: String,
}
