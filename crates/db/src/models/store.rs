//! Store entity model and DTOs.

use dealdash_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A store row from the `stores` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Store {
    pub id: DbId,
    pub name: String,
    pub category_id: DbId,
    pub image: Option<String>,
    pub address: String,
    pub about: String,
    pub phone: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An active store joined with its category name and favorites count,
/// as served on the mobile listing endpoints.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StoreWithStats {
    pub id: DbId,
    pub name: String,
    pub category: String,
    pub image: Option<String>,
    pub address: String,
    pub about: String,
    pub phone: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub favorites_count: i64,
}

/// A nearby-search result row: store fields plus the computed great-circle
/// distance from the caller, in kilometers.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NearbyStore {
    pub id: DbId,
    pub name: String,
    pub category: String,
    pub image: Option<String>,
    pub address: String,
    pub about: String,
    pub phone: String,
    pub latitude: f64,
    pub longitude: f64,
    pub favorites_count: i64,
    pub distance: f64,
}

/// DTO for creating a new store.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateStore {
    #[validate(length(min = 1, max = 255, message = "name must not be empty"))]
    pub name: String,
    pub category_id: DbId,
    pub image: Option<String>,
    #[validate(length(min = 1, message = "address must not be empty"))]
    pub address: String,
    #[validate(length(min = 1, message = "about must not be empty"))]
    pub about: String,
    #[validate(length(min = 1, max = 32, message = "phone must not be empty"))]
    pub phone: String,
    #[validate(range(min = -90.0, max = 90.0, message = "latitude must be between -90 and 90"))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0, message = "longitude must be between -180 and 180"))]
    pub longitude: Option<f64>,
}

/// DTO for updating an existing store. Only non-`None` fields are applied.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateStore {
    #[validate(length(min = 1, max = 255, message = "name must not be empty"))]
    pub name: Option<String>,
    pub category_id: Option<DbId>,
    pub image: Option<String>,
    #[validate(length(min = 1, message = "address must not be empty"))]
    pub address: Option<String>,
    #[validate(length(min = 1, message = "about must not be empty"))]
    pub about: Option<String>,
    #[validate(length(min = 1, max = 32, message = "phone must not be empty"))]
    pub phone: Option<String>,
    #[validate(range(min = -90.0, max = 90.0, message = "latitude must be between -90 and 90"))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0, message = "longitude must be between -180 and 180"))]
    pub longitude: Option<f64>,
}
