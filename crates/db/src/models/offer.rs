//! Offer entity model and DTOs.

use dealdash_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// An offer row from the `offers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Offer {
    pub id: DbId,
    pub name: String,
    pub store_id: DbId,
    pub image: Option<String>,
    pub address: String,
    pub about: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A nearby-search result row: offer fields plus the computed great-circle
/// distance from the caller, in kilometers.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NearbyOffer {
    pub id: DbId,
    pub name: String,
    pub store_id: DbId,
    pub image: Option<String>,
    pub address: String,
    pub about: String,
    pub latitude: f64,
    pub longitude: f64,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub distance: f64,
}

/// DTO for creating a new offer.
///
/// The start/end date ordering is cross-field and checked by the handler.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateOffer {
    #[validate(length(min = 1, max = 255, message = "name must not be empty"))]
    pub name: String,
    pub store_id: DbId,
    pub image: Option<String>,
    #[validate(length(min = 1, message = "address must not be empty"))]
    pub address: String,
    #[validate(length(min = 1, message = "about must not be empty"))]
    pub about: String,
    #[validate(range(min = -90.0, max = 90.0, message = "latitude must be between -90 and 90"))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0, message = "longitude must be between -180 and 180"))]
    pub longitude: Option<f64>,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
}

/// DTO for updating an existing offer. Only non-`None` fields are applied.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateOffer {
    #[validate(length(min = 1, max = 255, message = "name must not be empty"))]
    pub name: Option<String>,
    pub store_id: Option<DbId>,
    pub image: Option<String>,
    #[validate(length(min = 1, message = "address must not be empty"))]
    pub address: Option<String>,
    #[validate(length(min = 1, message = "about must not be empty"))]
    pub about: Option<String>,
    #[validate(range(min = -90.0, max = 90.0, message = "latitude must be between -90 and 90"))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0, message = "longitude must be between -180 and 180"))]
    pub longitude: Option<f64>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
}
