//! Offer notification model.

use dealdash_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// An offer notification row from the `offer_notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OfferNotification {
    pub id: DbId,
    pub offer_id: DbId,
    pub user_id: DbId,
    pub is_read: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A notification joined with the fields of the offer it announces,
/// as served on the mobile notification feed.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NotificationWithOffer {
    pub id: DbId,
    pub offer_id: DbId,
    pub is_read: bool,
    pub created_at: Timestamp,
    pub offer_name: String,
    pub offer_image: Option<String>,
    pub offer_about: String,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
}
