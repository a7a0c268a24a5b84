//! Repository for the `offer_notifications` table.

use dealdash_core::types::DbId;
use sqlx::PgPool;

use crate::models::notification::{NotificationWithOffer, OfferNotification};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, offer_id, user_id, is_read, created_at, updated_at";

/// Provides fan-out insert and per-user read operations for offer
/// notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Insert one notification row for a user about an offer.
    pub async fn create(
        pool: &PgPool,
        offer_id: DbId,
        user_id: DbId,
    ) -> Result<OfferNotification, sqlx::Error> {
        let query = format!(
            "INSERT INTO offer_notifications (offer_id, user_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OfferNotification>(&query)
            .bind(offer_id)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// All notifications for a user, newest first, joined with the offer
    /// they announce.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<NotificationWithOffer>, sqlx::Error> {
        sqlx::query_as::<_, NotificationWithOffer>(
            "SELECT n.id, n.offer_id, n.is_read, n.created_at,
                    o.name AS offer_name, o.image AS offer_image, o.about AS offer_about,
                    o.start_date, o.end_date
             FROM offer_notifications n
             JOIN offers o ON o.id = n.offer_id
             WHERE n.user_id = $1
             ORDER BY n.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Mark a notification as read, scoped to its owner.
    ///
    /// Returns `false` when the notification does not exist or belongs to a
    /// different user.
    pub async fn mark_read(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE offer_notifications SET is_read = TRUE, updated_at = NOW()
             WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
