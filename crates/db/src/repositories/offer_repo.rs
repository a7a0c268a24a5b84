//! Repository for the `offers` table and offer nearby search.

use dealdash_core::geo::EARTH_RADIUS_KM;
use dealdash_core::types::DbId;
use sqlx::PgPool;

use crate::models::offer::{CreateOffer, NearbyOffer, Offer, UpdateOffer};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, store_id, image, address, about, latitude, longitude, \
                        start_date, end_date, deleted_at, created_at, updated_at";

/// Provides CRUD and nearby-search operations for offers.
pub struct OfferRepo;

impl OfferRepo {
    /// Insert a new offer, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateOffer) -> Result<Offer, sqlx::Error> {
        let query = format!(
            "INSERT INTO offers (name, store_id, image, address, about, latitude, longitude, start_date, end_date)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Offer>(&query)
            .bind(&input.name)
            .bind(input.store_id)
            .bind(&input.image)
            .bind(&input.address)
            .bind(&input.about)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_one(pool)
            .await
    }

    /// Find an offer by id regardless of soft-delete state.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Offer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM offers WHERE id = $1");
        sqlx::query_as::<_, Offer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all offers, soft-deleted included, newest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Offer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM offers ORDER BY created_at DESC");
        sqlx::query_as::<_, Offer>(&query).fetch_all(pool).await
    }

    /// List only soft-deleted offers, newest first.
    pub async fn list_trashed(pool: &PgPool) -> Result<Vec<Offer>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM offers WHERE deleted_at IS NOT NULL ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Offer>(&query).fetch_all(pool).await
    }

    /// Update an offer. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateOffer,
    ) -> Result<Option<Offer>, sqlx::Error> {
        let query = format!(
            "UPDATE offers SET
                name = COALESCE($2, name),
                store_id = COALESCE($3, store_id),
                image = COALESCE($4, image),
                address = COALESCE($5, address),
                about = COALESCE($6, about),
                latitude = COALESCE($7, latitude),
                longitude = COALESCE($8, longitude),
                start_date = COALESCE($9, start_date),
                end_date = COALESCE($10, end_date),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Offer>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.store_id)
            .bind(&input.image)
            .bind(&input.address)
            .bind(&input.about)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete: set `deleted_at`. Returns `true` if a live row was marked.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE offers SET deleted_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Restore: clear `deleted_at`. Returns `true` if a trashed row was restored.
    pub async fn restore(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE offers SET deleted_at = NULL, updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NOT NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete a soft-deleted offer row. Returns `true` on removal.
    pub async fn force_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM offers WHERE id = $1 AND deleted_at IS NOT NULL")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Active offers within `radius_km` of the caller, nearest first.
    ///
    /// Same distance expression as [`StoreRepo::find_nearby`], carrying the
    /// offer's own fields only (no joins or aggregates).
    ///
    /// [`StoreRepo::find_nearby`]: crate::repositories::StoreRepo::find_nearby
    pub async fn find_nearby(
        pool: &PgPool,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
    ) -> Result<Vec<NearbyOffer>, sqlx::Error> {
        let query = format!(
            "SELECT * FROM (
                SELECT o.id, o.name, o.store_id, o.image, o.address, o.about,
                       o.latitude, o.longitude, o.start_date, o.end_date,
                       {EARTH_RADIUS_KM} * acos(LEAST(1.0, GREATEST(-1.0,
                           cos(radians($1)) * cos(radians(o.latitude))
                           * cos(radians(o.longitude) - radians($2))
                           + sin(radians($1)) * sin(radians(o.latitude))))) AS distance
                FROM offers o
                WHERE o.deleted_at IS NULL
                  AND o.latitude IS NOT NULL
                  AND o.longitude IS NOT NULL
            ) nearby
            WHERE distance <= $3
            ORDER BY distance ASC"
        );
        sqlx::query_as::<_, NearbyOffer>(&query)
            .bind(latitude)
            .bind(longitude)
            .bind(radius_km)
            .fetch_all(pool)
            .await
    }
}
