//! Repository for the `stores` table, store favorites, and store nearby search.

use dealdash_core::geo::EARTH_RADIUS_KM;
use dealdash_core::types::DbId;
use sqlx::PgPool;

use crate::models::store::{CreateStore, NearbyStore, Store, StoreWithStats, UpdateStore};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, category_id, image, address, about, phone, \
                        latitude, longitude, deleted_at, created_at, updated_at";

/// Provides CRUD, favorites, and nearby-search operations for stores.
pub struct StoreRepo;

impl StoreRepo {
    /// Insert a new store, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateStore) -> Result<Store, sqlx::Error> {
        let query = format!(
            "INSERT INTO stores (name, category_id, image, address, about, phone, latitude, longitude)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Store>(&query)
            .bind(&input.name)
            .bind(input.category_id)
            .bind(&input.image)
            .bind(&input.address)
            .bind(&input.about)
            .bind(&input.phone)
            .bind(input.latitude)
            .bind(input.longitude)
            .fetch_one(pool)
            .await
    }

    /// Find a store by id regardless of soft-delete state.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Store>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stores WHERE id = $1");
        sqlx::query_as::<_, Store>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all stores, soft-deleted included, newest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Store>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stores ORDER BY created_at DESC");
        sqlx::query_as::<_, Store>(&query).fetch_all(pool).await
    }

    /// List only soft-deleted stores, newest first.
    pub async fn list_trashed(pool: &PgPool) -> Result<Vec<Store>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM stores WHERE deleted_at IS NOT NULL ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Store>(&query).fetch_all(pool).await
    }

    /// Update a store. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateStore,
    ) -> Result<Option<Store>, sqlx::Error> {
        let query = format!(
            "UPDATE stores SET
                name = COALESCE($2, name),
                category_id = COALESCE($3, category_id),
                image = COALESCE($4, image),
                address = COALESCE($5, address),
                about = COALESCE($6, about),
                phone = COALESCE($7, phone),
                latitude = COALESCE($8, latitude),
                longitude = COALESCE($9, longitude),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Store>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.category_id)
            .bind(&input.image)
            .bind(&input.address)
            .bind(&input.about)
            .bind(&input.phone)
            .bind(input.latitude)
            .bind(input.longitude)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete: set `deleted_at`. Returns `true` if a live row was marked.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE stores SET deleted_at = NOW(), updated_at = NOW()
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
            "UPDATE stores SET deleted_at = NULL, updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NOT NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete a soft-deleted store row. Returns `true` on removal.
    pub async fn force_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM stores WHERE id = $1 AND deleted_at IS NOT NULL")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Mobile listings
    // -----------------------------------------------------------------------

    /// Active stores with category name and favorites count, most favorited
    /// first.
    pub async fn list_active_with_stats(pool: &PgPool) -> Result<Vec<StoreWithStats>, sqlx::Error> {
        sqlx::query_as::<_, StoreWithStats>(
            "SELECT s.id, s.name, c.name AS category, s.image, s.address, s.about, s.phone,
                    s.latitude, s.longitude,
                    (SELECT COUNT(*) FROM store_favorites f WHERE f.store_id = s.id) AS favorites_count
             FROM stores s
             JOIN categories c ON c.id = s.category_id
             WHERE s.deleted_at IS NULL
             ORDER BY favorites_count DESC, s.id ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// A single active store with category name and favorites count.
    pub async fn find_active_with_stats(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<StoreWithStats>, sqlx::Error> {
        sqlx::query_as::<_, StoreWithStats>(
            "SELECT s.id, s.name, c.name AS category, s.image, s.address, s.about, s.phone,
                    s.latitude, s.longitude,
                    (SELECT COUNT(*) FROM store_favorites f WHERE f.store_id = s.id) AS favorites_count
             FROM stores s
             JOIN categories c ON c.id = s.category_id
             WHERE s.id = $1 AND s.deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    // -----------------------------------------------------------------------
    // Nearby search
    // -----------------------------------------------------------------------

    /// Active stores within `radius_km` of the caller, nearest first.
    ///
    /// Distance is the spherical law of cosines computed per row in SQL.
    /// The cosine argument is clamped to [-1, 1] so a store at the caller's
    /// exact coordinates yields distance 0 rather than an out-of-range
    /// `acos` input. Rows lacking coordinates are excluded by the WHERE
    /// clause before the distance is ever computed.
    pub async fn find_nearby(
        pool: &PgPool,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
    ) -> Result<Vec<NearbyStore>, sqlx::Error> {
        let query = format!(
            "SELECT * FROM (
                SELECT s.id, s.name, c.name AS category, s.image, s.address, s.about, s.phone,
                       s.latitude, s.longitude,
                       (SELECT COUNT(*) FROM store_favorites f WHERE f.store_id = s.id) AS favorites_count,
                       {EARTH_RADIUS_KM} * acos(LEAST(1.0, GREATEST(-1.0,
                           cos(radians($1)) * cos(radians(s.latitude))
                           * cos(radians(s.longitude) - radians($2))
                           + sin(radians($1)) * sin(radians(s.latitude))))) AS distance
                FROM stores s
                JOIN categories c ON c.id = s.category_id
                WHERE s.deleted_at IS NULL
                  AND s.latitude IS NOT NULL
                  AND s.longitude IS NOT NULL
            ) nearby
            WHERE distance <= $3
            ORDER BY distance ASC"
        );
        sqlx::query_as::<_, NearbyStore>(&query)
            .bind(latitude)
            .bind(longitude)
            .bind(radius_km)
            .fetch_all(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Favorites
    // -----------------------------------------------------------------------

    /// Whether the user currently has the store favorited.
    pub async fn is_favorited(
        pool: &PgPool,
        user_id: DbId,
        store_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM store_favorites WHERE user_id = $1 AND store_id = $2)",
        )
        .bind(user_id)
        .bind(store_id)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }

    /// Favorite a store for a user. Duplicate favorites are a no-op.
    pub async fn add_favorite(
        pool: &PgPool,
        user_id: DbId,
        store_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO store_favorites (user_id, store_id) VALUES ($1, $2)
             ON CONFLICT (user_id, store_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(store_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Remove a user's favorite. Missing rows are a no-op.
    pub async fn remove_favorite(
        pool: &PgPool,
        user_id: DbId,
        store_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM store_favorites WHERE user_id = $1 AND store_id = $2")
            .bind(user_id)
            .bind(store_id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Current favorites count for a store.
    pub async fn favorites_count(pool: &PgPool, store_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM store_favorites WHERE store_id = $1")
                .bind(store_id)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }
}
