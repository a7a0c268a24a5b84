//! Repository for the `revoked_tokens` table.
//!
//! Revocation is keyed by the token's `jti` claim. Each record carries the
//! token's own expiry so that pruning can drop records exactly when the
//! token would stop validating anyway.

use dealdash_core::types::Timestamp;
use sqlx::PgPool;

/// Durable set of revoked token identifiers.
pub struct RevokedTokenRepo;

impl RevokedTokenRepo {
    /// Record a token as revoked. Idempotent: revoking the same `jti` twice
    /// keeps the original record and succeeds.
    pub async fn revoke(
        pool: &PgPool,
        jti: &str,
        expires_at: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO revoked_tokens (jti, expires_at) VALUES ($1, $2)
             ON CONFLICT (jti) DO NOTHING",
        )
        .bind(jti)
        .bind(expires_at)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Indexed existence check, consulted on every authenticated request.
    pub async fn is_revoked(pool: &PgPool, jti: &str) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM revoked_tokens WHERE jti = $1)")
                .bind(jti)
                .fetch_one(pool)
                .await?;
        Ok(exists)
    }

    /// Delete records whose token has expired. Returns the number of rows
    /// removed.
    pub async fn prune_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM revoked_tokens WHERE expires_at < NOW()")
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
