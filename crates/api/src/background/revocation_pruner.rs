//! Periodic pruning of expired token-revocation records.
//!
//! A revocation record only matters while its token could still pass
//! signature and expiry validation. Once the token's `exp` has passed, the
//! record is dead weight and this job deletes it, keeping the revocation
//! table bounded by the number of logouts per token lifetime.

use std::time::Duration;

use dealdash_db::repositories::RevokedTokenRepo;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

/// How often the prune job runs.
const PRUNE_INTERVAL: Duration = Duration::from_secs(3600); // 1 hour

/// Run the revocation prune loop.
///
/// Deletes revocation rows whose `expires_at` is in the past. Runs until
/// `cancel` is triggered.
pub async fn run(pool: PgPool, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = PRUNE_INTERVAL.as_secs(),
        "Revocation pruner started"
    );

    let mut interval = tokio::time::interval(PRUNE_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Revocation pruner stopping");
                break;
            }
            _ = interval.tick() => {
                match RevokedTokenRepo::prune_expired(&pool).await {
                    Ok(deleted) => {
                        if deleted > 0 {
                            tracing::info!(deleted, "Revocation pruner: purged expired records");
                        } else {
                            tracing::debug!("Revocation pruner: no records to purge");
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Revocation pruner: prune failed");
                    }
                }
            }
        }
    }
}
