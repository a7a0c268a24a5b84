use std::sync::Arc;

use crate::config::ServerConfig;
use crate::notifications::fcm::FcmClient;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: dealdash_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Push notification client. `None` when FCM is not configured; the
    /// notification fan-out still writes rows, it just skips delivery.
    pub fcm: Option<Arc<FcmClient>>,
}
