//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use dealdash_core::error::CoreError;
use dealdash_core::types::DbId;
use dealdash_db::repositories::{RevokedTokenRepo, UserRepo};

use crate::auth::jwt::{validate_token, Claims};
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the `Authorization` header.
///
/// Extraction runs the full authentication pipeline: header parse, signature
/// and time-window validation, active-user lookup, and revocation check. Any
/// failure along the way yields a 401 with a single generic message so
/// callers cannot distinguish a revoked token from a forged one.
///
/// Use this as an extractor parameter in any handler that requires authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    /// The decoded token claims.
    pub claims: Claims,
}

/// The one 401 every authentication failure maps to. Specific causes are
/// logged server-side, never surfaced to the caller.
fn unauthorized() -> AppError {
    AppError::Core(CoreError::Unauthorized("Authentication failed".into()))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                tracing::debug!("missing Authorization header");
                unauthorized()
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            tracing::debug!("Authorization header is not a Bearer token");
            unauthorized()
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|err| {
            tracing::debug!(error = %err, "token validation failed");
            unauthorized()
        })?;

        // The subject must still be an active (non-deleted) account.
        let user = UserRepo::find_active_by_id(&state.pool, claims.sub)
            .await
            .map_err(|err| {
                tracing::error!(error = %err, "user lookup failed during authentication");
                unauthorized()
            })?;
        if user.is_none() {
            tracing::debug!(user_id = claims.sub, "token subject is not an active user");
            return Err(unauthorized());
        }

        // Revocation is checked last: a logged-out token stays dead for the
        // rest of its lifetime even though its signature still verifies.
        let revoked = RevokedTokenRepo::is_revoked(&state.pool, &claims.jti)
            .await
            .map_err(|err| {
                tracing::error!(error = %err, "revocation lookup failed during authentication");
                unauthorized()
            })?;
        if revoked {
            tracing::debug!(jti = %claims.jti, "token has been revoked");
            return Err(unauthorized());
        }

        Ok(AuthUser {
            user_id: claims.sub,
            claims,
        })
    }
}
