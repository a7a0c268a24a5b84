//! Handlers for the `/admin/offers` resource and nearby offer search.
//!
//! Creating an offer fans out a notification row per push-registered user
//! before the response is sent; actual push delivery happens on a spawned
//! task so a slow or unreachable FCM endpoint never delays the request.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use dealdash_core::error::CoreError;
use dealdash_core::types::DbId;
use dealdash_db::models::offer::{CreateOffer, NearbyOffer, Offer, UpdateOffer};
use dealdash_db::models::user::PushTarget;
use dealdash_db::repositories::{NotificationRepo, OfferRepo, UserRepo};
use serde_json::json;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::notifications::fcm::FcmClient;
use crate::query::NearbyParams;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Offer",
        id,
    })
}

/// Cross-field rule the derive cannot express: an offer may not end before
/// it starts. On update, only enforced when the payload carries both dates.
fn check_offer_dates(
    start_date: Option<dealdash_core::types::Timestamp>,
    end_date: Option<dealdash_core::types::Timestamp>,
) -> Result<(), AppError> {
    if let (Some(start), Some(end)) = (start_date, end_date) {
        if end < start {
            let mut fields = std::collections::BTreeMap::new();
            fields.insert(
                "end_date".to_string(),
                vec!["end_date must not be before start_date".to_string()],
            );
            return Err(AppError::Validation(fields));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Admin CRUD
// ---------------------------------------------------------------------------

/// GET /api/admin/offers -- all offers, soft-deleted included.
pub async fn list(State(state): State<AppState>, _auth: AuthUser) -> AppResult<Json<Vec<Offer>>> {
    Ok(Json(OfferRepo::list_all(&state.pool).await?))
}

/// GET /api/admin/offers/trashed
pub async fn list_trashed(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<Vec<Offer>>> {
    Ok(Json(OfferRepo::list_trashed(&state.pool).await?))
}

/// POST /api/admin/offers
///
/// Creates the offer, then inserts one notification row per user with a
/// registered device token and spawns best-effort push delivery.
pub async fn create(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(input): Json<CreateOffer>,
) -> AppResult<(StatusCode, Json<Offer>)> {
    input.validate()?;
    check_offer_dates(Some(input.start_date), Some(input.end_date))?;

    let offer = OfferRepo::create(&state.pool, &input).await?;

    let targets = UserRepo::list_push_targets(&state.pool).await?;

    // Fan-out rows are written synchronously: the feed must show the offer
    // even if no push is ever delivered.
    for target in &targets {
        NotificationRepo::create(&state.pool, offer.id, target.id).await?;
    }
    tracing::info!(
        offer_id = offer.id,
        recipients = targets.len(),
        "Offer notification fan-out complete"
    );

    if let Some(fcm) = state.fcm.clone() {
        tokio::spawn(deliver_pushes(fcm, offer.clone(), targets));
    }

    Ok((StatusCode::CREATED, Json(offer)))
}

/// GET /api/admin/offers/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Offer>> {
    let offer = OfferRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(offer))
}

/// PUT /api/admin/offers/{id}
pub async fn update(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateOffer>,
) -> AppResult<Json<Offer>> {
    input.validate()?;
    check_offer_dates(input.start_date, input.end_date)?;

    let offer = OfferRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(offer))
}

/// DELETE /api/admin/offers/{id} -- soft delete.
pub async fn delete(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if OfferRepo::soft_delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// POST /api/admin/offers/{id}/restore
pub async fn restore(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if OfferRepo::restore(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// DELETE /api/admin/offers/{id}/force-delete -- permanent removal.
pub async fn force_delete(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if OfferRepo::force_delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

// ---------------------------------------------------------------------------
// Nearby search
// ---------------------------------------------------------------------------

/// GET /api/v1/nearby-offers?latitude=&longitude=&radius=
///
/// Active offers within the radius (default 10 km), nearest first.
pub async fn nearby(
    State(state): State<AppState>,
    Query(params): Query<NearbyParams>,
) -> AppResult<Json<Vec<NearbyOffer>>> {
    let query = params.into_query()?;
    let offers = OfferRepo::find_nearby(
        &state.pool,
        query.latitude,
        query.longitude,
        query.radius_km,
    )
    .await?;
    Ok(Json(offers))
}

// ---------------------------------------------------------------------------
// Push delivery
// ---------------------------------------------------------------------------

/// Send one push per target. Failures are logged per recipient; a dead
/// device token must not stop the rest of the batch.
async fn deliver_pushes(fcm: Arc<FcmClient>, offer: Offer, targets: Vec<PushTarget>) {
    let data = json!({ "offer_id": offer.id.to_string() });

    for target in targets {
        if let Err(e) = fcm
            .send(&target.fcm_token, "New offer", &offer.name, &data)
            .await
        {
            tracing::warn!(
                user_id = target.id,
                offer_id = offer.id,
                error = %e,
                "Push delivery failed"
            );
        }
    }
}
