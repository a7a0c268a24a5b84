//! Integration tests for the nearby-search endpoints.
//!
//! Test stores are placed along a meridian from the origin, where one
//! degree of latitude is 111.195 km of arc, so each seeded row sits at a
//! known great-circle distance from the query point.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{body_json, get};
use sqlx::PgPool;

use dealdash_core::types::DbId;
use dealdash_db::models::category::CreateCategory;
use dealdash_db::models::offer::CreateOffer;
use dealdash_db::models::store::CreateStore;
use dealdash_db::repositories::{CategoryRepo, OfferRepo, StoreRepo};

/// Latitude degrees per kilometer of arc on a 6371 km sphere.
const DEG_PER_KM: f64 = 1.0 / 111.19493;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_category(pool: &PgPool) -> DbId {
    CategoryRepo::create(
        pool,
        &CreateCategory {
            name: "Food".into(),
            image: None,
        },
    )
    .await
    .expect("category creation should succeed")
    .id
}

async fn seed_store(pool: &PgPool, category_id: DbId, name: &str, coords: Option<(f64, f64)>) -> DbId {
    let (latitude, longitude) = match coords {
        Some((lat, lon)) => (Some(lat), Some(lon)),
        None => (None, None),
    };
    StoreRepo::create(
        pool,
        &CreateStore {
            name: name.into(),
            category_id,
            image: None,
            address: "1 Test St".into(),
            about: "A test store".into(),
            phone: "+15550000".into(),
            latitude,
            longitude,
        },
    )
    .await
    .expect("store creation should succeed")
    .id
}

async fn seed_offer(pool: &PgPool, store_id: DbId, name: &str, coords: Option<(f64, f64)>) {
    let (latitude, longitude) = match coords {
        Some((lat, lon)) => (Some(lat), Some(lon)),
        None => (None, None),
    };
    OfferRepo::create(
        pool,
        &CreateOffer {
            name: name.into(),
            store_id,
            image: None,
            address: "1 Test St".into(),
            about: "A test offer".into(),
            latitude,
            longitude,
            start_date: Utc::now(),
            end_date: Utc::now() + Duration::days(7),
        },
    )
    .await
    .expect("offer creation should succeed");
}

// ---------------------------------------------------------------------------
// Nearby stores
// ---------------------------------------------------------------------------

/// Stores at 1, 5, and 9 km all fall inside the default 10 km radius and
/// come back nearest first; a store at ~22 km is excluded.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_nearby_stores_ordered_by_distance(pool: PgPool) {
    let category_id = seed_category(&pool).await;
    seed_store(&pool, category_id, "five-km", Some((5.0 * DEG_PER_KM, 0.0))).await;
    seed_store(&pool, category_id, "one-km", Some((1.0 * DEG_PER_KM, 0.0))).await;
    seed_store(&pool, category_id, "nine-km", Some((9.0 * DEG_PER_KM, 0.0))).await;
    seed_store(&pool, category_id, "far-away", Some((22.0 * DEG_PER_KM, 0.0))).await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/nearby-stores?latitude=0&longitude=0").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let results = json.as_array().unwrap();
    assert_eq!(results.len(), 3, "the 22 km store must be excluded");

    assert_eq!(results[0]["name"], "one-km");
    assert_eq!(results[1]["name"], "five-km");
    assert_eq!(results[2]["name"], "nine-km");

    for (row, expected_km) in results.iter().zip([1.0, 5.0, 9.0]) {
        let distance = row["distance"].as_f64().unwrap();
        assert!(
            (distance - expected_km).abs() < 0.01,
            "expected ~{expected_km} km, got {distance}"
        );
    }
}

/// A store at the caller's exact coordinates reports distance 0, not an
/// out-of-domain `acos` failure.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_nearby_store_at_identical_coordinates(pool: PgPool) {
    let category_id = seed_category(&pool).await;
    seed_store(&pool, category_id, "here", Some((40.7128, -74.0060))).await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/nearby-stores?latitude=40.7128&longitude=-74.0060").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let results = json.as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert!(results[0]["distance"].as_f64().unwrap().abs() < 1e-6);
}

/// An explicit radius narrows the default.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_nearby_stores_custom_radius(pool: PgPool) {
    let category_id = seed_category(&pool).await;
    seed_store(&pool, category_id, "one-km", Some((1.0 * DEG_PER_KM, 0.0))).await;
    seed_store(&pool, category_id, "five-km", Some((5.0 * DEG_PER_KM, 0.0))).await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/nearby-stores?latitude=0&longitude=0&radius=2").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let results = json.as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["name"], "one-km");
}

/// Stores without coordinates never appear in nearby results.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_nearby_stores_excludes_missing_coordinates(pool: PgPool) {
    let category_id = seed_category(&pool).await;
    seed_store(&pool, category_id, "no-coords", None).await;
    seed_store(&pool, category_id, "here", Some((0.0, 0.0))).await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/nearby-stores?latitude=0&longitude=0").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let results = json.as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["name"], "here");
}

/// Soft-deleted stores are invisible to nearby search.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_nearby_stores_excludes_soft_deleted(pool: PgPool) {
    let category_id = seed_category(&pool).await;
    let store_id = seed_store(&pool, category_id, "gone", Some((0.0, 0.0))).await;
    StoreRepo::soft_delete(&pool, store_id)
        .await
        .expect("soft delete should succeed");

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/nearby-stores?latitude=0&longitude=0").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 0);
}

// ---------------------------------------------------------------------------
// Parameter validation
// ---------------------------------------------------------------------------

/// A missing latitude is a 400 naming the parameter, never a 500.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_nearby_missing_latitude_is_field_error(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/nearby-stores?longitude=0").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["errors"]["latitude"].is_array());
    assert!(json["errors"].get("longitude").is_none());
}

/// A missing longitude names its own field.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_nearby_missing_longitude_is_field_error(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/nearby-offers?latitude=0").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["errors"]["longitude"].is_array());
}

/// An out-of-range latitude is rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_nearby_out_of_range_latitude_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/nearby-stores?latitude=91&longitude=0").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert!(json["errors"]["latitude"].is_array());
}

// ---------------------------------------------------------------------------
// Nearby offers
// ---------------------------------------------------------------------------

/// Offers use the same distance and ordering semantics as stores.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_nearby_offers_ordered_by_distance(pool: PgPool) {
    let category_id = seed_category(&pool).await;
    let store_id = seed_store(&pool, category_id, "host", Some((0.0, 0.0))).await;
    seed_offer(&pool, store_id, "nine-km", Some((9.0 * DEG_PER_KM, 0.0))).await;
    seed_offer(&pool, store_id, "one-km", Some((1.0 * DEG_PER_KM, 0.0))).await;
    seed_offer(&pool, store_id, "no-coords", None).await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/nearby-offers?latitude=0&longitude=0").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let results = json.as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["name"], "one-km");
    assert_eq!(results[1]["name"], "nine-km");

    let first = results[0]["distance"].as_f64().unwrap();
    let second = results[1]["distance"].as_f64().unwrap();
    assert!(first < second);
}
