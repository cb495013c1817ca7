//! Integration tests for the report service API
//!
//! Tests drive the axum router directly via `tower::ServiceExt::oneshot`
//! over a seeded in-memory SQLite database. Handlers only read, so the
//! read-write seeding pool doubles as the serving pool here.

use aquafarm_common::db::create_schema;
use aquafarm_report::{build_router, AppState};
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::Value;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tower::util::ServiceExt; // for `oneshot` method

/// Test helper: create and initialize an in-memory database
async fn setup_test_db() -> SqlitePool {
    // One connection keeps the in-memory database alive across queries
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Should open in-memory database");

    create_schema(&pool).await.expect("Should create schema");
    pool
}

/// Test helper: create app over the given database
fn setup_app(db: SqlitePool) -> axum::Router {
    build_router(AppState::new(db))
}

fn test_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Test helper: extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

async fn exec(pool: &SqlitePool, sql: &str) {
    sqlx::query(sql).execute(pool).await.expect(sql);
}

// =============================================================================
// Health endpoint
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_app(setup_test_db().await);

    let response = app.oneshot(test_request("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "aquafarm-report");
    assert!(body["version"].is_string());
}

// =============================================================================
// Composition endpoint
// =============================================================================

#[tokio::test]
async fn test_composition_counts_only_latest_inventory() {
    let db = setup_test_db().await;
    exec(&db, "INSERT INTO pools (id, name) VALUES (1, 'A')").await;
    exec(&db, "INSERT INTO fish_types (id, name) VALUES (1, 'Salmon')").await;
    exec(
        &db,
        "INSERT INTO fish_inventory (id, control_date, pool_id, fish_type_id) VALUES
         (1, 100, 1, 1), (2, 200, 1, 1)",
    )
    .await;
    exec(
        &db,
        "INSERT INTO fish_boning (fish_inventory_id, fish_number, fish_biomass) VALUES
         (1, 10, 5.0), (2, 20, 8.0)",
    )
    .await;

    let app = setup_app(db);
    let response = app.oneshot(test_request("/api/composition")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    // Rebuilt per request, stamped with the generation time
    assert!(body["generated_at"].as_i64().unwrap() > 946_684_800);
    let salmon = &body["fish_types"]["Salmon"];
    assert_eq!(salmon["total_count"], 20);
    assert_eq!(salmon["total_mass"], 8.0);
    assert_eq!(salmon["pools"], serde_json::json!(["A"]));
}

#[tokio::test]
async fn test_composition_empty_journal() {
    let app = setup_app(setup_test_db().await);

    let response = app.oneshot(test_request("/api/composition")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["fish_types"], serde_json::json!({}));
}

#[tokio::test]
async fn test_composition_inventory_without_bonings_registers_pool() {
    let db = setup_test_db().await;
    exec(&db, "INSERT INTO pools (id, name) VALUES (1, 'B')").await;
    exec(&db, "INSERT INTO fish_types (id, name) VALUES (1, 'Trout')").await;
    exec(
        &db,
        "INSERT INTO fish_inventory (id, control_date, pool_id, fish_type_id) VALUES (1, 50, 1, 1)",
    )
    .await;

    let app = setup_app(db);
    let body = extract_json(
        app.oneshot(test_request("/api/composition"))
            .await
            .unwrap()
            .into_body(),
    )
    .await;

    let trout = &body["fish_types"]["Trout"];
    assert_eq!(trout["total_count"], 0);
    assert_eq!(trout["total_mass"], 0.0);
    assert_eq!(trout["pools"], serde_json::json!(["B"]));
}

// =============================================================================
// Chart endpoint
// =============================================================================

async fn seed_two_groups(db: &SqlitePool) {
    exec(db, "INSERT INTO group_pools (id, name) VALUES (1, 'G1'), (2, 'G2')").await;
    exec(
        db,
        "INSERT INTO hydrochemistry (group_pool_id, sample_date, temperature) VALUES
         (1, 1, 7.2), (2, 2, 3.1)",
    )
    .await;
}

#[tokio::test]
async fn test_chart_one_series_per_group() {
    let db = setup_test_db().await;
    seed_two_groups(&db).await;

    let app = setup_app(db);
    let response = app
        .oneshot(test_request("/api/chart/temperature?start=0&end=10"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["parameter"], "temperature");
    assert_eq!(body["label"], "Temperature (°C)");

    let series = body["series"].as_array().unwrap();
    assert_eq!(series.len(), 2);
    assert_eq!(series[0]["name"], "G1");
    assert_eq!(series[0]["points"][0]["timestamp"], 1);
    assert_eq!(series[0]["points"][0]["value"], 7.2);
    assert_eq!(series[1]["name"], "G2");
    assert_eq!(series[1]["points"][0]["value"], 3.1);
}

#[tokio::test]
async fn test_chart_inverted_range_returns_empty_series() {
    let db = setup_test_db().await;
    seed_two_groups(&db).await;

    let app = setup_app(db);
    let response = app
        .oneshot(test_request("/api/chart/temperature?start=10&end=0"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["series"], serde_json::json!([]));
}

#[tokio::test]
async fn test_chart_unknown_parameter_rejected() {
    let app = setup_app(setup_test_db().await);

    let response = app
        .oneshot(test_request("/api/chart/turbidity?start=0&end=10"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = extract_json(response.into_body()).await;
    assert!(body["error"].as_str().unwrap().contains("turbidity"));
}

#[tokio::test]
async fn test_chart_null_values_kept_in_series() {
    let db = setup_test_db().await;
    exec(&db, "INSERT INTO group_pools (id, name) VALUES (1, 'G1')").await;
    exec(
        &db,
        "INSERT INTO hydrochemistry (group_pool_id, sample_date, ph) VALUES
         (1, 1, 7.0), (1, 2, NULL), (1, 3, 7.4)",
    )
    .await;

    let app = setup_app(db);
    let body = extract_json(
        app.oneshot(test_request("/api/chart/ph?start=0&end=10"))
            .await
            .unwrap()
            .into_body(),
    )
    .await;

    let points = body["series"][0]["points"].as_array().unwrap();
    assert_eq!(points.len(), 3);
    assert!(points[1]["value"].is_null());
}

// =============================================================================
// Journal read views
// =============================================================================

#[tokio::test]
async fn test_hydrochemistry_sorted_descending() {
    let db = setup_test_db().await;
    exec(&db, "INSERT INTO group_pools (id, name) VALUES (1, 'G1')").await;
    exec(
        &db,
        "INSERT INTO hydrochemistry (group_pool_id, sample_date) VALUES (1, 100), (1, 300), (1, 200)",
    )
    .await;

    let app = setup_app(db);
    let response = app
        .oneshot(test_request("/api/hydrochemistry?reverse=true"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    let dates: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["sample_date"].as_i64().unwrap())
        .collect();
    assert_eq!(dates, vec![300, 200, 100]);
}

#[tokio::test]
async fn test_hydrochemistry_date_filter_inclusive() {
    let db = setup_test_db().await;
    exec(&db, "INSERT INTO group_pools (id, name) VALUES (1, 'G1')").await;
    exec(
        &db,
        "INSERT INTO hydrochemistry (group_pool_id, sample_date) VALUES (1, 100), (1, 200), (1, 300)",
    )
    .await;

    let app = setup_app(db);
    let body = extract_json(
        app.oneshot(test_request("/api/hydrochemistry?start=100&end=200"))
            .await
            .unwrap()
            .into_body(),
    )
    .await;

    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_hydrochemistry_unknown_sort_column_rejected() {
    let app = setup_app(setup_test_db().await);

    let response = app
        .oneshot(test_request("/api/hydrochemistry?sort_by=id;DROP"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_latest_hydrochemistry_unknown_pool() {
    let app = setup_app(setup_test_db().await);

    let response = app
        .oneshot(test_request("/api/pools/99/latest-hydrochemistry"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_latest_hydrochemistry_for_pool() {
    let db = setup_test_db().await;
    exec(&db, "INSERT INTO pools (id, name) VALUES (1, 'A')").await;
    exec(&db, "INSERT INTO group_pools (id, name) VALUES (1, 'G1')").await;
    exec(&db, "INSERT INTO group_pool_pools (group_pool_id, pool_id) VALUES (1, 1)").await;
    exec(
        &db,
        "INSERT INTO hydrochemistry (group_pool_id, sample_date, ph) VALUES (1, 100, 6.8), (1, 200, 7.1)",
    )
    .await;

    let app = setup_app(db);
    let response = app
        .oneshot(test_request("/api/pools/1/latest-hydrochemistry"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["pool_name"], "A");
    assert_eq!(body["record"]["sample_date"], 200);
    assert_eq!(body["record"]["ph"], 7.1);
    assert_eq!(body["sampled_at"], "1970-01-01 00:03:20");
}

#[tokio::test]
async fn test_latest_hydrochemistry_no_samples_is_null() {
    let db = setup_test_db().await;
    exec(&db, "INSERT INTO pools (id, name) VALUES (1, 'A')").await;

    let app = setup_app(db);
    let response = app
        .oneshot(test_request("/api/pools/1/latest-hydrochemistry"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert!(body["record"].is_null());
}

#[tokio::test]
async fn test_inventory_lists_nested_bonings() {
    let db = setup_test_db().await;
    exec(&db, "INSERT INTO pools (id, name) VALUES (1, 'A')").await;
    exec(&db, "INSERT INTO fish_types (id, name) VALUES (1, 'Carp')").await;
    exec(
        &db,
        "INSERT INTO fish_inventory (id, control_date, pool_id, fish_type_id, control_desc)
         VALUES (1, 100, 1, 1, 'spring audit')",
    )
    .await;
    exec(
        &db,
        "INSERT INTO fish_boning (fish_inventory_id, fish_number, fish_biomass) VALUES
         (1, 10, 4.5), (1, 7, 2.0)",
    )
    .await;

    let app = setup_app(db);
    let body = extract_json(
        app.oneshot(test_request("/api/inventory"))
            .await
            .unwrap()
            .into_body(),
    )
    .await;

    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["control_desc"], "spring audit");
    assert_eq!(items[0]["bonings"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_pools_view_includes_group_members() {
    let db = setup_test_db().await;
    exec(&db, "INSERT INTO pools (id, name) VALUES (1, 'A'), (2, 'B')").await;
    exec(&db, "INSERT INTO group_pools (id, name) VALUES (1, 'North')").await;
    exec(
        &db,
        "INSERT INTO group_pool_pools (group_pool_id, pool_id) VALUES (1, 1), (1, 2)",
    )
    .await;

    let app = setup_app(db);
    let body = extract_json(
        app.oneshot(test_request("/api/pools"))
            .await
            .unwrap()
            .into_body(),
    )
    .await;

    assert_eq!(body["pools"].as_array().unwrap().len(), 2);
    let group = &body["group_pools"][0];
    assert_eq!(group["name"], "North");
    assert_eq!(group["pools"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_feeding_and_movements_views() {
    let db = setup_test_db().await;
    exec(&db, "INSERT INTO pools (id, name) VALUES (1, 'A'), (2, 'B')").await;
    exec(&db, "INSERT INTO fish_types (id, name) VALUES (1, 'Carp')").await;
    exec(&db, "INSERT INTO feed_types (id, name, unit) VALUES (1, 'Pellets', 'kg')").await;
    exec(
        &db,
        "INSERT INTO feeds (pool_id, feed_date, feed_type_id, feed_value) VALUES (1, 100, 1, 2.5)",
    )
    .await;
    exec(
        &db,
        "INSERT INTO fish_movements (pool_id_from, pool_id_to, fish_type_id, movement_date, fish_biomass)
         VALUES (1, 2, 1, 150, 12.0)",
    )
    .await;

    let app = setup_app(db);

    let feeding = extract_json(
        app.clone()
            .oneshot(test_request("/api/feeding"))
            .await
            .unwrap()
            .into_body(),
    )
    .await;
    assert_eq!(feeding["feed_types"][0]["unit"], "kg");
    assert_eq!(feeding["feeds"][0]["feed_value"], 2.5);

    let movements = extract_json(
        app.oneshot(test_request("/api/movements"))
            .await
            .unwrap()
            .into_body(),
    )
    .await;
    assert_eq!(movements[0]["pool_id_from"], 1);
    assert_eq!(movements[0]["pool_id_to"], 2);
    assert_eq!(movements[0]["fish_biomass"], 12.0);
}
