#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use spycats_api::config::ServerConfig;
use spycats_api::router::build_app_router;
use spycats_api::state::AppState;
use async_trait::async_trait;
use spycats_core::breed::{BreedCatalog, StaticBreedCatalog};
use spycats_core::error::CoreError;

/// Breeds the in-memory catalog recognises in tests.
pub const TEST_BREEDS: [&str; 4] = ["Siamese", "Maine Coon", "Persian", "Bengal"];

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        breed_catalog_url: "http://127.0.0.1:9".to_string(),
        breed_catalog_timeout_secs: 1,
        log_json: false,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool and a static breed catalog.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_catalog(pool, Arc::new(StaticBreedCatalog::new(TEST_BREEDS)))
}

/// Same as [`build_test_app`] with a caller-supplied breed catalog.
pub fn build_test_app_with_catalog(pool: PgPool, breed_catalog: Arc<dyn BreedCatalog>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        breed_catalog,
    };
    build_app_router(state, &config)
}

/// A breed catalog whose every lookup fails, as when the service is down.
pub struct UnavailableCatalog;

#[async_trait]
impl BreedCatalog for UnavailableCatalog {
    async fn breed_names(&self) -> Result<Vec<String>, CoreError> {
        Err(CoreError::Internal("connection refused".into()))
    }
}

/// Number of rows in `spy_cats`.
pub async fn cat_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM spy_cats")
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None).await
}

pub async fn patch(app: Router, uri: &str) -> Response {
    send(app, Method::PATCH, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::PATCH, uri, Some(body)).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a cat through the API and return its id.
pub async fn create_cat(pool: &PgPool, name: &str, breed: &str, salary: f64) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/spy_cats/",
        serde_json::json!({
            "name": name,
            "years_of_experience": 3,
            "breed": breed,
            "salary": salary,
        }),
    )
    .await;
    let json = body_json(response).await;
    json["id"].as_i64().unwrap()
}

/// Create a mission through the API and return its JSON representation.
pub async fn create_mission(
    pool: &PgPool,
    name: &str,
    assigned_cat: Option<i64>,
    targets: &[&str],
) -> serde_json::Value {
    let targets: Vec<_> = targets
        .iter()
        .map(|t| serde_json::json!({"name": t, "country": "Ukraine", "notes": "Initial"}))
        .collect();
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/missions/",
        serde_json::json!({
            "name": name,
            "description": format!("{name} description"),
            "assigned_cat": assigned_cat,
            "targets": targets,
        }),
    )
    .await;
    body_json(response).await
}
