#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use uuid::Uuid;

use tahfidz_api::auth::jwt::{generate_access_token, JwtConfig};
use tahfidz_api::config::ServerConfig;
use tahfidz_api::router::build_app_router;
use tahfidz_api::state::AppState;
use tahfidz_core::memory::MemoryStore;
use tahfidz_core::organization::Organization;
use tahfidz_core::points::PointsRecord;
use tahfidz_core::profile::UserProfile;
use tahfidz_core::service::LeaderboardService;
use tahfidz_core::types::DbId;

pub const TEST_ORIGIN: &str = "http://localhost:8081";

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![TEST_ORIGIN.to_string()],
        request_timeout_secs: 30,
        store_timeout_secs: 1,
        database_max_connections: 1,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            audience: None,
        },
    }
}

/// Build the full application router over the given in-memory store.
///
/// Uses the same `build_app_router` as `main.rs`, so the middleware stack
/// (CORS, request ID, timeout, tracing, panic recovery) is exercised too.
pub fn build_test_app(store: Arc<MemoryStore>) -> Router {
    let config = test_config();
    let service = LeaderboardService::new(store, config.store_timeout());
    let state = AppState {
        service,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Sign a short-lived access token for `user_id` with `role`.
pub fn token_for(user_id: DbId, role: &str) -> String {
    generate_access_token(user_id, role, 15, &test_config().jwt).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

pub async fn seed_org(store: &MemoryStore, code: &str) -> DbId {
    let id = Uuid::new_v4();
    store
        .insert_organization(Organization {
            id,
            name: format!("Kelas {code}"),
            code: code.to_string(),
            is_active: true,
        })
        .await;
    id
}

pub async fn seed_user(
    store: &MemoryStore,
    name: Option<&str>,
    role: &str,
    organization_id: Option<DbId>,
) -> DbId {
    let id = Uuid::new_v4();
    store
        .insert_profile(UserProfile {
            id,
            name: name.map(str::to_string),
            role: role.to_string(),
            organization_id,
        })
        .await;
    id
}

pub async fn seed_points(store: &MemoryStore, student: DbId, org: DbId, hafalan: i32, quiz: i32) {
    store
        .insert_points(PointsRecord::new(student, org, hafalan + quiz, hafalan, quiz).unwrap())
        .await;
}
