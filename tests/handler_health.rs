mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use common::{InMemoryLinkRepository, MemoryCache};
use link_redirector::api::handlers::health_handler;
use link_redirector::state::AppState;
use std::sync::Arc;

fn server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_health_endpoint_success() {
    let repo = Arc::new(InMemoryLinkRepository::default());
    let (state, _rx) = common::create_test_state(repo, Arc::new(MemoryCache::default()));
    let server = server(state);

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(json["checks"]["database"]["status"], "ok");
    assert_eq!(json["checks"]["cache"]["status"], "ok");
    assert_eq!(json["checks"]["click_queue"]["status"], "ok");
}

#[tokio::test]
async fn test_health_reports_database_failure() {
    let repo = Arc::new(InMemoryLinkRepository::default());
    repo.fail();
    let (state, _rx) = common::create_test_state(repo, Arc::new(MemoryCache::default()));
    let server = server(state);

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), 503);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["database"]["status"], "error");
    assert_eq!(json["checks"]["cache"]["status"], "ok");
}

#[tokio::test]
async fn test_health_reports_closed_click_queue() {
    let repo = Arc::new(InMemoryLinkRepository::default());
    let (state, rx) = common::create_test_state(repo, Arc::new(MemoryCache::default()));
    drop(rx);
    let server = server(state);

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), 503);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["checks"]["click_queue"]["status"], "error");
    assert_eq!(json["checks"]["click_queue"]["message"], "Click queue is closed");
}
