//! End-to-end dispatch through the HTTP server.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;
use urlrouter::config::{ConfigError, RouteConfig, RouterConfig};
use urlrouter::http::{handler_fn, params, BoxHandler, X_REQUEST_ID};
use urlrouter::{HttpServer, RouteError, Router, SharedRouter};

mod common;

fn config_with(routes: Vec<RouteConfig>) -> RouterConfig {
    let mut config = RouterConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.routes = routes;
    config
}

#[tokio::test]
async fn test_config_routes_over_http() {
    let server = HttpServer::new(config_with(vec![
        RouteConfig::new("POST", "/", "catch all"),
        RouteConfig::new("POST", "/v1/full_match", "full match"),
        RouteConfig::new("GET", "/users/:id", "user {id}"),
    ]))
    .unwrap();
    let server = common::spawn_server(server).await;
    let client = common::client();

    let res = client.post(server.url("/v1/full_match")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "full match");

    let res = client.post(server.url("/v1/full_match/something")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "catch all");

    let res = client.get(server.url("/users/alice")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert!(res.headers().contains_key(X_REQUEST_ID));
    assert_eq!(res.text().await.unwrap(), "user alice");

    let res = client.get(server.url("/nothing/here")).send().await.unwrap();
    assert_eq!(res.status(), 404);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "not found");
    assert_eq!(body["method"], "GET");
    assert_eq!(body["path"], "/nothing/here");

    server.shutdown.trigger();
}

#[test]
fn test_unregistrable_config_route_is_a_config_error() {
    let mut broken = RouteConfig::new("GET", "/broken", "x");
    broken.status = 42;
    assert!(matches!(
        HttpServer::new(config_with(vec![broken])),
        Err(ConfigError::Route(RouteError::InvalidHandler { .. }))
    ));
    assert!(matches!(
        HttpServer::new(config_with(vec![RouteConfig::new("GET", "", "x")])),
        Err(ConfigError::Route(RouteError::InvalidPattern { .. }))
    ));
}

#[tokio::test]
async fn test_config_reload_replaces_routes() {
    let server = HttpServer::new(config_with(vec![RouteConfig::new("GET", "/old", "old")])).unwrap();
    let server = common::spawn_server(server).await;
    let client = common::client();

    let res = client.get(server.url("/old")).send().await.unwrap();
    assert_eq!(res.status(), 200);

    server
        .config_tx
        .send(config_with(vec![RouteConfig::new("GET", "/new", "new")]))
        .unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    let res = client.get(server.url("/old")).send().await.unwrap();
    assert_eq!(res.status(), 404);
    let res = client.get(server.url("/new")).send().await.unwrap();
    assert_eq!(res.text().await.unwrap(), "new");

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_programmatic_handlers_read_params() {
    let mut table: Router<BoxHandler> = Router::new();
    table
        .handle(
            "GET",
            "/repos/:owner/:repo",
            handler_fn(|req| async move {
                let p = params(&req).cloned().unwrap_or_default();
                format!("{}/{}", p.get("owner").unwrap_or("-"), p.get("repo").unwrap_or("-"))
            }),
        )
        .unwrap();
    table
        .handle(
            "GET",
            "/health",
            handler_fn(|req| async move {
                // No named segments on this route, so no store is attached.
                assert!(params(&req).is_none());
                StatusCode::NO_CONTENT
            }),
        )
        .unwrap();

    let server = HttpServer::with_routes(RouterConfig::default(), Arc::new(SharedRouter::new(table)));
    let app = server.app();

    let res = app
        .clone()
        .oneshot(Request::get("/repos/rust-lang/rust").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = axum::body::to_bytes(res.into_body(), 1024).await.unwrap();
    assert_eq!(&body[..], b"rust-lang/rust");

    let res = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_late_registration_is_visible() {
    let server = HttpServer::new(RouterConfig::default()).unwrap();
    let app = server.app();

    let res = app
        .clone()
        .oneshot(Request::delete("/items/9").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    server
        .routes()
        .handle(
            "DELETE",
            "/items/:id",
            handler_fn(|req| async move {
                let id = params(&req).and_then(|p| p.get("id")).unwrap_or("").to_string();
                format!("deleted {id}")
            }),
        )
        .unwrap();

    let res = app
        .oneshot(Request::delete("/items/9").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = axum::body::to_bytes(res.into_body(), 1024).await.unwrap();
    assert_eq!(&body[..], b"deleted 9");
}

#[tokio::test]
async fn test_client_request_id_is_echoed() {
    let server = HttpServer::new(config_with(vec![RouteConfig::new("GET", "/", "root")])).unwrap();
    let res = server
        .app()
        .oneshot(
            Request::get("/anything")
                .header(X_REQUEST_ID, "req-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()[X_REQUEST_ID], "req-1");
}
