//! End-to-end admin session lifecycle through the HTTP router.

use std::sync::Arc;
use std::time::Instant;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{Duration, TimeZone, Utc};
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use serde_json::{json, Value};
use tower::ServiceExt;

use billboard_api::application::{AdminService, AuthSessionService};
use billboard_api::domain::AdminRole;
use billboard_api::infrastructure::database::migrator::Migrator;
use billboard_api::infrastructure::{BcryptHasher, JwtConfig, SeaOrmUnitOfWorkFactory, TokenIssuer};
use billboard_api::shared::FixedClock;
use billboard_api::{create_api_router, ApiContext};

struct Harness {
    router: Router,
    clock: Arc<FixedClock>,
}

async fn harness() -> Harness {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();

    let clock = Arc::new(FixedClock::new(
        Utc.with_ymd_and_hms(2025, 3, 10, 9, 30, 0).unwrap(),
    ));
    let uow = Arc::new(SeaOrmUnitOfWorkFactory::new(db.clone()));
    let hasher = Arc::new(BcryptHasher::new(4));
    let issuer = TokenIssuer::new(JwtConfig {
        secret: "integration-signing-key-0123456789".into(),
        issuer: "billboard-api".into(),
        audience: "billboard-admin".into(),
    });

    let sessions = Arc::new(AuthSessionService::new(
        uow.clone(),
        hasher.clone(),
        issuer,
        clock.clone(),
    ));
    let admins = Arc::new(AdminService::new(uow, hasher, clock.clone()));
    admins
        .create_admin("admin1", "s3cret", AdminRole::Admin)
        .await
        .unwrap();

    let router = create_api_router(ApiContext {
        sessions,
        admins,
        clock: clock.clone(),
        db,
        started_at: Arc::new(Instant::now()),
        metrics: None,
        cors_origins: Vec::new(),
    });
    Harness { router, clock }
}

async fn post(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(
        router,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

async fn send(router: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = router.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn login_refresh_logout_then_refresh_is_rejected() {
    let h = harness().await;

    let (status, login) = post(
        &h.router,
        "/api/v1/auth/login",
        json!({ "username": "admin1", "password": "s3cret" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let refresh_token = login["data"]["refreshToken"].as_str().unwrap().to_string();
    let access_token = login["data"]["accessToken"].as_str().unwrap().to_string();

    let (status, refreshed) = post(
        &h.router,
        "/api/v1/auth/refresh-token",
        json!({ "refreshToken": refresh_token }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(refreshed["data"]["refreshToken"], refresh_token.as_str());
    assert!(refreshed["data"]["accessToken"].as_str().is_some());

    let (status, me) = send(
        &h.router,
        Request::builder()
            .uri("/api/v1/auth/me")
            .header(header::AUTHORIZATION, format!("Bearer {}", access_token))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["data"]["role"], "Admin");

    let (status, logout) = post(
        &h.router,
        "/api/v1/auth/logout",
        json!({ "refreshToken": refresh_token }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(logout["data"]["revokedToken"], refresh_token.as_str());

    let (status, _) = post(
        &h.router,
        "/api/v1/auth/refresh-token",
        json!({ "refreshToken": refresh_token }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = post(
        &h.router,
        "/api/v1/auth/logout",
        json!({ "refreshToken": refresh_token }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_user_is_rejected() {
    let h = harness().await;
    let (status, body) = post(
        &h.router,
        "/api/v1/auth/login",
        json!({ "username": "ghost", "password": "x" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn tokens_expire_on_the_clock() {
    let h = harness().await;
    let (_, login) = post(
        &h.router,
        "/api/v1/auth/login",
        json!({ "username": "admin1", "password": "s3cret" }),
    )
    .await;
    let refresh_token = login["data"]["refreshToken"].as_str().unwrap().to_string();
    let access_token = login["data"]["accessToken"].as_str().unwrap().to_string();

    h.clock.advance(Duration::minutes(31));
    let (status, body) = send(
        &h.router,
        Request::builder()
            .uri("/api/v1/auth/me")
            .header(header::AUTHORIZATION, format!("Bearer {}", access_token))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Token has expired");

    // Still within the refresh window
    let (status, _) = post(
        &h.router,
        "/api/v1/auth/refresh-token",
        json!({ "refreshToken": refresh_token }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    h.clock.advance(Duration::days(7));
    let (status, _) = post(
        &h.router,
        "/api/v1/auth/refresh-token",
        json!({ "refreshToken": refresh_token }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
