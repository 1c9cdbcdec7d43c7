// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Route tests for authentication, the admin capability and the matching
//! trigger.
//!
//! These run against an offline database, so any request that reaches
//! storage fails after the auth layers have been exercised.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
};
use bilgi_santa::config::Config;
use bilgi_santa::services::MATCHING_RUN;
use serde_json::Value;
use tower::ServiceExt;

mod common;
use common::{
    create_test_app, create_test_app_with, create_test_jwt, sign_test_jwt, test_db_offline,
};

const ADMIN_EMAIL: &str = "admin@bilgi.edu.tr";
const RUN_URI: &str = "/api/admin/matching/run";

fn post(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::POST).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_is_public() {
    let (app, _) = create_test_app();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("Cache-Control").unwrap(), "no-store");
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_trigger_requires_token() {
    let (app, _) = create_test_app();

    let response = app.oneshot(post(RUN_URI, None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
async fn test_trigger_rejects_bad_token() {
    let (app, _) = create_test_app();

    let response = app
        .oneshot(post(RUN_URI, Some("not-a-jwt")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_trigger_rejects_non_admin() {
    let (app, state) = create_test_app();
    let token = create_test_jwt("student-1", Some("student@bilgi.edu.tr"), &state);

    let response = app.oneshot(post(RUN_URI, Some(&token))).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = json_body(response).await;
    assert_eq!(body["error"], "forbidden");
}

fn config_with_audience() -> Config {
    Config {
        jwt_audience: Some("authenticated".to_string()),
        ..Config::test_default()
    }
}

#[tokio::test]
async fn test_configured_audience_rejects_token_without_aud() {
    let (app, state) = create_test_app_with(config_with_audience(), test_db_offline());
    let token = sign_test_jwt(
        "admin-1",
        Some(ADMIN_EMAIL),
        None,
        &state.config.jwt_signing_key,
    );

    let response = app.oneshot(post(RUN_URI, Some(&token))).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_configured_audience_accepts_matching_aud() {
    let (app, state) = create_test_app_with(config_with_audience(), test_db_offline());
    let token = sign_test_jwt(
        "admin-1",
        Some(ADMIN_EMAIL),
        Some("authenticated"),
        &state.config.jwt_signing_key,
    );

    let response = app.oneshot(post(RUN_URI, Some(&token))).await.unwrap();

    // Past auth and admin; the offline store fails the run.
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_trigger_rejects_token_without_email() {
    let (app, state) = create_test_app();
    let token = create_test_jwt("anonymous", None, &state);

    let response = app.oneshot(post(RUN_URI, Some(&token))).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_cookie_is_accepted() {
    let (app, state) = create_test_app();
    let token = create_test_jwt("admin-1", Some(ADMIN_EMAIL), &state);

    let request = Request::builder()
        .method(Method::POST)
        .uri(format!("{RUN_URI}?dry_run=true"))
        .header(header::COOKIE, format!("santa_token={token}"))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    // Past auth and admin; the offline store makes the run fail upstream.
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_upstream_failure_is_reported() {
    let (app, state) = create_test_app();
    let token = create_test_jwt("admin-1", Some(ADMIN_EMAIL), &state);

    let response = app.oneshot(post(RUN_URI, Some(&token))).await.unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = json_body(response).await;
    assert_eq!(body["error"], "upstream_unavailable");
    // The guard is released once the request finishes.
    assert!(!state.run_locks.is_running(MATCHING_RUN));
}

#[tokio::test]
async fn test_concurrent_trigger_conflicts() {
    let (app, state) = create_test_app();
    let token = create_test_jwt("admin-1", Some(ADMIN_EMAIL), &state);

    let _running = state.run_locks.try_acquire(MATCHING_RUN).unwrap();
    let response = app.oneshot(post(RUN_URI, Some(&token))).await.unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = json_body(response).await;
    assert_eq!(body["error"], "conflict");
}

#[tokio::test]
async fn test_me_reports_admin_capability() {
    let (app, state) = create_test_app();

    for (email, expected) in [(ADMIN_EMAIL, true), ("student@bilgi.edu.tr", false)] {
        let token = create_test_jwt("someone", Some(email), &state);
        let request = Request::builder()
            .uri("/api/me")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["user_id"], "someone");
        assert_eq!(body["email"], email);
        assert_eq!(body["is_admin"], expected);
    }
}

#[tokio::test]
async fn test_my_matches_requires_auth() {
    let (app, state) = create_test_app();

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/api/matches").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let token = create_test_jwt("student-1", None, &state);
    let request = Request::builder()
        .uri("/api/matches")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_cors_preflight_allows_frontend() {
    let (app, state) = create_test_app();

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri(RUN_URI)
        .header(header::ORIGIN, state.config.frontend_url.as_str())
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        state.config.frontend_url.as_str()
    );
}
