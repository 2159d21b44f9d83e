//! Integration tests for the login flow and session resolution.

use axum::body::Body;
use http::{Request, StatusCode, header};

use precinct_core::types::pagination::PageRequest;
use precinct_entity::audit::{AccessLogFilter, action};
use precinct_entity::officer::Rank;

use crate::helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_login_success_returns_token_and_menu() {
    let app = TestApp::new().await;
    app.create_officer("INS-100", Rank::Inspector, Some("CID")).await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({ "officer_id": "INS-100", "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert!(response.data()["token"].as_str().is_some());
    assert_eq!(response.data()["officer"]["category"], "cid_superior");
    assert!(response.data()["officer"]["navigation"].as_array().is_some());

    let cookie = response.set_cookie.expect("session cookie");
    assert!(cookie.starts_with(&format!("{}=", app.config.auth.cookie_name)));
    assert!(cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn test_wrong_password_and_unknown_id_look_the_same() {
    let app = TestApp::new().await;
    app.create_officer("SGT-1", Rank::Sergeant, None).await;

    let wrong = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({ "officer_id": "SGT-1", "password": "not-the-password" })),
            None,
        )
        .await;
    let unknown = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({ "officer_id": "NOBODY", "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.message(), unknown.message());

    let failures = app
        .db
        .audit
        .list(
            &AccessLogFilter {
                action: Some(action::LOGIN.to_string()),
                success: Some(false),
                ..AccessLogFilter::default()
            },
            &PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(failures.total_items, 2);
}

#[tokio::test]
async fn test_missing_field_is_named() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({ "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert!(response.message().contains("officer_id"));
}

#[tokio::test]
async fn test_me_requires_a_session() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/auth/me", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_me_accepts_the_session_cookie() {
    let app = TestApp::new().await;
    let token = app.signed_in("CON-7", Rank::Constable, Some("Traffic")).await;

    let req = Request::builder()
        .method("GET")
        .uri("/api/auth/me")
        .header(
            header::COOKIE,
            format!("{}={token}", app.config.auth.cookie_name),
        )
        .body(Body::empty())
        .unwrap();
    let response = app.send(req).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["officer"]["officer_id"], "CON-7");
    assert_eq!(response.data()["category"], "traffic");
    let actions = response.data()["actions"].as_array().unwrap();
    assert!(actions.iter().any(|a| a == "file_complaint"));
    assert!(!actions.iter().any(|a| a == "create_case"));
}

#[tokio::test]
async fn test_disabled_officer_loses_session_immediately() {
    let app = TestApp::new().await;
    let token = app.signed_in("CON-9", Rank::Constable, None).await;

    app.db.officers.set_disabled("CON-9", true).await.unwrap();

    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_is_audited_and_clears_cookie() {
    let app = TestApp::new().await;
    let token = app.signed_in("SGT-2", Rank::Sergeant, None).await;

    let response = app
        .request("POST", "/api/auth/logout", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.set_cookie.is_some());

    let logouts = app
        .db
        .audit
        .list(
            &AccessLogFilter {
                officer_id: Some("SGT-2".to_string()),
                action: Some(action::LOGOUT.to_string()),
                ..AccessLogFilter::default()
            },
            &PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(logouts.total_items, 1);
}

#[tokio::test]
async fn test_change_own_password() {
    let app = TestApp::new().await;
    let token = app.signed_in("INS-5", Rank::Inspector, None).await;

    let wrong = app
        .request(
            "PUT",
            "/api/auth/password",
            Some(serde_json::json!({
                "current_password": "guess",
                "new_password": "velvet-Harbor-signal-82",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(wrong.status, StatusCode::BAD_REQUEST);

    let ok = app
        .request(
            "PUT",
            "/api/auth/password",
            Some(serde_json::json!({
                "current_password": PASSWORD,
                "new_password": "velvet-Harbor-signal-82",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(ok.status, StatusCode::OK);

    let relogin = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({ "officer_id": "INS-5", "password": "velvet-Harbor-signal-82" })),
            None,
        )
        .await;
    assert_eq!(relogin.status, StatusCode::OK);
}
