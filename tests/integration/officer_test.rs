//! Integration tests for officer administration and the access log.

use http::StatusCode;
use serde_json::json;

use precinct_entity::officer::Rank;

use crate::helpers::TestApp;

fn new_officer(officer_id: &str, password: &str) -> serde_json::Value {
    json!({
        "officer_id": officer_id,
        "name": "Kofi Boateng",
        "rank": "Sergeant",
        "designation": "Traffic",
        "email": "kofi.boateng@precinct.example",
        "password": password,
    })
}

#[tokio::test]
async fn test_admin_creates_officer() {
    let app = TestApp::new().await;
    let admin = app.signed_in("ADM-1", Rank::Admin, None).await;

    let response = app
        .request(
            "POST",
            "/api/officers",
            Some(new_officer("SGT-7", "velvet-Harbor-signal-82")),
            Some(&admin),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    let officer = response.data();
    assert_eq!(officer["officer_id"], "SGT-7");
    assert_eq!(officer["rank"], "Sergeant");
    assert_eq!(officer["disabled"], false);
    assert!(officer.get("password_hash").is_none());

    let duplicate = app
        .request(
            "POST",
            "/api/officers",
            Some(new_officer("SGT-7", "velvet-Harbor-signal-82")),
            Some(&admin),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    let login = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "officer_id": "SGT-7", "password": "velvet-Harbor-signal-82" })),
            None,
        )
        .await;
    assert_eq!(login.status, StatusCode::OK);
    assert_eq!(login.data()["officer"]["category"], "traffic");
}

#[tokio::test]
async fn test_weak_password_is_refused() {
    let app = TestApp::new().await;
    let admin = app.signed_in("ADM-1", Rank::Admin, None).await;

    let response = app
        .request(
            "POST",
            "/api/officers",
            Some(new_officer("SGT-8", "password")),
            Some(&admin),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(app.db.officers.find_by_id("SGT-8").await.unwrap().is_none());
}

#[tokio::test]
async fn test_missing_name_names_the_field() {
    let app = TestApp::new().await;
    let admin = app.signed_in("ADM-1", Rank::Admin, None).await;

    let response = app
        .request(
            "POST",
            "/api/officers",
            Some(json!({ "officer_id": "SGT-9", "rank": "Sergeant", "password": "x" })),
            Some(&admin),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.message().contains("name"), "{}", response.message());
}

#[tokio::test]
async fn test_admin_cannot_disable_self() {
    let app = TestApp::new().await;
    let admin = app.signed_in("ADM-1", Rank::Admin, None).await;

    let response = app
        .request("POST", "/api/officers/ADM-1/disable", None, Some(&admin))
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.message(), "cannot disable your own account");
}

#[tokio::test]
async fn test_disable_and_enable_officer() {
    let app = TestApp::new().await;
    let admin = app.signed_in("ADM-1", Rank::Admin, None).await;
    app.create_officer("CON-1", Rank::Constable, None).await;

    let disabled = app
        .request("POST", "/api/officers/CON-1/disable", None, Some(&admin))
        .await;
    assert_eq!(disabled.status, StatusCode::OK);
    assert_eq!(disabled.data()["disabled"], true);

    let refused = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "officer_id": "CON-1", "password": crate::helpers::PASSWORD })),
            None,
        )
        .await;
    assert_eq!(refused.status, StatusCode::UNAUTHORIZED);

    let enabled = app
        .request("POST", "/api/officers/CON-1/enable", None, Some(&admin))
        .await;
    assert_eq!(enabled.status, StatusCode::OK);
    app.login("CON-1").await;
}

#[tokio::test]
async fn test_listing_officers_requires_inspector() {
    let app = TestApp::new().await;
    let constable = app.signed_in("CON-1", Rank::Constable, None).await;
    let inspector = app.signed_in("INS-1", Rank::Inspector, None).await;

    let denied = app.request("GET", "/api/officers", None, Some(&constable)).await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let listed = app.request("GET", "/api/officers", None, Some(&inspector)).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.data()["total_items"], 2);
}

#[tokio::test]
async fn test_access_log_is_admin_only() {
    let app = TestApp::new().await;
    let admin = app.signed_in("ADM-1", Rank::Admin, None).await;
    let inspector = app.signed_in("INS-1", Rank::Inspector, None).await;

    let denied = app
        .request("GET", "/api/admin/access-logs", None, Some(&inspector))
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let logs = app
        .request("GET", "/api/admin/access-logs?action=LOGIN", None, Some(&admin))
        .await;
    assert_eq!(logs.status, StatusCode::OK);
    let items = logs.data()["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|row| row["action"] == "LOGIN" && row["success"] == true));
}
