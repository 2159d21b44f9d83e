//! Integration tests for role-specific dashboards.

use http::StatusCode;

use precinct_database::memory::FaultPoint;
use precinct_entity::officer::Rank;

use crate::helpers::TestApp;

/// The `{kind, value}` object of the stat named `key`, or null.
fn stat(data: &serde_json::Value, key: &str) -> serde_json::Value {
    data["overview"]
        .as_array()
        .into_iter()
        .chain(data["quick_stats"].as_array())
        .flatten()
        .find(|s| s["key"] == key)
        .map(|s| s["value"].clone())
        .unwrap_or_default()
}

#[tokio::test]
async fn test_admin_dashboard_counts_officers() {
    let app = TestApp::new().await;
    let token = app.signed_in("ADM-1", Rank::Admin, None).await;
    app.create_officer("CON-1", Rank::Constable, None).await;
    app.create_officer("CON-2", Rank::Constable, None).await;
    app.db.officers.set_disabled("CON-2", true).await.unwrap();

    let response = app.request("GET", "/api/dashboard", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    let data = response.data();
    assert_eq!(data["category"], "admin");
    assert_eq!(stat(data, "officers_total")["value"], 3);
    assert_eq!(stat(data, "officers_disabled")["value"], 1);
    assert_eq!(data["recent_activity"]["kind"], "access_logs");
    let menu = data["navigation"].as_array().unwrap();
    assert!(menu.iter().any(|item| item["key"] == "audit_log"));
}

#[tokio::test]
async fn test_category_follows_rank_and_designation() {
    let app = TestApp::new().await;
    let cases = [
        ("CI-1", Rank::ChiefInspector, None, "chief_inspector"),
        ("INS-1", Rank::Inspector, Some("CID"), "cid_superior"),
        ("CON-1", Rank::Constable, Some("CID"), "cid"),
        ("CON-2", Rank::Constable, Some("Traffic"), "traffic"),
        ("SGT-1", Rank::Sergeant, None, "sergeant"),
        ("CAD-1", Rank::Cadet, None, "constable"),
    ];

    for (id, rank, designation, expected) in cases {
        let token = app.signed_in(id, rank, designation).await;
        let response = app.request("GET", "/api/dashboard", None, Some(&token)).await;
        assert_eq!(response.status, StatusCode::OK, "{id}");
        assert_eq!(response.data()["category"], expected, "{id}");
    }
}

#[tokio::test]
async fn test_failing_metrics_degrade_to_zero() {
    let app = TestApp::new().await;
    let token = app.signed_in("ADM-1", Rank::Admin, None).await;

    app.memory.inject_failure(FaultPoint::StatsCount).await;
    let response = app.request("GET", "/api/dashboard", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    let total = stat(response.data(), "officers_total");
    assert_eq!(total["kind"], "count");
    assert_eq!(total["value"], 0);
}

#[tokio::test]
async fn test_dashboard_requires_session() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/api/dashboard", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
