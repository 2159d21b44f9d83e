//! Integration tests for complaints, cases and assignments.

use http::StatusCode;
use serde_json::json;

use precinct_database::memory::FaultPoint;
use precinct_entity::officer::Rank;

use crate::helpers::{TestApp, TestResponse};

async fn file_complaint(app: &TestApp, token: &str) -> TestResponse {
    app.request(
        "POST",
        "/api/complaints",
        Some(json!({
            "complainant_name": "Ama Mensah",
            "complaint_type": "Theft",
            "location": "Market Street",
            "description": "Bicycle taken from the rack outside the library",
        })),
        Some(token),
    )
    .await
}

async fn open_case(app: &TestApp, token: &str, lead: &str) -> TestResponse {
    app.request(
        "POST",
        "/api/cases",
        Some(json!({
            "title": format!("Burglary at {lead}'s beat"),
            "case_type": "Burglary",
            "officer_id": lead,
        })),
        Some(token),
    )
    .await
}

#[tokio::test]
async fn test_case_from_complaint_marks_complaint_assigned() {
    let app = TestApp::new().await;
    let constable = app.signed_in("CON-1", Rank::Constable, None).await;
    let inspector = app.signed_in("INS-1", Rank::Inspector, None).await;

    let filed = file_complaint(&app, &constable).await;
    assert_eq!(filed.status, StatusCode::CREATED);
    assert_eq!(filed.data()["status"], "Waiting for Action");
    let complaint_id = filed.data()["id"].as_str().unwrap().to_string();

    let response = app
        .request(
            "POST",
            &format!("/api/complaints/{complaint_id}/case"),
            Some(json!({ "officer_id": "CON-1" })),
            Some(&inspector),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    let case = response.data();
    assert_eq!(case["complaint_id"], complaint_id.as_str());
    assert_eq!(case["officer_id"], "CON-1");
    assert_eq!(case["case_type"], "Theft");
    assert_eq!(case["status"], "Active");

    let complaint = app
        .request("GET", &format!("/api/complaints/{complaint_id}"), None, Some(&inspector))
        .await;
    assert_eq!(complaint.data()["status"], "Assigned as Case");

    let case_id = case["id"].as_str().unwrap();
    let assignments = app
        .request("GET", &format!("/api/cases/{case_id}/assignments"), None, Some(&inspector))
        .await;
    let rows = assignments.data().as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["role"], "Lead Investigator");

    let again = app
        .request(
            "POST",
            &format!("/api/complaints/{complaint_id}/case"),
            Some(json!({ "officer_id": "CON-1" })),
            Some(&inspector),
        )
        .await;
    assert_eq!(again.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_failed_assignment_rolls_back_case_creation() {
    let app = TestApp::new().await;
    let constable = app.signed_in("CON-1", Rank::Constable, None).await;
    let inspector = app.signed_in("INS-1", Rank::Inspector, None).await;
    let complaint_id = file_complaint(&app, &constable).await.data()["id"]
        .as_str()
        .unwrap()
        .to_string();

    app.memory.inject_failure(FaultPoint::AssignmentInsert).await;
    let response = app
        .request(
            "POST",
            &format!("/api/complaints/{complaint_id}/case"),
            Some(json!({ "officer_id": "CON-1" })),
            Some(&inspector),
        )
        .await;
    app.memory.clear_failures().await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.message(), "Failed to create case.");

    let complaint = app
        .request("GET", &format!("/api/complaints/{complaint_id}"), None, Some(&inspector))
        .await;
    assert_eq!(complaint.data()["status"], "Waiting for Action");

    let cases = app.request("GET", "/api/cases", None, Some(&inspector)).await;
    assert_eq!(cases.data()["total_items"], 0);
}

#[tokio::test]
async fn test_constable_sees_only_own_cases() {
    let app = TestApp::new().await;
    let inspector = app.signed_in("INS-1", Rank::Inspector, None).await;
    let constable = app.signed_in("CON-1", Rank::Constable, None).await;
    app.create_officer("CON-2", Rank::Constable, None).await;

    assert_eq!(open_case(&app, &inspector, "CON-1").await.status, StatusCode::CREATED);
    let other = open_case(&app, &inspector, "CON-2").await;
    assert_eq!(other.status, StatusCode::CREATED);

    let mine = app.request("GET", "/api/cases", None, Some(&constable)).await;
    assert_eq!(mine.status, StatusCode::OK);
    let items = mine.data()["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["officer_id"], "CON-1");

    let all = app.request("GET", "/api/cases", None, Some(&inspector)).await;
    assert_eq!(all.data()["total_items"], 2);

    let other_id = other.data()["id"].as_str().unwrap();
    let hidden = app
        .request("GET", &format!("/api/cases/{other_id}"), None, Some(&constable))
        .await;
    assert_eq!(hidden.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_constable_cannot_open_case() {
    let app = TestApp::new().await;
    let constable = app.signed_in("CON-1", Rank::Constable, None).await;

    let response = open_case(&app, &constable, "CON-1").await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"], "FORBIDDEN");
}

#[tokio::test]
async fn test_closed_case_is_final() {
    let app = TestApp::new().await;
    let inspector = app.signed_in("INS-1", Rank::Inspector, None).await;
    app.create_officer("CON-1", Rank::Constable, None).await;
    let case_id = open_case(&app, &inspector, "CON-1").await.data()["id"]
        .as_str()
        .unwrap()
        .to_string();
    let path = format!("/api/cases/{case_id}/status");

    let closed = app
        .request("PUT", &path, Some(json!({ "status": "Closed" })), Some(&inspector))
        .await;
    assert_eq!(closed.status, StatusCode::OK);
    assert_eq!(closed.data()["status"], "Closed");
    assert!(closed.data()["closed_at"].is_string());

    let reopened = app
        .request("PUT", &path, Some(json!({ "status": "Active" })), Some(&inspector))
        .await;
    assert_eq!(reopened.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_duplicate_assignment_conflicts() {
    let app = TestApp::new().await;
    let inspector = app.signed_in("INS-1", Rank::Inspector, None).await;
    app.create_officer("CON-1", Rank::Constable, None).await;
    app.create_officer("CON-2", Rank::Constable, None).await;
    let case_id = open_case(&app, &inspector, "CON-1").await.data()["id"]
        .as_str()
        .unwrap()
        .to_string();
    let path = format!("/api/cases/{case_id}/assignments");

    let first = app
        .request("POST", &path, Some(json!({ "officer_id": "CON-2" })), Some(&inspector))
        .await;
    assert_eq!(first.status, StatusCode::CREATED);
    assert_eq!(first.data()["role"], "Supporting Officer");

    let second = app
        .request("POST", &path, Some(json!({ "officer_id": "CON-2" })), Some(&inspector))
        .await;
    assert_eq!(second.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_page_far_past_the_end_is_empty() {
    let app = TestApp::new().await;
    let inspector = app.signed_in("INS-1", Rank::Inspector, None).await;
    assert_eq!(open_case(&app, &inspector, "INS-1").await.status, StatusCode::CREATED);

    let response = app
        .request(
            "GET",
            &format!("/api/cases?page={}", u64::MAX),
            None,
            Some(&inspector),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.data()["items"].as_array().map(Vec::len), Some(0));
    assert_eq!(response.data()["total_items"], 1);
}
