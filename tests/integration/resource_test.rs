//! Integration tests for inventory and resource requests.

use axum::body::Body;
use http::{Request, StatusCode, header};
use serde_json::json;

use precinct_entity::officer::Rank;

use crate::helpers::{TestApp, TestResponse};

const BOUNDARY: &str = "precinct-test-boundary";

/// Build a multipart body from text fields and an optional file part.
fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, content_type, data)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

async fn upload(app: &TestApp, token: &str, body: Vec<u8>) -> TestResponse {
    let req = Request::builder()
        .method("POST")
        .uri("/api/resources")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body))
        .unwrap();
    app.send(req).await
}

async fn add_radios(app: &TestApp, token: &str, quantity: &str) -> String {
    let body = multipart_body(
        &[
            ("name", "Handheld radio"),
            ("category", "Communication"),
            ("quantity_available", quantity),
        ],
        None,
    );
    let response = upload(app, token, body).await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    response.data()["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_admin_uploads_resource_with_attachment() {
    let app = TestApp::new().await;
    let admin = app.signed_in("ADM-1", Rank::Admin, None).await;

    let body = multipart_body(
        &[
            ("name", "Breathalyser"),
            ("category", "Traffic"),
            ("quantity_available", "4"),
            ("description", "Calibrated quarterly"),
        ],
        Some(("Manual.pdf", "application/pdf", b"%PDF-1.4 manual")),
    );
    let response = upload(&app, &admin, body).await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    let resource = response.data();
    assert_eq!(resource["name"], "Breathalyser");
    assert_eq!(resource["quantity_available"], 4);
    let path = resource["attachment_path"].as_str().expect("attachment path");
    assert!(path.ends_with(".pdf"));
}

#[tokio::test]
async fn test_disallowed_attachment_type_is_rejected() {
    let app = TestApp::new().await;
    let admin = app.signed_in("ADM-1", Rank::Admin, None).await;

    let body = multipart_body(
        &[("name", "Baton"), ("category", "Equipment"), ("quantity_available", "10")],
        Some(("run.sh", "application/x-sh", b"#!/bin/sh")),
    );
    let response = upload(&app, &admin, body).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let listed = app.request("GET", "/api/resources", None, Some(&admin)).await;
    assert_eq!(listed.data()["total_items"], 0);
}

#[tokio::test]
async fn test_only_admin_manages_inventory() {
    let app = TestApp::new().await;
    let inspector = app.signed_in("INS-1", Rank::Inspector, None).await;

    let body = multipart_body(
        &[("name", "Cones"), ("category", "Traffic"), ("quantity_available", "20")],
        None,
    );
    let response = upload(&app, &inspector, body).await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_approval_draws_from_stock() {
    let app = TestApp::new().await;
    let admin = app.signed_in("ADM-1", Rank::Admin, None).await;
    let inspector = app.signed_in("INS-1", Rank::Inspector, None).await;
    let constable = app.signed_in("CON-1", Rank::Constable, None).await;
    let resource_id = add_radios(&app, &admin, "5").await;

    let filed = app
        .request(
            "POST",
            "/api/resource-requests",
            Some(json!({
                "resource_id": resource_id,
                "quantity": 3,
                "reason": "Night patrol",
                "urgency": "High",
            })),
            Some(&constable),
        )
        .await;
    assert_eq!(filed.status, StatusCode::CREATED, "{:?}", filed.body);
    assert_eq!(filed.data()["status"], "Pending");
    let request_id = filed.data()["id"].as_str().unwrap().to_string();
    let approve = format!("/api/resource-requests/{request_id}/approve");

    let denied = app.request("POST", &approve, None, Some(&constable)).await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let approved = app.request("POST", &approve, None, Some(&inspector)).await;
    assert_eq!(approved.status, StatusCode::OK, "{:?}", approved.body);
    assert_eq!(approved.data()["status"], "Approved");
    assert_eq!(approved.data()["approved_by"], "INS-1");

    let resource = app
        .request("GET", &format!("/api/resources/{resource_id}"), None, Some(&admin))
        .await;
    assert_eq!(resource.data()["quantity_available"], 2);

    let again = app.request("POST", &approve, None, Some(&inspector)).await;
    assert_eq!(again.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_insufficient_stock_leaves_request_pending() {
    let app = TestApp::new().await;
    let admin = app.signed_in("ADM-1", Rank::Admin, None).await;
    let inspector = app.signed_in("INS-1", Rank::Inspector, None).await;
    let resource_id = add_radios(&app, &admin, "1").await;

    let filed = app
        .request(
            "POST",
            "/api/resource-requests",
            Some(json!({ "resource_id": resource_id, "quantity": 2, "reason": "Event cover" })),
            Some(&inspector),
        )
        .await;
    assert_eq!(filed.status, StatusCode::CREATED);
    assert_eq!(filed.data()["urgency"], "Medium");
    let request_id = filed.data()["id"].as_str().unwrap().to_string();

    let response = app
        .request(
            "POST",
            &format!("/api/resource-requests/{request_id}/approve"),
            None,
            Some(&inspector),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    let request = app
        .request("GET", &format!("/api/resource-requests/{request_id}"), None, Some(&inspector))
        .await;
    assert_eq!(request.data()["status"], "Pending");

    let resource = app
        .request("GET", &format!("/api/resources/{resource_id}"), None, Some(&inspector))
        .await;
    assert_eq!(resource.data()["quantity_available"], 1);
}

#[tokio::test]
async fn test_stock_cannot_go_negative() {
    let app = TestApp::new().await;
    let admin = app.signed_in("ADM-1", Rank::Admin, None).await;
    let resource_id = add_radios(&app, &admin, "3").await;
    let path = format!("/api/resources/{resource_id}/stock");

    let negative = app
        .request("PUT", &path, Some(json!({ "quantity": -1 })), Some(&admin))
        .await;
    assert_eq!(negative.status, StatusCode::BAD_REQUEST);

    let updated = app
        .request("PUT", &path, Some(json!({ "quantity": 12 })), Some(&admin))
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.data()["quantity_available"], 12);
}
