//! Complaint intake and triage handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use precinct_core::types::pagination::PageResponse;
use precinct_entity::case::Case;
use precinct_entity::complaint::{Complaint, ComplaintFilter};

use crate::dto::request::{CaseFromComplaintBody, ComplaintStatusBody, FileComplaintBody};
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthOfficer, PaginationParams, ValidatedJson};
use crate::state::AppState;

/// GET /api/complaints
pub async fn list_complaints(
    State(state): State<AppState>,
    auth: AuthOfficer,
    Query(params): Query<PaginationParams>,
    Query(filter): Query<ComplaintFilter>,
) -> ApiResult<Json<ApiResponse<PageResponse<Complaint>>>> {
    let result = state
        .cases
        .list_complaints(&auth, filter, &params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(result)))
}

/// POST /api/complaints
pub async fn file_complaint(
    State(state): State<AppState>,
    auth: AuthOfficer,
    ValidatedJson(req): ValidatedJson<FileComplaintBody>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Complaint>>)> {
    let complaint = state.cases.file_complaint(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(complaint))))
}

/// GET /api/complaints/{id}
pub async fn get_complaint(
    State(state): State<AppState>,
    auth: AuthOfficer,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Complaint>>> {
    let complaint = state.cases.get_complaint(&auth, id).await?;
    Ok(Json(ApiResponse::ok(complaint)))
}

/// PUT /api/complaints/{id}/status
pub async fn update_complaint_status(
    State(state): State<AppState>,
    auth: AuthOfficer,
    Path(id): Path<Uuid>,
    Json(req): Json<ComplaintStatusBody>,
) -> ApiResult<Json<ApiResponse<Complaint>>> {
    let complaint = state
        .cases
        .update_complaint_status(&auth, id, req.status)
        .await?;
    Ok(Json(ApiResponse::ok(complaint)))
}

/// POST /api/complaints/{id}/case
pub async fn create_case_from_complaint(
    State(state): State<AppState>,
    auth: AuthOfficer,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<CaseFromComplaintBody>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Case>>)> {
    let case = state
        .cases
        .create_case_from_complaint(&auth, id, req.into())
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(case))))
}
