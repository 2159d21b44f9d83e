//! Case handlers: creation, status, assignments.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use precinct_core::types::pagination::PageResponse;
use precinct_entity::case::{Case, CaseAssignment, CaseFilter, Investigation};
use precinct_service::case::CaseDetail;

use crate::dto::request::{
    AssignOfficerBody, CaseStatusBody, CreateCaseBody, OpenInvestigationBody,
};
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthOfficer, PaginationParams, ValidatedJson};
use crate::state::AppState;

/// GET /api/cases
pub async fn list_cases(
    State(state): State<AppState>,
    auth: AuthOfficer,
    Query(params): Query<PaginationParams>,
    Query(filter): Query<CaseFilter>,
) -> ApiResult<Json<ApiResponse<PageResponse<Case>>>> {
    let result = state
        .cases
        .list_cases(&auth, filter, &params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(result)))
}

/// POST /api/cases
pub async fn create_case(
    State(state): State<AppState>,
    auth: AuthOfficer,
    ValidatedJson(req): ValidatedJson<CreateCaseBody>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Case>>)> {
    let case = state.cases.create_case(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(case))))
}

/// GET /api/cases/{id}
pub async fn get_case(
    State(state): State<AppState>,
    auth: AuthOfficer,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<CaseDetail>>> {
    let detail = state.cases.case_detail(&auth, id).await?;
    Ok(Json(ApiResponse::ok(detail)))
}

/// PUT /api/cases/{id}/status
pub async fn update_case_status(
    State(state): State<AppState>,
    auth: AuthOfficer,
    Path(id): Path<Uuid>,
    Json(req): Json<CaseStatusBody>,
) -> ApiResult<Json<ApiResponse<Case>>> {
    let case = state.cases.update_case_status(&auth, id, req.status).await?;
    Ok(Json(ApiResponse::ok(case)))
}

/// GET /api/cases/{id}/assignments
pub async fn list_assignments(
    State(state): State<AppState>,
    auth: AuthOfficer,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Vec<CaseAssignment>>>> {
    let assignments = state.cases.list_assignments(&auth, id).await?;
    Ok(Json(ApiResponse::ok(assignments)))
}

/// POST /api/cases/{id}/assignments
pub async fn assign_officer(
    State(state): State<AppState>,
    auth: AuthOfficer,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<AssignOfficerBody>,
) -> ApiResult<(StatusCode, Json<ApiResponse<CaseAssignment>>)> {
    let assignment = state.cases.assign_officer(&auth, id, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(assignment))))
}

/// POST /api/assignments/{id}/complete
pub async fn complete_assignment(
    State(state): State<AppState>,
    auth: AuthOfficer,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<CaseAssignment>>> {
    let assignment = state.cases.complete_assignment(&auth, id).await?;
    Ok(Json(ApiResponse::ok(assignment)))
}

/// POST /api/cases/{id}/investigations
pub async fn open_investigation(
    State(state): State<AppState>,
    auth: AuthOfficer,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<OpenInvestigationBody>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Investigation>>)> {
    let investigation = state
        .cases
        .open_investigation(&auth, id, req.into())
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(investigation))))
}
