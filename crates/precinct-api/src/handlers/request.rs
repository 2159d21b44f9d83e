//! Resource allocation request handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use precinct_core::types::pagination::PageResponse;
use precinct_entity::resource::{RequestFilter, ResourceRequest};

use crate::dto::request::CreateResourceRequestBody;
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthOfficer, PaginationParams, ValidatedJson};
use crate::state::AppState;

/// GET /api/resource-requests
pub async fn list_requests(
    State(state): State<AppState>,
    auth: AuthOfficer,
    Query(params): Query<PaginationParams>,
    Query(filter): Query<RequestFilter>,
) -> ApiResult<Json<ApiResponse<PageResponse<ResourceRequest>>>> {
    let result = state
        .resources
        .list_requests(&auth, filter, &params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(result)))
}

/// POST /api/resource-requests
pub async fn create_request(
    State(state): State<AppState>,
    auth: AuthOfficer,
    ValidatedJson(req): ValidatedJson<CreateResourceRequestBody>,
) -> ApiResult<(StatusCode, Json<ApiResponse<ResourceRequest>>)> {
    let request = state.resources.create_request(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(request))))
}

/// GET /api/resource-requests/{id}
pub async fn get_request(
    State(state): State<AppState>,
    auth: AuthOfficer,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<ResourceRequest>>> {
    let request = state.resources.get_request(&auth, id).await?;
    Ok(Json(ApiResponse::ok(request)))
}

/// POST /api/resource-requests/{id}/approve
pub async fn approve_request(
    State(state): State<AppState>,
    auth: AuthOfficer,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<ResourceRequest>>> {
    let request = state.resources.approve_request(&auth, id).await?;
    Ok(Json(ApiResponse::ok(request)))
}

/// POST /api/resource-requests/{id}/reject
pub async fn reject_request(
    State(state): State<AppState>,
    auth: AuthOfficer,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<ResourceRequest>>> {
    let request = state.resources.reject_request(&auth, id).await?;
    Ok(Json(ApiResponse::ok(request)))
}
