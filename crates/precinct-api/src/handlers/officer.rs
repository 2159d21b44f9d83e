//! Officer account handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use precinct_core::types::pagination::PageResponse;
use precinct_entity::officer::{Officer, OfficerFilter};

use crate::dto::request::{CreateOfficerBody, ResetPasswordRequest, UpdateOfficerBody};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthOfficer, PaginationParams, ValidatedJson};
use crate::state::AppState;

/// GET /api/officers
pub async fn list_officers(
    State(state): State<AppState>,
    auth: AuthOfficer,
    Query(params): Query<PaginationParams>,
    Query(filter): Query<OfficerFilter>,
) -> ApiResult<Json<ApiResponse<PageResponse<Officer>>>> {
    let result = state
        .users
        .list(&auth, &filter, &params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(result)))
}

/// POST /api/officers
pub async fn create_officer(
    State(state): State<AppState>,
    auth: AuthOfficer,
    ValidatedJson(req): ValidatedJson<CreateOfficerBody>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Officer>>)> {
    let officer = state.users.create(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(officer))))
}

/// GET /api/officers/{id}
pub async fn get_officer(
    State(state): State<AppState>,
    auth: AuthOfficer,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Officer>>> {
    let officer = state.users.get(&auth, &id).await?;
    Ok(Json(ApiResponse::ok(officer)))
}

/// PATCH /api/officers/{id}
pub async fn update_officer(
    State(state): State<AppState>,
    auth: AuthOfficer,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateOfficerBody>,
) -> ApiResult<Json<ApiResponse<Officer>>> {
    let officer = state.users.update_profile(&auth, &id, req.into()).await?;
    Ok(Json(ApiResponse::ok(officer)))
}

/// PUT /api/officers/{id}/password
pub async fn reset_password(
    State(state): State<AppState>,
    auth: AuthOfficer,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<ResetPasswordRequest>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state
        .users
        .reset_password(&auth, &id, &req.new_password)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: format!("Password reset for {id}"),
    })))
}

/// POST /api/officers/{id}/disable
pub async fn disable_officer(
    State(state): State<AppState>,
    auth: AuthOfficer,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Officer>>> {
    let officer = state.users.set_disabled(&auth, &id, true).await?;
    Ok(Json(ApiResponse::ok(officer)))
}

/// POST /api/officers/{id}/enable
pub async fn enable_officer(
    State(state): State<AppState>,
    auth: AuthOfficer,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Officer>>> {
    let officer = state.users.set_disabled(&auth, &id, false).await?;
    Ok(Json(ApiResponse::ok(officer)))
}
