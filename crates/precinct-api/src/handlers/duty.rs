//! Duty roster handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use precinct_core::types::pagination::PageResponse;
use precinct_entity::duty::{Duty, DutyFilter};
use precinct_service::duty::DutyDetail;

use crate::dto::request::ScheduleDutyBody;
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthOfficer, PaginationParams, ValidatedJson};
use crate::state::AppState;

/// GET /api/duties?officer_id=&from=&to=
pub async fn list_duties(
    State(state): State<AppState>,
    auth: AuthOfficer,
    Query(params): Query<PaginationParams>,
    Query(filter): Query<DutyFilter>,
) -> ApiResult<Json<ApiResponse<PageResponse<Duty>>>> {
    let result = state
        .duties
        .list(&auth, filter, &params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(result)))
}

/// POST /api/duties
pub async fn schedule_duty(
    State(state): State<AppState>,
    auth: AuthOfficer,
    ValidatedJson(req): ValidatedJson<ScheduleDutyBody>,
) -> ApiResult<(StatusCode, Json<ApiResponse<DutyDetail>>)> {
    let detail = state.duties.schedule(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(detail))))
}

/// GET /api/duties/{id}
pub async fn get_duty(
    State(state): State<AppState>,
    auth: AuthOfficer,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<DutyDetail>>> {
    let detail = state.duties.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(detail)))
}
