//! Investigation handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use precinct_core::types::pagination::PageResponse;
use precinct_entity::case::{Investigation, InvestigationFilter};

use crate::dto::request::CompleteInvestigationBody;
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthOfficer, PaginationParams, ValidatedJson};
use crate::state::AppState;

/// GET /api/investigations
pub async fn list_investigations(
    State(state): State<AppState>,
    auth: AuthOfficer,
    Query(params): Query<PaginationParams>,
    Query(filter): Query<InvestigationFilter>,
) -> ApiResult<Json<ApiResponse<PageResponse<Investigation>>>> {
    let result = state
        .cases
        .list_investigations(&auth, filter, &params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(result)))
}

/// GET /api/investigations/{id}
pub async fn get_investigation(
    State(state): State<AppState>,
    auth: AuthOfficer,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Investigation>>> {
    let investigation = state.cases.get_investigation(&auth, id).await?;
    Ok(Json(ApiResponse::ok(investigation)))
}

/// POST /api/investigations/{id}/complete
pub async fn complete_investigation(
    State(state): State<AppState>,
    auth: AuthOfficer,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<CompleteInvestigationBody>,
) -> ApiResult<Json<ApiResponse<Investigation>>> {
    let investigation = state
        .cases
        .complete_investigation(&auth, id, &req.findings)
        .await?;
    Ok(Json(ApiResponse::ok(investigation)))
}
