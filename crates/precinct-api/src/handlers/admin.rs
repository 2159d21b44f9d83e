//! Admin-only handlers.

use axum::Json;
use axum::extract::{Query, State};

use precinct_core::types::pagination::PageResponse;
use precinct_entity::audit::{AccessLogEntry, AccessLogFilter};

use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthOfficer, PaginationParams};
use crate::state::AppState;

/// GET /api/admin/access-logs
pub async fn list_access_logs(
    State(state): State<AppState>,
    auth: AuthOfficer,
    Query(params): Query<PaginationParams>,
    Query(filter): Query<AccessLogFilter>,
) -> ApiResult<Json<ApiResponse<PageResponse<AccessLogEntry>>>> {
    let result = state
        .access_logs
        .list(&auth, &filter, &params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(result)))
}
