//! Dashboard handler.

use axum::Json;
use axum::extract::State;

use precinct_service::DashboardPayload;

use crate::dto::response::ApiResponse;
use crate::extractors::AuthOfficer;
use crate::state::AppState;

/// GET /api/dashboard
///
/// Never fails once the session resolves: broken metrics read as zero.
pub async fn dashboard(
    State(state): State<AppState>,
    auth: AuthOfficer,
) -> Json<ApiResponse<DashboardPayload>> {
    Json(ApiResponse::ok(state.dashboard.build(&auth).await))
}
