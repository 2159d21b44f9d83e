//! Inventory handlers.

use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use precinct_core::error::AppError;
use precinct_core::types::pagination::PageResponse;
use precinct_entity::resource::{Resource, ResourceFilter};
use precinct_service::resource::{AddResourceRequest, Attachment};

use crate::dto::request::UpdateStockBody;
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthOfficer, PaginationParams, ValidatedJson};
use crate::state::AppState;

/// GET /api/resources
pub async fn list_resources(
    State(state): State<AppState>,
    _auth: AuthOfficer,
    Query(params): Query<PaginationParams>,
    Query(filter): Query<ResourceFilter>,
) -> ApiResult<Json<ApiResponse<PageResponse<Resource>>>> {
    let result = state
        .resources
        .list_resources(&filter, &params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(result)))
}

/// GET /api/resources/{id}
pub async fn get_resource(
    State(state): State<AppState>,
    _auth: AuthOfficer,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Resource>>> {
    let resource = state.resources.get_resource(id).await?;
    Ok(Json(ApiResponse::ok(resource)))
}

/// POST /api/resources (multipart: name, category, quantity_available,
/// description, optional file)
pub async fn add_resource(
    State(state): State<AppState>,
    auth: AuthOfficer,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<ApiResponse<Resource>>)> {
    let mut req = AddResourceRequest {
        name: String::new(),
        category: String::new(),
        quantity_available: 0,
        description: None,
    };
    let mut attachment: Option<Attachment> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        if name == "file" {
            let file_name = field.file_name().unwrap_or("attachment").to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
            if !data.is_empty() {
                attachment = Some(Attachment {
                    file_name,
                    content_type,
                    data,
                });
            }
            continue;
        }

        let text = field
            .text()
            .await
            .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
        match name.as_str() {
            "name" => req.name = text,
            "category" => req.category = text,
            "quantity_available" => {
                req.quantity_available = text
                    .trim()
                    .parse()
                    .map_err(|_| AppError::validation("Invalid quantity_available"))?;
            }
            "description" if !text.trim().is_empty() => req.description = Some(text),
            _ => {}
        }
    }

    let resource = state.resources.add_resource(&auth, req, attachment).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(resource))))
}

/// PUT /api/resources/{id}/stock
pub async fn update_stock(
    State(state): State<AppState>,
    auth: AuthOfficer,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateStockBody>,
) -> ApiResult<Json<ApiResponse<Resource>>> {
    let resource = state.resources.update_stock(&auth, id, req.quantity).await?;
    Ok(Json(ApiResponse::ok(resource)))
}
