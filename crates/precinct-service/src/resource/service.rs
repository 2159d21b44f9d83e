//! Inventory management.

use std::sync::Arc;

use bytes::Bytes;
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use precinct_auth::AuditWriter;
use precinct_core::error::AppError;
use precinct_core::traits::FileSink;
use precinct_core::types::{PageRequest, PageResponse};
use precinct_database::store::{RequestStore, ResourceStore, TransactionSource};
use precinct_entity::audit::action;
use precinct_entity::officer::Rank;
use precinct_entity::resource::{NewResource, Resource, ResourceFilter};

use crate::context::RequestContext;
use crate::failure::failed;

/// Data for a new inventory item.
#[derive(Debug, Clone, Deserialize)]
pub struct AddResourceRequest {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub quantity_available: i32,
    pub description: Option<String>,
}

/// An uploaded file to keep alongside a resource.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

/// Inventory items and the requests drawn against them.
#[derive(Debug, Clone)]
pub struct ResourceManager {
    pub(super) resources: Arc<dyn ResourceStore>,
    pub(super) requests: Arc<dyn RequestStore>,
    pub(super) transactions: Arc<dyn TransactionSource>,
    sink: Arc<dyn FileSink>,
    pub(super) audit: AuditWriter,
}

impl ResourceManager {
    pub fn new(
        resources: Arc<dyn ResourceStore>,
        requests: Arc<dyn RequestStore>,
        transactions: Arc<dyn TransactionSource>,
        sink: Arc<dyn FileSink>,
        audit: AuditWriter,
    ) -> Self {
        Self {
            resources,
            requests,
            transactions,
            sink,
            audit,
        }
    }

    /// List inventory. Every officer may browse it.
    pub async fn list_resources(
        &self,
        filter: &ResourceFilter,
        page: &PageRequest,
    ) -> Result<PageResponse<Resource>, AppError> {
        self.resources
            .list(filter, page)
            .await
            .map_err(failed("list resources"))
    }

    pub async fn get_resource(&self, id: Uuid) -> Result<Resource, AppError> {
        self.resources
            .find_by_id(id)
            .await
            .map_err(failed("load resource"))?
            .ok_or_else(|| AppError::not_found(format!("Resource {id} not found")))
    }

    /// Add an inventory item, optionally with an attachment. Administrators only.
    ///
    /// The attachment is checked and stored first; if the row cannot be
    /// written the stored file is removed again.
    pub async fn add_resource(
        &self,
        ctx: &RequestContext,
        req: AddResourceRequest,
        attachment: Option<Attachment>,
    ) -> Result<Resource, AppError> {
        ctx.require(Rank::Admin)?;

        let name = req.name.trim();
        if name.is_empty() {
            return Err(AppError::missing_field("name"));
        }
        let category = req.category.trim();
        if category.is_empty() {
            return Err(AppError::missing_field("category"));
        }
        if req.quantity_available < 0 {
            return Err(AppError::validation("Quantity cannot be negative"));
        }

        let stored = match attachment {
            Some(file) => Some(
                self.sink
                    .store(&file.file_name, &file.content_type, file.data)
                    .await?,
            ),
            None => None,
        };

        let inserted = self
            .resources
            .insert(NewResource {
                name: name.to_string(),
                category: category.to_string(),
                quantity_available: req.quantity_available,
                description: req.description,
                attachment_path: stored.as_ref().map(|s| s.path.clone()),
                created_by: ctx.officer_id().to_string(),
            })
            .await;

        let resource = match inserted {
            Ok(resource) => resource,
            Err(e) => {
                if let Some(file) = &stored {
                    if let Err(cleanup) = self.sink.remove(&file.path).await {
                        warn!(path = %file.path, error = %cleanup, "Failed to remove orphaned attachment");
                    }
                }
                return Err(failed("add resource")(e));
            }
        };

        self.audit
            .record(
                ctx.officer_id(),
                action::RESOURCE_CREATE,
                &format!(
                    "Added resource {} ({} x{})",
                    resource.id, resource.name, resource.quantity_available
                ),
                ctx.ip(),
            )
            .await;
        info!(resource_id = %resource.id, name = %resource.name, "Resource added");

        Ok(resource)
    }

    /// Overwrite the available quantity. Administrators only.
    pub async fn update_stock(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        quantity: i32,
    ) -> Result<Resource, AppError> {
        ctx.require(Rank::Admin)?;
        if quantity < 0 {
            return Err(AppError::validation("Quantity cannot be negative"));
        }

        let before = self.get_resource(id).await?;
        let resource = self
            .resources
            .set_quantity(id, quantity)
            .await
            .map_err(failed("update stock"))?;

        self.audit
            .record(
                ctx.officer_id(),
                action::RESOURCE_STOCK,
                &format!(
                    "Stock of {} changed {} -> {quantity}",
                    resource.name, before.quantity_available
                ),
                ctx.ip(),
            )
            .await;

        Ok(resource)
    }
}
