//! Resource allocation requests and their approval.

use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use precinct_core::error::AppError;
use precinct_core::types::{PageRequest, PageResponse};
use precinct_entity::audit::action;
use precinct_entity::officer::Rank;
use precinct_entity::resource::{
    NewResourceRequest, RequestFilter, RequestStatus, ResourceRequest, Urgency,
};

use super::service::ResourceManager;
use crate::context::RequestContext;
use crate::failure::failed;

/// An officer asking for inventory.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateResourceRequest {
    pub resource_id: Uuid,
    pub quantity: i32,
    pub reason: String,
    #[serde(default)]
    pub urgency: Urgency,
}

impl ResourceManager {
    /// File a pending request for the caller.
    pub async fn create_request(
        &self,
        ctx: &RequestContext,
        req: CreateResourceRequest,
    ) -> Result<ResourceRequest, AppError> {
        if req.quantity <= 0 {
            return Err(AppError::validation("Quantity must be greater than zero"));
        }
        let reason = req.reason.trim();
        if reason.is_empty() {
            return Err(AppError::missing_field("reason"));
        }
        let resource = self.get_resource(req.resource_id).await?;

        let request = self
            .requests
            .insert(NewResourceRequest {
                resource_id: resource.id,
                officer_id: ctx.officer_id().to_string(),
                quantity: req.quantity,
                reason: reason.to_string(),
                urgency: req.urgency,
            })
            .await
            .map_err(failed("create resource request"))?;

        self.audit
            .record(
                ctx.officer_id(),
                action::REQUEST_CREATE,
                &format!(
                    "Requested {} x {} ({:?})",
                    request.quantity, resource.name, request.urgency
                ),
                ctx.ip(),
            )
            .await;
        info!(request_id = %request.id, resource_id = %resource.id, quantity = request.quantity, "Resource requested");

        Ok(request)
    }

    /// List requests, scoped to the requester below Inspector.
    pub async fn list_requests(
        &self,
        ctx: &RequestContext,
        filter: RequestFilter,
        page: &PageRequest,
    ) -> Result<PageResponse<ResourceRequest>, AppError> {
        let filter = RequestFilter {
            officer_id: ctx.scope().or(filter.officer_id),
            ..filter
        };
        self.requests
            .list(&filter, page)
            .await
            .map_err(failed("list resource requests"))
    }

    /// Fetch one visible request.
    pub async fn get_request(
        &self,
        ctx: &RequestContext,
        id: Uuid,
    ) -> Result<ResourceRequest, AppError> {
        self.requests
            .find_by_id(id)
            .await
            .map_err(failed("load resource request"))?
            .filter(|r| ctx.can_see(&r.officer_id))
            .ok_or_else(|| AppError::not_found(format!("Resource request {id} not found")))
    }

    /// Approve a pending request and draw its quantity from stock.
    /// Inspector and above.
    ///
    /// The decision and the stock decrement commit together; insufficient
    /// stock is a conflict and leaves the request pending.
    pub async fn approve_request(
        &self,
        ctx: &RequestContext,
        id: Uuid,
    ) -> Result<ResourceRequest, AppError> {
        self.decide(ctx, id, RequestStatus::Approved).await
    }

    /// Reject a pending request. Inspector and above.
    pub async fn reject_request(
        &self,
        ctx: &RequestContext,
        id: Uuid,
    ) -> Result<ResourceRequest, AppError> {
        self.decide(ctx, id, RequestStatus::Rejected).await
    }

    async fn decide(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        decision: RequestStatus,
    ) -> Result<ResourceRequest, AppError> {
        ctx.require(Rank::Inspector)?;
        let operation = match decision {
            RequestStatus::Approved => "approve resource request",
            _ => "reject resource request",
        };

        let mut tx = self.transactions.begin().await.map_err(failed(operation))?;

        let pending = tx
            .find_request_for_update(id)
            .await
            .map_err(failed(operation))?
            .ok_or_else(|| AppError::not_found(format!("Resource request {id} not found")))?;
        if !pending.status.can_transition_to(decision) {
            return Err(AppError::conflict(format!(
                "Request is {} and can no longer be decided",
                pending.status
            )));
        }

        let decided = tx
            .set_request_status(id, decision, ctx.officer_id())
            .await
            .map_err(failed(operation))?;

        if decision == RequestStatus::Approved {
            tx.adjust_resource_quantity(pending.resource_id, -pending.quantity)
                .await
                .map_err(failed(operation))?;
        }

        tx.commit().await.map_err(failed(operation))?;

        let tag = match decision {
            RequestStatus::Approved => action::REQUEST_APPROVE,
            _ => action::REQUEST_REJECT,
        };
        self.audit
            .record(
                ctx.officer_id(),
                tag,
                &format!(
                    "{decision} request {id} from {} for {} unit(s)",
                    pending.officer_id, pending.quantity
                ),
                ctx.ip(),
            )
            .await;
        info!(request_id = %id, decision = %decision, decided_by = %ctx.officer_id(), "Resource request decided");

        Ok(decided)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::service::tests::{manager, radios};
    use crate::testing::Fixture;
    use precinct_core::error::ErrorKind;
    use precinct_database::memory::FaultPoint;

    fn ask(resource_id: Uuid, quantity: i32) -> CreateResourceRequest {
        CreateResourceRequest {
            resource_id,
            quantity,
            reason: "Night patrol".to_string(),
            urgency: Urgency::High,
        }
    }

    #[tokio::test]
    async fn test_approval_draws_stock() {
        let dir = tempfile::tempdir().unwrap();
        let fx = Fixture::new();
        let admin = fx.officer("A-1", Rank::Admin, None).await;
        let constable = fx.officer("C-1", Rank::Constable, None).await;
        let inspector = fx.officer("I-1", Rank::Inspector, None).await;
        let resources = manager(&fx, dir.path()).await;
        let radio = resources.add_resource(&admin, radios(5), None).await.unwrap();

        let request = resources
            .create_request(&constable, ask(radio.id, 3))
            .await
            .unwrap();
        assert_eq!(request.status, RequestStatus::Pending);

        let err = resources
            .approve_request(&constable, request.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);

        let approved = resources
            .approve_request(&inspector, request.id)
            .await
            .unwrap();
        assert_eq!(approved.status, RequestStatus::Approved);
        assert_eq!(approved.approved_by.as_deref(), Some("I-1"));
        assert_eq!(
            resources.get_resource(radio.id).await.unwrap().quantity_available,
            2
        );

        // Decisions are final.
        let err = resources
            .reject_request(&inspector, request.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(fx.audit_count(action::REQUEST_APPROVE).await, 1);
    }

    #[tokio::test]
    async fn test_insufficient_stock_leaves_request_pending() {
        let dir = tempfile::tempdir().unwrap();
        let fx = Fixture::new();
        let admin = fx.officer("A-1", Rank::Admin, None).await;
        let constable = fx.officer("C-1", Rank::Constable, None).await;
        let resources = manager(&fx, dir.path()).await;
        let radio = resources.add_resource(&admin, radios(1), None).await.unwrap();
        let request = resources
            .create_request(&constable, ask(radio.id, 4))
            .await
            .unwrap();

        let err = resources.approve_request(&admin, request.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);

        let still = resources.get_request(&admin, request.id).await.unwrap();
        assert_eq!(still.status, RequestStatus::Pending);
        assert_eq!(
            resources.get_resource(radio.id).await.unwrap().quantity_available,
            1
        );
    }

    #[tokio::test]
    async fn test_failed_decrement_rolls_back_decision() {
        let dir = tempfile::tempdir().unwrap();
        let fx = Fixture::new();
        let admin = fx.officer("A-1", Rank::Admin, None).await;
        let resources = manager(&fx, dir.path()).await;
        let radio = resources.add_resource(&admin, radios(9), None).await.unwrap();
        let request = resources.create_request(&admin, ask(radio.id, 2)).await.unwrap();

        fx.memory.inject_failure(FaultPoint::ResourceAdjust).await;
        let err = resources.approve_request(&admin, request.id).await.unwrap_err();
        assert_eq!(err.message, "Failed to approve resource request.");
        fx.memory.clear_failures().await;

        let still = resources.get_request(&admin, request.id).await.unwrap();
        assert_eq!(still.status, RequestStatus::Pending);
    }

    #[tokio::test]
    async fn test_request_validation_and_scope() {
        let dir = tempfile::tempdir().unwrap();
        let fx = Fixture::new();
        let admin = fx.officer("A-1", Rank::Admin, None).await;
        let a = fx.officer("C-1", Rank::Constable, None).await;
        let b = fx.officer("C-2", Rank::Constable, None).await;
        let resources = manager(&fx, dir.path()).await;
        let radio = resources.add_resource(&admin, radios(9), None).await.unwrap();

        let err = resources.create_request(&a, ask(radio.id, 0)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        let err = resources
            .create_request(&a, ask(Uuid::new_v4(), 1))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        resources.create_request(&a, ask(radio.id, 1)).await.unwrap();
        resources.create_request(&b, ask(radio.id, 1)).await.unwrap();
        let mine = resources
            .list_requests(&a, RequestFilter::default(), &PageRequest::default())
            .await
            .unwrap();
        assert_eq!(mine.total_items, 1);
        assert!(mine.items.iter().all(|r| r.officer_id == "C-1"));
    }
}
