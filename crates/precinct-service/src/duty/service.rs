//! Duty scheduling.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use precinct_auth::AuditWriter;
use precinct_core::error::AppError;
use precinct_core::types::{PageRequest, PageResponse};
use precinct_database::store::{DutyStore, OfficerStore, ResourceStore, TransactionSource};
use precinct_entity::audit::action;
use precinct_entity::duty::{Duty, DutyFilter, NewDuty};
use precinct_entity::officer::Rank;

use crate::context::RequestContext;
use crate::failure::failed;

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleDutyRequest {
    pub officer_id: String,
    pub duty_date: NaiveDate,
    pub shift: String,
    pub location: String,
    pub notes: Option<String>,
    /// Inventory items issued for the duty.
    #[serde(default)]
    pub resource_ids: Vec<Uuid>,
}

/// A duty with the resources issued for it.
#[derive(Debug, Clone, Serialize)]
pub struct DutyDetail {
    pub duty: Duty,
    pub resource_ids: Vec<Uuid>,
}

/// Schedules officers onto dated shifts.
#[derive(Debug, Clone)]
pub struct DutyManager {
    officers: Arc<dyn OfficerStore>,
    resources: Arc<dyn ResourceStore>,
    duties: Arc<dyn DutyStore>,
    transactions: Arc<dyn TransactionSource>,
    audit: AuditWriter,
}

impl DutyManager {
    pub fn new(
        officers: Arc<dyn OfficerStore>,
        resources: Arc<dyn ResourceStore>,
        duties: Arc<dyn DutyStore>,
        transactions: Arc<dyn TransactionSource>,
        audit: AuditWriter,
    ) -> Self {
        Self {
            officers,
            resources,
            duties,
            transactions,
            audit,
        }
    }

    /// Schedule a duty and link its resources in one transaction.
    /// Sergeant and above.
    pub async fn schedule(
        &self,
        ctx: &RequestContext,
        req: ScheduleDutyRequest,
    ) -> Result<DutyDetail, AppError> {
        ctx.require(Rank::Sergeant)?;

        let shift = req.shift.trim();
        if shift.is_empty() {
            return Err(AppError::missing_field("shift"));
        }
        let location = req.location.trim();
        if location.is_empty() {
            return Err(AppError::missing_field("location"));
        }
        if req.officer_id.trim().is_empty() {
            return Err(AppError::missing_field("officer_id"));
        }

        let officer = self
            .officers
            .find_by_id(&req.officer_id)
            .await
            .map_err(failed("schedule duty"))?
            .ok_or_else(|| {
                AppError::not_found(format!("Officer '{}' not found", req.officer_id))
            })?;
        if officer.disabled {
            return Err(AppError::validation(format!(
                "Officer '{}' is disabled",
                officer.officer_id
            )));
        }

        let mut resource_ids = req.resource_ids;
        resource_ids.sort_unstable();
        resource_ids.dedup();
        for id in &resource_ids {
            self.resources
                .find_by_id(*id)
                .await
                .map_err(failed("schedule duty"))?
                .ok_or_else(|| AppError::not_found(format!("Resource {id} not found")))?;
        }

        let new_duty = NewDuty {
            officer_id: officer.officer_id,
            duty_date: req.duty_date,
            shift: shift.to_string(),
            location: location.to_string(),
            notes: req.notes,
            assigned_by: ctx.officer_id().to_string(),
            resource_ids,
        };

        let mut tx = self
            .transactions
            .begin()
            .await
            .map_err(failed("schedule duty"))?;
        let duty = tx
            .insert_duty(&new_duty)
            .await
            .map_err(failed("schedule duty"))?;
        for resource_id in &new_duty.resource_ids {
            tx.link_duty_resource(duty.id, *resource_id)
                .await
                .map_err(failed("schedule duty"))?;
        }
        tx.commit().await.map_err(failed("schedule duty"))?;

        self.audit
            .record(
                ctx.officer_id(),
                action::DUTY_SCHEDULE,
                &format!(
                    "Scheduled {} on {} ({}) at {}",
                    duty.officer_id, duty.duty_date, duty.shift, duty.location
                ),
                ctx.ip(),
            )
            .await;
        info!(duty_id = %duty.id, officer_id = %duty.officer_id, date = %duty.duty_date, "Duty scheduled");

        Ok(DutyDetail {
            duty,
            resource_ids: new_duty.resource_ids,
        })
    }

    /// List duties in a date range, scoped to the caller below Inspector.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        filter: DutyFilter,
        page: &PageRequest,
    ) -> Result<PageResponse<Duty>, AppError> {
        if let (Some(from), Some(to)) = (filter.from, filter.to) {
            if from > to {
                return Err(AppError::validation("'from' must not be after 'to'"));
            }
        }
        let filter = DutyFilter {
            officer_id: ctx.scope().or(filter.officer_id),
            ..filter
        };
        self.duties
            .list(&filter, page)
            .await
            .map_err(failed("list duties"))
    }

    /// One visible duty with its resources.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<DutyDetail, AppError> {
        let duty = self
            .duties
            .find_by_id(id)
            .await
            .map_err(failed("load duty"))?
            .filter(|d| ctx.can_see(&d.officer_id))
            .ok_or_else(|| AppError::not_found(format!("Duty {id} not found")))?;
        let resource_ids = self
            .duties
            .resources_for(id)
            .await
            .map_err(failed("load duty"))?;
        Ok(DutyDetail { duty, resource_ids })
    }
}
