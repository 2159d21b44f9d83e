//! Complaint intake and turning complaints into cases.

use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use precinct_core::error::AppError;
use precinct_core::types::{PageRequest, PageResponse};
use precinct_entity::audit::action;
use precinct_entity::case::{AssignmentRole, Case, CaseStatus, NewAssignment, NewCase};
use precinct_entity::complaint::{Complaint, ComplaintFilter, ComplaintStatus, NewComplaint};
use precinct_entity::officer::Rank;

use super::service::{CaseManager, required};
use crate::context::RequestContext;
use crate::failure::failed;

/// A citizen complaint as taken at the desk.
#[derive(Debug, Clone, Deserialize)]
pub struct FileComplaintRequest {
    pub complainant_name: String,
    pub complainant_contact: Option<String>,
    pub complaint_type: String,
    pub location: Option<String>,
    pub description: String,
}

/// Case details when converting a complaint. Missing fields are taken
/// from the complaint.
#[derive(Debug, Clone, Deserialize)]
pub struct CaseFromComplaintRequest {
    pub title: Option<String>,
    pub case_type: Option<String>,
    pub description: Option<String>,
    /// Lead officer for the new case.
    pub officer_id: String,
}

impl CaseManager {
    /// Record a complaint received by the caller.
    pub async fn file_complaint(
        &self,
        ctx: &RequestContext,
        req: FileComplaintRequest,
    ) -> Result<Complaint, AppError> {
        let complainant_name = required(&req.complainant_name, "complainant_name")?;
        let complaint_type = required(&req.complaint_type, "complaint_type")?;
        let description = required(&req.description, "description")?;

        let complaint = self
            .complaints
            .insert(NewComplaint {
                complainant_name,
                complainant_contact: req.complainant_contact,
                complaint_type,
                location: req.location,
                description,
                officer_id: ctx.officer_id().to_string(),
            })
            .await
            .map_err(failed("file complaint"))?;

        self.audit
            .record(
                ctx.officer_id(),
                action::COMPLAINT_FILE,
                &format!(
                    "Filed {} complaint {}",
                    complaint.complaint_type, complaint.id
                ),
                ctx.ip(),
            )
            .await;
        info!(complaint_id = %complaint.id, officer_id = %ctx.officer_id(), "Complaint filed");

        Ok(complaint)
    }

    /// List complaints, scoped to the receiving officer below Inspector.
    pub async fn list_complaints(
        &self,
        ctx: &RequestContext,
        filter: ComplaintFilter,
        page: &PageRequest,
    ) -> Result<PageResponse<Complaint>, AppError> {
        let filter = ComplaintFilter {
            officer_id: ctx.scope().or(filter.officer_id),
            ..filter
        };
        self.complaints
            .list(&filter, page)
            .await
            .map_err(failed("list complaints"))
    }

    /// Fetch one visible complaint.
    pub async fn get_complaint(
        &self,
        ctx: &RequestContext,
        id: Uuid,
    ) -> Result<Complaint, AppError> {
        self.complaints
            .find_by_id(id)
            .await
            .map_err(failed("load complaint"))?
            .filter(|c| ctx.can_see(&c.officer_id))
            .ok_or_else(|| AppError::not_found(format!("Complaint {id} not found")))
    }

    /// Close a complaint without a case (Resolved or Rejected).
    /// Inspector and above.
    pub async fn update_complaint_status(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        status: ComplaintStatus,
    ) -> Result<Complaint, AppError> {
        ctx.require(Rank::Inspector)?;
        if status == ComplaintStatus::AssignedAsCase {
            return Err(AppError::validation(
                "Complaints become cases through case creation",
            ));
        }

        let complaint = self.get_complaint(ctx, id).await?;
        if !complaint.status.can_transition_to(status) {
            return Err(AppError::conflict(format!(
                "Complaint is {} and cannot become {status}",
                complaint.status
            )));
        }

        let updated = self
            .complaints
            .update_status(id, status)
            .await
            .map_err(failed("update complaint"))?;

        self.audit
            .record(
                ctx.officer_id(),
                action::COMPLAINT_STATUS,
                &format!("Complaint {id}: {} -> {status}", complaint.status),
                ctx.ip(),
            )
            .await;

        Ok(updated)
    }

    /// Open a case from a complaint waiting for action. Inspector and above.
    ///
    /// The case insert, the complaint status change and the lead assignment
    /// commit together or not at all.
    pub async fn create_case_from_complaint(
        &self,
        ctx: &RequestContext,
        complaint_id: Uuid,
        req: CaseFromComplaintRequest,
    ) -> Result<Case, AppError> {
        ctx.require(Rank::Inspector)?;
        let lead = self.assignable_officer(&req.officer_id).await?;

        let mut tx = self
            .transactions
            .begin()
            .await
            .map_err(failed("create case"))?;

        let complaint = tx
            .find_complaint_for_update(complaint_id)
            .await
            .map_err(failed("create case"))?
            .ok_or_else(|| AppError::not_found(format!("Complaint {complaint_id} not found")))?;

        if complaint.status != ComplaintStatus::WaitingForAction {
            return Err(AppError::conflict(format!(
                "Complaint is {} and cannot become a case",
                complaint.status
            )));
        }

        let title = match req.title.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => format!(
                "{} complaint from {}",
                complaint.complaint_type, complaint.complainant_name
            ),
        };
        let case_type = match req.case_type.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => complaint.complaint_type.clone(),
        };

        let case = tx
            .insert_case(NewCase {
                complaint_id: Some(complaint.id),
                title,
                description: req.description.or(Some(complaint.description.clone())),
                case_type,
                status: CaseStatus::Active,
                officer_id: lead.officer_id.clone(),
                created_by: ctx.officer_id().to_string(),
            })
            .await
            .map_err(failed("create case"))?;

        tx.update_complaint_status(complaint.id, ComplaintStatus::AssignedAsCase)
            .await
            .map_err(failed("create case"))?;

        tx.insert_assignment(NewAssignment {
            case_id: case.id,
            officer_id: lead.officer_id.clone(),
            role: AssignmentRole::LeadInvestigator,
            assigned_by: ctx.officer_id().to_string(),
        })
        .await
        .map_err(failed("create case"))?;

        tx.commit().await.map_err(failed("create case"))?;

        self.audit
            .record(
                ctx.officer_id(),
                action::CASE_CREATE,
                &format!(
                    "Opened case {} from complaint {} led by {}",
                    case.id, complaint.id, lead.officer_id
                ),
                ctx.ip(),
            )
            .await;
        info!(
            case_id = %case.id,
            complaint_id = %complaint.id,
            lead = %lead.officer_id,
            "Case created from complaint"
        );

        Ok(case)
    }
}
