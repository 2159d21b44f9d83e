//! Case lifecycle and officer assignment.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use precinct_auth::AuditWriter;
use precinct_core::error::AppError;
use precinct_core::types::{PageRequest, PageResponse};
use precinct_database::store::{
    AssignmentStore, CaseStore, ComplaintStore, InvestigationStore, OfficerStore,
    TransactionSource,
};
use precinct_entity::audit::action;
use precinct_entity::case::{
    AssignmentRole, AssignmentStatus, Case, CaseAssignment, CaseFilter, CaseStatus,
    Investigation, NewAssignment, NewCase,
};
use precinct_entity::officer::{Officer, Rank};

use crate::context::RequestContext;
use crate::failure::failed;

/// Data for a case opened without a complaint.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCaseRequest {
    pub title: String,
    pub description: Option<String>,
    pub case_type: String,
    /// Lead officer; becomes the case's responsible officer.
    pub officer_id: String,
}

/// Data for adding an officer to a case.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignOfficerRequest {
    pub officer_id: String,
    #[serde(default = "supporting")]
    pub role: AssignmentRole,
}

fn supporting() -> AssignmentRole {
    AssignmentRole::SupportingOfficer
}

/// A case with everything attached to it.
#[derive(Debug, Clone, Serialize)]
pub struct CaseDetail {
    pub case: Case,
    pub assignments: Vec<CaseAssignment>,
    pub investigations: Vec<Investigation>,
}

/// Complaint intake, cases, assignments and investigations.
///
/// Officers below Inspector only see complaints they received and cases
/// they are responsible for; a row outside their scope reads as not found.
#[derive(Debug, Clone)]
pub struct CaseManager {
    pub(super) officers: Arc<dyn OfficerStore>,
    pub(super) complaints: Arc<dyn ComplaintStore>,
    pub(super) cases: Arc<dyn CaseStore>,
    pub(super) assignments: Arc<dyn AssignmentStore>,
    pub(super) investigations: Arc<dyn InvestigationStore>,
    pub(super) transactions: Arc<dyn TransactionSource>,
    pub(super) audit: AuditWriter,
}

impl CaseManager {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        officers: Arc<dyn OfficerStore>,
        complaints: Arc<dyn ComplaintStore>,
        cases: Arc<dyn CaseStore>,
        assignments: Arc<dyn AssignmentStore>,
        investigations: Arc<dyn InvestigationStore>,
        transactions: Arc<dyn TransactionSource>,
        audit: AuditWriter,
    ) -> Self {
        Self {
            officers,
            complaints,
            cases,
            assignments,
            investigations,
            transactions,
            audit,
        }
    }

    /// List cases, scoped to the caller below Inspector.
    pub async fn list_cases(
        &self,
        ctx: &RequestContext,
        filter: CaseFilter,
        page: &PageRequest,
    ) -> Result<PageResponse<Case>, AppError> {
        let filter = CaseFilter {
            officer_id: ctx.scope().or(filter.officer_id),
            ..filter
        };
        self.cases
            .list(&filter, page)
            .await
            .map_err(failed("list cases"))
    }

    /// Fetch one visible case.
    pub async fn get_case(&self, ctx: &RequestContext, id: Uuid) -> Result<Case, AppError> {
        let case = self
            .cases
            .find_by_id(id)
            .await
            .map_err(failed("load case"))?
            .filter(|c| ctx.can_see(&c.officer_id))
            .ok_or_else(|| AppError::not_found(format!("Case {id} not found")))?;
        Ok(case)
    }

    /// A visible case with its assignments and investigations.
    pub async fn case_detail(
        &self,
        ctx: &RequestContext,
        id: Uuid,
    ) -> Result<CaseDetail, AppError> {
        let case = self.get_case(ctx, id).await?;
        let assignments = self
            .assignments
            .list_for_case(id)
            .await
            .map_err(failed("load case"))?;
        let investigations = self
            .investigations
            .list_for_case(id)
            .await
            .map_err(failed("load case"))?;
        Ok(CaseDetail {
            case,
            assignments,
            investigations,
        })
    }

    /// Open a case directly with a lead investigator. Inspector and above.
    pub async fn create_case(
        &self,
        ctx: &RequestContext,
        req: CreateCaseRequest,
    ) -> Result<Case, AppError> {
        ctx.require(Rank::Inspector)?;
        let title = required(&req.title, "title")?;
        let case_type = required(&req.case_type, "case_type")?;
        let lead = self.assignable_officer(&req.officer_id).await?;

        let mut tx = self
            .transactions
            .begin()
            .await
            .map_err(failed("create case"))?;

        let case = tx
            .insert_case(NewCase {
                complaint_id: None,
                title,
                description: req.description,
                case_type,
                status: CaseStatus::Active,
                officer_id: lead.officer_id.clone(),
                created_by: ctx.officer_id().to_string(),
            })
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
                &format!("Opened case {} led by {}", case.id, lead.officer_id),
                ctx.ip(),
            )
            .await;
        info!(case_id = %case.id, lead = %lead.officer_id, "Case created");

        Ok(case)
    }

    /// Move a case to another status. Closed and Dropped are final.
    ///
    /// The responsible officer and Inspectors and above may do this.
    pub async fn update_case_status(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        status: CaseStatus,
    ) -> Result<Case, AppError> {
        let case = self.get_case(ctx, id).await?;

        if case.status.is_terminal() {
            return Err(AppError::conflict(format!(
                "Case is {} and can no longer change",
                case.status
            )));
        }
        if !case.status.can_transition_to(status) {
            return Err(AppError::conflict(format!("Case is already {status}")));
        }

        let updated = self
            .cases
            .update_status(id, status)
            .await
            .map_err(failed("update case"))?;

        self.audit
            .record(
                ctx.officer_id(),
                action::CASE_STATUS,
                &format!("Case {id}: {} -> {status}", case.status),
                ctx.ip(),
            )
            .await;
        info!(case_id = %id, from = %case.status, to = %status, "Case status changed");

        Ok(updated)
    }

    /// Assign an officer to a case. Inspector and above.
    ///
    /// Assigning a lead investigator also makes that officer responsible
    /// for the case.
    pub async fn assign_officer(
        &self,
        ctx: &RequestContext,
        case_id: Uuid,
        req: AssignOfficerRequest,
    ) -> Result<CaseAssignment, AppError> {
        ctx.require(Rank::Inspector)?;
        let officer = self.assignable_officer(&req.officer_id).await?;

        let mut tx = self
            .transactions
            .begin()
            .await
            .map_err(failed("assign officer"))?;

        let case = tx
            .find_case_for_update(case_id)
            .await
            .map_err(failed("assign officer"))?
            .ok_or_else(|| AppError::not_found(format!("Case {case_id} not found")))?;
        if case.status.is_terminal() {
            return Err(AppError::conflict(format!(
                "Case is {} and cannot take new assignments",
                case.status
            )));
        }

        let assignment = tx
            .insert_assignment(NewAssignment {
                case_id,
                officer_id: officer.officer_id.clone(),
                role: req.role,
                assigned_by: ctx.officer_id().to_string(),
            })
            .await
            .map_err(failed("assign officer"))?;

        if req.role == AssignmentRole::LeadInvestigator {
            tx.set_case_officer(case_id, &officer.officer_id)
                .await
                .map_err(failed("assign officer"))?;
        }

        tx.commit().await.map_err(failed("assign officer"))?;

        self.audit
            .record(
                ctx.officer_id(),
                action::CASE_ASSIGN,
                &format!(
                    "Assigned {} to case {case_id} as {}",
                    officer.officer_id,
                    req.role.as_str()
                ),
                ctx.ip(),
            )
            .await;
        info!(case_id = %case_id, officer_id = %officer.officer_id, role = req.role.as_str(), "Officer assigned");

        Ok(assignment)
    }

    /// Assignments on a visible case.
    pub async fn list_assignments(
        &self,
        ctx: &RequestContext,
        case_id: Uuid,
    ) -> Result<Vec<CaseAssignment>, AppError> {
        self.get_case(ctx, case_id).await?;
        self.assignments
            .list_for_case(case_id)
            .await
            .map_err(failed("list assignments"))
    }

    /// Mark an assignment completed. The assigned officer and Inspectors
    /// and above may do this.
    pub async fn complete_assignment(
        &self,
        ctx: &RequestContext,
        assignment_id: Uuid,
    ) -> Result<CaseAssignment, AppError> {
        let assignment = self
            .assignments
            .find_by_id(assignment_id)
            .await
            .map_err(failed("complete assignment"))?
            .filter(|a| ctx.can_see(&a.officer_id))
            .ok_or_else(|| {
                AppError::not_found(format!("Assignment {assignment_id} not found"))
            })?;

        if assignment.status != AssignmentStatus::Active {
            return Err(AppError::conflict("Assignment is already completed"));
        }

        let completed = self
            .assignments
            .complete(assignment_id)
            .await
            .map_err(failed("complete assignment"))?;

        self.audit
            .record(
                ctx.officer_id(),
                action::ASSIGNMENT_COMPLETE,
                &format!(
                    "Completed assignment of {} on case {}",
                    completed.officer_id, completed.case_id
                ),
                ctx.ip(),
            )
            .await;

        Ok(completed)
    }

    /// Load an officer that may take an assignment.
    pub(super) async fn assignable_officer(&self, officer_id: &str) -> Result<Officer, AppError> {
        if officer_id.trim().is_empty() {
            return Err(AppError::missing_field("officer_id"));
        }
        let officer = self
            .officers
            .find_by_id(officer_id)
            .await
            .map_err(failed("load officer"))?
            .ok_or_else(|| AppError::not_found(format!("Officer '{officer_id}' not found")))?;
        if officer.disabled {
            return Err(AppError::validation(format!(
                "Officer '{officer_id}' is disabled"
            )));
        }
        Ok(officer)
    }
}

/// Trimmed value of a required text field.
pub(super) fn required(value: &str, field: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::missing_field(field));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::testing::Fixture;
    use precinct_core::error::ErrorKind;

    pub(crate) fn manager(fx: &Fixture) -> CaseManager {
        let db = &fx.db;
        CaseManager::new(
            Arc::clone(&db.officers),
            Arc::clone(&db.complaints),
            Arc::clone(&db.cases),
            Arc::clone(&db.assignments),
            Arc::clone(&db.investigations),
            Arc::clone(&db.transactions),
            fx.audit(),
        )
    }

    fn direct(officer_id: &str) -> CreateCaseRequest {
        CreateCaseRequest {
            title: "Stolen vehicle".to_string(),
            description: None,
            case_type: "Criminal".to_string(),
            officer_id: officer_id.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_case_adds_lead_assignment() {
        let fx = Fixture::new();
        let inspector = fx.officer("I-1", Rank::Inspector, None).await;
        fx.officer("C-1", Rank::Constable, None).await;
        let cases = manager(&fx);

        let case = cases.create_case(&inspector, direct("C-1")).await.unwrap();
        assert_eq!(case.officer_id, "C-1");
        assert_eq!(case.status, CaseStatus::Active);

        let assignments = cases.list_assignments(&inspector, case.id).await.unwrap();
        assert_eq!(assignments.len(), 1);
        assert_eq!(assignments[0].role, AssignmentRole::LeadInvestigator);
        assert_eq!(fx.audit_count(action::CASE_CREATE).await, 1);
    }

    #[tokio::test]
    async fn test_sergeant_cannot_create_case() {
        let fx = Fixture::new();
        let sergeant = fx.officer("S-1", Rank::Sergeant, None).await;
        let err = manager(&fx)
            .create_case(&sergeant, direct("S-1"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
    }

    #[tokio::test]
    async fn test_listing_is_scoped_below_inspector() {
        let fx = Fixture::new();
        let inspector = fx.officer("I-1", Rank::Inspector, None).await;
        let mine = fx.officer("C-1", Rank::Constable, None).await;
        fx.officer("C-2", Rank::Constable, None).await;
        let cases = manager(&fx);

        let own = cases.create_case(&inspector, direct("C-1")).await.unwrap();
        let other = cases.create_case(&inspector, direct("C-2")).await.unwrap();

        // A constable asking for someone else's rows still only gets their own.
        let filter = CaseFilter {
            officer_id: Some("C-2".to_string()),
            ..Default::default()
        };
        let page = cases
            .list_cases(&mine, filter, &PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);
        assert!(page.items.iter().all(|c| c.officer_id == "C-1"));

        assert!(cases.get_case(&mine, own.id).await.is_ok());
        let err = cases.get_case(&mine, other.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        let all = cases
            .list_cases(&inspector, CaseFilter::default(), &PageRequest::default())
            .await
            .unwrap();
        assert_eq!(all.items.len(), 2);
    }

    #[tokio::test]
    async fn test_terminal_status_is_final() {
        let fx = Fixture::new();
        let inspector = fx.officer("I-1", Rank::Inspector, None).await;
        let cases = manager(&fx);
        let case = cases.create_case(&inspector, direct("I-1")).await.unwrap();

        cases
            .update_case_status(&inspector, case.id, CaseStatus::Closed)
            .await
            .unwrap();
        let err = cases
            .update_case_status(&inspector, case.id, CaseStatus::Active)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(fx.audit_count(action::CASE_STATUS).await, 1);
    }

    #[tokio::test]
    async fn test_duplicate_active_assignment_conflicts() {
        let fx = Fixture::new();
        let inspector = fx.officer("I-1", Rank::Inspector, None).await;
        fx.officer("C-1", Rank::Constable, None).await;
        fx.officer("C-2", Rank::Constable, None).await;
        let cases = manager(&fx);
        let case = cases.create_case(&inspector, direct("C-1")).await.unwrap();

        let req = AssignOfficerRequest {
            officer_id: "C-2".to_string(),
            role: AssignmentRole::SupportingOfficer,
        };
        let first = cases
            .assign_officer(&inspector, case.id, req.clone())
            .await
            .unwrap();
        let err = cases
            .assign_officer(&inspector, case.id, req.clone())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);

        // Once completed, the officer may be assigned again.
        cases.complete_assignment(&inspector, first.id).await.unwrap();
        cases.assign_officer(&inspector, case.id, req).await.unwrap();
        assert_eq!(fx.audit_count(action::CASE_ASSIGN).await, 2);
    }

    #[tokio::test]
    async fn test_lead_assignment_moves_case() {
        let fx = Fixture::new();
        let inspector = fx.officer("I-1", Rank::Inspector, None).await;
        fx.officer("C-1", Rank::Constable, None).await;
        fx.officer("C-2", Rank::Constable, None).await;
        let cases = manager(&fx);
        let case = cases.create_case(&inspector, direct("C-1")).await.unwrap();

        cases
            .assign_officer(
                &inspector,
                case.id,
                AssignOfficerRequest {
                    officer_id: "C-2".to_string(),
                    role: AssignmentRole::LeadInvestigator,
                },
            )
            .await
            .unwrap();
        let moved = cases.get_case(&inspector, case.id).await.unwrap();
        assert_eq!(moved.officer_id, "C-2");
    }

    #[tokio::test]
    async fn test_unknown_officer_not_found() {
        let fx = Fixture::new();
        let inspector = fx.officer("I-1", Rank::Inspector, None).await;
        let err = manager(&fx)
            .create_case(&inspector, direct("ghost"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
