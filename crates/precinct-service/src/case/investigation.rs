//! Investigations opened against cases.

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use precinct_core::error::AppError;
use precinct_core::types::{PageRequest, PageResponse};
use precinct_entity::audit::action;
use precinct_entity::case::{
    Investigation, InvestigationFilter, InvestigationStatus, NewInvestigation,
};
use precinct_entity::officer::Rank;

use super::service::{CaseManager, required};
use crate::context::RequestContext;
use crate::failure::failed;

#[derive(Debug, Clone, Deserialize)]
pub struct OpenInvestigationRequest {
    pub lead_officer_id: String,
    pub due_date: Option<NaiveDate>,
}

impl CaseManager {
    /// Open an investigation on a live case. Inspector and above.
    pub async fn open_investigation(
        &self,
        ctx: &RequestContext,
        case_id: Uuid,
        req: OpenInvestigationRequest,
    ) -> Result<Investigation, AppError> {
        ctx.require(Rank::Inspector)?;
        let case = self.get_case(ctx, case_id).await?;
        if case.status.is_terminal() {
            return Err(AppError::conflict(format!(
                "Case is {} and cannot be investigated",
                case.status
            )));
        }
        let lead = self.assignable_officer(&req.lead_officer_id).await?;

        let investigation = self
            .investigations
            .insert(NewInvestigation {
                case_id,
                lead_officer_id: lead.officer_id,
                due_date: req.due_date,
            })
            .await
            .map_err(failed("open investigation"))?;

        self.audit
            .record(
                ctx.officer_id(),
                action::INVESTIGATION_OPEN,
                &format!(
                    "Opened investigation {} on case {case_id}",
                    investigation.id
                ),
                ctx.ip(),
            )
            .await;
        info!(investigation_id = %investigation.id, case_id = %case_id, "Investigation opened");

        Ok(investigation)
    }

    /// Record findings and close an open investigation. The lead officer
    /// and Inspectors and above may do this.
    pub async fn complete_investigation(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        findings: &str,
    ) -> Result<Investigation, AppError> {
        let findings = required(findings, "findings")?;
        let investigation = self.get_investigation(ctx, id).await?;
        if investigation.status != InvestigationStatus::Open {
            return Err(AppError::conflict("Investigation is already completed"));
        }

        let completed = self
            .investigations
            .complete(id, &findings)
            .await
            .map_err(failed("complete investigation"))?;

        self.audit
            .record(
                ctx.officer_id(),
                action::INVESTIGATION_COMPLETE,
                &format!("Completed investigation {id}"),
                ctx.ip(),
            )
            .await;

        Ok(completed)
    }

    /// Fetch one visible investigation.
    pub async fn get_investigation(
        &self,
        ctx: &RequestContext,
        id: Uuid,
    ) -> Result<Investigation, AppError> {
        self.investigations
            .find_by_id(id)
            .await
            .map_err(failed("load investigation"))?
            .filter(|i| ctx.can_see(&i.lead_officer_id))
            .ok_or_else(|| AppError::not_found(format!("Investigation {id} not found")))
    }

    /// List investigations, scoped to the lead officer below Inspector.
    pub async fn list_investigations(
        &self,
        ctx: &RequestContext,
        filter: InvestigationFilter,
        page: &PageRequest,
    ) -> Result<PageResponse<Investigation>, AppError> {
        let filter = InvestigationFilter {
            lead_officer_id: ctx.scope().or(filter.lead_officer_id),
            ..filter
        };
        self.investigations
            .list(&filter, page)
            .await
            .map_err(failed("list investigations"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::CreateCaseRequest;
    use crate::case::service::tests::manager;
    use crate::testing::Fixture;
    use precinct_core::error::ErrorKind;

    #[tokio::test]
    async fn test_open_and_complete() {
        let fx = Fixture::new();
        let superior = fx.officer("I-9", Rank::Inspector, Some("CID")).await;
        let detective = fx.officer("C-3", Rank::Constable, Some("CID")).await;
        let cases = manager(&fx);
        let case = cases
            .create_case(
                &superior,
                CreateCaseRequest {
                    title: "Warehouse fraud".to_string(),
                    description: None,
                    case_type: "Fraud".to_string(),
                    officer_id: "C-3".to_string(),
                },
            )
            .await
            .unwrap();

        let opened = cases
            .open_investigation(
                &superior,
                case.id,
                OpenInvestigationRequest {
                    lead_officer_id: "C-3".to_string(),
                    due_date: NaiveDate::from_ymd_opt(2026, 12, 1),
                },
            )
            .await
            .unwrap();
        assert_eq!(opened.status, InvestigationStatus::Open);

        let mine = cases
            .list_investigations(&detective, InvestigationFilter::default(), &PageRequest::default())
            .await
            .unwrap();
        assert_eq!(mine.total_items, 1);

        let err = cases
            .complete_investigation(&detective, opened.id, "  ")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let done = cases
            .complete_investigation(&detective, opened.id, "Invoices were forged")
            .await
            .unwrap();
        assert_eq!(done.status, InvestigationStatus::Completed);

        let err = cases
            .complete_investigation(&detective, opened.id, "again")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(fx.audit_count(action::INVESTIGATION_COMPLETE).await, 1);
    }
}
