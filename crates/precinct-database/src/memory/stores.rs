//! Table-level store traits for [`MemoryDatabase`].

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use precinct_core::error::AppError;
use precinct_core::result::AppResult;
use precinct_core::types::{PageRequest, PageResponse};
use precinct_entity::audit::{AccessLogEntry, AccessLogFilter, NewAccessLogEntry};
use precinct_entity::case::{
    AssignmentStatus, Case, CaseAssignment, CaseFilter, CaseStatus, Investigation,
    InvestigationFilter, InvestigationStatus, NewInvestigation,
};
use precinct_entity::complaint::{Complaint, ComplaintFilter, ComplaintStatus, NewComplaint};
use precinct_entity::duty::{Duty, DutyFilter};
use precinct_entity::officer::{NewOfficer, Officer, OfficerFilter, OfficerUpdate};
use precinct_entity::resource::{
    NewResource, NewResourceRequest, RequestFilter, Resource, ResourceFilter, ResourceRequest,
};

use super::{FaultPoint, MemoryDatabase};
use crate::store::{
    AssignmentStore, AuditStore, CaseStore, ComplaintStore, DutyStore, InvestigationStore,
    OfficerStore, RequestStore, ResourceStore,
};

fn officer_not_found(officer_id: &str) -> AppError {
    AppError::not_found(format!("Officer '{officer_id}' not found"))
}

#[async_trait]
impl OfficerStore for MemoryDatabase {
    async fn find_by_id(&self, officer_id: &str) -> AppResult<Option<Officer>> {
        Ok(self.state.read().await.officers.get(officer_id).cloned())
    }

    async fn list(
        &self,
        filter: &OfficerFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Officer>> {
        let state = self.state.read().await;
        let matching = state
            .officers
            .values()
            .filter(|o| filter.matches(o))
            .cloned()
            .collect();
        Ok(PageResponse::from_vec(matching, page))
    }

    async fn insert(&self, officer: NewOfficer) -> AppResult<Officer> {
        let mut state = self.state.write().await;
        if state.officers.contains_key(&officer.officer_id) {
            return Err(AppError::conflict(format!(
                "Officer id '{}' already exists",
                officer.officer_id
            )));
        }
        let now = Utc::now();
        let row = Officer {
            officer_id: officer.officer_id,
            name: officer.name,
            gender: officer.gender,
            rank: officer.rank,
            designation: officer.designation,
            email: officer.email,
            phone: officer.phone,
            password_hash: officer.password_hash,
            disabled: false,
            created_at: now,
            updated_at: now,
        };
        state.officers.insert(row.officer_id.clone(), row.clone());
        Ok(row)
    }

    async fn update_profile(
        &self,
        officer_id: &str,
        update: &OfficerUpdate,
    ) -> AppResult<Officer> {
        let mut state = self.state.write().await;
        let officer = state
            .officers
            .get_mut(officer_id)
            .ok_or_else(|| officer_not_found(officer_id))?;
        update.apply_to(officer);
        officer.updated_at = Utc::now();
        Ok(officer.clone())
    }

    async fn set_password_hash(&self, officer_id: &str, password_hash: &str) -> AppResult<()> {
        let mut state = self.state.write().await;
        let officer = state
            .officers
            .get_mut(officer_id)
            .ok_or_else(|| officer_not_found(officer_id))?;
        officer.password_hash = password_hash.to_string();
        officer.updated_at = Utc::now();
        Ok(())
    }

    async fn set_disabled(&self, officer_id: &str, disabled: bool) -> AppResult<Officer> {
        let mut state = self.state.write().await;
        let officer = state
            .officers
            .get_mut(officer_id)
            .ok_or_else(|| officer_not_found(officer_id))?;
        officer.disabled = disabled;
        officer.updated_at = Utc::now();
        Ok(officer.clone())
    }
}

#[async_trait]
impl ComplaintStore for MemoryDatabase {
    async fn insert(&self, complaint: NewComplaint) -> AppResult<Complaint> {
        let row = complaint.into_complaint(Utc::now());
        self.state.write().await.complaints.push(row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Complaint>> {
        let state = self.state.read().await;
        Ok(state.complaints.iter().find(|c| c.id == id).cloned())
    }

    async fn list(
        &self,
        filter: &ComplaintFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Complaint>> {
        let state = self.state.read().await;
        let matching = state
            .complaints
            .iter()
            .rev()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect();
        Ok(PageResponse::from_vec(matching, page))
    }

    async fn update_status(&self, id: Uuid, status: ComplaintStatus) -> AppResult<Complaint> {
        self.check(FaultPoint::ComplaintUpdate).await?;
        let mut state = self.state.write().await;
        let complaint = state
            .complaints
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::not_found(format!("Complaint {id} not found")))?;
        complaint.status = status;
        complaint.updated_at = Utc::now();
        Ok(complaint.clone())
    }
}

#[async_trait]
impl CaseStore for MemoryDatabase {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Case>> {
        let state = self.state.read().await;
        Ok(state.cases.iter().find(|c| c.id == id).cloned())
    }

    async fn list(&self, filter: &CaseFilter, page: &PageRequest) -> AppResult<PageResponse<Case>> {
        let state = self.state.read().await;
        let matching = state
            .cases
            .iter()
            .rev()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect();
        Ok(PageResponse::from_vec(matching, page))
    }

    async fn update_status(&self, id: Uuid, status: CaseStatus) -> AppResult<Case> {
        let mut state = self.state.write().await;
        let case = state
            .cases
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::not_found(format!("Case {id} not found")))?;
        let now = Utc::now();
        case.status = status;
        case.updated_at = now;
        if status.is_terminal() {
            case.closed_at = Some(now);
        }
        Ok(case.clone())
    }
}

#[async_trait]
impl AssignmentStore for MemoryDatabase {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<CaseAssignment>> {
        let state = self.state.read().await;
        Ok(state.assignments.iter().find(|a| a.id == id).cloned())
    }

    async fn find_active(
        &self,
        case_id: Uuid,
        officer_id: &str,
    ) -> AppResult<Option<CaseAssignment>> {
        let state = self.state.read().await;
        Ok(state
            .assignments
            .iter()
            .find(|a| {
                a.case_id == case_id
                    && a.officer_id == officer_id
                    && a.status == AssignmentStatus::Active
            })
            .cloned())
    }

    async fn list_for_case(&self, case_id: Uuid) -> AppResult<Vec<CaseAssignment>> {
        let state = self.state.read().await;
        Ok(state
            .assignments
            .iter()
            .filter(|a| a.case_id == case_id)
            .cloned()
            .collect())
    }

    async fn complete(&self, id: Uuid) -> AppResult<CaseAssignment> {
        let mut state = self.state.write().await;
        let assignment = state
            .assignments
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| AppError::not_found(format!("Assignment {id} not found")))?;
        assignment.status = AssignmentStatus::Completed;
        assignment.completed_at = Some(Utc::now());
        Ok(assignment.clone())
    }
}

#[async_trait]
impl InvestigationStore for MemoryDatabase {
    async fn insert(&self, investigation: NewInvestigation) -> AppResult<Investigation> {
        let row = Investigation {
            id: Uuid::new_v4(),
            case_id: investigation.case_id,
            lead_officer_id: investigation.lead_officer_id,
            status: InvestigationStatus::Open,
            findings: None,
            due_date: investigation.due_date,
            opened_at: Utc::now(),
            completed_at: None,
        };
        self.state.write().await.investigations.push(row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Investigation>> {
        let state = self.state.read().await;
        Ok(state.investigations.iter().find(|i| i.id == id).cloned())
    }

    async fn list_for_case(&self, case_id: Uuid) -> AppResult<Vec<Investigation>> {
        let state = self.state.read().await;
        Ok(state
            .investigations
            .iter()
            .rev()
            .filter(|i| i.case_id == case_id)
            .cloned()
            .collect())
    }

    async fn list(
        &self,
        filter: &InvestigationFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Investigation>> {
        let state = self.state.read().await;
        let matching = state
            .investigations
            .iter()
            .rev()
            .filter(|i| filter.matches(i))
            .cloned()
            .collect();
        Ok(PageResponse::from_vec(matching, page))
    }

    async fn complete(&self, id: Uuid, findings: &str) -> AppResult<Investigation> {
        let mut state = self.state.write().await;
        let investigation = state
            .investigations
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| AppError::not_found(format!("Investigation {id} not found")))?;
        investigation.status = InvestigationStatus::Completed;
        investigation.findings = Some(findings.to_string());
        investigation.completed_at = Some(Utc::now());
        Ok(investigation.clone())
    }
}

#[async_trait]
impl ResourceStore for MemoryDatabase {
    async fn insert(&self, resource: NewResource) -> AppResult<Resource> {
        let row = resource.into_resource(Utc::now());
        self.state.write().await.resources.push(row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Resource>> {
        let state = self.state.read().await;
        Ok(state.resources.iter().find(|r| r.id == id).cloned())
    }

    async fn list(
        &self,
        filter: &ResourceFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Resource>> {
        let state = self.state.read().await;
        let mut matching: Vec<Resource> = state
            .resources
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(PageResponse::from_vec(matching, page))
    }

    async fn set_quantity(&self, id: Uuid, quantity: i32) -> AppResult<Resource> {
        let mut state = self.state.write().await;
        let resource = state
            .resources
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::not_found(format!("Resource {id} not found")))?;
        resource.quantity_available = quantity;
        resource.updated_at = Utc::now();
        Ok(resource.clone())
    }
}

#[async_trait]
impl RequestStore for MemoryDatabase {
    async fn insert(&self, request: NewResourceRequest) -> AppResult<ResourceRequest> {
        let row = request.into_request(Utc::now());
        self.state.write().await.requests.push(row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ResourceRequest>> {
        let state = self.state.read().await;
        Ok(state.requests.iter().find(|r| r.id == id).cloned())
    }

    async fn list(
        &self,
        filter: &RequestFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ResourceRequest>> {
        let state = self.state.read().await;
        let matching = state
            .requests
            .iter()
            .rev()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        Ok(PageResponse::from_vec(matching, page))
    }
}

#[async_trait]
impl DutyStore for MemoryDatabase {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Duty>> {
        let state = self.state.read().await;
        Ok(state.duties.iter().find(|d| d.id == id).cloned())
    }

    async fn list(&self, filter: &DutyFilter, page: &PageRequest) -> AppResult<PageResponse<Duty>> {
        let state = self.state.read().await;
        let mut matching: Vec<Duty> = state
            .duties
            .iter()
            .filter(|d| filter.matches(d))
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.duty_date.cmp(&b.duty_date).then(a.shift.cmp(&b.shift)));
        Ok(PageResponse::from_vec(matching, page))
    }

    async fn resources_for(&self, duty_id: Uuid) -> AppResult<Vec<Uuid>> {
        let state = self.state.read().await;
        Ok(state
            .duty_resources
            .iter()
            .filter(|link| link.duty_id == duty_id)
            .map(|link| link.resource_id)
            .collect())
    }
}

#[async_trait]
impl AuditStore for MemoryDatabase {
    async fn append(&self, entry: NewAccessLogEntry) -> AppResult<AccessLogEntry> {
        self.check(FaultPoint::AuditAppend).await?;
        let row = entry.into_entry(Utc::now());
        self.state.write().await.access_logs.push(row.clone());
        Ok(row)
    }

    async fn list(
        &self,
        filter: &AccessLogFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<AccessLogEntry>> {
        let state = self.state.read().await;
        let matching = state
            .access_logs
            .iter()
            .rev()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect();
        Ok(PageResponse::from_vec(matching, page))
    }
}
