//! Store traits implemented by every persistence backend.
//!
//! Each trait covers one table (or a small family of tables). Writes that
//! must land together go through [`StoreTransaction`] instead.

pub mod metric;
pub mod transaction;

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use precinct_core::result::AppResult;
use precinct_core::types::{PageRequest, PageResponse};
use precinct_entity::audit::{AccessLogEntry, AccessLogFilter, NewAccessLogEntry};
use precinct_entity::case::{
    Case, CaseAssignment, CaseFilter, CaseStatus, Investigation, InvestigationFilter,
    NewInvestigation,
};
use precinct_entity::complaint::{Complaint, ComplaintFilter, ComplaintStatus, NewComplaint};
use precinct_entity::duty::{Duty, DutyFilter};
use precinct_entity::officer::{NewOfficer, Officer, OfficerFilter, OfficerUpdate, Rank};
use precinct_entity::resource::{
    NewResource, NewResourceRequest, RequestFilter, Resource, ResourceFilter, ResourceRequest,
};

pub use metric::Metric;
pub use transaction::{StoreTransaction, TransactionSource};

/// Officer accounts (`userlogin`).
#[async_trait]
pub trait OfficerStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find an officer by badge id.
    async fn find_by_id(&self, officer_id: &str) -> AppResult<Option<Officer>>;

    /// List officers matching `filter`, ordered by id.
    async fn list(
        &self,
        filter: &OfficerFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Officer>>;

    /// Insert a new officer. A duplicate id is a conflict.
    async fn insert(&self, officer: NewOfficer) -> AppResult<Officer>;

    /// Apply a profile update and return the new row.
    async fn update_profile(&self, officer_id: &str, update: &OfficerUpdate)
    -> AppResult<Officer>;

    /// Replace the password hash.
    async fn set_password_hash(&self, officer_id: &str, password_hash: &str) -> AppResult<()>;

    /// Set or clear the disabled flag.
    async fn set_disabled(&self, officer_id: &str, disabled: bool) -> AppResult<Officer>;
}

/// Citizen complaints (`complaints`).
#[async_trait]
pub trait ComplaintStore: Send + Sync + std::fmt::Debug + 'static {
    /// Record a new complaint.
    async fn insert(&self, complaint: NewComplaint) -> AppResult<Complaint>;

    /// Find a complaint by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Complaint>>;

    /// List complaints, newest first.
    async fn list(
        &self,
        filter: &ComplaintFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Complaint>>;

    /// Change the status of a complaint outside of case creation.
    async fn update_status(&self, id: Uuid, status: ComplaintStatus) -> AppResult<Complaint>;
}

/// Cases (`case_table`).
#[async_trait]
pub trait CaseStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a case by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Case>>;

    /// List cases, newest first.
    async fn list(&self, filter: &CaseFilter, page: &PageRequest) -> AppResult<PageResponse<Case>>;

    /// Change the status; terminal statuses also stamp `closed_at`.
    async fn update_status(&self, id: Uuid, status: CaseStatus) -> AppResult<Case>;
}

/// Officer assignments to cases (`case_assignments`).
#[async_trait]
pub trait AssignmentStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find an assignment by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<CaseAssignment>>;

    /// Find the active assignment of `officer_id` on `case_id`, if any.
    async fn find_active(&self, case_id: Uuid, officer_id: &str)
    -> AppResult<Option<CaseAssignment>>;

    /// All assignments on a case, oldest first.
    async fn list_for_case(&self, case_id: Uuid) -> AppResult<Vec<CaseAssignment>>;

    /// Mark an assignment completed.
    async fn complete(&self, id: Uuid) -> AppResult<CaseAssignment>;
}

/// Investigations (`investigation`).
#[async_trait]
pub trait InvestigationStore: Send + Sync + std::fmt::Debug + 'static {
    /// Open an investigation.
    async fn insert(&self, investigation: NewInvestigation) -> AppResult<Investigation>;

    /// Find an investigation by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Investigation>>;

    /// All investigations on a case, newest first.
    async fn list_for_case(&self, case_id: Uuid) -> AppResult<Vec<Investigation>>;

    /// List investigations, newest first.
    async fn list(
        &self,
        filter: &InvestigationFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Investigation>>;

    /// Record findings and mark completed.
    async fn complete(&self, id: Uuid, findings: &str) -> AppResult<Investigation>;
}

/// Inventory (`resources`).
#[async_trait]
pub trait ResourceStore: Send + Sync + std::fmt::Debug + 'static {
    /// Add an inventory item.
    async fn insert(&self, resource: NewResource) -> AppResult<Resource>;

    /// Find an item by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Resource>>;

    /// List items by name.
    async fn list(
        &self,
        filter: &ResourceFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Resource>>;

    /// Overwrite the available quantity.
    async fn set_quantity(&self, id: Uuid, quantity: i32) -> AppResult<Resource>;
}

/// Allocation requests (`resource_requests`).
#[async_trait]
pub trait RequestStore: Send + Sync + std::fmt::Debug + 'static {
    /// File a pending request.
    async fn insert(&self, request: NewResourceRequest) -> AppResult<ResourceRequest>;

    /// Find a request by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ResourceRequest>>;

    /// List requests, newest first.
    async fn list(
        &self,
        filter: &RequestFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ResourceRequest>>;
}

/// Duty roster (`duties`, `duty_resources`).
#[async_trait]
pub trait DutyStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a duty by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Duty>>;

    /// List duties by date, then shift.
    async fn list(&self, filter: &DutyFilter, page: &PageRequest) -> AppResult<PageResponse<Duty>>;

    /// Ids of resources issued for a duty.
    async fn resources_for(&self, duty_id: Uuid) -> AppResult<Vec<Uuid>>;
}

/// Append-only audit trail (`access_logs`).
#[async_trait]
pub trait AuditStore: Send + Sync + std::fmt::Debug + 'static {
    /// Append one entry.
    async fn append(&self, entry: NewAccessLogEntry) -> AppResult<AccessLogEntry>;

    /// List entries, newest first.
    async fn list(
        &self,
        filter: &AccessLogFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<AccessLogEntry>>;
}

/// Read-only statistics queries behind the dashboards.
#[async_trait]
pub trait StatsStore: Send + Sync + std::fmt::Debug + 'static {
    /// Evaluate one counting metric.
    async fn count(&self, metric: &Metric) -> AppResult<i64>;

    /// Most recent cases, optionally only those of one officer.
    async fn recent_cases(&self, officer_id: Option<&str>, limit: i64) -> AppResult<Vec<Case>>;

    /// Most recent complaints.
    async fn recent_complaints(&self, limit: i64) -> AppResult<Vec<Complaint>>;

    /// Most recent investigations, optionally only those led by one officer.
    async fn recent_investigations(
        &self,
        lead_officer_id: Option<&str>,
        limit: i64,
    ) -> AppResult<Vec<Investigation>>;

    /// Most recent access log entries.
    async fn recent_access_logs(&self, limit: i64) -> AppResult<Vec<AccessLogEntry>>;

    /// Enabled officer headcount per rank, most senior first.
    async fn officers_per_rank(&self) -> AppResult<Vec<(Rank, i64)>>;

    /// Duties between two dates inclusive, optionally for one officer.
    async fn duties_between(
        &self,
        officer_id: Option<&str>,
        from: NaiveDate,
        to: NaiveDate,
        limit: i64,
    ) -> AppResult<Vec<Duty>>;
}
