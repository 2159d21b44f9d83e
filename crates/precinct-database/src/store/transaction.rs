//! All-or-nothing units of work.
//!
//! A [`StoreTransaction`] is dropped without [`commit`](StoreTransaction::commit)
//! on any error path; every backend discards the staged writes in that case.

use async_trait::async_trait;
use uuid::Uuid;

use precinct_core::result::AppResult;
use precinct_entity::case::{Case, CaseAssignment, NewAssignment, NewCase};
use precinct_entity::complaint::{Complaint, ComplaintStatus};
use precinct_entity::duty::{Duty, NewDuty};
use precinct_entity::resource::{RequestStatus, Resource, ResourceRequest};

/// Opens transactions against the configured backend.
#[async_trait]
pub trait TransactionSource: Send + Sync + std::fmt::Debug + 'static {
    /// Begin a new transaction.
    async fn begin(&self) -> AppResult<Box<dyn StoreTransaction>>;
}

/// Writes that must land together.
///
/// Reads ending in `_for_update` lock the row until commit or rollback.
#[async_trait]
pub trait StoreTransaction: Send {
    /// Read and lock a complaint.
    async fn find_complaint_for_update(&mut self, id: Uuid) -> AppResult<Option<Complaint>>;

    /// Change a complaint's status.
    async fn update_complaint_status(
        &mut self,
        id: Uuid,
        status: ComplaintStatus,
    ) -> AppResult<Complaint>;

    /// Insert a case.
    async fn insert_case(&mut self, case: NewCase) -> AppResult<Case>;

    /// Read and lock a case.
    async fn find_case_for_update(&mut self, id: Uuid) -> AppResult<Option<Case>>;

    /// Move a case to another responsible officer.
    async fn set_case_officer(&mut self, case_id: Uuid, officer_id: &str) -> AppResult<()>;

    /// Insert an active assignment. A second active assignment of the same
    /// officer on the same case is a conflict.
    async fn insert_assignment(&mut self, assignment: NewAssignment)
    -> AppResult<CaseAssignment>;

    /// Read and lock a resource request.
    async fn find_request_for_update(&mut self, id: Uuid) -> AppResult<Option<ResourceRequest>>;

    /// Record a decision on a request.
    async fn set_request_status(
        &mut self,
        id: Uuid,
        status: RequestStatus,
        decided_by: &str,
    ) -> AppResult<ResourceRequest>;

    /// Add `delta` to a resource's available quantity. Going below zero is a
    /// conflict.
    async fn adjust_resource_quantity(&mut self, id: Uuid, delta: i32) -> AppResult<Resource>;

    /// Insert a duty row (without resource links).
    async fn insert_duty(&mut self, duty: &NewDuty) -> AppResult<Duty>;

    /// Link a resource to a duty.
    async fn link_duty_resource(&mut self, duty_id: Uuid, resource_id: Uuid) -> AppResult<()>;

    /// Make every write visible.
    async fn commit(self: Box<Self>) -> AppResult<()>;
}
