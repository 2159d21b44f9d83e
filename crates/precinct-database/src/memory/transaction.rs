//! Staged transactions for [`MemoryDatabase`].

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, OwnedRwLockWriteGuard};
use uuid::Uuid;

use precinct_core::error::AppError;
use precinct_core::result::AppResult;
use precinct_entity::case::{AssignmentStatus, Case, CaseAssignment, NewAssignment, NewCase};
use precinct_entity::complaint::{Complaint, ComplaintStatus};
use precinct_entity::duty::{Duty, DutyResource, NewDuty};
use precinct_entity::resource::{RequestStatus, Resource, ResourceRequest};

use super::state::MemoryState;
use super::{FaultPoint, MemoryDatabase, check_fault};
use crate::store::{StoreTransaction, TransactionSource};

/// Holds the write lock; writes go to `working` until commit.
pub struct MemoryTransaction {
    guard: OwnedRwLockWriteGuard<MemoryState>,
    working: MemoryState,
    faults: Arc<Mutex<HashSet<FaultPoint>>>,
}

impl MemoryTransaction {
    async fn check(&self, point: FaultPoint) -> AppResult<()> {
        check_fault(&self.faults, point).await
    }
}

#[async_trait]
impl TransactionSource for MemoryDatabase {
    async fn begin(&self) -> AppResult<Box<dyn StoreTransaction>> {
        let guard = self.state.clone().write_owned().await;
        let working = guard.clone();
        Ok(Box::new(MemoryTransaction {
            guard,
            working,
            faults: self.faults.clone(),
        }))
    }
}

#[async_trait]
impl StoreTransaction for MemoryTransaction {
    async fn find_complaint_for_update(&mut self, id: Uuid) -> AppResult<Option<Complaint>> {
        Ok(self.working.complaints.iter().find(|c| c.id == id).cloned())
    }

    async fn update_complaint_status(
        &mut self,
        id: Uuid,
        status: ComplaintStatus,
    ) -> AppResult<Complaint> {
        self.check(FaultPoint::ComplaintUpdate).await?;
        let complaint = self
            .working
            .complaints
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::not_found(format!("Complaint {id} not found")))?;
        complaint.status = status;
        complaint.updated_at = Utc::now();
        Ok(complaint.clone())
    }

    async fn insert_case(&mut self, case: NewCase) -> AppResult<Case> {
        self.check(FaultPoint::CaseInsert).await?;
        let row = case.into_case(Utc::now());
        self.working.cases.push(row.clone());
        Ok(row)
    }

    async fn find_case_for_update(&mut self, id: Uuid) -> AppResult<Option<Case>> {
        Ok(self.working.cases.iter().find(|c| c.id == id).cloned())
    }

    async fn set_case_officer(&mut self, case_id: Uuid, officer_id: &str) -> AppResult<()> {
        let case = self
            .working
            .cases
            .iter_mut()
            .find(|c| c.id == case_id)
            .ok_or_else(|| AppError::not_found(format!("Case {case_id} not found")))?;
        case.officer_id = officer_id.to_string();
        case.updated_at = Utc::now();
        Ok(())
    }

    async fn insert_assignment(
        &mut self,
        assignment: NewAssignment,
    ) -> AppResult<CaseAssignment> {
        self.check(FaultPoint::AssignmentInsert).await?;
        let duplicate = self.working.assignments.iter().any(|a| {
            a.case_id == assignment.case_id
                && a.officer_id == assignment.officer_id
                && a.status == AssignmentStatus::Active
        });
        if duplicate {
            return Err(AppError::conflict(format!(
                "Officer '{}' already has an active assignment on case {}",
                assignment.officer_id, assignment.case_id
            )));
        }
        let row = assignment.into_assignment(Utc::now());
        self.working.assignments.push(row.clone());
        Ok(row)
    }

    async fn find_request_for_update(&mut self, id: Uuid) -> AppResult<Option<ResourceRequest>> {
        Ok(self.working.requests.iter().find(|r| r.id == id).cloned())
    }

    async fn set_request_status(
        &mut self,
        id: Uuid,
        status: RequestStatus,
        decided_by: &str,
    ) -> AppResult<ResourceRequest> {
        self.check(FaultPoint::RequestUpdate).await?;
        let request = self
            .working
            .requests
            .iter_mut()
            .find(|r| r.id == id && r.status == RequestStatus::Pending)
            .ok_or_else(|| {
                AppError::conflict(format!("Resource request {id} is no longer pending"))
            })?;
        request.status = status;
        request.approved_by = Some(decided_by.to_string());
        request.decided_at = Some(Utc::now());
        Ok(request.clone())
    }

    async fn adjust_resource_quantity(&mut self, id: Uuid, delta: i32) -> AppResult<Resource> {
        self.check(FaultPoint::ResourceAdjust).await?;
        let resource = self
            .working
            .resources
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::not_found(format!("Resource {id} not found")))?;
        let next = resource.quantity_available + delta;
        if next < 0 {
            return Err(AppError::conflict(format!(
                "Insufficient stock for resource {id}"
            )));
        }
        resource.quantity_available = next;
        resource.updated_at = Utc::now();
        Ok(resource.clone())
    }

    async fn insert_duty(&mut self, duty: &NewDuty) -> AppResult<Duty> {
        self.check(FaultPoint::DutyInsert).await?;
        let row = duty.to_duty(Utc::now());
        self.working.duties.push(row.clone());
        Ok(row)
    }

    async fn link_duty_resource(&mut self, duty_id: Uuid, resource_id: Uuid) -> AppResult<()> {
        if !self.working.resources.iter().any(|r| r.id == resource_id) {
            return Err(AppError::not_found(format!(
                "Resource {resource_id} not found"
            )));
        }
        self.working.duty_resources.push(DutyResource {
            duty_id,
            resource_id,
        });
        Ok(())
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        self.check(FaultPoint::Commit).await?;
        let MemoryTransaction {
            mut guard, working, ..
        } = *self;
        *guard = working;
        Ok(())
    }
}
