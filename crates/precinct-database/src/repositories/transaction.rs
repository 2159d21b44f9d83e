//! PostgreSQL transactions.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use precinct_core::error::AppError;
use precinct_core::result::AppResult;
use precinct_entity::case::{AssignmentStatus, Case, CaseAssignment, NewAssignment, NewCase};
use precinct_entity::complaint::{Complaint, ComplaintStatus};
use precinct_entity::duty::{Duty, NewDuty};
use precinct_entity::resource::{RequestStatus, Resource, ResourceRequest};

use super::db_error;
use crate::store::{StoreTransaction, TransactionSource};

/// Opens `sqlx` transactions on the pool.
#[derive(Debug, Clone)]
pub struct PgTransactionSource {
    pool: PgPool,
}

impl PgTransactionSource {
    /// Create a new transaction source.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionSource for PgTransactionSource {
    async fn begin(&self) -> AppResult<Box<dyn StoreTransaction>> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;
        Ok(Box::new(PgStoreTransaction { tx }))
    }
}

/// An open PostgreSQL transaction. Dropping it rolls back.
pub struct PgStoreTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl StoreTransaction for PgStoreTransaction {
    async fn find_complaint_for_update(&mut self, id: Uuid) -> AppResult<Option<Complaint>> {
        sqlx::query_as::<_, Complaint>("SELECT * FROM complaints WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(db_error("Failed to lock complaint"))
    }

    async fn update_complaint_status(
        &mut self,
        id: Uuid,
        status: ComplaintStatus,
    ) -> AppResult<Complaint> {
        sqlx::query_as::<_, Complaint>(
            "UPDATE complaints SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(db_error("Failed to update complaint"))?
        .ok_or_else(|| AppError::not_found(format!("Complaint {id} not found")))
    }

    async fn insert_case(&mut self, case: NewCase) -> AppResult<Case> {
        sqlx::query_as::<_, Case>(
            "INSERT INTO case_table \
                (id, complaint_id, title, description, case_type, status, officer_id, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(case.complaint_id)
        .bind(&case.title)
        .bind(&case.description)
        .bind(&case.case_type)
        .bind(case.status)
        .bind(&case.officer_id)
        .bind(&case.created_by)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(db_error("Failed to create case"))
    }

    async fn find_case_for_update(&mut self, id: Uuid) -> AppResult<Option<Case>> {
        sqlx::query_as::<_, Case>("SELECT * FROM case_table WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(db_error("Failed to lock case"))
    }

    async fn set_case_officer(&mut self, case_id: Uuid, officer_id: &str) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE case_table SET officer_id = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(case_id)
        .bind(officer_id)
        .execute(&mut *self.tx)
        .await
        .map_err(db_error("Failed to reassign case"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Case {case_id} not found")));
        }
        Ok(())
    }

    async fn insert_assignment(
        &mut self,
        assignment: NewAssignment,
    ) -> AppResult<CaseAssignment> {
        sqlx::query_as::<_, CaseAssignment>(
            "INSERT INTO case_assignments (id, case_id, officer_id, role, status, assigned_by) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(assignment.case_id)
        .bind(&assignment.officer_id)
        .bind(assignment.role)
        .bind(AssignmentStatus::Active)
        .bind(&assignment.assigned_by)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(db_error("Failed to assign officer"))
    }

    async fn find_request_for_update(&mut self, id: Uuid) -> AppResult<Option<ResourceRequest>> {
        sqlx::query_as::<_, ResourceRequest>(
            "SELECT * FROM resource_requests WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(db_error("Failed to lock resource request"))
    }

    async fn set_request_status(
        &mut self,
        id: Uuid,
        status: RequestStatus,
        decided_by: &str,
    ) -> AppResult<ResourceRequest> {
        sqlx::query_as::<_, ResourceRequest>(
            "UPDATE resource_requests SET status = $2, approved_by = $3, decided_at = NOW() \
             WHERE id = $1 AND status = $4 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .bind(decided_by)
        .bind(RequestStatus::Pending)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(db_error("Failed to update resource request"))?
        .ok_or_else(|| {
            AppError::conflict(format!("Resource request {id} is no longer pending"))
        })
    }

    async fn adjust_resource_quantity(&mut self, id: Uuid, delta: i32) -> AppResult<Resource> {
        let updated = sqlx::query_as::<_, Resource>(
            "UPDATE resources SET quantity_available = quantity_available + $2, updated_at = NOW() \
             WHERE id = $1 AND quantity_available + $2 >= 0 RETURNING *",
        )
        .bind(id)
        .bind(delta)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(db_error("Failed to update stock"))?;

        if let Some(resource) = updated {
            return Ok(resource);
        }

        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM resources WHERE id = $1)")
            .bind(id)
            .fetch_one(&mut *self.tx)
            .await
            .map_err(db_error("Failed to find resource"))?;

        if exists {
            Err(AppError::conflict(format!(
                "Insufficient stock for resource {id}"
            )))
        } else {
            Err(AppError::not_found(format!("Resource {id} not found")))
        }
    }

    async fn insert_duty(&mut self, duty: &NewDuty) -> AppResult<Duty> {
        sqlx::query_as::<_, Duty>(
            "INSERT INTO duties (id, officer_id, duty_date, shift, location, notes, assigned_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&duty.officer_id)
        .bind(duty.duty_date)
        .bind(&duty.shift)
        .bind(&duty.location)
        .bind(&duty.notes)
        .bind(&duty.assigned_by)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(db_error("Failed to schedule duty"))
    }

    async fn link_duty_resource(&mut self, duty_id: Uuid, resource_id: Uuid) -> AppResult<()> {
        sqlx::query("INSERT INTO duty_resources (duty_id, resource_id) VALUES ($1, $2)")
            .bind(duty_id)
            .bind(resource_id)
            .execute(&mut *self.tx)
            .await
            .map_err(db_error("Failed to link duty resource"))?;
        Ok(())
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        self.tx
            .commit()
            .await
            .map_err(db_error("Failed to commit transaction"))
    }
}
