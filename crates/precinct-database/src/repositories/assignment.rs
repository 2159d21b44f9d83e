//! Case assignment repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use precinct_core::error::AppError;
use precinct_core::result::AppResult;
use precinct_entity::case::{AssignmentStatus, CaseAssignment};

use super::db_error;
use crate::store::AssignmentStore;

/// `case_assignments` queries. Inserts go through a transaction.
#[derive(Debug, Clone)]
pub struct AssignmentRepository {
    pool: PgPool,
}

impl AssignmentRepository {
    /// Create a new assignment repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AssignmentStore for AssignmentRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<CaseAssignment>> {
        sqlx::query_as::<_, CaseAssignment>("SELECT * FROM case_assignments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find assignment"))
    }

    async fn find_active(
        &self,
        case_id: Uuid,
        officer_id: &str,
    ) -> AppResult<Option<CaseAssignment>> {
        sqlx::query_as::<_, CaseAssignment>(
            "SELECT * FROM case_assignments WHERE case_id = $1 AND officer_id = $2 AND status = $3",
        )
        .bind(case_id)
        .bind(officer_id)
        .bind(AssignmentStatus::Active)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to find active assignment"))
    }

    async fn list_for_case(&self, case_id: Uuid) -> AppResult<Vec<CaseAssignment>> {
        sqlx::query_as::<_, CaseAssignment>(
            "SELECT * FROM case_assignments WHERE case_id = $1 ORDER BY assigned_at ASC",
        )
        .bind(case_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list assignments"))
    }

    async fn complete(&self, id: Uuid) -> AppResult<CaseAssignment> {
        sqlx::query_as::<_, CaseAssignment>(
            "UPDATE case_assignments SET status = $2, completed_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(AssignmentStatus::Completed)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to complete assignment"))?
        .ok_or_else(|| AppError::not_found(format!("Assignment {id} not found")))
    }
}
