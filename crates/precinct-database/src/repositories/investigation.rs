//! Investigation repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use precinct_core::error::AppError;
use precinct_core::result::AppResult;
use precinct_core::types::{PageRequest, PageResponse};
use precinct_entity::case::{
    Investigation, InvestigationFilter, InvestigationStatus, NewInvestigation,
};

use super::db_error;
use crate::store::InvestigationStore;

/// `investigation` queries.
#[derive(Debug, Clone)]
pub struct InvestigationRepository {
    pool: PgPool,
}

impl InvestigationRepository {
    /// Create a new investigation repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InvestigationStore for InvestigationRepository {
    async fn insert(&self, investigation: NewInvestigation) -> AppResult<Investigation> {
        sqlx::query_as::<_, Investigation>(
            "INSERT INTO investigation (id, case_id, lead_officer_id, status, due_date) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(investigation.case_id)
        .bind(&investigation.lead_officer_id)
        .bind(InvestigationStatus::Open)
        .bind(investigation.due_date)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to open investigation"))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Investigation>> {
        sqlx::query_as::<_, Investigation>("SELECT * FROM investigation WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find investigation"))
    }

    async fn list_for_case(&self, case_id: Uuid) -> AppResult<Vec<Investigation>> {
        sqlx::query_as::<_, Investigation>(
            "SELECT * FROM investigation WHERE case_id = $1 ORDER BY opened_at DESC",
        )
        .bind(case_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list investigations"))
    }

    async fn list(
        &self,
        filter: &InvestigationFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Investigation>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM investigation \
             WHERE ($1::investigation_status IS NULL OR status = $1) \
               AND ($2::text IS NULL OR lead_officer_id = $2)",
        )
        .bind(filter.status)
        .bind(filter.lead_officer_id.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to count investigations"))?;

        let investigations = sqlx::query_as::<_, Investigation>(
            "SELECT * FROM investigation \
             WHERE ($1::investigation_status IS NULL OR status = $1) \
               AND ($2::text IS NULL OR lead_officer_id = $2) \
             ORDER BY opened_at DESC LIMIT $3 OFFSET $4",
        )
        .bind(filter.status)
        .bind(filter.lead_officer_id.as_deref())
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list investigations"))?;

        Ok(PageResponse::new(
            investigations,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    async fn complete(&self, id: Uuid, findings: &str) -> AppResult<Investigation> {
        sqlx::query_as::<_, Investigation>(
            "UPDATE investigation SET status = $2, findings = $3, completed_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(InvestigationStatus::Completed)
        .bind(findings)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to complete investigation"))?
        .ok_or_else(|| AppError::not_found(format!("Investigation {id} not found")))
    }
}
