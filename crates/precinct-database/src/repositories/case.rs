//! Case repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use precinct_core::error::AppError;
use precinct_core::result::AppResult;
use precinct_core::types::{PageRequest, PageResponse};
use precinct_entity::case::{Case, CaseFilter, CaseStatus};

use super::db_error;
use crate::store::CaseStore;

/// `case_table` queries.
#[derive(Debug, Clone)]
pub struct CaseRepository {
    pool: PgPool,
}

impl CaseRepository {
    /// Create a new case repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CaseStore for CaseRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Case>> {
        sqlx::query_as::<_, Case>("SELECT * FROM case_table WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find case"))
    }

    async fn list(&self, filter: &CaseFilter, page: &PageRequest) -> AppResult<PageResponse<Case>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM case_table \
             WHERE ($1::case_status IS NULL OR status = $1) \
               AND ($2::text IS NULL OR case_type = $2) \
               AND ($3::text IS NULL OR officer_id = $3)",
        )
        .bind(filter.status)
        .bind(filter.case_type.as_deref())
        .bind(filter.officer_id.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to count cases"))?;

        let cases = sqlx::query_as::<_, Case>(
            "SELECT * FROM case_table \
             WHERE ($1::case_status IS NULL OR status = $1) \
               AND ($2::text IS NULL OR case_type = $2) \
               AND ($3::text IS NULL OR officer_id = $3) \
             ORDER BY created_at DESC LIMIT $4 OFFSET $5",
        )
        .bind(filter.status)
        .bind(filter.case_type.as_deref())
        .bind(filter.officer_id.as_deref())
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list cases"))?;

        Ok(PageResponse::new(cases, page.page, page.page_size, total as u64))
    }

    async fn update_status(&self, id: Uuid, status: CaseStatus) -> AppResult<Case> {
        sqlx::query_as::<_, Case>(
            "UPDATE case_table SET status = $2, updated_at = NOW(), \
                closed_at = CASE WHEN $3 THEN NOW() ELSE closed_at END \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .bind(status.is_terminal())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to update case status"))?
        .ok_or_else(|| AppError::not_found(format!("Case {id} not found")))
    }
}
