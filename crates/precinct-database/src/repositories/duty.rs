//! Duty roster repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use precinct_core::result::AppResult;
use precinct_core::types::{PageRequest, PageResponse};
use precinct_entity::duty::{Duty, DutyFilter};

use super::db_error;
use crate::store::DutyStore;

/// `duties` and `duty_resources` queries. Scheduling goes through a
/// transaction.
#[derive(Debug, Clone)]
pub struct DutyRepository {
    pool: PgPool,
}

impl DutyRepository {
    /// Create a new duty repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DutyStore for DutyRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Duty>> {
        sqlx::query_as::<_, Duty>("SELECT * FROM duties WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find duty"))
    }

    async fn list(&self, filter: &DutyFilter, page: &PageRequest) -> AppResult<PageResponse<Duty>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM duties \
             WHERE ($1::text IS NULL OR officer_id = $1) \
               AND ($2::date IS NULL OR duty_date >= $2) \
               AND ($3::date IS NULL OR duty_date <= $3)",
        )
        .bind(filter.officer_id.as_deref())
        .bind(filter.from)
        .bind(filter.to)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to count duties"))?;

        let duties = sqlx::query_as::<_, Duty>(
            "SELECT * FROM duties \
             WHERE ($1::text IS NULL OR officer_id = $1) \
               AND ($2::date IS NULL OR duty_date >= $2) \
               AND ($3::date IS NULL OR duty_date <= $3) \
             ORDER BY duty_date ASC, shift ASC LIMIT $4 OFFSET $5",
        )
        .bind(filter.officer_id.as_deref())
        .bind(filter.from)
        .bind(filter.to)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list duties"))?;

        Ok(PageResponse::new(duties, page.page, page.page_size, total as u64))
    }

    async fn resources_for(&self, duty_id: Uuid) -> AppResult<Vec<Uuid>> {
        sqlx::query_scalar("SELECT resource_id FROM duty_resources WHERE duty_id = $1")
            .bind(duty_id)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list duty resources"))
    }
}
