//! Access log repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use precinct_core::result::AppResult;
use precinct_core::types::{PageRequest, PageResponse};
use precinct_entity::audit::{AccessLogEntry, AccessLogFilter, NewAccessLogEntry};

use super::db_error;
use crate::store::AuditStore;

/// `access_logs` queries. Append-only.
#[derive(Debug, Clone)]
pub struct AuditRepository {
    pool: PgPool,
}

impl AuditRepository {
    /// Create a new audit repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditStore for AuditRepository {
    async fn append(&self, entry: NewAccessLogEntry) -> AppResult<AccessLogEntry> {
        sqlx::query_as::<_, AccessLogEntry>(
            "INSERT INTO access_logs (id, officer_id, action, description, success, ip_address) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&entry.officer_id)
        .bind(&entry.action)
        .bind(&entry.description)
        .bind(entry.success)
        .bind(&entry.ip_address)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to write access log"))
    }

    async fn list(
        &self,
        filter: &AccessLogFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<AccessLogEntry>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM access_logs \
             WHERE ($1::text IS NULL OR officer_id = $1) \
               AND ($2::text IS NULL OR action = $2) \
               AND ($3::boolean IS NULL OR success = $3)",
        )
        .bind(filter.officer_id.as_deref())
        .bind(filter.action.as_deref())
        .bind(filter.success)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to count access logs"))?;

        let entries = sqlx::query_as::<_, AccessLogEntry>(
            "SELECT * FROM access_logs \
             WHERE ($1::text IS NULL OR officer_id = $1) \
               AND ($2::text IS NULL OR action = $2) \
               AND ($3::boolean IS NULL OR success = $3) \
             ORDER BY created_at DESC LIMIT $4 OFFSET $5",
        )
        .bind(filter.officer_id.as_deref())
        .bind(filter.action.as_deref())
        .bind(filter.success)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list access logs"))?;

        Ok(PageResponse::new(
            entries,
            page.page,
            page.page_size,
            total as u64,
        ))
    }
}
