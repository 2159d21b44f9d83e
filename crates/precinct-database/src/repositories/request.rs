//! Resource request repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use precinct_core::result::AppResult;
use precinct_core::types::{PageRequest, PageResponse};
use precinct_entity::resource::{NewResourceRequest, RequestFilter, RequestStatus, ResourceRequest};

use super::db_error;
use crate::store::RequestStore;

/// `resource_requests` queries. Decisions go through a transaction.
#[derive(Debug, Clone)]
pub struct RequestRepository {
    pool: PgPool,
}

impl RequestRepository {
    /// Create a new request repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RequestStore for RequestRepository {
    async fn insert(&self, request: NewResourceRequest) -> AppResult<ResourceRequest> {
        sqlx::query_as::<_, ResourceRequest>(
            "INSERT INTO resource_requests \
                (id, resource_id, officer_id, quantity, reason, urgency, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(request.resource_id)
        .bind(&request.officer_id)
        .bind(request.quantity)
        .bind(&request.reason)
        .bind(request.urgency)
        .bind(RequestStatus::Pending)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to create resource request"))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ResourceRequest>> {
        sqlx::query_as::<_, ResourceRequest>("SELECT * FROM resource_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find resource request"))
    }

    async fn list(
        &self,
        filter: &RequestFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ResourceRequest>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM resource_requests \
             WHERE ($1::request_status IS NULL OR status = $1) \
               AND ($2::text IS NULL OR officer_id = $2) \
               AND ($3::uuid IS NULL OR resource_id = $3)",
        )
        .bind(filter.status)
        .bind(filter.officer_id.as_deref())
        .bind(filter.resource_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to count resource requests"))?;

        let requests = sqlx::query_as::<_, ResourceRequest>(
            "SELECT * FROM resource_requests \
             WHERE ($1::request_status IS NULL OR status = $1) \
               AND ($2::text IS NULL OR officer_id = $2) \
               AND ($3::uuid IS NULL OR resource_id = $3) \
             ORDER BY requested_at DESC LIMIT $4 OFFSET $5",
        )
        .bind(filter.status)
        .bind(filter.officer_id.as_deref())
        .bind(filter.resource_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list resource requests"))?;

        Ok(PageResponse::new(
            requests,
            page.page,
            page.page_size,
            total as u64,
        ))
    }
}
