//! Complaint repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use precinct_core::error::AppError;
use precinct_core::result::AppResult;
use precinct_core::types::{PageRequest, PageResponse};
use precinct_entity::complaint::{Complaint, ComplaintFilter, ComplaintStatus, NewComplaint};

use super::db_error;
use crate::store::ComplaintStore;

/// `complaints` queries.
#[derive(Debug, Clone)]
pub struct ComplaintRepository {
    pool: PgPool,
}

impl ComplaintRepository {
    /// Create a new complaint repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ComplaintStore for ComplaintRepository {
    async fn insert(&self, complaint: NewComplaint) -> AppResult<Complaint> {
        sqlx::query_as::<_, Complaint>(
            "INSERT INTO complaints \
                (id, complainant_name, complainant_contact, complaint_type, location, description, status, officer_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&complaint.complainant_name)
        .bind(&complaint.complainant_contact)
        .bind(&complaint.complaint_type)
        .bind(&complaint.location)
        .bind(&complaint.description)
        .bind(ComplaintStatus::WaitingForAction)
        .bind(&complaint.officer_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to file complaint"))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Complaint>> {
        sqlx::query_as::<_, Complaint>("SELECT * FROM complaints WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find complaint"))
    }

    async fn list(
        &self,
        filter: &ComplaintFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Complaint>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM complaints \
             WHERE ($1::complaint_status IS NULL OR status = $1) \
               AND ($2::text IS NULL OR officer_id = $2)",
        )
        .bind(filter.status)
        .bind(filter.officer_id.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to count complaints"))?;

        let complaints = sqlx::query_as::<_, Complaint>(
            "SELECT * FROM complaints \
             WHERE ($1::complaint_status IS NULL OR status = $1) \
               AND ($2::text IS NULL OR officer_id = $2) \
             ORDER BY created_at DESC LIMIT $3 OFFSET $4",
        )
        .bind(filter.status)
        .bind(filter.officer_id.as_deref())
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list complaints"))?;

        Ok(PageResponse::new(
            complaints,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    async fn update_status(&self, id: Uuid, status: ComplaintStatus) -> AppResult<Complaint> {
        sqlx::query_as::<_, Complaint>(
            "UPDATE complaints SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to update complaint"))?
        .ok_or_else(|| AppError::not_found(format!("Complaint {id} not found")))
    }
}
