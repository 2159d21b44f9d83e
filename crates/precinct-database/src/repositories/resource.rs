//! Resource (inventory) repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use precinct_core::error::AppError;
use precinct_core::result::AppResult;
use precinct_core::types::{PageRequest, PageResponse};
use precinct_entity::resource::{NewResource, Resource, ResourceFilter};

use super::db_error;
use crate::store::ResourceStore;

/// `resources` queries.
#[derive(Debug, Clone)]
pub struct ResourceRepository {
    pool: PgPool,
}

impl ResourceRepository {
    /// Create a new resource repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResourceStore for ResourceRepository {
    async fn insert(&self, resource: NewResource) -> AppResult<Resource> {
        sqlx::query_as::<_, Resource>(
            "INSERT INTO resources \
                (id, name, category, quantity_available, description, attachment_path, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&resource.name)
        .bind(&resource.category)
        .bind(resource.quantity_available)
        .bind(&resource.description)
        .bind(&resource.attachment_path)
        .bind(&resource.created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to add resource"))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Resource>> {
        sqlx::query_as::<_, Resource>("SELECT * FROM resources WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find resource"))
    }

    async fn list(
        &self,
        filter: &ResourceFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Resource>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM resources \
             WHERE ($1::text IS NULL OR category = $1) \
               AND ($2::text IS NULL OR name ILIKE '%' || $2 || '%')",
        )
        .bind(filter.category.as_deref())
        .bind(filter.search.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to count resources"))?;

        let resources = sqlx::query_as::<_, Resource>(
            "SELECT * FROM resources \
             WHERE ($1::text IS NULL OR category = $1) \
               AND ($2::text IS NULL OR name ILIKE '%' || $2 || '%') \
             ORDER BY name ASC LIMIT $3 OFFSET $4",
        )
        .bind(filter.category.as_deref())
        .bind(filter.search.as_deref())
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list resources"))?;

        Ok(PageResponse::new(
            resources,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    async fn set_quantity(&self, id: Uuid, quantity: i32) -> AppResult<Resource> {
        sqlx::query_as::<_, Resource>(
            "UPDATE resources SET quantity_available = $2, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(quantity)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to update stock"))?
        .ok_or_else(|| AppError::not_found(format!("Resource {id} not found")))
    }
}
