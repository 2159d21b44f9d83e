//! Officer repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use precinct_core::error::AppError;
use precinct_core::result::AppResult;
use precinct_core::types::{PageRequest, PageResponse};
use precinct_entity::officer::{NewOfficer, Officer, OfficerFilter, OfficerUpdate};

use super::db_error;
use crate::store::OfficerStore;

/// `userlogin` queries.
#[derive(Debug, Clone)]
pub struct OfficerRepository {
    pool: PgPool,
}

impl OfficerRepository {
    /// Create a new officer repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const FILTER_CLAUSE: &str = "($1::officer_rank IS NULL OR rank = $1) \
     AND ($2::text IS NULL OR designation = $2) \
     AND ($3::boolean IS NULL OR disabled = $3) \
     AND ($4::text IS NULL OR officer_id ILIKE '%' || $4 || '%' OR name ILIKE '%' || $4 || '%')";

#[async_trait]
impl OfficerStore for OfficerRepository {
    async fn find_by_id(&self, officer_id: &str) -> AppResult<Option<Officer>> {
        sqlx::query_as::<_, Officer>("SELECT * FROM userlogin WHERE officer_id = $1")
            .bind(officer_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find officer"))
    }

    async fn list(
        &self,
        filter: &OfficerFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Officer>> {
        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM userlogin WHERE {FILTER_CLAUSE}"
        ))
        .bind(filter.rank)
        .bind(filter.designation.as_deref())
        .bind(filter.disabled)
        .bind(filter.search.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to count officers"))?;

        let officers = sqlx::query_as::<_, Officer>(&format!(
            "SELECT * FROM userlogin WHERE {FILTER_CLAUSE} ORDER BY officer_id ASC LIMIT $5 OFFSET $6"
        ))
        .bind(filter.rank)
        .bind(filter.designation.as_deref())
        .bind(filter.disabled)
        .bind(filter.search.as_deref())
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list officers"))?;

        Ok(PageResponse::new(
            officers,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    async fn insert(&self, officer: NewOfficer) -> AppResult<Officer> {
        sqlx::query_as::<_, Officer>(
            "INSERT INTO userlogin (officer_id, name, gender, rank, designation, email, phone, password_hash) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(&officer.officer_id)
        .bind(&officer.name)
        .bind(&officer.gender)
        .bind(officer.rank)
        .bind(&officer.designation)
        .bind(&officer.email)
        .bind(&officer.phone)
        .bind(&officer.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to create officer"))
    }

    async fn update_profile(
        &self,
        officer_id: &str,
        update: &OfficerUpdate,
    ) -> AppResult<Officer> {
        sqlx::query_as::<_, Officer>(
            "UPDATE userlogin SET \
                name = COALESCE($2, name), \
                gender = COALESCE($3, gender), \
                rank = COALESCE($4, rank), \
                designation = COALESCE($5, designation), \
                email = COALESCE($6, email), \
                phone = COALESCE($7, phone), \
                updated_at = NOW() \
             WHERE officer_id = $1 RETURNING *",
        )
        .bind(officer_id)
        .bind(&update.name)
        .bind(&update.gender)
        .bind(update.rank)
        .bind(&update.designation)
        .bind(&update.email)
        .bind(&update.phone)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to update officer"))?
        .ok_or_else(|| AppError::not_found(format!("Officer '{officer_id}' not found")))
    }

    async fn set_password_hash(&self, officer_id: &str, password_hash: &str) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE userlogin SET password_hash = $2, updated_at = NOW() WHERE officer_id = $1",
        )
        .bind(officer_id)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to update password"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Officer '{officer_id}' not found"
            )));
        }
        Ok(())
    }

    async fn set_disabled(&self, officer_id: &str, disabled: bool) -> AppResult<Officer> {
        sqlx::query_as::<_, Officer>(
            "UPDATE userlogin SET disabled = $2, updated_at = NOW() WHERE officer_id = $1 RETURNING *",
        )
        .bind(officer_id)
        .bind(disabled)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to update officer status"))?
        .ok_or_else(|| AppError::not_found(format!("Officer '{officer_id}' not found")))
    }
}
