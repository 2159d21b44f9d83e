//! Dashboard statistics queries.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryScalar;
use sqlx::{PgPool, Postgres};

use precinct_core::result::AppResult;
use precinct_entity::audit::AccessLogEntry;
use precinct_entity::case::{AssignmentStatus, Case, Investigation};
use precinct_entity::complaint::Complaint;
use precinct_entity::duty::Duty;
use precinct_entity::officer::Rank;

use super::db_error;
use crate::store::{Metric, StatsStore};

/// Read-only counting and "recent items" queries.
#[derive(Debug, Clone)]
pub struct StatsRepository {
    pool: PgPool,
}

impl StatsRepository {
    /// Create a new stats repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatsStore for StatsRepository {
    async fn count(&self, metric: &Metric) -> AppResult<i64> {
        let query: QueryScalar<'_, Postgres, i64, PgArguments> = match metric {
            Metric::Officers {
                disabled,
                designation,
            } => sqlx::query_scalar(
                "SELECT COUNT(*) FROM userlogin \
                 WHERE ($1::boolean IS NULL OR disabled = $1) \
                   AND ($2::text IS NULL OR designation = $2)",
            )
            .bind(*disabled)
            .bind(designation.clone()),
            Metric::Cases {
                status,
                case_types,
                officer_id,
            } => sqlx::query_scalar(
                "SELECT COUNT(*) FROM case_table \
                 WHERE ($1::case_status IS NULL OR status = $1) \
                   AND (cardinality($2::text[]) = 0 OR case_type = ANY($2)) \
                   AND ($3::text IS NULL OR officer_id = $3)",
            )
            .bind(*status)
            .bind(case_types.clone())
            .bind(officer_id.clone()),
            Metric::CasesOpenedSince { since } => {
                sqlx::query_scalar("SELECT COUNT(*) FROM case_table WHERE created_at >= $1")
                    .bind(*since)
            }
            Metric::Complaints { status } => sqlx::query_scalar(
                "SELECT COUNT(*) FROM complaints WHERE ($1::complaint_status IS NULL OR status = $1)",
            )
            .bind(*status),
            Metric::Investigations {
                status,
                lead_officer_id,
            } => sqlx::query_scalar(
                "SELECT COUNT(*) FROM investigation \
                 WHERE ($1::investigation_status IS NULL OR status = $1) \
                   AND ($2::text IS NULL OR lead_officer_id = $2)",
            )
            .bind(*status)
            .bind(lead_officer_id.clone()),
            Metric::ActiveAssignments { officer_id } => sqlx::query_scalar(
                "SELECT COUNT(*) FROM case_assignments WHERE officer_id = $1 AND status = $2",
            )
            .bind(officer_id.clone())
            .bind(AssignmentStatus::Active),
            Metric::ResourceRequests { status, officer_id } => sqlx::query_scalar(
                "SELECT COUNT(*) FROM resource_requests \
                 WHERE ($1::request_status IS NULL OR status = $1) \
                   AND ($2::text IS NULL OR officer_id = $2)",
            )
            .bind(*status)
            .bind(officer_id.clone()),
            Metric::Duties {
                from,
                to,
                officer_id,
            } => sqlx::query_scalar(
                "SELECT COUNT(*) FROM duties \
                 WHERE duty_date >= $1 \
                   AND ($2::date IS NULL OR duty_date <= $2) \
                   AND ($3::text IS NULL OR officer_id = $3)",
            )
            .bind(*from)
            .bind(*to)
            .bind(officer_id.clone()),
        };

        query
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to evaluate metric"))
    }

    async fn recent_cases(&self, officer_id: Option<&str>, limit: i64) -> AppResult<Vec<Case>> {
        sqlx::query_as::<_, Case>(
            "SELECT * FROM case_table WHERE ($1::text IS NULL OR officer_id = $1) \
             ORDER BY created_at DESC LIMIT $2",
        )
        .bind(officer_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to load recent cases"))
    }

    async fn recent_complaints(&self, limit: i64) -> AppResult<Vec<Complaint>> {
        sqlx::query_as::<_, Complaint>(
            "SELECT * FROM complaints ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to load recent complaints"))
    }

    async fn recent_investigations(
        &self,
        lead_officer_id: Option<&str>,
        limit: i64,
    ) -> AppResult<Vec<Investigation>> {
        sqlx::query_as::<_, Investigation>(
            "SELECT * FROM investigation WHERE ($1::text IS NULL OR lead_officer_id = $1) \
             ORDER BY opened_at DESC LIMIT $2",
        )
        .bind(lead_officer_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to load recent investigations"))
    }

    async fn recent_access_logs(&self, limit: i64) -> AppResult<Vec<AccessLogEntry>> {
        sqlx::query_as::<_, AccessLogEntry>(
            "SELECT * FROM access_logs ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to load recent access logs"))
    }

    async fn officers_per_rank(&self) -> AppResult<Vec<(Rank, i64)>> {
        sqlx::query_as::<_, (Rank, i64)>(
            "SELECT rank, COUNT(*) FROM userlogin WHERE disabled = FALSE \
             GROUP BY rank ORDER BY rank ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to count officers per rank"))
    }

    async fn duties_between(
        &self,
        officer_id: Option<&str>,
        from: NaiveDate,
        to: NaiveDate,
        limit: i64,
    ) -> AppResult<Vec<Duty>> {
        sqlx::query_as::<_, Duty>(
            "SELECT * FROM duties \
             WHERE duty_date BETWEEN $1 AND $2 AND ($3::text IS NULL OR officer_id = $3) \
             ORDER BY duty_date ASC, shift ASC LIMIT $4",
        )
        .bind(from)
        .bind(to)
        .bind(officer_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to load duties"))
    }
}
