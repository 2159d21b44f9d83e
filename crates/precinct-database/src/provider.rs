//! Backend selection.

use std::sync::Arc;

use tracing::info;

use precinct_core::config::DatabaseConfig;
use precinct_core::error::AppError;
use precinct_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::memory::MemoryDatabase;
use crate::migration::run_migrations;
use crate::repositories::{
    AssignmentRepository, AuditRepository, CaseRepository, ComplaintRepository, DutyRepository,
    InvestigationRepository, OfficerRepository, PgTransactionSource, RequestRepository,
    ResourceRepository, StatsRepository,
};
use crate::store::{
    AssignmentStore, AuditStore, CaseStore, ComplaintStore, DutyStore, InvestigationStore,
    OfficerStore, RequestStore, ResourceStore, StatsStore, TransactionSource,
};

/// Every store, bound to one backend.
///
/// Built once at startup and shared by all managers.
#[derive(Debug, Clone)]
pub struct Database {
    pub officers: Arc<dyn OfficerStore>,
    pub complaints: Arc<dyn ComplaintStore>,
    pub cases: Arc<dyn CaseStore>,
    pub assignments: Arc<dyn AssignmentStore>,
    pub investigations: Arc<dyn InvestigationStore>,
    pub resources: Arc<dyn ResourceStore>,
    pub requests: Arc<dyn RequestStore>,
    pub duties: Arc<dyn DutyStore>,
    pub audit: Arc<dyn AuditStore>,
    pub stats: Arc<dyn StatsStore>,
    pub transactions: Arc<dyn TransactionSource>,
    pool: Option<DatabasePool>,
}

impl Database {
    /// Connect the backend named by `config.provider`.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider.as_str() {
            "postgres" => {
                let pool = DatabasePool::connect(config).await?;
                if config.run_migrations {
                    run_migrations(pool.pool()).await?;
                }
                Ok(Self::postgres(pool))
            }
            "memory" => {
                info!("Using in-memory database backend");
                Ok(Self::memory(MemoryDatabase::new()))
            }
            other => Err(AppError::configuration(format!(
                "Unknown database provider: '{other}'. Supported: postgres, memory"
            ))),
        }
    }

    /// Bind every store to a PostgreSQL pool.
    pub fn postgres(pool: DatabasePool) -> Self {
        let pg = pool.pool().clone();
        Self {
            officers: Arc::new(OfficerRepository::new(pg.clone())),
            complaints: Arc::new(ComplaintRepository::new(pg.clone())),
            cases: Arc::new(CaseRepository::new(pg.clone())),
            assignments: Arc::new(AssignmentRepository::new(pg.clone())),
            investigations: Arc::new(InvestigationRepository::new(pg.clone())),
            resources: Arc::new(ResourceRepository::new(pg.clone())),
            requests: Arc::new(RequestRepository::new(pg.clone())),
            duties: Arc::new(DutyRepository::new(pg.clone())),
            audit: Arc::new(AuditRepository::new(pg.clone())),
            stats: Arc::new(StatsRepository::new(pg.clone())),
            transactions: Arc::new(PgTransactionSource::new(pg)),
            pool: Some(pool),
        }
    }

    /// Bind every store to an in-memory database.
    pub fn memory(db: MemoryDatabase) -> Self {
        let db = Arc::new(db);
        Self {
            officers: db.clone(),
            complaints: db.clone(),
            cases: db.clone(),
            assignments: db.clone(),
            investigations: db.clone(),
            resources: db.clone(),
            requests: db.clone(),
            duties: db.clone(),
            audit: db.clone(),
            stats: db.clone(),
            transactions: db,
            pool: None,
        }
    }

    /// The PostgreSQL pool, when that backend is in use.
    pub fn pool(&self) -> Option<&DatabasePool> {
        self.pool.as_ref()
    }

    /// Name of the active backend.
    pub fn provider(&self) -> &'static str {
        if self.pool.is_some() {
            "postgres"
        } else {
            "memory"
        }
    }

    /// Check that the backend is reachable.
    pub async fn health_check(&self) -> AppResult<bool> {
        match &self.pool {
            Some(pool) => pool.health_check().await,
            None => Ok(true),
        }
    }
}
