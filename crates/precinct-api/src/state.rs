//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use precinct_auth::{AuditWriter, AuthManager, PasswordValidator};
use precinct_core::config::AppConfig;
use precinct_core::traits::FileSink;
use precinct_database::Database;
use precinct_service::{
    AccessLogManager, CaseManager, DashboardManager, DutyManager, ResourceManager, UserManager,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. Cloning is cheap:
/// every field is an `Arc` or a bundle of `Arc`s.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Store handles bound to the configured backend
    pub database: Database,

    // ── Auth ─────────────────────────────────────────────────
    /// Login, logout and session resolution
    pub auth: Arc<AuthManager>,

    // ── Services ─────────────────────────────────────────────
    /// Role-specific dashboards
    pub dashboard: Arc<DashboardManager>,
    /// Officer accounts
    pub users: Arc<UserManager>,
    /// Complaints, cases, assignments, investigations
    pub cases: Arc<CaseManager>,
    /// Inventory and allocation requests
    pub resources: Arc<ResourceManager>,
    /// Duty roster
    pub duties: Arc<DutyManager>,
    /// Access-log browsing
    pub access_logs: Arc<AccessLogManager>,
}

impl AppState {
    /// Wire every manager against one database and one upload sink.
    pub fn new(config: AppConfig, database: Database, sink: Arc<dyn FileSink>) -> Self {
        let audit = AuditWriter::new(Arc::clone(&database.audit));

        let auth = AuthManager::new(Arc::clone(&database.officers), audit.clone(), &config.auth);
        let users = UserManager::new(
            Arc::clone(&database.officers),
            auth.hasher(),
            PasswordValidator::new(&config.auth),
            audit.clone(),
        );
        let cases = CaseManager::new(
            Arc::clone(&database.officers),
            Arc::clone(&database.complaints),
            Arc::clone(&database.cases),
            Arc::clone(&database.assignments),
            Arc::clone(&database.investigations),
            Arc::clone(&database.transactions),
            audit.clone(),
        );
        let resources = ResourceManager::new(
            Arc::clone(&database.resources),
            Arc::clone(&database.requests),
            Arc::clone(&database.transactions),
            sink,
            audit.clone(),
        );
        let duties = DutyManager::new(
            Arc::clone(&database.officers),
            Arc::clone(&database.resources),
            Arc::clone(&database.duties),
            Arc::clone(&database.transactions),
            audit,
        );
        let dashboard = DashboardManager::new(Arc::clone(&database.stats));
        let access_logs = AccessLogManager::new(Arc::clone(&database.audit));

        Self {
            config: Arc::new(config),
            database,
            auth: Arc::new(auth),
            dashboard: Arc::new(dashboard),
            users: Arc::new(users),
            cases: Arc::new(cases),
            resources: Arc::new(resources),
            duties: Arc::new(duties),
            access_logs: Arc::new(access_logs),
        }
    }
}
