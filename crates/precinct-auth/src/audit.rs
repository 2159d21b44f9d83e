//! Shared access-log writer.

use std::sync::Arc;

use tracing::warn;

use precinct_database::store::AuditStore;
use precinct_entity::audit::NewAccessLogEntry;

/// Appends access-log rows for logins and every successful mutation.
///
/// A failed append is logged and swallowed: the audited action has already
/// happened and is not undone by a missing log row.
#[derive(Debug, Clone)]
pub struct AuditWriter {
    store: Arc<dyn AuditStore>,
}

impl AuditWriter {
    pub fn new(store: Arc<dyn AuditStore>) -> Self {
        Self { store }
    }

    /// Record a successful action.
    pub async fn record(&self, actor: &str, action: &str, description: &str, ip: Option<&str>) {
        self.append(actor, action, description, true, ip).await;
    }

    /// Record a refused action (failed login).
    pub async fn record_failure(
        &self,
        actor: &str,
        action: &str,
        description: &str,
        ip: Option<&str>,
    ) {
        self.append(actor, action, description, false, ip).await;
    }

    async fn append(
        &self,
        actor: &str,
        action: &str,
        description: &str,
        success: bool,
        ip: Option<&str>,
    ) {
        let entry = NewAccessLogEntry {
            officer_id: actor.to_string(),
            action: action.to_string(),
            description: description.to_string(),
            success,
            ip_address: ip.map(str::to_string),
        };

        if let Err(e) = self.store.append(entry).await {
            warn!(
                officer_id = %actor,
                action = %action,
                error = %e,
                "Failed to write access log entry"
            );
        }
    }
}
