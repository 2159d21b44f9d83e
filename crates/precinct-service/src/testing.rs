//! Fixtures shared by the manager tests.

use std::sync::Arc;

use chrono::Utc;

use precinct_auth::{AuditWriter, AuthenticatedOfficer};
use precinct_core::types::PageRequest;
use precinct_database::Database;
use precinct_database::memory::MemoryDatabase;
use precinct_entity::audit::AccessLogFilter;
use precinct_entity::officer::{NewOfficer, Officer, Rank};

use crate::context::RequestContext;

pub(crate) struct Fixture {
    pub memory: MemoryDatabase,
    pub db: Database,
}

impl Fixture {
    pub(crate) fn new() -> Self {
        let memory = MemoryDatabase::new();
        let db = Database::memory(memory.clone());
        Self { memory, db }
    }

    pub(crate) fn audit(&self) -> AuditWriter {
        AuditWriter::new(Arc::clone(&self.db.audit))
    }

    /// Insert an officer and return a context acting as them.
    pub(crate) async fn officer(
        &self,
        id: &str,
        rank: Rank,
        designation: Option<&str>,
    ) -> RequestContext {
        let officer = self
            .db
            .officers
            .insert(NewOfficer {
                officer_id: id.to_string(),
                name: format!("Officer {id}"),
                gender: None,
                rank,
                designation: designation.map(str::to_string),
                email: None,
                phone: None,
                password_hash: "unused".to_string(),
            })
            .await
            .unwrap();
        context(officer)
    }

    /// Access-log rows with `action`.
    pub(crate) async fn audit_count(&self, action: &str) -> u64 {
        let filter = AccessLogFilter {
            action: Some(action.to_string()),
            ..Default::default()
        };
        self.db
            .audit
            .list(&filter, &PageRequest::default())
            .await
            .unwrap()
            .total_items
    }
}

pub(crate) fn context(officer: Officer) -> RequestContext {
    RequestContext::new(
        AuthenticatedOfficer::from_officer(officer),
        Some("127.0.0.1".to_string()),
    )
}

/// A context for an officer that is not stored anywhere.
pub(crate) fn detached(id: &str, rank: Rank) -> RequestContext {
    let now = Utc::now();
    context(Officer {
        officer_id: id.to_string(),
        name: format!("Officer {id}"),
        gender: None,
        rank,
        designation: None,
        email: None,
        phone: None,
        password_hash: String::new(),
        disabled: false,
        created_at: now,
        updated_at: now,
    })
}
