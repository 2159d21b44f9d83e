//! Read side of the access log.

use std::sync::Arc;

use precinct_core::error::AppError;
use precinct_core::types::{PageRequest, PageResponse};
use precinct_database::store::AuditStore;
use precinct_entity::audit::{AccessLogEntry, AccessLogFilter};
use precinct_entity::officer::Rank;

use crate::context::RequestContext;
use crate::failure::failed;

/// Lets administrators browse the audit trail.
#[derive(Debug, Clone)]
pub struct AccessLogManager {
    store: Arc<dyn AuditStore>,
}

impl AccessLogManager {
    pub fn new(store: Arc<dyn AuditStore>) -> Self {
        Self { store }
    }

    /// Entries newest first. Administrators only.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        filter: &AccessLogFilter,
        page: &PageRequest,
    ) -> Result<PageResponse<AccessLogEntry>, AppError> {
        ctx.require(Rank::Admin)?;
        self.store
            .list(filter, page)
            .await
            .map_err(failed("list access logs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;
    use precinct_core::error::ErrorKind;
    use precinct_entity::audit::action;

    #[tokio::test]
    async fn test_admin_only() {
        let fx = Fixture::new();
        let admin = fx.officer("A-1", Rank::Admin, None).await;
        let chief = fx.officer("CI-1", Rank::ChiefInspector, None).await;
        fx.audit()
            .record("A-1", action::LOGIN, "Signed in", None)
            .await;
        let logs = AccessLogManager::new(Arc::clone(&fx.db.audit));

        let page = logs
            .list(&admin, &AccessLogFilter::default(), &PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.total_items, 1);

        let err = logs
            .list(&chief, &AccessLogFilter::default(), &PageRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
    }
}
