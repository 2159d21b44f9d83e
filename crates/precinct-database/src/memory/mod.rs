//! In-memory backend implementing every store trait.
//!
//! Suitable for demos and tests only. Data lives in one process and is lost
//! on restart. Transactions take the write lock for their whole lifetime,
//! work on a copy of the state and swap it in on commit.
//!
//! [`FaultPoint`]s let tests make a chosen write fail, which is how
//! rollback behavior is exercised without a real database.

mod state;
mod stats;
mod stores;
mod transaction;

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use precinct_core::error::AppError;
use precinct_core::result::AppResult;

use self::state::MemoryState;
pub use self::transaction::MemoryTransaction;

/// A write that can be forced to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultPoint {
    /// Inserting a case inside a transaction.
    CaseInsert,
    /// Changing a complaint's status.
    ComplaintUpdate,
    /// Inserting a case assignment.
    AssignmentInsert,
    /// Recording a decision on a resource request.
    RequestUpdate,
    /// Adjusting resource stock.
    ResourceAdjust,
    /// Inserting a duty.
    DutyInsert,
    /// Appending to the access log.
    AuditAppend,
    /// Evaluating any counting metric.
    StatsCount,
    /// Committing a transaction.
    Commit,
}

/// Shared in-memory database.
#[derive(Debug, Clone, Default)]
pub struct MemoryDatabase {
    state: Arc<RwLock<MemoryState>>,
    faults: Arc<Mutex<HashSet<FaultPoint>>>,
}

impl MemoryDatabase {
    /// Create an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write at `point` fail until cleared.
    pub async fn inject_failure(&self, point: FaultPoint) {
        debug!(?point, "Injecting failure");
        self.faults.lock().await.insert(point);
    }

    /// Remove all injected failures.
    pub async fn clear_failures(&self) {
        self.faults.lock().await.clear();
    }

    async fn check(&self, point: FaultPoint) -> AppResult<()> {
        check_fault(&self.faults, point).await
    }
}

pub(crate) async fn check_fault(
    faults: &Mutex<HashSet<FaultPoint>>,
    point: FaultPoint,
) -> AppResult<()> {
    if faults.lock().await.contains(&point) {
        return Err(AppError::database(format!(
            "injected failure at {point:?}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;
    use crate::store::Metric;
    use chrono::Utc;
    use precinct_core::error::ErrorKind;
    use precinct_core::types::PageRequest;
    use precinct_entity::case::{AssignmentRole, CaseFilter, CaseStatus, NewAssignment, NewCase};
    use precinct_entity::officer::{NewOfficer, Rank};
    use precinct_entity::resource::{NewResource, NewResourceRequest, RequestStatus, Urgency};

    fn officer(id: &str, rank: Rank) -> NewOfficer {
        NewOfficer {
            officer_id: id.to_string(),
            name: format!("Officer {id}"),
            gender: None,
            rank,
            designation: None,
            email: None,
            phone: None,
            password_hash: "hash".to_string(),
        }
    }

    fn new_case(officer_id: &str) -> NewCase {
        NewCase {
            complaint_id: None,
            title: "Burglary on Elm Street".to_string(),
            description: None,
            case_type: "Criminal".to_string(),
            status: CaseStatus::Active,
            officer_id: officer_id.to_string(),
            created_by: officer_id.to_string(),
        }
    }

    #[tokio::test]
    async fn test_dropped_transaction_discards_writes() {
        let db = Database::memory(MemoryDatabase::new());
        {
            let mut tx = db.transactions.begin().await.unwrap();
            tx.insert_case(new_case("C-1")).await.unwrap();
        }
        let cases = db
            .cases
            .list(&CaseFilter::default(), &PageRequest::default())
            .await
            .unwrap();
        assert_eq!(cases.total_items, 0);
    }

    #[tokio::test]
    async fn test_committed_transaction_is_visible() {
        let db = Database::memory(MemoryDatabase::new());
        let mut tx = db.transactions.begin().await.unwrap();
        let case = tx.insert_case(new_case("C-1")).await.unwrap();
        tx.commit().await.unwrap();

        assert!(db.cases.find_by_id(case.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_injected_failure_then_clear() {
        let memory = MemoryDatabase::new();
        let db = Database::memory(memory.clone());
        memory.inject_failure(FaultPoint::CaseInsert).await;

        let mut tx = db.transactions.begin().await.unwrap();
        let err = tx.insert_case(new_case("C-1")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Database);
        drop(tx);

        memory.clear_failures().await;
        let mut tx = db.transactions.begin().await.unwrap();
        tx.insert_case(new_case("C-1")).await.unwrap();
        tx.commit().await.unwrap();
    }

    #[tokio::test]
    async fn test_second_active_assignment_conflicts() {
        let db = Database::memory(MemoryDatabase::new());
        let mut tx = db.transactions.begin().await.unwrap();
        let case = tx.insert_case(new_case("C-1")).await.unwrap();
        let assignment = NewAssignment {
            case_id: case.id,
            officer_id: "C-2".to_string(),
            role: AssignmentRole::SupportingOfficer,
            assigned_by: "I-1".to_string(),
        };
        tx.insert_assignment(assignment.clone()).await.unwrap();
        let err = tx.insert_assignment(assignment).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_stock_never_goes_negative() {
        let db = Database::memory(MemoryDatabase::new());
        let radio = db
            .resources
            .insert(NewResource {
                name: "Radio".to_string(),
                category: "Communications".to_string(),
                quantity_available: 2,
                description: None,
                attachment_path: None,
                created_by: "A-1".to_string(),
            })
            .await
            .unwrap();

        let mut tx = db.transactions.begin().await.unwrap();
        let err = tx.adjust_resource_quantity(radio.id, -3).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        let left = tx.adjust_resource_quantity(radio.id, -2).await.unwrap();
        assert_eq!(left.quantity_available, 0);
    }

    #[tokio::test]
    async fn test_decided_request_cannot_be_decided_again() {
        let db = Database::memory(MemoryDatabase::new());
        let request = db
            .requests
            .insert(NewResourceRequest {
                resource_id: uuid::Uuid::new_v4(),
                officer_id: "C-1".to_string(),
                quantity: 1,
                reason: "Patrol".to_string(),
                urgency: Urgency::Low,
            })
            .await
            .unwrap();

        let mut tx = db.transactions.begin().await.unwrap();
        tx.set_request_status(request.id, RequestStatus::Rejected, "I-1")
            .await
            .unwrap();
        let err = tx
            .set_request_status(request.id, RequestStatus::Approved, "I-1")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_metrics_scope_by_officer() {
        let db = Database::memory(MemoryDatabase::new());
        db.officers.insert(officer("C-1", Rank::Constable)).await.unwrap();
        db.officers.insert(officer("C-2", Rank::Constable)).await.unwrap();
        db.officers.set_disabled("C-2", true).await.unwrap();

        let mut tx = db.transactions.begin().await.unwrap();
        tx.insert_case(new_case("C-1")).await.unwrap();
        tx.insert_case(new_case("C-2")).await.unwrap();
        tx.commit().await.unwrap();

        let own = Metric::Cases {
            status: None,
            case_types: Vec::new(),
            officer_id: Some("C-1".to_string()),
        };
        assert_eq!(db.stats.count(&own).await.unwrap(), 1);
        assert_eq!(db.stats.count(&Metric::all_cases()).await.unwrap(), 2);
        let disabled = Metric::Officers {
            disabled: Some(true),
            designation: None,
        };
        assert_eq!(db.stats.count(&disabled).await.unwrap(), 1);
        let since = Metric::CasesOpenedSince {
            since: Utc::now() - chrono::Duration::hours(1),
        };
        assert_eq!(db.stats.count(&since).await.unwrap(), 2);
        assert_eq!(
            db.stats.officers_per_rank().await.unwrap(),
            vec![(Rank::Constable, 1)]
        );
    }
}
