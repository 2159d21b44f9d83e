//! PostgreSQL implementations of the store traits.

pub mod assignment;
pub mod audit;
pub mod case;
pub mod complaint;
pub mod duty;
pub mod investigation;
pub mod officer;
pub mod request;
pub mod resource;
pub mod stats;
pub mod transaction;

pub use assignment::AssignmentRepository;
pub use audit::AuditRepository;
pub use case::CaseRepository;
pub use complaint::ComplaintRepository;
pub use duty::DutyRepository;
pub use investigation::InvestigationRepository;
pub use officer::OfficerRepository;
pub use request::RequestRepository;
pub use resource::ResourceRepository;
pub use stats::StatsRepository;
pub use transaction::{PgStoreTransaction, PgTransactionSource};

use precinct_core::error::{AppError, ErrorKind};

/// Map a driver error to an [`AppError`], turning unique violations into
/// conflicts.
pub(crate) fn db_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| {
        let unique = matches!(&e, sqlx::Error::Database(db) if db.is_unique_violation());
        if unique {
            AppError::with_source(ErrorKind::Conflict, format!("{context}: duplicate record"), e)
        } else {
            AppError::with_source(ErrorKind::Database, context, e)
        }
    }
}
