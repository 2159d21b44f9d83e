//! Persistence failure reporting.

use tracing::error;

use precinct_core::error::AppError;

/// Log a persistence failure and replace it with "Failed to {operation}.".
///
/// Domain errors pass through unchanged.
pub(crate) fn failed(operation: &'static str) -> impl FnOnce(AppError) -> AppError {
    move |e| {
        if e.is_persistence() {
            error!(operation = %operation, error = %e, "Persistence failure");
        }
        e.into_operation_failure(operation)
    }
}
