//! Convenience result type alias for Precinct.

use crate::error::AppError;

/// A specialized `Result` type for Precinct operations.
pub type AppResult<T> = Result<T, AppError>;
