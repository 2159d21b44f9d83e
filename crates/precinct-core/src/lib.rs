//! # precinct-core
//!
//! Core crate for the Precinct records service. Contains configuration
//! schemas, pagination types, collaborator traits, and the unified error
//! system.
//!
//! This crate has **no** internal dependencies on other Precinct crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
