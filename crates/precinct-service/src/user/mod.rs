//! Officer account management.

pub mod service;

pub use service::{CreateOfficerRequest, UserManager};
