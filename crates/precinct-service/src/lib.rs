//! # precinct-service
//!
//! Business logic for the Precinct records service. Each manager receives
//! its stores at construction time as `Arc` handles and takes the calling
//! officer as a [`RequestContext`].
//!
//! Every successful mutation appends one access-log row through the shared
//! [`AuditWriter`](precinct_auth::AuditWriter) after its writes are durable.

pub mod access_log;
pub mod case;
pub mod context;
pub mod dashboard;
pub mod duty;
mod failure;
pub mod resource;
pub mod user;

#[cfg(test)]
mod testing;

pub use access_log::AccessLogManager;
pub use case::CaseManager;
pub use context::RequestContext;
pub use dashboard::{DashboardManager, DashboardPayload};
pub use duty::DutyManager;
pub use resource::ResourceManager;
pub use user::UserManager;
