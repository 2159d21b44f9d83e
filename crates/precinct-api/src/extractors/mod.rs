//! Custom Axum extractors.

pub mod auth;
pub mod client_ip;
pub mod json;
pub mod pagination;

pub use auth::AuthOfficer;
pub use client_ip::ClientIp;
pub use json::ValidatedJson;
pub use pagination::PaginationParams;
