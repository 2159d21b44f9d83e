//! Access log entities.

pub mod model;

pub use model::{AccessLogEntry, AccessLogFilter, NewAccessLogEntry, action};
