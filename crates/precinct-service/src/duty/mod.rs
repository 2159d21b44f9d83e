//! Duty roster.

pub mod service;

pub use service::{DutyDetail, DutyManager, ScheduleDutyRequest};
