//! Duty roster entities.

pub mod model;

pub use model::{Duty, DutyFilter, DutyResource, NewDuty};
