//! Citizen complaint entities.

pub mod model;
pub mod status;

pub use model::{Complaint, ComplaintFilter, NewComplaint};
pub use status::ComplaintStatus;
