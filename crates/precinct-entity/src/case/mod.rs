//! Case, assignment, and investigation entities.

pub mod assignment;
pub mod investigation;
pub mod model;
pub mod status;

pub use assignment::{AssignmentRole, AssignmentStatus, CaseAssignment, NewAssignment};
pub use investigation::{Investigation, InvestigationFilter, InvestigationStatus, NewInvestigation};
pub use model::{Case, CaseFilter, NewCase};
pub use status::CaseStatus;

/// Case types counted as investigative work on CID dashboards.
pub const INVESTIGATIVE_CASE_TYPES: [&str; 4] = ["Criminal", "Homicide", "Fraud", "Narcotics"];

/// Case type handled by the Traffic division.
pub const TRAFFIC_CASE_TYPE: &str = "Traffic";
