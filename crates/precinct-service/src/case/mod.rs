//! Complaints, cases, assignments and investigations.

pub mod complaint;
pub mod investigation;
pub mod service;

pub use complaint::{CaseFromComplaintRequest, FileComplaintRequest};
pub use investigation::OpenInvestigationRequest;
pub use service::{AssignOfficerRequest, CaseDetail, CaseManager, CreateCaseRequest};
