//! Tables of the in-memory backend.

use std::collections::BTreeMap;

use precinct_entity::audit::AccessLogEntry;
use precinct_entity::case::{Case, CaseAssignment, Investigation};
use precinct_entity::complaint::Complaint;
use precinct_entity::duty::{Duty, DutyResource};
use precinct_entity::officer::Officer;
use precinct_entity::resource::{Resource, ResourceRequest};

/// Every table. Vectors keep insertion order, so "newest first" is reverse
/// iteration.
#[derive(Debug, Clone, Default)]
pub(crate) struct MemoryState {
    pub officers: BTreeMap<String, Officer>,
    pub complaints: Vec<Complaint>,
    pub cases: Vec<Case>,
    pub assignments: Vec<CaseAssignment>,
    pub investigations: Vec<Investigation>,
    pub resources: Vec<Resource>,
    pub requests: Vec<ResourceRequest>,
    pub duties: Vec<Duty>,
    pub duty_resources: Vec<DutyResource>,
    pub access_logs: Vec<AccessLogEntry>,
}
