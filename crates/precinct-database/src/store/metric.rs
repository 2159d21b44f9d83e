//! Counting metrics evaluated by [`StatsStore::count`](super::StatsStore::count).

use chrono::{DateTime, NaiveDate, Utc};

use precinct_entity::case::{CaseStatus, InvestigationStatus};
use precinct_entity::complaint::ComplaintStatus;
use precinct_entity::resource::RequestStatus;

/// One `COUNT(*)` over one table with optional scoping.
///
/// `None` means "any"; an `officer_id` restricts the count to rows whose
/// owning officer column equals it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Metric {
    /// Officer accounts.
    Officers {
        disabled: Option<bool>,
        designation: Option<String>,
    },
    /// Cases.
    Cases {
        status: Option<CaseStatus>,
        /// Empty means every case type.
        case_types: Vec<String>,
        officer_id: Option<String>,
    },
    /// Cases created at or after `since`.
    CasesOpenedSince { since: DateTime<Utc> },
    /// Complaints.
    Complaints { status: Option<ComplaintStatus> },
    /// Investigations.
    Investigations {
        status: Option<InvestigationStatus>,
        lead_officer_id: Option<String>,
    },
    /// Active case assignments of one officer.
    ActiveAssignments { officer_id: String },
    /// Resource requests.
    ResourceRequests {
        status: Option<RequestStatus>,
        officer_id: Option<String>,
    },
    /// Duties from `from` through `to` (open-ended when `to` is `None`).
    Duties {
        from: NaiveDate,
        to: Option<NaiveDate>,
        officer_id: Option<String>,
    },
}

impl Metric {
    /// Every case, any status.
    pub fn all_cases() -> Self {
        Self::Cases {
            status: None,
            case_types: Vec::new(),
            officer_id: None,
        }
    }

    /// Cases in one status.
    pub fn cases_with_status(status: CaseStatus) -> Self {
        Self::Cases {
            status: Some(status),
            case_types: Vec::new(),
            officer_id: None,
        }
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Officers { .. } => "officers",
            Self::Cases { .. } => "cases",
            Self::CasesOpenedSince { .. } => "cases_opened_since",
            Self::Complaints { .. } => "complaints",
            Self::Investigations { .. } => "investigations",
            Self::ActiveAssignments { .. } => "active_assignments",
            Self::ResourceRequests { .. } => "resource_requests",
            Self::Duties { .. } => "duties",
        }
    }
}
