//! Investigation entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Progress of an investigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "investigation_status")]
pub enum InvestigationStatus {
    /// Work in progress.
    Open,
    /// Findings recorded.
    Completed,
}

/// Investigative work attached to a case (`investigation`).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Investigation {
    /// Unique investigation identifier.
    pub id: Uuid,
    /// The case under investigation.
    pub case_id: Uuid,
    /// Officer leading the investigation.
    pub lead_officer_id: String,
    /// Open or completed.
    pub status: InvestigationStatus,
    /// Findings, recorded on completion.
    pub findings: Option<String>,
    /// Target completion date.
    pub due_date: Option<NaiveDate>,
    /// When the investigation was opened.
    pub opened_at: DateTime<Utc>,
    /// When it was completed.
    pub completed_at: Option<DateTime<Utc>>,
}

/// Data required to open an investigation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewInvestigation {
    /// The case.
    pub case_id: Uuid,
    /// Lead officer.
    pub lead_officer_id: String,
    /// Target completion date.
    pub due_date: Option<NaiveDate>,
}

/// Investigation listing filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvestigationFilter {
    /// Only this status.
    pub status: Option<InvestigationStatus>,
    /// Only investigations led by this officer.
    pub lead_officer_id: Option<String>,
}

impl InvestigationFilter {
    /// Evaluate the filter against one investigation.
    pub fn matches(&self, investigation: &Investigation) -> bool {
        self.status.is_none_or(|s| s == investigation.status)
            && self
                .lead_officer_id
                .as_deref()
                .is_none_or(|o| o == investigation.lead_officer_id)
    }
}
