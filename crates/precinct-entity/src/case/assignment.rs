//! Case-to-officer assignment entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Role an officer plays on a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "assignment_role")]
pub enum AssignmentRole {
    /// Leads the investigation.
    #[serde(rename = "Lead Investigator")]
    #[sqlx(rename = "Lead Investigator")]
    LeadInvestigator,
    /// Assists the lead.
    #[serde(rename = "Supporting Officer")]
    #[sqlx(rename = "Supporting Officer")]
    SupportingOfficer,
}

impl AssignmentRole {
    /// Return the role label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LeadInvestigator => "Lead Investigator",
            Self::SupportingOfficer => "Supporting Officer",
        }
    }
}

/// Whether an assignment is still in force.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "assignment_status")]
pub enum AssignmentStatus {
    /// The officer is currently working the case.
    Active,
    /// The officer's part is finished.
    Completed,
}

/// One officer's assignment to one case (`case_assignments`).
///
/// At most one `Active` assignment exists per (case, officer) pair.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CaseAssignment {
    /// Unique assignment identifier.
    pub id: Uuid,
    /// The case.
    pub case_id: Uuid,
    /// The assigned officer.
    pub officer_id: String,
    /// Role on the case.
    pub role: AssignmentRole,
    /// Active or completed.
    pub status: AssignmentStatus,
    /// Officer who made the assignment.
    pub assigned_by: String,
    /// When the assignment was made.
    pub assigned_at: DateTime<Utc>,
    /// When the assignment was completed.
    pub completed_at: Option<DateTime<Utc>>,
}

/// Data required to assign an officer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAssignment {
    /// The case.
    pub case_id: Uuid,
    /// The assigned officer.
    pub officer_id: String,
    /// Role on the case.
    pub role: AssignmentRole,
    /// Officer making the assignment.
    pub assigned_by: String,
}

impl NewAssignment {
    /// Materialize an active assignment row.
    pub fn into_assignment(self, now: DateTime<Utc>) -> CaseAssignment {
        CaseAssignment {
            id: Uuid::new_v4(),
            case_id: self.case_id,
            officer_id: self.officer_id,
            role: self.role,
            status: AssignmentStatus::Active,
            assigned_by: self.assigned_by,
            assigned_at: now,
            completed_at: None,
        }
    }
}
