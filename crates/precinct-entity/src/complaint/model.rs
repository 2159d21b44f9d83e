//! Complaint entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::ComplaintStatus;

/// A citizen-filed report, stored in `complaints`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Complaint {
    /// Unique complaint identifier.
    pub id: Uuid,
    /// Name of the complainant.
    pub complainant_name: String,
    /// Phone or email of the complainant.
    pub complainant_contact: Option<String>,
    /// Category of the complaint (Theft, Assault, Traffic, ...).
    pub complaint_type: String,
    /// Where the incident happened.
    pub location: Option<String>,
    /// Narrative.
    pub description: String,
    /// Workflow status.
    pub status: ComplaintStatus,
    /// Officer who took the report (`officerid`).
    pub officer_id: String,
    /// When the complaint was filed.
    pub created_at: DateTime<Utc>,
    /// When the complaint last changed.
    pub updated_at: DateTime<Utc>,
}

/// Data required to file a complaint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComplaint {
    /// Name of the complainant.
    pub complainant_name: String,
    /// Phone or email.
    pub complainant_contact: Option<String>,
    /// Category.
    pub complaint_type: String,
    /// Incident location.
    pub location: Option<String>,
    /// Narrative.
    pub description: String,
    /// Officer taking the report.
    pub officer_id: String,
}

impl NewComplaint {
    /// Materialize a complaint awaiting action.
    pub fn into_complaint(self, now: DateTime<Utc>) -> Complaint {
        Complaint {
            id: Uuid::new_v4(),
            complainant_name: self.complainant_name,
            complainant_contact: self.complainant_contact,
            complaint_type: self.complaint_type,
            location: self.location,
            description: self.description,
            status: ComplaintStatus::WaitingForAction,
            officer_id: self.officer_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Complaint listing filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComplaintFilter {
    /// Only this status.
    pub status: Option<ComplaintStatus>,
    /// Only complaints taken by this officer.
    pub officer_id: Option<String>,
}

impl ComplaintFilter {
    /// Evaluate the filter against one complaint.
    pub fn matches(&self, complaint: &Complaint) -> bool {
        self.status.is_none_or(|s| s == complaint.status)
            && self
                .officer_id
                .as_deref()
                .is_none_or(|o| o == complaint.officer_id)
    }
}
