//! Case entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::CaseStatus;

/// An investigation unit, stored in `case_table`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Case {
    /// Unique case identifier.
    pub id: Uuid,
    /// Originating complaint, when the case was promoted from one.
    pub complaint_id: Option<Uuid>,
    /// Short title.
    pub title: String,
    /// Narrative.
    pub description: Option<String>,
    /// Case type (Criminal, Traffic, Fraud, ...).
    pub case_type: String,
    /// Lifecycle status.
    pub status: CaseStatus,
    /// Officer responsible for the case (`officerid`).
    pub officer_id: String,
    /// Officer who opened the case.
    pub created_by: String,
    /// When the case was opened.
    pub created_at: DateTime<Utc>,
    /// When the case last changed.
    pub updated_at: DateTime<Utc>,
    /// When the case reached a terminal status.
    pub closed_at: Option<DateTime<Utc>>,
}

/// Data required to open a case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCase {
    /// Originating complaint.
    pub complaint_id: Option<Uuid>,
    /// Short title.
    pub title: String,
    /// Narrative.
    pub description: Option<String>,
    /// Case type.
    pub case_type: String,
    /// Initial status.
    pub status: CaseStatus,
    /// Responsible officer.
    pub officer_id: String,
    /// Officer opening the case.
    pub created_by: String,
}

impl NewCase {
    /// Materialize the row this input describes.
    pub fn into_case(self, now: DateTime<Utc>) -> Case {
        Case {
            id: Uuid::new_v4(),
            complaint_id: self.complaint_id,
            title: self.title,
            description: self.description,
            case_type: self.case_type,
            status: self.status,
            officer_id: self.officer_id,
            created_by: self.created_by,
            created_at: now,
            updated_at: now,
            closed_at: None,
        }
    }
}

/// Case listing filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaseFilter {
    /// Only this status.
    pub status: Option<CaseStatus>,
    /// Only this case type.
    pub case_type: Option<String>,
    /// Only cases whose `officerid` equals this value.
    pub officer_id: Option<String>,
}

impl CaseFilter {
    /// Evaluate the filter against one case.
    pub fn matches(&self, case: &Case) -> bool {
        self.status.is_none_or(|s| s == case.status)
            && self
                .case_type
                .as_deref()
                .is_none_or(|t| t == case.case_type)
            && self
                .officer_id
                .as_deref()
                .is_none_or(|o| o == case.officer_id)
    }
}
