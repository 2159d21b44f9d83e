//! Complaint status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Workflow state of a complaint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "complaint_status")]
pub enum ComplaintStatus {
    /// Filed and awaiting triage.
    #[serde(rename = "Waiting for Action")]
    #[sqlx(rename = "Waiting for Action")]
    WaitingForAction,
    /// Promoted to a case.
    #[serde(rename = "Assigned as Case")]
    #[sqlx(rename = "Assigned as Case")]
    AssignedAsCase,
    /// Closed without opening a case.
    Resolved,
    /// Dismissed.
    Rejected,
}

impl ComplaintStatus {
    /// Return the status label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WaitingForAction => "Waiting for Action",
            Self::AssignedAsCase => "Assigned as Case",
            Self::Resolved => "Resolved",
            Self::Rejected => "Rejected",
        }
    }

    /// Whether a complaint may move from `self` to `next`.
    ///
    /// Only complaints waiting for action move, and only forward.
    pub fn can_transition_to(&self, next: ComplaintStatus) -> bool {
        *self == Self::WaitingForAction && next != Self::WaitingForAction
    }
}

impl fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ComplaintStatus {
    type Err = precinct_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Waiting for Action" => Ok(Self::WaitingForAction),
            "Assigned as Case" => Ok(Self::AssignedAsCase),
            "Resolved" => Ok(Self::Resolved),
            "Rejected" => Ok(Self::Rejected),
            _ => Err(precinct_core::AppError::validation(format!(
                "Invalid complaint status: '{s}'"
            ))),
        }
    }
}
