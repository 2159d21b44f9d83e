//! Case status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a case. `Closed` and `Dropped` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "case_status")]
pub enum CaseStatus {
    /// Under active investigation.
    Active,
    /// Waiting on information or resources.
    Pending,
    /// Resolved.
    Closed,
    /// Abandoned without resolution.
    Dropped,
}

impl CaseStatus {
    /// Whether no further transitions are allowed.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed | Self::Dropped)
    }

    /// Whether a case may move from `self` to `next`.
    pub fn can_transition_to(&self, next: CaseStatus) -> bool {
        !self.is_terminal() && *self != next
    }

    /// Return the status label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Pending => "Pending",
            Self::Closed => "Closed",
            Self::Dropped => "Dropped",
        }
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CaseStatus {
    type Err = precinct_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "pending" => Ok(Self::Pending),
            "closed" => Ok(Self::Closed),
            "dropped" => Ok(Self::Dropped),
            _ => Err(precinct_core::AppError::validation(format!(
                "Invalid case status: '{s}'. Expected one of: Active, Pending, Closed, Dropped"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states_are_final() {
        for next in [CaseStatus::Active, CaseStatus::Pending, CaseStatus::Dropped] {
            assert!(!CaseStatus::Closed.can_transition_to(next));
        }
        assert!(!CaseStatus::Dropped.can_transition_to(CaseStatus::Active));
        assert!(CaseStatus::Pending.can_transition_to(CaseStatus::Active));
        assert!(CaseStatus::Active.can_transition_to(CaseStatus::Closed));
        assert!(!CaseStatus::Active.can_transition_to(CaseStatus::Active));
    }
}
