//! Officer rank enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Hierarchical seniority levels.
///
/// Ordered by level: ADMIN(6) > Chief Inspector(5) > Inspector(4) >
/// Sergeant(3) > Constable(2) > Cadet(1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "officer_rank")]
pub enum Rank {
    /// System administrator.
    #[serde(rename = "ADMIN")]
    #[sqlx(rename = "ADMIN")]
    Admin,
    /// Station commander.
    #[serde(rename = "Chief Inspector")]
    #[sqlx(rename = "Chief Inspector")]
    ChiefInspector,
    /// Supervising officer.
    Inspector,
    /// Team leader.
    Sergeant,
    /// Line officer.
    Constable,
    /// Officer in training.
    Cadet,
}

impl Rank {
    /// Every rank, most senior first.
    pub const ALL: [Rank; 6] = [
        Self::Admin,
        Self::ChiefInspector,
        Self::Inspector,
        Self::Sergeant,
        Self::Constable,
        Self::Cadet,
    ];

    /// Return the hierarchy level (higher = more senior).
    pub fn level(&self) -> u8 {
        match self {
            Self::Admin => 6,
            Self::ChiefInspector => 5,
            Self::Inspector => 4,
            Self::Sergeant => 3,
            Self::Constable => 2,
            Self::Cadet => 1,
        }
    }

    /// Check if this rank is at or above `other`.
    pub fn has_at_least(&self, other: &Rank) -> bool {
        self.level() >= other.level()
    }

    /// Return the rank label as stored and displayed.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::ChiefInspector => "Chief Inspector",
            Self::Inspector => "Inspector",
            Self::Sergeant => "Sergeant",
            Self::Constable => "Constable",
            Self::Cadet => "Cadet",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Rank {
    type Err = precinct_core::AppError;

    /// Exact labels only; `"admin"` is not `"ADMIN"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|rank| rank.as_str() == s)
            .ok_or_else(|| {
                precinct_core::AppError::validation(format!(
                    "Invalid rank: '{s}'. Expected one of: ADMIN, Chief Inspector, Inspector, Sergeant, Constable, Cadet"
                ))
            })
    }
}
