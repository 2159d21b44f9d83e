//! Dashboard classification from rank and designation.

use serde::{Deserialize, Serialize};
use std::fmt;

use precinct_entity::officer::Officer;
use precinct_entity::officer::designation::{CID, TRAFFIC};

/// Which dashboard an officer sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardCategory {
    Admin,
    ChiefInspector,
    CidSuperior,
    Cid,
    Traffic,
    Inspector,
    Sergeant,
    Constable,
}

impl DashboardCategory {
    /// Every category.
    pub const ALL: [DashboardCategory; 8] = [
        Self::Admin,
        Self::ChiefInspector,
        Self::CidSuperior,
        Self::Cid,
        Self::Traffic,
        Self::Inspector,
        Self::Sergeant,
        Self::Constable,
    ];

    /// Snake-case name used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::ChiefInspector => "chief_inspector",
            Self::CidSuperior => "cid_superior",
            Self::Cid => "cid",
            Self::Traffic => "traffic",
            Self::Inspector => "inspector",
            Self::Sergeant => "sergeant",
            Self::Constable => "constable",
        }
    }
}

impl fmt::Display for DashboardCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify an officer. First matching rule wins; every input maps to
/// exactly one category.
pub fn classify(rank: &str, designation: Option<&str>) -> DashboardCategory {
    let is_cid = designation == Some(CID);
    match rank {
        "ADMIN" => DashboardCategory::Admin,
        "Chief Inspector" => DashboardCategory::ChiefInspector,
        "Inspector" if is_cid => DashboardCategory::CidSuperior,
        _ if is_cid => DashboardCategory::Cid,
        _ if designation == Some(TRAFFIC) => DashboardCategory::Traffic,
        "Inspector" => DashboardCategory::Inspector,
        "Sergeant" => DashboardCategory::Sergeant,
        _ => DashboardCategory::Constable,
    }
}

/// Classify a loaded officer record.
pub fn classify_officer(officer: &Officer) -> DashboardCategory {
    classify(officer.rank.as_str(), officer.designation.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documented_examples() {
        assert_eq!(classify("ADMIN", None), DashboardCategory::Admin);
        assert_eq!(classify("Inspector", Some("CID")), DashboardCategory::CidSuperior);
        assert_eq!(classify("Constable", Some("Traffic")), DashboardCategory::Traffic);
        assert_eq!(classify("Cadet", None), DashboardCategory::Constable);
    }

    #[test]
    fn test_rank_rules_take_priority_over_designation() {
        assert_eq!(classify("ADMIN", Some("CID")), DashboardCategory::Admin);
        assert_eq!(
            classify("Chief Inspector", Some("Traffic")),
            DashboardCategory::ChiefInspector
        );
        assert_eq!(classify("Sergeant", Some("CID")), DashboardCategory::Cid);
        assert_eq!(classify("Inspector", Some("Traffic")), DashboardCategory::Traffic);
        assert_eq!(classify("Inspector", Some("NCO")), DashboardCategory::Inspector);
        assert_eq!(classify("Sergeant", None), DashboardCategory::Sergeant);
    }

    #[test]
    fn test_total_over_arbitrary_input() {
        let ranks = ["ADMIN", "admin", "Chief Inspector", "Inspector", "Sergeant", "", "Major"];
        let designations = [None, Some("CID"), Some("Traffic"), Some("cid"), Some("")];
        for rank in ranks {
            for designation in designations {
                let first = classify(rank, designation);
                assert!(DashboardCategory::ALL.contains(&first));
                assert_eq!(classify(rank, designation), first);
            }
        }
        assert_eq!(classify("admin", None), DashboardCategory::Constable);
    }
}
