//! Dashboard response shapes.

use serde::Serialize;

use precinct_auth::{DashboardCategory, NavItem};
use precinct_entity::audit::AccessLogEntry;
use precinct_entity::case::{Case, Investigation};
use precinct_entity::complaint::Complaint;
use precinct_entity::duty::Duty;

/// Everything one dashboard shows.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardPayload {
    pub category: DashboardCategory,
    pub overview: Vec<Stat>,
    pub recent_activity: RecentActivity,
    pub quick_stats: Vec<Stat>,
    pub navigation: &'static [NavItem],
}

impl DashboardPayload {
    /// Look up a stat by key in the overview, then the quick stats.
    pub fn stat(&self, key: &str) -> Option<&StatValue> {
        self.overview
            .iter()
            .chain(self.quick_stats.iter())
            .find(|s| s.key == key)
            .map(|s| &s.value)
    }
}

/// One labelled figure.
#[derive(Debug, Clone, Serialize)]
pub struct Stat {
    pub key: &'static str,
    pub label: &'static str,
    pub value: StatValue,
}

/// A figure's value.
///
/// `NotImplemented` marks a placeholder statistic that has no query behind
/// it yet; clients render it as unavailable rather than as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum StatValue {
    Count(i64),
    Breakdown(Vec<StatEntry>),
    NotImplemented,
}

impl StatValue {
    /// The count, if this is a plain count.
    pub fn as_count(&self) -> Option<i64> {
        match self {
            Self::Count(n) => Some(*n),
            _ => None,
        }
    }
}

/// One row of a breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatEntry {
    pub label: String,
    pub count: i64,
}

/// Most recent rows of the table the dashboard centres on.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum RecentActivity {
    Cases(Vec<Case>),
    Complaints(Vec<Complaint>),
    Investigations(Vec<Investigation>),
    AccessLogs(Vec<AccessLogEntry>),
    Duties(Vec<Duty>),
}

impl RecentActivity {
    pub fn len(&self) -> usize {
        match self {
            Self::Cases(v) => v.len(),
            Self::Complaints(v) => v.len(),
            Self::Investigations(v) => v.len(),
            Self::AccessLogs(v) => v.len(),
            Self::Duties(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
