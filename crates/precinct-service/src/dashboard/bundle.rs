//! Category to query-bundle mapping.
//!
//! A bundle is plain data: which figures to count, which recent rows to
//! fetch and which quick stats to show. Nothing here touches a store, so
//! the table can be checked without a database.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};

use precinct_auth::DashboardCategory;
use precinct_database::store::Metric;
use precinct_entity::case::{
    CaseStatus, INVESTIGATIVE_CASE_TYPES, InvestigationStatus, TRAFFIC_CASE_TYPE,
};
use precinct_entity::complaint::ComplaintStatus;
use precinct_entity::officer::designation::CID;
use precinct_entity::resource::RequestStatus;

/// Inputs a bundle may scope its queries by.
#[derive(Debug, Clone)]
pub struct BundleScope {
    /// The viewing officer.
    pub officer_id: String,
    /// Today's date (UTC).
    pub today: NaiveDate,
    /// Midnight on the first day of the current month (UTC).
    pub month_start: DateTime<Utc>,
}

impl BundleScope {
    pub fn at(officer_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        let today = now.date_naive();
        let month_start = today
            .with_day(1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|d| Utc.from_utc_datetime(&d))
            .unwrap_or(now);
        Self {
            officer_id: officer_id.into(),
            today,
            month_start,
        }
    }

    fn me(&self) -> Option<String> {
        Some(self.officer_id.clone())
    }
}

/// Where a figure comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatSource {
    Metric(Metric),
    OfficersPerRank,
    /// Placeholder with no query behind it.
    NotImplemented,
}

/// One figure to compute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub source: StatSource,
}

/// Which recent rows to list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecentSpec {
    Cases { officer_id: Option<String> },
    Complaints,
    Investigations { lead_officer_id: Option<String> },
    AccessLogs,
    Duties {
        officer_id: Option<String>,
        from: NaiveDate,
        to: NaiveDate,
    },
}

/// Everything one category's dashboard queries.
#[derive(Debug, Clone)]
pub struct BundleSpec {
    pub overview: Vec<StatSpec>,
    pub recent: RecentSpec,
    pub quick_stats: Vec<StatSpec>,
}

type BundleFn = fn(&BundleScope) -> BundleSpec;

/// The mapping table. Every category has exactly one entry.
const BUNDLES: [(DashboardCategory, BundleFn); 8] = [
    (DashboardCategory::Admin, admin),
    (DashboardCategory::ChiefInspector, chief_inspector),
    (DashboardCategory::CidSuperior, cid_superior),
    (DashboardCategory::Cid, cid),
    (DashboardCategory::Traffic, traffic),
    (DashboardCategory::Inspector, inspector),
    (DashboardCategory::Sergeant, sergeant),
    (DashboardCategory::Constable, constable),
];

/// Resolve the bundle for `category`.
pub fn bundle_for(category: DashboardCategory, scope: &BundleScope) -> BundleSpec {
    let build = BUNDLES
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, f)| *f)
        .unwrap_or(constable);
    build(scope)
}

fn count(key: &'static str, label: &'static str, metric: Metric) -> StatSpec {
    StatSpec {
        key,
        label,
        source: StatSource::Metric(metric),
    }
}

fn placeholder(key: &'static str, label: &'static str) -> StatSpec {
    StatSpec {
        key,
        label,
        source: StatSource::NotImplemented,
    }
}

fn officers(disabled: Option<bool>) -> Metric {
    Metric::Officers {
        disabled,
        designation: None,
    }
}

fn complaints_waiting() -> Metric {
    Metric::Complaints {
        status: Some(ComplaintStatus::WaitingForAction),
    }
}

fn pending_requests(officer_id: Option<String>) -> Metric {
    Metric::ResourceRequests {
        status: Some(RequestStatus::Pending),
        officer_id,
    }
}

fn investigations(status: InvestigationStatus, lead_officer_id: Option<String>) -> Metric {
    Metric::Investigations {
        status: Some(status),
        lead_officer_id,
    }
}

fn cases_opened_this_month(scope: &BundleScope) -> StatSpec {
    count(
        "cases_this_month",
        "Cases opened this month",
        Metric::CasesOpenedSince {
            since: scope.month_start,
        },
    )
}

fn admin(scope: &BundleScope) -> BundleSpec {
    BundleSpec {
        overview: vec![
            count("officers_total", "Officers", officers(None)),
            count("officers_active", "Active officers", officers(Some(false))),
            count("officers_disabled", "Disabled officers", officers(Some(true))),
            count("cases_total", "Cases", Metric::all_cases()),
            count(
                "cases_active",
                "Active cases",
                Metric::cases_with_status(CaseStatus::Active),
            ),
            count(
                "cases_closed",
                "Closed cases",
                Metric::cases_with_status(CaseStatus::Closed),
            ),
            count(
                "complaints_waiting",
                "Complaints awaiting action",
                complaints_waiting(),
            ),
            count(
                "requests_pending",
                "Pending resource requests",
                pending_requests(None),
            ),
        ],
        recent: RecentSpec::AccessLogs,
        quick_stats: vec![
            cases_opened_this_month(scope),
            StatSpec {
                key: "officers_per_rank",
                label: "Officers per rank",
                source: StatSource::OfficersPerRank,
            },
        ],
    }
}

fn chief_inspector(scope: &BundleScope) -> BundleSpec {
    BundleSpec {
        overview: vec![
            count("cases_total", "Cases", Metric::all_cases()),
            count(
                "cases_active",
                "Active cases",
                Metric::cases_with_status(CaseStatus::Active),
            ),
            count(
                "complaints_total",
                "Complaints",
                Metric::Complaints { status: None },
            ),
            count(
                "complaints_waiting",
                "Complaints awaiting action",
                complaints_waiting(),
            ),
            count(
                "investigations_open",
                "Open investigations",
                investigations(InvestigationStatus::Open, None),
            ),
            count(
                "requests_pending",
                "Pending resource requests",
                pending_requests(None),
            ),
            count("officers_active", "Active officers", officers(Some(false))),
        ],
        recent: RecentSpec::Cases { officer_id: None },
        quick_stats: vec![
            cases_opened_this_month(scope),
            count(
                "investigations_completed",
                "Completed investigations",
                investigations(InvestigationStatus::Completed, None),
            ),
            placeholder("team_performance", "Team performance"),
        ],
    }
}

fn cid_superior(_scope: &BundleScope) -> BundleSpec {
    BundleSpec {
        overview: vec![
            count(
                "cid_officers",
                "CID officers",
                Metric::Officers {
                    disabled: Some(false),
                    designation: Some(CID.to_string()),
                },
            ),
            count(
                "investigations_open",
                "Open investigations",
                investigations(InvestigationStatus::Open, None),
            ),
            count(
                "investigations_completed",
                "Completed investigations",
                investigations(InvestigationStatus::Completed, None),
            ),
            count(
                "investigative_cases_active",
                "Active investigative cases",
                Metric::Cases {
                    status: Some(CaseStatus::Active),
                    case_types: INVESTIGATIVE_CASE_TYPES
                        .iter()
                        .map(|t| t.to_string())
                        .collect(),
                    officer_id: None,
                },
            ),
        ],
        recent: RecentSpec::Investigations {
            lead_officer_id: None,
        },
        quick_stats: vec![placeholder(
            "overdue_investigations",
            "Overdue investigations",
        )],
    }
}

fn cid(scope: &BundleScope) -> BundleSpec {
    BundleSpec {
        overview: vec![
            count(
                "my_investigations_open",
                "My open investigations",
                investigations(InvestigationStatus::Open, scope.me()),
            ),
            count(
                "my_investigations_completed",
                "My completed investigations",
                investigations(InvestigationStatus::Completed, scope.me()),
            ),
            count(
                "my_active_assignments",
                "My active assignments",
                Metric::ActiveAssignments {
                    officer_id: scope.officer_id.clone(),
                },
            ),
        ],
        recent: RecentSpec::Cases {
            officer_id: scope.me(),
        },
        quick_stats: Vec::new(),
    }
}

fn traffic(scope: &BundleScope) -> BundleSpec {
    let traffic_cases = |status: Option<CaseStatus>, officer_id: Option<String>| Metric::Cases {
        status,
        case_types: vec![TRAFFIC_CASE_TYPE.to_string()],
        officer_id,
    };
    BundleSpec {
        overview: vec![
            count(
                "traffic_cases_active",
                "Active traffic cases",
                traffic_cases(Some(CaseStatus::Active), None),
            ),
            count(
                "my_traffic_cases",
                "My traffic cases",
                traffic_cases(None, scope.me()),
            ),
        ],
        recent: RecentSpec::Duties {
            officer_id: scope.me(),
            from: scope.today,
            to: scope.today,
        },
        quick_stats: vec![count(
            "my_duties_today",
            "My duties today",
            Metric::Duties {
                from: scope.today,
                to: Some(scope.today),
                officer_id: scope.me(),
            },
        )],
    }
}

fn inspector(_scope: &BundleScope) -> BundleSpec {
    BundleSpec {
        overview: vec![
            count(
                "cases_active",
                "Active cases",
                Metric::cases_with_status(CaseStatus::Active),
            ),
            count(
                "cases_pending",
                "Pending cases",
                Metric::cases_with_status(CaseStatus::Pending),
            ),
            count(
                "complaints_waiting",
                "Complaints awaiting action",
                complaints_waiting(),
            ),
            count(
                "requests_pending",
                "Pending resource requests",
                pending_requests(None),
            ),
        ],
        recent: RecentSpec::Complaints,
        quick_stats: Vec::new(),
    }
}

fn sergeant(scope: &BundleScope) -> BundleSpec {
    BundleSpec {
        overview: vec![
            count(
                "cases_active",
                "Active cases",
                Metric::cases_with_status(CaseStatus::Active),
            ),
            count(
                "duties_today",
                "Duties today",
                Metric::Duties {
                    from: scope.today,
                    to: Some(scope.today),
                    officer_id: None,
                },
            ),
            count(
                "my_cases",
                "My cases",
                Metric::Cases {
                    status: None,
                    case_types: Vec::new(),
                    officer_id: scope.me(),
                },
            ),
        ],
        recent: RecentSpec::Cases { officer_id: None },
        quick_stats: Vec::new(),
    }
}

fn constable(scope: &BundleScope) -> BundleSpec {
    let my_cases = |status: Option<CaseStatus>| Metric::Cases {
        status,
        case_types: Vec::new(),
        officer_id: scope.me(),
    };
    BundleSpec {
        overview: vec![
            count("my_cases", "My cases", my_cases(None)),
            count(
                "my_active_cases",
                "My active cases",
                my_cases(Some(CaseStatus::Active)),
            ),
            count(
                "my_upcoming_duties",
                "My upcoming duties",
                Metric::Duties {
                    from: scope.today,
                    to: None,
                    officer_id: scope.me(),
                },
            ),
            count(
                "my_pending_requests",
                "My pending resource requests",
                pending_requests(scope.me()),
            ),
        ],
        recent: RecentSpec::Cases {
            officer_id: scope.me(),
        },
        quick_stats: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope() -> BundleScope {
        let now = Utc.with_ymd_and_hms(2026, 3, 17, 14, 30, 0).unwrap();
        BundleScope::at("C-7", now)
    }

    fn metrics(spec: &BundleSpec) -> Vec<&Metric> {
        spec.overview
            .iter()
            .chain(spec.quick_stats.iter())
            .filter_map(|s| match &s.source {
                StatSource::Metric(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_every_category_has_a_bundle() {
        let scope = scope();
        for category in DashboardCategory::ALL {
            assert!(
                BUNDLES.iter().any(|(c, _)| *c == category),
                "{category} missing"
            );
            assert!(!bundle_for(category, &scope).overview.is_empty());
        }
    }

    #[test]
    fn test_month_start() {
        let scope = scope();
        assert_eq!(
            scope.month_start,
            Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(scope.today, NaiveDate::from_ymd_opt(2026, 3, 17).unwrap());
    }

    #[test]
    fn test_constable_counts_are_self_scoped() {
        let spec = bundle_for(DashboardCategory::Constable, &scope());
        for metric in metrics(&spec) {
            let owner = match metric {
                Metric::Cases { officer_id, .. }
                | Metric::ResourceRequests { officer_id, .. }
                | Metric::Duties { officer_id, .. } => officer_id.clone(),
                other => panic!("unexpected metric {other:?}"),
            };
            assert_eq!(owner.as_deref(), Some("C-7"));
        }
        assert_eq!(
            spec.recent,
            RecentSpec::Cases {
                officer_id: Some("C-7".to_string())
            }
        );
    }

    #[test]
    fn test_placeholders_are_explicit() {
        let scope = scope();
        let chief = bundle_for(DashboardCategory::ChiefInspector, &scope);
        let superior = bundle_for(DashboardCategory::CidSuperior, &scope);
        let team = chief
            .quick_stats
            .iter()
            .find(|s| s.key == "team_performance")
            .unwrap();
        let overdue = superior
            .quick_stats
            .iter()
            .find(|s| s.key == "overdue_investigations")
            .unwrap();
        assert_eq!(team.source, StatSource::NotImplemented);
        assert_eq!(overdue.source, StatSource::NotImplemented);
    }

    #[test]
    fn test_admin_sees_access_log() {
        let spec = bundle_for(DashboardCategory::Admin, &scope());
        assert_eq!(spec.recent, RecentSpec::AccessLogs);
        assert!(
            spec.quick_stats
                .iter()
                .any(|s| s.source == StatSource::OfficersPerRank)
        );
    }
}
