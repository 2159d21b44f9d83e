//! Menus per dashboard category and actions per rank.

use serde::{Serialize, Serializer};

use precinct_entity::officer::Rank;

use super::classifier::DashboardCategory;
use super::hierarchy::has_role;

/// A menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavItem {
    Dashboard,
    Cases,
    Complaints,
    Officers,
    Resources,
    ResourceApprovals,
    Duties,
    AuditLog,
    Investigations,
    TrafficReports,
}

impl NavItem {
    /// Stable key.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Cases => "cases",
            Self::Complaints => "complaints",
            Self::Officers => "officers",
            Self::Resources => "resources",
            Self::ResourceApprovals => "resource_approvals",
            Self::Duties => "duties",
            Self::AuditLog => "audit_log",
            Self::Investigations => "investigations",
            Self::TrafficReports => "traffic_reports",
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Cases => "Cases",
            Self::Complaints => "Complaints",
            Self::Officers => "Officers",
            Self::Resources => "Resources",
            Self::ResourceApprovals => "Resource Approvals",
            Self::Duties => "Duty Roster",
            Self::AuditLog => "Access Log",
            Self::Investigations => "Investigations",
            Self::TrafficReports => "Traffic Reports",
        }
    }

    /// API path backing the entry.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Dashboard => "/api/dashboard",
            Self::Cases => "/api/cases",
            Self::Complaints => "/api/complaints",
            Self::Officers => "/api/officers",
            Self::Resources => "/api/resources",
            Self::ResourceApprovals => "/api/resource-requests?status=Pending",
            Self::Duties => "/api/duties",
            Self::AuditLog => "/api/admin/access-logs",
            Self::Investigations => "/api/investigations",
            Self::TrafficReports => "/api/cases?case_type=Traffic",
        }
    }
}

impl Serialize for NavItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut item = serializer.serialize_struct("NavItem", 3)?;
        item.serialize_field("key", self.key())?;
        item.serialize_field("label", self.label())?;
        item.serialize_field("path", self.path())?;
        item.end()
    }
}

/// Ordered menu for a category.
pub fn navigation_for(category: DashboardCategory) -> &'static [NavItem] {
    use NavItem::*;
    match category {
        DashboardCategory::Admin => &[
            Dashboard,
            Officers,
            Cases,
            Complaints,
            Resources,
            ResourceApprovals,
            Duties,
            AuditLog,
        ],
        DashboardCategory::ChiefInspector => &[
            Dashboard,
            Cases,
            Complaints,
            Investigations,
            Officers,
            Resources,
            ResourceApprovals,
            Duties,
        ],
        DashboardCategory::CidSuperior => &[
            Dashboard,
            Investigations,
            Cases,
            Complaints,
            Resources,
            ResourceApprovals,
        ],
        DashboardCategory::Cid => &[Dashboard, Investigations, Cases, Resources],
        DashboardCategory::Traffic => &[Dashboard, TrafficReports, Cases, Duties, Resources],
        DashboardCategory::Inspector => &[
            Dashboard,
            Cases,
            Complaints,
            Resources,
            ResourceApprovals,
            Duties,
        ],
        DashboardCategory::Sergeant => &[Dashboard, Cases, Complaints, Duties, Resources],
        DashboardCategory::Constable => &[Dashboard, Cases, Duties, Resources],
    }
}

/// A mutation the client may offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    FileComplaint,
    RequestResource,
    ScheduleDuty,
    CreateCase,
    CreateCaseFromComplaint,
    AssignOfficer,
    ApproveResourceRequests,
    ManageOfficers,
    ManageInventory,
    ViewAccessLog,
}

impl Action {
    /// Least senior rank allowed to perform the action.
    pub fn minimum_rank(&self) -> Rank {
        match self {
            Self::FileComplaint | Self::RequestResource => Rank::Cadet,
            Self::ScheduleDuty => Rank::Sergeant,
            Self::CreateCase
            | Self::CreateCaseFromComplaint
            | Self::AssignOfficer
            | Self::ApproveResourceRequests => Rank::Inspector,
            Self::ManageOfficers | Self::ManageInventory | Self::ViewAccessLog => Rank::Admin,
        }
    }
}

const ALL_ACTIONS: [Action; 10] = [
    Action::FileComplaint,
    Action::RequestResource,
    Action::ScheduleDuty,
    Action::CreateCase,
    Action::CreateCaseFromComplaint,
    Action::AssignOfficer,
    Action::ApproveResourceRequests,
    Action::ManageOfficers,
    Action::ManageInventory,
    Action::ViewAccessLog,
];

/// Actions available to an officer of `rank`.
pub fn actions_for(rank: &str) -> Vec<Action> {
    ALL_ACTIONS
        .into_iter()
        .filter(|action| has_role(rank, action.minimum_rank()))
        .collect()
}
