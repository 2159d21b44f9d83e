//! The authenticated officer attached to every request.

use serde::Serialize;

use precinct_core::error::AppError;
use precinct_entity::officer::{Officer, Rank};

use crate::role::{self, Action, DashboardCategory, NavItem};

/// Officer resolved from a session token, with the derived role facts.
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticatedOfficer {
    /// The freshly loaded officer row.
    pub officer: Officer,
    /// Dashboard classification.
    pub category: DashboardCategory,
    /// Rank level (6 = ADMIN .. 1 = Cadet).
    pub level: u8,
}

impl AuthenticatedOfficer {
    /// Derive category and level from a loaded officer.
    pub fn from_officer(officer: Officer) -> Self {
        let category = role::classify_officer(&officer);
        let level = role::rank_level(officer.rank.as_str());
        Self {
            officer,
            category,
            level,
        }
    }

    /// Badge id.
    pub fn officer_id(&self) -> &str {
        &self.officer.officer_id
    }

    pub fn rank(&self) -> Rank {
        self.officer.rank
    }

    /// Rank is at or above `required`.
    pub fn has_role(&self, required: Rank) -> bool {
        self.level >= required.level()
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Rank::Admin)
    }

    /// Inspector or above. Supervisors see unscoped listings.
    pub fn is_supervisor(&self) -> bool {
        self.has_role(Rank::Inspector)
    }

    /// Fail with an authorization error unless the rank is at least `required`.
    pub fn require(&self, required: Rank) -> Result<(), AppError> {
        if self.has_role(required) {
            Ok(())
        } else {
            Err(AppError::authorization(format!(
                "Requires rank {required} or above"
            )))
        }
    }

    /// Owner filter for listings: `None` for supervisors, own id otherwise.
    pub fn scope(&self) -> Option<String> {
        if self.is_supervisor() {
            None
        } else {
            Some(self.officer.officer_id.clone())
        }
    }

    /// Mutations the client may offer this officer.
    pub fn actions(&self) -> Vec<Action> {
        role::actions_for(self.officer.rank.as_str())
    }

    /// Ordered menu for this officer's dashboard category.
    pub fn navigation(&self) -> &'static [NavItem] {
        role::navigation_for(self.category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn officer(rank: Rank, designation: Option<&str>) -> Officer {
        let now = Utc::now();
        Officer {
            officer_id: "S-11".to_string(),
            name: "Test Officer".to_string(),
            gender: None,
            rank,
            designation: designation.map(str::to_string),
            email: None,
            phone: None,
            password_hash: String::new(),
            disabled: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_sergeant_is_scoped() {
        let me = AuthenticatedOfficer::from_officer(officer(Rank::Sergeant, None));
        assert_eq!(me.category, DashboardCategory::Sergeant);
        assert_eq!(me.scope().as_deref(), Some("S-11"));
        assert!(!me.is_supervisor());
        assert!(me.require(Rank::Inspector).is_err());
        assert!(me.require(Rank::Sergeant).is_ok());
    }

    #[test]
    fn test_cid_inspector_is_supervisor() {
        let me = AuthenticatedOfficer::from_officer(officer(Rank::Inspector, Some("CID")));
        assert_eq!(me.category, DashboardCategory::CidSuperior);
        assert!(me.is_supervisor());
        assert!(!me.is_admin());
        assert_eq!(me.scope(), None);
        assert!(me.actions().contains(&Action::ApproveResourceRequests));
    }

    #[test]
    fn test_admin_sees_audit_log() {
        let me = AuthenticatedOfficer::from_officer(officer(Rank::Admin, Some("Admin")));
        assert!(me.is_admin());
        assert!(me.navigation().contains(&NavItem::AuditLog));
        assert!(me.actions().contains(&Action::ViewAccessLog));
    }
}
