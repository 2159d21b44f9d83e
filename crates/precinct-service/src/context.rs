//! Request context carrying the authenticated officer and request origin.

use chrono::{DateTime, Utc};

use precinct_auth::AuthenticatedOfficer;
use precinct_core::error::AppError;
use precinct_entity::officer::Rank;

/// Who is acting, and from where.
///
/// Built by the API layer after the session token resolves and passed to
/// every manager call.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The authenticated officer.
    pub officer: AuthenticatedOfficer,
    /// Client IP address, when known.
    pub ip_address: Option<String>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    pub fn new(officer: AuthenticatedOfficer, ip_address: Option<String>) -> Self {
        Self {
            officer,
            ip_address,
            request_time: Utc::now(),
        }
    }

    /// Acting officer id.
    pub fn officer_id(&self) -> &str {
        self.officer.officer_id()
    }

    pub fn ip(&self) -> Option<&str> {
        self.ip_address.as_deref()
    }

    pub fn is_admin(&self) -> bool {
        self.officer.is_admin()
    }

    pub fn is_supervisor(&self) -> bool {
        self.officer.is_supervisor()
    }

    /// Fail with an authorization error unless the rank is at least `rank`.
    pub fn require(&self, rank: Rank) -> Result<(), AppError> {
        self.officer.require(rank)
    }

    /// Owner filter applied to listings (`None` = unscoped).
    pub fn scope(&self) -> Option<String> {
        self.officer.scope()
    }

    /// Whether the caller may see a row owned by `owner`.
    pub fn can_see(&self, owner: &str) -> bool {
        self.is_supervisor() || owner == self.officer_id()
    }
}
