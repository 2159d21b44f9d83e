//! Access log model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One append-only audit row (`access_logs`).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AccessLogEntry {
    /// Unique entry identifier.
    pub id: Uuid,
    /// Acting officer. For failed logins this is the id that was attempted.
    pub officer_id: String,
    /// Action tag (see [`action`]).
    pub action: String,
    /// Human-readable description.
    pub description: String,
    /// Whether the action succeeded.
    pub success: bool,
    /// Client IP address.
    pub ip_address: Option<String>,
    /// When the action happened.
    pub created_at: DateTime<Utc>,
}

/// Data for a new audit row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAccessLogEntry {
    /// Acting officer.
    pub officer_id: String,
    /// Action tag.
    pub action: String,
    /// Description.
    pub description: String,
    /// Success flag.
    pub success: bool,
    /// Client IP.
    pub ip_address: Option<String>,
}

impl NewAccessLogEntry {
    /// Materialize the row.
    pub fn into_entry(self, now: DateTime<Utc>) -> AccessLogEntry {
        AccessLogEntry {
            id: Uuid::new_v4(),
            officer_id: self.officer_id,
            action: self.action,
            description: self.description,
            success: self.success,
            ip_address: self.ip_address,
            created_at: now,
        }
    }
}

/// Access log query filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccessLogFilter {
    /// Only this officer.
    pub officer_id: Option<String>,
    /// Only this action tag.
    pub action: Option<String>,
    /// Only successes (`true`) or failures (`false`).
    pub success: Option<bool>,
}

impl AccessLogFilter {
    /// Evaluate the filter against one entry.
    pub fn matches(&self, entry: &AccessLogEntry) -> bool {
        self.officer_id
            .as_deref()
            .is_none_or(|o| o == entry.officer_id)
            && self.action.as_deref().is_none_or(|a| a == entry.action)
            && self.success.is_none_or(|s| s == entry.success)
    }
}

/// Action tags written to the access log.
pub mod action {
    pub const LOGIN: &str = "LOGIN";
    pub const LOGOUT: &str = "LOGOUT";
    pub const OFFICER_CREATE: &str = "OFFICER_CREATE";
    pub const OFFICER_UPDATE: &str = "OFFICER_UPDATE";
    pub const OFFICER_DISABLE: &str = "OFFICER_DISABLE";
    pub const OFFICER_ENABLE: &str = "OFFICER_ENABLE";
    pub const PASSWORD_CHANGE: &str = "PASSWORD_CHANGE";
    pub const PASSWORD_RESET: &str = "PASSWORD_RESET";
    pub const COMPLAINT_FILE: &str = "COMPLAINT_FILE";
    pub const COMPLAINT_STATUS: &str = "COMPLAINT_STATUS";
    pub const CASE_CREATE: &str = "CASE_CREATE";
    pub const CASE_STATUS: &str = "CASE_STATUS";
    pub const CASE_ASSIGN: &str = "CASE_ASSIGN";
    pub const ASSIGNMENT_COMPLETE: &str = "ASSIGNMENT_COMPLETE";
    pub const INVESTIGATION_OPEN: &str = "INVESTIGATION_OPEN";
    pub const INVESTIGATION_COMPLETE: &str = "INVESTIGATION_COMPLETE";
    pub const RESOURCE_CREATE: &str = "RESOURCE_CREATE";
    pub const RESOURCE_STOCK: &str = "RESOURCE_STOCK";
    pub const REQUEST_CREATE: &str = "REQUEST_CREATE";
    pub const REQUEST_APPROVE: &str = "REQUEST_APPROVE";
    pub const REQUEST_REJECT: &str = "REQUEST_REJECT";
    pub const DUTY_SCHEDULE: &str = "DUTY_SCHEDULE";
}
