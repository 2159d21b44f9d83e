//! Resource allocation requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Decision state of a request. Approved and Rejected are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "request_status")]
pub enum RequestStatus {
    /// Awaiting a decision.
    Pending,
    /// Granted; stock was decremented.
    Approved,
    /// Refused.
    Rejected,
}

impl RequestStatus {
    /// Whether a request may move from `self` to `next`.
    pub fn can_transition_to(&self, next: RequestStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Approved) | (Self::Pending, Self::Rejected)
        )
    }

    /// Return the status label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = precinct_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(precinct_core::AppError::validation(format!(
                "Invalid request status: '{s}'"
            ))),
        }
    }
}

/// How urgently the requester needs the resource.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    sqlx::Type,
)]
#[sqlx(type_name = "request_urgency")]
pub enum Urgency {
    /// Routine.
    Low,
    /// Default.
    #[default]
    Medium,
    /// Needed soon.
    High,
    /// Needed now.
    Critical,
}

/// A request to allocate units of a resource (`resource_requests`).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResourceRequest {
    /// Unique request identifier.
    pub id: Uuid,
    /// Requested item.
    pub resource_id: Uuid,
    /// Requesting officer (`officerid`).
    pub officer_id: String,
    /// Units requested. Always positive.
    pub quantity: i32,
    /// Why the resource is needed.
    pub reason: String,
    /// Urgency.
    pub urgency: Urgency,
    /// Decision state.
    pub status: RequestStatus,
    /// Officer who approved or rejected.
    pub approved_by: Option<String>,
    /// When the request was filed.
    pub requested_at: DateTime<Utc>,
    /// When the decision was taken.
    pub decided_at: Option<DateTime<Utc>>,
}

/// Data required to file a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewResourceRequest {
    /// Requested item.
    pub resource_id: Uuid,
    /// Requesting officer.
    pub officer_id: String,
    /// Units requested.
    pub quantity: i32,
    /// Justification.
    pub reason: String,
    /// Urgency.
    pub urgency: Urgency,
}

impl NewResourceRequest {
    /// Materialize a pending request.
    pub fn into_request(self, now: DateTime<Utc>) -> ResourceRequest {
        ResourceRequest {
            id: Uuid::new_v4(),
            resource_id: self.resource_id,
            officer_id: self.officer_id,
            quantity: self.quantity,
            reason: self.reason,
            urgency: self.urgency,
            status: RequestStatus::Pending,
            approved_by: None,
            requested_at: now,
            decided_at: None,
        }
    }
}

/// Request listing filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestFilter {
    /// Only this status.
    pub status: Option<RequestStatus>,
    /// Only this requester.
    pub officer_id: Option<String>,
    /// Only requests for this item.
    pub resource_id: Option<Uuid>,
}

impl RequestFilter {
    /// Evaluate the filter against one request.
    pub fn matches(&self, request: &ResourceRequest) -> bool {
        self.status.is_none_or(|s| s == request.status)
            && self
                .officer_id
                .as_deref()
                .is_none_or(|o| o == request.officer_id)
            && self.resource_id.is_none_or(|r| r == request.resource_id)
    }
}
