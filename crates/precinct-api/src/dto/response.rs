//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use precinct_auth::{Action, AuthenticatedOfficer, LoginResult, NavItem};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// The signed-in officer with everything a client needs to render menus.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    /// Officer row plus category and level.
    #[serde(flatten)]
    pub identity: AuthenticatedOfficer,
    /// Menu for the officer's dashboard category.
    pub navigation: &'static [NavItem],
    /// Actions the officer's rank permits.
    pub actions: Vec<Action>,
}

impl From<AuthenticatedOfficer> for SessionResponse {
    fn from(identity: AuthenticatedOfficer) -> Self {
        let navigation = identity.navigation();
        let actions = identity.actions();
        Self {
            identity,
            navigation,
            actions,
        }
    }
}

/// Login response.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    /// Session token, also set as a cookie.
    pub token: String,
    /// Token expiry.
    pub expires_at: DateTime<Utc>,
    /// Officer info.
    pub officer: SessionResponse,
}

impl From<LoginResult> for LoginResponse {
    fn from(result: LoginResult) -> Self {
        Self {
            token: result.token,
            expires_at: result.expires_at,
            officer: SessionResponse::from(result.officer),
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "ok" or "degraded".
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Active database backend.
    pub database: String,
}
