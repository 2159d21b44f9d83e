//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Session token and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for session token signing (HMAC-SHA256).
    #[serde(default = "default_token_secret")]
    pub token_secret: String,
    /// Session token lifetime in minutes.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_minutes: u64,
    /// Name of the cookie carrying the session token.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Reject passwords scoring below zxcvbn score 3.
    #[serde(default = "default_true")]
    pub enforce_password_strength: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: default_token_secret(),
            token_ttl_minutes: default_token_ttl(),
            cookie_name: default_cookie_name(),
            password_min_length: default_password_min(),
            enforce_password_strength: default_true(),
        }
    }
}

fn default_token_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_token_ttl() -> u64 {
    8 * 60
}

fn default_cookie_name() -> String {
    "precinct_session".to_string()
}

fn default_password_min() -> usize {
    8
}

fn default_true() -> bool {
    true
}
