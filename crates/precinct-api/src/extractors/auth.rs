//! `AuthOfficer` extractor: pulls the session token from the Authorization
//! header or the session cookie, resolves the officer and injects context.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;

use precinct_core::error::AppError;
use precinct_service::RequestContext;

use crate::error::ApiError;
use crate::extractors::client_ip::ClientIp;
use crate::state::AppState;

/// Extracted authenticated officer context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthOfficer(pub RequestContext);

impl AuthOfficer {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthOfficer {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Session token from `Authorization: Bearer ...`, falling back to the
/// session cookie.
fn session_token(parts: &Parts, cookie_name: &str) -> Option<String> {
    let bearer = parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());

    bearer.or_else(|| {
        CookieJar::from_headers(&parts.headers)
            .get(cookie_name)
            .map(|c| c.value().to_string())
            .filter(|t| !t.is_empty())
    })
}

impl FromRequestParts<AppState> for AuthOfficer {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(parts, &state.config.auth.cookie_name)
            .ok_or_else(|| AppError::authentication("Not signed in"))?;

        let officer = state.auth.authenticate(&token).await?;
        let ClientIp(ip) = ClientIp::from_parts(parts);

        Ok(AuthOfficer(RequestContext::new(officer, ip)))
    }
}
