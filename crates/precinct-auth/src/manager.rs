//! Login, logout and per-request identity resolution.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use precinct_core::config::AuthConfig;
use precinct_core::error::AppError;
use precinct_database::store::OfficerStore;
use precinct_entity::audit::action;

use crate::audit::AuditWriter;
use crate::identity::AuthenticatedOfficer;
use crate::jwt::{JwtDecoder, JwtEncoder};
use crate::password::PasswordHasher;

/// Result of a successful login.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    /// Signed session token.
    pub token: String,
    /// Token expiry.
    pub expires_at: DateTime<Utc>,
    /// The signed-in officer with derived role facts.
    pub officer: AuthenticatedOfficer,
}

/// Authenticates officers and resolves session tokens.
///
/// Sessions are stateless: the token only carries the officer id, and the
/// officer row is reloaded on every request so rank changes and disabling
/// take effect immediately.
#[derive(Clone)]
pub struct AuthManager {
    officers: Arc<dyn OfficerStore>,
    audit: AuditWriter,
    hasher: Arc<PasswordHasher>,
    encoder: Arc<JwtEncoder>,
    decoder: Arc<JwtDecoder>,
}

impl std::fmt::Debug for AuthManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthManager")
            .field("encoder", &self.encoder)
            .finish()
    }
}

impl AuthManager {
    /// Build the manager from the officer store, the audit writer and auth config.
    pub fn new(officers: Arc<dyn OfficerStore>, audit: AuditWriter, config: &AuthConfig) -> Self {
        Self {
            officers,
            audit,
            hasher: Arc::new(PasswordHasher::new()),
            encoder: Arc::new(JwtEncoder::new(config)),
            decoder: Arc::new(JwtDecoder::new(config)),
        }
    }

    /// The password hasher shared with officer management.
    pub fn hasher(&self) -> Arc<PasswordHasher> {
        Arc::clone(&self.hasher)
    }

    /// Verify credentials and issue a session token.
    ///
    /// Every attempt writes one access-log row. Unknown ids, wrong passwords
    /// and disabled accounts all fail with the same message.
    pub async fn login(
        &self,
        officer_id: &str,
        password: &str,
        ip: Option<&str>,
    ) -> Result<LoginResult, AppError> {
        if officer_id.trim().is_empty() {
            return Err(AppError::missing_field("officer_id"));
        }
        if password.is_empty() {
            return Err(AppError::missing_field("password"));
        }

        let officer = match self.officers.find_by_id(officer_id).await {
            Ok(Some(officer)) => officer,
            Ok(None) => {
                return Err(self.reject(officer_id, "unknown officer id", ip).await);
            }
            Err(e) => return Err(e.into_operation_failure("sign in")),
        };

        if !self.hasher.verify_password(password, &officer.password_hash)? {
            return Err(self.reject(officer_id, "wrong password", ip).await);
        }

        if !officer.can_login() {
            return Err(self.reject(officer_id, "account disabled", ip).await);
        }

        let (token, expires_at) = self.encoder.issue(&officer.officer_id)?;

        self.audit
            .record(&officer.officer_id, action::LOGIN, "Signed in", ip)
            .await;
        info!(officer_id = %officer.officer_id, rank = %officer.rank, "Login successful");

        Ok(LoginResult {
            token,
            expires_at,
            officer: AuthenticatedOfficer::from_officer(officer),
        })
    }

    /// Record a logout. Tokens are not revoked; clients drop them.
    pub async fn logout(&self, officer: &AuthenticatedOfficer, ip: Option<&str>) {
        self.audit
            .record(officer.officer_id(), action::LOGOUT, "Signed out", ip)
            .await;
        info!(officer_id = %officer.officer_id(), "Logout");
    }

    /// Decode a session token and load the officer behind it.
    pub async fn authenticate(&self, token: &str) -> Result<AuthenticatedOfficer, AppError> {
        let claims = self.decoder.decode(token)?;

        let officer = self
            .officers
            .find_by_id(claims.officer_id())
            .await
            .map_err(|e| e.into_operation_failure("load session"))?
            .ok_or_else(|| AppError::authentication("Session officer no longer exists"))?;

        if !officer.can_login() {
            return Err(AppError::authentication("Account is disabled"));
        }

        Ok(AuthenticatedOfficer::from_officer(officer))
    }

    async fn reject(&self, officer_id: &str, reason: &str, ip: Option<&str>) -> AppError {
        warn!(officer_id = %officer_id, reason = %reason, "Login rejected");
        self.audit
            .record_failure(
                officer_id,
                action::LOGIN,
                &format!("Login failed: {reason}"),
                ip,
            )
            .await;
        AppError::authentication("Invalid officer id or password")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use precinct_core::error::ErrorKind;
    use precinct_core::types::pagination::PageRequest;
    use precinct_database::Database;
    use precinct_database::memory::MemoryDatabase;
    use precinct_entity::audit::AccessLogFilter;
    use precinct_entity::officer::{NewOfficer, Rank};

    async fn setup() -> (Database, AuthManager) {
        let db = Database::memory(MemoryDatabase::new());
        let hash = PasswordHasher::new().hash_password("correct horse").unwrap();
        for (id, disabled) in [("C-100", false), ("C-101", true)] {
            db.officers
                .insert(NewOfficer {
                    officer_id: id.to_string(),
                    name: "Jane Doe".to_string(),
                    gender: None,
                    rank: Rank::Constable,
                    designation: Some("Traffic".to_string()),
                    email: None,
                    phone: None,
                    password_hash: hash.clone(),
                })
                .await
                .unwrap();
            if disabled {
                db.officers.set_disabled(id, true).await.unwrap();
            }
        }
        let manager = AuthManager::new(
            Arc::clone(&db.officers),
            AuditWriter::new(Arc::clone(&db.audit)),
            &AuthConfig::default(),
        );
        (db, manager)
    }

    async fn login_rows(db: &Database, success: bool) -> u64 {
        let filter = AccessLogFilter {
            action: Some(action::LOGIN.to_string()),
            success: Some(success),
            ..Default::default()
        };
        db.audit
            .list(&filter, &PageRequest::default())
            .await
            .unwrap()
            .total_items
    }

    #[tokio::test]
    async fn test_login_then_authenticate() {
        let (db, auth) = setup().await;
        let result = auth
            .login("C-100", "correct horse", Some("10.0.0.1"))
            .await
            .unwrap();
        assert_eq!(
            result.officer.category,
            crate::role::DashboardCategory::Traffic
        );

        let me = auth.authenticate(&result.token).await.unwrap();
        assert_eq!(me.officer_id(), "C-100");
        assert_eq!(login_rows(&db, true).await, 1);
    }

    #[tokio::test]
    async fn test_wrong_password_is_audited() {
        let (db, auth) = setup().await;
        let err = auth.login("C-100", "wrong", None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
        assert_eq!(login_rows(&db, false).await, 1);
        assert_eq!(login_rows(&db, true).await, 0);
    }

    #[tokio::test]
    async fn test_unknown_and_disabled_rejected() {
        let (db, auth) = setup().await;
        let unknown = auth.login("X-999", "correct horse", None).await.unwrap_err();
        let disabled = auth.login("C-101", "correct horse", None).await.unwrap_err();
        assert_eq!(unknown.kind, ErrorKind::Authentication);
        assert_eq!(disabled.kind, ErrorKind::Authentication);
        assert_eq!(unknown.message, disabled.message);
        assert_eq!(login_rows(&db, false).await, 2);
    }

    #[tokio::test]
    async fn test_disabled_after_login_loses_session() {
        let (db, auth) = setup().await;
        let result = auth.login("C-100", "correct horse", None).await.unwrap();
        db.officers.set_disabled("C-100", true).await.unwrap();
        let err = auth.authenticate(&result.token).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[tokio::test]
    async fn test_token_for_missing_officer_is_unauthenticated() {
        let (_db, auth) = setup().await;
        let (token, _) = auth.encoder.issue("X-404").unwrap();
        let err = auth.authenticate(&token).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[tokio::test]
    async fn test_missing_password_names_field() {
        let (_db, auth) = setup().await;
        let err = auth.login("C-100", "", None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.message.contains("password"));
    }
}
