//! Officer accounts: listing, creation, profile, passwords and disabling.

use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use precinct_auth::{AuditWriter, PasswordHasher, PasswordValidator};
use precinct_core::error::AppError;
use precinct_core::types::{PageRequest, PageResponse};
use precinct_database::store::OfficerStore;
use precinct_entity::audit::action;
use precinct_entity::officer::{NewOfficer, Officer, OfficerFilter, OfficerUpdate, Rank};

use crate::context::RequestContext;
use crate::failure::failed;

/// Data for a new officer account.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOfficerRequest {
    pub officer_id: String,
    pub name: String,
    pub gender: Option<String>,
    pub rank: Rank,
    pub designation: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Initial password, checked against the password policy.
    pub password: String,
}

/// Officer account operations.
#[derive(Debug, Clone)]
pub struct UserManager {
    officers: Arc<dyn OfficerStore>,
    hasher: Arc<PasswordHasher>,
    validator: PasswordValidator,
    audit: AuditWriter,
}

impl UserManager {
    pub fn new(
        officers: Arc<dyn OfficerStore>,
        hasher: Arc<PasswordHasher>,
        validator: PasswordValidator,
        audit: AuditWriter,
    ) -> Self {
        Self {
            officers,
            hasher,
            validator,
            audit,
        }
    }

    /// List officers. Inspector and above.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        filter: &OfficerFilter,
        page: &PageRequest,
    ) -> Result<PageResponse<Officer>, AppError> {
        ctx.require(Rank::Inspector)?;
        self.officers
            .list(filter, page)
            .await
            .map_err(failed("list officers"))
    }

    /// Fetch one officer. Officers below Inspector may only fetch themselves.
    pub async fn get(&self, ctx: &RequestContext, officer_id: &str) -> Result<Officer, AppError> {
        if !ctx.can_see(officer_id) {
            return Err(AppError::authorization(
                "You may only view your own officer record",
            ));
        }
        self.load(officer_id).await
    }

    /// Create an officer account. Administrators only.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: CreateOfficerRequest,
    ) -> Result<Officer, AppError> {
        ctx.require(Rank::Admin)?;

        let officer_id = req.officer_id.trim().to_string();
        if officer_id.is_empty() {
            return Err(AppError::missing_field("officer_id"));
        }
        if req.name.trim().is_empty() {
            return Err(AppError::missing_field("name"));
        }
        if req.password.is_empty() {
            return Err(AppError::missing_field("password"));
        }

        if self
            .officers
            .find_by_id(&officer_id)
            .await
            .map_err(failed("create user"))?
            .is_some()
        {
            return Err(AppError::conflict(format!(
                "Officer id '{officer_id}' is already in use"
            )));
        }

        self.validator
            .validate(&req.password, &[officer_id.as_str(), req.name.as_str()])?;
        let password_hash = self.hasher.hash_password(&req.password)?;

        let officer = self
            .officers
            .insert(NewOfficer {
                officer_id,
                name: req.name.trim().to_string(),
                gender: req.gender,
                rank: req.rank,
                designation: req.designation,
                email: req.email,
                phone: req.phone,
                password_hash,
            })
            .await
            .map_err(failed("create user"))?;

        self.audit
            .record(
                ctx.officer_id(),
                action::OFFICER_CREATE,
                &format!(
                    "Created officer {} ({})",
                    officer.officer_id, officer.rank
                ),
                ctx.ip(),
            )
            .await;
        info!(
            admin_id = %ctx.officer_id(),
            officer_id = %officer.officer_id,
            rank = %officer.rank,
            "Officer created"
        );

        Ok(officer)
    }

    /// Update a profile.
    ///
    /// Administrators may change every field of any officer. Everyone else
    /// may change name, gender and contact details of their own record.
    pub async fn update_profile(
        &self,
        ctx: &RequestContext,
        officer_id: &str,
        update: OfficerUpdate,
    ) -> Result<Officer, AppError> {
        if !ctx.is_admin() {
            if officer_id != ctx.officer_id() {
                return Err(AppError::authorization(
                    "You may only update your own profile",
                ));
            }
            if update.changes_role() {
                return Err(AppError::authorization(
                    "Only administrators may change rank or designation",
                ));
            }
        }
        if update.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(AppError::validation("Name must not be empty"));
        }

        self.load(officer_id).await?;
        let officer = self
            .officers
            .update_profile(officer_id, &update)
            .await
            .map_err(failed("update user"))?;

        self.audit
            .record(
                ctx.officer_id(),
                action::OFFICER_UPDATE,
                &format!("Updated profile of {officer_id}"),
                ctx.ip(),
            )
            .await;
        info!(actor = %ctx.officer_id(), officer_id = %officer_id, "Officer profile updated");

        Ok(officer)
    }

    /// Change the caller's own password after verifying the current one.
    pub async fn change_password(
        &self,
        ctx: &RequestContext,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        if current_password.is_empty() {
            return Err(AppError::missing_field("current_password"));
        }
        if new_password.is_empty() {
            return Err(AppError::missing_field("new_password"));
        }

        let officer = self.load(ctx.officer_id()).await?;
        if !self
            .hasher
            .verify_password(current_password, &officer.password_hash)?
        {
            return Err(AppError::validation("Current password is incorrect"));
        }

        self.validator
            .validate_not_same(current_password, new_password)?;
        self.store_password(&officer, new_password, "change password")
            .await?;

        self.audit
            .record(
                ctx.officer_id(),
                action::PASSWORD_CHANGE,
                "Changed own password",
                ctx.ip(),
            )
            .await;
        info!(officer_id = %ctx.officer_id(), "Password changed");
        Ok(())
    }

    /// Set a new password for another officer. Administrators only.
    pub async fn reset_password(
        &self,
        ctx: &RequestContext,
        officer_id: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        ctx.require(Rank::Admin)?;
        if new_password.is_empty() {
            return Err(AppError::missing_field("new_password"));
        }

        let officer = self.load(officer_id).await?;
        self.store_password(&officer, new_password, "reset password")
            .await?;

        self.audit
            .record(
                ctx.officer_id(),
                action::PASSWORD_RESET,
                &format!("Reset password of {officer_id}"),
                ctx.ip(),
            )
            .await;
        info!(admin_id = %ctx.officer_id(), officer_id = %officer_id, "Password reset");
        Ok(())
    }

    /// Disable or re-enable an account. Administrators only; nobody may
    /// disable their own account.
    pub async fn set_disabled(
        &self,
        ctx: &RequestContext,
        officer_id: &str,
        disabled: bool,
    ) -> Result<Officer, AppError> {
        ctx.require(Rank::Admin)?;
        if disabled && officer_id == ctx.officer_id() {
            return Err(AppError::conflict("cannot disable your own account"));
        }

        self.load(officer_id).await?;
        let officer = self
            .officers
            .set_disabled(officer_id, disabled)
            .await
            .map_err(failed("update user"))?;

        let (tag, verb) = if disabled {
            (action::OFFICER_DISABLE, "Disabled")
        } else {
            (action::OFFICER_ENABLE, "Enabled")
        };
        self.audit
            .record(
                ctx.officer_id(),
                tag,
                &format!("{verb} officer {officer_id}"),
                ctx.ip(),
            )
            .await;
        info!(admin_id = %ctx.officer_id(), officer_id = %officer_id, disabled, "Officer status changed");

        Ok(officer)
    }

    async fn load(&self, officer_id: &str) -> Result<Officer, AppError> {
        self.officers
            .find_by_id(officer_id)
            .await
            .map_err(failed("load user"))?
            .ok_or_else(|| AppError::not_found(format!("Officer '{officer_id}' not found")))
    }

    async fn store_password(
        &self,
        officer: &Officer,
        new_password: &str,
        operation: &'static str,
    ) -> Result<(), AppError> {
        self.validator.validate(
            new_password,
            &[officer.officer_id.as_str(), officer.name.as_str()],
        )?;
        let hash = self.hasher.hash_password(new_password)?;
        self.officers
            .set_password_hash(&officer.officer_id, &hash)
            .await
            .map_err(failed(operation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;
    use precinct_core::config::AuthConfig;
    use precinct_core::error::ErrorKind;

    const STRONG: &str = "violet-harbour-lantern-42";

    fn manager(fx: &Fixture) -> UserManager {
        UserManager::new(
            Arc::clone(&fx.db.officers),
            Arc::new(PasswordHasher::new()),
            PasswordValidator::new(&AuthConfig::default()),
            fx.audit(),
        )
    }

    fn request(id: &str) -> CreateOfficerRequest {
        CreateOfficerRequest {
            officer_id: id.to_string(),
            name: "Amara Okafor".to_string(),
            gender: Some("F".to_string()),
            rank: Rank::Constable,
            designation: Some("Traffic".to_string()),
            email: None,
            phone: None,
            password: STRONG.to_string(),
        }
    }

    #[tokio::test]
    async fn test_admin_creates_officer() {
        let fx = Fixture::new();
        let admin = fx.officer("A-1", Rank::Admin, None).await;
        let users = manager(&fx);

        let officer = users.create(&admin, request("C-200")).await.unwrap();
        assert_eq!(officer.officer_id, "C-200");
        assert!(!officer.disabled);
        assert_ne!(officer.password_hash, STRONG);
        assert_eq!(fx.audit_count(action::OFFICER_CREATE).await, 1);
    }

    #[tokio::test]
    async fn test_duplicate_id_conflicts() {
        let fx = Fixture::new();
        let admin = fx.officer("A-1", Rank::Admin, None).await;
        let users = manager(&fx);

        users.create(&admin, request("C-200")).await.unwrap();
        let err = users.create(&admin, request("C-200")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(fx.audit_count(action::OFFICER_CREATE).await, 1);
    }

    #[tokio::test]
    async fn test_non_admin_cannot_create() {
        let fx = Fixture::new();
        let chief = fx.officer("CI-1", Rank::ChiefInspector, None).await;
        let err = manager(&fx)
            .create(&chief, request("C-200"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
    }

    #[tokio::test]
    async fn test_missing_name_is_named() {
        let fx = Fixture::new();
        let admin = fx.officer("A-1", Rank::Admin, None).await;
        let mut req = request("C-200");
        req.name = "  ".to_string();
        let err = manager(&fx).create(&admin, req).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.message.contains("name"));
    }

    #[tokio::test]
    async fn test_cannot_disable_self() {
        let fx = Fixture::new();
        let admin = fx.officer("A-1", Rank::Admin, None).await;
        let err = manager(&fx)
            .set_disabled(&admin, "A-1", true)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(err.message, "cannot disable your own account");
    }

    #[tokio::test]
    async fn test_disable_and_enable() {
        let fx = Fixture::new();
        let admin = fx.officer("A-1", Rank::Admin, None).await;
        fx.officer("C-5", Rank::Constable, None).await;
        let users = manager(&fx);

        assert!(users.set_disabled(&admin, "C-5", true).await.unwrap().disabled);
        assert!(!users.set_disabled(&admin, "C-5", false).await.unwrap().disabled);
        assert_eq!(fx.audit_count(action::OFFICER_DISABLE).await, 1);
        assert_eq!(fx.audit_count(action::OFFICER_ENABLE).await, 1);
    }

    #[tokio::test]
    async fn test_self_update_cannot_change_rank() {
        let fx = Fixture::new();
        let me = fx.officer("C-5", Rank::Constable, None).await;
        let users = manager(&fx);

        let promote = OfficerUpdate {
            rank: Some(Rank::Inspector),
            ..Default::default()
        };
        let err = users
            .update_profile(&me, "C-5", promote)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);

        let rename = OfficerUpdate {
            phone: Some("555-0100".to_string()),
            ..Default::default()
        };
        let updated = users.update_profile(&me, "C-5", rename).await.unwrap();
        assert_eq!(updated.phone.as_deref(), Some("555-0100"));
        assert_eq!(updated.rank, Rank::Constable);
    }

    #[tokio::test]
    async fn test_constable_cannot_view_others() {
        let fx = Fixture::new();
        let me = fx.officer("C-5", Rank::Constable, None).await;
        fx.officer("C-6", Rank::Constable, None).await;
        let users = manager(&fx);

        assert!(users.get(&me, "C-5").await.is_ok());
        let err = users.get(&me, "C-6").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
    }

    #[tokio::test]
    async fn test_change_password_verifies_current() {
        let fx = Fixture::new();
        let admin = fx.officer("A-1", Rank::Admin, None).await;
        let users = manager(&fx);
        let created = users.create(&admin, request("C-200")).await.unwrap();
        let me = crate::testing::context(created);

        let err = users
            .change_password(&me, "not-it", "amber-quarry-whistle-77")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        users
            .change_password(&me, STRONG, "amber-quarry-whistle-77")
            .await
            .unwrap();
        assert_eq!(fx.audit_count(action::PASSWORD_CHANGE).await, 1);
    }
}
