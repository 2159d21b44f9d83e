//! Officer entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::rank::Rank;

/// A system user: a sworn officer or administrative account.
///
/// Stored in `userlogin`. Officers are never deleted, only disabled.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Officer {
    /// Badge/officer id assigned by an administrator.
    pub officer_id: String,
    /// Full name.
    pub name: String,
    /// Gender as recorded on the personnel file.
    pub gender: Option<String>,
    /// Seniority.
    pub rank: Rank,
    /// Functional unit (CID, Traffic, ...).
    pub designation: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Soft-disable flag.
    pub disabled: bool,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last changed.
    pub updated_at: DateTime<Utc>,
}

impl Officer {
    /// Check if this officer may sign in.
    pub fn can_login(&self) -> bool {
        !self.disabled
    }
}

/// Data required to create an officer record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOfficer {
    /// Badge/officer id.
    pub officer_id: String,
    /// Full name.
    pub name: String,
    /// Gender.
    pub gender: Option<String>,
    /// Seniority.
    pub rank: Rank,
    /// Functional unit.
    pub designation: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Pre-hashed password.
    pub password_hash: String,
}

/// Profile changes. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OfficerUpdate {
    /// New name.
    pub name: Option<String>,
    /// New gender.
    pub gender: Option<String>,
    /// New rank (administrators only).
    pub rank: Option<Rank>,
    /// New designation (administrators only).
    pub designation: Option<String>,
    /// New email.
    pub email: Option<String>,
    /// New phone.
    pub phone: Option<String>,
}

impl OfficerUpdate {
    /// Whether the update touches rank or designation.
    pub fn changes_role(&self) -> bool {
        self.rank.is_some() || self.designation.is_some()
    }

    /// Apply the update to an in-memory officer record.
    pub fn apply_to(&self, officer: &mut Officer) {
        if let Some(name) = &self.name {
            officer.name = name.clone();
        }
        if let Some(gender) = &self.gender {
            officer.gender = Some(gender.clone());
        }
        if let Some(rank) = self.rank {
            officer.rank = rank;
        }
        if let Some(designation) = &self.designation {
            officer.designation = Some(designation.clone());
        }
        if let Some(email) = &self.email {
            officer.email = Some(email.clone());
        }
        if let Some(phone) = &self.phone {
            officer.phone = Some(phone.clone());
        }
    }
}

/// Officer listing filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OfficerFilter {
    /// Only this rank.
    pub rank: Option<Rank>,
    /// Only this designation.
    pub designation: Option<String>,
    /// Only disabled (`true`) or enabled (`false`) accounts.
    pub disabled: Option<bool>,
    /// Case-insensitive substring of id or name.
    pub search: Option<String>,
}

impl OfficerFilter {
    /// Evaluate the filter against one record.
    pub fn matches(&self, officer: &Officer) -> bool {
        if self.rank.is_some_and(|r| r != officer.rank) {
            return false;
        }
        if let Some(designation) = &self.designation {
            if officer.designation.as_deref() != Some(designation.as_str()) {
                return false;
            }
        }
        if self.disabled.is_some_and(|d| d != officer.disabled) {
            return false;
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            if !officer.officer_id.to_lowercase().contains(&needle)
                && !officer.name.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        true
    }
}
