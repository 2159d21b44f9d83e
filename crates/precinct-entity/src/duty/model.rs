//! Duty model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A scheduled assignment of an officer to a date (`duties`).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Duty {
    /// Unique duty identifier.
    pub id: Uuid,
    /// Officer on duty (`officerid`).
    pub officer_id: String,
    /// Day of the duty.
    pub duty_date: NaiveDate,
    /// Shift label (Morning, Evening, Night).
    pub shift: String,
    /// Post or patrol area.
    pub location: String,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Officer who scheduled the duty.
    pub assigned_by: String,
    /// When the duty was scheduled.
    pub created_at: DateTime<Utc>,
}

/// Data required to schedule a duty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDuty {
    /// Officer on duty.
    pub officer_id: String,
    /// Day.
    pub duty_date: NaiveDate,
    /// Shift label.
    pub shift: String,
    /// Post.
    pub location: String,
    /// Notes.
    pub notes: Option<String>,
    /// Scheduling officer.
    pub assigned_by: String,
    /// Resources issued for the duty.
    #[serde(default)]
    pub resource_ids: Vec<Uuid>,
}

impl NewDuty {
    /// Materialize the row (resource links are stored separately).
    pub fn to_duty(&self, now: DateTime<Utc>) -> Duty {
        Duty {
            id: Uuid::new_v4(),
            officer_id: self.officer_id.clone(),
            duty_date: self.duty_date,
            shift: self.shift.clone(),
            location: self.location.clone(),
            notes: self.notes.clone(),
            assigned_by: self.assigned_by.clone(),
            created_at: now,
        }
    }
}

/// Link between a duty and an issued resource (`duty_resources`).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DutyResource {
    /// The duty.
    pub duty_id: Uuid,
    /// The issued resource.
    pub resource_id: Uuid,
}

/// Duty listing filter. Date bounds are inclusive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DutyFilter {
    /// Only this officer's duties.
    pub officer_id: Option<String>,
    /// Earliest date.
    pub from: Option<NaiveDate>,
    /// Latest date.
    pub to: Option<NaiveDate>,
}

impl DutyFilter {
    /// Evaluate the filter against one duty.
    pub fn matches(&self, duty: &Duty) -> bool {
        self.officer_id
            .as_deref()
            .is_none_or(|o| o == duty.officer_id)
            && self.from.is_none_or(|d| duty.duty_date >= d)
            && self.to.is_none_or(|d| duty.duty_date <= d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn duty_on(date: NaiveDate) -> Duty {
        NewDuty {
            officer_id: "C-100".into(),
            duty_date: date,
            shift: "Morning".into(),
            location: "Main Street".into(),
            notes: None,
            assigned_by: "S-10".into(),
            resource_ids: vec![],
        }
        .to_duty(Utc::now())
    }

    #[test]
    fn test_filter_bounds_are_inclusive() {
        let d = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let filter = DutyFilter {
            officer_id: Some("C-100".into()),
            from: Some(d),
            to: Some(d),
        };
        assert!(filter.matches(&duty_on(d)));
        assert!(!filter.matches(&duty_on(d.succ_opt().unwrap())));
        let other = DutyFilter {
            officer_id: Some("C-200".into()),
            ..Default::default()
        };
        assert!(!other.matches(&duty_on(d)));
    }
}
